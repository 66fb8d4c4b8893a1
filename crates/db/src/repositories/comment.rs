//! Comment repository.

use std::sync::Arc;

use crate::entities::{Comment, comment};
use crate::error::db_err;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use socialgram_common::{AppError, AppResult};
use tracing::debug;

/// Fields for a new comment. The id is assigned by the database.
#[derive(Debug, Clone)]
pub struct NewComment {
    /// Post being commented on.
    pub post_id: i32,
    /// Author of the comment.
    pub user_id: i32,
    /// Comment body.
    pub text: String,
}

impl From<NewComment> for comment::ActiveModel {
    fn from(new: NewComment) -> Self {
        Self {
            id: NotSet,
            post_id: Set(new.post_id),
            user_id: Set(new.user_id),
            text: Set(new.text),
        }
    }
}

/// Comment repository for database operations.
#[derive(Clone)]
pub struct CommentRepository {
    db: Arc<DatabaseConnection>,
}

impl CommentRepository {
    /// Create a new comment repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a comment by ID.
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<comment::Model>> {
        Comment::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(db_err)
    }

    /// Find a comment by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i32) -> AppResult<comment::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("comment {id}")))
    }

    /// Get comments on a post, oldest first.
    pub async fn find_by_post(&self, post_id: i32) -> AppResult<Vec<comment::Model>> {
        Comment::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_asc(comment::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(db_err)
    }

    /// Get comments written by a user, oldest first.
    pub async fn find_by_user(&self, user_id: i32) -> AppResult<Vec<comment::Model>> {
        Comment::find()
            .filter(comment::Column::UserId.eq(user_id))
            .order_by_asc(comment::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(db_err)
    }

    /// Count comments on a post.
    pub async fn count_by_post(&self, post_id: i32) -> AppResult<u64> {
        Comment::find()
            .filter(comment::Column::PostId.eq(post_id))
            .count(self.db.as_ref())
            .await
            .map_err(db_err)
    }

    /// Create a new comment.
    pub async fn create(&self, model: comment::ActiveModel) -> AppResult<comment::Model> {
        let comment = model.insert(self.db.as_ref()).await.map_err(db_err)?;
        debug!(comment_id = comment.id, post_id = comment.post_id, "Created comment");
        Ok(comment)
    }

    /// Update a comment.
    ///
    /// Fails with a not-found error when the row no longer exists.
    pub async fn update(&self, model: comment::ActiveModel) -> AppResult<comment::Model> {
        let id = match &model.id {
            ActiveValue::Set(id) | ActiveValue::Unchanged(id) => Some(*id),
            ActiveValue::NotSet => None,
        };

        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| match (db_err(e), id) {
                (AppError::NotFound(_), Some(id)) => AppError::NotFound(format!("comment {id}")),
                (err, _) => err,
            })
    }

    /// Delete a comment.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        Comment::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(db_err)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn create_test_comment(id: i32, post_id: i32, user_id: i32) -> comment::Model {
        comment::Model {
            id,
            post_id,
            user_id,
            text: "nice".to_string(),
        }
    }

    #[tokio::test]
    async fn test_get_by_id_not_found_returns_error() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<comment::Model>::new()])
                .into_connection(),
        );

        let repo = CommentRepository::new(db);
        let result = repo.get_by_id(5).await;

        assert!(matches!(result, Err(AppError::NotFound(msg)) if msg == "comment 5"));
    }

    #[tokio::test]
    async fn test_find_by_post() {
        let c1 = create_test_comment(1, 3, 10);
        let c2 = create_test_comment(2, 3, 11);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[c1, c2]])
                .into_connection(),
        );

        let repo = CommentRepository::new(db);
        let result = repo.find_by_post(3).await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].id, 1);
    }

    #[tokio::test]
    async fn test_find_by_user() {
        let c1 = create_test_comment(1, 3, 10);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[c1]])
                .into_connection(),
        );

        let repo = CommentRepository::new(db);
        let result = repo.find_by_user(10).await.unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].user_id, 10);
    }

    #[tokio::test]
    async fn test_count_by_post() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::BigInt(Some(4))
                }]])
                .into_connection(),
        );

        let repo = CommentRepository::new(db);
        assert_eq!(repo.count_by_post(3).await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_delete() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = CommentRepository::new(db);
        let result = repo.delete(1).await;

        assert!(result.is_ok());
    }
}
