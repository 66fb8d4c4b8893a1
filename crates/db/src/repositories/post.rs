//! Post repository.

use std::sync::Arc;

use crate::entities::{Comment, Like, Post, User, comment, like, post, user};
use crate::error::db_err;
use crate::repositories::DeleteSummary;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, ModelTrait, NotSet, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use socialgram_common::{AppError, AppResult};
use tracing::debug;

/// Fields for a new post. The id is assigned by the database.
#[derive(Debug, Clone)]
pub struct NewPost {
    /// Owning user.
    pub user_id: i32,
    /// Media URI or path.
    pub media: String,
    /// Optional caption.
    pub caption: Option<String>,
}

impl From<NewPost> for post::ActiveModel {
    fn from(new: NewPost) -> Self {
        Self {
            id: NotSet,
            user_id: Set(new.user_id),
            media: Set(new.media),
            caption: Set(new.caption),
        }
    }
}

/// Post repository for database operations.
#[derive(Clone)]
pub struct PostRepository {
    db: Arc<DatabaseConnection>,
}

impl PostRepository {
    /// Create a new post repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a post by ID.
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<post::Model>> {
        Post::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(db_err)
    }

    /// Find a post by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i32) -> AppResult<post::Model> {
        self.find_by_id(id)
            .await?
            .ok_or(AppError::PostNotFound(id))
    }

    /// Get all posts owned by a user, oldest first.
    pub async fn find_by_user(&self, user_id: i32) -> AppResult<Vec<post::Model>> {
        Post::find()
            .filter(post::Column::UserId.eq(user_id))
            .order_by_asc(post::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(db_err)
    }

    /// Count posts owned by a user.
    pub async fn count_by_user(&self, user_id: i32) -> AppResult<u64> {
        Post::find()
            .filter(post::Column::UserId.eq(user_id))
            .count(self.db.as_ref())
            .await
            .map_err(db_err)
    }

    /// Load the author of a post.
    pub async fn find_author(&self, post: &post::Model) -> AppResult<Option<user::Model>> {
        post.find_related(User)
            .one(self.db.as_ref())
            .await
            .map_err(db_err)
    }

    /// Create a new post.
    pub async fn create(&self, model: post::ActiveModel) -> AppResult<post::Model> {
        let post = model.insert(self.db.as_ref()).await.map_err(db_err)?;
        debug!(post_id = post.id, user_id = post.user_id, "Created post");
        Ok(post)
    }

    /// Update a post. A vanished row is [`AppError::PostNotFound`].
    pub async fn update(&self, model: post::ActiveModel) -> AppResult<post::Model> {
        let id = match &model.id {
            ActiveValue::Set(id) | ActiveValue::Unchanged(id) => Some(*id),
            ActiveValue::NotSet => None,
        };

        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| match (db_err(e), id) {
                (AppError::NotFound(_), Some(id)) => AppError::PostNotFound(id),
                (err, _) => err,
            })
    }

    /// Delete a post together with its comments and likes.
    ///
    /// Runs in a single transaction: either all rows go or none do.
    pub async fn delete(&self, id: i32) -> AppResult<DeleteSummary> {
        let txn = self.db.begin().await.map_err(db_err)?;

        match delete_post_cascade(&txn, id).await {
            Ok(summary) => {
                txn.commit().await.map_err(db_err)?;
                debug!(post_id = id, ?summary, "Deleted post");
                Ok(summary)
            }
            Err(e) => {
                txn.rollback().await.map_err(db_err)?;
                Err(db_err(e))
            }
        }
    }
}

async fn delete_post_cascade<C: ConnectionTrait>(db: &C, id: i32) -> Result<DeleteSummary, DbErr> {
    let mut summary = delete_post_children(db, &[id]).await?;
    summary.posts = Post::delete_by_id(id).exec(db).await?.rows_affected;
    Ok(summary)
}

/// Delete the comments and likes attached to the given posts.
///
/// The posts themselves are left in place; callers remove them afterwards.
pub(crate) async fn delete_post_children<C: ConnectionTrait>(
    db: &C,
    post_ids: &[i32],
) -> Result<DeleteSummary, DbErr> {
    if post_ids.is_empty() {
        return Ok(DeleteSummary::default());
    }

    let comments = Comment::delete_many()
        .filter(comment::Column::PostId.is_in(post_ids.iter().copied()))
        .exec(db)
        .await?
        .rows_affected;

    let likes = Like::delete_many()
        .filter(like::Column::PostId.is_in(post_ids.iter().copied()))
        .exec(db)
        .await?
        .rows_affected;

    Ok(DeleteSummary {
        comments,
        likes,
        ..DeleteSummary::default()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn create_test_post(id: i32, user_id: i32) -> post::Model {
        post::Model {
            id,
            user_id,
            media: format!("media/{id}.png"),
            caption: None,
        }
    }

    #[tokio::test]
    async fn test_find_by_id_found() {
        let post = create_test_post(1, 10);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[post.clone()]])
                .into_connection(),
        );

        let repo = PostRepository::new(db);
        let result = repo.find_by_id(1).await.unwrap();

        assert_eq!(result, Some(post));
    }

    #[tokio::test]
    async fn test_get_by_id_not_found_returns_error() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<post::Model>::new()])
                .into_connection(),
        );

        let repo = PostRepository::new(db);
        let result = repo.get_by_id(99).await;

        match result {
            Err(AppError::PostNotFound(id)) => assert_eq!(id, 99),
            _ => panic!("Expected PostNotFound error"),
        }
    }

    #[tokio::test]
    async fn test_find_by_user() {
        let p1 = create_test_post(1, 10);
        let p2 = create_test_post(2, 10);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[p1, p2]])
                .into_connection(),
        );

        let repo = PostRepository::new(db);
        let result = repo.find_by_user(10).await.unwrap();

        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|p| p.user_id == 10));
    }

    #[tokio::test]
    async fn test_count_by_user() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::BigInt(Some(3))
                }]])
                .into_connection(),
        );

        let repo = PostRepository::new(db);
        let count = repo.count_by_user(10).await.unwrap();

        assert_eq!(count, 3);
    }

    #[tokio::test]
    async fn test_find_author() {
        let post = create_test_post(1, 10);
        let author = user::Model {
            id: 10,
            email: "a@x.com".to_string(),
            password: "secret".to_string(),
            is_active: true,
            user_name: "alice".to_string(),
            profile_pic: None,
            bio: None,
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[author.clone()]])
                .into_connection(),
        );

        let repo = PostRepository::new(db);
        let result = repo.find_author(&post).await.unwrap();

        assert_eq!(result, Some(author));
    }

    #[tokio::test]
    async fn test_create_post() {
        let post = create_test_post(1, 10);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[post.clone()]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 1,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = PostRepository::new(db);
        let new = NewPost {
            user_id: 10,
            media: "media/1.png".to_string(),
            caption: None,
        };

        let result = repo.create(new.into()).await.unwrap();
        assert_eq!(result.id, 1);
        assert_eq!(result.user_id, 10);
    }

    #[test]
    fn test_new_post_leaves_id_unset() {
        let model: post::ActiveModel = NewPost {
            user_id: 10,
            media: "img.png".to_string(),
            caption: Some("hello".to_string()),
        }
        .into();

        assert!(model.id.is_not_set());
        assert_eq!(model.user_id, Set(10));
        assert_eq!(model.caption, Set(Some("hello".to_string())));
    }
}
