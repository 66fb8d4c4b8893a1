//! User repository.

use std::sync::Arc;

use crate::entities::{Post, User, post, user};
use crate::error::db_err;
use crate::repositories::DeleteSummary;
use crate::repositories::post::delete_post_children;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, NotSet, QueryFilter, QuerySelect, Set, TransactionTrait,
};
use socialgram_common::{AppError, AppResult};
use tracing::{debug, warn};

/// Fields for a new user. The id is assigned by the database.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Unique email address.
    pub email: String,
    /// Stored as given.
    pub password: String,
    /// Unique handle.
    pub user_name: String,
    /// Profile picture URI or path.
    pub profile_pic: Option<String>,
    /// Free-form biography.
    pub bio: Option<String>,
    /// `None` keeps the column default (active).
    pub is_active: Option<bool>,
}

impl From<NewUser> for user::ActiveModel {
    fn from(new: NewUser) -> Self {
        Self {
            id: NotSet,
            email: Set(new.email),
            password: Set(new.password),
            is_active: new.is_active.map_or(NotSet, Set),
            user_name: Set(new.user_name),
            profile_pic: Set(new.profile_pic),
            bio: Set(new.bio),
        }
    }
}

/// User repository for database operations.
#[derive(Clone)]
pub struct UserRepository {
    db: Arc<DatabaseConnection>,
}

impl UserRepository {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a user by ID.
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<user::Model>> {
        User::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(db_err)
    }

    /// Find a user by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i32) -> AppResult<user::Model> {
        self.find_by_id(id)
            .await?
            .ok_or(AppError::UserNotFound(id))
    }

    /// Find a user by email.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<user::Model>> {
        User::find()
            .filter(user::Column::Email.eq(email))
            .one(self.db.as_ref())
            .await
            .map_err(db_err)
    }

    /// Find a user by user name.
    pub async fn find_by_user_name(&self, user_name: &str) -> AppResult<Option<user::Model>> {
        User::find()
            .filter(user::Column::UserName.eq(user_name))
            .one(self.db.as_ref())
            .await
            .map_err(db_err)
    }

    /// Create a new user.
    ///
    /// A taken email or user name fails with
    /// [`AppError::UniqueConstraintViolation`].
    pub async fn create(&self, model: user::ActiveModel) -> AppResult<user::Model> {
        let user = model.insert(self.db.as_ref()).await.map_err(db_err)?;
        debug!(user_id = user.id, "Created user");
        Ok(user)
    }

    /// Update a user.
    ///
    /// Fails with a not-found error when the row no longer exists.
    pub async fn update(&self, model: user::ActiveModel) -> AppResult<user::Model> {
        let id = match &model.id {
            ActiveValue::Set(id) | ActiveValue::Unchanged(id) => Some(*id),
            ActiveValue::NotSet => None,
        };

        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| match (db_err(e), id) {
                (AppError::NotFound(_), Some(id)) => AppError::UserNotFound(id),
                (err, _) => err,
            })
    }

    /// Delete a user together with their posts and everything attached to
    /// those posts.
    ///
    /// Comments, likes and follow edges the user made elsewhere are not
    /// touched. While any exist, the storage engine refuses the final delete
    /// with [`AppError::ForeignKeyViolation`] and the whole operation is
    /// rolled back.
    pub async fn delete(&self, id: i32) -> AppResult<DeleteSummary> {
        let txn = self.db.begin().await.map_err(db_err)?;

        match delete_user_cascade(&txn, id).await {
            Ok(summary) => {
                txn.commit().await.map_err(db_err)?;
                debug!(user_id = id, ?summary, "Deleted user");
                Ok(summary)
            }
            Err(e) => {
                txn.rollback().await.map_err(db_err)?;
                let err = db_err(e);
                warn!(user_id = id, error = %err, "User delete rolled back");
                Err(err)
            }
        }
    }
}

async fn delete_user_cascade<C: ConnectionTrait>(db: &C, id: i32) -> Result<DeleteSummary, DbErr> {
    let post_ids: Vec<i32> = Post::find()
        .select_only()
        .column(post::Column::Id)
        .filter(post::Column::UserId.eq(id))
        .into_tuple()
        .all(db)
        .await?;

    let mut summary = delete_post_children(db, &post_ids).await?;

    if !post_ids.is_empty() {
        summary.posts = Post::delete_many()
            .filter(post::Column::UserId.eq(id))
            .exec(db)
            .await?
            .rows_affected;
    }

    summary.users = User::delete_by_id(id).exec(db).await?.rows_affected;
    Ok(summary)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn create_test_user(id: i32, user_name: &str) -> user::Model {
        user::Model {
            id,
            email: format!("{user_name}@example.com"),
            password: "secret".to_string(),
            is_active: true,
            user_name: user_name.to_string(),
            profile_pic: None,
            bio: None,
        }
    }

    #[tokio::test]
    async fn test_find_by_id_found() {
        let user = create_test_user(1, "alice");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user.clone()]])
                .into_connection(),
        );

        let repo = UserRepository::new(db);
        let result = repo.find_by_id(1).await.unwrap();

        assert!(result.is_some());
        let found = result.unwrap();
        assert_eq!(found.id, 1);
        assert_eq!(found.user_name, "alice");
    }

    #[tokio::test]
    async fn test_find_by_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()])
                .into_connection(),
        );

        let repo = UserRepository::new(db);
        let result = repo.find_by_id(42).await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_get_by_id_not_found_returns_error() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()])
                .into_connection(),
        );

        let repo = UserRepository::new(db);
        let result = repo.get_by_id(42).await;

        match result {
            Err(AppError::UserNotFound(id)) => assert_eq!(id, 42),
            _ => panic!("Expected UserNotFound error"),
        }
    }

    #[tokio::test]
    async fn test_find_by_email() {
        let user = create_test_user(1, "alice");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user.clone()]])
                .into_connection(),
        );

        let repo = UserRepository::new(db);
        let result = repo.find_by_email("alice@example.com").await.unwrap();

        assert_eq!(result.unwrap().email, "alice@example.com");
    }

    #[tokio::test]
    async fn test_find_by_user_name() {
        let user = create_test_user(2, "bob");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user.clone()]])
                .into_connection(),
        );

        let repo = UserRepository::new(db);
        let result = repo.find_by_user_name("bob").await.unwrap();

        assert_eq!(result.unwrap().id, 2);
    }

    #[tokio::test]
    async fn test_create_user() {
        let user = create_test_user(1, "alice");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user.clone()]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 1,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = UserRepository::new(db);
        let new = NewUser {
            email: "alice@example.com".to_string(),
            password: "secret".to_string(),
            user_name: "alice".to_string(),
            profile_pic: None,
            bio: None,
            is_active: None,
        };

        let result = repo.create(new.into()).await.unwrap();
        assert_eq!(result.user_name, "alice");
        assert!(result.is_active);
    }

    #[test]
    fn test_new_user_defers_is_active_to_column_default() {
        let new = NewUser {
            email: "a@x.com".to_string(),
            password: "pw".to_string(),
            user_name: "alice".to_string(),
            profile_pic: None,
            bio: None,
            is_active: None,
        };

        let model: user::ActiveModel = new.clone().into();
        assert!(model.id.is_not_set());
        assert!(model.is_active.is_not_set());

        let model: user::ActiveModel = NewUser {
            is_active: Some(false),
            ..new
        }
        .into();
        assert_eq!(model.is_active, Set(false));
    }
}
