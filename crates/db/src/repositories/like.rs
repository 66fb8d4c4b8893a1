//! Like repository.

use std::sync::Arc;

use crate::entities::{Like, like};
use crate::error::db_err;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use socialgram_common::{AppError, AppResult};
use tracing::debug;

/// Fields for a new like. The id is assigned by the database.
#[derive(Debug, Clone, Copy)]
pub struct NewLike {
    /// The user who likes.
    pub user_id: i32,
    /// The liked post.
    pub post_id: i32,
}

impl From<NewLike> for like::ActiveModel {
    fn from(new: NewLike) -> Self {
        Self {
            id: NotSet,
            user_id: Set(new.user_id),
            post_id: Set(new.post_id),
        }
    }
}

/// Like repository for database operations.
#[derive(Clone)]
pub struct LikeRepository {
    db: Arc<DatabaseConnection>,
}

impl LikeRepository {
    /// Create a new like repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a like by ID.
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<like::Model>> {
        Like::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(db_err)
    }

    /// Find a like by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i32) -> AppResult<like::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("like {id}")))
    }

    /// Get likes on a post, oldest first.
    pub async fn find_by_post(&self, post_id: i32) -> AppResult<Vec<like::Model>> {
        Like::find()
            .filter(like::Column::PostId.eq(post_id))
            .order_by_asc(like::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(db_err)
    }

    /// Get likes given by a user, oldest first.
    pub async fn find_by_user(&self, user_id: i32) -> AppResult<Vec<like::Model>> {
        Like::find()
            .filter(like::Column::UserId.eq(user_id))
            .order_by_asc(like::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(db_err)
    }

    /// Count likes on a post. Repeated likes by one user each count.
    pub async fn count_by_post(&self, post_id: i32) -> AppResult<u64> {
        Like::find()
            .filter(like::Column::PostId.eq(post_id))
            .count(self.db.as_ref())
            .await
            .map_err(db_err)
    }

    /// Check if a user has liked a post at least once.
    pub async fn has_liked(&self, user_id: i32, post_id: i32) -> AppResult<bool> {
        let count = Like::find()
            .filter(like::Column::UserId.eq(user_id))
            .filter(like::Column::PostId.eq(post_id))
            .count(self.db.as_ref())
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    /// Create a new like.
    pub async fn create(&self, model: like::ActiveModel) -> AppResult<like::Model> {
        let like = model.insert(self.db.as_ref()).await.map_err(db_err)?;
        debug!(like_id = like.id, post_id = like.post_id, user_id = like.user_id, "Created like");
        Ok(like)
    }

    /// Delete a like.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        Like::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
