//! Follow repository.

use std::sync::Arc;

use crate::entities::{Follow, follow};
use crate::error::db_err;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use socialgram_common::{AppError, AppResult};
use tracing::debug;

/// Fields for a new follow edge. The id is assigned by the database.
#[derive(Debug, Clone, Copy)]
pub struct NewFollow {
    /// The user who follows.
    pub follower_id: i32,
    /// The user being followed.
    pub followed_id: i32,
}

impl From<NewFollow> for follow::ActiveModel {
    fn from(new: NewFollow) -> Self {
        Self {
            id: NotSet,
            follower_id: Set(new.follower_id),
            followed_id: Set(new.followed_id),
        }
    }
}

/// Follow repository for database operations.
#[derive(Clone)]
pub struct FollowRepository {
    db: Arc<DatabaseConnection>,
}

impl FollowRepository {
    /// Create a new follow repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a follow edge by ID.
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<follow::Model>> {
        Follow::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(db_err)
    }

    /// Find a follow edge by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i32) -> AppResult<follow::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("follow {id}")))
    }

    /// Check if a user is following another user.
    pub async fn is_following(&self, follower_id: i32, followed_id: i32) -> AppResult<bool> {
        let count = Follow::find()
            .filter(follow::Column::FollowerId.eq(follower_id))
            .filter(follow::Column::FollowedId.eq(followed_id))
            .count(self.db.as_ref())
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    /// Get the edges pointing at a user (their followers), oldest first.
    pub async fn find_followers(&self, user_id: i32) -> AppResult<Vec<follow::Model>> {
        Follow::find()
            .filter(follow::Column::FollowedId.eq(user_id))
            .order_by_asc(follow::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(db_err)
    }

    /// Get the edges leaving a user (who they follow), oldest first.
    pub async fn find_following(&self, user_id: i32) -> AppResult<Vec<follow::Model>> {
        Follow::find()
            .filter(follow::Column::FollowerId.eq(user_id))
            .order_by_asc(follow::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(db_err)
    }

    /// Count followers of a user.
    pub async fn count_followers(&self, user_id: i32) -> AppResult<u64> {
        Follow::find()
            .filter(follow::Column::FollowedId.eq(user_id))
            .count(self.db.as_ref())
            .await
            .map_err(db_err)
    }

    /// Count users a user is following.
    pub async fn count_following(&self, user_id: i32) -> AppResult<u64> {
        Follow::find()
            .filter(follow::Column::FollowerId.eq(user_id))
            .count(self.db.as_ref())
            .await
            .map_err(db_err)
    }

    /// Create a new follow edge.
    pub async fn create(&self, model: follow::ActiveModel) -> AppResult<follow::Model> {
        let follow = model.insert(self.db.as_ref()).await.map_err(db_err)?;
        debug!(
            follow_id = follow.id,
            follower_id = follow.follower_id,
            followed_id = follow.followed_id,
            "Created follow"
        );
        Ok(follow)
    }

    /// Delete a follow edge.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        Follow::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
