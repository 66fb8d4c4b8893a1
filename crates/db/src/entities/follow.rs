//! Follow entity (directed edge: follower follows followed).

use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "follow")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// The user who is following
    #[sea_orm(indexed)]
    pub follower_id: i32,

    /// The user being followed
    #[sea_orm(indexed)]
    pub followed_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::FollowerId",
        to = "super::user::Column::Id"
    )]
    Follower,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::FollowedId",
        to = "super::user::Column::Id"
    )]
    Followed,
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FollowResponse {
    pub id: i32,
    pub follower_id: i32,
    pub followed_id: i32,
}

impl From<&Model> for FollowResponse {
    fn from(follow: &Model) -> Self {
        Self {
            id: follow.id,
            follower_id: follow.follower_id,
            followed_id: follow.followed_id,
        }
    }
}

impl Model {
    /// Project this follow edge into its flat wire shape.
    #[must_use]
    pub fn serialize(&self) -> FollowResponse {
        FollowResponse::from(self)
    }
}
