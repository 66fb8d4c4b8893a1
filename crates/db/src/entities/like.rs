//! Like entity.
//!
//! One row per like edge. Nothing stops the same user liking the same post
//! twice at this layer.

use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "like")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// The user who liked
    #[sea_orm(indexed)]
    pub user_id: i32,

    /// The post being liked
    #[sea_orm(indexed)]
    pub post_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,

    #[sea_orm(
        belongs_to = "super::post::Entity",
        from = "Column::PostId",
        to = "super::post::Column::Id"
    )]
    Post,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LikeResponse {
    pub id: i32,
    pub user_id: i32,
    pub post_id: i32,
}

impl From<&Model> for LikeResponse {
    fn from(like: &Model) -> Self {
        Self {
            id: like.id,
            user_id: like.user_id,
            post_id: like.post_id,
        }
    }
}

impl Model {
    /// Project this like into its flat wire shape.
    #[must_use]
    pub fn serialize(&self) -> LikeResponse {
        LikeResponse::from(self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize() {
        let like = Model {
            id: 8,
            user_id: 2,
            post_id: 3,
        };

        let json = serde_json::to_value(like.serialize()).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "id": 8, "user_id": 2, "post_id": 3 })
        );
    }
}
