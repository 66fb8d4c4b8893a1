//! Comment entity.

use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "comment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// The post being commented on
    #[sea_orm(indexed)]
    pub post_id: i32,

    /// The user who wrote the comment
    #[sea_orm(indexed)]
    pub user_id: i32,

    /// At most 300 characters; the bound is enforced only on PostgreSQL.
    pub text: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::post::Entity",
        from = "Column::PostId",
        to = "super::post::Column::Id"
    )]
    Post,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Public projection of a comment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CommentResponse {
    pub id: i32,
    pub post_id: i32,
    pub user_id: i32,
    pub text: String,
}

impl From<&Model> for CommentResponse {
    fn from(comment: &Model) -> Self {
        Self {
            id: comment.id,
            post_id: comment.post_id,
            user_id: comment.user_id,
            text: comment.text.clone(),
        }
    }
}

impl Model {
    /// Project this comment into its flat wire shape.
    #[must_use]
    pub fn serialize(&self) -> CommentResponse {
        CommentResponse::from(self)
    }
}
