//! User entity.

use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// At most 120 characters; the bound is enforced only on PostgreSQL.
    #[sea_orm(unique)]
    pub email: String,

    /// Stored exactly as supplied by the caller. Never serialized.
    pub password: String,

    #[sea_orm(default_value = true)]
    pub is_active: bool,

    #[sea_orm(unique)]
    pub user_name: String,

    /// Profile picture URI or path
    #[sea_orm(nullable)]
    pub profile_pic: Option<String>,

    #[sea_orm(nullable)]
    pub bio: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Posts,

    #[sea_orm(has_many = "super::comment::Entity")]
    Comments,

    #[sea_orm(has_many = "super::like::Entity")]
    Likes,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Posts.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl Related<super::like::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Likes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Public projection of a user. The password and the active flag are not
/// part of it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub user_name: String,
    pub profile_pic: Option<String>,
    pub bio: Option<String>,
}

impl From<&Model> for UserResponse {
    fn from(user: &Model) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            user_name: user.user_name.clone(),
            profile_pic: user.profile_pic.clone(),
            bio: user.bio.clone(),
        }
    }
}

impl Model {
    /// Project this user into its flat wire shape.
    #[must_use]
    pub fn serialize(&self) -> UserResponse {
        UserResponse::from(self)
    }
}
