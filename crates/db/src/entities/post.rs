//! Post entity.

use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "post")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Author user ID
    #[sea_orm(indexed)]
    pub user_id: i32,

    /// Media URI or path
    pub media: String,

    #[sea_orm(nullable)]
    pub caption: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    Author,

    #[sea_orm(has_many = "super::comment::Entity")]
    Comments,

    #[sea_orm(has_many = "super::like::Entity")]
    Likes,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
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

/// Public projection of a post. The owner is exposed as `author_id`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PostResponse {
    pub id: i32,
    pub media: String,
    pub caption: Option<String>,
    pub author_id: i32,
}

impl From<&Model> for PostResponse {
    fn from(post: &Model) -> Self {
        Self {
            id: post.id,
            media: post.media.clone(),
            caption: post.caption.clone(),
            author_id: post.user_id,
        }
    }
}

impl Model {
    /// Project this post into its flat wire shape.
    #[must_use]
    pub fn serialize(&self) -> PostResponse {
        PostResponse::from(self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_without_caption() {
        let post = Model {
            id: 3,
            user_id: 1,
            media: "img.png".to_string(),
            caption: None,
        };

        let json = serde_json::to_value(post.serialize()).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "id": 3,
                "media": "img.png",
                "caption": null,
                "author_id": 1,
            })
        );
    }

    #[test]
    fn test_serialize_exposes_author_id_not_user_id() {
        let post = Model {
            id: 3,
            user_id: 9,
            media: "img.png".to_string(),
            caption: Some("sunset".to_string()),
        };

        let json = serde_json::to_value(post.serialize()).unwrap();
        let obj = json.as_object().unwrap();

        assert!(!obj.contains_key("user_id"));
        assert_eq!(obj["author_id"], 9);
        assert_eq!(obj["caption"], "sunset");
        assert_eq!(obj.len(), 4);
    }
}
