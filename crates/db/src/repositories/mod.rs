//! Repositories, one per entity.
//!
//! Every relationship between records is reached through an explicit query
//! here; entities never load each other implicitly.

pub mod comment;
pub mod follow;
pub mod like;
pub mod post;
pub mod user;

use std::sync::Arc;

use sea_orm::DatabaseConnection;

pub use comment::{CommentRepository, NewComment};
pub use follow::{FollowRepository, NewFollow};
pub use like::{LikeRepository, NewLike};
pub use post::{NewPost, PostRepository};
pub use user::{NewUser, UserRepository};

/// Rows removed by a cascading delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteSummary {
    /// Users removed (0 or 1).
    pub users: u64,
    /// Posts removed.
    pub posts: u64,
    /// Comments removed along with their posts.
    pub comments: u64,
    /// Likes removed along with their posts.
    pub likes: u64,
}

/// All repositories over one shared connection.
#[derive(Clone)]
pub struct Repositories {
    /// Users.
    pub users: UserRepository,
    /// Posts.
    pub posts: PostRepository,
    /// Comments.
    pub comments: CommentRepository,
    /// Likes.
    pub likes: LikeRepository,
    /// Follow edges.
    pub follows: FollowRepository,
}

impl Repositories {
    /// Build every repository on top of `db`.
    #[must_use]
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            users: UserRepository::new(db.clone()),
            posts: PostRepository::new(db.clone()),
            comments: CommentRepository::new(db.clone()),
            likes: LikeRepository::new(db.clone()),
            follows: FollowRepository::new(db),
        }
    }
}
