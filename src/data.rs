pub use api::{Api, HttpApi};
pub use ids::{CommentId, PostId, UserId};
pub use models::{Comment, Company, Post, User};

/// Client for the remote posts API.
pub mod api;

/// Typed identifiers shared by records and rendered nodes.
pub mod ids;

/// Records returned by the remote posts API.
pub mod models;
