//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to create a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostCommand {
    pub title: String,
    pub content: String,
}

/// Request to replace a post's title and content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePostCommand {
    pub title: String,
    pub content: String,
}

/// Request to add a comment to a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommentCommand {
    pub content: String,
}

/// Optional filters for `GET /posts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostQuery {
    pub q: Option<String>,
    pub status: Option<String>,
}

/// A post as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetails {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// A comment as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDetails {
    pub id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Descriptive properties of the blog, served by `GET /info`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogInfo {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}
