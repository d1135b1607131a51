use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Moderation state of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[default]
    Draft,
    PendingModerated,
    Rejected,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Draft => "DRAFT",
            Status::PendingModerated => "PENDING_MODERATED",
            Status::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRAFT" => Ok(Status::Draft),
            "PENDING_MODERATED" => Ok(Status::PendingModerated),
            "REJECTED" => Ok(Status::Rejected),
            other => Err(DomainError::Validation(format!("Unknown status: {other}"))),
        }
    }
}

/// Post entity - a persisted blog post.
///
/// `id` and `created_at` are assigned by the repository on first insert
/// and never change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub status: Status,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Replace the editable fields, keeping identity and creation time.
    pub fn edit(&mut self, title: String, content: String) {
        self.title = title;
        self.content = content;
    }
}

/// A post that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub status: Status,
}

impl NewPost {
    /// Create a new draft post.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            status: Status::Draft,
        }
    }

    /// Create a new draft post, rejecting blank title or content.
    pub fn validated(title: &str, content: &str) -> Result<Self, DomainError> {
        validate_post_fields(title, content)?;
        Ok(Self::new(title, content))
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Materialize the post with a freshly generated identity.
    pub fn into_post(self, id: Uuid, created_at: DateTime<Utc>) -> Post {
        Post {
            id,
            title: self.title,
            content: self.content,
            status: self.status,
            created_at,
        }
    }
}

/// Title and content must both contain non-whitespace text.
pub fn validate_post_fields(title: &str, content: &str) -> Result<(), DomainError> {
    if title.trim().is_empty() {
        return Err(DomainError::Validation("title must not be blank".to_string()));
    }
    if content.trim().is_empty() {
        return Err(DomainError::Validation(
            "content must not be blank".to_string(),
        ));
    }
    Ok(())
}
