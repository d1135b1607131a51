use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Shortest accepted comment body, in characters.
pub const COMMENT_MIN_LEN: usize = 5;
/// Longest accepted comment body, in characters.
pub const COMMENT_MAX_LEN: usize = 200;

/// Comment entity - owned by exactly one post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    /// Back-reference to the owning post. Never serialized outward.
    #[serde(skip_serializing, default)]
    pub post_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A comment that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub post_id: Uuid,
    pub content: String,
}

impl NewComment {
    /// Create a comment for `post_id`, enforcing the content length bounds.
    pub fn validated(post_id: Uuid, content: &str) -> Result<Self, DomainError> {
        if content.trim().is_empty() {
            return Err(DomainError::Validation(
                "content must not be blank".to_string(),
            ));
        }
        let len = content.chars().count();
        if !(COMMENT_MIN_LEN..=COMMENT_MAX_LEN).contains(&len) {
            return Err(DomainError::Validation(format!(
                "content must be between {COMMENT_MIN_LEN} and {COMMENT_MAX_LEN} characters"
            )));
        }
        Ok(Self {
            post_id,
            content: content.to_string(),
        })
    }

    pub fn into_comment(self, id: Uuid, created_at: DateTime<Utc>) -> Comment {
        Comment {
            id,
            post_id: self.post_id,
            content: self.content,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_length_bounds() {
        let post_id = Uuid::new_v4();
        assert!(NewComment::validated(post_id, "abcd").is_err());
        assert!(NewComment::validated(post_id, "abcde").is_ok());
        assert!(NewComment::validated(post_id, &"x".repeat(200)).is_ok());
        assert!(NewComment::validated(post_id, &"x".repeat(201)).is_err());
        assert!(NewComment::validated(post_id, "      ").is_err());
    }

    #[test]
    fn test_post_id_is_not_serialized() {
        let comment = NewComment::validated(Uuid::new_v4(), "a fine comment")
            .unwrap()
            .into_comment(Uuid::new_v4(), Utc::now());
        let json = serde_json::to_value(&comment).unwrap();
        assert!(json.get("post_id").is_none());
        assert_eq!(json["content"], "a fine comment");
    }
}
