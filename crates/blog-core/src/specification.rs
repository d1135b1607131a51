//! Query specifications for posts.
//!
//! Each specification is plain data: a filter, optionally paired with a
//! mutation. Repositories render them into their own query language, and
//! [`PostFilter::matches`] evaluates them in memory. Building one never
//! touches storage.
//!
//! Text matching is a case-sensitive substring test.

use crate::domain::{Post, Status};

/// A predicate over posts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostFilter {
    /// Matches every post.
    Any,
    /// Title contains the text.
    TitleContains(String),
    /// Title or content contains the text.
    Keyword(String),
    /// Status equals the value.
    StatusIs(Status),
    /// Every inner filter matches.
    All(Vec<PostFilter>),
}

impl PostFilter {
    /// Evaluate the filter against a single post.
    pub fn matches(&self, post: &Post) -> bool {
        match self {
            PostFilter::Any => true,
            PostFilter::TitleContains(text) => post.title.contains(text.as_str()),
            PostFilter::Keyword(text) => {
                post.title.contains(text.as_str()) || post.content.contains(text.as_str())
            }
            PostFilter::StatusIs(status) => post.status == *status,
            PostFilter::All(filters) => filters.iter().all(|f| f.matches(post)),
        }
    }
}

/// A bulk update: set `status` on every post matching `filter`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateSpecification {
    pub filter: PostFilter,
    pub set_status: Status,
}

/// A bulk delete of every post matching `filter`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteSpecification {
    pub filter: PostFilter,
}

/// Posts whose title contains `title`.
pub fn title_like(title: impl Into<String>) -> PostFilter {
    PostFilter::TitleContains(title.into())
}

/// Posts whose title or content contains `q`.
pub fn by_keyword(q: impl Into<String>) -> PostFilter {
    PostFilter::Keyword(q.into())
}

/// Moves every PENDING_MODERATED post to REJECTED.
pub fn reject_all_pending_moderated() -> UpdateSpecification {
    UpdateSpecification {
        filter: PostFilter::StatusIs(Status::PendingModerated),
        set_status: Status::Rejected,
    }
}

/// Selects every REJECTED post for removal.
pub fn remove_all_rejected() -> DeleteSpecification {
    DeleteSpecification {
        filter: PostFilter::StatusIs(Status::Rejected),
    }
}

/// Keyword search narrowed by status. A blank keyword and a missing
/// status each drop their clause; with neither, every post matches.
pub fn filter_by_keyword_and_status(keyword: Option<&str>, status: Option<Status>) -> PostFilter {
    let mut clauses = Vec::new();
    if let Some(q) = keyword.filter(|q| !q.trim().is_empty()) {
        clauses.push(by_keyword(q));
    }
    if let Some(status) = status {
        clauses.push(PostFilter::StatusIs(status));
    }

    match clauses.len() {
        0 => PostFilter::Any,
        1 => clauses.remove(0),
        _ => PostFilter::All(clauses),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewPost;
    use chrono::Utc;
    use uuid::Uuid;

    fn post(title: &str, content: &str, status: Status) -> Post {
        NewPost::new(title, content)
            .with_status(status)
            .into_post(Uuid::new_v4(), Utc::now())
    }

    #[test]
    fn test_title_like_is_case_sensitive_substring() {
        let p = post("test title", "body", Status::Draft);
        assert!(title_like("test").matches(&p));
        assert!(title_like("t ti").matches(&p));
        assert!(!title_like("Test").matches(&p));
        assert!(!title_like("body").matches(&p));
    }

    #[test]
    fn test_by_keyword_checks_title_and_content() {
        let p = post("hello", "world", Status::Draft);
        assert!(by_keyword("hell").matches(&p));
        assert!(by_keyword("orl").matches(&p));
        assert!(!by_keyword("nomatch").matches(&p));
    }

    #[test]
    fn test_fixed_specifications() {
        let spec = reject_all_pending_moderated();
        assert!(spec.filter.matches(&post("a", "b", Status::PendingModerated)));
        assert!(!spec.filter.matches(&post("a", "b", Status::Draft)));
        assert_eq!(spec.set_status, Status::Rejected);

        let spec = remove_all_rejected();
        assert!(spec.filter.matches(&post("a", "b", Status::Rejected)));
        assert!(!spec.filter.matches(&post("a", "b", Status::Draft)));
    }

    #[test]
    fn test_filter_by_keyword_and_status_collapses_clauses() {
        assert_eq!(filter_by_keyword_and_status(None, None), PostFilter::Any);
        assert_eq!(filter_by_keyword_and_status(Some("  "), None), PostFilter::Any);
        assert_eq!(
            filter_by_keyword_and_status(Some("rust"), None),
            PostFilter::Keyword("rust".to_string())
        );

        let both = filter_by_keyword_and_status(Some("rust"), Some(Status::Draft));
        assert!(both.matches(&post("rust intro", "x", Status::Draft)));
        assert!(!both.matches(&post("rust intro", "x", Status::Rejected)));
        assert!(!both.matches(&post("go intro", "x", Status::Draft)));
    }
}
