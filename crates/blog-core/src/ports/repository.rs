use async_trait::async_trait;
use futures::stream::BoxStream;
use uuid::Uuid;

use crate::domain::{Comment, NewComment, NewPost, Post};
use crate::error::RepoError;
use crate::specification::{DeleteSpecification, PostFilter, UpdateSpecification};

/// Lazily consumed stream of posts, pulled from storage as it is polled.
pub type PostStream<'a> = BoxStream<'a, Result<Post, RepoError>>;

/// Post repository.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Every post, unfiltered.
    async fn find_all(&self) -> Result<Vec<Post>, RepoError>;

    /// Every post, as an async stream.
    async fn stream_all<'a>(&'a self) -> Result<PostStream<'a>, RepoError>;

    /// Find a post by its id. A missing id is `Ok(None)`.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// Insert a post, assigning its id and creation time.
    async fn save(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Insert several posts in one transaction.
    async fn save_all(&self, posts: Vec<NewPost>) -> Result<Vec<Post>, RepoError>;

    /// Overwrite title, content and status of an existing post.
    async fn update(&self, post: Post) -> Result<Option<Post>, RepoError>;

    /// Delete a post and its comments. Returns whether a row was removed.
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, RepoError>;

    /// Delete every post, returning the number removed.
    async fn delete_all(&self) -> Result<u64, RepoError>;

    /// Posts matching `filter`, newest first.
    async fn find_all_matching(&self, filter: &PostFilter) -> Result<Vec<Post>, RepoError>;

    /// Apply `spec` to every matching post, returning the affected count.
    async fn update_all(&self, spec: &UpdateSpecification) -> Result<u64, RepoError>;

    /// Delete every post matching `spec`, returning the affected count.
    async fn delete_all_matching(&self, spec: &DeleteSpecification) -> Result<u64, RepoError>;

    /// Delete every post and insert `posts`, atomically.
    async fn replace_all(&self, posts: Vec<NewPost>) -> Result<Vec<Post>, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Comments of one post, oldest first.
    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError>;

    /// Insert a comment, assigning its id and creation time.
    async fn save(&self, comment: NewComment) -> Result<Comment, RepoError>;
}
