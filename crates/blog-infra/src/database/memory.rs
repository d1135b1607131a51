//! In-memory repositories - used when no database is configured, and in tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use futures::StreamExt;
use tokio::sync::RwLock;
use uuid::Uuid;

use blog_core::domain::{Comment, NewComment, NewPost, Post};
use blog_core::error::RepoError;
use blog_core::ports::{CommentRepository, PostRepository, PostStream};
use blog_core::specification::{DeleteSpecification, PostFilter, UpdateSpecification};

#[derive(Default)]
struct Store {
    /// Posts in insertion order.
    posts: Vec<Post>,
    comments: Vec<Comment>,
}

impl Store {
    fn insert(&mut self, post: NewPost) -> Post {
        tracing::debug!(title = %post.title, "Persisting post");
        let post = post.into_post(Uuid::new_v4(), Utc::now());
        self.posts.push(post.clone());
        post
    }

    /// Remove posts matching `keep == false`, cascading to their comments.
    fn retain_posts(&mut self, mut keep: impl FnMut(&Post) -> bool) -> u64 {
        let mut removed = Vec::new();
        self.posts.retain(|p| {
            let kept = keep(p);
            if !kept {
                removed.push(p.id);
            }
            kept
        });
        self.comments.retain(|c| !removed.contains(&c.post_id));
        removed.len() as u64
    }
}

/// Posts and comments held in a `tokio::sync::RwLock`.
///
/// Implements both repository ports over the same store so that comment
/// ownership and cascading deletes behave as they do in PostgreSQL.
/// Cloning shares the store. Data is lost on process restart.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for InMemoryRepository {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.store.read().await.posts.clone())
    }

    async fn stream_all<'a>(&'a self) -> Result<PostStream<'a>, RepoError> {
        let posts = self.find_all().await?;
        Ok(futures::stream::iter(posts.into_iter().map(Ok)).boxed())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn save(&self, post: NewPost) -> Result<Post, RepoError> {
        Ok(self.store.write().await.insert(post))
    }

    async fn save_all(&self, posts: Vec<NewPost>) -> Result<Vec<Post>, RepoError> {
        let mut store = self.store.write().await;
        Ok(posts.into_iter().map(|p| store.insert(p)).collect())
    }

    async fn update(&self, post: Post) -> Result<Option<Post>, RepoError> {
        let mut store = self.store.write().await;
        let Some(existing) = store.posts.iter_mut().find(|p| p.id == post.id) else {
            return Ok(None);
        };

        existing.title = post.title;
        existing.content = post.content;
        existing.status = post.status;
        Ok(Some(existing.clone()))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, RepoError> {
        tracing::debug!(post_id = %id, "Removing post");
        let removed = self.store.write().await.retain_posts(|p| p.id != id);
        Ok(removed > 0)
    }

    async fn delete_all(&self) -> Result<u64, RepoError> {
        let removed = self.store.write().await.retain_posts(|_| false);
        tracing::debug!(deleted = removed, "Removed all posts");
        Ok(removed)
    }

    async fn find_all_matching(&self, filter: &PostFilter) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;
        let mut matched: Vec<Post> = store
            .posts
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matched)
    }

    async fn update_all(&self, spec: &UpdateSpecification) -> Result<u64, RepoError> {
        let mut store = self.store.write().await;
        let mut updated = 0;
        for post in store.posts.iter_mut().filter(|p| spec.filter.matches(p)) {
            post.status = spec.set_status;
            updated += 1;
        }
        Ok(updated)
    }

    async fn delete_all_matching(&self, spec: &DeleteSpecification) -> Result<u64, RepoError> {
        let removed = self
            .store
            .write()
            .await
            .retain_posts(|p| !spec.filter.matches(p));
        tracing::debug!(deleted = removed, "Bulk post delete");
        Ok(removed)
    }

    async fn replace_all(&self, posts: Vec<NewPost>) -> Result<Vec<Post>, RepoError> {
        let mut store = self.store.write().await;
        let removed = store.retain_posts(|_| false);
        tracing::debug!(deleted = removed, "Removed all posts");
        Ok(posts.into_iter().map(|p| store.insert(p)).collect())
    }
}

#[async_trait]
impl CommentRepository for InMemoryRepository {
    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let store = self.store.read().await;
        Ok(store
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn save(&self, comment: NewComment) -> Result<Comment, RepoError> {
        let mut store = self.store.write().await;
        if !store.posts.iter().any(|p| p.id == comment.post_id) {
            return Err(RepoError::NotFound);
        }

        tracing::debug!(post_id = %comment.post_id, "Persisting comment");
        let comment = comment.into_comment(Uuid::new_v4(), Utc::now());
        store.comments.push(comment.clone());
        Ok(comment)
    }
}
