//! Startup seeding of sample posts.

use futures::StreamExt;

use blog_core::domain::{NewPost, Post};
use blog_core::error::RepoError;
use blog_core::ports::PostRepository;

fn sample_posts() -> Vec<NewPost> {
    vec![
        NewPost::new("Building Restful APIs with Actix Web", "test"),
        NewPost::new("Building Restful APIs with Actix Web: part 2", "test"),
    ]
}

/// Replace every stored post with the fixed sample set.
pub async fn seed_posts(posts: &dyn PostRepository) -> Result<Vec<Post>, RepoError> {
    tracing::info!("Initializing sample data...");

    let saved = posts.replace_all(sample_posts()).await?;

    let mut stored = posts.stream_all().await?;
    while let Some(post) = stored.next().await {
        let post = post?;
        tracing::debug!(post_id = %post.id, title = %post.title, "Saved post");
    }

    tracing::info!(count = saved.len(), "Data initialization is done");
    Ok(saved)
}
