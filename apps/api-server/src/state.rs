//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::ports::{CommentRepository, PostRepository};
use blog_infra::{DatabaseConfig, InMemoryRepository};
use blog_shared::dto::BlogInfo;

#[cfg(feature = "postgres")]
use anyhow::Context;
#[cfg(feature = "postgres")]
use blog_infra::{PostgresCommentRepository, PostgresPostRepository};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub blog: Arc<BlogInfo>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    ///
    /// A configured database that cannot be reached is an error; only an
    /// unconfigured one falls back to in-memory storage.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let Some(db_config) = config.database.as_ref() else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Ok(Self::in_memory(config.blog.clone()));
        };

        Self::with_database(db_config, config.blog.clone()).await
    }

    #[cfg(feature = "postgres")]
    async fn with_database(db_config: &DatabaseConfig, blog: BlogInfo) -> anyhow::Result<Self> {
        let conn = blog_infra::database::connect(db_config)
            .await
            .context("failed to connect to database")?;

        tracing::info!("Application state initialized (postgres)");
        Ok(Self {
            posts: Arc::new(PostgresPostRepository::new(conn.clone())),
            comments: Arc::new(PostgresCommentRepository::new(conn)),
            blog: Arc::new(blog),
        })
    }

    #[cfg(not(feature = "postgres"))]
    async fn with_database(_db_config: &DatabaseConfig, blog: BlogInfo) -> anyhow::Result<Self> {
        tracing::info!("Running without postgres feature - using in-memory repositories");
        Ok(Self::in_memory(blog))
    }

    /// State backed by a single in-memory store.
    pub fn in_memory(blog: BlogInfo) -> Self {
        let repo = InMemoryRepository::new();
        Self {
            posts: Arc::new(repo.clone()),
            comments: Arc::new(repo),
            blog: Arc::new(blog),
        }
    }
}
