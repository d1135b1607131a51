//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL repositories via SeaORM
//!
//! Without `postgres` only the in-memory repositories are available.

pub mod database;

pub use database::{DatabaseConfig, InMemoryRepository};

#[cfg(feature = "postgres")]
pub use database::{PostgresCommentRepository, PostgresPostRepository};
