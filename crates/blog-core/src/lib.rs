//! # Blog Core
//!
//! The domain layer of the posts service.
//! Entities, repository ports and query specifications, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod specification;

pub use error::DomainError;
