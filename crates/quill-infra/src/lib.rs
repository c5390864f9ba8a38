//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//! This crate contains the database adapters and the fixture generator.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL database support via SeaORM

pub mod database;
pub mod fixtures;

pub use database::{DatabaseConfig, InMemoryPostRepository};
pub use fixtures::{PostGenerator, seed_posts};

#[cfg(feature = "postgres")]
pub use database::{DatabaseConnections, PostgresPostRepository};
