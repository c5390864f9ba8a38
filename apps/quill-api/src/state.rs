//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::error::RepoError;
use quill_core::ports::PostRepository;
use quill_infra::database::{DatabaseConfig, InMemoryPostRepository};

#[cfg(feature = "postgres")]
use migration::{Migrator, MigratorTrait};
#[cfg(feature = "postgres")]
use quill_infra::database::{DatabaseConnections, PostgresPostRepository};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    ///
    /// Without a database configuration the in-memory store is used. A configured
    /// database is migrated before use; one that cannot be reached is an error.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Result<Self, RepoError> {
        #[cfg(feature = "postgres")]
        let state = match db_config {
            Some(config) => {
                let connections = DatabaseConnections::init(config)
                    .await
                    .map_err(|e| RepoError::Connection(e.to_string()))?;
                Migrator::up(&connections.main, None)
                    .await
                    .map_err(|e| RepoError::Query(format!("migration failed: {e}")))?;
                tracing::info!("Database schema is up to date");

                Self::with_repository(Arc::new(PostgresPostRepository::new(connections.main)))
            }
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::in_memory()
            }
        };

        #[cfg(not(feature = "postgres"))]
        let state = {
            if db_config.is_some() {
                tracing::warn!("Built without postgres feature - ignoring DATABASE_URL");
            }
            tracing::info!("Running without postgres feature - using in-memory repository");
            Self::in_memory()
        };

        tracing::info!("Application state initialized");

        Ok(state)
    }

    /// State over a fresh, empty in-memory store.
    pub fn in_memory() -> Self {
        Self::with_repository(Arc::new(InMemoryPostRepository::new()))
    }

    /// State over an existing repository.
    pub fn with_repository(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }
}
