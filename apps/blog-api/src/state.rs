//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::ports::PostRepository;
use blog_infra::database::{self, DatabaseConfig};
use blog_infra::{InMemoryPostRepository, SqlPostRepository};
use migration::{Migrator, MigratorTrait};
use sea_orm::DbConn;

use crate::server::StartupError;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    /// Pool shared with the SQL repository, closed on shutdown.
    pub db: Option<Arc<DbConn>>,
}

impl AppState {
    /// Connect to the configured database and bring its schema up to date.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StartupError> {
        let db = Arc::new(database::connect(config).await?);
        Migrator::up(db.as_ref(), None).await?;
        tracing::info!("Database schema up to date");

        Ok(Self {
            posts: Arc::new(SqlPostRepository::new(Arc::clone(&db))),
            db: Some(db),
        })
    }

    /// State backed by process memory only.
    pub fn in_memory() -> Self {
        tracing::info!("Using in-memory post repository");
        Self::with_repository(Arc::new(InMemoryPostRepository::new()))
    }

    pub fn with_repository(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts, db: None }
    }
}
