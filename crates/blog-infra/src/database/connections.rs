use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

/// Configuration for the posts database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl DatabaseConfig {
    /// Configuration with a small pool, suitable for tests and tools.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            min_connections: 1,
        }
    }

    pub fn is_sqlite(&self) -> bool {
        self.url.starts_with("sqlite:")
    }

    pub fn is_in_memory(&self) -> bool {
        self.is_sqlite() && self.url.contains(":memory:")
    }

    /// Every connection to an in-memory SQLite database opens a fresh, empty
    /// database, so such URLs must be served by exactly one connection.
    pub fn pool_size(&self) -> u32 {
        if self.is_in_memory() {
            1
        } else {
            self.max_connections
        }
    }
}

/// Open a connection pool for the configured database.
pub async fn connect(config: &DatabaseConfig) -> Result<DbConn, DbErr> {
    tracing::info!(sqlite = config.is_sqlite(), "Connecting to database...");

    let mut opts = ConnectOptions::new(config.url.clone());
    opts.connect_timeout(Duration::from_secs(10))
        .sqlx_logging(true);

    opts.max_connections(config.pool_size());
    if config.is_in_memory() {
        opts.min_connections(1);
    } else {
        opts.min_connections(config.min_connections)
            .idle_timeout(Duration::from_secs(300));
    }

    let conn = Database::connect(opts).await?;
    tracing::info!(pool = config.pool_size(), "Database connected");

    Ok(conn)
}
