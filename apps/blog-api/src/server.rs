//! Server process control: start the HTTP server on a database, stop it again.

use std::net::{SocketAddr, TcpListener};

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpServer, web};
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing_actix_web::TracingLogger;

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppState;

/// Failures while bringing the server up or down.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Server task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// A running blog API server.
///
/// Dropping the value does not stop the server; call [`BlogServer::stop`].
pub struct BlogServer {
    addr: SocketAddr,
    state: AppState,
    handle: ServerHandle,
    task: JoinHandle<std::io::Result<()>>,
}

impl BlogServer {
    /// Start on an ephemeral loopback port, storing posts in `database_url`.
    ///
    /// Returns once the listener is bound and the schema is migrated.
    pub async fn start(database_url: &str) -> Result<Self, StartupError> {
        Self::start_with(AppConfig::for_database(database_url)).await
    }

    /// Start with a full configuration. Without a database the server keeps
    /// posts in memory.
    pub async fn start_with(config: AppConfig) -> Result<Self, StartupError> {
        let state = match &config.database {
            Some(db_config) => AppState::connect(db_config).await?,
            None => {
                tracing::warn!(
                    "DATABASE_URL not set. Running without database (in-memory mode)."
                );
                AppState::in_memory()
            }
        };

        let listener = TcpListener::bind((config.host.as_str(), config.port))?;
        let addr = listener.local_addr()?;

        let app_state = state.clone();
        let server = HttpServer::new(move || {
            App::new()
                .wrap(TracingLogger::default())
                .app_data(web::Data::new(app_state.clone()))
                .configure(handlers::configure_routes)
        })
        .listen(listener)?
        .run();

        let handle = server.handle();
        let task = tokio::spawn(server);
        tracing::info!(%addr, "Blog API listening");

        Ok(Self {
            addr,
            state,
            handle,
            task,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Absolute URL for `path` on this server.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run until the server exits on its own, e.g. after SIGINT.
    pub async fn wait(self) -> Result<(), StartupError> {
        self.task.await??;
        Ok(())
    }

    /// Drain open connections, release the listener and close the pool.
    pub async fn stop(self) -> Result<(), StartupError> {
        tracing::info!(addr = %self.addr, "Stopping blog API");
        self.handle.stop(true).await;
        self.task.await??;

        if let Some(db) = &self.state.db {
            db.close_by_ref().await?;
        }

        tracing::info!("Blog API stopped");
        Ok(())
    }
}
