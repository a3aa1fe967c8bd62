//! # Blog API Server
//!
//! The main entry point for the Actix-web HTTP server.

use blog_api::telemetry::{TelemetryConfig, init_telemetry};
use blog_api::{AppConfig, BlogServer, StartupError};

#[actix_web::main]
async fn main() -> Result<(), StartupError> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();
    tracing::info!("Starting blog API server on {}:{}", config.host, config.port);

    let server = BlogServer::start_with(config).await?;
    server.wait().await
}
