//! # Blog API
//!
//! actix-web server exposing the `/posts` resource, plus the process control
//! used by `main` and the integration suite.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod server;
pub mod state;
pub mod telemetry;

pub use config::AppConfig;
pub use server::{BlogServer, StartupError};
pub use state::AppState;
