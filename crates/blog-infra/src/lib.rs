//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`.
//!
//! - [`database`] - SQL storage via SeaORM (PostgreSQL or SQLite)
//! - [`memory`] - in-memory storage, used when no database is configured

pub mod database;
pub mod memory;

pub use database::{DatabaseConfig, SqlPostRepository};
pub use memory::InMemoryPostRepository;
