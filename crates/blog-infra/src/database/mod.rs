//! Database connection management and SQL repositories.

mod connections;
mod sql_base;
pub mod sql_repo;

pub mod entity;

pub use connections::{DatabaseConfig, connect};
pub use sql_base::SqlBaseRepository;
pub use sql_repo::SqlPostRepository;
