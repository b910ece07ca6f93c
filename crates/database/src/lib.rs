//! Reading Journey storage layer
//!
//! A single SQLite file holding the `books` table, accessed through
//! [`BookStore`]. Queries go through sqlx on the tokio runtime.

pub mod connection;
mod error;
pub mod queries;
pub mod schema;
pub mod seed;
pub mod store;

pub use connection::{DatabaseConfig, DbPool};
pub use schema::{verify_integrity, InitReport};
pub use seed::SAMPLE_BOOKS;
pub use store::BookStore;
