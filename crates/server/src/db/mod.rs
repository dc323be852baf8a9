//! Database operations for the Stockroom `PostgreSQL` store.
//!
//! ## Tables
//!
//! - `products` - Catalog products; the category is a denormalized name
//!   reference with no foreign key
//! - `categories` - Category names
//! - `users` - Accounts with password hashes and a nullable role reference
//! - `roles` - Flat role set
//!
//! The schema ships as `schema.sql` at the repository root and is applied
//! out of band with psql; there is no migration tooling.

pub mod inventory;
pub mod memory;
pub mod store;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use inventory::PgInventoryStore;
pub use memory::{MemoryInventoryStore, MemoryUserStore};
pub use store::{InventoryStore, UserStore};
pub use users::PgUserStore;

/// Errors that can occur during store operations.
///
/// Absence of a row is not an error at this layer; lookups return
/// `Option`/`bool` and the services decide what absence means.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., unique product name).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
