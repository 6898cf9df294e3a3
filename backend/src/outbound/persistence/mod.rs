//! PostgreSQL persistence adapters implementing the driven ports.

mod diesel_basic_error_mapping;
mod diesel_login_service;
mod diesel_presence_repository;
mod diesel_user_repository;
mod models;
mod pool;
pub mod schema;

pub use diesel_login_service::DieselLoginService;
pub use diesel_presence_repository::DieselPresenceRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};

use diesel::Connection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

/// Schema migrations embedded at compile time from `migrations/`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Errors raised while applying schema migrations at startup.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// Could not open the migration connection.
    #[error("failed to connect for migrations: {0}")]
    Connection(#[from] diesel::ConnectionError),
    /// A migration failed to apply.
    #[error("failed to run migrations: {0}")]
    Migration(String),
}

/// Apply any pending migrations over a short-lived synchronous connection.
///
/// Runs before the server accepts traffic; callers on an async runtime
/// should wrap this in `spawn_blocking`.
pub fn run_pending_migrations(database_url: &str) -> Result<(), MigrationError> {
    let mut conn = diesel::PgConnection::establish(database_url)?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Migration(err.to_string()))?;
    Ok(())
}
