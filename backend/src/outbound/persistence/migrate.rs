//! Embedded schema migrations.
//!
//! Migrations are compiled into the binary and applied once at startup,
//! before the listener binds, so a schema mismatch keeps the process from
//! accepting traffic. `diesel-async`'s blocking wrapper is used on a
//! dedicated blocking task because the migration harness is synchronous.

use diesel::Connection;
use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_async::AsyncPgConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::info;

/// All migrations shipped with this binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Errors raised while applying migrations.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// Could not connect to the database.
    #[error("database connection for migrations failed: {message}")]
    Connection { message: String },
    /// A migration failed to apply.
    #[error("running pending migrations failed: {message}")]
    Execution { message: String },
}

/// Apply any pending migrations against the configured database.
pub async fn run_pending_migrations(database_url: String) -> Result<(), MigrationError> {
    tokio::task::spawn_blocking(move || {
        let mut conn: AsyncConnectionWrapper<AsyncPgConnection> =
            AsyncConnectionWrapper::establish(&database_url).map_err(|err| {
                MigrationError::Connection {
                    message: err.to_string(),
                }
            })?;

        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|err| MigrationError::Execution {
                message: err.to_string(),
            })?;
        info!(count = applied.len(), "applied pending migrations");
        Ok(())
    })
    .await
    .map_err(|err| MigrationError::Execution {
        message: err.to_string(),
    })?
}
