//! Database connection management using Diesel ORM.
//!
//! Provides connection pooling, migration support, and connection
//! configuration for SQLite databases.

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use crate::error::{Error, Result};

/// Embedded database migrations compiled from the migrations/ directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Type alias for a SQLite connection pool.
pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// Applies per-connection pragmas as the pool hands connections out.
#[derive(Debug, Clone, Copy)]
struct SqlitePragmas {
    busy_timeout_ms: u32,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> std::result::Result<(), diesel::r2d2::Error> {
        configure_sqlite_connection(conn, self.busy_timeout_ms)
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Create a connection pool for the given database URL.
///
/// Every `:memory:` connection is a separate database, so an in-memory URL
/// always gets a single-connection pool.
///
/// # Errors
/// Returns an error if the pool cannot be created.
pub fn create_pool(database_url: &str, max_size: u32, busy_timeout_ms: u32) -> Result<DbPool> {
    let max_size = if database_url.contains(":memory:") {
        1
    } else {
        max_size.max(1)
    };

    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .max_size(max_size)
        .connection_customizer(Box::new(SqlitePragmas { busy_timeout_ms }))
        .build(manager)
        .map_err(|e| Error::Connection(e.to_string()))
}

/// Run all pending database migrations.
///
/// # Errors
/// Returns an error if migrations fail.
pub fn run_migrations(pool: &DbPool) -> Result<()> {
    let mut conn = pool.get().map_err(|e| Error::Connection(e.to_string()))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| Error::Database(e.to_string()))?;
    Ok(())
}

/// Configure SQLite connection pragmas used for concurrent writes.
///
/// # Errors
/// Returns an error if a pragma fails to apply.
pub fn configure_sqlite_connection(
    conn: &mut SqliteConnection,
    busy_timeout_ms: u32,
) -> std::result::Result<(), diesel::result::Error> {
    conn.batch_execute(&format!("PRAGMA busy_timeout = {busy_timeout_ms};"))
}
