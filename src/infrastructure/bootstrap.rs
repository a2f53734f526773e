//! Composition root: configuration in, running pieces out.

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use tracing::info;

use crate::adapter::inbound::http::router::{build_router, AppState, RouterOptions};
use crate::adapter::inbound::http::server::{serve, shutdown_signal};
use crate::adapter::outbound::disk::DiskImageStore;
use crate::adapter::outbound::sqlite::database::connection::{create_pool, run_migrations, DbPool};
use crate::adapter::outbound::sqlite::SqliteSchoolStore;
use crate::application::SchoolService;
use crate::error::Result;
use crate::infrastructure::config::database::DatabaseConfig;
use crate::infrastructure::config::settings::Config;

/// Open the pool and apply pending migrations.
///
/// Creates the database file's parent directory when needed.
///
/// # Errors
/// Returns an error if the directory, pool, or migrations fail.
pub fn open_database(config: &DatabaseConfig) -> Result<DbPool> {
    let url = config.connection_url();
    if !url.contains(":memory:") && !url.starts_with("file:") {
        if let Some(parent) = Path::new(url).parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
    }

    let pool = create_pool(url, config.max_connections, config.busy_timeout_ms)?;
    run_migrations(&pool)?;
    info!(database = %url, "Database ready");
    Ok(pool)
}

/// Wire the SQLite store and the upload directory into a service.
///
/// # Errors
/// Returns an error if the database cannot be opened.
pub fn build_service(config: &Config) -> Result<SchoolService> {
    let store = SqliteSchoolStore::new(open_database(&config.database)?);
    let images = DiskImageStore::new(&config.uploads.dir, config.uploads.policy());
    Ok(SchoolService::new(Arc::new(store), Arc::new(images)))
}

/// Build the HTTP router for `config`.
///
/// # Errors
/// Returns an error if the database cannot be opened.
pub fn build_app(config: &Config) -> Result<Router> {
    let state = AppState {
        registry: Arc::new(build_service(config)?),
        uploads: config.uploads.policy(),
    };
    let options = RouterOptions {
        upload_dir: config.uploads.dir.clone(),
        public_path: config.uploads.public_path.clone(),
        cors: config.server.cors,
    };
    Ok(build_router(state, &options))
}

/// Run the server until Ctrl+C or SIGTERM.
///
/// # Errors
/// Returns an error if wiring or binding fails.
pub async fn run_server(config: &Config) -> Result<()> {
    let router = build_app(config)?;
    std::fs::create_dir_all(&config.uploads.dir)?;
    let addr = config.server.socket_addr()?;
    info!(
        uploads = %config.uploads.dir.display(),
        public_path = %config.uploads.public_path,
        "Serving school directory"
    );
    serve(addr, router, shutdown_signal()).await
}
