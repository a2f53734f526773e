//! Route table and middleware stack.

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::handler;
use crate::domain::UploadPolicy;
use crate::port::inbound::registry::SchoolRegistry;

/// Room left in the request body for the text fields and multipart framing.
const FORM_OVERHEAD_BYTES: u64 = 1024 * 1024;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<dyn SchoolRegistry>,
    pub uploads: UploadPolicy,
}

/// Router settings that are not handler state.
#[derive(Debug, Clone)]
pub struct RouterOptions {
    pub upload_dir: PathBuf,
    /// URL prefix the upload directory is served under, e.g. `/schoolImages`.
    pub public_path: String,
    pub cors: bool,
}

pub fn build_router(state: AppState, options: &RouterOptions) -> Router {
    let body_limit = usize::try_from(state.uploads.max_bytes.saturating_add(FORM_OVERHEAD_BYTES))
        .unwrap_or(usize::MAX);

    let mut router = Router::new()
        .route("/health", get(handler::health))
        .route(
            "/schools",
            get(handler::list_schools)
                .post(handler::create_school)
                .fallback(handler::method_not_allowed),
        )
        .nest_service(&options.public_path, ServeDir::new(&options.upload_dir))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state);

    router = router.layer(TraceLayer::new_for_http());

    if options.cors {
        router = router.layer(CorsLayer::permissive());
    }

    router
}
