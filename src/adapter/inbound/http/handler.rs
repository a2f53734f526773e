//! Request handlers for `/schools` and `/health`.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::{Method, StatusCode};
use axum::Json;
use tracing::debug;

use super::multipart::{read_submission, Submission};
use super::response::ApiError;
use super::router::AppState;
use crate::adapter::outbound::api::dto::{CreateResponse, ListResponse};

pub const CREATED_MESSAGE: &str = "School added successfully";

pub async fn health() -> &'static str {
    "OK"
}

pub async fn list_schools(State(state): State<AppState>) -> Result<Json<ListResponse>, ApiError> {
    let schools = state.registry.list().await.map_err(ApiError::from_list)?;
    Ok(Json(ListResponse {
        success: true,
        schools,
    }))
}

/// A body that is not multipart carries no fields, so it fails the
/// presence check like an empty form would.
pub async fn create_school(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<CreateResponse>), ApiError> {
    let submission = match multipart {
        Ok(mut multipart) => read_submission(&mut multipart, &state.uploads).await?,
        Err(rejection) => {
            debug!(reason = %rejection.body_text(), "Create request without multipart body");
            Submission::default()
        }
    };

    let school_id = state
        .registry
        .create(submission.form, submission.image)
        .await
        .map_err(ApiError::from_create)?;

    Ok((
        StatusCode::CREATED,
        Json(CreateResponse {
            success: true,
            message: CREATED_MESSAGE.to_string(),
            school_id,
        }),
    ))
}

pub async fn method_not_allowed(method: Method) -> ApiError {
    ApiError::MethodNotAllowed(method)
}
