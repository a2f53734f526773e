//! Mapping of errors onto HTTP responses.

use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use crate::adapter::outbound::api::dto::ErrorBody;
use crate::domain::{Field, UploadError, ValidationError};
use crate::error::Error;

pub const CREATE_FAILED: &str = "Failed to add school";
pub const LIST_FAILED: &str = "Failed to fetch schools";

/// Value of the `Allow` header on `/schools`.
pub const ALLOWED_METHODS: &str = "GET, POST";

/// Error returned by a request handler.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("{0}")]
    BadRequest(String),

    #[error("Method {0} not allowed")]
    MethodNotAllowed(Method),

    #[error("{message}: {details}")]
    Internal {
        message: &'static str,
        details: String,
    },
}

impl ApiError {
    /// Classify a create failure: user errors stay 400, the rest are 500.
    pub fn from_create(err: Error) -> Self {
        match err {
            Error::Validation(e) => Self::Validation(e),
            Error::Upload(e) => Self::Upload(e),
            other => Self::Internal {
                message: CREATE_FAILED,
                details: other.to_string(),
            },
        }
    }

    pub fn from_list(err: Error) -> Self {
        Self::Internal {
            message: LIST_FAILED,
            details: err.to_string(),
        }
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Upload(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            Self::Validation(err @ ValidationError::InvalidFields(fields)) => ErrorBody {
                fields: fields.clone(),
                ..ErrorBody::new(err.to_string())
            },
            Self::Upload(err) => ErrorBody {
                field: Some(Field::Image.as_str().to_string()),
                ..ErrorBody::new(err.to_string())
            },
            Self::Internal { message, details } => ErrorBody {
                details: Some(details.clone()),
                ..ErrorBody::new(*message)
            },
            other => ErrorBody::new(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }

        let mut response = (status, Json(self.body())).into_response();
        if matches!(self, Self::MethodNotAllowed(_)) {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static(ALLOWED_METHODS));
        }
        response
    }
}
