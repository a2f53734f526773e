//! Wire shapes of the `/schools` endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::{FieldError, School, SchoolId};

/// Body of `GET /schools`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    pub success: bool,
    pub schools: Vec<School>,
}

/// Body of a successful `POST /schools`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "schoolId")]
    pub school_id: SchoolId,
}

/// Body of every error response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            ..Self::default()
        }
    }
}
