//! Validation errors for school submissions.
//!
//! Two families exist: [`ValidationError`] for the text fields of a
//! registration and [`UploadError`] for the optional image. Both are
//! user-facing and carry messages suitable for display next to a form.
//!
//! # Examples
//!
//! ```
//! use schoolyard::domain::error::ValidationError;
//! use schoolyard::domain::{require_all, SchoolForm};
//!
//! let form = SchoolForm::default();
//! let err = require_all(&form).unwrap_err();
//!
//! assert!(matches!(err, ValidationError::MissingFields { .. }));
//! assert_eq!(err.to_string(), "All fields except image are required");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::school::Field;

/// A single rule violation on one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// The field that failed.
    pub field: Field,
    /// Human-readable message for the field.
    pub message: String,
}

impl FieldError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Errors raised when a submission's text fields break the school rules.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more required fields were absent or blank.
    #[error("All fields except image are required")]
    MissingFields {
        /// The blank fields, in form order.
        fields: Vec<Field>,
    },

    /// All fields were present but at least one failed a format rule.
    #[error("Validation failed")]
    InvalidFields(Vec<FieldError>),
}

impl ValidationError {
    /// Field-level view of the error, one entry per offending field.
    #[must_use]
    pub fn field_errors(&self) -> Vec<FieldError> {
        match self {
            Self::MissingFields { fields } => fields
                .iter()
                .map(|field| FieldError::new(*field, field.required_message()))
                .collect(),
            Self::InvalidFields(errors) => errors.clone(),
        }
    }
}

/// Errors raised when an uploaded image breaks the upload policy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("Image must be {}MB or smaller", .max_bytes / (1024 * 1024))]
    TooLarge { max_bytes: u64 },

    #[error("Unsupported image type: {content_type}")]
    UnsupportedType { content_type: String },
}
