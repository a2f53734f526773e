//! Transport-agnostic school domain: entity, field rules, uploads, search.

pub mod error;
pub mod image;
pub mod search;

mod id;
mod school;
mod validation;

pub use error::{FieldError, UploadError, ValidationError};
pub use id::SchoolId;
pub use image::{ImageUpload, UploadPolicy};
pub use school::{Field, NewSchool, School, SchoolForm};
pub use search::filter_schools;
pub use validation::{check_rules, require_all, validate, validate_draft};
