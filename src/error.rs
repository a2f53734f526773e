use thiserror::Error;

use crate::domain::error::{UploadError, ValidationError};

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    /// The API answered with a non-success status.
    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("a submission is already in progress")]
    SubmissionInFlight,

    /// A client call failed; `message` is the text shown to the user.
    #[error("{message}")]
    Client {
        message: String,
        #[source]
        source: Box<Error>,
    },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, Error>;
