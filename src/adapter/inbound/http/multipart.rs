//! Streaming reader for the `POST /schools` multipart body.
//!
//! The image part is checked against the upload policy while it streams:
//! an oversized or mistyped file stops being buffered as soon as the
//! problem is seen, but the rest of the body is still drained so the
//! client receives the error response instead of a reset connection.

use axum::extract::multipart::{Field as Part, MultipartError};
use axum::extract::Multipart;
use axum::http::StatusCode;
use tracing::debug;

use super::response::ApiError;
use crate::domain::{Field, ImageUpload, SchoolForm, UploadError, UploadPolicy};

/// Decoded form fields and optional image.
#[derive(Debug, Default)]
pub struct Submission {
    pub form: SchoolForm,
    pub image: Option<ImageUpload>,
}

/// Read every part of the body.
///
/// Unknown fields are ignored. An image part with no bytes counts as no
/// image. The first upload policy violation wins over anything after it.
pub async fn read_submission(
    multipart: &mut Multipart,
    policy: &UploadPolicy,
) -> Result<Submission, ApiError> {
    let mut submission = Submission::default();
    let mut upload_error = None;
    let max_bytes = policy.max_bytes;

    while let Some(part) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, max_bytes))?
    {
        let Some(field) = part.name().and_then(Field::from_wire) else {
            drain(part, max_bytes).await?;
            continue;
        };

        if field == Field::Image {
            if upload_error.is_some() || submission.image.is_some() {
                drain(part, max_bytes).await?;
                continue;
            }
            match read_image(part, policy).await? {
                Ok(image) => submission.image = image,
                Err(err) => upload_error = Some(err),
            }
        } else {
            let value = part
                .text()
                .await
                .map_err(|e| multipart_error(e, max_bytes))?;
            submission.form.set(field, value);
        }
    }

    match upload_error {
        Some(err) => Err(err.into()),
        None => Ok(submission),
    }
}

/// Buffer one image part, enforcing the policy as chunks arrive.
///
/// The outer error is a broken body; the inner one a policy violation.
async fn read_image(
    mut part: Part<'_>,
    policy: &UploadPolicy,
) -> Result<Result<Option<ImageUpload>, UploadError>, ApiError> {
    let original_name = part
        .file_name()
        .map(str::to_string)
        .filter(|name| !name.is_empty());
    let content_type = part.content_type().unwrap_or_default().to_string();

    let mut bytes = Vec::new();
    let mut seen: u64 = 0;
    let mut violation = None;

    while let Some(chunk) = part
        .chunk()
        .await
        .map_err(|e| multipart_error(e, policy.max_bytes))?
    {
        seen += chunk.len() as u64;
        if violation.is_some() {
            continue;
        }
        if let Err(err) = policy
            .check_content_type(&content_type)
            .and_then(|()| policy.check_size(seen))
        {
            violation = Some(err);
            bytes = Vec::new();
            continue;
        }
        bytes.extend_from_slice(&chunk);
    }

    if let Some(err) = violation {
        debug!(bytes = seen, content_type = %content_type, error = %err, "Rejected image part");
        return Ok(Err(err));
    }
    if bytes.is_empty() {
        return Ok(Ok(None));
    }

    Ok(Ok(Some(ImageUpload::new(original_name, &content_type, bytes))))
}

async fn drain(mut part: Part<'_>, max_bytes: u64) -> Result<(), ApiError> {
    while part
        .chunk()
        .await
        .map_err(|e| multipart_error(e, max_bytes))?
        .is_some()
    {}
    Ok(())
}

/// A body over the request limit reads as an oversized image.
fn multipart_error(err: MultipartError, max_bytes: u64) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::Upload(UploadError::TooLarge { max_bytes })
    } else {
        ApiError::BadRequest(err.body_text())
    }
}
