//! HTTP client for the school directory API.

use reqwest::multipart::{Form, Part};
use reqwest::{Client as HttpClient, Response};
use tracing::debug;
use url::Url;

use super::dto::{CreateResponse, ErrorBody, ListResponse};
use crate::domain::{Field, ImageUpload, School, SchoolForm, SchoolId};
use crate::error::{Error, Result};
use crate::port::outbound::api::SchoolApi;

const LIST_FAILED: &str = "Failed to fetch schools";
const CREATE_FAILED: &str = "Failed to add school";

/// Typed client for `GET /schools` and `POST /schools`.
#[derive(Debug, Clone)]
pub struct HttpSchoolApi {
    http: HttpClient,
    schools_url: Url,
}

impl HttpSchoolApi {
    /// Create a client for the API rooted at `base_url`
    /// (e.g. `http://127.0.0.1:3000`).
    ///
    /// # Errors
    /// Returns an error if `base_url` is not a valid absolute URL.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_http(HttpClient::new(), base_url)
    }

    /// Same as [`new`](Self::new) with a caller-built `reqwest` client.
    ///
    /// # Errors
    /// Returns an error if `base_url` is not a valid absolute URL.
    pub fn with_http(http: HttpClient, base_url: &str) -> Result<Self> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let schools_url = base.join("schools")?;
        Ok(Self { http, schools_url })
    }

    #[must_use]
    pub fn schools_url(&self) -> &Url {
        &self.schools_url
    }

    fn multipart(form: &SchoolForm, image: Option<&ImageUpload>) -> Result<Form> {
        let mut body = Form::new();
        for field in Field::REQUIRED {
            body = body.text(field.as_str(), form.get(field).to_string());
        }

        if let Some(image) = image {
            let mut part = Part::bytes(image.bytes.clone()).mime_str(&image.content_type)?;
            if let Some(name) = &image.original_name {
                part = part.file_name(name.clone());
            }
            body = body.part(Field::Image.as_str(), part);
        }

        Ok(body)
    }
}

/// Turn a non-success response into [`Error::Api`], preferring the body's
/// `error` text over `fallback`.
async fn api_error(response: Response, fallback: &str) -> Error {
    let status = response.status().as_u16();
    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .map(|body| body.error)
        .filter(|error| !error.is_empty())
        .unwrap_or_else(|| fallback.to_string());
    Error::Api { status, message }
}

impl SchoolApi for HttpSchoolApi {
    async fn list_schools(&self) -> Result<Vec<School>> {
        let response = self.http.get(self.schools_url.clone()).send().await?;
        if !response.status().is_success() {
            return Err(api_error(response, LIST_FAILED).await);
        }

        let body: ListResponse = response.json().await?;
        debug!(count = body.schools.len(), "Fetched schools");
        Ok(body.schools)
    }

    async fn create_school(
        &self,
        form: &SchoolForm,
        image: Option<&ImageUpload>,
    ) -> Result<SchoolId> {
        let body = Self::multipart(form, image)?;
        let response = self
            .http
            .post(self.schools_url.clone())
            .multipart(body)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(api_error(response, CREATE_FAILED).await);
        }

        let body: CreateResponse = response.json().await?;
        debug!(school_id = %body.school_id, "Created school");
        Ok(body.school_id)
    }
}
