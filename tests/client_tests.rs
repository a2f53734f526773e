//! Client-side API, form, and directory tests against a live server.

mod support;

use std::sync::Arc;
use std::time::Duration;

use schoolyard::adapter::outbound::api::HttpSchoolApi;
use schoolyard::application::{Directory, DirectoryState, EmptyReason, FormState, RegistrationForm};
use schoolyard::domain::{Field, ImageUpload, SchoolForm, UploadPolicy};
use schoolyard::error::Error;
use schoolyard::port::outbound::api::SchoolApi;

use support::server::{png_bytes, TestServer};

fn form(name: &str, city: &str) -> SchoolForm {
    SchoolForm {
        name: name.into(),
        address: "12 Long Road, Metro".into(),
        city: city.into(),
        state: "North".into(),
        contact: "0123456789".into(),
        email_id: "office@alpha.edu".into(),
    }
}

/// A base URL nothing is listening on.
async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

#[tokio::test]
async fn api_creates_and_lists() {
    let server = TestServer::start().await;
    let api = HttpSchoolApi::new(&server.base_url).unwrap();

    assert!(api.list_schools().await.unwrap().is_empty());

    let image = ImageUpload::new(Some("gate.png".into()), "image/png", png_bytes(128));
    let first = api
        .create_school(&form("Alpha High", "Metro"), Some(&image))
        .await
        .unwrap();
    let second = api
        .create_school(&form("Beta Academy", "Harbor"), None)
        .await
        .unwrap();
    assert!(second > first);

    let schools = api.list_schools().await.unwrap();
    assert_eq!(schools.len(), 2);
    assert_eq!(schools[0].id, second);
    assert!(schools[0].image.is_none());
    assert_eq!(schools[1].id, first);
    assert!(schools[1].image.as_deref().unwrap().ends_with(".png"));
}

#[tokio::test]
async fn api_surfaces_server_error_message() {
    let server = TestServer::start().await;
    let api = HttpSchoolApi::new(&server.base_url).unwrap();
    let mut bad = form("Alpha High", "Metro");
    bad.contact = "123".into();

    let err = api.create_school(&bad, None).await.unwrap_err();

    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Validation failed");
        }
        other => panic!("expected api error, got {other}"),
    }
}

#[tokio::test]
async fn base_url_with_path_prefix_is_kept() {
    let api = HttpSchoolApi::new("http://127.0.0.1:3000/api").unwrap();
    assert_eq!(api.schools_url().as_str(), "http://127.0.0.1:3000/api/schools");
}

#[tokio::test]
async fn registration_form_submits_and_returns_to_idle() {
    let server = TestServer::start().await;
    let api = Arc::new(HttpSchoolApi::new(&server.base_url).unwrap());
    let registration = RegistrationForm::new(
        Arc::clone(&api),
        UploadPolicy::default(),
        Duration::from_millis(100),
    );
    let mut states = registration.subscribe();

    let draft = form("Alpha High", "Metro");
    for field in Field::REQUIRED {
        registration.set_field(field, draft.get(field));
    }
    registration.set_image(Some(ImageUpload::new(
        Some("gate.webp".into()),
        "image/webp",
        vec![1, 2, 3, 4],
    )));

    let id = registration.submit().await.unwrap();

    match registration.state() {
        FormState::Succeeded { school_id, message } => {
            assert_eq!(school_id, id);
            assert_eq!(message, "School added successfully!");
        }
        other => panic!("expected success, got {other:?}"),
    }
    assert_eq!(registration.draft().form, SchoolForm::default());
    assert!(registration.draft().image.is_none());

    tokio::time::timeout(Duration::from_secs(2), states.wait_for(|s| *s == FormState::Idle))
        .await
        .unwrap()
        .unwrap();

    let listed = api.list_schools().await.unwrap();
    assert_eq!(listed[0].id, id);
    assert!(listed[0].image.as_deref().unwrap().ends_with(".webp"));
}

#[tokio::test]
async fn registration_form_keeps_draft_on_server_error() {
    let url = closed_port_url().await;
    let api = Arc::new(HttpSchoolApi::new(&url).unwrap());
    let registration = RegistrationForm::new(api, UploadPolicy::default(), Duration::from_secs(3));
    let draft = form("Alpha High", "Metro");
    for field in Field::REQUIRED {
        registration.set_field(field, draft.get(field));
    }

    let err = registration.submit().await.unwrap_err();

    assert!(matches!(err, Error::Http(_)), "{err}");
    assert_eq!(
        registration.state(),
        FormState::Failed("An error occurred. Please try again.".to_string())
    );
    assert_eq!(registration.draft().form, draft);
}

#[tokio::test]
async fn directory_filters_loaded_schools() {
    let server = TestServer::start().await;
    let api = Arc::new(HttpSchoolApi::new(&server.base_url).unwrap());
    api.create_school(&form("Alpha High", "Metro"), None).await.unwrap();
    api.create_school(&form("Beta Academy", "Harbor"), None).await.unwrap();

    let directory = Directory::new(api);
    assert_eq!(directory.load().await.unwrap(), 2);

    directory.set_query("HARBOR");
    let visible = directory.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].name, "Beta Academy");

    directory.set_query("nowhere");
    assert!(directory.visible().is_empty());
    assert_eq!(directory.empty_reason(), Some(EmptyReason::NoMatches));

    directory.set_query("");
    assert_eq!(directory.visible().len(), 2);
    assert_eq!(directory.total(), 2);
}

#[tokio::test]
async fn directory_reports_fetch_failure() {
    let url = closed_port_url().await;
    let directory = Directory::new(Arc::new(HttpSchoolApi::new(&url).unwrap()));

    assert!(directory.load().await.is_err());
    assert_eq!(
        directory.state(),
        DirectoryState::Failed("An error occurred while fetching schools".to_string())
    );
    assert_eq!(directory.empty_reason(), None);
}
