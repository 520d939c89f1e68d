//! Integration tests for the upload call against a mock Diawi server.

mod common;

use assert_matches::assert_matches;
use diawi_client::{DiawiError, ErrorKind, UploadRequest, Uploader};
use diawi_core::form::{
    CALLBACK_EMAILS_FIELD, CALLBACK_URL_FIELD, COMMENT_FIELD, FILE_FIELD, FIND_BY_UDID_FIELD,
    INSTALLATION_NOTIFICATIONS_FIELD, PASSWORD_FIELD, TOKEN_FIELD, WALL_OF_APPS_FIELD,
};
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{app_file, config_for, UPLOAD_PATH};

const ALL_FIELDS: [&str; 9] = [
    FILE_FIELD,
    TOKEN_FIELD,
    PASSWORD_FIELD,
    COMMENT_FIELD,
    CALLBACK_URL_FIELD,
    CALLBACK_EMAILS_FIELD,
    FIND_BY_UDID_FIELD,
    WALL_OF_APPS_FIELD,
    INSTALLATION_NOTIFICATIONS_FIELD,
];

async fn mount_job_response(server: &MockServer, job: &str) {
    Mock::given(method("POST"))
        .and(path(UPLOAD_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "job": job })))
        .expect(1)
        .mount(server)
        .await;
}

/// Body of the single request the server received, as text.
async fn received_body(server: &MockServer) -> String {
    let requests = server.received_requests().await.expect("request recording enabled");
    assert_eq!(requests.len(), 1, "expected exactly one upload request");
    String::from_utf8_lossy(&requests[0].body).into_owned()
}

/// Byte offset of each field's part header in `body`, if present.
fn field_position(body: &str, field: &str) -> Option<usize> {
    body.find(&format!("name=\"{field}\""))
}

fn field_count(body: &str, field: &str) -> usize {
    body.matches(&format!("name=\"{field}\"")).count()
}

// ---------------------------------------------------------------------------
// Validation happens before any network activity
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_file_path_fails_without_network_call() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let uploader = Uploader::new(&config_for(&server, 2));
    let req = UploadRequest::new("", "")
        .with_comment("ignored")
        .with_callback_emails(["qa@example.com"])
        .with_wall_of_apps(true);

    let err = uploader.submit(&req).await.unwrap_err();
    assert_matches!(err, DiawiError::EmptyFileField);
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn empty_token_fails_without_network_call() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let file = app_file(b"ipa");
    let uploader = Uploader::new(&config_for(&server, 2));
    let req = UploadRequest::new("", file.path());

    let err = uploader.submit(&req).await.unwrap_err();
    assert_matches!(err, DiawiError::EmptyTokenField);
}

#[tokio::test]
async fn missing_file_fails_without_network_call() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let uploader = Uploader::new(&config_for(&server, 2));
    let req = UploadRequest::new("tok", "/no/such/build.ipa");

    let err = uploader.submit(&req).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::File);
}

// ---------------------------------------------------------------------------
// Successful upload and multipart layout
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upload_returns_job_identifier() {
    let server = MockServer::start().await;
    mount_job_response(&server, "JOB-42").await;

    let file = app_file(b"fake-ipa-bytes");
    let uploader = Uploader::new(&config_for(&server, 2));

    let resp = uploader
        .submit(&UploadRequest::new("secret-token", file.path()))
        .await
        .unwrap();

    assert_eq!(resp.job_identifier, "JOB-42");

    let body = received_body(&server).await;
    assert!(body.contains("fake-ipa-bytes"), "file contents should be streamed");
    assert!(body.contains("secret-token"));
}

#[tokio::test]
async fn required_only_request_sends_no_optional_text_fields() {
    let server = MockServer::start().await;
    mount_job_response(&server, "J").await;

    let file = app_file(b"bin");
    let file_name = file.path().file_name().unwrap().to_string_lossy().into_owned();
    let uploader = Uploader::new(&config_for(&server, 2));

    uploader
        .submit(&UploadRequest::new("tok", file.path()))
        .await
        .unwrap();

    let body = received_body(&server).await;

    assert_eq!(field_count(&body, FILE_FIELD), 1);
    assert_eq!(field_count(&body, TOKEN_FIELD), 1);
    assert!(body.contains(&format!("filename=\"{file_name}\"")));

    for optional in [PASSWORD_FIELD, COMMENT_FIELD, CALLBACK_URL_FIELD, CALLBACK_EMAILS_FIELD] {
        assert_eq!(field_count(&body, optional), 0, "{optional} should be absent");
    }
}

#[tokio::test]
async fn full_request_sends_every_field_once_in_order() {
    let server = MockServer::start().await;
    mount_job_response(&server, "J").await;

    let file = app_file(b"bin");
    let uploader = Uploader::new(&config_for(&server, 2));
    let req = UploadRequest::new("tok", file.path())
        .with_password("pw")
        .with_comment("release candidate")
        .with_callback_url("https://ci.example.com/diawi")
        .with_callback_emails(["qa@example.com", "pm@example.com"])
        .with_find_by_udid(true)
        .with_wall_of_apps(false)
        .with_installation_notifications(true);

    uploader.submit(&req).await.unwrap();

    let body = received_body(&server).await;

    let positions: Vec<usize> = ALL_FIELDS
        .iter()
        .map(|field| {
            assert_eq!(field_count(&body, field), 1, "{field} should appear once");
            field_position(&body, field).unwrap()
        })
        .collect();

    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted, "fields must follow the fixed upload order");

    assert!(body.contains("qa@example.com,pm@example.com"));
}

// ---------------------------------------------------------------------------
// Failure responses are terminal
// ---------------------------------------------------------------------------

#[tokio::test]
async fn non_success_status_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(UPLOAD_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let file = app_file(b"bin");
    let uploader = Uploader::new(&config_for(&server, 2));

    let err = uploader
        .submit(&UploadRequest::new("tok", file.path()))
        .await
        .unwrap_err();

    assert_matches!(err, DiawiError::HttpStatus { status: 500, ref body } if body == "boom");
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(UPLOAD_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let file = app_file(b"bin");
    let uploader = Uploader::new(&config_for(&server, 2));

    let err = uploader
        .submit(&UploadRequest::new("tok", file.path()))
        .await
        .unwrap_err();

    assert_matches!(err, DiawiError::Decode(_));
}
