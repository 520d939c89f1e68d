//! App upload: multipart form assembly and the single POST.

use std::io;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use tokio_util::io::ReaderStream;

use diawi_core::form::{upload_fields, FieldValue, FormField};
use diawi_core::{DiawiConfig, UploadRequest, UploadResponse};

use crate::error::DiawiError;
use crate::http;

/// Submits app binaries to the Diawi upload endpoint.
#[derive(Clone)]
pub struct Uploader {
    client: reqwest::Client,
    upload_url: String,
    timeout: Duration,
}

impl Uploader {
    pub fn new(config: &DiawiConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create an uploader reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: &DiawiConfig) -> Self {
        Self {
            client,
            upload_url: config.upload_url.clone(),
            timeout: config.upload_timeout,
        }
    }

    /// Upload the app described by `req` and return the job identifier.
    ///
    /// The request is validated before the file is touched. The upload is
    /// sent exactly once; a non-2xx answer is returned as
    /// [`DiawiError::HttpStatus`] without retrying.
    pub async fn submit(&self, req: &UploadRequest) -> Result<UploadResponse, DiawiError> {
        validate(req)?;

        let form = build_form(&upload_fields(req)).await?;

        tracing::info!(
            file = %req.file_path.display(),
            url = %self.upload_url,
            "Uploading app to Diawi",
        );

        let response = self
            .client
            .post(&self.upload_url)
            .timeout(self.timeout)
            .multipart(form)
            .send()
            .await?;

        tracing::info!(status = response.status().as_u16(), "Diawi upload answered");

        let upload: UploadResponse = http::parse_response(response).await?;

        tracing::info!(job = %upload.job_identifier, "Diawi upload accepted");

        Ok(upload)
    }
}

/// Check the required fields. The file path is checked before the token.
pub fn validate(req: &UploadRequest) -> Result<(), DiawiError> {
    if req.file_path.as_os_str().is_empty() {
        return Err(DiawiError::EmptyFileField);
    }
    if req.auth_token.is_empty() {
        return Err(DiawiError::EmptyTokenField);
    }
    Ok(())
}

/// Build a multipart form from `fields`, in order.
///
/// File parts are streamed from disk; the open handle lives inside the
/// form and is closed when the form is dropped or fully sent.
pub async fn build_form(fields: &[FormField]) -> Result<Form, DiawiError> {
    let mut form = Form::new();

    for field in fields {
        form = match &field.value {
            FieldValue::File { path, file_name } => {
                let part = file_part(path, file_name).await?;
                form.part(field.name, part)
            }
            scalar => match scalar.as_text() {
                Some(text) => form.text(field.name, text),
                None => form,
            },
        };
    }

    Ok(form)
}

async fn file_part(path: &std::path::Path, file_name: &str) -> Result<Part, DiawiError> {
    let file_error = |source: io::Error| DiawiError::File {
        path: path.to_path_buf(),
        source,
    };

    let file = tokio::fs::File::open(path).await.map_err(file_error)?;
    let metadata = file.metadata().await.map_err(file_error)?;
    if metadata.is_dir() {
        return Err(file_error(io::Error::new(
            io::ErrorKind::InvalidInput,
            "path is a directory",
        )));
    }

    tracing::debug!(file = %path.display(), bytes = metadata.len(), "Streaming upload file");

    let body = reqwest::Body::wrap_stream(ReaderStream::new(file));
    let part = Part::stream_with_length(body, metadata.len())
        .file_name(file_name.to_string())
        .mime_str("application/octet-stream")?;

    Ok(part)
}
