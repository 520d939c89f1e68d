//! Upload-then-wait facade over one shared HTTP client.

use std::sync::Arc;

use diawi_core::{DiawiConfig, StatusRequest, StatusResponse, UploadRequest, UploadResponse};

use crate::error::DiawiError;
use crate::poller::Poller;
use crate::sleeper::Sleeper;
use crate::status::StatusClient;
use crate::upload::Uploader;

/// Full Diawi client: upload, single status query, and polling.
///
/// Holds no state between calls beyond configuration; independent
/// upload sequences may run concurrently on separate tasks.
#[derive(Clone)]
pub struct DiawiClient {
    uploader: Uploader,
    status: StatusClient,
    poller: Poller,
}

impl DiawiClient {
    pub fn new(config: &DiawiConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a client reusing an existing [`reqwest::Client`] (useful for
    /// connection pooling).
    pub fn with_client(client: reqwest::Client, config: &DiawiConfig) -> Self {
        let status = StatusClient::with_client(client.clone(), config);
        Self {
            uploader: Uploader::with_client(client, config),
            poller: Poller::new(status.clone(), config),
            status,
        }
    }

    /// Replace the sleep capability used between status polls.
    pub fn with_sleeper(self, sleeper: Arc<dyn Sleeper>) -> Self {
        Self {
            poller: self.poller.with_sleeper(sleeper),
            ..self
        }
    }

    pub async fn upload(&self, req: &UploadRequest) -> Result<UploadResponse, DiawiError> {
        self.uploader.submit(req).await
    }

    pub async fn job_status(&self, req: &StatusRequest) -> Result<StatusResponse, DiawiError> {
        self.status.get_job_status(req).await
    }

    pub async fn wait_for_finished_status(
        &self,
        req: &StatusRequest,
    ) -> Result<StatusResponse, DiawiError> {
        self.poller.wait_for_finished_status(req).await
    }

    /// Upload an app and wait until Diawi has finished processing it.
    ///
    /// The returned response carries the install `link` and `hash`.
    pub async fn upload_and_wait(&self, req: &UploadRequest) -> Result<StatusResponse, DiawiError> {
        let upload = self.upload(req).await?;
        let status_req = StatusRequest::new(req.auth_token.clone(), upload.job_identifier);
        self.wait_for_finished_status(&status_req).await
    }
}
