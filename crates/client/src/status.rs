//! Single status query against the Diawi status endpoint.

use std::time::Duration;

use diawi_core::{DiawiConfig, StatusRequest, StatusResponse};

use crate::error::DiawiError;
use crate::http;

/// Issues one `GET /status?token=..&job=..` per call. Never retries.
#[derive(Clone)]
pub struct StatusClient {
    client: reqwest::Client,
    status_url: String,
    timeout: Duration,
}

impl StatusClient {
    pub fn new(config: &DiawiConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a status client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: &DiawiConfig) -> Self {
        Self {
            client,
            status_url: config.status_url.clone(),
            timeout: config.status_timeout,
        }
    }

    /// Fetch the current status of a job.
    ///
    /// Non-2xx answers and undecodable bodies are returned as errors;
    /// interpreting the status value is left to the caller.
    pub async fn get_job_status(&self, req: &StatusRequest) -> Result<StatusResponse, DiawiError> {
        let response = self
            .client
            .get(&self.status_url)
            .query(&[
                ("token", req.auth_token.as_str()),
                ("job", req.job_identifier.as_str()),
            ])
            .timeout(self.timeout)
            .send()
            .await?;

        tracing::debug!(
            job = %req.job_identifier,
            status = response.status().as_u16(),
            "Diawi status answered",
        );

        http::parse_response(response).await
    }
}
