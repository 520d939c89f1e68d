//! Status polling until a job reaches a terminal state.
//!
//! The first query is sent immediately. While the service answers
//! `Processing`, the poller waits one interval and asks again, up to
//! `status_polling_max` extra queries. `Ok`, `ErrorOccurred` and any
//! unrecognised status end the loop on the spot; so does any transport
//! or decode error from a single query.

use std::sync::Arc;
use std::time::Duration;

use diawi_core::{DiawiConfig, DiawiStatus, StatusRequest, StatusResponse};

use crate::error::DiawiError;
use crate::sleeper::{Sleeper, TokioSleeper};
use crate::status::StatusClient;

/// Drives a [`StatusClient`] until a job finishes.
#[derive(Clone)]
pub struct Poller {
    status: StatusClient,
    sleeper: Arc<dyn Sleeper>,
    polling_max: u32,
    interval: Duration,
}

impl Poller {
    pub fn new(status: StatusClient, config: &DiawiConfig) -> Self {
        Self {
            status,
            sleeper: Arc::new(TokioSleeper),
            polling_max: config.status_polling_max,
            interval: config.poll_interval,
        }
    }

    /// Replace the sleep capability used between polls.
    pub fn with_sleeper(self, sleeper: Arc<dyn Sleeper>) -> Self {
        Self { sleeper, ..self }
    }

    /// Poll until the job is no longer `Processing`.
    ///
    /// Returns the `Ok` response, or:
    /// - [`DiawiError::JobFailed`] for status 4000,
    /// - [`DiawiError::UnknownStatus`] for any unrecognised status,
    /// - [`DiawiError::IncompleteResult`] for `Ok` without hash or link,
    /// - [`DiawiError::MaxPollsReached`] once `status_polling_max` re-polls
    ///   have all answered `Processing`.
    pub async fn wait_for_finished_status(
        &self,
        req: &StatusRequest,
    ) -> Result<StatusResponse, DiawiError> {
        let mut response = self.status.get_job_status(req).await?;
        let mut retries: u32 = 0;

        loop {
            tracing::debug!(
                job = %req.job_identifier,
                poll = retries + 1,
                status = %response.status,
                "Diawi job status",
            );

            match response.status {
                DiawiStatus::Processing => {
                    if retries >= self.polling_max {
                        return Err(DiawiError::MaxPollsReached { polls: retries + 1 });
                    }

                    self.sleeper.sleep(self.interval).await;
                    retries += 1;
                    response = self.status.get_job_status(req).await?;
                }
                DiawiStatus::Ok => {
                    if response.hash.is_empty() || response.link.is_empty() {
                        return Err(DiawiError::IncompleteResult { response });
                    }
                    tracing::info!(
                        job = %req.job_identifier,
                        link = %response.link,
                        "Diawi job finished",
                    );
                    return Ok(response);
                }
                DiawiStatus::ErrorOccurred => return Err(DiawiError::JobFailed { response }),
                DiawiStatus::Unknown(_) => return Err(DiawiError::UnknownStatus { response }),
            }
        }
    }
}
