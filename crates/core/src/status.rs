//! Job status codes reported by the Diawi status endpoint.
//!
//! The service sends a bare integer. Codes outside the known set are kept
//! as [`DiawiStatus::Unknown`] so the raw value survives into error
//! messages.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Job is still being processed.
pub const STATUS_PROCESSING: i64 = 2001;

/// Job finished; `hash` and `link` are populated.
pub const STATUS_OK: i64 = 2000;

/// Job failed on the service side.
pub const STATUS_ERROR_OCCURRED: i64 = 4000;

/// Processing state of an uploaded app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum DiawiStatus {
    Processing,
    Ok,
    ErrorOccurred,
    /// Any code the client does not recognise.
    Unknown(i64),
}

impl DiawiStatus {
    /// Wire code for this status.
    pub fn code(self) -> i64 {
        match self {
            DiawiStatus::Processing => STATUS_PROCESSING,
            DiawiStatus::Ok => STATUS_OK,
            DiawiStatus::ErrorOccurred => STATUS_ERROR_OCCURRED,
            DiawiStatus::Unknown(code) => code,
        }
    }

    /// Whether the poller stops querying once this status is observed.
    pub fn is_terminal(self) -> bool {
        !matches!(self, DiawiStatus::Processing)
    }
}

impl From<i64> for DiawiStatus {
    fn from(code: i64) -> Self {
        match code {
            STATUS_PROCESSING => DiawiStatus::Processing,
            STATUS_OK => DiawiStatus::Ok,
            STATUS_ERROR_OCCURRED => DiawiStatus::ErrorOccurred,
            other => DiawiStatus::Unknown(other),
        }
    }
}

impl From<DiawiStatus> for i64 {
    fn from(status: DiawiStatus) -> Self {
        status.code()
    }
}

impl fmt::Display for DiawiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
