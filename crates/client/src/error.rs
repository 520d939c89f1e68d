//! Errors from the upload and status layers.

use std::path::PathBuf;

use diawi_core::StatusResponse;

/// Broad category of a [`DiawiError`], for callers deciding between
/// fixing input, retrying later, or alerting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Request rejected before any network activity.
    Validation,
    /// The upload file could not be opened.
    File,
    /// Network failure or non-2xx HTTP status.
    Transport,
    /// Response body was not the expected JSON.
    Decode,
    /// The service reported the job as failed.
    RemoteJob,
    /// The service answered outside the known contract.
    Protocol,
    /// The job was still processing when the poll budget ran out.
    Exhausted,
}

#[derive(Debug, thiserror::Error)]
pub enum DiawiError {
    #[error("file value left blank")]
    EmptyFileField,

    #[error("token value left blank")]
    EmptyTokenField,

    #[error("failed to open {}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Diawi returned a non-2xx status code.
    #[error("Diawi returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("failed to decode Diawi response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("job failed with error status 4000 ({response})")]
    JobFailed { response: StatusResponse },

    #[error("unknown job status ({response})")]
    UnknownStatus { response: StatusResponse },

    /// `Ok` status without the hash or link it must carry.
    #[error("finished job is missing its hash or link ({response})")]
    IncompleteResult { response: StatusResponse },

    #[error("job still processing after {polls} status polls")]
    MaxPollsReached { polls: u32 },
}

impl DiawiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DiawiError::EmptyFileField | DiawiError::EmptyTokenField => ErrorKind::Validation,
            DiawiError::File { .. } => ErrorKind::File,
            DiawiError::Request(_) | DiawiError::HttpStatus { .. } => ErrorKind::Transport,
            DiawiError::Decode(_) => ErrorKind::Decode,
            DiawiError::JobFailed { .. } => ErrorKind::RemoteJob,
            DiawiError::UnknownStatus { .. } | DiawiError::IncompleteResult { .. } => {
                ErrorKind::Protocol
            }
            DiawiError::MaxPollsReached { .. } => ErrorKind::Exhausted,
        }
    }

    /// The last status response, for errors raised after one was received.
    pub fn status_response(&self) -> Option<&StatusResponse> {
        match self {
            DiawiError::JobFailed { response }
            | DiawiError::UnknownStatus { response }
            | DiawiError::IncompleteResult { response } => Some(response),
            _ => None,
        }
    }
}
