//! Request and response shapes for the upload and status endpoints.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::status::DiawiStatus;

/// An app upload.
///
/// Only `auth_token` and `file_path` are required by the service. Nothing
/// is checked here; the uploader validates at submission time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadRequest {
    pub auth_token: String,
    /// Path to the `.ipa` / `.apk` to upload.
    pub file_path: PathBuf,
    /// List the app on the account's public "wall of apps".
    pub wall_of_apps: bool,
    /// Let testers look up their UDID from the install page.
    pub find_by_udid: bool,
    /// Email the uploader whenever the app is installed.
    pub installation_notifications: bool,
    /// Password protecting the install page.
    pub password: Option<String>,
    /// Free-form comment shown on the install page.
    pub comment: Option<String>,
    /// URL the service calls once processing finishes.
    pub callback_url: Option<String>,
    /// Addresses notified once processing finishes.
    pub callback_emails: Vec<String>,
}

impl UploadRequest {
    pub fn new(auth_token: impl Into<String>, file_path: impl Into<PathBuf>) -> Self {
        Self {
            auth_token: auth_token.into(),
            file_path: file_path.into(),
            ..Default::default()
        }
    }

    pub fn with_password(self, password: impl Into<String>) -> Self {
        Self {
            password: Some(password.into()),
            ..self
        }
    }

    pub fn with_comment(self, comment: impl Into<String>) -> Self {
        Self {
            comment: Some(comment.into()),
            ..self
        }
    }

    pub fn with_callback_url(self, url: impl Into<String>) -> Self {
        Self {
            callback_url: Some(url.into()),
            ..self
        }
    }

    pub fn with_callback_emails<I, S>(self, emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            callback_emails: emails.into_iter().map(Into::into).collect(),
            ..self
        }
    }

    pub fn with_wall_of_apps(self, enabled: bool) -> Self {
        Self {
            wall_of_apps: enabled,
            ..self
        }
    }

    pub fn with_find_by_udid(self, enabled: bool) -> Self {
        Self {
            find_by_udid: enabled,
            ..self
        }
    }

    pub fn with_installation_notifications(self, enabled: bool) -> Self {
        Self {
            installation_notifications: enabled,
            ..self
        }
    }
}

/// Body returned by the upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Opaque identifier of the processing job.
    #[serde(rename = "job")]
    pub job_identifier: String,
}

/// Parameters for one status query. Borrowed by every poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRequest {
    pub auth_token: String,
    pub job_identifier: String,
}

impl StatusRequest {
    pub fn new(auth_token: impl Into<String>, job_identifier: impl Into<String>) -> Self {
        Self {
            auth_token: auth_token.into(),
            job_identifier: job_identifier.into(),
        }
    }
}

/// Body returned by the status endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: DiawiStatus,
    #[serde(default)]
    pub message: String,
    /// Only present once the job succeeded.
    #[serde(default)]
    pub hash: String,
    /// Install page URL. Only present once the job succeeded.
    #[serde(default)]
    pub link: String,
}

impl fmt::Display for StatusResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "status: {} message: {} hash: {} link: {}",
            self.status, self.message, self.hash, self.link
        )
    }
}
