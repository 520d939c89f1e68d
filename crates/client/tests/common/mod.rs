//! Shared fixtures for the client integration tests.

#![allow(dead_code)]

use std::io::Write;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use diawi_client::{DiawiConfig, Sleeper};
use tempfile::NamedTempFile;
use wiremock::MockServer;

pub const UPLOAD_PATH: &str = "/upload";
pub const STATUS_PATH: &str = "/status";

/// Config pointing both endpoints at `server`, with a small poll budget.
pub fn config_for(server: &MockServer, polling_max: u32) -> DiawiConfig {
    DiawiConfig {
        upload_url: format!("{}{}", server.uri(), UPLOAD_PATH),
        status_url: format!("{}{}", server.uri(), STATUS_PATH),
        upload_timeout: Duration::from_secs(5),
        status_timeout: Duration::from_secs(5),
        status_polling_max: polling_max,
        poll_interval: Duration::from_secs(1),
    }
}

/// Sleeper that returns immediately and counts how often it was asked
/// to wait.
#[derive(Default)]
pub struct CountingSleeper {
    calls: AtomicU32,
}

impl CountingSleeper {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Sleeper for CountingSleeper {
    async fn sleep(&self, _duration: Duration) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

/// A temporary `.ipa` with known contents.
pub fn app_file(contents: &[u8]) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("MyApp")
        .suffix(".ipa")
        .tempfile()
        .expect("create temp app file");
    file.write_all(contents).expect("write temp app file");
    file.flush().expect("flush temp app file");
    file
}

pub fn status_body(status: i64, message: &str) -> serde_json::Value {
    serde_json::json!({ "status": status, "message": message })
}

pub fn ok_body(hash: &str, link: &str) -> serde_json::Value {
    serde_json::json!({
        "status": 2000,
        "message": "Ok",
        "hash": hash,
        "link": link,
    })
}
