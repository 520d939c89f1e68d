//! HTTP client for the Diawi app-distribution service.
//!
//! - [`Uploader`] submits an app binary as a multipart form and returns
//!   the job identifier.
//! - [`StatusClient`] performs a single status query for a job.
//! - [`Poller`] re-queries a `Processing` job until it reaches a terminal
//!   status or the poll budget runs out.
//! - [`DiawiClient`] wires the three together over one shared
//!   [`reqwest::Client`].

pub mod client;
pub mod error;
mod http;
pub mod poller;
pub mod sleeper;
pub mod status;
pub mod upload;

pub use client::DiawiClient;
pub use error::{DiawiError, ErrorKind};
pub use poller::Poller;
pub use sleeper::{Sleeper, TokioSleeper};
pub use status::StatusClient;
pub use upload::Uploader;

pub use diawi_core::{
    DiawiConfig, DiawiStatus, StatusRequest, StatusResponse, UploadRequest, UploadResponse,
};
