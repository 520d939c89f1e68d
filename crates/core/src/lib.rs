//! Diawi wire types and static configuration.
//!
//! Everything here is free of I/O: request/response shapes, the job
//! status enumeration, the ordered multipart field descriptors for an
//! upload, and the configuration value handed to each client component.

pub mod config;
pub mod form;
pub mod status;
pub mod types;

pub use config::{ConfigError, DiawiConfig};
pub use form::{FieldValue, FormField};
pub use status::DiawiStatus;
pub use types::{StatusRequest, StatusResponse, UploadRequest, UploadResponse};
