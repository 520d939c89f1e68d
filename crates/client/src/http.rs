//! Response handling shared by the upload and status calls.

use serde::de::DeserializeOwned;

use crate::error::DiawiError;

/// Ensure the response has a success status code. Returns the response
/// unchanged on success, or a [`DiawiError::HttpStatus`] carrying the
/// status and body text on failure.
pub(crate) async fn ensure_success(
    response: reqwest::Response,
) -> Result<reqwest::Response, DiawiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        return Err(DiawiError::HttpStatus {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

/// Read a successful response body and decode it as JSON.
///
/// The body is read as text first so a malformed payload surfaces as
/// [`DiawiError::Decode`] rather than a transport error.
pub(crate) async fn parse_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, DiawiError> {
    let response = ensure_success(response).await?;
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}
