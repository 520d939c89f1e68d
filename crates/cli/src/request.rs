//! Upload request assembled from environment variables.

use diawi_core::UploadRequest;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("{var} must be a boolean (true/false/1/0), got {value:?}")]
    InvalidFlag { var: &'static str, value: String },
}

pub fn from_env() -> Result<UploadRequest, RequestError> {
    from_lookup(|key| std::env::var(key).ok())
}

/// Build the request from `lookup`. Empty optional values are treated as
/// unset.
pub fn from_lookup<F>(lookup: F) -> Result<UploadRequest, RequestError>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

    let token = non_empty("DIAWI_TOKEN").ok_or(RequestError::Missing("DIAWI_TOKEN"))?;
    let file = non_empty("DIAWI_FILE").ok_or(RequestError::Missing("DIAWI_FILE"))?;

    let callback_emails: Vec<String> = non_empty("DIAWI_CALLBACK_EMAILS")
        .map(|raw| {
            raw.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default();

    Ok(UploadRequest {
        auth_token: token,
        file_path: file.into(),
        wall_of_apps: flag(&lookup, "DIAWI_WALL_OF_APPS")?,
        find_by_udid: flag(&lookup, "DIAWI_FIND_BY_UDID")?,
        installation_notifications: flag(&lookup, "DIAWI_INSTALLATION_NOTIFICATIONS")?,
        password: non_empty("DIAWI_PASSWORD"),
        comment: non_empty("DIAWI_COMMENT"),
        callback_url: non_empty("DIAWI_CALLBACK_URL"),
        callback_emails,
    })
}

fn flag<F>(lookup: &F, var: &'static str) -> Result<bool, RequestError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(var) else {
        return Ok(false);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" => Ok(false),
        "1" | "true" | "yes" => Ok(true),
        _ => Err(RequestError::InvalidFlag { var, value: raw }),
    }
}
