use std::time::Duration;

/// Production upload endpoint.
pub const DEFAULT_UPLOAD_URL: &str = "https://upload.diawi.com/";

/// Production status endpoint.
pub const DEFAULT_STATUS_URL: &str = "https://upload.diawi.com/status";

pub const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_STATUS_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_STATUS_POLLING_MAX: u32 = 30;

/// The service asks clients to wait at least one second between status
/// requests.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 1;

/// Endpoints, timeouts and polling limits for the Diawi client.
///
/// Passed by value into each client component at construction so tests can
/// point them at a mock server with short limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiawiConfig {
    pub upload_url: String,
    pub status_url: String,
    /// Timeout for the single upload POST.
    pub upload_timeout: Duration,
    /// Timeout for each status GET.
    pub status_timeout: Duration,
    /// How many times a `Processing` job is re-polled before giving up.
    pub status_polling_max: u32,
    /// Delay between consecutive status polls.
    pub poll_interval: Duration,
}

/// A configuration value in the environment could not be parsed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a non-negative integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
}

impl Default for DiawiConfig {
    fn default() -> Self {
        Self {
            upload_url: DEFAULT_UPLOAD_URL.to_string(),
            status_url: DEFAULT_STATUS_URL.to_string(),
            upload_timeout: Duration::from_secs(DEFAULT_UPLOAD_TIMEOUT_SECS),
            status_timeout: Duration::from_secs(DEFAULT_STATUS_TIMEOUT_SECS),
            status_polling_max: DEFAULT_STATUS_POLLING_MAX,
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
        }
    }
}

impl DiawiConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                     | Default                           |
    /// |-----------------------------|-----------------------------------|
    /// | `DIAWI_UPLOAD_URL`          | `https://upload.diawi.com/`       |
    /// | `DIAWI_STATUS_URL`          | `https://upload.diawi.com/status` |
    /// | `DIAWI_UPLOAD_TIMEOUT_SECS` | `300`                             |
    /// | `DIAWI_STATUS_TIMEOUT_SECS` | `30`                              |
    /// | `DIAWI_STATUS_POLLING_MAX`  | `30`                              |
    /// | `DIAWI_POLL_INTERVAL_SECS`  | `1`                               |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads values through
    /// `lookup` instead of the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let upload_url = lookup("DIAWI_UPLOAD_URL").unwrap_or(defaults.upload_url);
        let status_url = lookup("DIAWI_STATUS_URL").unwrap_or(defaults.status_url);

        let upload_timeout = parse_secs(&lookup, "DIAWI_UPLOAD_TIMEOUT_SECS")?
            .unwrap_or(defaults.upload_timeout);
        let status_timeout = parse_secs(&lookup, "DIAWI_STATUS_TIMEOUT_SECS")?
            .unwrap_or(defaults.status_timeout);
        let poll_interval = parse_secs(&lookup, "DIAWI_POLL_INTERVAL_SECS")?
            .unwrap_or(defaults.poll_interval);

        let status_polling_max = match lookup("DIAWI_STATUS_POLLING_MAX") {
            Some(raw) => parse_number::<u32>("DIAWI_STATUS_POLLING_MAX", raw)?,
            None => defaults.status_polling_max,
        };

        Ok(Self {
            upload_url,
            status_url,
            upload_timeout,
            status_timeout,
            status_polling_max,
            poll_interval,
        })
    }
}

fn parse_secs<F>(lookup: &F, var: &'static str) -> Result<Option<Duration>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .map(|raw| parse_number::<u64>(var, raw).map(Duration::from_secs))
        .transpose()
}

fn parse_number<T: std::str::FromStr>(var: &'static str, raw: String) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber { var, value: raw })
}
