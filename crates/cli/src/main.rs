//! `diawi-upload` -- upload an app build to Diawi and print its install link.
//!
//! # Environment variables
//!
//! | Variable                           | Required | Default | Description                          |
//! |------------------------------------|----------|---------|--------------------------------------|
//! | `DIAWI_TOKEN`                      | yes      | --      | Diawi API token                      |
//! | `DIAWI_FILE`                       | yes      | --      | Path to the `.ipa` / `.apk`          |
//! | `DIAWI_PASSWORD`                   | no       | --      | Install page password                |
//! | `DIAWI_COMMENT`                    | no       | --      | Comment shown on the install page    |
//! | `DIAWI_CALLBACK_URL`               | no       | --      | URL called when processing finishes  |
//! | `DIAWI_CALLBACK_EMAILS`            | no       | --      | Comma-separated notification emails  |
//! | `DIAWI_WALL_OF_APPS`               | no       | `false` | List on the public wall of apps      |
//! | `DIAWI_FIND_BY_UDID`               | no       | `false` | Allow UDID lookup from the page      |
//! | `DIAWI_INSTALLATION_NOTIFICATIONS` | no       | `false` | Email on each installation           |
//!
//! Endpoint, timeout and polling overrides are documented on
//! [`DiawiConfig::from_env`].

mod request;

use anyhow::Context;
use diawi_client::DiawiClient;
use diawi_core::DiawiConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "diawi_upload=info,diawi_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = DiawiConfig::from_env().context("invalid Diawi configuration")?;
    let upload = request::from_env().context("invalid upload request")?;

    tracing::info!(
        file = %upload.file_path.display(),
        polling_max = config.status_polling_max,
        "Starting diawi-upload",
    );

    let client = DiawiClient::new(&config);
    let result = client
        .upload_and_wait(&upload)
        .await
        .with_context(|| format!("uploading {} to Diawi", upload.file_path.display()))?;

    tracing::info!(hash = %result.hash, "Upload processed");
    println!("{}", result.link);

    Ok(())
}
