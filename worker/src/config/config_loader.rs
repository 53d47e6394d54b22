use super::config_model::{CaptureQueue, DotEnvyConfig};
use anyhow::{Context, Result};
use liveness::domain::value_objects::liveness_upload::{
    DEFAULT_FIELD_NAME, LivenessHttpConfig, LivenessUploadConfig,
};
use url::Url;

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    parse(|key| std::env::var(key).ok())
}

fn parse(lookup: impl Fn(&str) -> Option<String>) -> Result<DotEnvyConfig> {
    let non_empty = |key: &str| {
        lookup(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let endpoint = non_empty("LIVENESS_ENDPOINT").context("LIVENESS_ENDPOINT is required")?;
    let endpoint = Url::parse(&endpoint).context("LIVENESS_ENDPOINT is invalid")?;

    let credential =
        non_empty("LIVENESS_BEARER_TOKEN").context("LIVENESS_BEARER_TOKEN is required")?;

    let field_name =
        non_empty("LIVENESS_FIELD_NAME").unwrap_or_else(|| DEFAULT_FIELD_NAME.to_string());

    let liveness = LivenessUploadConfig::new(endpoint, credential).with_field_name(field_name);

    let http_client = LivenessHttpConfig {
        connect_timeout_secs: non_empty("LIVENESS_CONNECT_TIMEOUT_SECS")
            .unwrap_or_else(|| "10".to_string())
            .parse()
            .context("LIVENESS_CONNECT_TIMEOUT_SECS is invalid")?,
        request_timeout_secs: non_empty("LIVENESS_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|| "60".to_string())
            .parse()
            .context("LIVENESS_REQUEST_TIMEOUT_SECS is invalid")?,
    };

    let capacity: usize = non_empty("CAPTURE_QUEUE_CAPACITY")
        .unwrap_or_else(|| "8".to_string())
        .parse()
        .context("CAPTURE_QUEUE_CAPACITY is invalid")?;
    if capacity == 0 {
        anyhow::bail!("CAPTURE_QUEUE_CAPACITY must be greater than zero");
    }

    Ok(DotEnvyConfig {
        liveness,
        http_client,
        capture_queue: CaptureQueue { capacity },
    })
}
