use std::fmt;
use std::path::{Path, PathBuf};

use url::Url;

/// Multipart field the final liveness API expects the clip under.
pub const DEFAULT_FIELD_NAME: &str = "face";

/// Request-shaping options injected by the embedding application.
#[derive(Clone)]
pub struct LivenessUploadConfig {
    pub endpoint: Url,
    pub credential: String,
    pub field_name: String,
}

impl LivenessUploadConfig {
    pub fn new(endpoint: Url, credential: impl Into<String>) -> Self {
        Self {
            endpoint,
            credential: credential.into(),
            field_name: DEFAULT_FIELD_NAME.to_string(),
        }
    }

    /// Older revisions of the service read the clip from `video`.
    pub fn with_field_name(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = field_name.into();
        self
    }
}

impl fmt::Debug for LivenessUploadConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LivenessUploadConfig")
            .field("endpoint", &self.endpoint.as_str())
            .field("credential", &"<redacted>")
            .field("field_name", &self.field_name)
            .finish()
    }
}

/// Timeouts for the outbound HTTP client.
#[derive(Debug, Clone)]
pub struct LivenessHttpConfig {
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for LivenessHttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 10,
            request_timeout_secs: 60,
        }
    }
}

/// One upload of one captured clip. Built per capture event and dropped once
/// the request completes.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub file_path: PathBuf,
    pub credential: String,
    pub endpoint: Url,
    pub field_name: String,
}

impl UploadRequest {
    pub fn new(
        file_path: impl Into<PathBuf>,
        credential: impl Into<String>,
        endpoint: Url,
        field_name: impl Into<String>,
    ) -> Self {
        Self {
            file_path: file_path.into(),
            credential: credential.into(),
            endpoint,
            field_name: field_name.into(),
        }
    }

    pub fn from_config(config: &LivenessUploadConfig, file_path: impl Into<PathBuf>) -> Self {
        Self::new(
            file_path,
            config.credential.clone(),
            config.endpoint.clone(),
            config.field_name.clone(),
        )
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }
}

impl fmt::Debug for UploadRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadRequest")
            .field("file_path", &self.file_path)
            .field("credential", &"<redacted>")
            .field("endpoint", &self.endpoint.as_str())
            .field("field_name", &self.field_name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint() -> Url {
        Url::parse("https://example.test/api/face/liveness").unwrap()
    }

    #[test]
    fn config_defaults_to_face_field() {
        let config = LivenessUploadConfig::new(endpoint(), "tok123");
        assert_eq!(config.field_name, "face");

        let legacy = config.with_field_name("video");
        assert_eq!(legacy.field_name, "video");
    }

    #[test]
    fn request_from_config_copies_every_option() {
        let config = LivenessUploadConfig::new(endpoint(), "tok123").with_field_name("video");
        let request = UploadRequest::from_config(&config, "/tmp/clip.mp4");

        assert_eq!(request.file_path(), Path::new("/tmp/clip.mp4"));
        assert_eq!(request.credential, "tok123");
        assert_eq!(request.endpoint, endpoint());
        assert_eq!(request.field_name, "video");
    }

    #[test]
    fn debug_output_never_contains_the_credential() {
        let config = LivenessUploadConfig::new(endpoint(), "super-secret-token");
        let request = UploadRequest::from_config(&config, "/tmp/clip.mp4");

        assert!(!format!("{:?}", config).contains("super-secret-token"));
        assert!(!format!("{:?}", request).contains("super-secret-token"));
    }
}
