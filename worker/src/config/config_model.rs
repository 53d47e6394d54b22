use liveness::domain::value_objects::liveness_upload::{LivenessHttpConfig, LivenessUploadConfig};

#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub liveness: LivenessUploadConfig,
    pub http_client: LivenessHttpConfig,
    pub capture_queue: CaptureQueue,
}

#[derive(Debug, Clone)]
pub struct CaptureQueue {
    pub capacity: usize,
}
