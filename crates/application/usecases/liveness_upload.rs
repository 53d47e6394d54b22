use std::path::PathBuf;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::domain::{
    repositories::liveness_upload::LivenessUploadClient,
    value_objects::{
        liveness_upload::{LivenessUploadConfig, UploadRequest},
        upload_result::UploadResult,
    },
};

pub struct LivenessUploadUseCase {
    client: Arc<dyn LivenessUploadClient + Send + Sync>,
    config: LivenessUploadConfig,
}

impl LivenessUploadUseCase {
    pub fn new(
        client: Arc<dyn LivenessUploadClient + Send + Sync>,
        config: LivenessUploadConfig,
    ) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &LivenessUploadConfig {
        &self.config
    }

    /// Uploads one captured clip and hands the client's outcome back untouched.
    pub async fn handle_capture(
        &self,
        file_path: PathBuf,
        cancel: CancellationToken,
    ) -> UploadResult {
        let request = UploadRequest::from_config(&self.config, file_path);
        let path = request.file_path().display().to_string();

        info!(
            path = %path,
            endpoint = %self.config.endpoint,
            field_name = %self.config.field_name,
            "liveness_upload: uploading captured clip"
        );

        let outcome = self.client.upload(request, cancel).await;

        match &outcome {
            Ok(response) if response.is_success() => info!(
                path = %path,
                status = %response.status,
                body_len = response.body.len(),
                "liveness_upload: clip accepted"
            ),
            Ok(response) => warn!(
                path = %path,
                status = %response.status,
                body = ?response.body.as_text(),
                "liveness_upload: liveness service returned non-success status"
            ),
            Err(err) => error!(
                path = %path,
                kind = %err.kind(),
                error = %err,
                "liveness_upload: upload failed"
            ),
        }

        outcome
    }
}
