use async_trait::async_trait;
use mockall::automock;
use tokio_util::sync::CancellationToken;

use crate::domain::value_objects::{liveness_upload::UploadRequest, upload_result::UploadResult};

#[automock]
#[async_trait]
pub trait LivenessUploadClient {
    /// Reads the clip, posts it once, and reports what happened. Never retries.
    async fn upload(&self, request: UploadRequest, cancel: CancellationToken) -> UploadResult;
}
