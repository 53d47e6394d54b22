use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{
    Client,
    header::{AUTHORIZATION, CONTENT_TYPE},
    redirect,
};
use tokio::fs;
use tokio_util::sync::CancellationToken;

use crate::domain::{
    repositories::liveness_upload::LivenessUploadClient,
    value_objects::{
        liveness_upload::{LivenessHttpConfig, UploadRequest},
        upload_result::{LivenessResponse, UploadError, UploadResult},
    },
};

use super::multipart::MultipartBody;

const FALLBACK_FILE_NAME: &str = "video.mp4";

pub struct ReqwestLivenessClient {
    http: Client,
}

impl ReqwestLivenessClient {
    pub fn new(config: LivenessHttpConfig) -> Result<Self> {
        // Redirects are not followed: one invocation means one request.
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .redirect(redirect::Policy::none())
            .build()
            .context("failed to build liveness http client")?;

        Ok(Self { http })
    }

    async fn dispatch(&self, request: &UploadRequest, body: MultipartBody) -> UploadResult {
        let response = self
            .http
            .post(request.endpoint.clone())
            .header(CONTENT_TYPE, body.content_type())
            .header(AUTHORIZATION, format!("Bearer {}", request.credential))
            .body(body.into_bytes())
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let headers = response.headers().clone();
        let raw_body = response.bytes().await.map_err(map_transport_error)?;

        Ok(LivenessResponse::new(status, headers, raw_body))
    }
}

#[async_trait]
impl LivenessUploadClient for ReqwestLivenessClient {
    async fn upload(&self, request: UploadRequest, cancel: CancellationToken) -> UploadResult {
        if cancel.is_cancelled() {
            return Err(UploadError::cancelled());
        }

        let payload = read_video(request.file_path()).await?;
        let file_name = file_name_of(request.file_path());

        let boundary = MultipartBody::generate_boundary();
        let body = MultipartBody::build(&boundary, &request.field_name, &file_name, &payload);
        drop(payload);

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(UploadError::cancelled()),
            result = self.dispatch(&request, body) => result,
        }
    }
}

async fn read_video(path: &Path) -> Result<Bytes, UploadError> {
    let bytes = fs::read(path).await.map_err(|err| {
        UploadError::file_read_with_source(
            format!("failed to read video file {}: {}", path.display(), err),
            err,
        )
    })?;

    if bytes.is_empty() {
        return Err(UploadError::file_read(format!(
            "video file {} is empty",
            path.display()
        )));
    }

    Ok(Bytes::from(bytes))
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| FALLBACK_FILE_NAME.to_string())
}

fn map_transport_error(error: reqwest::Error) -> UploadError {
    let message = if error.is_timeout() {
        format!("liveness upload timed out: {}", error)
    } else if error.is_connect() {
        format!("liveness upload connection failed: {}", error)
    } else {
        format!("liveness upload request failed: {}", error)
    };

    UploadError::transport(message, error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_is_the_path_basename() {
        assert_eq!(file_name_of(Path::new("/tmp/clip.mp4")), "clip.mp4");
        assert_eq!(file_name_of(Path::new("relative/face.MOV")), "face.MOV");
        assert_eq!(file_name_of(Path::new("/")), FALLBACK_FILE_NAME);
    }
}
