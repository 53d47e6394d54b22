use std::path::PathBuf;

use tokio::sync::oneshot;

use super::upload_result::UploadResult;

/// Message a capture surface sends once it has a finished clip on disk.
#[derive(Debug)]
pub struct CapturedClip {
    pub file_path: PathBuf,
    pub reply: Option<oneshot::Sender<UploadResult>>,
}

impl CapturedClip {
    /// Clip plus the receiver its upload outcome will be delivered on.
    pub fn new(file_path: impl Into<PathBuf>) -> (Self, oneshot::Receiver<UploadResult>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                file_path: file_path.into(),
                reply: Some(tx),
            },
            rx,
        )
    }

    pub fn fire_and_forget(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            reply: None,
        }
    }
}
