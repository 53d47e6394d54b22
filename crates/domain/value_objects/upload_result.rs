use std::error::Error as StdError;
use std::fmt::{self, Display};

use bytes::Bytes;
use http::{HeaderMap, StatusCode};

/// Outcome of a single liveness upload.
///
/// Any HTTP response counts as success here, including 4xx and 5xx. Callers
/// that want status-based classification inspect [`LivenessResponse::status`].
pub type UploadResult = Result<LivenessResponse, UploadError>;

#[derive(Debug, Clone)]
pub struct LivenessResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: ResponseBody,
}

impl LivenessResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, raw_body: Bytes) -> Self {
        Self {
            status,
            headers,
            body: ResponseBody::from_bytes(raw_body),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Response payload, kept as text when it decodes as UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    Text(String),
    Binary(Bytes),
}

impl ResponseBody {
    pub fn from_bytes(raw: Bytes) -> Self {
        match std::str::from_utf8(&raw) {
            Ok(text) => ResponseBody::Text(text.to_owned()),
            Err(_) => ResponseBody::Binary(raw),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseBody::Text(text) => Some(text),
            ResponseBody::Binary(_) => None,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            ResponseBody::Text(text) => text.as_bytes(),
            ResponseBody::Binary(raw) => raw,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadFailureKind {
    /// Missing, unreadable or empty clip. The request never left the process.
    FileRead,
    /// No complete response was received (DNS, refused, reset, timeout, TLS).
    Transport,
    /// The caller's cancellation token fired first.
    Cancelled,
}

impl Display for UploadFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            UploadFailureKind::FileRead => "file_read",
            UploadFailureKind::Transport => "transport",
            UploadFailureKind::Cancelled => "cancelled",
        };
        write!(f, "{}", kind)
    }
}

#[derive(Debug)]
pub struct UploadError {
    kind: UploadFailureKind,
    message: String,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl UploadError {
    pub fn file_read(message: impl Into<String>) -> Self {
        Self {
            kind: UploadFailureKind::FileRead,
            message: message.into(),
            source: None,
        }
    }

    pub fn file_read_with_source(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind: UploadFailureKind::FileRead,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn transport(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind: UploadFailureKind::Transport,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn cancelled() -> Self {
        Self {
            kind: UploadFailureKind::Cancelled,
            message: "liveness upload was cancelled".to_string(),
            source: None,
        }
    }

    pub fn kind(&self) -> UploadFailureKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for UploadError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|err| err.as_ref() as &(dyn StdError + 'static))
    }
}
