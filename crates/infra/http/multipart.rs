use bytes::{BufMut, Bytes, BytesMut};
use uuid::Uuid;

pub const VIDEO_CONTENT_TYPE: &str = "video/mp4";

/// Fully materialised multipart/form-data body carrying a single video part.
///
/// The body opens with `\r\n--{boundary}` instead of `--{boundary}`. The
/// liveness endpoint has always been fed this shape, so it is kept as is.
#[derive(Debug, Clone)]
pub struct MultipartBody {
    boundary: String,
    bytes: Bytes,
}

impl MultipartBody {
    pub fn generate_boundary() -> String {
        format!("Boundary-{}", Uuid::new_v4().to_string().to_uppercase())
    }

    pub fn build(boundary: &str, field_name: &str, file_name: &str, payload: &[u8]) -> Self {
        let head = part_head(boundary, field_name, file_name);
        let tail = closing_delimiter(boundary);

        let mut buf = BytesMut::with_capacity(head.len() + payload.len() + tail.len());
        buf.put_slice(head.as_bytes());
        buf.put_slice(payload);
        buf.put_slice(tail.as_bytes());

        Self {
            boundary: boundary.to_string(),
            bytes: buf.freeze(),
        }
    }

    /// Bytes the envelope adds around the payload for these parameters.
    pub fn envelope_len(boundary: &str, field_name: &str, file_name: &str) -> usize {
        part_head(boundary, field_name, file_name).len() + closing_delimiter(boundary).len()
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }
}

fn part_head(boundary: &str, field_name: &str, file_name: &str) -> String {
    format!(
        "\r\n--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
        boundary,
        escape_quoted(field_name),
        escape_quoted(file_name),
        VIDEO_CONTENT_TYPE
    )
}

fn closing_delimiter(boundary: &str) -> String {
    format!("\r\n--{}--\r\n", boundary)
}

// Same escaping browsers apply to form-data names: a quote or line break
// would otherwise terminate the header early.
fn escape_quoted(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '"' => escaped.push_str("%22"),
            '\r' => escaped.push_str("%0D"),
            '\n' => escaped.push_str("%0A"),
            other => escaped.push(other),
        }
    }
    escaped
}
