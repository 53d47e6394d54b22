pub mod liveness_client;
pub mod multipart;
