pub mod liveness_upload;
