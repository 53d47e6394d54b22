pub mod capture;
pub mod liveness_upload;
pub mod upload_result;
