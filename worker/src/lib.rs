pub mod cli;
pub mod config;
pub mod liveness_uploading;
