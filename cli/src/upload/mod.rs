//! Upload of scaled images to the visual-recognition service
//!
//! This module provides:
//! - `UploadClient` holding the HTTP client, endpoint and credentials
//! - Wire types for the post-inputs request and its status response

mod client;
mod types;

pub use client::UploadClient;
pub use types::{SUCCESS_CODE, UploadError};
