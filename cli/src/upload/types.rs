//! Upload wire types and error definitions

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::metadata::Concept;

/// Service status code marking a fully accepted upload
pub const SUCCESS_CODE: u32 = 10_000;

/// Errors that can occur while uploading a scaled image
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Failed to read scaled image {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Upload request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Upload rejected by service (code {code}): {description} {details}")]
    Rejected {
        code: u32,
        description: String,
        details: String,
    },

    #[error("Failed to remove local file {path:?}: {source}")]
    Cleanup {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Body of a post-inputs request: a single input carrying the image bytes,
/// the concept list and the free-form metadata bag
#[derive(Debug, Serialize)]
pub struct PostInputsRequest {
    pub inputs: Vec<Input>,
}

#[derive(Debug, Serialize)]
pub struct Input {
    pub data: InputData,
}

#[derive(Debug, Serialize)]
pub struct InputData {
    pub image: ImagePayload,
    pub concepts: Vec<Concept>,
    pub metadata: Value,
}

#[derive(Debug, Serialize)]
pub struct ImagePayload {
    pub base64: String,
}

/// Response envelope; only the status is inspected
#[derive(Debug, Deserialize)]
pub struct PostInputsResponse {
    pub status: ResponseStatus,
}

#[derive(Debug, Deserialize)]
pub struct ResponseStatus {
    pub code: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub details: String,
}

impl ResponseStatus {
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }
}
