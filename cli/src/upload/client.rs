//! Upload client for the visual-recognition service

use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::UploadConfig;
use crate::metadata::Concept;

use super::types::{
    ImagePayload, Input, InputData, PostInputsRequest, PostInputsResponse, UploadError,
};

/// Extension of the original slide files; the source is found next to the
/// scaled image during cleanup
const SOURCE_EXTENSION: &str = "svs";

/// Explicitly constructed client for the upload endpoint
pub struct UploadClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl UploadClient {
    pub fn new(config: &UploadConfig) -> Result<Self, UploadError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// Send one scaled image with its concepts and metadata.
    ///
    /// On acceptance the scaled image and the original slide next to it are
    /// removed. On any failure both files stay on disk for inspection, and
    /// the service's status details are carried in the error verbatim.
    pub async fn upload(
        &self,
        image_path: &Path,
        concepts: Vec<Concept>,
        metadata: Value,
    ) -> Result<(), UploadError> {
        let image_bytes = std::fs::read(image_path).map_err(|source| UploadError::Io {
            path: image_path.to_path_buf(),
            source,
        })?;
        debug!("Read scaled image: {} bytes", image_bytes.len());

        let body = build_request(&image_bytes, concepts, metadata);

        let url = format!("{}/v2/inputs", self.endpoint);
        info!("Uploading {:?} to {}", image_path, url);

        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, format!("Key {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        let parsed: PostInputsResponse = response.json().await?;
        if !parsed.status.is_success() {
            return Err(UploadError::Rejected {
                code: parsed.status.code,
                description: parsed.status.description,
                details: parsed.status.details,
            });
        }

        info!("Upload accepted, removing local files");
        remove_local_files(image_path)
    }
}

/// Assemble the single-input request body
fn build_request(image_bytes: &[u8], concepts: Vec<Concept>, metadata: Value) -> PostInputsRequest {
    PostInputsRequest {
        inputs: vec![Input {
            data: InputData {
                image: ImagePayload {
                    base64: BASE64.encode(image_bytes),
                },
                concepts,
                metadata,
            },
        }],
    }
}

/// Derive the source slide path from the scaled image path
fn source_path_for(image_path: &Path) -> PathBuf {
    image_path.with_extension(SOURCE_EXTENSION)
}

/// Delete the scaled image and the source slide beside it
fn remove_local_files(image_path: &Path) -> Result<(), UploadError> {
    let source_path = source_path_for(image_path);
    for path in [image_path, source_path.as_path()] {
        std::fs::remove_file(path).map_err(|source| UploadError::Cleanup {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Removed {:?}", path);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{SampleIdentifier, build_concepts};

    #[test]
    fn test_request_body_shape() {
        let identifier =
            SampleIdentifier::parse("cancer_a/site_1/GDC123/TCGA-AB-1234-01Z.svs").unwrap();
        let concepts = build_concepts(&identifier, None);
        let body = build_request(b"pixels", concepts, identifier.to_metadata());

        let json = serde_json::to_value(&body).unwrap();
        let inputs = json["inputs"].as_array().unwrap();
        assert_eq!(inputs.len(), 1);

        let data = &inputs[0]["data"];
        assert_eq!(data["image"]["base64"], BASE64.encode(b"pixels"));
        assert_eq!(data["concepts"][0]["id"], "cancer_a");
        assert_eq!(data["concepts"][0]["value"], 1.0);
        assert_eq!(data["metadata"]["tcga_id"], "TCGA-AB-1234");
    }

    #[test]
    fn test_concept_order_survives_serialization() {
        let identifier =
            SampleIdentifier::parse("cancer_a/site_1/GDC123/TCGA-AB-1234-01Z.svs").unwrap();
        let row = crate::metadata::ReferenceRow {
            primary_site: "Breast".to_string(),
            project_disease_type: "Ductal and Lobular Neoplasms".to_string(),
            project_name: "Breast Invasive Carcinoma".to_string(),
            tcga_cancer_type: "BRCA".to_string(),
        };
        let concepts = build_concepts(&identifier, Some(&row));
        let body = build_request(b"", concepts, Value::Null);

        let json = serde_json::to_value(&body).unwrap();
        let ids: Vec<&str> = json["inputs"][0]["data"]["concepts"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_str().unwrap())
            .collect();
        assert_eq!(
            ids,
            vec!["cancer_a", "Breast", "Breast_Invasive_Carcinoma", "BRCA"]
        );
    }

    #[test]
    fn test_source_path_derivation() {
        assert_eq!(
            source_path_for(Path::new("/data/brca/7a9f/TCGA-AB-1234-01Z.png")),
            PathBuf::from("/data/brca/7a9f/TCGA-AB-1234-01Z.svs")
        );
    }
}
