//! Sample identity and reference metadata types

use serde_json::{Value, json};
use thiserror::Error;

/// Errors raised while parsing a sample identity from a slide path
#[derive(Debug, Error)]
pub enum IdentifierError {
    #[error("Slide path has too few '/' segments (expected at least 4): {0}")]
    TooFewSegments(String),

    #[error("Specimen id has too few hyphen parts (expected at least 3): {0}")]
    MalformedSpecimenId(String),
}

/// Identity of one sample, parsed from the slide's download path.
///
/// The download tooling lays slides out as
/// `<root>/<general_cancer>/<gdc_id>/<specimen>.<ext>`, so the path itself
/// carries everything needed to label the upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleIdentifier {
    /// General cancer label (path segment 1)
    pub general_cancer: String,
    /// GDC site identifier (path segment 2)
    pub gdc_id: String,
    /// Full specimen identifier (path segment 3, up to the first '.')
    pub tcga_full_id: String,
    /// Shortened specimen identifier (first three hyphen parts of the full id)
    pub tcga_id: String,
}

impl SampleIdentifier {
    /// Parse a sample identity out of a slide path.
    ///
    /// Paths that do not follow the download layout are rejected; there is
    /// no lenient fallback.
    pub fn parse(slide_path: &str) -> Result<Self, IdentifierError> {
        let segments: Vec<&str> = slide_path.split('/').collect();
        if segments.len() < 4 {
            return Err(IdentifierError::TooFewSegments(slide_path.to_string()));
        }

        let tcga_full_id = segments[3]
            .split('.')
            .next()
            .unwrap_or_default()
            .to_string();

        let parts: Vec<&str> = tcga_full_id.split('-').collect();
        if parts.len() < 3 {
            return Err(IdentifierError::MalformedSpecimenId(tcga_full_id));
        }

        Ok(Self {
            general_cancer: segments[1].to_string(),
            gdc_id: segments[2].to_string(),
            tcga_id: format!("{}-{}-{}", parts[0], parts[1], parts[2]),
            tcga_full_id,
        })
    }

    /// Flat metadata record attached verbatim to the upload
    pub fn to_metadata(&self) -> Value {
        json!({
            "general_cancer": self.general_cancer,
            "gdc_id": self.gdc_id,
            "tcga_full_id": self.tcga_full_id,
            "tcga_id": self.tcga_id,
        })
    }
}

/// One matching row of the reference table.
///
/// Each field may hold several semicolon-delimited values. The disease type
/// rides along for the metadata consumer but never becomes a label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceRow {
    pub primary_site: String,
    pub project_disease_type: String,
    pub project_name: String,
    pub tcga_cancer_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_download_path() {
        let id = SampleIdentifier::parse("cancer_a/site_1/GDC123/TCGA-AB-1234-01Z.svs").unwrap();
        assert_eq!(id.general_cancer, "cancer_a");
        assert_eq!(id.gdc_id, "site_1");
        assert_eq!(id.tcga_full_id, "TCGA-AB-1234-01Z");
        assert_eq!(id.tcga_id, "TCGA-AB-1234");
    }

    #[test]
    fn test_parse_keeps_only_first_three_hyphen_parts() {
        let id =
            SampleIdentifier::parse("data/brca/7a9f/TCGA-E2-A14P-01Z-00-DX1.svs").unwrap();
        assert_eq!(id.tcga_id, "TCGA-E2-A14P");
        assert_eq!(id.tcga_full_id, "TCGA-E2-A14P-01Z-00-DX1");
    }

    #[test]
    fn test_parse_rejects_short_paths() {
        let err = SampleIdentifier::parse("brca/TCGA-AB-1234.svs").unwrap_err();
        assert!(matches!(err, IdentifierError::TooFewSegments(_)));
    }

    #[test]
    fn test_parse_rejects_unhyphenated_specimen() {
        let err = SampleIdentifier::parse("data/brca/7a9f/slide01.svs").unwrap_err();
        assert!(matches!(err, IdentifierError::MalformedSpecimenId(_)));
    }

    #[test]
    fn test_metadata_record_fields() {
        let id = SampleIdentifier::parse("cancer_a/site_1/GDC123/TCGA-AB-1234-01Z.svs").unwrap();
        let meta = id.to_metadata();
        assert_eq!(meta["general_cancer"], "cancer_a");
        assert_eq!(meta["gdc_id"], "site_1");
        assert_eq!(meta["tcga_full_id"], "TCGA-AB-1234-01Z");
        assert_eq!(meta["tcga_id"], "TCGA-AB-1234");
    }
}
