//! Classification concept construction

use serde::Serialize;

use super::types::{ReferenceRow, SampleIdentifier};

/// The service caps concept ids; longer tokens are cut before upload
const MAX_LABEL_LEN: usize = 31;

/// A classification concept attached to the uploaded image
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Concept {
    pub id: String,
    pub value: f32,
}

impl Concept {
    fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: 1.0,
        }
    }
}

/// Build the ordered concept list for one sample.
///
/// The general cancer label always comes first, verbatim. When a reference
/// row matched, each semicolon-delimited token of primary site, project
/// name and cancer type follows, in that field order. Tokens are not
/// de-duplicated; repeats in the table are uploaded as-is.
pub fn build_concepts(identifier: &SampleIdentifier, row: Option<&ReferenceRow>) -> Vec<Concept> {
    let mut concepts = vec![Concept::new(identifier.general_cancer.clone())];

    if let Some(row) = row {
        for field in [&row.primary_site, &row.project_name, &row.tcga_cancer_type] {
            for token in field.split(';') {
                concepts.push(Concept::new(normalize_label(token)));
            }
        }
    }

    concepts
}

/// Cap a label token and replace spaces with underscores
fn normalize_label(token: &str) -> String {
    let capped: String = token.chars().take(MAX_LABEL_LEN).collect();
    capped.replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identifier() -> SampleIdentifier {
        SampleIdentifier::parse("cancer_a/site_1/GDC123/TCGA-AB-1234-01Z.svs").unwrap()
    }

    #[test]
    fn test_miss_yields_general_cancer_only() {
        let concepts = build_concepts(&identifier(), None);
        assert_eq!(concepts.len(), 1);
        assert_eq!(concepts[0].id, "cancer_a");
        assert_eq!(concepts[0].value, 1.0);
    }

    #[test]
    fn test_field_order_and_semicolon_split() {
        let row = ReferenceRow {
            primary_site: "Kidney;Bladder".to_string(),
            project_disease_type: "Adenomas and Adenocarcinomas".to_string(),
            project_name: "Kidney Renal Clear Cell Carcinoma".to_string(),
            tcga_cancer_type: "KIRC".to_string(),
        };
        let ids: Vec<&str> = build_concepts(&identifier(), Some(&row))
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(
            ids,
            vec![
                "cancer_a",
                "Kidney",
                "Bladder",
                "Kidney_Renal_Clear_Cell_Carcino",
                "KIRC",
            ]
        );
    }

    #[test]
    fn test_disease_type_is_never_labeled() {
        let row = ReferenceRow {
            primary_site: "Breast".to_string(),
            project_disease_type: "Ductal and Lobular Neoplasms".to_string(),
            project_name: "Breast Invasive Carcinoma".to_string(),
            tcga_cancer_type: "BRCA".to_string(),
        };
        let concepts = build_concepts(&identifier(), Some(&row));
        assert!(concepts.iter().all(|c| !c.id.contains("Neoplasms")));
    }

    #[test]
    fn test_truncation_applies_per_token() {
        let row = ReferenceRow {
            primary_site: "A very long primary site name that keeps going;Short".to_string(),
            project_disease_type: String::new(),
            project_name: "P".to_string(),
            tcga_cancer_type: "C".to_string(),
        };
        let concepts = build_concepts(&identifier(), Some(&row));
        // First 31 characters of the long token, spaces replaced afterwards
        assert_eq!(concepts[1].id, "A_very_long_primary_site_name_t");
        assert_eq!(concepts[1].id.len(), 31);
        assert_eq!(concepts[2].id, "Short");
    }

    #[test]
    fn test_no_deduplication() {
        let row = ReferenceRow {
            primary_site: "BRCA".to_string(),
            project_disease_type: String::new(),
            project_name: "BRCA".to_string(),
            tcga_cancer_type: "BRCA".to_string(),
        };
        let concepts = build_concepts(&identifier(), Some(&row));
        assert_eq!(concepts.iter().filter(|c| c.id == "BRCA").count(), 3);
    }

    #[test]
    fn test_general_cancer_is_not_normalized() {
        let id = SampleIdentifier::parse(
            "root/cancer with spaces/site/TCGA-AB-1234.svs",
        )
        .unwrap();
        let concepts = build_concepts(&id, None);
        assert_eq!(concepts[0].id, "cancer with spaces");
    }

    #[test]
    fn test_normalize_label() {
        assert_eq!(normalize_label("Head and Neck"), "Head_and_Neck");
        assert_eq!(normalize_label(""), "");
        let long = "x".repeat(40);
        assert_eq!(normalize_label(&long).len(), 31);
    }
}
