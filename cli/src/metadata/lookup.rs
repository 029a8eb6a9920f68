//! Reference table lookup
//!
//! The reference table is a plain comma-separated file addressed by column
//! position. There is no header handling: the key column of a header line
//! simply never matches a specimen id.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use super::types::ReferenceRow;

// Positional columns of the reference table
const COL_PRIMARY_SITE: usize = 1;
const COL_DISEASE_TYPE: usize = 3;
const COL_PROJECT_NAME: usize = 4;
const COL_CANCER_TYPE: usize = 7;
const COL_MATCH_KEY: usize = 8;

/// Errors that can occur while scanning the reference table.
///
/// A lookup miss is not an error; see [`ReferenceTable::lookup`].
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Failed to read reference table {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed reference table: {0}")]
    Csv(#[from] csv::Error),
}

/// Reference table scanned from disk on every lookup.
///
/// The pipeline performs at most one lookup per run, so the re-scan costs
/// nothing worth caching.
pub struct ReferenceTable {
    path: PathBuf,
}

impl ReferenceTable {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Find the first row whose key column matches `short_id`.
    ///
    /// A miss is a valid terminal state and is reported as `Ok(None)`; only
    /// a missing or unreadable table file is an error.
    pub fn lookup(&self, short_id: &str) -> Result<Option<ReferenceRow>, LookupError> {
        let file = File::open(&self.path).map_err(|source| LookupError::Io {
            path: self.path.clone(),
            source,
        })?;
        find_match(file, short_id)
    }
}

/// Scan CSV rows for the first key-column match.
///
/// Rows too short to carry the key column are skipped.
fn find_match<R: Read>(reader: R, short_id: &str) -> Result<Option<ReferenceRow>, LookupError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    for record in csv_reader.records() {
        let record = record?;
        if record.get(COL_MATCH_KEY) != Some(short_id) {
            continue;
        }

        debug!("Matched reference row for {}", short_id);
        let field = |idx: usize| record.get(idx).unwrap_or_default().to_string();
        return Ok(Some(ReferenceRow {
            primary_site: field(COL_PRIMARY_SITE),
            project_disease_type: field(COL_DISEASE_TYPE),
            project_name: field(COL_PROJECT_NAME),
            tcga_cancer_type: field(COL_CANCER_TYPE),
        }));
    }

    Ok(None)
}
