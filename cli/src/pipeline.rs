//! Single-slide pipeline: open, scale, label, upload, clean up

use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

use crate::config::Config;
use crate::metadata::{
    IdentifierError, LookupError, ReferenceTable, SampleIdentifier, build_concepts,
};
use crate::slide::{OpenedSlide, SlideError, scale_to_png};
use crate::upload::{UploadClient, UploadError};

/// Any stage failure; all are terminal for the run
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Identifier(#[from] IdentifierError),

    #[error(transparent)]
    Slide(#[from] SlideError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Upload(#[from] UploadError),
}

/// Run the pipeline for one slide path.
///
/// Stages run strictly in sequence: parse the identity from the path, open
/// the slide, write the scaled PNG, look up the reference row, build the
/// concept list, upload. The uploader removes both local files on success;
/// any failure leaves them in place and propagates out.
pub async fn run(
    config: &Config,
    client: &UploadClient,
    slide_path: &str,
) -> Result<(), PipelineError> {
    let identifier = SampleIdentifier::parse(slide_path)?;
    debug!(
        "Sample identity: general_cancer={}, gdc_id={}, tcga_id={}",
        identifier.general_cancer, identifier.gdc_id, identifier.tcga_id
    );

    let slide = OpenedSlide::open(Path::new(slide_path))?;

    let scaled_path = scale_to_png(&slide, config.scale_factor)?;

    let reference = ReferenceTable::new(&config.reference_path);
    let row = reference.lookup(&identifier.tcga_id)?;
    if row.is_none() {
        info!(
            "No reference row for {}; labeling with the general cancer value only",
            identifier.tcga_id
        );
    }

    let concepts = build_concepts(&identifier, row.as_ref());
    debug!("Built {} concepts", concepts.len());

    client
        .upload(&scaled_path, concepts, identifier.to_metadata())
        .await?;

    info!("Pipeline complete for {}", identifier.tcga_full_id);
    Ok(())
}
