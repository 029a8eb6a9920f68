//! Sample metadata: path-derived identity, reference lookup and concept
//! construction
//!
//! This module provides:
//! - `SampleIdentifier` parsed from the slide's download path
//! - `ReferenceTable` for positional-column CSV lookups
//! - `build_concepts` assembling the ordered label set for an upload

mod labels;
mod lookup;
mod types;

pub use labels::{Concept, build_concepts};
pub use lookup::{LookupError, ReferenceTable};
pub use types::{IdentifierError, ReferenceRow, SampleIdentifier};
