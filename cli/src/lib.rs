//! PathFeed Pipeline Library
//!
//! This module exports the pipeline components for use in integration
//! tests and external tooling.

pub mod config;
pub mod metadata;
pub mod pipeline;
pub mod slide;
pub mod upload;

// Re-export commonly used types
pub use config::Config;
pub use pipeline::{PipelineError, run};
pub use upload::UploadClient;
