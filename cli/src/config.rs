//! Pipeline configuration
//!
//! Configuration is loaded from environment variables; command-line flags
//! override the loaded values.

use std::env;
use std::time::Duration;

/// Default divisor applied to both slide dimensions. Keeps the scaled
/// image under the service's upload size limit for typical slides.
pub const DEFAULT_SCALE_FACTOR: u32 = 25;

/// Main pipeline configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Divisor applied to both slide dimensions before upload
    pub scale_factor: u32,
    /// Path of the reference metadata table
    pub reference_path: String,
    /// Debug-level logging
    pub verbose: bool,
    /// Upload configuration
    pub upload: UploadConfig,
}

/// Upload-related configuration
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Service base URL
    pub endpoint: String,
    /// API key for the app the images are posted to
    pub api_key: String,
    /// Bound on a single upload request
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scale_factor: DEFAULT_SCALE_FACTOR,
            reference_path: "tcga_metadata.csv".to_string(),
            verbose: false,
            upload: UploadConfig::default(),
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.clarifai.com".to_string(),
            api_key: String::new(),
            request_timeout: Duration::from_secs(300),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = env::var("PATHFEED_SCALE_FACTOR")
            && let Ok(factor) = val.parse()
        {
            config.scale_factor = factor;
        }
        if let Ok(path) = env::var("PATHFEED_REFERENCE")
            && !path.is_empty()
        {
            config.reference_path = path;
        }
        if let Ok(val) = env::var("PATHFEED_VERBOSE") {
            config.verbose = val.to_lowercase() == "true" || val == "1";
        }

        // Upload config
        if let Ok(url) = env::var("PATHFEED_ENDPOINT")
            && !url.is_empty()
        {
            config.upload.endpoint = url;
        }
        if let Ok(key) = env::var("PATHFEED_API_KEY")
            && !key.is_empty()
        {
            config.upload.api_key = key;
        }
        if let Ok(val) = env::var("PATHFEED_TIMEOUT_SECS")
            && let Ok(secs) = val.parse::<u64>()
        {
            config.upload.request_timeout = Duration::from_secs(secs);
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.scale_factor, 25);
        assert_eq!(config.reference_path, "tcga_metadata.csv");
        assert!(!config.verbose);
        assert_eq!(config.upload.endpoint, "https://api.clarifai.com");
        assert_eq!(config.upload.request_timeout, Duration::from_secs(300));
    }
}
