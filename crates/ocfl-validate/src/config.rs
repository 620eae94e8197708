use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidateError};

/// Language used when a catalog entry lacks the configured one.
pub const DEFAULT_LANG: &str = "en";

/// Base URL cited by diagnostics that refer to the OCFL specification.
pub const DEFAULT_SPEC_URL: &str = "https://ocfl.io/1.0/spec/";

/// Configuration for a validation run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidateConfig {
    /// Preferred language for diagnostic messages.
    pub lang: String,
    /// Whether warnings appear in the textual report. They are always counted.
    pub show_warnings: bool,
    /// Accept any digest algorithm name, with any non-empty digest string.
    pub lax_digests: bool,
    /// Base URL appended to messages for codes that cite the specification.
    pub spec_url: String,
}

impl Default for ValidateConfig {
    fn default() -> Self {
        Self {
            lang: DEFAULT_LANG.to_string(),
            show_warnings: false,
            lax_digests: false,
            spec_url: DEFAULT_SPEC_URL.to_string(),
        }
    }
}

impl ValidateConfig {
    /// Parse a configuration from TOML. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| ValidateError::Config(e.to_string()))
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
