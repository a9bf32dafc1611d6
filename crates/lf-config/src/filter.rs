//! Filter configuration types.
//!
//! `filter.json` carries the three pattern lists a redaction engine is built
//! from. Every list is optional and defaults to empty.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;

use crate::defaults::DEFAULT_SENSITIVE_PATTERNS;
use crate::validate::ValidationError;

/// Complete filter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Extra sensitive patterns appended after the defaults.
    #[serde(default)]
    pub include_patterns: Vec<String>,

    /// Default patterns to drop (exact match against the default list).
    #[serde(default)]
    pub exclude_patterns: Vec<String>,

    /// Override patterns; a matching field is never redacted.
    #[serde(default)]
    pub whitelist_patterns: Vec<String>,
}

fn default_schema_version() -> String {
    crate::CONFIG_SCHEMA_VERSION.to_string()
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
            whitelist_patterns: Vec::new(),
        }
    }
}

impl FilterConfig {
    /// Create a config from the three pattern lists.
    pub fn new<I, E, W, S>(include: I, exclude: E, whitelist: W) -> Self
    where
        I: IntoIterator<Item = S>,
        E: IntoIterator<Item = S>,
        W: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            schema_version: default_schema_version(),
            include_patterns: include.into_iter().map(Into::into).collect(),
            exclude_patterns: exclude.into_iter().map(Into::into).collect(),
            whitelist_patterns: whitelist.into_iter().map(Into::into).collect(),
        }
    }

    /// Load config from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ValidationError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ValidationError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::parse_json(&content)
    }

    /// Parse config from a JSON string.
    pub fn parse_json(json: &str) -> Result<Self, ValidationError> {
        serde_json::from_str(json)
            .map_err(|e| ValidationError::ParseError(format!("Invalid JSON: {}", e)))
    }

    /// Save config to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), ValidationError> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ValidationError::ParseError(format!("Failed to encode: {}", e)))?;
        std::fs::write(path, content).map_err(|e| {
            ValidationError::IoError(format!("Failed to write {}: {}", path.display(), e))
        })
    }

    /// Effective blacklist: defaults minus excluded entries, then included entries.
    ///
    /// Default ordering is preserved. Exclusion is an exact, case-sensitive
    /// comparison; included patterns are appended verbatim, duplicates and all.
    pub fn blacklist(&self) -> Vec<String> {
        build_blacklist(&self.include_patterns, &self.exclude_patterns)
    }

    /// SHA-256 of the canonical JSON encoding, hex encoded.
    ///
    /// Two configs with the same lists in the same order share a fingerprint.
    pub fn fingerprint(&self) -> String {
        let canonical = serde_json::to_vec(self).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(&canonical);
        hex::encode(hasher.finalize())
    }
}

/// Compute `(DEFAULT_SENSITIVE_PATTERNS - exclude) ++ include`.
pub fn build_blacklist<S: AsRef<str>>(include: &[S], exclude: &[S]) -> Vec<String> {
    DEFAULT_SENSITIVE_PATTERNS
        .iter()
        .filter(|pattern| !exclude.iter().any(|e| e.as_ref() == **pattern))
        .map(|pattern| pattern.to_string())
        .chain(include.iter().map(|p| p.as_ref().to_string()))
        .collect()
}
