//! Configuration validation errors and semantic validation.

use thiserror::Error;

use crate::defaults::is_default_pattern;
use crate::filter::FilterConfig;

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Configuration validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Semantic validation failed: {0}")]
    SemanticError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: String, actual: String },
}

impl ValidationError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ValidationError::IoError(_) => 60,
            ValidationError::ParseError(_) => 61,
            ValidationError::SemanticError(_) => 63,
            ValidationError::InvalidValue { .. } => 65,
            ValidationError::VersionMismatch { .. } => 66,
        }
    }
}

/// Validate a filter configuration semantically.
///
/// A config that passes can still be handed to the engine unchanged; the
/// engine itself accepts any lists.
pub fn validate_config(config: &FilterConfig) -> ValidationResult<()> {
    if config.schema_version != crate::CONFIG_SCHEMA_VERSION {
        return Err(ValidationError::VersionMismatch {
            expected: crate::CONFIG_SCHEMA_VERSION.to_string(),
            actual: config.schema_version.clone(),
        });
    }

    validate_patterns("include_patterns", &config.include_patterns)?;
    validate_patterns("exclude_patterns", &config.exclude_patterns)?;
    validate_patterns("whitelist_patterns", &config.whitelist_patterns)?;

    for (idx, pattern) in config.exclude_patterns.iter().enumerate() {
        if !is_default_pattern(pattern) {
            return Err(ValidationError::InvalidValue {
                field: format!("exclude_patterns[{}]", idx),
                message: format!("'{}' is not a default pattern", pattern),
            });
        }
    }

    // A whitelist entry that is a substring of every blacklist entry exempts
    // every key the blacklist could ever match.
    let blacklist: Vec<String> = config.blacklist().iter().map(|p| p.to_lowercase()).collect();
    if !blacklist.is_empty() {
        for pattern in &config.whitelist_patterns {
            let pattern = pattern.to_lowercase();
            if blacklist.iter().all(|b| b.contains(&pattern)) {
                return Err(ValidationError::SemanticError(format!(
                    "Whitelist pattern '{}' disables redaction for every sensitive field",
                    pattern
                )));
            }
        }
    }

    Ok(())
}

/// Reject empty or whitespace-only patterns.
fn validate_patterns(field: &str, patterns: &[String]) -> ValidationResult<()> {
    for (idx, pattern) in patterns.iter().enumerate() {
        if pattern.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: format!("{}[{}]", field, idx),
                message: "Pattern must not be empty".to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        validate_config(&FilterConfig::default()).unwrap();
    }

    #[test]
    fn test_rejects_empty_pattern() {
        let config = FilterConfig::new(["otp", "  "], [], []);
        let err = validate_config(&config).unwrap_err();
        match err {
            ValidationError::InvalidValue { field, .. } => {
                assert_eq!(field, "include_patterns[1]");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_unknown_exclusion() {
        let config = FilterConfig::new([], ["not_a_default"], []);
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue { .. }));
        assert_eq!(err.code(), 65);
    }

    #[test]
    fn test_rejects_version_mismatch() {
        let mut config = FilterConfig::default();
        config.schema_version = "0.9.0".to_string();
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ValidationError::VersionMismatch { .. }));
    }

    #[test]
    fn test_rejects_whitelist_covering_everything() {
        // Blacklist reduced to "password"; "PASS" exempts it.
        let exclude: Vec<&str> = crate::DEFAULT_SENSITIVE_PATTERNS
            .iter()
            .copied()
            .filter(|p| *p != "password")
            .collect();
        let config = FilterConfig::new(Vec::<&str>::new(), exclude, vec!["PASS"]);
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ValidationError::SemanticError(_)));
        assert_eq!(err.code(), 63);
    }

    #[test]
    fn test_accepts_narrow_whitelist() {
        let config = FilterConfig::new([], [], ["token_count"]);
        validate_config(&config).unwrap();
    }
}
