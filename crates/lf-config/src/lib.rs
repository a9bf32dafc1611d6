//! Logfilter configuration loading and validation.
//!
//! This crate provides:
//! - The built-in list of sensitive field-name patterns
//! - Typed Rust struct for filter.json (include / exclude / whitelist lists)
//! - Config resolution (CLI → env → XDG → system → defaults)
//! - Semantic validation and content fingerprints

pub mod defaults;
pub mod filter;
pub mod resolve;
pub mod validate;

pub use defaults::DEFAULT_SENSITIVE_PATTERNS;
pub use filter::FilterConfig;
pub use resolve::{load_resolved, resolve_config, ConfigPaths, ConfigSource};
pub use validate::{validate_config, ValidationError, ValidationResult};

/// Schema version for configuration files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";
