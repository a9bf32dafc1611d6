//! Field-name redaction engine for structured log records.
//!
//! This crate provides a single, reusable engine that a logging pipeline
//! runs every record through immediately before writing it out. Fields whose
//! name looks sensitive are replaced by a fixed placeholder; everything else
//! is passed through.
//!
//! # Key Features
//!
//! - **Name-based matching**: keys are matched case-insensitively as substrings
//!   against a blacklist (defaults from `lf-config`, minus exclusions, plus
//!   inclusions) and a whitelist that always wins.
//! - **Deep traversal**: nested mappings, sequences and JSON-encoded strings are
//!   redacted recursively; sequence elements inherit their parent's key.
//! - **Error normalization**: error values become plain `name`/`message`/`stack`
//!   records.
//! - **Cycle safety**: records built from shared nodes may alias themselves;
//!   back-references are replaced by a `[Circular ~...]` marker.
//! - **Never fails**: `process` always returns a mapping and never mutates its
//!   input.
//!
//! # Example
//!
//! ```
//! use lf_redact::{LogFilter, Value, PLACEHOLDER};
//! use serde_json::json;
//!
//! let filter = LogFilter::default();
//! let record = Value::from(json!({"user": "ada", "password": "hunter2"}));
//!
//! let out = filter.process(&record);
//! assert_eq!(out["user"], "ada");
//! assert_eq!(out["password"], PLACEHOLDER);
//! ```

pub mod cycle;
pub mod engine;
pub mod error;
pub mod error_value;
pub mod matcher;
pub mod value;

pub use engine::{LogFilter, PLACEHOLDER};
pub use error::{FilterError, Result};
pub use error_value::ErrorValue;
pub use matcher::{KeyVerdict, PatternSet};
pub use value::{Mapping, OpaqueValue, SharedValue, Value};
