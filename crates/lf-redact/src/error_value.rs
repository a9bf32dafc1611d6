//! Normalized error values.
//!
//! An error placed in a record is emitted as a plain object with `name`,
//! `message` and `stack`, followed by any extra properties and the normalized
//! `cause`. Its contents are never scanned for sensitive field names.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error as StdError;

use serde_json::{Map, Value as JsonValue};

use crate::value::short_type_name;

/// Name given to errors reached through `source()`, whose type is erased.
const SOURCE_ERROR_NAME: &str = "Error";

/// Keys emitted by every normalized error; extra properties cannot shadow them.
const RESERVED_KEYS: &[&str] = &["name", "message", "stack", "cause"];

/// Plain-record form of a raised error.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorValue {
    pub name: String,
    pub message: String,
    pub stack: String,
    pub cause: Option<Box<ErrorValue>>,
    pub properties: Map<String, JsonValue>,
}

impl ErrorValue {
    /// Create an error value with a synthesized one-line stack.
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        let name = name.into();
        let message = message.into();
        let stack = format!("{}: {}", name, message);
        Self {
            name,
            message,
            stack,
            cause: None,
            properties: Map::new(),
        }
    }

    /// Normalize a typed error.
    ///
    /// `name` is the error's type name and `message` its `Display` output. The
    /// stack is a captured backtrace when backtraces are enabled, otherwise the
    /// `name: message` header followed by one `caused by:` line per source.
    pub fn from_error<E: StdError + 'static>(err: &E) -> Self {
        Self::from_parts(short_type_name::<E>(), err)
    }

    /// Normalize a type-erased error under an explicit name.
    pub fn from_dyn_error(name: impl Into<String>, err: &(dyn StdError + 'static)) -> Self {
        Self::from_parts(name.into(), err)
    }

    fn from_parts(name: String, err: &(dyn StdError + 'static)) -> Self {
        let message = err.to_string();
        let header = format!("{}: {}", name, message);

        let backtrace = Backtrace::capture();
        let stack = if backtrace.status() == BacktraceStatus::Captured {
            format!("{}\n{}", header, backtrace)
        } else {
            let mut stack = header;
            let mut source = err.source();
            while let Some(inner) = source {
                stack.push_str("\n    caused by: ");
                stack.push_str(&inner.to_string());
                source = inner.source();
            }
            stack
        };

        let cause = err
            .source()
            .map(|inner| Box::new(Self::from_dyn_error(SOURCE_ERROR_NAME, inner)));

        Self {
            name,
            message,
            stack,
            cause,
            properties: Map::new(),
        }
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = stack.into();
        self
    }

    pub fn with_cause(mut self, cause: ErrorValue) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Attach an extra property such as an error code.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Render as a JSON object: name, message, stack, properties, cause.
    pub fn to_json(&self) -> JsonValue {
        let mut out = Map::with_capacity(4 + self.properties.len());
        out.insert("name".to_string(), JsonValue::String(self.name.clone()));
        out.insert("message".to_string(), JsonValue::String(self.message.clone()));
        out.insert("stack".to_string(), JsonValue::String(self.stack.clone()));

        for (key, value) in &self.properties {
            if RESERVED_KEYS.contains(&key.as_str()) {
                continue;
            }
            out.insert(key.clone(), value.clone());
        }

        if let Some(cause) = &self.cause {
            out.insert("cause".to_string(), cause.to_json());
        }

        JsonValue::Object(out)
    }
}
