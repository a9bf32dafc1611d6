//! Main redaction engine.
//!
//! The LogFilter walks a record and replaces the value of every field whose
//! name is on the blacklist (and not on the whitelist) with [`PLACEHOLDER`].

use std::path::Path;

use lf_config::FilterConfig;
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use tracing::{debug, trace};

use crate::cycle::Ancestors;
use crate::matcher::{KeyVerdict, PatternSet};
use crate::value::{Mapping, SharedValue, Value};
use crate::Result;

/// Marker substituted for redacted values.
pub const PLACEHOLDER: &str = "*sensitive*";

/// The field redaction engine.
///
/// Configuration is fixed at construction; a filter can be shared across
/// threads and used for any number of records.
#[derive(Debug, Clone)]
pub struct LogFilter {
    /// Sensitive field-name patterns.
    blacklist: PatternSet,

    /// Override patterns, checked after the blacklist matches.
    whitelist: PatternSet,
}

impl LogFilter {
    /// Create a filter from include, exclude and whitelist pattern lists.
    ///
    /// The blacklist is the default pattern list without any entry equal to
    /// an excluded pattern, followed by the included patterns.
    pub fn new<S: AsRef<str>>(include: &[S], exclude: &[S], whitelist: &[S]) -> Self {
        let blacklist = lf_config::filter::build_blacklist(include, exclude);
        let whitelist = whitelist.iter().map(|p| p.as_ref().to_string());
        Self::from_lists(blacklist, whitelist)
    }

    /// Create a filter from a loaded configuration.
    pub fn from_config(config: &FilterConfig) -> Self {
        debug!(fingerprint = %config.fingerprint(), "Building log filter from config");
        Self::from_lists(config.blacklist(), config.whitelist_patterns.iter().cloned())
    }

    /// Resolve, load and validate `filter.json`, then build a filter from it.
    ///
    /// Uses the built-in defaults when no config file is found.
    pub fn load(cli_path: Option<&Path>) -> Result<Self> {
        let (config, source) = lf_config::load_resolved(cli_path)?;
        debug!(source = %source, "Resolved log filter config");
        Ok(Self::from_config(&config))
    }

    fn from_lists(blacklist: Vec<String>, whitelist: impl IntoIterator<Item = String>) -> Self {
        let filter = Self {
            blacklist: PatternSet::new(blacklist),
            whitelist: PatternSet::new(whitelist),
        };
        debug!(
            blacklist = filter.blacklist.len(),
            whitelist = filter.whitelist.len(),
            "Log filter configured"
        );
        filter
    }

    /// Effective blacklist patterns, in matching order.
    pub fn blacklist(&self) -> &[String] {
        self.blacklist.patterns()
    }

    pub fn whitelist(&self) -> &[String] {
        self.whitelist.patterns()
    }

    pub fn placeholder(&self) -> &'static str {
        PLACEHOLDER
    }

    pub fn is_on_blacklist(&self, key: &str) -> bool {
        self.blacklist.matches(key)
    }

    pub fn is_on_whitelist(&self, key: &str) -> bool {
        self.whitelist.matches(key)
    }

    /// Classify a field name.
    pub fn verdict(&self, key: &str) -> KeyVerdict {
        match (self.is_on_blacklist(key), self.is_on_whitelist(key)) {
            (true, false) => KeyVerdict::Sensitive,
            (true, true) => KeyVerdict::Whitelisted,
            (false, _) => KeyVerdict::Plain,
        }
    }

    /// Sanitize a record.
    ///
    /// Anything that is not a plain mapping (null, primitives, strings,
    /// sequences, errors, opaque instances) yields an empty mapping. The input
    /// is never modified; the result shares nothing with it.
    pub fn process(&self, record: &Value) -> Map<String, JsonValue> {
        let mut ancestors = Ancestors::new();
        self.process_root(record, &mut ancestors).unwrap_or_default()
    }

    /// Sanitize a record given as a JSON value.
    pub fn process_json(&self, record: &JsonValue) -> Map<String, JsonValue> {
        self.process(&Value::from(record.clone()))
    }

    /// Serialize `record` to JSON and sanitize the result.
    pub fn process_serialize<T: Serialize + ?Sized>(
        &self,
        record: &T,
    ) -> Result<Map<String, JsonValue>> {
        let json = serde_json::to_value(record)?;
        Ok(self.process(&Value::from(json)))
    }

    /// Sanitize a record and encode it as a single compact JSON line.
    pub fn process_to_string(&self, record: &Value) -> String {
        let sanitized = JsonValue::Object(self.process(record));
        serde_json::to_string(&sanitized).unwrap_or_else(|_| "{}".to_string())
    }

    fn process_root(&self, record: &Value, ancestors: &mut Ancestors) -> Option<Map<String, JsonValue>> {
        match record {
            Value::Mapping(mapping) => Some(self.filter_object(mapping, ancestors)),
            Value::Shared(node) => {
                if ancestors.back_reference(node).is_some() {
                    return None;
                }
                ancestors.enter(node);
                let result = self.process_root(&node.read(), ancestors);
                ancestors.leave();
                result
            }
            _ => None,
        }
    }

    /// Redact every field of a mapping, in insertion order.
    fn filter_object(&self, mapping: &Mapping, ancestors: &mut Ancestors) -> Map<String, JsonValue> {
        let mut out = Map::with_capacity(mapping.len());
        for (key, value) in mapping.iter() {
            ancestors.descend(key);
            let filtered = self.filter_item(key, value, ancestors);
            ancestors.ascend();
            out.insert(key.to_string(), filtered);
        }
        out
    }

    /// Apply the field policy to `value` held under `key`.
    fn filter_item(&self, key: &str, value: &Value, ancestors: &mut Ancestors) -> JsonValue {
        if self.verdict(key).is_redacted() {
            trace!(key, "Redacted sensitive field");
            return JsonValue::String(PLACEHOLDER.to_string());
        }
        self.filter_value(key, value, ancestors)
    }

    /// Policy steps after the key check: errors, mappings, JSON strings,
    /// sequences, then pass-through.
    fn filter_value(&self, key: &str, value: &Value, ancestors: &mut Ancestors) -> JsonValue {
        match value {
            Value::Shared(node) => self.filter_shared(key, node, ancestors),
            Value::Error(err) => err.to_json(),
            Value::Mapping(mapping) => JsonValue::Object(self.filter_object(mapping, ancestors)),
            Value::String(s) => match decode_json_string(s) {
                Some(decoded) => self.filter_json_string(key, decoded),
                None => JsonValue::String(s.clone()),
            },
            Value::Sequence(items) => {
                let mut out = Vec::with_capacity(items.len());
                for (idx, item) in items.iter().enumerate() {
                    ancestors.descend(idx.to_string());
                    out.push(self.filter_value(key, item, ancestors));
                    ancestors.ascend();
                }
                JsonValue::Array(out)
            }
            Value::Opaque(opaque) => opaque.state().clone(),
            Value::Null => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Number(n) => JsonValue::Number(n.clone()),
        }
    }

    fn filter_shared(&self, key: &str, node: &SharedValue, ancestors: &mut Ancestors) -> JsonValue {
        if let Some(marker) = ancestors.back_reference(node) {
            trace!(key, marker = %marker, "Broke circular reference");
            return JsonValue::String(marker);
        }

        ancestors.enter(node);
        let filtered = self.filter_value(key, &node.read(), ancestors);
        ancestors.leave();
        filtered
    }

    /// Redact a decoded JSON payload under the same key and re-encode it.
    ///
    /// The payload is a fresh tree, so it gets its own traversal state.
    fn filter_json_string(&self, key: &str, decoded: JsonValue) -> JsonValue {
        let filtered = self.filter_value(key, &Value::from(decoded), &mut Ancestors::new());
        match serde_json::to_string(&filtered) {
            Ok(encoded) => JsonValue::String(encoded),
            // Never emit the raw payload on an encoding failure.
            Err(_) => JsonValue::String(PLACEHOLDER.to_string()),
        }
    }
}

impl Default for LogFilter {
    /// Default patterns, no exclusions, no whitelist.
    fn default() -> Self {
        Self::new::<&str>(&[], &[], &[])
    }
}

/// Decode a string holding JSON; `None` means it is an ordinary string.
fn decode_json_string(s: &str) -> Option<JsonValue> {
    serde_json::from_str(s).ok()
}
