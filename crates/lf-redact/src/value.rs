//! Record value model.
//!
//! A log record is a tree of [`Value`]s. Only [`Value::Mapping`] carries field
//! names, so only mappings are subject to name-based redaction. Aliasing and
//! reference cycles are expressed through [`SharedValue`] nodes.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Number, Value as JsonValue};

use crate::error_value::ErrorValue;

/// A record value.
///
/// `Clone` is deep for every variant except [`Value::Shared`], which clones
/// the handle and keeps pointing at the same node.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Sequence(Vec<Value>),
    /// Plain key-value mapping, the only shape whose keys are inspected.
    Mapping(Mapping),
    /// A raised error, rendered in normalized form.
    Error(ErrorValue),
    /// Class instance with behaviour; passed through unredacted.
    Opaque(OpaqueValue),
    /// Reference to a node that may be aliased or self-referential.
    Shared(SharedValue),
}

impl Value {
    /// Wrap `value` in a new shared node.
    pub fn shared(value: impl Into<Value>) -> Self {
        Value::Shared(SharedValue::new(value))
    }

    /// Build an opaque instance from any serializable value.
    ///
    /// The type name is recorded for diagnostics; the serialized state is what
    /// ends up in the sanitized output.
    pub fn opaque<T: Serialize>(value: &T) -> crate::Result<Self> {
        let state = serde_json::to_value(value)?;
        Ok(Value::Opaque(OpaqueValue::new(short_type_name::<T>(), state)))
    }

    /// Normalize an error into a record value.
    pub fn error<E: std::error::Error + 'static>(err: &E) -> Self {
        Value::Error(ErrorValue::from_error(err))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_mapping_mut(&mut self) -> Option<&mut Mapping> {
        match self {
            Value::Mapping(m) => Some(m),
            _ => None,
        }
    }
}

/// Insertion-ordered string-keyed mapping.
///
/// Inserting an existing key replaces its value in place, keeping the
/// original position. Lookups are hashed, so wide records stay linear to
/// build.
#[derive(Debug, Clone, Default)]
pub struct Mapping {
    entries: IndexMap<String, Value>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Insert a field, returning the previous value for that key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    /// Remove a field, keeping the order of the remaining ones.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for Mapping
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut mapping = Mapping::with_capacity(iter.size_hint().0);
        for (k, v) in iter {
            mapping.insert(k, v);
        }
        mapping
    }
}

impl IntoIterator for Mapping {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// An instance of some distinguished type.
///
/// Opaque values are never scanned for sensitive fields; only the key holding
/// them can cause redaction.
#[derive(Debug, Clone, PartialEq)]
pub struct OpaqueValue {
    type_name: String,
    state: JsonValue,
}

impl OpaqueValue {
    pub fn new(type_name: impl Into<String>, state: JsonValue) -> Self {
        Self {
            type_name: type_name.into(),
            state,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Serialized state, emitted verbatim.
    pub fn state(&self) -> &JsonValue {
        &self.state
    }
}

/// A shared, lockable record node.
///
/// Handles compare by identity. Cycles are formed by storing a handle inside
/// the node it points at; such a cycle keeps the node alive until it is
/// broken with [`SharedValue::replace`].
#[derive(Clone)]
pub struct SharedValue(Arc<RwLock<Value>>);

impl SharedValue {
    pub fn new(value: impl Into<Value>) -> Self {
        Self(Arc::new(RwLock::new(value.into())))
    }

    /// Read access. A poisoned lock still yields the last written value.
    pub fn read(&self) -> RwLockReadGuard<'_, Value> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write access. A poisoned lock still yields the last written value.
    pub fn write(&self) -> RwLockWriteGuard<'_, Value> {
        self.0.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Swap the node's value, returning the old one.
    pub fn replace(&self, value: impl Into<Value>) -> Value {
        std::mem::replace(&mut *self.write(), value.into())
    }

    /// Returns whether both handles point at the same node.
    pub fn ptr_eq(&self, other: &SharedValue) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn as_ptr(&self) -> *const RwLock<Value> {
        Arc::as_ptr(&self.0)
    }
}

impl fmt::Debug for SharedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The pointee may contain this very handle.
        f.debug_tuple("SharedValue").field(&self.as_ptr()).finish()
    }
}

/// Last path segment of a type name, without generic arguments.
pub(crate) fn short_type_name<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}

impl From<JsonValue> for Value {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(n) => Value::Number(n),
            JsonValue::String(s) => Value::String(s),
            JsonValue::Array(items) => Value::Sequence(items.into_iter().map(Value::from).collect()),
            JsonValue::Object(map) => Value::Mapping(map.into_iter().collect()),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value.into())
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(value.into())
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Number(value.into())
    }
}

impl From<f64> for Value {
    /// Non-finite floats have no JSON form and become `Null`.
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(Value::Null, Value::Number)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Sequence(value)
    }
}

impl From<Mapping> for Value {
    fn from(value: Mapping) -> Self {
        Value::Mapping(value)
    }
}

impl From<ErrorValue> for Value {
    fn from(value: ErrorValue) -> Self {
        Value::Error(value)
    }
}

impl From<OpaqueValue> for Value {
    fn from(value: OpaqueValue) -> Self {
        Value::Opaque(value)
    }
}

impl From<SharedValue> for Value {
    fn from(value: SharedValue) -> Self {
        Value::Shared(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
