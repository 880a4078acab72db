//! # Document Access
//!
//! [`DocumentView`] is the read-only interface quality rules use to inspect a
//! document: key lookup along a path, typed accessors that return `None` on
//! absence or type mismatch, and truthiness for flag-like fields.
//!
//! `serde_json::Value` implements the trait directly. Documents are never
//! mutated through it.

use serde_json::Value;

/// Read-only, absence-aware access to a structured document.
///
/// Only [`lookup`](DocumentView::lookup) and [`root`](DocumentView::root)
/// are required; every typed accessor is derived from them.
pub trait DocumentView {
    /// The whole document as a JSON value.
    fn root(&self) -> &Value;

    /// Follow `path` through nested objects. An empty path yields the root.
    fn lookup(&self, path: &[&str]) -> Option<&Value>;

    /// True if the top-level object contains `key`, whatever its value.
    fn has(&self, key: &str) -> bool {
        self.root().as_object().is_some_and(|m| m.contains_key(key))
    }

    /// String at `path`, if present and a string.
    fn str_at(&self, path: &[&str]) -> Option<&str> {
        self.lookup(path).and_then(Value::as_str)
    }

    /// Number at `path`, if present and numeric.
    fn f64_at(&self, path: &[&str]) -> Option<f64> {
        self.lookup(path).and_then(Value::as_f64)
    }

    /// Array at `path`, if present and an array.
    fn array_at(&self, path: &[&str]) -> Option<&Vec<Value>> {
        self.lookup(path).and_then(Value::as_array)
    }

    /// True if the value at `path` exists and is truthy (see [`is_truthy`]).
    fn truthy_at(&self, path: &[&str]) -> bool {
        self.lookup(path).is_some_and(is_truthy)
    }

    /// Top-level entries in document order. Empty for non-object documents.
    fn entries(&self) -> Vec<(&str, &Value)> {
        match self.root().as_object() {
            Some(map) => map.iter().map(|(k, v)| (k.as_str(), v)).collect(),
            None => Vec::new(),
        }
    }
}

impl DocumentView for Value {
    fn root(&self) -> &Value {
        self
    }

    fn lookup(&self, path: &[&str]) -> Option<&Value> {
        path.iter().try_fold(self, |node, key| node.as_object()?.get(*key))
    }
}

/// Truthiness of a JSON value.
///
/// `null`, `false`, zero, the empty string, `[]` and `{}` are false;
/// everything else is true.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
