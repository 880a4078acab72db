//! The check every document gets, whatever its schema: top-level fields
//! that are null or empty.

use serde_json::Value;

use qgate_core::{DocumentView, GenericWeights};

use super::QualityFinding;

/// Flags null or empty top-level fields.
#[derive(Debug, Clone, Default)]
pub struct GenericRule {
    weights: GenericWeights,
}

impl GenericRule {
    /// A rule applying `weights`.
    pub fn new(weights: GenericWeights) -> Self {
        Self { weights }
    }

    /// One penalty and warning per empty top-level field, in document order.
    pub fn evaluate(&self, document: &dyn DocumentView) -> QualityFinding {
        let mut finding = QualityFinding::new();
        for (key, value) in document.entries() {
            if is_empty(value) {
                finding.penalize(self.weights.empty_field, format!("Empty or null field: {key}"));
            }
        }
        finding
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}
