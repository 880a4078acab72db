//! # Structural Validation
//!
//! Checks a document against a compiled schema and records at most one
//! error: the first violation the validator yields. A name with no schema in
//! the registry is reported as a missing schema, never as a structural error.

use serde_json::Value;

use qgate_core::QgateError;

use crate::registry::{Schema, SchemaRegistry};

/// First-violation structural checker.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralValidator;

impl StructuralValidator {
    /// A validator; schemas carry their own compiled form.
    pub fn new() -> Self {
        Self
    }

    /// Errors for `document` against `schema`: empty if it conforms,
    /// otherwise exactly one message naming the failing location.
    pub fn validate(&self, document: &Value, schema: &Schema) -> Vec<String> {
        match schema.validator().iter_errors(document).next() {
            None => Vec::new(),
            Some(err) => {
                let violation =
                    QgateError::structural(err.instance_path.to_string(), err.to_string());
                tracing::debug!(schema = %schema.name(), "{violation}");
                vec![violation.to_string()]
            }
        }
    }

    /// Resolve `schema_name` in `registry` and validate against it.
    ///
    /// # Errors
    ///
    /// [`QgateError::SchemaNotFound`] if the registry has no such schema.
    pub fn validate_named<'r>(
        &self,
        document: &Value,
        schema_name: &str,
        registry: &'r SchemaRegistry,
    ) -> Result<(&'r Schema, Vec<String>), QgateError> {
        let schema = registry
            .get(schema_name)
            .ok_or_else(|| QgateError::SchemaNotFound(schema_name.to_string()))?;
        Ok((schema, self.validate(document, schema)))
    }
}
