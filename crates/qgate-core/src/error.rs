//! # Error Hierarchy
//!
//! Structured error types for the validation engine, built with `thiserror`.
//!
//! Only [`QgateError::Invocation`] and [`QgateError::Policy`] are ever fatal,
//! and only to the process driving the engine. Every per-document condition
//! is folded into a [`ValidationResult`](crate::ValidationResult) using the
//! `Display` text of the matching variant.

use thiserror::Error;

/// Top-level error type for qgate.
#[derive(Error, Debug)]
pub enum QgateError {
    /// A document could not be read or parsed.
    #[error("Failed to load document {path}: {reason}")]
    DocumentLoad {
        /// Path or identity of the document.
        path: String,
        /// Human-readable reason for the failure.
        reason: String,
    },

    /// The resolved schema name is absent from the registry.
    #[error("Schema '{0}' not found")]
    SchemaNotFound(String),

    /// The first structural conformance failure found in a document.
    #[error("Schema validation error at {instance_path}: {message}")]
    StructuralViolation {
        /// JSON Pointer to the violating location, `(root)` for the document itself.
        instance_path: String,
        /// Description of the failed constraint.
        message: String,
    },

    /// A schema file was unreadable, unparseable, or did not compile.
    #[error("Failed to load schema {path}: {reason}")]
    SchemaLoad {
        /// Path to the schema file.
        path: String,
        /// Human-readable reason for the failure.
        reason: String,
    },

    /// The engine was invoked without any input.
    #[error("invocation error: {0}")]
    Invocation(String),

    /// The quality policy could not be loaded or is out of range.
    #[error("policy error: {0}")]
    Policy(String),
}

impl QgateError {
    /// Build a [`QgateError::StructuralViolation`], rendering an empty
    /// pointer as `(root)`.
    pub fn structural(instance_path: impl Into<String>, message: impl Into<String>) -> Self {
        let instance_path = instance_path.into();
        let instance_path = if instance_path.is_empty() {
            "(root)".to_string()
        } else {
            instance_path
        };
        Self::StructuralViolation {
            instance_path,
            message: message.into(),
        }
    }
}
