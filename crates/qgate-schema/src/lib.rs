//! # qgate-schema: Schema Registry, Detection & Structural Validation
//!
//! ## Registry (`registry`)
//!
//! [`SchemaRegistry::load`] reads every schema file in a directory once,
//! compiles it with the `jsonschema` crate, and keys it by file stem. A
//! malformed file is logged and skipped; the rest of the registry still
//! loads. The registry is immutable afterwards and safe to share across
//! threads behind an `Arc`.
//!
//! ## Detection (`detect`)
//!
//! [`TypeDetector::detect`] maps a document to a [`SchemaKind`] by marker
//! keys, checked in a fixed priority order. It always returns a kind.
//!
//! ## Structural validation (`structural`)
//!
//! [`StructuralValidator`] reports the *first* violation only. Triage needs
//! "invalid, and why" rather than an exhaustive lint.
//!
//! [`SchemaKind`]: qgate_core::SchemaKind

pub mod detect;
pub mod registry;
pub mod structural;

pub use detect::TypeDetector;
pub use registry::{Schema, SchemaRegistry};
pub use structural::StructuralValidator;
