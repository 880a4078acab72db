#![deny(missing_docs)]

//! # qgate-core: Foundational Types for the Validation Engine
//!
//! Every other `qgate-*` crate depends on this one; it depends on nothing
//! internal. It defines the vocabulary the pipeline speaks:
//!
//! - [`DocumentView`]: typed, absence-aware access to a structured document.
//!   Quality rules are written against this trait rather than against a raw
//!   JSON map.
//! - [`SchemaKind`]: the closed set of document types the engine knows how
//!   to score, plus `Unknown` for every other schema name.
//! - [`ValidationResult`] / [`ValidationReport`]: the per-document outcome
//!   and the derived batch aggregate.
//! - [`QualityPolicy`]: every penalty weight and threshold, as configuration.
//! - [`QgateError`]: the error taxonomy.
//! - [`Telemetry`]: the logging capability handed to components at
//!   construction.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `qgate-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod document;
pub mod error;
pub mod kind;
pub mod policy;
pub mod result;
pub mod telemetry;
pub mod temporal;

pub use document::{is_truthy, DocumentView};
pub use error::QgateError;
pub use kind::SchemaKind;
pub use policy::{
    AgentCommunicationWeights, GenericWeights, ImageAnalysisWeights, QualityPolicy,
    ResearchAnalysisWeights, StreamingDataWeights,
};
pub use result::{ValidationReport, ValidationResult};
pub use telemetry::Telemetry;
pub use temporal::Timestamp;
