//! # qgate-quality: Quality Scoring & Batch Orchestration
//!
//! Everything downstream of schema resolution:
//!
//! - [`rules`]: one [`QualityRule`] per [`SchemaKind`], plus the generic
//!   empty-field check. Each is a pure function of the document.
//! - [`QualityRuleEngine`]: kind → rule mapping; sums penalties and
//!   concatenates warnings.
//! - [`ScoreAggregator`]: `clamp(100 − structural − quality, 0, 100)` and
//!   validity from structural errors alone.
//! - [`ValidationPipeline`]: load → detect → validate → score for one
//!   document, fail-soft.
//! - [`BatchRunner`]: many documents into one
//!   [`ValidationReport`](qgate_core::ValidationReport), in input order,
//!   sequentially or across worker threads.
//!
//! [`SchemaKind`]: qgate_core::SchemaKind

pub mod batch;
pub mod engine;
pub mod pipeline;
pub mod rules;
pub mod score;

pub use batch::{BatchOutcome, BatchRunner};
pub use engine::QualityRuleEngine;
pub use pipeline::{load_document, ValidationPipeline};
pub use rules::{QualityFinding, QualityRule};
pub use score::{AggregateScore, ScoreAggregator};
