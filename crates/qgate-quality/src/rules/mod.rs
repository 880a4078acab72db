//! # Quality Rules
//!
//! A [`QualityRule`] inspects a document whose schema has already been
//! resolved and returns a [`QualityFinding`]: a non-negative penalty and the
//! warnings that explain it. Rules hold only their weights and never see
//! each other; the engine adds their findings together.

use std::fmt;

use qgate_core::{DocumentView, SchemaKind};

pub mod agent;
pub mod generic;
pub mod image;
pub mod research;
pub mod streaming;

pub use agent::AgentCommunicationRule;
pub use generic::GenericRule;
pub use image::ImageAnalysisRule;
pub use research::ResearchAnalysisRule;
pub use streaming::StreamingDataRule;

/// A type-specific quality heuristic.
pub trait QualityRule: Send + Sync + fmt::Debug {
    /// The kind this rule scores.
    fn kind(&self) -> SchemaKind;

    /// Score `document`. Must be a pure function of its input.
    fn evaluate(&self, document: &dyn DocumentView) -> QualityFinding;
}

/// Penalty and warnings produced by one or more rules.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QualityFinding {
    penalty: f64,
    warnings: Vec<String>,
}

impl QualityFinding {
    /// No penalty, no warnings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to the penalty and record `warning`.
    pub fn penalize(&mut self, amount: f64, warning: impl Into<String>) {
        debug_assert!(amount >= 0.0, "penalties are non-negative");
        self.penalty += amount;
        self.warnings.push(warning.into());
    }

    /// Append `other` after this finding.
    pub fn merge(&mut self, other: QualityFinding) {
        self.penalty += other.penalty;
        self.warnings.extend(other.warnings);
    }

    /// Total penalty.
    pub fn penalty(&self) -> f64 {
        self.penalty
    }

    /// Warnings in the order they were recorded.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Consume the finding, keeping only its warnings.
    pub fn into_warnings(self) -> Vec<String> {
        self.warnings
    }
}
