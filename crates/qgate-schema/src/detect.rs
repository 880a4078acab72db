//! # Type Detection
//!
//! Classifies a document by marker keys when no schema is named explicitly.
//!
//! Marker sets are checked in a fixed order and the first full match wins,
//! so a document carrying both image-analysis and streaming-data markers is
//! always image-analysis. When nothing matches, the detector falls back to
//! its default kind; it never returns "no answer".

use qgate_core::{DocumentView, SchemaKind};

/// Marker keys per kind, in priority order. Every key in a set must be
/// present at the top level for the set to match.
const DETECTION_ORDER: &[(SchemaKind, &[&str])] = &[
    (SchemaKind::ImageAnalysis, &["image_metadata", "quality_assessment"]),
    (SchemaKind::StreamingData, &["stream_metadata", "data_schema"]),
    (SchemaKind::AgentCommunication, &["message_id", "sender_agent"]),
    (SchemaKind::ResearchAnalysis, &["findings", "hypothesis"]),
];

/// Marker-key classifier with a fixed priority order.
#[derive(Debug, Clone, Copy)]
pub struct TypeDetector {
    fallback: SchemaKind,
}

impl Default for TypeDetector {
    fn default() -> Self {
        Self {
            fallback: SchemaKind::ResearchAnalysis,
        }
    }
}

impl TypeDetector {
    /// A detector that returns `fallback` when no marker set matches.
    pub fn with_fallback(fallback: SchemaKind) -> Self {
        Self { fallback }
    }

    /// Classify `document`.
    pub fn detect(&self, document: &dyn DocumentView) -> SchemaKind {
        DETECTION_ORDER
            .iter()
            .find(|(_, markers)| markers.iter().all(|m| document.has(m)))
            .map(|(kind, _)| *kind)
            .unwrap_or(self.fallback)
    }
}
