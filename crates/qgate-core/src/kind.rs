//! # Schema Kinds
//!
//! The closed set of document types the engine scores. Schema names are free
//! strings at the registry boundary; they collapse into a [`SchemaKind`] only
//! where behavior depends on the type (detection and quality rules).

use serde::{Deserialize, Serialize};

/// A document type with its own detection markers and quality rules.
///
/// | Kind | Schema name |
/// |------|-------------|
/// | `ImageAnalysis` | `image-analysis` |
/// | `StreamingData` | `streaming-data` |
/// | `AgentCommunication` | `agent-communication` |
/// | `ResearchAnalysis` | `research-analysis` |
/// | `Unknown` | anything else |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchemaKind {
    /// Image analysis results.
    ImageAnalysis,
    /// Streaming pipeline configurations.
    StreamingData,
    /// Inter-agent messages.
    AgentCommunication,
    /// Research analyses with findings and evidence.
    ResearchAnalysis,
    /// A schema name with no type-specific rules.
    Unknown,
}

impl SchemaKind {
    /// The kinds that carry type-specific rules, in detection priority order.
    pub fn known() -> &'static [SchemaKind] {
        &[
            Self::ImageAnalysis,
            Self::StreamingData,
            Self::AgentCommunication,
            Self::ResearchAnalysis,
        ]
    }

    /// The schema name this kind resolves to in the registry.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ImageAnalysis => "image-analysis",
            Self::StreamingData => "streaming-data",
            Self::AgentCommunication => "agent-communication",
            Self::ResearchAnalysis => "research-analysis",
            Self::Unknown => "unknown",
        }
    }

    /// Classify a schema name. Never fails: unrecognized names are `Unknown`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "image-analysis" => Self::ImageAnalysis,
            "streaming-data" => Self::StreamingData,
            "agent-communication" => Self::AgentCommunication,
            "research-analysis" => Self::ResearchAnalysis,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
