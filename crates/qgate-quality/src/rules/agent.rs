//! Agent-to-agent messages: response deadlines, message type vocabulary,
//! and security context.

use serde_json::Value;

use qgate_core::{AgentCommunicationWeights, DocumentView, SchemaKind};

use super::{QualityFinding, QualityRule};

/// Deadline, message type and security checks for agent messages.
#[derive(Debug, Clone, Default)]
pub struct AgentCommunicationRule {
    weights: AgentCommunicationWeights,
}

impl AgentCommunicationRule {
    /// A rule applying `weights`.
    pub fn new(weights: AgentCommunicationWeights) -> Self {
        Self { weights }
    }
}

impl QualityRule for AgentCommunicationRule {
    fn kind(&self) -> SchemaKind {
        SchemaKind::AgentCommunication
    }

    fn evaluate(&self, document: &dyn DocumentView) -> QualityFinding {
        let mut finding = QualityFinding::new();

        if document.truthy_at(&["requires_response"]) && !document.truthy_at(&["response_deadline"])
        {
            finding.penalize(
                self.weights.missing_deadline,
                "Response required but no deadline specified",
            );
        }

        let message_type = document.lookup(&["message_type"]);
        let accepted = message_type
            .and_then(Value::as_str)
            .is_some_and(|t| self.weights.message_types.iter().any(|m| m == t));
        if !accepted {
            let shown = match message_type {
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => "null".to_string(),
            };
            finding.penalize(
                self.weights.invalid_message_type,
                format!("Invalid message type: {shown}"),
            );
        }

        if !document.truthy_at(&["security_context"]) {
            finding.penalize(
                self.weights.missing_security_context,
                "No security context specified for agent communication",
            );
        }

        finding
    }
}
