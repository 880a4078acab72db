//! # Quality Policy
//!
//! Every penalty weight and threshold the engine applies, as configuration.
//! [`QualityPolicy::default()`] carries the stock weights; a YAML or JSON file
//! may override any subset of them.
//!
//! ```yaml
//! structural_penalty: 50
//! agent_communication:
//!   missing_security_context: 2
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::QgateError;

/// Penalty weights for the whole engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QualityPolicy {
    /// Deducted once when a document has any structural error.
    pub structural_penalty: f64,
    /// Image analysis rule weights.
    pub image_analysis: ImageAnalysisWeights,
    /// Streaming pipeline rule weights.
    pub streaming_data: StreamingDataWeights,
    /// Agent message rule weights.
    pub agent_communication: AgentCommunicationWeights,
    /// Research analysis rule weights.
    pub research_analysis: ResearchAnalysisWeights,
    /// Weights for the check applied to every document.
    pub generic: GenericWeights,
}

impl Default for QualityPolicy {
    fn default() -> Self {
        Self {
            structural_penalty: 50.0,
            image_analysis: ImageAnalysisWeights::default(),
            streaming_data: StreamingDataWeights::default(),
            agent_communication: AgentCommunicationWeights::default(),
            research_analysis: ResearchAnalysisWeights::default(),
            generic: GenericWeights::default(),
        }
    }
}

/// Weights for `image-analysis` documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImageAnalysisWeights {
    /// Key elements with confidence strictly below this are penalized.
    pub low_confidence_threshold: f64,
    /// Per low-confidence key element.
    pub low_confidence_element: f64,
    /// Medical domain with an empty findings list.
    pub medical_without_findings: f64,
}

impl Default for ImageAnalysisWeights {
    fn default() -> Self {
        Self {
            low_confidence_threshold: 0.5,
            low_confidence_element: 10.0,
            medical_without_findings: 20.0,
        }
    }
}

/// Weights for `streaming-data` pipeline configurations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StreamingDataWeights {
    /// `monitoring_configuration.metrics_collection.enabled` absent or falsy.
    pub metrics_disabled: f64,
    /// `alerting_configuration.alert_rules` absent or empty.
    pub no_alert_rules: f64,
    /// `scaling_configuration.auto_scaling.enabled` absent or falsy.
    pub auto_scaling_disabled: f64,
}

impl Default for StreamingDataWeights {
    fn default() -> Self {
        Self {
            metrics_disabled: 15.0,
            no_alert_rules: 20.0,
            auto_scaling_disabled: 10.0,
        }
    }
}

/// Weights for `agent-communication` messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AgentCommunicationWeights {
    /// `requires_response` set without a `response_deadline`.
    pub missing_deadline: f64,
    /// `message_type` outside [`message_types`](Self::message_types).
    pub invalid_message_type: f64,
    /// `security_context` absent or empty.
    pub missing_security_context: f64,
    /// Accepted values of `message_type`.
    pub message_types: Vec<String>,
}

impl Default for AgentCommunicationWeights {
    fn default() -> Self {
        Self {
            missing_deadline: 15.0,
            invalid_message_type: 10.0,
            missing_security_context: 5.0,
            message_types: [
                "task_assignment",
                "progress_update",
                "result_delivery",
                "error_report",
                "coordination_request",
                "status_check",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// Weights for `research-analysis` documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResearchAnalysisWeights {
    /// No top-level `methodology` key.
    pub missing_methodology: f64,
    /// Per finding with missing or empty evidence.
    pub uncited_finding: f64,
}

impl Default for ResearchAnalysisWeights {
    fn default() -> Self {
        Self {
            missing_methodology: 25.0,
            uncited_finding: 5.0,
        }
    }
}

/// Weights for the empty-field check every document gets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenericWeights {
    /// Per top-level field that is null or empty.
    pub empty_field: f64,
}

impl Default for GenericWeights {
    fn default() -> Self {
        Self { empty_field: 5.0 }
    }
}

impl QualityPolicy {
    /// Load a policy file. `.yaml`/`.yml` parse as YAML, anything else as JSON.
    /// Fields absent from the file keep their default weights.
    ///
    /// # Errors
    ///
    /// [`QgateError::Policy`] if the file cannot be read, does not parse, or
    /// fails [`validate`](Self::validate).
    pub fn from_path(path: &Path) -> Result<Self, QgateError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            QgateError::Policy(format!("cannot read {}: {e}", path.display()))
        })?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let policy: Self = match ext {
            "yaml" | "yml" => serde_yaml::from_str(&content).map_err(|e| {
                QgateError::Policy(format!("invalid YAML in {}: {e}", path.display()))
            })?,
            _ => serde_json::from_str(&content).map_err(|e| {
                QgateError::Policy(format!("invalid JSON in {}: {e}", path.display()))
            })?,
        };

        policy.validate()?;
        tracing::debug!(path = %path.display(), "loaded quality policy");
        Ok(policy)
    }

    /// Reject negative or non-finite weights.
    pub fn validate(&self) -> Result<(), QgateError> {
        let weights = [
            ("structural_penalty", self.structural_penalty),
            (
                "image_analysis.low_confidence_threshold",
                self.image_analysis.low_confidence_threshold,
            ),
            (
                "image_analysis.low_confidence_element",
                self.image_analysis.low_confidence_element,
            ),
            (
                "image_analysis.medical_without_findings",
                self.image_analysis.medical_without_findings,
            ),
            ("streaming_data.metrics_disabled", self.streaming_data.metrics_disabled),
            ("streaming_data.no_alert_rules", self.streaming_data.no_alert_rules),
            (
                "streaming_data.auto_scaling_disabled",
                self.streaming_data.auto_scaling_disabled,
            ),
            (
                "agent_communication.missing_deadline",
                self.agent_communication.missing_deadline,
            ),
            (
                "agent_communication.invalid_message_type",
                self.agent_communication.invalid_message_type,
            ),
            (
                "agent_communication.missing_security_context",
                self.agent_communication.missing_security_context,
            ),
            (
                "research_analysis.missing_methodology",
                self.research_analysis.missing_methodology,
            ),
            (
                "research_analysis.uncited_finding",
                self.research_analysis.uncited_finding,
            ),
            ("generic.empty_field", self.generic.empty_field),
        ];

        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(QgateError::Policy(format!(
                    "{name} must be a finite, non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights() {
        let p = QualityPolicy::default();
        assert_eq!(p.structural_penalty, 50.0);
        assert_eq!(p.image_analysis.low_confidence_element, 10.0);
        assert_eq!(p.image_analysis.medical_without_findings, 20.0);
        assert_eq!(p.streaming_data.no_alert_rules, 20.0);
        assert_eq!(p.agent_communication.missing_deadline, 15.0);
        assert_eq!(p.agent_communication.message_types.len(), 6);
        assert_eq!(p.research_analysis.missing_methodology, 25.0);
        assert_eq!(p.generic.empty_field, 5.0);
        p.validate().unwrap();
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policy.yaml");
        std::fs::write(
            &path,
            "structural_penalty: 40\nagent_communication:\n  missing_security_context: 2\n",
        )
        .unwrap();

        let p = QualityPolicy::from_path(&path).unwrap();
        assert_eq!(p.structural_penalty, 40.0);
        assert_eq!(p.agent_communication.missing_security_context, 2.0);
        assert_eq!(p.agent_communication.missing_deadline, 15.0);
        assert_eq!(p.streaming_data, StreamingDataWeights::default());
    }

    #[test]
    fn json_policy_parses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policy.json");
        std::fs::write(&path, r#"{"generic": {"empty_field": 1.5}}"#).unwrap();
        let p = QualityPolicy::from_path(&path).unwrap();
        assert_eq!(p.generic.empty_field, 1.5);
    }

    #[test]
    fn negative_weight_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policy.yaml");
        std::fs::write(&path, "generic:\n  empty_field: -1\n").unwrap();
        let err = QualityPolicy::from_path(&path).unwrap_err();
        assert!(err.to_string().contains("generic.empty_field"), "{err}");
    }

    #[test]
    fn unknown_field_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policy.yaml");
        std::fs::write(&path, "structural_penality: 10\n").unwrap();
        assert!(matches!(
            QualityPolicy::from_path(&path),
            Err(QgateError::Policy(_))
        ));
    }

    #[test]
    fn missing_file_is_policy_error() {
        let err = QualityPolicy::from_path(Path::new("/nonexistent/qgate-policy.yaml"))
            .unwrap_err();
        assert!(matches!(err, QgateError::Policy(_)));
    }
}
