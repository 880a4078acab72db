//! Streaming pipeline configuration: metrics, alerting, autoscaling.

use qgate_core::{DocumentView, SchemaKind, StreamingDataWeights};

use super::{QualityFinding, QualityRule};

/// Metrics, alerting and autoscaling checks for streaming pipelines.
#[derive(Debug, Clone, Default)]
pub struct StreamingDataRule {
    weights: StreamingDataWeights,
}

impl StreamingDataRule {
    /// A rule applying `weights`.
    pub fn new(weights: StreamingDataWeights) -> Self {
        Self { weights }
    }
}

impl QualityRule for StreamingDataRule {
    fn kind(&self) -> SchemaKind {
        SchemaKind::StreamingData
    }

    fn evaluate(&self, document: &dyn DocumentView) -> QualityFinding {
        let mut finding = QualityFinding::new();

        if !document.truthy_at(&["monitoring_configuration", "metrics_collection", "enabled"]) {
            finding.penalize(
                self.weights.metrics_disabled,
                "Metrics collection not enabled for streaming pipeline",
            );
        }

        if !document.truthy_at(&["alerting_configuration", "alert_rules"]) {
            finding.penalize(
                self.weights.no_alert_rules,
                "No alert rules configured for streaming pipeline",
            );
        }

        if !document.truthy_at(&["scaling_configuration", "auto_scaling", "enabled"]) {
            finding.penalize(
                self.weights.auto_scaling_disabled,
                "Auto-scaling not enabled for streaming pipeline",
            );
        }

        finding
    }
}
