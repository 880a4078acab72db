//! Image analysis: low-confidence key elements and medical images with no
//! recorded findings.

use qgate_core::{DocumentView, ImageAnalysisWeights, SchemaKind};

use super::{QualityFinding, QualityRule};

/// Confidence and medical-findings checks for image analyses.
#[derive(Debug, Clone, Default)]
pub struct ImageAnalysisRule {
    weights: ImageAnalysisWeights,
}

impl ImageAnalysisRule {
    /// A rule applying `weights`.
    pub fn new(weights: ImageAnalysisWeights) -> Self {
        Self { weights }
    }
}

impl QualityRule for ImageAnalysisRule {
    fn kind(&self) -> SchemaKind {
        SchemaKind::ImageAnalysis
    }

    fn evaluate(&self, document: &dyn DocumentView) -> QualityFinding {
        let mut finding = QualityFinding::new();

        let elements = document
            .array_at(&["content_analysis", "key_elements"])
            .map(Vec::as_slice)
            .unwrap_or_default();
        for element in elements {
            // An element without a numeric confidence counts as zero.
            let confidence = element.f64_at(&["confidence"]).unwrap_or(0.0);
            if confidence < self.weights.low_confidence_threshold {
                let element_type = element.str_at(&["element_type"]).unwrap_or("unknown");
                finding.penalize(
                    self.weights.low_confidence_element,
                    format!("Low confidence score: {confidence} for element {element_type}"),
                );
            }
        }

        if document.str_at(&["domain_specific_analysis", "domain"]) == Some("medical")
            && !document.truthy_at(&["domain_specific_analysis", "findings"])
        {
            finding.penalize(
                self.weights.medical_without_findings,
                "No findings recorded for medical image analysis",
            );
        }

        finding
    }
}
