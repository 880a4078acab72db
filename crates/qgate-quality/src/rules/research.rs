//! Research analyses: a methodology section and evidence behind every
//! finding.

use qgate_core::{DocumentView, ResearchAnalysisWeights, SchemaKind};

use super::{QualityFinding, QualityRule};

/// Methodology and evidence checks for research analyses.
#[derive(Debug, Clone, Default)]
pub struct ResearchAnalysisRule {
    weights: ResearchAnalysisWeights,
}

impl ResearchAnalysisRule {
    /// A rule applying `weights`.
    pub fn new(weights: ResearchAnalysisWeights) -> Self {
        Self { weights }
    }
}

impl QualityRule for ResearchAnalysisRule {
    fn kind(&self) -> SchemaKind {
        SchemaKind::ResearchAnalysis
    }

    fn evaluate(&self, document: &dyn DocumentView) -> QualityFinding {
        let mut finding = QualityFinding::new();

        // Presence is enough; an empty methodology is left to the generic check.
        if !document.has("methodology") {
            finding.penalize(
                self.weights.missing_methodology,
                "Missing methodology section in research analysis",
            );
        }

        let uncited = document
            .array_at(&["findings"])
            .map(|findings| {
                findings
                    .iter()
                    .filter(|f| !f.truthy_at(&["evidence"]))
                    .count()
            })
            .unwrap_or(0);
        if uncited > 0 {
            finding.penalize(
                self.weights.uncited_finding * uncited as f64,
                format!("{uncited} findings lack evidence citations"),
            );
        }

        finding
    }
}
