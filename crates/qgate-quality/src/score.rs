//! Combines structural errors and quality penalties into a final score.

use qgate_core::QualityPolicy;

/// Score and validity for one document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregateScore {
    /// `clamp(100 - structural - quality, 0, 100)`.
    pub score: f64,
    /// True iff there were no structural errors.
    pub is_valid: bool,
}

/// Applies the structural deduction and clamps.
#[derive(Debug, Clone, Copy)]
pub struct ScoreAggregator {
    structural_penalty: f64,
}

impl Default for ScoreAggregator {
    fn default() -> Self {
        Self::from_policy(&QualityPolicy::default())
    }
}

impl ScoreAggregator {
    /// Takes the structural deduction from `policy`.
    pub fn from_policy(policy: &QualityPolicy) -> Self {
        Self {
            structural_penalty: policy.structural_penalty,
        }
    }

    /// The structural deduction is applied once, however many errors there are.
    pub fn aggregate(&self, structural_errors: &[String], quality_penalty: f64) -> AggregateScore {
        let structural = if structural_errors.is_empty() {
            0.0
        } else {
            self.structural_penalty
        };
        let raw = 100.0 - structural - quality_penalty;
        AggregateScore {
            score: if raw.is_nan() { 0.0 } else { raw.clamp(0.0, 100.0) },
            is_valid: structural_errors.is_empty(),
        }
    }
}
