//! # Validation Results and Reports
//!
//! [`ValidationResult`] is the outcome for one document; [`ValidationReport`]
//! is derived from an ordered sequence of them. Both are built once and only
//! read afterwards, so their fields are private behind accessors.
//!
//! ## Invariants
//!
//! - `is_valid == errors.is_empty()`. Warnings never affect validity.
//! - `score ∈ [0, 100]`.
//! - A report's counts and mean are computed from its results, never set.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::temporal::Timestamp;

/// Outcome of validating a single document.
///
/// Deserializing goes through [`ValidationResult::new`], so a stored
/// `is_valid` is recomputed from `errors` and the score is clamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredResult")]
pub struct ValidationResult {
    document: String,
    schema_name: String,
    is_valid: bool,
    errors: Vec<String>,
    warnings: Vec<String>,
    score: f64,
    metadata: BTreeMap<String, Value>,
}

impl ValidationResult {
    /// Assemble a result. Validity is derived from `errors` and the score is
    /// clamped into `[0, 100]`; a NaN score becomes 0.
    pub fn new(
        document: impl Into<String>,
        schema_name: impl Into<String>,
        errors: Vec<String>,
        warnings: Vec<String>,
        score: f64,
        metadata: BTreeMap<String, Value>,
    ) -> Self {
        let score = if score.is_nan() {
            0.0
        } else {
            score.clamp(0.0, 100.0)
        };
        Self {
            document: document.into(),
            schema_name: schema_name.into(),
            is_valid: errors.is_empty(),
            errors,
            warnings,
            score,
            metadata,
        }
    }

    /// A result carrying a single error, score 0 and no warnings. Used for
    /// documents that never reached the quality stage.
    pub fn rejected(
        document: impl Into<String>,
        schema_name: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self::new(
            document,
            schema_name,
            vec![error.into()],
            Vec::new(),
            0.0,
            BTreeMap::new(),
        )
    }

    /// Identity of the document (usually its path).
    pub fn document(&self) -> &str {
        &self.document
    }

    /// The schema name the document was checked against.
    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    /// True iff no structural, schema, or load errors were recorded.
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Errors in the order they were recorded.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Quality warnings in the order they were produced.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Quality score in `[0, 100]`.
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Free-form metadata (size, top-level keys, schema version).
    pub fn metadata(&self) -> &BTreeMap<String, Value> {
        &self.metadata
    }
}

/// Wire form of a [`ValidationResult`]. A stored `is_valid` is ignored.
#[derive(Deserialize)]
struct StoredResult {
    document: String,
    schema_name: String,
    #[serde(default)]
    errors: Vec<String>,
    #[serde(default)]
    warnings: Vec<String>,
    score: f64,
    #[serde(default)]
    metadata: BTreeMap<String, Value>,
}

impl From<StoredResult> for ValidationResult {
    fn from(stored: StoredResult) -> Self {
        Self::new(
            stored.document,
            stored.schema_name,
            stored.errors,
            stored.warnings,
            stored.score,
            stored.metadata,
        )
    }
}

/// Aggregate over an ordered batch of results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    timestamp: Timestamp,
    total_files: usize,
    valid_files: usize,
    invalid_files: usize,
    average_score: f64,
    validation_rate: f64,
    results: Vec<ValidationResult>,
}

impl ValidationReport {
    /// Build a report stamped with the current time.
    pub fn from_results(results: Vec<ValidationResult>) -> Self {
        Self::at(Timestamp::now(), results)
    }

    /// Build a report with an explicit timestamp.
    pub fn at(timestamp: Timestamp, results: Vec<ValidationResult>) -> Self {
        let total_files = results.len();
        let valid_files = results.iter().filter(|r| r.is_valid()).count();
        let (average_score, validation_rate) = if total_files == 0 {
            (0.0, 0.0)
        } else {
            let sum: f64 = results.iter().map(ValidationResult::score).sum();
            (
                sum / total_files as f64,
                valid_files as f64 / total_files as f64 * 100.0,
            )
        };
        Self {
            timestamp,
            total_files,
            valid_files,
            invalid_files: total_files - valid_files,
            average_score,
            validation_rate,
            results,
        }
    }

    /// When the report was produced.
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Number of results.
    pub fn total(&self) -> usize {
        self.total_files
    }

    /// Number of valid results.
    pub fn valid(&self) -> usize {
        self.valid_files
    }

    /// Number of invalid results.
    pub fn invalid(&self) -> usize {
        self.invalid_files
    }

    /// Mean score across all results; 0 for an empty batch.
    pub fn average_score(&self) -> f64 {
        self.average_score
    }

    /// Percentage of valid results; 0 for an empty batch.
    pub fn validation_rate(&self) -> f64 {
        self.validation_rate
    }

    /// Results in input order.
    pub fn results(&self) -> &[ValidationResult] {
        &self.results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(score: f64, errors: &[&str]) -> ValidationResult {
        ValidationResult::new(
            "doc.json",
            "research-analysis",
            errors.iter().map(|e| e.to_string()).collect(),
            vec!["Empty or null field: notes".to_string()],
            score,
            BTreeMap::new(),
        )
    }

    #[test]
    fn validity_ignores_warnings() {
        let r = result(40.0, &[]);
        assert!(r.is_valid());
        assert_eq!(r.warnings().len(), 1);
    }

    #[test]
    fn validity_follows_errors() {
        assert!(!result(90.0, &["Schema 'x' not found"]).is_valid());
    }

    #[test]
    fn score_is_clamped() {
        assert_eq!(result(-35.0, &[]).score(), 0.0);
        assert_eq!(result(140.0, &[]).score(), 100.0);
        assert_eq!(result(f64::NAN, &[]).score(), 0.0);
    }

    #[test]
    fn rejected_has_zero_score_and_one_error() {
        let r = ValidationResult::rejected("bad.json", "unknown", "Failed to load document");
        assert!(!r.is_valid());
        assert_eq!(r.score(), 0.0);
        assert_eq!(r.errors().len(), 1);
        assert!(r.warnings().is_empty());
    }

    #[test]
    fn report_counts_and_mean() {
        let ts = Timestamp::from_epoch_secs(0).unwrap();
        let report = ValidationReport::at(
            ts,
            vec![result(80.0, &[]), result(20.0, &["e"]), result(50.0, &[])],
        );
        assert_eq!(report.total(), 3);
        assert_eq!(report.valid(), 2);
        assert_eq!(report.invalid(), 1);
        assert!((report.average_score() - 50.0).abs() < 1e-9);
        assert!((report.validation_rate() - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(report.results()[1].score(), 20.0);
    }

    #[test]
    fn empty_report_is_all_zero() {
        let report = ValidationReport::from_results(Vec::new());
        assert_eq!(report.total(), 0);
        assert_eq!(report.average_score(), 0.0);
        assert_eq!(report.validation_rate(), 0.0);
    }

    #[test]
    fn result_serializes_field_names() {
        let v = serde_json::to_value(result(75.0, &[])).unwrap();
        assert_eq!(v["is_valid"], true);
        assert_eq!(v["schema_name"], "research-analysis");
        assert_eq!(v["score"], 75.0);
    }

    #[test]
    fn deserialized_result_recomputes_invariants() {
        let r: ValidationResult = serde_json::from_value(serde_json::json!({
            "document": "doc.json",
            "schema_name": "research-analysis",
            "is_valid": true,
            "errors": ["Schema 'x' not found"],
            "warnings": [],
            "score": 450.0,
            "metadata": {}
        }))
        .unwrap();
        assert!(!r.is_valid());
        assert_eq!(r.score(), 100.0);
        assert_eq!(r.errors(), ["Schema 'x' not found"]);
    }

    #[test]
    fn serialized_result_reads_back_unchanged() {
        let original = result(62.5, &["e"]);
        let text = serde_json::to_string(&original).unwrap();
        let back: ValidationResult = serde_json::from_str(&text).unwrap();
        assert_eq!(back, original);
    }
}
