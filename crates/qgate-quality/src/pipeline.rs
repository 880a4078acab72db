//! # Validation Pipeline
//!
//! Load → detect → structural check → quality rules → score, for a single
//! document. Every failure along the way is folded into the returned
//! [`ValidationResult`]; nothing here returns `Err` to the caller.
//!
//! ## Stages
//!
//! 1. **Load**: JSON, or YAML for `.yaml`/`.yml` files. A read or parse failure
//!    yields a rejected result carrying the [`QgateError::DocumentLoad`] text.
//! 2. **Resolve**: an explicit schema name wins; otherwise [`TypeDetector`]
//!    picks one by marker keys.
//! 3. **Structural**: a name missing from the registry yields a rejected result
//!    with [`QgateError::SchemaNotFound`] and no quality pass. Otherwise the
//!    first violation, if any, becomes the single error.
//! 4. **Quality**: [`QualityRuleEngine`] penalties and warnings.
//! 5. **Score**: [`ScoreAggregator`].

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde_json::Value;

use qgate_core::{DocumentView, QgateError, QualityPolicy, Telemetry, ValidationResult};
use qgate_schema::{SchemaRegistry, StructuralValidator, TypeDetector};

use crate::engine::QualityRuleEngine;
use crate::score::ScoreAggregator;

/// Schema name recorded when a document fails before one is resolved.
const UNRESOLVED_SCHEMA: &str = "unknown";

/// Per-document validation, shareable across threads.
#[derive(Debug)]
pub struct ValidationPipeline {
    registry: Arc<SchemaRegistry>,
    detector: TypeDetector,
    structural: StructuralValidator,
    engine: QualityRuleEngine,
    aggregator: ScoreAggregator,
    telemetry: Telemetry,
}

impl ValidationPipeline {
    /// A pipeline over `registry` with the stock rules weighted by `policy`.
    pub fn new(registry: Arc<SchemaRegistry>, policy: &QualityPolicy, telemetry: Telemetry) -> Self {
        Self {
            registry,
            detector: TypeDetector::default(),
            structural: StructuralValidator::new(),
            engine: QualityRuleEngine::new(policy),
            aggregator: ScoreAggregator::from_policy(policy),
            telemetry,
        }
    }

    /// Replace the rule engine.
    pub fn with_engine(mut self, engine: QualityRuleEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Replace the type detector.
    pub fn with_detector(mut self, detector: TypeDetector) -> Self {
        self.detector = detector;
        self
    }

    /// The registry documents are checked against.
    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// The schema name `document` will be checked against.
    pub fn resolve_schema(&self, document: &dyn DocumentView, explicit: Option<&str>) -> String {
        match explicit {
            Some(name) => name.to_string(),
            None => self.detector.detect(document).as_str().to_string(),
        }
    }

    /// Validate a document already in memory. `file_size` in the metadata is
    /// the length of its compact JSON serialization.
    pub fn validate_value(
        &self,
        id: &str,
        document: &Value,
        explicit: Option<&str>,
    ) -> ValidationResult {
        let size = serde_json::to_vec(document).map_or(0, |bytes| bytes.len() as u64);
        self.telemetry
            .in_scope(|| self.validate_loaded(id, document, explicit, size))
    }

    /// Load and validate the document at `path`.
    pub fn validate_path(&self, path: &Path, explicit: Option<&str>) -> ValidationResult {
        self.telemetry.in_scope(|| {
            let id = path.display().to_string();
            match load_document(path) {
                Ok((document, size)) => self.validate_loaded(&id, &document, explicit, size),
                Err(err) => {
                    tracing::error!("{err}");
                    ValidationResult::rejected(
                        id,
                        explicit.unwrap_or(UNRESOLVED_SCHEMA),
                        err.to_string(),
                    )
                }
            }
        })
    }

    fn validate_loaded(
        &self,
        id: &str,
        document: &Value,
        explicit: Option<&str>,
        file_size: u64,
    ) -> ValidationResult {
        let schema_name = self.resolve_schema(document, explicit);
        tracing::debug!(document = %id, schema = %schema_name, "resolved schema");

        let (schema, errors) =
            match self
                .structural
                .validate_named(document, &schema_name, &self.registry)
            {
                Ok(checked) => checked,
                Err(err) => {
                    tracing::error!(document = %id, "{err}");
                    return ValidationResult::rejected(id, schema_name, err.to_string());
                }
            };

        tracing::debug!(
            document = %id,
            schema_path = %schema.path().display(),
            errors = errors.len(),
            "structural check done"
        );

        let finding = self.engine.evaluate(document, &schema_name);
        let aggregate = self.aggregator.aggregate(&errors, finding.penalty());

        let mut metadata = BTreeMap::new();
        metadata.insert("file_size".to_string(), Value::from(file_size));
        metadata.insert(
            "data_keys".to_string(),
            Value::from(
                document
                    .entries()
                    .into_iter()
                    .map(|(key, _)| key.to_string())
                    .collect::<Vec<_>>(),
            ),
        );
        metadata.insert(
            "schema_version".to_string(),
            Value::from(schema.version().unwrap_or(UNRESOLVED_SCHEMA)),
        );

        if aggregate.is_valid {
            tracing::info!(document = %id, score = aggregate.score, "document is valid");
        } else {
            tracing::warn!(document = %id, score = aggregate.score, "document failed validation");
        }

        ValidationResult::new(
            id,
            schema_name,
            errors,
            finding.into_warnings(),
            aggregate.score,
            metadata,
        )
    }
}

/// Read and parse the document at `path`, returning it with its size in bytes.
///
/// # Errors
///
/// [`QgateError::DocumentLoad`] if the file cannot be read or does not parse.
pub fn load_document(path: &Path) -> Result<(Value, u64), QgateError> {
    let load_error = |reason: String| QgateError::DocumentLoad {
        path: path.display().to_string(),
        reason,
    };

    let bytes = std::fs::read(path).map_err(|e| load_error(e.to_string()))?;
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let document: Value = match ext {
        "yaml" | "yml" => serde_yaml::from_slice(&bytes)
            .map_err(|e| load_error(format!("invalid YAML: {e}")))?,
        _ => serde_json::from_slice(&bytes)
            .map_err(|e| load_error(format!("invalid JSON: {e}")))?,
    };
    Ok((document, bytes.len() as u64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{QualityFinding, QualityRule};
    use qgate_core::SchemaKind;
    use serde_json::json;

    fn pipeline() -> ValidationPipeline {
        let registry = SchemaRegistry::from_documents(
            [
                (
                    "agent-communication",
                    json!({
                        "$id": "https://schemas.example.org/agent-communication/v2",
                        "type": "object",
                        "required": ["message_type"]
                    }),
                ),
                ("research-analysis", json!({"type": "object"})),
            ],
            &Telemetry::silent(),
        );
        ValidationPipeline::new(
            Arc::new(registry),
            &QualityPolicy::default(),
            Telemetry::silent(),
        )
    }

    #[test]
    fn agent_message_scores_eighty_with_two_warnings() {
        let doc = json!({"message_type": "task_assignment", "requires_response": true});
        let r = pipeline().validate_value("msg", &doc, Some("agent-communication"));
        assert!(r.is_valid());
        assert_eq!(r.score(), 80.0);
        assert_eq!(r.warnings().len(), 2);
        assert_eq!(
            r.metadata()["schema_version"],
            "https://schemas.example.org/agent-communication/v2"
        );
    }

    #[test]
    fn structural_failure_costs_fifty_plus_quality() {
        let doc = json!({"requires_response": true, "security_context": {"k": "v"}});
        let r = pipeline().validate_value("msg", &doc, Some("agent-communication"));
        assert!(!r.is_valid());
        assert_eq!(r.errors().len(), 1);
        // 100 - 50 - 15 (deadline) - 10 (message type)
        assert_eq!(r.score(), 25.0);
    }

    #[test]
    fn missing_schema_is_rejected_without_quality_pass() {
        let doc = json!({"image_metadata": {}, "quality_assessment": {}, "notes": null});
        let r = pipeline().validate_value("img", &doc, None);
        assert_eq!(r.schema_name(), "image-analysis");
        assert_eq!(r.errors(), ["Schema 'image-analysis' not found"]);
        assert!(r.warnings().is_empty());
        assert_eq!(r.score(), 0.0);
    }

    #[test]
    fn fallback_detection_is_research_analysis() {
        let doc = json!({"methodology": "survey"});
        let r = pipeline().validate_value("paper", &doc, None);
        assert_eq!(r.schema_name(), "research-analysis");
        assert_eq!(r.score(), 100.0);
        assert_eq!(r.metadata()["schema_version"], "unknown");
    }

    #[test]
    fn metadata_lists_keys_in_document_order() {
        let doc: Value = serde_json::from_str(r#"{"zeta": 1, "methodology": "m"}"#).unwrap();
        let r = pipeline().validate_value("paper", &doc, None);
        assert_eq!(r.metadata()["data_keys"], json!(["zeta", "methodology"]));
        assert_eq!(
            r.metadata()["file_size"],
            json!(r#"{"zeta":1,"methodology":"m"}"#.len())
        );
    }

    #[test]
    fn custom_schema_gets_generic_check_only() {
        let registry = SchemaRegistry::from_documents(
            [("invoice", json!({"type": "object"}))],
            &Telemetry::silent(),
        );
        let validator = ValidationPipeline::new(
            Arc::new(registry),
            &QualityPolicy::default(),
            Telemetry::silent(),
        );
        let doc = json!({"total": 10, "notes": null, "lines": []});
        let r = validator.validate_value("inv", &doc, Some("invoice"));
        assert!(r.is_valid());
        assert_eq!(r.score(), 90.0);
        assert_eq!(
            r.warnings(),
            ["Empty or null field: notes", "Empty or null field: lines"]
        );
    }

    #[derive(Debug)]
    struct NoDeadlineTolerance;

    impl QualityRule for NoDeadlineTolerance {
        fn kind(&self) -> SchemaKind {
            SchemaKind::AgentCommunication
        }
        fn evaluate(&self, document: &dyn DocumentView) -> QualityFinding {
            let mut f = QualityFinding::new();
            if !document.has("deadline") {
                f.penalize(40.0, "deadline is mandatory");
            }
            f
        }
    }

    #[test]
    fn replacement_engine_is_consulted() {
        let mut engine = QualityRuleEngine::default();
        engine.register(Box::new(NoDeadlineTolerance));
        let validator = pipeline().with_engine(engine);
        let doc = json!({"message_type": "ping"});
        let r = validator.validate_value("msg", &doc, Some("agent-communication"));
        assert_eq!(r.warnings(), ["deadline is mandatory"]);
        assert_eq!(r.score(), 60.0);
    }

    #[test]
    fn replacement_detector_changes_fallback() {
        let validator = pipeline()
            .with_detector(TypeDetector::with_fallback(SchemaKind::AgentCommunication));
        let doc = json!({"title": "untyped"});
        assert_eq!(validator.resolve_schema(&doc, None), "agent-communication");
        assert_eq!(
            validator.resolve_schema(&doc, Some("research-analysis")),
            "research-analysis"
        );
        assert!(validator.registry().contains("agent-communication"));
    }

    #[test]
    fn unreadable_file_is_a_load_error() {
        let r = pipeline().validate_path(Path::new("/nonexistent/qgate/doc.json"), None);
        assert!(!r.is_valid());
        assert_eq!(r.score(), 0.0);
        assert_eq!(r.schema_name(), "unknown");
        assert!(r.errors()[0].starts_with("Failed to load document"), "{}", r.errors()[0]);
    }

    #[test]
    fn yaml_documents_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paper.yaml");
        std::fs::write(&path, "methodology: survey\nfindings: []\n").unwrap();
        let (doc, size) = load_document(&path).unwrap();
        assert_eq!(doc["methodology"], "survey");
        assert_eq!(size, std::fs::metadata(&path).unwrap().len());
    }

    #[test]
    fn malformed_json_reports_reason() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ nope").unwrap();
        let err = load_document(&path).unwrap_err();
        assert!(matches!(err, QgateError::DocumentLoad { .. }));
        assert!(err.to_string().contains("invalid JSON"), "{err}");
    }
}
