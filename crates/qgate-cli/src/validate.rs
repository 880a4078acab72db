//! # Validate Command
//!
//! Loads the schema registry and quality policy, resolves the documents
//! named on the command line, runs the batch, and prints the report.
//!
//! ## Exit status
//!
//! - `0`: the batch ran. Invalid documents alone do not change this.
//! - `1`: no input was given, no document matched, or `--strict` stopped
//!   at an invalid document.
//!
//! Failing to read an explicit `--policy` file is an error for the whole run.

use std::ops::ControlFlow;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use qgate_core::{QgateError, QualityPolicy, Telemetry, ValidationReport};
use qgate_quality::{BatchRunner, ValidationPipeline};
use qgate_schema::SchemaRegistry;

use crate::discover::{resolve_inputs, BATCH_PATTERN};
use crate::report::{render, RenderMode};

/// Arguments for a validation run.
#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Documents to validate: file paths, directories, or glob patterns.
    #[arg(value_name = "FILES")]
    pub files: Vec<String>,

    /// Validate every *.json file in the current directory.
    #[arg(long)]
    pub batch: bool,

    /// Directory containing the schema files.
    #[arg(long, value_name = "DIR", default_value = "../JSON-Schemas")]
    pub schema_dir: PathBuf,

    /// Validate every document against this schema instead of detecting its type.
    #[arg(long, value_name = "NAME")]
    pub schema: Option<String>,

    /// YAML or JSON file overriding the quality penalty weights.
    #[arg(long, value_name = "FILE")]
    pub policy: Option<PathBuf>,

    /// Report format.
    #[arg(long, value_enum, default_value_t = RenderMode::Text)]
    pub format: RenderMode,

    /// Generate the HTML report (same as --format html).
    #[arg(long)]
    pub report: bool,

    /// Stop at the first invalid document and exit with status 1.
    #[arg(long)]
    pub strict: bool,

    /// Number of worker threads.
    #[arg(long, value_name = "N", default_value_t = 1)]
    pub jobs: usize,
}

impl ValidateArgs {
    /// The report format after applying `--report`.
    pub fn render_mode(&self) -> RenderMode {
        if self.report {
            RenderMode::Html
        } else {
            self.format
        }
    }
}

/// What a validation run produced.
#[derive(Debug)]
pub enum Execution {
    /// Neither documents nor `--batch` were given.
    NoInput,
    /// Inputs were given but none resolved to a document.
    NoDocuments,
    /// `--strict` stopped the run at this document.
    Halted { document: String },
    /// Every document was validated.
    Completed(ValidationReport),
}

/// Run the batch described by `args` without printing anything.
///
/// # Errors
///
/// Fails only if an explicit `--policy` file cannot be loaded.
pub fn execute(args: &ValidateArgs, telemetry: &Telemetry) -> Result<Execution> {
    if args.files.is_empty() && !args.batch {
        return Ok(Execution::NoInput);
    }

    let policy = match &args.policy {
        Some(path) => QualityPolicy::from_path(path)
            .with_context(|| format!("failed to load quality policy {}", path.display()))?,
        None => QualityPolicy::default(),
    };

    let mut inputs = args.files.clone();
    if args.batch {
        inputs.push(BATCH_PATTERN.to_string());
    }
    let documents = telemetry.in_scope(|| resolve_inputs(&inputs));
    if documents.is_empty() {
        return Ok(Execution::NoDocuments);
    }

    let registry = SchemaRegistry::load(&args.schema_dir, telemetry);
    let pipeline = ValidationPipeline::new(Arc::new(registry), &policy, telemetry.clone());
    telemetry.in_scope(|| {
        let registry = pipeline.registry();
        tracing::info!(
            schema_count = registry.len(),
            skipped = registry.skipped().len(),
            dir = %registry.schema_dir().display(),
            "loaded schema registry"
        );
    });
    let mut runner = BatchRunner::new(Arc::new(pipeline), telemetry.clone());
    if let Some(schema) = &args.schema {
        runner = runner.with_schema(schema.clone());
    }

    if args.strict {
        let outcome = runner.run_until(&documents, |result| {
            if result.is_valid() {
                ControlFlow::Continue(())
            } else {
                ControlFlow::Break(())
            }
        });
        if let Some(index) = outcome.halted_at {
            let document = outcome
                .report
                .results()
                .get(index)
                .map(|r| r.document().to_string())
                .unwrap_or_default();
            return Ok(Execution::Halted { document });
        }
        return Ok(Execution::Completed(outcome.report));
    }

    let report = if args.jobs > 1 {
        runner.run_parallel(&documents, args.jobs)
    } else {
        runner.run(&documents)
    };
    Ok(Execution::Completed(report))
}

/// Execute the validate command, printing the report to stdout.
///
/// Returns the process exit code.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let telemetry = Telemetry::global();
    match execute(args, &telemetry)? {
        Execution::NoInput => {
            let err = QgateError::Invocation("no documents given".to_string());
            tracing::error!("{err}");
            eprintln!("Usage: qgate [OPTIONS] [FILES]...   (or --batch)");
            eprintln!("Try 'qgate --help' for more information.");
            Ok(1)
        }
        Execution::NoDocuments => {
            tracing::error!("no documents matched the given inputs");
            Ok(1)
        }
        Execution::Halted { document } => {
            eprintln!("FAIL: {document} failed validation");
            Ok(1)
        }
        Execution::Completed(report) => {
            let rendered =
                render(&report, args.render_mode()).context("failed to render report")?;
            print!("{rendered}");
            Ok(0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn args(schema_dir: &Path, files: Vec<String>) -> ValidateArgs {
        ValidateArgs {
            files,
            batch: false,
            schema_dir: schema_dir.to_path_buf(),
            schema: None,
            policy: None,
            format: RenderMode::Text,
            report: false,
            strict: false,
            jobs: 1,
        }
    }

    fn write(dir: &Path, name: &str, body: &str) -> String {
        let path = dir.join(name);
        std::fs::write(&path, body).unwrap();
        path.display().to_string()
    }

    fn setup() -> (tempfile::TempDir, tempfile::TempDir) {
        let schemas = tempfile::tempdir().unwrap();
        write(
            schemas.path(),
            "research-analysis.json",
            r#"{"type": "object", "required": ["title"]}"#,
        );
        let docs = tempfile::tempdir().unwrap();
        (schemas, docs)
    }

    #[test]
    fn no_input_is_reported() {
        let (schemas, _docs) = setup();
        let run = execute(&args(schemas.path(), Vec::new()), &Telemetry::silent()).unwrap();
        assert!(matches!(run, Execution::NoInput));
        assert_eq!(run_validate(&args(schemas.path(), Vec::new())).unwrap(), 1);
    }

    #[test]
    fn unmatched_inputs_yield_no_documents() {
        let (schemas, docs) = setup();
        let missing = docs.path().join("*.json").display().to_string();
        let run = execute(&args(schemas.path(), vec![missing]), &Telemetry::silent()).unwrap();
        assert!(matches!(run, Execution::NoDocuments));
    }

    #[test]
    fn completed_run_includes_invalid_documents() {
        let (schemas, docs) = setup();
        let files = vec![
            write(docs.path(), "a.json", r#"{"title": "a", "methodology": "m"}"#),
            write(docs.path(), "b.json", r#"{"methodology": "m"}"#),
        ];
        let report = match execute(&args(schemas.path(), files), &Telemetry::silent()).unwrap() {
            Execution::Completed(report) => report,
            other => panic!("expected a completed run, got {other:?}"),
        };
        assert_eq!(report.total(), 2);
        assert_eq!(report.invalid(), 1);
    }

    #[test]
    fn strict_halts_on_first_invalid() {
        let (schemas, docs) = setup();
        let files = vec![
            write(docs.path(), "a.json", r#"{"title": "a"}"#),
            write(docs.path(), "b.json", "{ broken"),
            write(docs.path(), "c.json", r#"{"title": "c"}"#),
        ];
        let mut a = args(schemas.path(), files.clone());
        a.strict = true;
        let run = execute(&a, &Telemetry::silent()).unwrap();
        match run {
            Execution::Halted { document } => assert_eq!(document, files[1]),
            other => panic!("expected halt, got {other:?}"),
        }
    }

    #[test]
    fn strict_with_all_valid_completes() {
        let (schemas, docs) = setup();
        let files = vec![write(docs.path(), "a.json", r#"{"title": "a"}"#)];
        let mut a = args(schemas.path(), files);
        a.strict = true;
        assert!(matches!(
            execute(&a, &Telemetry::silent()).unwrap(),
            Execution::Completed(_)
        ));
    }

    #[test]
    fn policy_file_changes_scores() {
        let (schemas, docs) = setup();
        let policy = write(docs.path(), "policy.yaml", "research_analysis:\n  missing_methodology: 5\n");
        let files = vec![write(docs.path(), "a.json", r#"{"title": "a"}"#)];
        let mut a = args(schemas.path(), files);
        a.policy = Some(PathBuf::from(policy));
        let Execution::Completed(report) = execute(&a, &Telemetry::silent()).unwrap() else {
            panic!("expected a completed run");
        };
        assert_eq!(report.results()[0].score(), 95.0);
    }

    #[test]
    fn unreadable_policy_is_an_error() {
        let (schemas, docs) = setup();
        let files = vec![write(docs.path(), "a.json", r#"{"title": "a"}"#)];
        let mut a = args(schemas.path(), files);
        a.policy = Some(docs.path().join("missing.yaml"));
        let err = execute(&a, &Telemetry::silent()).unwrap_err();
        assert!(format!("{err:#}").contains("failed to load quality policy"), "{err:#}");
    }

    #[test]
    fn parallel_jobs_preserve_order() {
        let (schemas, docs) = setup();
        let files: Vec<String> = (0..6)
            .map(|i| write(docs.path(), &format!("{i}.json"), r#"{"title": "t"}"#))
            .collect();
        let mut a = args(schemas.path(), files.clone());
        a.jobs = 4;
        let Execution::Completed(report) = execute(&a, &Telemetry::silent()).unwrap() else {
            panic!("expected a completed run");
        };
        let order: Vec<&str> = report.results().iter().map(|r| r.document()).collect();
        assert_eq!(order, files.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn report_flag_selects_html() {
        let (schemas, _docs) = setup();
        let mut a = args(schemas.path(), Vec::new());
        assert_eq!(a.render_mode(), RenderMode::Text);
        a.format = RenderMode::Json;
        assert_eq!(a.render_mode(), RenderMode::Json);
        a.report = true;
        assert_eq!(a.render_mode(), RenderMode::Html);
    }
}
