//! # Batch Runner
//!
//! Drives a [`ValidationPipeline`] over an ordered list of document paths and
//! collects the results into a [`ValidationReport`]. Results always come back
//! in input order, whether the batch runs on one thread or several.
//!
//! A failing document never stops the batch by itself. Only the caller can
//! halt early, through the callback given to [`BatchRunner::run_until`];
//! documents already being validated are allowed to finish.

use std::ops::ControlFlow;
use std::path::Path;
use std::sync::Arc;
use std::thread;

use qgate_core::{Telemetry, ValidationReport, ValidationResult};

use crate::pipeline::ValidationPipeline;

/// Report from a batch that may have been stopped early.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// Results up to and including the one that halted the run.
    pub report: ValidationReport,
    /// Input index of the result that halted the run, if any.
    pub halted_at: Option<usize>,
}

/// Runs many documents through one shared pipeline.
#[derive(Debug, Clone)]
pub struct BatchRunner {
    pipeline: Arc<ValidationPipeline>,
    schema: Option<String>,
    telemetry: Telemetry,
}

impl BatchRunner {
    /// A runner that lets each document's schema be detected.
    pub fn new(pipeline: Arc<ValidationPipeline>, telemetry: Telemetry) -> Self {
        Self {
            pipeline,
            schema: None,
            telemetry,
        }
    }

    /// Check every document against `schema` instead of detecting its type.
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Validate every document in order.
    pub fn run<P: AsRef<Path>>(&self, locators: &[P]) -> ValidationReport {
        self.run_until(locators, |_| ControlFlow::Continue(()))
            .report
    }

    /// Validate documents in order, calling `on_result` after each one and
    /// stopping as soon as it returns [`ControlFlow::Break`].
    pub fn run_until<P, F>(&self, locators: &[P], mut on_result: F) -> BatchOutcome
    where
        P: AsRef<Path>,
        F: FnMut(&ValidationResult) -> ControlFlow<()>,
    {
        self.telemetry.in_scope(|| {
            tracing::info!(documents = locators.len(), "validating batch");

            let mut results = Vec::with_capacity(locators.len());
            let mut halted_at = None;
            for (index, locator) in locators.iter().enumerate() {
                let result = self
                    .pipeline
                    .validate_path(locator.as_ref(), self.schema.as_deref());
                let flow = on_result(&result);
                results.push(result);
                if flow.is_break() {
                    tracing::info!(
                        document = %locator.as_ref().display(),
                        remaining = locators.len() - index - 1,
                        "batch halted"
                    );
                    halted_at = Some(index);
                    break;
                }
            }

            let report = ValidationReport::from_results(results);
            log_summary(&report);
            BatchOutcome { report, halted_at }
        })
    }

    /// Validate documents across up to `workers` scoped threads.
    ///
    /// Locators are split into contiguous chunks, one per worker, and the
    /// per-worker results are concatenated in chunk order. A worker that
    /// panics yields a rejected result for each document in its chunk.
    pub fn run_parallel<P>(&self, locators: &[P], workers: usize) -> ValidationReport
    where
        P: AsRef<Path> + Sync,
    {
        let workers = workers.clamp(1, locators.len().max(1));
        if workers == 1 {
            return self.run(locators);
        }

        self.telemetry.in_scope(|| {
            tracing::info!(documents = locators.len(), workers, "validating batch in parallel");

            let chunk_size = locators.len().div_ceil(workers);
            let schema = self.schema.as_deref();
            let pipeline = self.pipeline.as_ref();

            let results = thread::scope(|scope| {
                let handles: Vec<_> = locators
                    .chunks(chunk_size)
                    .map(|chunk| {
                        let handle = scope.spawn(move || {
                            chunk
                                .iter()
                                .map(|p| pipeline.validate_path(p.as_ref(), schema))
                                .collect::<Vec<_>>()
                        });
                        (chunk, handle)
                    })
                    .collect();

                let mut merged = Vec::with_capacity(locators.len());
                for (chunk, handle) in handles {
                    match handle.join() {
                        Ok(chunk_results) => merged.extend(chunk_results),
                        Err(_) => {
                            tracing::error!(documents = chunk.len(), "validation worker panicked");
                            merged.extend(chunk.iter().map(|p| {
                                ValidationResult::rejected(
                                    p.as_ref().display().to_string(),
                                    schema.unwrap_or("unknown"),
                                    "validation worker panicked",
                                )
                            }));
                        }
                    }
                }
                merged
            });

            let report = ValidationReport::from_results(results);
            log_summary(&report);
            report
        })
    }
}

fn log_summary(report: &ValidationReport) {
    tracing::info!(
        total = report.total(),
        valid = report.valid(),
        invalid = report.invalid(),
        average_score = report.average_score(),
        "batch complete"
    );
}
