//! # qgate-cli: Command-Line Front End
//!
//! Provides the `qgate` binary. The validation engine itself lives in
//! `qgate-quality`; this crate only turns arguments into document paths,
//! drives a [`BatchRunner`](qgate_quality::BatchRunner), and renders the
//! resulting report.
//!
//! ```bash
//! qgate output.json
//! qgate --batch --schema-dir ../JSON-Schemas
//! qgate --report --batch > validation_report.html
//! qgate --strict --schema agent-communication 'messages/*.json'
//! ```
//!
//! Reports go to stdout; logs go to stderr.

pub mod discover;
pub mod report;
pub mod validate;
