//! Conformance testing harness for spfmt.
//!
//! This crate provides:
//! - Fixtures: JSON files pairing a template and typed arguments with the
//!   expected output
//! - Runner + verification: execute fixtures against `spfmt-core`
//! - Report generation: human-readable + machine-readable conformance reports
//! - Structured logging: JSONL run logs and an artifact index with SHA-256
//!   digests

#![forbid(unsafe_code)]

pub mod diff;
pub mod error;
pub mod fixtures;
pub mod report;
pub mod runner;
pub mod structured_log;
pub mod verify;

pub use error::HarnessError;
pub use fixtures::{FixtureArg, FixtureCase, FixtureSet};
pub use report::ConformanceReport;
pub use runner::TestRunner;
pub use verify::{VerificationResult, VerificationSummary};
