//! Test execution engine.

use std::time::Instant;

use spfmt_core::{format_to_slice, format_to_vec};

use crate::FixtureCase;
use crate::diff;
use crate::fixtures::FixtureSet;
use crate::structured_log::{LogEmitter, LogEntry, LogLevel, Outcome, StreamKind};
use crate::verify::VerificationResult;

/// Runs a fixture set and collects verification results.
pub struct TestRunner {
    /// Name of the test campaign.
    pub campaign: String,
}

impl TestRunner {
    /// Create a new test runner.
    #[must_use]
    pub fn new(campaign: impl Into<String>) -> Self {
        Self {
            campaign: campaign.into(),
        }
    }

    /// Run all fixtures in a set and return results.
    pub fn run(&self, fixture_set: &FixtureSet) -> Vec<VerificationResult> {
        fixture_set.cases.iter().map(verify_case).collect()
    }

    /// Run all fixtures in a set, emitting one log entry per case.
    pub fn run_with_log(
        &self,
        fixture_set: &FixtureSet,
        log: &mut LogEmitter,
    ) -> std::io::Result<Vec<VerificationResult>> {
        let start = log.next_trace_id();
        log.emit_entry(
            LogEntry::new(start, LogLevel::Info, "fixture_set_start")
                .with_stream(StreamKind::Conformance)
                .with_details(serde_json::json!({
                    "campaign": self.campaign,
                    "family": fixture_set.family,
                    "version": fixture_set.version,
                    "cases": fixture_set.cases.len(),
                })),
        )?;

        let mut results = Vec::with_capacity(fixture_set.cases.len());
        for case in &fixture_set.cases {
            let result = verify_case(case);
            let (level, outcome) = if result.passed {
                (LogLevel::Info, Outcome::Pass)
            } else {
                (LogLevel::Error, Outcome::Fail)
            };
            let mut entry = LogEntry::new(log.next_trace_id(), level, "case_result")
                .with_stream(StreamKind::Conformance)
                .with_case(&result.case_name, &result.template)
                .with_outcome(outcome)
                .with_latency_ns(result.latency_ns)
                .with_lengths(result.expected_len, result.actual_len);
            if !result.passed {
                entry = entry.with_details(serde_json::json!({
                    "section": result.section,
                    "expected": result.expected,
                    "actual": result.actual,
                }));
            }
            log.emit_entry(entry)?;
            results.push(result);
        }
        Ok(results)
    }
}

fn verify_case(case: &FixtureCase) -> VerificationResult {
    let (actual, actual_len, latency_ns) = execute_case(case);
    let expected_len = case.expected_len();
    let passed = actual == case.expected_output && actual_len == expected_len;

    let diff = if passed {
        None
    } else if actual != case.expected_output {
        Some(diff::render_diff(&case.expected_output, &actual))
    } else {
        Some(format!(
            "output matches but length {actual_len} != expected {expected_len}\n"
        ))
    };

    VerificationResult {
        case_name: case.name.clone(),
        section: case.section.clone(),
        template: case.template.clone(),
        passed,
        expected: case.expected_output.clone(),
        actual,
        expected_len,
        actual_len,
        latency_ns,
        diff,
    }
}

/// Format one case. Returns the stored output, the logical length and the
/// time spent formatting.
fn execute_case(case: &FixtureCase) -> (String, usize, u64) {
    let args = case.arguments();
    match case.buffer_size {
        Some(size) => {
            let mut buf = vec![0_u8; size];
            let started = Instant::now();
            let len = format_to_slice(&mut buf, &case.template, &args);
            let elapsed = elapsed_ns(started);
            let stored = len.min(size.saturating_sub(1));
            let actual = String::from_utf8_lossy(&buf[..stored]).into_owned();
            (actual, len, elapsed)
        }
        None => {
            let started = Instant::now();
            let out = format_to_vec(&case.template, &args);
            let elapsed = elapsed_ns(started);
            let len = out.len();
            (String::from_utf8_lossy(&out).into_owned(), len, elapsed)
        }
    }
}

fn elapsed_ns(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_nanos()).unwrap_or(u64::MAX)
}
