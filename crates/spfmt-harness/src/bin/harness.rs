//! CLI entrypoint for the spfmt conformance harness.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use spfmt_core::{Argument, format_to_slice, format_to_vec};
use spfmt_harness::structured_log::{
    ArtifactIndex, LogEmitter, LogEntry, LogLevel, StreamKind, now_utc, validate_log_file,
};
use spfmt_harness::{
    ConformanceReport, FixtureArg, FixtureSet, HarnessError, TestRunner, VerificationSummary,
    fixtures,
};

/// Conformance tooling for spfmt.
#[derive(Debug, Parser)]
#[command(name = "harness")]
#[command(about = "Conformance testing harness for spfmt")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Format a template with typed arguments and print the result.
    Render {
        /// Brace template, e.g. "{:>8.2f}".
        template: String,
        /// Arguments as kind:value (i, u, f, f32, b, c, s, p).
        args: Vec<String>,
        /// Format into a fixed buffer of this many bytes.
        #[arg(long)]
        buffer_size: Option<usize>,
    },
    /// Verify the engine against fixture files.
    Verify {
        /// Directory containing fixture JSON files.
        #[arg(long)]
        fixture: PathBuf,
        /// Output report path (markdown). A JSON report and an artifact
        /// index are written next to it.
        #[arg(long)]
        report: Option<PathBuf>,
        /// JSONL log path.
        #[arg(long)]
        log: Option<PathBuf>,
        /// Timestamp recorded in the report; defaults to now.
        #[arg(long)]
        timestamp: Option<String>,
    },
    /// Check a JSONL log against the log schema.
    ValidateLog {
        /// JSONL log path.
        #[arg(long)]
        log: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Render {
            template,
            args,
            buffer_size,
        } => render(&template, &args, buffer_size)?,
        Command::Verify {
            fixture,
            report,
            log,
            timestamp,
        } => verify(&fixture, report, log, timestamp)?,
        Command::ValidateLog { log } => {
            let (lines, errors) = validate_log_file(&log)?;
            for err in &errors {
                eprintln!("{err}");
            }
            eprintln!(
                "Validated {}: lines={lines}, errors={}",
                log.display(),
                errors.len()
            );
            if !errors.is_empty() {
                let message = format!("{} schema violations in {}", errors.len(), log.display());
                return Err(message.into());
            }
        }
    }

    Ok(())
}

fn render(
    template: &str,
    raw_args: &[String],
    buffer_size: Option<usize>,
) -> Result<(), HarnessError> {
    let parsed = raw_args
        .iter()
        .map(|raw| raw.parse::<FixtureArg>())
        .collect::<Result<Vec<_>, _>>()?;
    let args: Vec<Argument<'_>> = parsed.iter().map(FixtureArg::as_argument).collect();

    let (bytes, len) = match buffer_size {
        Some(size) => {
            let mut buf = vec![0_u8; size];
            let len = format_to_slice(&mut buf, template, &args);
            buf.truncate(len.min(size.saturating_sub(1)));
            (buf, len)
        }
        None => {
            let out = format_to_vec(template, &args);
            let len = out.len();
            (out, len)
        }
    };

    println!("{}", String::from_utf8_lossy(&bytes));
    eprintln!("Rendered: stored={}, length={len}", bytes.len());
    Ok(())
}

fn verify(
    fixture: &std::path::Path,
    report: Option<PathBuf>,
    log: Option<PathBuf>,
    timestamp: Option<String>,
) -> Result<(), HarnessError> {
    eprintln!("Verifying against fixtures in {}", fixture.display());
    let mut fixture_sets = Vec::new();
    for path in fixtures::fixture_paths(fixture)? {
        match FixtureSet::from_file(&path) {
            Ok(set) => fixture_sets.push(set),
            Err(err) => eprintln!("Skipping {}: {}", path.display(), err),
        }
    }
    if fixture_sets.is_empty() {
        return Err(HarnessError::NoFixtures {
            dir: fixture.display().to_string(),
        });
    }

    let timestamp = timestamp.unwrap_or_else(now_utc);
    let run_id = format!("fixture-verify-{}", run_suffix(&timestamp));
    let mut emitter = match &log {
        Some(path) => LogEmitter::to_file(path, &run_id)?,
        None => LogEmitter::to_buffer(&run_id),
    };

    let runner = TestRunner::new("fixture-verify");
    let mut results = Vec::new();
    for set in &fixture_sets {
        results.extend(runner.run_with_log(set, &mut emitter)?);
    }

    let summary = VerificationSummary::from_results(results);
    let trace_id = emitter.next_trace_id();
    emitter.emit_entry(
        LogEntry::new(trace_id, LogLevel::Info, "verify_complete")
            .with_stream(StreamKind::Cli)
            .with_details(serde_json::json!({
                "total": summary.total,
                "passed": summary.passed,
                "failed": summary.failed,
            })),
    )?;
    emitter.flush()?;

    let report_doc = ConformanceReport {
        title: String::from("spfmt Conformance Report"),
        timestamp,
        summary,
    };

    eprintln!(
        "Verification complete: total={}, passed={}, failed={}",
        report_doc.summary.total, report_doc.summary.passed, report_doc.summary.failed
    );

    if let Some(report_path) = report {
        eprintln!("Writing report to {}", report_path.display());
        std::fs::write(&report_path, report_doc.to_markdown())?;
        let json_path = report_path.with_extension("json");
        std::fs::write(&json_path, report_doc.to_json())?;

        let mut index = ArtifactIndex::new(&run_id);
        index.add_file(&report_path, "report_markdown")?;
        index.add_file(&json_path, "report_json")?;
        if let Some(log_path) = &log {
            index.add_file(log_path, "log")?;
        }
        let index_path = report_path.with_extension("artifacts.json");
        std::fs::write(&index_path, index.to_json()?)?;
        eprintln!("Wrote artifact index to {}", index_path.display());
    }

    if !report_doc.summary.all_passed() {
        return Err(HarnessError::VerificationFailed {
            failed: report_doc.summary.failed,
            total: report_doc.summary.total,
        });
    }
    Ok(())
}

/// Digits of a timestamp, usable inside a trace id.
fn run_suffix(timestamp: &str) -> String {
    let digits: String = timestamp.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        String::from("0")
    } else {
        digits
    }
}
