// Runs the checked-in conformance fixtures through the library runner and
// through the `harness` binary.

use std::path::{Path, PathBuf};
use std::process::Command;

use spfmt_harness::structured_log::{LogEmitter, validate_log_file};
use spfmt_harness::{FixtureSet, TestRunner, VerificationSummary, fixtures};

fn repo_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .to_path_buf()
}

fn fixture_dir() -> PathBuf {
    repo_root().join("tests/conformance/fixtures")
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("spfmt-harness-{name}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn every_fixture_case_passes() {
    let paths = fixtures::fixture_paths(&fixture_dir()).unwrap();
    assert!(!paths.is_empty(), "no fixtures under {}", fixture_dir().display());

    let runner = TestRunner::new("fixture-verify-test");
    let mut results = Vec::new();
    for path in &paths {
        let set = FixtureSet::from_file(path)
            .unwrap_or_else(|e| panic!("Invalid fixture {}: {e}", path.display()));
        results.extend(runner.run(&set));
    }

    let summary = VerificationSummary::from_results(results);
    let failures: Vec<String> = summary
        .failures()
        .map(|r| format!("{}:\n{}", r.case_name, r.diff.as_deref().unwrap_or("")))
        .collect();
    assert!(summary.all_passed(), "failing cases:\n{}", failures.join("\n"));
    assert!(summary.total >= 50);
}

#[test]
fn fixture_names_are_unique() {
    let mut seen = std::collections::HashSet::new();
    for path in fixtures::fixture_paths(&fixture_dir()).unwrap() {
        let set = FixtureSet::from_file(&path).unwrap();
        for case in &set.cases {
            assert!(seen.insert(case.name.clone()), "duplicate case {}", case.name);
        }
    }
}

#[test]
fn fixture_sets_round_trip_through_json() {
    for path in fixtures::fixture_paths(&fixture_dir()).unwrap() {
        let set = FixtureSet::from_file(&path).unwrap();
        let again = FixtureSet::from_json(&set.to_json().unwrap()).unwrap();
        assert_eq!(again.cases.len(), set.cases.len());
        for (a, b) in set.cases.iter().zip(&again.cases) {
            assert_eq!(a.args, b.args, "{}", a.name);
        }
    }
}

#[test]
fn logged_run_produces_valid_jsonl() {
    let dir = scratch_dir("log");
    let log_path = dir.join("verify.log.jsonl");
    let mut emitter = LogEmitter::to_file(&log_path, "log-test").unwrap();
    let runner = TestRunner::new("log-test");
    let mut cases = 0;
    for path in fixtures::fixture_paths(&fixture_dir()).unwrap() {
        let set = FixtureSet::from_file(&path).unwrap();
        cases += set.cases.len();
        runner.run_with_log(&set, &mut emitter).unwrap();
    }
    emitter.flush().unwrap();

    let (lines, errors) = validate_log_file(&log_path).unwrap();
    assert!(errors.is_empty(), "{errors:?}");
    assert!(lines > cases);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn cli_verify_writes_reports() {
    let dir = scratch_dir("cli");
    let report = dir.join("conformance.md");
    let log = dir.join("conformance.log.jsonl");
    let output = Command::new(env!("CARGO_BIN_EXE_harness"))
        .arg("verify")
        .arg("--fixture")
        .arg(fixture_dir())
        .arg("--report")
        .arg(&report)
        .arg("--log")
        .arg(&log)
        .args(["--timestamp", "2026-10-19T00:00:00Z"])
        .output()
        .expect("failed to run harness");
    assert!(
        output.status.success(),
        "harness verify failed:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );

    let markdown = std::fs::read_to_string(&report).unwrap();
    assert!(markdown.starts_with("# spfmt Conformance Report"));
    assert!(markdown.contains("- Failed: 0"));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.join("conformance.json")).unwrap())
            .unwrap();
    assert_eq!(json["timestamp"], "2026-10-19T00:00:00Z");
    assert_eq!(json["summary"]["failed"], 0);

    let index: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(dir.join("conformance.artifacts.json")).unwrap(),
    )
    .unwrap();
    let artifacts = index["artifacts"].as_array().unwrap();
    assert_eq!(artifacts.len(), 3);
    for artifact in artifacts {
        assert_eq!(artifact["sha256"].as_str().unwrap().len(), 64);
    }

    let status = Command::new(env!("CARGO_BIN_EXE_harness"))
        .arg("validate-log")
        .arg("--log")
        .arg(&log)
        .status()
        .unwrap();
    assert!(status.success());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn cli_verify_fails_on_mismatch() {
    let dir = scratch_dir("mismatch");
    std::fs::write(
        dir.join("broken.json"),
        r#"{"version":"v1","family":"broken","captured_at":"","cases":[
            {"name":"wrong","section":"integer","template":"{}","args":["i:1"],"expected_output":"2"}
        ]}"#,
    )
    .unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_harness"))
        .arg("verify")
        .arg("--fixture")
        .arg(&dir)
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("VerificationFailed"));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn cli_verify_rejects_empty_directory() {
    let dir = scratch_dir("empty");
    let output = Command::new(env!("CARGO_BIN_EXE_harness"))
        .arg("verify")
        .arg("--fixture")
        .arg(&dir)
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("NoFixtures"));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn cli_render_prints_formatted_text() {
    let output = Command::new(env!("CARGO_BIN_EXE_harness"))
        .args(["render", "{:>6.2f}|{}|{:#x}", "f:2.345678", "s:ok", "u:255"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "  2.35|ok|0xff\n");

    let output = Command::new(env!("CARGO_BIN_EXE_harness"))
        .args(["render", "ooga booga", "--buffer-size", "5"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "ooga\n");
    assert!(String::from_utf8_lossy(&output.stderr).contains("length=10"));

    let output = Command::new(env!("CARGO_BIN_EXE_harness"))
        .args(["render", "{}", "x:1"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}
