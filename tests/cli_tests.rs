/// End-to-end tests for the audit-view binary: exit codes, default mode and
/// shell completion
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn audit_view(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_audit-view"))
        .args(args)
        .env_remove("AUDIT_LOG_FILE")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute audit-view")
}

fn write_log(dir: &Path, contents: &str) -> String {
    let path = dir.join("audit.log");
    fs::write(&path, contents).unwrap();
    path.to_str().unwrap().to_string()
}

const SAMPLE: &str = concat!(
    r#"{"time":"2025-10-07T10:00:00Z","request":{"method":"POST","path":"auth/approle/login","remote_address":"10.1.1.1"},"response":{"status_code":200}}"#,
    "\n",
    "this line is not json\n",
    "\n",
    r#"{"time":"2025-10-07T10:00:01Z","request":{"method":"POST","path":"transit/sign/ehr-signing"},"response":{"status_code":500},"error":"internal error"}"#,
    "\n",
);

#[test]
fn test_missing_file_exits_non_zero() {
    let output = audit_view(&["--file", "/nonexistent/openbao/audit.log"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("/nonexistent/openbao/audit.log"));
}

#[test]
fn test_unreadable_log_exits_non_zero() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("audit.log");
    fs::write(&path, [SAMPLE.as_bytes(), b"\xff\xfe\n"].concat()).unwrap();

    let output = audit_view(&["--file", path.to_str().unwrap()]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to read audit log"));
}

#[test]
fn test_log_path_from_environment() {
    let dir = TempDir::new().unwrap();
    let log = write_log(dir.path(), SAMPLE);

    let output = Command::new(env!("CARGO_BIN_EXE_audit-view"))
        .args(["--search", "ehr-signing"])
        .env("AUDIT_LOG_FILE", &log)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute audit-view");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Found 1 matching entries"));
    assert!(stdout.contains("transit/sign/ehr-signing"));
}

#[test]
fn test_verbose_flag_enables_load_logging() {
    let dir = TempDir::new().unwrap();
    let log = write_log(dir.path(), SAMPLE);

    let quiet = audit_view(&["--file", &log, "--summary"]);
    assert!(!String::from_utf8_lossy(&quiet.stderr).contains("audit log loaded"));

    let debug = audit_view(&["--file", &log, "--summary", "-vv"]);
    assert!(debug.status.success());
    assert!(String::from_utf8_lossy(&debug.stderr).contains("audit log loaded"));
}

#[test]
fn test_default_mode_shows_summary_and_entries() {
    let dir = TempDir::new().unwrap();
    let log = write_log(dir.path(), SAMPLE);

    let output = audit_view(&["--file", &log]);
    assert!(output.status.success(), "Parse warnings must not fail the run");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("AUDIT LOG SUMMARY"));
    assert!(stdout.contains("AUDIT LOG ENTRIES"));
    assert!(stdout.contains("Status:    500 (ERROR)"));
    assert!(stdout.contains("Displayed 2 of 2 total entries"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Loaded 2 audit log entries"));
    assert!(stderr.contains("line 2"));
}

#[test]
fn test_search_without_matches_exits_zero() {
    let dir = TempDir::new().unwrap();
    let log = write_log(dir.path(), SAMPLE);

    let output = audit_view(&["--file", &log, "--search", "no-such-term"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No entries found containing 'no-such-term'"));
    assert!(!stdout.contains("AUDIT LOG SUMMARY"));
}

#[test]
fn test_filter_flag_lists_matching_entries() {
    let dir = TempDir::new().unwrap();
    let log = write_log(dir.path(), SAMPLE);

    let output = audit_view(&["--file", &log, "--filter", "Authentication"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("AUDIT LOG ENTRIES - Authentication"));
    assert!(stdout.contains("auth/approle/login"));
    assert!(!stdout.contains("transit/sign"));
}

#[test]
fn test_export_failure_keeps_exit_zero_and_stdout() {
    let dir = TempDir::new().unwrap();
    let log = write_log(dir.path(), SAMPLE);
    let bad_dest = format!("{}/report.txt", log);

    let output = audit_view(&["--file", &log, "--summary", "--export", &bad_dest]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("AUDIT LOG SUMMARY"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error exporting report"));
}

#[test]
fn test_export_writes_report() {
    let dir = TempDir::new().unwrap();
    let log = write_log(dir.path(), SAMPLE);
    let dest = dir.path().join("report.txt");

    let output = audit_view(&["--file", &log, "--export", dest.to_str().unwrap()]);
    assert!(output.status.success());

    let report = fs::read_to_string(&dest).unwrap();
    assert!(report.contains("AUDIT LOG SUMMARY"));
    assert!(report.contains("RECENT ENTRIES:"));
    // Export alone does not print the default views
    assert!(!String::from_utf8_lossy(&output.stdout).contains("AUDIT LOG SUMMARY"));
}

#[test]
fn test_generate_completion_bash() {
    let output = audit_view(&["--generate-completion", "bash"]);
    assert!(output.status.success(), "Command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("COMPREPLY"));
    assert!(stdout.contains("--search"));
    assert!(stdout.contains("--export"));
}
