/// Offline integration tests for jira-component-report
///
/// These run the built binary against configurations that fail before or
/// at the connection step, so no tracker is needed.
use std::path::Path;
use std::process::{Command, Output};

// Helper to run the binary with a clean credential environment
fn run_report(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_jira-component-report"))
        .args(args)
        .current_dir(cwd)
        .env_remove("JIRA_URL")
        .env_remove("JIRA_USER")
        .env_remove("JIRA_TOKEN")
        .env_remove("JIRA_REPORT_CONFIG")
        .output()
        .unwrap_or_else(|e| panic!("Failed to run jira-component-report {}: {}", args.join(" "), e))
}

// Helper to assert the run failed with `needle` in its output
fn assert_failed_with(output: &Output, needle: &str) {
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(output.status.code(), Some(1), "expected exit code 1, stdout: {}", stdout);
    assert!(stdout.contains(needle), "expected '{}' in output:\n{}", needle, stdout);
}

#[test]
fn test_help_lists_flags() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_report(&["--help"], dir.path());
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--other-last"));
    assert!(stdout.contains("--compact"));
}

#[test]
fn test_missing_explicit_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_report(&["--config", "does-not-exist.toml"], dir.path());
    assert_failed_with(&output, "Configuration error");
}

#[test]
fn test_missing_token_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("jira-report.toml");
    std::fs::write(
        &config,
        "[tracker]\nurl = \"https://tracker.example.com\"\nusername = \"me\"\n\n[report]\nquery = \"project = RPT\"\n",
    )
    .unwrap();

    let output = run_report(&["--config", config.to_str().unwrap()], dir.path());
    assert_failed_with(&output, "Missing tracker token");
}

#[test]
fn test_invalid_key_width_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_report(&["--key-width", "0"], dir.path());
    assert_failed_with(&output, "--key-width");
}

#[test]
fn test_connection_failure_halts_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("jira-report.toml");
    std::fs::write(
        &config,
        "[tracker]\nurl = \"http://127.0.0.1:9\"\nusername = \"me\"\ntoken = \"t\"\n\n[report]\nquery = \"project = RPT\"\noutput = \"out.xlsx\"\n",
    )
    .unwrap();

    let output = run_report(&["--config", config.to_str().unwrap()], dir.path());
    assert_failed_with(&output, "Failed to connect");
    assert!(!dir.path().join("out.xlsx").exists());
}
