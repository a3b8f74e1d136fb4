// tests/integration_test.rs
use std::io::Write;
use std::process::{Command, Output, Stdio};

use tempfile::NamedTempFile;

fn empty_config() -> NamedTempFile {
    NamedTempFile::new().unwrap()
}

fn run_git_sv(args: &[&str], stdin: &str) -> Output {
    let config = empty_config();
    let mut child = Command::new(env!("CARGO_BIN_EXE_git-sv"))
        .arg("--config")
        .arg(config.path())
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute command");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn test_git_sv_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_git-sv"))
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("git-sv"));
    assert!(stdout.contains("next-version"));
    assert!(stdout.contains("release-notes"));
}

#[test]
fn test_next_version_from_lines() {
    let output = run_git_sv(
        &["next-version", "--current", "v1.2.3"],
        "feat(api): add search\nfix: typo in error\n",
    );
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "1.3.0\n");
}

#[test]
fn test_next_tag_with_breaking_footer() {
    let output = run_git_sv(
        &["next-tag", "--current", "v1.2.3"],
        "fix: rename field\n\nBREAKING CHANGE: id is now a string\n\0docs: note\n\0",
    );
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "v2.0.0\n");
}

#[test]
fn test_unparsable_tag_warns() {
    let output = run_git_sv(&["next-version", "--current", "abc"], "fix: x\n");
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "0.0.1\n");
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Cannot parse tag 'abc'"));
}

#[test]
fn test_major_zero_status_line_reports_applied_bump() {
    let output = run_git_sv(&["next-version", "--current", "v0.3.1"], "feat(api)!: new format\n");
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "0.4.0\n");
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("0.3.1 -> 0.4.0 (minor)"));
}

#[test]
fn test_version_overflow_fails() {
    let output = run_git_sv(
        &["next-version", "--current", "v18446744073709551615.0.0"],
        "feat!: drop everything\n",
    );
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Version error"));
}

#[test]
fn test_release_notes_markdown() {
    let output = run_git_sv(
        &[
            "release-notes",
            "--current",
            "v0.9.0",
            "--date",
            "2020-05-01",
            "--quiet",
        ],
        "feat: add export\nfix(cli): exit code\nbuild: bump msrv\n",
    );
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "## v0.10.0 (2020-05-01)\n\n### Features\n\n- add export ()\n\n### Bug Fixes\n\n- **cli:** exit code ()\n\n### Build\n\n- bump msrv ()\n"
    );
    assert!(output.stderr.is_empty());
}

#[test]
fn test_release_notes_json() {
    let output = run_git_sv(
        &["release-notes", "--tag", "abc", "--no-date", "--json", "-q"],
        "fix: x\n",
    );
    assert!(output.status.success());
    let vars: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(vars["release"], "abc");
    assert_eq!(vars["date"], "");
    assert_eq!(vars["sections"]["fix"]["name"], "Bug Fixes");
}

#[test]
fn test_invalid_config_fails() {
    let mut config = NamedTempFile::new().unwrap();
    config.write_all(b"[tag]\npattern = \"nope\"\n").unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_git-sv"))
        .arg("--config")
        .arg(config.path())
        .arg("next-version")
        .stdin(Stdio::null())
        .output()
        .unwrap();
    assert!(!output.status.success());
}
