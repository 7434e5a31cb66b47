//! CLI end-to-end tests that invoke the compiled `dconf-manager` binary.
//!
//! Every test points `--dconf` at a [`FakeDconf`] script, so the calls
//! the binary makes can be checked from its log.

#![cfg(unix)]

use assert_cmd::Command;
use dconf_test_utils::{
    DESIRED_CONFIG, EXPECTED_DIFF, EXPECTED_DIFF_WITH_IGNORED, FakeDconf, LIVE_DUMP, ROOT,
    write_file,
};
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

/// Get a Command for the binary with a clean environment
fn dconf_manager() -> Command {
    let mut cmd = Command::cargo_bin("dconf-manager").expect("Failed to find dconf-manager binary");
    for var in [
        "DCONF_MANAGER_ROOT",
        "DCONF_MANAGER_DCONF",
        "RUST_LOG",
        "CLICOLOR_FORCE",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// Command running against `fake` with the reference desired document
fn reference_cmd(fake: &FakeDconf, dir: &TempDir, color: &str) -> Command {
    let input = write_file(dir.path(), "input.ini", DESIRED_CONFIG);
    let mut cmd = dconf_manager();
    cmd.arg("--root")
        .arg(ROOT)
        .arg("--dconf")
        .arg(fake.program())
        .arg("--color")
        .arg(color)
        .arg(input);
    cmd
}

fn expected_stdout(lines: &[&str]) -> String {
    lines.iter().map(|l| format!("{l}\n")).collect()
}

// ============================================================================
// Argument handling
// ============================================================================

#[test]
fn test_help_exits_zero() {
    dconf_manager()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--apply"))
        .stdout(predicate::str::contains("--show-ignored"))
        .stdout(predicate::str::contains("--root"));
}

#[test]
fn test_config_argument_is_required() {
    dconf_manager()
        .assert()
        .failure()
        .stderr(predicate::str::contains("CONFIG"));
}

#[test]
fn test_relative_root_is_a_user_error() {
    let fake = FakeDconf::new(LIVE_DUMP);
    let dir = TempDir::new().unwrap();
    let input = write_file(dir.path(), "input.ini", DESIRED_CONFIG);

    dconf_manager()
        .args(["--root", "the/root", "--color", "never"])
        .arg("--dconf")
        .arg(fake.program())
        .arg(input)
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("error: root must be an absolute path"));

    assert!(fake.calls().is_empty());
}

// ============================================================================
// Diff output
// ============================================================================

#[test]
fn test_diff_matches_reference() {
    let fake = FakeDconf::new(LIVE_DUMP);
    let dir = TempDir::new().unwrap();

    reference_cmd(&fake, &dir, "never")
        .assert()
        .success()
        .stdout(expected_stdout(EXPECTED_DIFF));

    assert_eq!(fake.calls(), vec!["dump /the/root".to_string()]);
}

#[test]
fn test_show_ignored() {
    let fake = FakeDconf::new(LIVE_DUMP);
    let dir = TempDir::new().unwrap();

    reference_cmd(&fake, &dir, "never")
        .arg("-i")
        .assert()
        .success()
        .stdout(expected_stdout(EXPECTED_DIFF_WITH_IGNORED));
}

#[test]
fn test_color_always_emits_legacy_escapes() {
    let fake = FakeDconf::new(LIVE_DUMP);
    let dir = TempDir::new().unwrap();

    let output = reference_cmd(&fake, &dir, "always")
        .arg("--show-ignored")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "\x1b[32m> add/AddedKey=1");
    assert_eq!(lines[1], "\x1b[38;5;244m? clear/keep=5");
    assert_eq!(lines[2], "\x1b[31m< clear/foo/bar/blah=50");
}

#[test]
fn test_auto_color_is_off_when_piped() {
    let fake = FakeDconf::new(LIVE_DUMP);
    let dir = TempDir::new().unwrap();
    let input = write_file(dir.path(), "input.ini", DESIRED_CONFIG);

    dconf_manager()
        .args(["--root", ROOT])
        .arg("--dconf")
        .arg(fake.program())
        .arg(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b[").not());
}

fn json_lines(stdout: &[u8]) -> Vec<serde_json::Value> {
    String::from_utf8(stdout.to_vec())
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn test_json_output() {
    let fake = FakeDconf::new(LIVE_DUMP);
    let dir = TempDir::new().unwrap();

    let output = reference_cmd(&fake, &dir, "never").arg("--json").output().unwrap();

    assert!(output.status.success());
    let values = json_lines(&output.stdout);
    assert_eq!(values.len(), EXPECTED_DIFF.len() + 1);
    assert_eq!(values[1]["kind"], "reset");
    assert_eq!(values[1]["section"], "clear/foo/bar");
    let summary = &values[EXPECTED_DIFF.len()];
    assert_eq!(summary["root"], ROOT);
    assert_eq!(summary["summary"]["writes"], 3);
}

#[test]
fn test_json_apply_failure_shows_attempted_actions() {
    let fake = FakeDconf::new(LIVE_DUMP).failing_on("/the/root/overwrite/a");
    let dir = TempDir::new().unwrap();

    let output = reference_cmd(&fake, &dir, "never")
        .args(["--json", "--apply"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let values = json_lines(&output.stdout);
    assert_eq!(values.len(), 4);
    assert_eq!(values[3]["option"], "a");
    assert_eq!(values[3]["value"], "10");
    assert_eq!(fake.calls().len(), 4);
}

// ============================================================================
// Applying
// ============================================================================

#[test]
fn test_apply_dispatches_in_order() {
    let fake = FakeDconf::new(LIVE_DUMP);
    let dir = TempDir::new().unwrap();

    reference_cmd(&fake, &dir, "never")
        .arg("--apply")
        .assert()
        .success()
        .stdout(expected_stdout(EXPECTED_DIFF));

    assert_eq!(
        fake.calls(),
        vec![
            "dump /the/root",
            "write /the/root/add/AddedKey 1",
            "reset /the/root/clear/foo/bar/blah",
            "write /the/root/overwrite/a 10",
            "reset /the/root/overwrite/b",
            "write /the/root/overwrite/new 5",
        ]
    );
}

#[test]
fn test_apply_failure_aborts_with_key() {
    let fake = FakeDconf::new(LIVE_DUMP).failing_on("/the/root/overwrite/a");
    let dir = TempDir::new().unwrap();

    reference_cmd(&fake, &dir, "never")
        .arg("-a")
        .assert()
        .code(1)
        .stdout(expected_stdout(&EXPECTED_DIFF[..4]))
        .stderr(predicate::str::contains("/the/root/overwrite/a"))
        .stderr(predicate::str::contains("2 of 5"));

    // nothing after the failing write is attempted
    assert_eq!(
        fake.calls(),
        vec![
            "dump /the/root",
            "write /the/root/add/AddedKey 1",
            "reset /the/root/clear/foo/bar/blah",
            "write /the/root/overwrite/a 10",
        ]
    );
}

#[test]
fn test_dconf_program_from_environment() {
    let fake = FakeDconf::new(LIVE_DUMP);
    let dir = TempDir::new().unwrap();
    let input = write_file(dir.path(), "input.ini", DESIRED_CONFIG);

    dconf_manager()
        .env("DCONF_MANAGER_DCONF", fake.program())
        .env("DCONF_MANAGER_ROOT", ROOT)
        .args(["--color", "never"])
        .arg(input)
        .assert()
        .success()
        .stdout(expected_stdout(EXPECTED_DIFF));

    assert_eq!(fake.calls(), vec!["dump /the/root".to_string()]);
}

// ============================================================================
// Input and store errors
// ============================================================================

#[test]
fn test_missing_config_never_touches_store() {
    let fake = FakeDconf::new(LIVE_DUMP);
    let dir = TempDir::new().unwrap();

    dconf_manager()
        .arg("--dconf")
        .arg(fake.program())
        .arg(dir.path().join("missing.ini"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing.ini"));

    assert!(fake.calls().is_empty());
}

#[test]
fn test_malformed_config_never_touches_store() {
    let fake = FakeDconf::new(LIVE_DUMP);
    let dir = TempDir::new().unwrap();
    let input = write_file(dir.path(), "broken.ini", "orphan=1\n");

    dconf_manager()
        .arg("--dconf")
        .arg(fake.program())
        .arg(input)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("broken.ini"))
        .stderr(predicate::str::contains("line 1"));

    assert!(fake.calls().is_empty());
}

#[test]
fn test_missing_dconf_program_is_an_error() {
    let dir = TempDir::new().unwrap();
    let input = write_file(dir.path(), "input.ini", DESIRED_CONFIG);

    dconf_manager()
        .arg("--dconf")
        .arg(dir.path().join("no-such-dconf"))
        .arg(input)
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("no-such-dconf"));
}

#[test]
fn test_later_files_override_earlier_ones() {
    let fake = FakeDconf::new("[app]\ntheme='light'\nsize=3\n");
    let dir = TempDir::new().unwrap();
    let base = write_file(dir.path(), "base.ini", "[app]\ntheme='dark'\nsize=3\n");
    let host = write_file(dir.path(), "host.ini", "[app]\ntheme='light'\n");

    dconf_manager()
        .arg("--dconf")
        .arg(fake.program())
        .args(["--color", "never"])
        .arg(base)
        .arg(host)
        .assert()
        .success()
        .stdout("");
}
