//! End-to-end tests for the yb-build-tool binary

use assert_cmd::Command;
use predicates::prelude::*;

const ENV_VARS: &[&str] = &["BUILD_ROOT", "YB_COMPILER_TYPE", "YB_THIRDPARTY_DIR", "RUST_LOG"];

fn tool() -> Command {
    let mut cmd = Command::cargo_bin("yb-build-tool").unwrap();
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_build_root_from_option() {
    tool()
        .args(["--build_root=/tmp/b", "--compiler_type", "msvc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("build_root:     /tmp/b"))
        .stdout(predicate::str::contains("compiler_type:  msvc"));
}

#[test]
fn test_build_root_from_env() {
    tool()
        .env("BUILD_ROOT", "/tmp/b")
        .env("YB_THIRDPARTY_DIR", "/opt/yb-thirdparty")
        .args(["--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"build_root\": \"/tmp/b\""))
        .stdout(predicate::str::contains("\"thirdparty_dir\": \"/opt/yb-thirdparty\""));
}

#[test]
fn test_conflicting_build_root() {
    tool()
        .env("BUILD_ROOT", "/tmp/y")
        .arg("--build_root=/tmp/x")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("/tmp/x"))
        .stderr(predicate::str::contains("/tmp/y"));
}

#[test]
fn test_missing_build_root() {
    tool()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not specified"))
        .stderr(predicate::str::contains("HINT:"));
}

#[test]
fn test_unknown_option_is_usage_error() {
    tool()
        .env("BUILD_ROOT", "/tmp/b")
        .arg("--no_such_option")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--no_such_option"));
}

#[test]
fn test_help_lists_standard_options() {
    tool()
        .env("YB_COMPILER_TYPE", "clang15")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--build_root"))
        .stdout(predicate::str::contains("--compiler_type"))
        .stdout(predicate::str::contains("--thirdparty_dir"))
        .stdout(predicate::str::contains("clang15"));
}

#[test]
fn test_check_fails_for_missing_build_root_dir() {
    tool()
        .args(["--check", "--build_root", "/nonexistent/yb-build-root"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_verbose_logs_to_stderr() {
    tool()
        .args(["-v", "--build_root=/tmp/b"])
        .assert()
        .success()
        .stderr(predicate::str::contains("exporting BUILD_ROOT"));
}
