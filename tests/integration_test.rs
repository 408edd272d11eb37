// tests/integration_test.rs
use std::process::Command;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_git-pr-stack"))
}

#[test]
fn test_git_pr_stack_help() {
    let output = bin().arg("--help").output().expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("git-pr-stack"));
    assert!(stdout.contains("--dry"));
}

#[test]
fn test_unknown_flag_is_rejected() {
    let output = bin()
        .arg("--force")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_outside_repository_exits_non_zero() {
    let dir = tempfile::TempDir::new().unwrap();
    let output = bin()
        .arg("--dry")
        .current_dir(dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("ERROR"), "stderr: {}", stderr);
}
