//! End-to-end tests of the `polygen` binary.

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../polygen-emit/tests/testdata/comments")
        .join(name)
}

/// `polygen` run in an empty directory with no global config.
fn polygen(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("polygen").unwrap();
    cmd.current_dir(dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join("xdg"))
        .env_remove("POLYGEN_LOG");
    cmd
}

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_generate_single_target_matches_golden() {
    let dir = TempDir::new().unwrap();
    let output = polygen(&dir)
        .args(["generate", "-t", "python"])
        .arg(fixture("program.json"))
        .output()
        .unwrap();
    assert!(output.status.success());
    let expected = std::fs::read_to_string(fixture("comments.py")).unwrap();
    assert_eq!(stdout(&output), expected);
}

#[test]
fn test_generate_all_targets_prints_banners() {
    let dir = TempDir::new().unwrap();
    let output = polygen(&dir)
        .arg("generate")
        .arg(fixture("program.json"))
        .output()
        .unwrap();
    assert!(output.status.success());
    let out = stdout(&output);
    let banners: Vec<&str> = out.lines().filter(|l| l.starts_with("==> ")).collect();
    assert_eq!(banners, ["==> csharp <==", "==> go <==", "==> python <=="]);
}

#[test]
fn test_generate_to_directory() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    let status = polygen(&dir)
        .args(["generate", "-t", "go", "-t", "csharp", "--sequential", "-o"])
        .arg(&out)
        .arg(fixture("program.json"))
        .output()
        .unwrap()
        .status;
    assert!(status.success());
    assert_eq!(
        std::fs::read_to_string(out.join("program.go")).unwrap(),
        std::fs::read_to_string(fixture("comments.go")).unwrap()
    );
    assert!(out.join("program.cs").is_file());
    assert!(!out.join("program.py").exists());
}

#[test]
fn test_project_config_selects_targets() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join(".polygen")).unwrap();
    std::fs::write(
        dir.path().join(".polygen/config.toml"),
        "[generate]\ntargets = [\"go\"]\n",
    )
    .unwrap();
    let output = polygen(&dir)
        .arg("generate")
        .arg(fixture("program.json"))
        .output()
        .unwrap();
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.starts_with("package main\n"));
    assert!(!out.contains("==>"));
}

#[test]
fn test_failing_target_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("bad.json");
    std::fs::write(
        &input,
        r#"{"id": 1, "body": [{"id": 2, "kind": "output", "name": "x",
            "value": {"id": 3, "kind": "reference", "binding": "missing"}}]}"#,
    )
    .unwrap();
    let output = polygen(&dir)
        .args(["generate", "-t", "go"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("`missing`"));
}

#[test]
fn test_unknown_target_is_rejected() {
    let dir = TempDir::new().unwrap();
    let output = polygen(&dir)
        .args(["generate", "-t", "cobol"])
        .arg(fixture("program.json"))
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown target `cobol`"));
}

#[test]
fn test_check_reports_counts() {
    let dir = TempDir::new().unwrap();
    let output = polygen(&dir)
        .arg("check")
        .arg(fixture("program.json"))
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(stdout(&output).ends_with("45 nodes, 3 comment blocks (3 lines)\n"));
}

#[test]
fn test_targets_lists_extensions() {
    let dir = TempDir::new().unwrap();
    let output = polygen(&dir).arg("targets").output().unwrap();
    assert_eq!(stdout(&output), "csharp\t.cs\ngo\t.go\npython\t.py\n");
}
