use assert_cmd::Command;
use contamscan_test_utils::TestTreeBuilder;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Command with an isolated configuration directory and no colors
fn contamscan(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("contamscan").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home)
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

fn reference_tree() -> contamscan_test_utils::TestTree {
    TestTreeBuilder::new()
        .with_table("", "A", "_getpileupsummaries.table")
        .with_table("", "A", "_calculatecontamination.table")
        .with_table("", "B", "_getpileupsummaries.table")
        .with_table("", "B", "_segments.table")
        .build()
}

#[test]
fn test_version() {
    let mut cmd = Command::cargo_bin("contamscan").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_directory_is_required() {
    let config_home = TempDir::new().unwrap();
    contamscan(config_home.path()).assert().code(2);
}

#[test]
fn test_reference_report() {
    let config_home = TempDir::new().unwrap();
    let tree = reference_tree();

    contamscan(config_home.path())
        .arg(tree.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("Directory exists: true"))
        .stdout(predicate::str::contains("Pattern: *_getpileupsummaries.table"))
        .stdout(predicate::str::contains("  getpileupsummaries: 2 files"))
        .stdout(predicate::str::contains("  Total unique samples: 2"))
        .stdout(predicate::str::contains("Samples with missing files: 2"))
        .stdout(predicate::str::contains("  A: missing segments"))
        .stdout(predicate::str::contains("  B: missing calculatecontamination"))
        .stdout(predicate::str::contains("Saving path-only lists").not());
}

#[test]
fn test_complete_samples() {
    let config_home = TempDir::new().unwrap();
    let tree = TestTreeBuilder::new()
        .with_complete_sample("run1", "tumor1")
        .with_complete_sample("run2", "tumor2")
        .build();

    contamscan(config_home.path())
        .arg(tree.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("All samples have complete file sets!"));
}

#[test]
fn test_missing_directory_is_not_an_error() {
    let config_home = TempDir::new().unwrap();
    let missing = config_home.path().join("no-such-dir");

    contamscan(config_home.path())
        .arg(&missing)
        .assert()
        .success()
        .stdout(predicate::str::contains("Directory exists: false"))
        .stdout(predicate::str::contains("Found 0 files:"));
}

#[test]
fn test_output_writes_path_lists() {
    let config_home = TempDir::new().unwrap();
    let tree = reference_tree();
    let base = tree.scratch().join("run.txt");

    contamscan(config_home.path())
        .arg(tree.root())
        .arg("-o")
        .arg(&base)
        .assert()
        .success()
        .stdout(predicate::str::contains("Saving path-only lists:"))
        .stdout(predicate::str::contains("(2 files)"));

    let scratch = tree.scratch();
    let segments = fs::read_to_string(scratch.join("run_segments_paths.txt")).unwrap();
    assert_eq!(
        segments,
        format!("{}\n", tree.path("B_segments.table").display())
    );

    let all = fs::read_to_string(scratch.join("run_all_paths.txt")).unwrap();
    let expected = format!(
        "# All contamination files\n\
         # GETPILEUPSUMMARIES FILES\n{}\n{}\n\n\
         # CALCULATECONTAMINATION FILES\n{}\n\n\
         # SEGMENTS FILES\n{}\n\n",
        tree.path("A_getpileupsummaries.table").display(),
        tree.path("B_getpileupsummaries.table").display(),
        tree.path("A_calculatecontamination.table").display(),
        tree.path("B_segments.table").display(),
    );
    assert_eq!(all, expected);
    assert!(!scratch.join("run.txt_all_paths.txt").exists());
}

#[test]
fn test_unwritable_output_is_filesystem_error() {
    let config_home = TempDir::new().unwrap();
    let tree = reference_tree();
    let base = tree.scratch().join("missing/nested/run");

    contamscan(config_home.path())
        .arg(tree.root())
        .arg("--output")
        .arg(&base)
        .assert()
        .code(4)
        .stderr(predicate::str::contains("File Error"))
        .stderr(predicate::str::contains("run_getpileupsummaries_paths.txt"));
}

#[cfg(unix)]
#[test]
fn test_symlink_dir() {
    let config_home = TempDir::new().unwrap();
    let tree = reference_tree();
    let links = tree.scratch().join("links");

    contamscan(config_home.path())
        .arg(tree.root())
        .arg("--symlink-dir")
        .arg(&links)
        .assert()
        .success()
        .stdout(predicate::str::contains("Creating symlinks in:"))
        .stdout(predicate::str::contains("A_calculatecontamination.table"));

    let link = links.join("B_segments.table");
    assert!(link.symlink_metadata().unwrap().file_type().is_symlink());
    assert_eq!(
        fs::canonicalize(&link).unwrap(),
        fs::canonicalize(tree.path("B_segments.table")).unwrap()
    );
}

#[test]
fn test_json_report() {
    let config_home = TempDir::new().unwrap();
    let tree = reference_tree();

    let output = contamscan(config_home.path())
        .arg(tree.root())
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["located"]["root_exists"], true);
    assert_eq!(
        value["located"]["files"]["segments"].as_array().unwrap().len(),
        1
    );
    assert_eq!(value["completeness"]["missing"]["A"][0], "segments");
    assert!(value["written"].is_null());
}

#[test]
fn test_exclude_pattern() {
    let config_home = TempDir::new().unwrap();
    let tree = TestTreeBuilder::new()
        .with_complete_sample("current", "A")
        .with_complete_sample("old", "B")
        .build();

    contamscan(config_home.path())
        .arg(tree.root())
        .args(["-e", "**/old/**"])
        .assert()
        .success()
        .stdout(predicate::str::contains("  Total unique samples: 1"))
        .stdout(predicate::str::contains("B_segments.table").not());
}

#[test]
fn test_invalid_exclude_pattern_is_usage_error() {
    let config_home = TempDir::new().unwrap();
    let tree = reference_tree();

    contamscan(config_home.path())
        .arg(tree.root())
        .args(["--exclude", "a[b"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid exclude pattern"));
}

#[test]
fn test_exact_match_flags_overlapping_names() {
    let config_home = TempDir::new().unwrap();
    let tree = TestTreeBuilder::new()
        .with_complete_sample("", "S10")
        .with_table("", "S1", "_getpileupsummaries.table")
        .build();

    contamscan(config_home.path())
        .arg(tree.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("All samples have complete file sets!"))
        .stdout(predicate::str::contains("Ambiguous matches"));

    contamscan(config_home.path())
        .arg(tree.root())
        .arg("--exact-match")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "  S1: missing calculatecontamination, segments",
        ));
}

#[test]
fn test_print_config_defaults() {
    let config_home = TempDir::new().unwrap();

    contamscan(config_home.path())
        .arg("--print-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("[discovery]"))
        .stdout(predicate::str::contains("mode = \"substring\""))
        .stdout(predicate::str::contains("color_enabled = false"));
}

#[test]
fn test_config_file_and_env_layers() {
    let config_home = TempDir::new().unwrap();
    let config_dir = config_home.path().join("contamscan");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        "[matching]\nmode = \"exact\"\n\n[output]\ndefault_format = \"json\"\n",
    )
    .unwrap();

    contamscan(config_home.path())
        .env("CONTAMSCAN_DISCOVERY__INCLUDE_HIDDEN", "true")
        .arg("--print-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("mode = \"exact\""))
        .stdout(predicate::str::contains("default_format = \"json\""))
        .stdout(predicate::str::contains("include_hidden = true"));

    contamscan(config_home.path())
        .args(["--print-config", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default_format = \"text\""));
}

#[test]
fn test_malformed_config_is_config_error() {
    let config_home = TempDir::new().unwrap();
    let config = config_home.path().join("broken.toml");
    fs::write(&config, "[matching\nmode = ").unwrap();

    contamscan(config_home.path())
        .arg("--config")
        .arg(&config)
        .arg("--print-config")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Configuration Error"));
}

#[test]
fn test_missing_explicit_config_is_config_error() {
    let config_home = TempDir::new().unwrap();

    contamscan(config_home.path())
        .arg("--config")
        .arg(config_home.path().join("absent.toml"))
        .arg("--print-config")
        .assert()
        .code(3);
}
