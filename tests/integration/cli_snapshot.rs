//! End-to-end tests for the snapshot command

use super::common::fixtures::{snapshot_date, TestRoot};
use predicates::prelude::*;
use std::fs;

const STDOUT_PATTERN: &str = r"^Wrote snapshot: .*HANDOFF_\d{4}-\d{2}-\d{2}_\d{4}\.md\n$";

/// A document with a header gets archived and its header refreshed
#[test]
fn test_snapshot_with_header() {
    let original = "# HANDOFF (2025-01-01 — Africa/Johannesburg)\n\n## Done\n- shipped\n";
    let root = TestRoot::with_document(original);

    root.command()
        .assert()
        .success()
        .stdout(predicate::str::is_match(STDOUT_PATTERN).unwrap());

    let snapshots = root.snapshots();
    assert_eq!(snapshots.len(), 1);
    assert_eq!(fs::read_to_string(&snapshots[0]).unwrap(), original);

    // Header date and file stamp come from the same clock reading
    let date = snapshot_date(&snapshots[0]);
    assert_eq!(
        root.read_document(),
        format!(
            "# HANDOFF ({} — Africa/Johannesburg)\n\n## Done\n- shipped\n",
            date
        )
    );
}

/// The confirmation line names the archive file that was written
#[test]
fn test_stdout_names_snapshot_path() {
    let root = TestRoot::with_document("# HANDOFF (old)\n");

    let output = root.command().output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let printed = stdout
        .trim_end()
        .strip_prefix("Wrote snapshot: ")
        .expect("Missing confirmation prefix");
    assert_eq!(vec![std::path::PathBuf::from(printed)], root.snapshots());
}

/// Without a header marker the document stays untouched but is still archived
#[test]
fn test_snapshot_without_header() {
    let original = "Handoff notes\n# HANDOFF (not first)\nno trailing newline";
    let root = TestRoot::with_document(original);

    root.command().assert().success().stdout(predicate::str::starts_with(
        "Wrote snapshot: ",
    ));

    assert_eq!(root.read_document(), original);
    let snapshots = root.snapshots();
    assert_eq!(snapshots.len(), 1);
    assert_eq!(fs::read_to_string(&snapshots[0]).unwrap(), original);
}

/// A missing document is not an error: no snapshot, no message
#[test]
fn test_missing_document_is_noop() {
    let root = TestRoot::empty();

    root.command().assert().success().stdout(predicate::str::is_empty());

    assert!(root.archive_path().is_dir());
    assert!(root.snapshots().is_empty());
    assert!(!root.document_path().exists());
}

/// Running against an existing archive directory succeeds
#[test]
fn test_existing_archive_dir() {
    let root = TestRoot::with_document("# HANDOFF (old)\nbody\n");
    fs::create_dir_all(root.archive_path()).unwrap();
    fs::write(root.archive_path().join("HANDOFF_2000-01-01_0000.md"), "older").unwrap();

    root.command().assert().success();
    root.command().assert().success();

    let snapshots = root.snapshots();
    assert!(snapshots.len() >= 2);
    assert_eq!(fs::read_to_string(&snapshots[0]).unwrap(), "older");
}

/// Logging stays on stderr so stdout carries only the confirmation line
#[test]
fn test_verbose_logs_to_stderr() {
    let root = TestRoot::with_document("# HANDOFF (old)\n");

    root.command()
        .arg("--verbose")
        .assert()
        .success()
        .stdout(predicate::str::is_match(STDOUT_PATTERN).unwrap())
        .stderr(predicate::str::contains("Wrote snapshot"));
}

/// Config overrides under the root change the layout
#[test]
fn test_config_file_overrides_layout() {
    let root = TestRoot::with_document("# HANDOFF (old)\n");
    fs::write(
        root.path.join("handoff.toml"),
        "archive_dir = \"archive\"\ntime_zone_label = \"UTC\"\n",
    )
    .unwrap();

    root.command()
        .assert()
        .success()
        .stdout(predicate::str::contains("archive"));

    assert!(root.snapshots().is_empty());
    assert!(root.read_document().ends_with(" — UTC)\n"));
}

/// A malformed config file is reported and the default layout is used
#[test]
fn test_malformed_config_uses_defaults() {
    let root = TestRoot::with_document("# HANDOFF (old)\n");
    fs::write(root.path.join("handoff.toml"), "archive_dir = [").unwrap();

    root.command()
        .assert()
        .success()
        .stdout(predicate::str::is_match(STDOUT_PATTERN).unwrap())
        .stderr(predicate::str::contains("Failed to parse config"));

    assert_eq!(root.snapshots().len(), 1);
    assert!(root.read_document().ends_with(" — Africa/Johannesburg)\n"));
}

/// Unrelated settings in the config file never block a snapshot
#[test]
fn test_unrelated_config_tables_are_ignored() {
    let root = TestRoot::with_document("# HANDOFF (old)\nbody\n");
    fs::write(root.path.join("handoff.toml"), "[owner]\nname = \"ops\"\n").unwrap();

    root.command()
        .assert()
        .success()
        .stdout(predicate::str::is_match(STDOUT_PATTERN).unwrap());

    assert_eq!(root.snapshots().len(), 1);
    assert!(root.read_document().ends_with(" — Africa/Johannesburg)\nbody\n"));
}

/// Old Mac line endings keep every body line
#[test]
fn test_cr_only_document_keeps_body() {
    let original = "# HANDOFF (old)\rline two\rline three\r";
    let root = TestRoot::with_document(original);

    root.command().assert().success();

    let snapshots = root.snapshots();
    assert_eq!(fs::read_to_string(&snapshots[0]).unwrap(), original);
    assert_eq!(
        root.read_document(),
        format!(
            "# HANDOFF ({} — Africa/Johannesburg)\nline two\nline three\n",
            snapshot_date(&snapshots[0])
        )
    );
}

/// Filesystem faults terminate with a non-zero exit code
#[test]
fn test_archive_path_blocked_fails() {
    let root = TestRoot::with_document("# HANDOFF (old)\n");
    fs::write(root.archive_path(), "not a directory").unwrap();

    root.command()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to create archive directory"));

    assert_eq!(root.read_document(), "# HANDOFF (old)\n");
}
