use super::*;

use std::fs::{self, File};
use std::path::PathBuf;

fn write_file(dir: &PathBuf, name: &str, contents: &[u8]) {
    fs::write(dir.join(name), contents).unwrap();
}

fn sparse_file(dir: &PathBuf, name: &str, len: u64) {
    let f = File::create(dir.join(name)).unwrap();
    f.set_len(len).unwrap();
}

#[test]
fn plan_buckets_every_file_exactly_once() {
    let tmp = tempfile::tempdir().unwrap();
    let pending = tmp.path().to_path_buf();

    write_file(&pending, "123456789.jpg", b"img");
    write_file(&pending, "987654321.png", b"img");
    write_file(&pending, "123456789-1.jpg", b"img");
    write_file(&pending, "12345.jpg", b"img");
    write_file(&pending, "123456789.bmp", b"img");
    sparse_file(&pending, "111111111.jpg", 16_000_000);

    let plan = plan_routes(&pending).unwrap();

    assert_eq!(plan.scanned, 6);
    assert_eq!(plan.valid.len(), 2);
    assert_eq!(plan.duplicates, vec!["123456789-1.jpg"]);
    assert_eq!(plan.invalid_names, vec!["12345.jpg"]);
    assert_eq!(plan.invalid_types, vec!["123456789.bmp"]);
    assert_eq!(plan.invalid_sizes, vec!["111111111.jpg"]);
    assert!(plan.totals_add_up());

    // Scan order is name order, so the valid bucket is deterministic.
    assert_eq!(plan.valid[0].file_name, "123456789.jpg");
    assert_eq!(plan.valid[0].sku.as_str(), "123456789");
    assert_eq!(plan.valid[1].file_name, "987654321.png");
}

#[test]
fn housekeeping_and_directories_are_skipped() {
    let tmp = tempfile::tempdir().unwrap();
    let pending = tmp.path().to_path_buf();

    write_file(&pending, "desktop.ini", b"[shell]");
    write_file(&pending, "123456789.jpg", b"img");
    fs::create_dir(pending.join("uploaded")).unwrap();

    let plan = plan_routes(&pending).unwrap();
    assert_eq!(plan.scanned, 1);
    assert_eq!(plan.valid.len(), 1);
    assert!(plan.totals_add_up());
}

#[test]
fn empty_directory_is_a_consistent_empty_plan() {
    let tmp = tempfile::tempdir().unwrap();
    let plan = plan_routes(&tmp.path().to_path_buf()).unwrap();
    assert_eq!(plan.scanned, 0);
    assert_eq!(plan.total_classified(), 0);
    assert!(plan.totals_add_up());
}

#[test]
fn execute_moves_renames_into_destination() {
    let tmp = tempfile::tempdir().unwrap();
    let source = tmp.path().join("pending");
    let dest = tmp.path().join("invalid-file-name");
    fs::create_dir_all(&source).unwrap();
    fs::create_dir_all(&dest).unwrap();

    write_file(&source, "a.jpg", b"x");
    write_file(&source, "b.jpg", b"x");

    let summary = execute_moves(&["a.jpg".to_owned(), "b.jpg".to_owned()], &source, &dest);
    assert_eq!(summary.moved, 2);
    assert!(summary.failures.is_empty());
    assert!(dest.join("a.jpg").exists());
    assert!(dest.join("b.jpg").exists());
    assert!(!source.join("a.jpg").exists());
}

#[test]
fn existing_target_is_reported_not_overwritten() {
    let tmp = tempfile::tempdir().unwrap();
    let source = tmp.path().join("pending");
    let dest = tmp.path().join("uploaded");
    fs::create_dir_all(&source).unwrap();
    fs::create_dir_all(&dest).unwrap();

    write_file(&source, "a.jpg", b"new");
    write_file(&dest, "a.jpg", b"old");

    let summary = execute_moves(&["a.jpg".to_owned()], &source, &dest);
    assert_eq!(summary.moved, 0);
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].file_name, "a.jpg");
    // The original stayed where it was.
    assert_eq!(fs::read(dest.join("a.jpg")).unwrap(), b"old");
    assert!(source.join("a.jpg").exists());
}

#[test]
fn one_failure_does_not_stop_the_batch() {
    let tmp = tempfile::tempdir().unwrap();
    let source = tmp.path().join("pending");
    let dest = tmp.path().join("out");
    fs::create_dir_all(&source).unwrap();
    fs::create_dir_all(&dest).unwrap();

    write_file(&source, "real.jpg", b"x");

    let summary = execute_moves(
        &["missing.jpg".to_owned(), "real.jpg".to_owned()],
        &source,
        &dest,
    );
    assert_eq!(summary.moved, 1);
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].file_name, "missing.jpg");
    assert!(dest.join("real.jpg").exists());
}
