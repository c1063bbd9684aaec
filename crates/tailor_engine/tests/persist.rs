use std::fs;

use tailor_engine::{ensure_output_dir, AtomicFileWriter};
use tempfile::TempDir;

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("exports");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn rewriting_replaces_previous_artifact() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write_bytes("optimized_resume.pdf", b"%PDF-first").unwrap();
    assert_eq!(first.file_name().unwrap(), "optimized_resume.pdf");
    assert_eq!(fs::read(&first).unwrap(), b"%PDF-first");

    let second = writer.write_bytes("optimized_resume.pdf", b"%PDF-second").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read(&second).unwrap(), b"%PDF-second");
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
}

#[test]
fn no_partial_file_when_target_dir_is_a_file() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    assert!(writer.write_bytes("optimized_resume.pdf", b"data").is_err());
    assert!(!file_path.with_file_name("optimized_resume.pdf").exists());
}

#[test]
fn failed_write_keeps_existing_entry_and_leaves_no_temp_files() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("optimized_resume.pdf");
    fs::create_dir(&blocker).unwrap();
    fs::write(blocker.join("keep.txt"), "previous").unwrap();

    let writer = AtomicFileWriter::new(temp.path().to_path_buf());
    assert!(writer.write_bytes("optimized_resume.pdf", b"%PDF-new").is_err());

    assert_eq!(fs::read_to_string(blocker.join("keep.txt")).unwrap(), "previous");
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
}
