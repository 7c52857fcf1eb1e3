use std::fs;

use clonesift_fs::{AtomicWriteOptions, Error, PermissionMode, atomic_write};
use tempfile::tempdir;

#[test]
fn test_atomic_write_basic() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("gene_clone_summary.txt");

    atomic_write(&path, b"hello world", AtomicWriteOptions::new()).unwrap();

    assert!(path.exists());
    assert_eq!(fs::read(&path).unwrap(), b"hello world");
}

#[test]
fn test_atomic_write_replaces_existing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("existing.txt");

    fs::write(&path, "original").unwrap();

    atomic_write(&path, b"new content", AtomicWriteOptions::new()).unwrap();
    assert_eq!(fs::read(&path).unwrap(), b"new content");
}

#[test]
fn test_atomic_write_onto_directory_fails_cleanly() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("gene_clone_summary.html");
    fs::create_dir(&path).unwrap();

    let result = atomic_write(&path, b"<html></html>", AtomicWriteOptions::new());
    assert!(matches!(result, Err(Error::Write { .. })));

    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .filter(|n| n.to_string_lossy().starts_with(".tmp."))
        .collect();
    assert!(leftovers.is_empty(), "{leftovers:?}");
}

#[cfg(unix)]
#[test]
fn test_atomic_write_read_write_mode() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let path = dir.path().join("rename.txt");
    atomic_write(
        &path,
        b"x",
        AtomicWriteOptions::new().permissions(PermissionMode::ReadWrite),
    )
    .unwrap();

    let mode = fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o644);
}
