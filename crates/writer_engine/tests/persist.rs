use std::fs;
use std::path::Path;

use tempfile::TempDir;
use writer_engine::{ensure_dir, AtomicFileWriter, PersistError};

#[test]
fn creates_missing_directory() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("documents").join("drafts");
    assert!(!new_dir.exists());
    ensure_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn atomic_write_replaces_existing_file() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path());

    let first = writer.write("letter.txt", "hello").unwrap();
    assert_eq!(fs::read_to_string(&first).unwrap(), "hello");

    let second = writer.write("letter.txt", b"world").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "world");
    // Only the target remains; the temp file was renamed over it.
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
}

#[test]
fn file_in_place_of_directory_is_rejected() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let result = AtomicFileWriter::new(&file_path).write("letter.txt", "data");
    assert!(matches!(result, Err(PersistError::Directory(_))));
    assert!(!file_path.with_file_name("letter.txt").exists());
}

#[test]
fn for_path_splits_directory_and_name() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("chapters").join("one.md");

    let (writer, filename) = AtomicFileWriter::for_path(&target).unwrap();
    assert_eq!(filename, "one.md");
    assert_eq!(writer.write(filename, "# One").unwrap(), target);

    let (_, bare) = AtomicFileWriter::for_path(Path::new("notes.txt")).unwrap();
    assert_eq!(bare, "notes.txt");
    assert!(matches!(
        AtomicFileWriter::for_path(Path::new("/")),
        Err(PersistError::InvalidPath(_))
    ));
}

#[cfg(unix)]
#[test]
fn replacing_a_file_keeps_its_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let target = temp.path().join("shared.txt");
    fs::write(&target, "old").unwrap();
    fs::set_permissions(&target, fs::Permissions::from_mode(0o644)).unwrap();

    AtomicFileWriter::new(temp.path())
        .write("shared.txt", "new")
        .unwrap();

    let mode = fs::metadata(&target).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o644);
}
