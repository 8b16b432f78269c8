use songdupe::duplicates::{DuplicateFinder, FinderConfig, FinderError};
use songdupe::error::ExitCode;
use songdupe::scanner::{FileCandidate, HashError, ScanWarning};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_missing_files_become_warnings() {
    let finder = DuplicateFinder::with_defaults();
    let file1 = FileCandidate::new(PathBuf::from("nonexistent_1.mp3"), 100);
    let file2 = FileCandidate::new(PathBuf::from("nonexistent_2.mp3"), 100);

    let report = finder.find_duplicates_from_files(vec![file1, file2]).unwrap();

    assert!(report.groups.is_empty());
    assert_eq!(report.hashed_files, 0);
    assert_eq!(report.warnings.len(), 2);
    for warning in &report.warnings {
        match warning {
            ScanWarning::Hash(HashError::NotFound(_)) => {}
            other => panic!("Expected NotFound HashError, got: {other:?}"),
        }
    }
    assert_eq!(ExitCode::for_report(&report), ExitCode::PartialSuccess);
}

#[test]
fn test_file_removed_after_discovery() {
    let dir = tempdir().unwrap();
    let keep_a = dir.path().join("a.mp3");
    let keep_b = dir.path().join("b.mp3");
    let removed = dir.path().join("c.mp3");
    for path in [&keep_a, &keep_b, &removed] {
        fs::write(path, b"same size").unwrap();
    }

    let (candidates, errors) =
        songdupe::scanner::list_files(dir.path(), &songdupe::scanner::WalkerConfig::default());
    assert!(errors.is_empty());
    fs::remove_file(&removed).unwrap();

    let report = DuplicateFinder::new(FinderConfig::default().with_threads(2))
        .find_duplicates_from_files(candidates)
        .unwrap();

    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].path(), removed.as_path());
    assert_eq!(report.warnings[0].stage(), "hash");
    assert_eq!(report.groups.len(), 1);
    assert_eq!(report.groups[0].members, vec![keep_a, keep_b]);
}

#[test]
fn test_nonexistent_root_is_an_error() {
    let dir = tempdir().unwrap();
    let result = DuplicateFinder::with_defaults().find_duplicates(&dir.path().join("MUSIC"));

    match result {
        Err(FinderError::PathNotFound(path)) => assert!(path.ends_with("MUSIC")),
        other => panic!("Expected PathNotFound, got: {other:?}"),
    }
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_is_skipped() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.mp3"), b"dupe").unwrap();
    fs::write(dir.path().join("b.mp3"), b"dupe").unwrap();
    let locked = dir.path().join("locked");
    fs::create_dir(&locked).unwrap();
    fs::write(locked.join("c.mp3"), b"dupe").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Root ignores permission bits; nothing to observe then.
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let report = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    assert_eq!(report.groups.len(), 1);
    assert_eq!(report.groups[0].len(), 2);
    assert!(report
        .warnings
        .iter()
        .any(|w| w.stage() == "discovery" && w.path().starts_with(&locked)));
}
