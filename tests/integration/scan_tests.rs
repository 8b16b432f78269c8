use songdupe::duplicates::{DuplicateFinder, FinderConfig};
use songdupe::scanner::{list_files, ExtensionSet, WalkerConfig};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write(path: &Path, content: &[u8]) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
    path.to_path_buf()
}

fn finder(threads: usize) -> DuplicateFinder {
    DuplicateFinder::new(FinderConfig::default().with_threads(threads))
}

#[test]
fn test_scan_empty_directory() {
    let dir = tempdir().unwrap();

    let report = finder(2).find_duplicates(dir.path()).unwrap();

    assert!(report.is_empty());
    assert!(report.warnings.is_empty());
    assert_eq!(report.total_files, 0);
    assert_eq!(report.render(), "");
}

#[test]
fn test_scan_abcd_scenario() {
    let dir = tempdir().unwrap();
    let a = write(&dir.path().join("A.mp3"), &[b'x'; 10]);
    let b = write(&dir.path().join("B.mp3"), &[b'x'; 10]);
    write(&dir.path().join("C.mp3"), &[b'y'; 10]);
    write(&dir.path().join("D.mp3"), &[b'z'; 20]);

    let report = finder(4).find_duplicates(dir.path()).unwrap();

    assert_eq!(report.total_files, 4);
    assert_eq!(report.size_groups, 1);
    assert_eq!(report.hashed_files, 3);
    assert_eq!(report.groups.len(), 1);
    assert_eq!(report.groups[0].members, vec![a, b]);
    assert_eq!(report.groups[0].size, 10);
    assert_eq!(report.reclaimable_space, 10);
}

#[test]
fn test_scan_equal_size_different_content() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("one.flac"), b"aaaa");
    write(&dir.path().join("two.flac"), b"bbbb");

    let report = finder(2).find_duplicates(dir.path()).unwrap();

    assert_eq!(report.size_groups, 1);
    assert!(report.is_empty());
}

#[test]
fn test_scan_three_identical_files() {
    let dir = tempdir().unwrap();
    for name in ["1.wav", "2.wav", "3.wav"] {
        write(&dir.path().join(name), b"identical pcm data");
    }

    let report = finder(2).find_duplicates(dir.path()).unwrap();

    assert_eq!(report.groups.len(), 1);
    assert_eq!(report.groups[0].len(), 3);
    assert_eq!(report.duplicate_files, 2);
}

#[test]
fn test_scan_nested_directories_and_extension_filter() {
    let dir = tempdir().unwrap();
    let top = write(&dir.path().join("Album/track.MP3"), b"same bytes");
    let deep = write(&dir.path().join("Backup/2019/Album/track.mp3"), b"same bytes");
    write(&dir.path().join("Album/cover.jpg"), b"same bytes");
    write(&dir.path().join("notes.txt"), b"same bytes");

    let report = finder(2).find_duplicates(dir.path()).unwrap();

    assert_eq!(report.total_files, 2);
    assert_eq!(report.groups.len(), 1);
    assert_eq!(report.groups[0].members, vec![top, deep]);
}

#[test]
fn test_scan_custom_extensions() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("a.opus"), b"opus");
    write(&dir.path().join("b.opus"), b"opus");
    write(&dir.path().join("c.mp3"), b"opus");

    let walker_config = WalkerConfig::new(false, ExtensionSet::new(["opus"]));
    let report = DuplicateFinder::new(FinderConfig::default().with_walker_config(walker_config))
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(report.total_files, 2);
    assert_eq!(report.groups.len(), 1);
    assert!(report.groups[0]
        .members
        .iter()
        .all(|p| p.extension().unwrap() == "opus"));
}

#[test]
fn test_scan_groups_ordered_by_first_appearance() {
    let dir = tempdir().unwrap();
    // Discovery is sorted by file name, so size 7 appears before size 3.
    write(&dir.path().join("a.ogg"), b"seven!!");
    write(&dir.path().join("b.ogg"), b"333");
    write(&dir.path().join("c.ogg"), b"333");
    write(&dir.path().join("d.ogg"), b"seven!!");

    let report = finder(4).find_duplicates(dir.path()).unwrap();

    let sizes: Vec<u64> = report.groups.iter().map(|g| g.size).collect();
    assert_eq!(sizes, vec![7, 3]);
}

#[test]
fn test_scan_is_idempotent() {
    let dir = tempdir().unwrap();
    for i in 0..12 {
        let content = format!("song body {}", i % 4);
        write(&dir.path().join(format!("disc{}/t{i:02}.m4a", i % 3)), content.as_bytes());
    }

    let first = finder(3).find_duplicates(dir.path()).unwrap();
    let second = finder(1).find_duplicates(dir.path()).unwrap();

    assert_eq!(first.groups, second.groups);
    assert_eq!(first.render(), second.render());
    assert_eq!(first.groups.len(), 4);
}

#[test]
fn test_scan_zero_byte_files_group_together() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("empty1.aac"), b"");
    write(&dir.path().join("empty2.aac"), b"");

    let report = finder(2).find_duplicates(dir.path()).unwrap();

    assert_eq!(report.groups.len(), 1);
    assert_eq!(report.groups[0].size, 0);
    assert_eq!(report.reclaimable_space, 0);
}

#[test]
fn test_list_files_matches_finder_discovery() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("x/1.mp3"), b"1");
    write(&dir.path().join("y/2.flac"), b"22");
    write(&dir.path().join("y/skip.doc"), b"333");

    let (files, errors) = list_files(dir.path(), &WalkerConfig::default());

    assert!(errors.is_empty());
    assert_eq!(files.len(), 2);
    assert_eq!(files[0].size, 1);
    assert_eq!(files[1].size, 2);
}

#[test]
fn test_every_group_has_two_members_and_one_size() {
    let dir = tempdir().unwrap();
    for i in 0..30 {
        let content = vec![b'a' + (i % 5) as u8; 1 + (i % 3)];
        write(&dir.path().join(format!("f{i:02}.wav")), &content);
    }

    let report = finder(4).find_duplicates(dir.path()).unwrap();

    assert!(!report.groups.is_empty());
    for group in &report.groups {
        assert!(group.len() >= 2);
        for member in &group.members {
            assert_eq!(fs::metadata(member).unwrap().len(), group.size);
        }
    }
}
