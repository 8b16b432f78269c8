//! Directory walker for music file discovery.
//!
//! # Overview
//!
//! [`Walker`] traverses a directory tree with [`walkdir`] and yields a
//! [`FileCandidate`] for every regular file whose name matches the configured
//! [`ExtensionSet`](super::ExtensionSet). Children are visited in file-name
//! order so discovery order is deterministic across runs.
//!
//! Entries that cannot be listed or stat'ed are yielded as [`ScanError`]
//! values and logged at warn level; iteration continues past them.
//!
//! # Example
//!
//! ```no_run
//! use songdupe::scanner::{list_files, WalkerConfig};
//! use std::path::Path;
//!
//! let (files, errors) = list_files(Path::new("/Volumes/MUSIC"), &WalkerConfig::default());
//! println!("{} music files, {} unreadable entries", files.len(), errors.len());
//! ```

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::{FileCandidate, ScanError, WalkerConfig};

/// Recursive directory walker yielding music file candidates.
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given path.
    #[must_use]
    pub fn new(path: &Path, config: WalkerConfig) -> Self {
        Self {
            root: path.to_path_buf(),
            config,
        }
    }

    /// Root directory of this walk.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the directory tree, yielding candidates and recoverable errors.
    ///
    /// Directories, non-matching files and (unless `follow_symlinks` is set)
    /// symbolic links are skipped silently.
    pub fn walk(&self) -> impl Iterator<Item = Result<FileCandidate, ScanError>> + '_ {
        let walk_dir = WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name();

        walk_dir
            .into_iter()
            .filter_map(move |entry_result| match entry_result {
                Ok(entry) => {
                    let file_type = entry.file_type();

                    // With follow_links the file type is the link target's
                    if !file_type.is_file() {
                        if file_type.is_symlink() {
                            log::trace!("Skipping symlink: {}", entry.path().display());
                        }
                        return None;
                    }

                    if !self.config.extensions.matches(entry.path()) {
                        log::trace!("Skipping non-music file: {}", entry.path().display());
                        return None;
                    }

                    match entry.metadata() {
                        Ok(metadata) => Some(Ok(FileCandidate {
                            path: entry.into_path(),
                            size: metadata.len(),
                        })),
                        Err(e) => Some(Err(self.handle_walk_error(e))),
                    }
                }
                Err(e) => Some(Err(self.handle_walk_error(e))),
            })
    }

    /// Convert a walkdir error into a [`ScanError`], logging it.
    fn handle_walk_error(&self, error: walkdir::Error) -> ScanError {
        let path = error
            .path()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);

        if let Some(ancestor) = error.loop_ancestor() {
            log::warn!(
                "Symlink loop at {} (points to {})",
                path.display(),
                ancestor.display()
            );
        } else {
            log::warn!("Cannot access {}: {}", path.display(), error);
        }

        match error.into_io_error() {
            Some(io) => ScanError::from_io(&path, io),
            None => ScanError::Io {
                path,
                source: std::io::Error::other("filesystem loop"),
            },
        }
    }
}

/// List every candidate under `root`, collecting errors instead of stopping.
///
/// Returns candidates in discovery order and the errors encountered.
#[must_use]
pub fn list_files(root: &Path, config: &WalkerConfig) -> (Vec<FileCandidate>, Vec<ScanError>) {
    let walker = Walker::new(root, config.clone());
    let mut files = Vec::new();
    let mut errors = Vec::new();

    for result in walker.walk() {
        match result {
            Ok(file) => files.push(file),
            Err(e) => errors.push(e),
        }
    }

    log::debug!(
        "Discovery of {}: {} candidates, {} errors",
        root.display(),
        files.len(),
        errors.len()
    );

    (files, errors)
}
