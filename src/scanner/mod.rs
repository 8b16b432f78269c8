//! Scanner module for music file discovery and content hashing.
//!
//! This module provides functionality for:
//! - Recursive directory walking using walkdir
//! - Extension-based filtering of music files
//! - Streaming SHA-256 content hashing
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory traversal and candidate discovery
//! - [`extensions`]: Case-insensitive filename suffix matching
//! - [`hasher`]: SHA-256 file hashing (streaming, fixed chunk size)
//!
//! # Example
//!
//! ```no_run
//! use songdupe::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("/Volumes/MUSIC"), WalkerConfig::default());
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(file) => println!("{}: {} bytes", file.path.display(), file.size),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

pub mod extensions;
pub mod hasher;
pub mod walker;

use std::path::{Path, PathBuf};

// Re-export main types
pub use extensions::{ExtensionSet, DEFAULT_EXTENSIONS};
pub use hasher::{
    hash_to_hex, hex_to_hash, Digest, HashResult, Hasher, CHUNK_SIZE, MAX_CHUNK_SIZE,
};
pub use walker::{list_files, Walker};

/// A music file discovered during the walk.
///
/// Path uniquely identifies a candidate within one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    /// Path to the file
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
}

impl FileCandidate {
    /// Create a new candidate.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }
}

/// Configuration for directory walking.
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Follow symbolic links during traversal.
    /// Symlink cycles are reported as walk errors, not handled specially.
    pub follow_symlinks: bool,

    /// Filename suffixes that mark a file as a candidate.
    pub extensions: ExtensionSet,
}

impl WalkerConfig {
    /// Create a new walker configuration.
    #[must_use]
    pub fn new(follow_symlinks: bool, extensions: ExtensionSet) -> Self {
        Self {
            follow_symlinks,
            extensions,
        }
    }
}

/// Errors that can occur during directory scanning.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when accessing a file or directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// An I/O error occurred while accessing a file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Classify an I/O error for `path`.
    #[must_use]
    pub fn from_io(path: &Path, error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            std::io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }

    /// Path the error is attached to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::PermissionDenied(path) | Self::NotFound(path) => path,
            Self::Io { path, .. } => path,
        }
    }
}

/// Errors that can occur during file hashing.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The specified file was not found.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl HashError {
    /// Classify an I/O error for `path`.
    #[must_use]
    pub fn from_io(path: &Path, error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }

    /// Path the error is attached to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(path) | Self::PermissionDenied(path) => path,
            Self::Io { path, .. } => path,
        }
    }
}

/// A recovered, path-scoped problem encountered during a run.
///
/// Warnings never abort the scan; they are collected into the report.
#[derive(thiserror::Error, Debug)]
pub enum ScanWarning {
    /// An entry could not be listed or stat'ed during discovery.
    #[error(transparent)]
    Discovery(#[from] ScanError),

    /// A candidate could not be opened or fully read during hashing.
    #[error(transparent)]
    Hash(#[from] HashError),
}

impl ScanWarning {
    /// Path the warning is attached to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Discovery(e) => e.path(),
            Self::Hash(e) => e.path(),
        }
    }

    /// Short stage label used by the output formatters.
    #[must_use]
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Discovery(_) => "discovery",
            Self::Hash(_) => "hash",
        }
    }
}
