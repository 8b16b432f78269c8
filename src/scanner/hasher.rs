//! SHA-256 file hasher with streaming support.
//!
//! # Overview
//!
//! [`Hasher`] reads a file sequentially in fixed-size chunks and feeds each
//! chunk into an incremental SHA-256 accumulator, so peak memory per file is
//! one chunk regardless of file size.
//!
//! # Example
//!
//! ```no_run
//! use songdupe::scanner::{hash_to_hex, Hasher};
//! use std::path::Path;
//!
//! let hasher = Hasher::new();
//! let result = hasher.hash(Path::new("/music/song.mp3"));
//! match result.digest() {
//!     Some(digest) => println!("{}", hash_to_hex(digest)),
//!     None => eprintln!("could not read {}", result.path.display()),
//! }
//! ```

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

use sha2::{Digest as _, Sha256};

use super::HashError;

/// Default read chunk size in bytes.
pub const CHUNK_SIZE: usize = 8192;

/// Largest accepted read chunk size in bytes (64 MiB).
///
/// Every hashing worker holds one buffer of this size.
pub const MAX_CHUNK_SIZE: usize = 64 * 1024 * 1024;

/// A 256-bit content digest.
pub type Digest = [u8; 32];

/// Outcome of hashing one file.
///
/// A failed `digest` is the "absent digest" case: the file could not be
/// opened or fully read.
#[derive(Debug)]
pub struct HashResult {
    /// Path that was hashed
    pub path: PathBuf,
    /// Digest of the full content, or why it could not be computed
    pub digest: Result<Digest, HashError>,
}

impl HashResult {
    /// The digest, if the file was read to the end.
    #[must_use]
    pub fn digest(&self) -> Option<&Digest> {
        self.digest.as_ref().ok()
    }

    /// Whether hashing failed.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        self.digest.is_err()
    }
}

/// Streaming SHA-256 hasher.
#[derive(Debug, Clone)]
pub struct Hasher {
    chunk_size: usize,
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher {
    /// Create a hasher using the default 8 KiB chunk size.
    #[must_use]
    pub fn new() -> Self {
        Self {
            chunk_size: CHUNK_SIZE,
        }
    }

    /// Create a hasher with a custom chunk size, clamped to `1..=MAX_CHUNK_SIZE`.
    #[must_use]
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.clamp(1, MAX_CHUNK_SIZE),
        }
    }

    /// Configured chunk size in bytes.
    #[must_use]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Hash a file, never failing: errors are carried in the result.
    #[must_use]
    pub fn hash(&self, path: &Path) -> HashResult {
        HashResult {
            path: path.to_path_buf(),
            digest: self.full_hash(path),
        }
    }

    /// Compute the SHA-256 digest of a file's full content.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file cannot be opened or a read fails
    /// before end of file.
    pub fn full_hash(&self, path: &Path) -> Result<Digest, HashError> {
        let file = File::open(path).map_err(|e| HashError::from_io(path, e))?;
        self.hash_reader(file)
            .map_err(|e| HashError::from_io(path, e))
    }

    /// Compute the SHA-256 digest of everything `reader` yields.
    ///
    /// # Errors
    ///
    /// Returns the first non-interrupt I/O error from `reader`.
    pub fn hash_reader<R: Read>(&self, mut reader: R) -> std::io::Result<Digest> {
        let mut sha = Sha256::new();
        let mut buf = vec![0u8; self.chunk_size];

        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            sha.update(&buf[..n]);
        }

        Ok(sha.finalize().into())
    }
}

/// Convert a digest to a lowercase hexadecimal string.
#[must_use]
pub fn hash_to_hex(hash: &Digest) -> String {
    hash.iter().map(|b| format!("{b:02x}")).collect()
}

/// Parse a 64-character hexadecimal string into a digest.
#[must_use]
pub fn hex_to_hash(hex: &str) -> Option<Digest> {
    if hex.len() != 64 || !hex.is_ascii() {
        return None;
    }
    let mut out = [0u8; 32];
    for (i, byte) in out.iter_mut().enumerate() {
        *byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).ok()?;
    }
    Some(out)
}
