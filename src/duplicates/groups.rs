//! Size-based bucketing and duplicate group types.
//!
//! # Overview
//!
//! Size grouping is the first phase of duplicate detection. Files with
//! different sizes cannot be byte-identical, so only sizes shared by two or
//! more candidates are kept for hashing.
//!
//! Groups are returned in order of first appearance of their size in the
//! input, and members keep input order. Iteration order of any internal map
//! never leaks into the result.
//!
//! # Example
//!
//! ```
//! use songdupe::scanner::FileCandidate;
//! use songdupe::duplicates::bucket_by_size;
//!
//! let files = vec![
//!     FileCandidate::new("/a.mp3", 1024),
//!     FileCandidate::new("/b.mp3", 2048),
//!     FileCandidate::new("/c.mp3", 1024),
//! ];
//!
//! let (groups, stats) = bucket_by_size(files);
//!
//! assert_eq!(groups.len(), 1);
//! assert_eq!(groups[0].size, 1024);
//! assert_eq!(stats.eliminated_unique, 1);
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::scanner::{hash_to_hex, Digest, FileCandidate};

/// A group of candidate paths sharing one exact size.
///
/// Only materialized with 2 or more members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeGroup {
    /// File size in bytes (shared by all members)
    pub size: u64,
    /// Member paths in discovery order
    pub members: Vec<PathBuf>,
}

impl SizeGroup {
    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the group has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Bytes that would be read to hash every member.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.size * self.members.len() as u64
    }
}

/// Confirmed group of byte-identical files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    /// SHA-256 of the shared content
    pub digest: Digest,
    /// File size in bytes (shared by all members)
    pub size: u64,
    /// Member paths; always 2 or more
    pub members: Vec<PathBuf>,
}

impl DuplicateGroup {
    /// Create a new duplicate group.
    #[must_use]
    pub fn new(digest: Digest, size: u64, members: Vec<PathBuf>) -> Self {
        debug_assert!(members.len() >= 2, "duplicate group needs 2+ members");
        Self {
            digest,
            size,
            members,
        }
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the group has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Number of redundant copies (all members minus one).
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.members.len().saturating_sub(1)
    }

    /// Bytes freed by keeping one copy.
    #[must_use]
    pub fn wasted_space(&self) -> u64 {
        self.size * self.duplicate_count() as u64
    }

    /// Digest as a hexadecimal string.
    #[must_use]
    pub fn digest_hex(&self) -> String {
        hash_to_hex(&self.digest)
    }

    /// Whether `path` is a member of this group.
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.members.iter().any(|m| m == path)
    }
}

/// Statistics from the size grouping phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupingStats {
    /// Total number of candidates processed
    pub total_files: usize,
    /// Total size of all candidates in bytes
    pub total_size: u64,
    /// Number of distinct sizes seen
    pub unique_sizes: usize,
    /// Number of candidates in groups of 2+
    pub potential_duplicates: usize,
    /// Number of candidates eliminated because their size was unique
    pub eliminated_unique: usize,
    /// Number of size groups kept
    pub size_groups: usize,
}

impl GroupingStats {
    /// Percentage of candidates eliminated by size grouping.
    #[must_use]
    pub fn elimination_rate(&self) -> f64 {
        if self.total_files == 0 {
            0.0
        } else {
            (self.eliminated_unique as f64 / self.total_files as f64) * 100.0
        }
    }
}

/// Partition candidates by exact size, dropping sizes with a single member.
///
/// # Returns
///
/// A tuple of:
/// - `Vec<SizeGroup>` - Groups with 2+ members, ordered by first appearance
/// - `GroupingStats` - Statistics about the grouping operation
///
/// # Performance
///
/// O(n) time and space; no file I/O.
#[must_use]
pub fn bucket_by_size(
    candidates: impl IntoIterator<Item = FileCandidate>,
) -> (Vec<SizeGroup>, GroupingStats) {
    let mut stats = GroupingStats::default();
    let mut index: HashMap<u64, usize> = HashMap::new();
    let mut all_groups: Vec<SizeGroup> = Vec::new();

    for candidate in candidates {
        stats.total_files += 1;
        stats.total_size += candidate.size;

        match index.get(&candidate.size) {
            Some(&slot) => all_groups[slot].members.push(candidate.path),
            None => {
                index.insert(candidate.size, all_groups.len());
                all_groups.push(SizeGroup {
                    size: candidate.size,
                    members: vec![candidate.path],
                });
            }
        }
    }

    stats.unique_sizes = all_groups.len();

    let groups: Vec<SizeGroup> = all_groups
        .into_iter()
        .filter(|group| {
            if group.members.len() < 2 {
                stats.eliminated_unique += group.members.len();
                log::trace!(
                    "Eliminated unique size {}: {}",
                    group.size,
                    group.members[0].display()
                );
                false
            } else {
                stats.potential_duplicates += group.members.len();
                log::debug!(
                    "Size group {} bytes: {} potential duplicates",
                    group.size,
                    group.members.len()
                );
                true
            }
        })
        .collect();

    stats.size_groups = groups.len();

    log::debug!(
        "Size grouping complete: {} files → {} potential duplicates in {} groups ({:.1}% eliminated)",
        stats.total_files,
        stats.potential_duplicates,
        stats.size_groups,
        stats.elimination_rate()
    );

    (groups, stats)
}
