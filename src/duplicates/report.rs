//! Final duplicate report and its text rendering.
//!
//! A [`DuplicateReport`] concatenates the duplicate groups of every size
//! group in processing order, keeps the warnings collected along the way and
//! carries aggregate counts. Rendering is plain text and fully determined by
//! the group order.

use std::fmt::Write as _;
use std::time::Duration;

use bytesize::ByteSize;

use super::DuplicateGroup;
use crate::scanner::ScanWarning;

/// Counts gathered before the report is assembled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanCounts {
    /// Candidates produced by discovery
    pub total_files: usize,
    /// Combined size of all candidates in bytes
    pub total_size: u64,
    /// Size groups with 2+ members that were hashed
    pub size_groups: usize,
    /// Files whose digest was computed successfully
    pub hashed_files: usize,
}

/// Result of one run of the pipeline.
#[derive(Debug, Default)]
pub struct DuplicateReport {
    /// Duplicate groups in processing order
    pub groups: Vec<DuplicateGroup>,
    /// Total number of candidates scanned
    pub total_files: usize,
    /// Combined size of all candidates in bytes
    pub total_size: u64,
    /// Number of size groups examined
    pub size_groups: usize,
    /// Number of files hashed successfully
    pub hashed_files: usize,
    /// Number of duplicate groups found
    pub duplicate_groups: usize,
    /// Redundant copies across all groups (members minus one per group)
    pub duplicate_files: usize,
    /// Bytes freed by keeping one copy per group
    pub reclaimable_space: u64,
    /// Recovered problems, each tied to a path
    pub warnings: Vec<ScanWarning>,
    /// Wall-clock duration of the run
    pub scan_duration: Duration,
}

impl DuplicateReport {
    /// Assemble a report from per-bucket group lists.
    ///
    /// Buckets are concatenated in iteration order; each bucket's internal
    /// order is preserved.
    ///
    /// # Example
    ///
    /// ```
    /// use songdupe::duplicates::{DuplicateGroup, DuplicateReport, ScanCounts};
    /// use std::path::PathBuf;
    ///
    /// let bucket = vec![DuplicateGroup::new(
    ///     [0u8; 32],
    ///     10,
    ///     vec![PathBuf::from("/a.mp3"), PathBuf::from("/b.mp3")],
    /// )];
    /// let report = DuplicateReport::build(vec![bucket], ScanCounts::default(), Vec::new());
    ///
    /// assert_eq!(report.duplicate_groups, 1);
    /// assert_eq!(report.reclaimable_space, 10);
    /// ```
    #[must_use]
    pub fn build(
        per_bucket: impl IntoIterator<Item = Vec<DuplicateGroup>>,
        counts: ScanCounts,
        warnings: Vec<ScanWarning>,
    ) -> Self {
        let groups: Vec<DuplicateGroup> = per_bucket.into_iter().flatten().collect();

        Self {
            duplicate_groups: groups.len(),
            duplicate_files: groups.iter().map(DuplicateGroup::duplicate_count).sum(),
            reclaimable_space: groups.iter().map(DuplicateGroup::wasted_space).sum(),
            groups,
            total_files: counts.total_files,
            total_size: counts.total_size,
            size_groups: counts.size_groups,
            hashed_files: counts.hashed_files,
            warnings,
            scan_duration: Duration::ZERO,
        }
    }

    /// Whether no duplicates were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Whether any warnings were recorded.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Reclaimable space as a human-readable string.
    #[must_use]
    pub fn reclaimable_display(&self) -> String {
        ByteSize(self.reclaimable_space).to_string()
    }

    /// Render one block per group, separated by blank lines.
    ///
    /// ```text
    /// Duplicate group #1 (2 files, 10 B each, sha256 3b6a1c2f…):
    ///   1. /music/a.mp3
    ///   2. /backup/a.mp3
    /// ```
    ///
    /// An empty report renders as an empty string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();

        for (i, group) in self.groups.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            let hex = group.digest_hex();
            let _ = writeln!(
                out,
                "Duplicate group #{} ({} files, {} each, sha256 {}…):",
                i + 1,
                group.len(),
                ByteSize(group.size),
                &hex[..12]
            );
            for (j, path) in group.members.iter().enumerate() {
                let _ = writeln!(out, "  {}. {}", j + 1, path.display());
            }
        }

        out
    }
}
