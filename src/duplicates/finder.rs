//! Duplicate finder implementation.
//!
//! # Overview
//!
//! This module orchestrates the duplicate detection pipeline:
//! 1. **Discovery** - Walk the root and collect music file candidates
//! 2. **Size grouping** - Bucket candidates by exact size (see [`crate::duplicates::groups`])
//! 3. **Hash grouping** - For each size group, hash members on a bounded
//!    pool and regroup them by SHA-256 digest
//! 4. **Report** - Concatenate the groups and counts into a [`DuplicateReport`]
//!
//! # Ordering
//!
//! Size groups are processed in order of first appearance. Within a size
//! group, digest groups are ordered by the first member that produced the
//! digest, and members keep size-group order. Given the walker's sorted
//! traversal, two runs over an unchanged tree produce identical reports.
//!
//! # Example
//!
//! ```no_run
//! use songdupe::duplicates::{DuplicateFinder, FinderConfig};
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::new(FinderConfig::default().with_threads(4));
//! let report = finder.find_duplicates(Path::new("/Volumes/MUSIC")).unwrap();
//!
//! print!("{}", report.render());
//! ```

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use super::pool::{HashPool, PoolBuildError};
use super::report::{DuplicateReport, ScanCounts};
use super::{bucket_by_size, DuplicateGroup, SizeGroup};
use crate::progress::ProgressCallback;
use crate::scanner::{
    hash_to_hex, Digest, FileCandidate, HashError, Hasher, ScanWarning, Walker, WalkerConfig,
    CHUNK_SIZE, MAX_CHUNK_SIZE,
};

/// Outcome of hashing one size group.
#[derive(Debug, Default)]
pub struct HashGrouping {
    /// Digest groups with 2+ members, in first-appearance order
    pub groups: Vec<DuplicateGroup>,
    /// Files that could not be hashed
    pub errors: Vec<HashError>,
    /// Number of files hashed successfully
    pub hashed_files: usize,
}

/// Hash every member of a size group and regroup them by digest.
///
/// Blocks until all members are hashed. Members whose digest could not be
/// computed are logged, returned in `errors` and left out of every group.
/// Digest groups with a single member are dropped.
///
/// # Example
///
/// ```no_run
/// use songdupe::duplicates::{group_by_hash, HashPool, SizeGroup};
/// use songdupe::scanner::Hasher;
/// use std::path::PathBuf;
///
/// let group = SizeGroup {
///     size: 10,
///     members: vec![PathBuf::from("/a.mp3"), PathBuf::from("/b.mp3")],
/// };
/// let pool = HashPool::new(0).unwrap();
/// let grouping = group_by_hash(&group, &Hasher::new(), &pool, None);
/// println!("{} duplicate groups", grouping.groups.len());
/// ```
#[must_use]
pub fn group_by_hash(
    size_group: &SizeGroup,
    hasher: &Hasher,
    pool: &HashPool,
    progress: Option<&dyn ProgressCallback>,
) -> HashGrouping {
    let results = pool.hash_all(hasher, &size_group.members, progress);

    let mut grouping = HashGrouping::default();
    let mut index: HashMap<Digest, usize> = HashMap::new();
    let mut by_digest: Vec<(Digest, Vec<PathBuf>)> = Vec::new();

    for result in results {
        match result.digest {
            Ok(digest) => {
                grouping.hashed_files += 1;
                match index.entry(digest) {
                    Entry::Occupied(slot) => by_digest[*slot.get()].1.push(result.path),
                    Entry::Vacant(slot) => {
                        slot.insert(by_digest.len());
                        by_digest.push((digest, vec![result.path]));
                    }
                }
            }
            Err(e) => grouping.errors.push(e),
        }
    }

    grouping.groups = by_digest
        .into_iter()
        .filter(|(digest, members)| {
            if members.len() < 2 {
                log::trace!(
                    "Unique digest {}: {}",
                    hash_to_hex(digest),
                    members[0].display()
                );
                false
            } else {
                true
            }
        })
        .map(|(digest, members)| {
            log::debug!(
                "Duplicate group {}: {} files, {} bytes each",
                hash_to_hex(&digest),
                members.len(),
                size_group.size
            );
            DuplicateGroup::new(digest, size_group.size, members)
        })
        .collect();

    grouping
}

/// Configuration for the duplicate finder.
///
/// An explicit value handed to [`DuplicateFinder::new`]; nothing is read
/// from process-wide state.
#[derive(Clone)]
pub struct FinderConfig {
    /// Hashing workers; 0 means one per available processing unit.
    pub threads: usize,
    /// Read chunk size for hashing, in bytes.
    pub chunk_size: usize,
    /// Walker configuration for discovery.
    pub walker_config: WalkerConfig,
    /// Optional progress callback for reporting.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderConfig")
            .field("threads", &self.threads)
            .field("chunk_size", &self.chunk_size)
            .field("walker_config", &self.walker_config)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            threads: 0,
            chunk_size: CHUNK_SIZE,
            walker_config: WalkerConfig::default(),
            progress_callback: None,
        }
    }
}

impl FinderConfig {
    /// Set the number of hashing workers (0 = available processing units).
    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Set the hashing read chunk size, clamped to `1..=MAX_CHUNK_SIZE`.
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.clamp(1, MAX_CHUNK_SIZE);
        self
    }

    /// Set the walker configuration.
    #[must_use]
    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker_config = config;
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }
}

/// Errors that stop a run before any work is done.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The provided path does not exist.
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// The provided path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// The hashing worker pool could not be started.
    #[error("Failed to start hashing workers: {0}")]
    ThreadPool(#[from] PoolBuildError),
}

/// Duplicate finder that runs the pipeline end to end.
pub struct DuplicateFinder {
    config: FinderConfig,
    hasher: Hasher,
}

impl DuplicateFinder {
    /// Create a new duplicate finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        let hasher = Hasher::with_chunk_size(config.chunk_size);
        Self { config, hasher }
    }

    /// Create a new duplicate finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }

    /// The configuration this finder runs with.
    #[must_use]
    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    fn progress(&self) -> Option<&dyn ProgressCallback> {
        self.config.progress_callback.as_deref()
    }

    /// Find all duplicate music files under `root`.
    ///
    /// Unreadable entries and files that fail to hash become warnings in the
    /// report; they never abort the run.
    ///
    /// # Errors
    ///
    /// Returns `FinderError` if:
    /// - The path does not exist
    /// - The path is not a directory
    /// - The hashing pool cannot be started
    pub fn find_duplicates(&self, root: &std::path::Path) -> Result<DuplicateReport, FinderError> {
        let start_time = Instant::now();

        if !root.exists() {
            return Err(FinderError::PathNotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(FinderError::NotADirectory(root.to_path_buf()));
        }

        log::debug!("Scanning {}", root.display());

        let walker = Walker::new(root, self.config.walker_config.clone());
        let mut candidates = Vec::new();
        let mut warnings = Vec::new();

        for result in walker.walk() {
            match result {
                Ok(file) => candidates.push(file),
                Err(e) => warnings.push(ScanWarning::Discovery(e)),
            }
        }

        self.run_pipeline(candidates, warnings, start_time)
    }

    /// Find duplicates among an already-collected list of candidates.
    ///
    /// # Errors
    ///
    /// Returns `FinderError::ThreadPool` if the hashing pool cannot be started.
    pub fn find_duplicates_from_files(
        &self,
        candidates: Vec<FileCandidate>,
    ) -> Result<DuplicateReport, FinderError> {
        self.run_pipeline(candidates, Vec::new(), Instant::now())
    }

    fn run_pipeline(
        &self,
        candidates: Vec<FileCandidate>,
        mut warnings: Vec<ScanWarning>,
        start_time: Instant,
    ) -> Result<DuplicateReport, FinderError> {
        let mut counts = ScanCounts {
            total_files: candidates.len(),
            total_size: candidates.iter().map(|c| c.size).sum(),
            ..Default::default()
        };

        log::debug!("Discovered {} candidates", counts.total_files);
        if let Some(callback) = self.progress() {
            callback.on_files_discovered(counts.total_files);
        }

        let (size_groups, _) = bucket_by_size(candidates);
        counts.size_groups = size_groups.len();

        if let Some(callback) = self.progress() {
            callback.on_size_groups(size_groups.len());
        }

        let mut per_bucket = Vec::with_capacity(size_groups.len());

        if !size_groups.is_empty() {
            let pool = HashPool::new(self.config.threads)?;
            log::debug!(
                "Hashing {} size groups with {} workers",
                size_groups.len(),
                pool.threads()
            );

            for group in &size_groups {
                log::debug!(
                    "Hashing {} files of size {} bytes",
                    group.len(),
                    group.size
                );
                if let Some(callback) = self.progress() {
                    callback.on_bucket_start(group.size, group.len());
                }

                let grouping = group_by_hash(group, &self.hasher, &pool, self.progress());

                if let Some(callback) = self.progress() {
                    callback.on_bucket_end(group.size);
                }

                counts.hashed_files += grouping.hashed_files;
                warnings.extend(grouping.errors.into_iter().map(ScanWarning::Hash));
                per_bucket.push(grouping.groups);
            }
        }

        let mut report = DuplicateReport::build(per_bucket, counts, warnings);
        report.scan_duration = start_time.elapsed();

        log::debug!(
            "Scan complete: {} duplicate groups, {} duplicate files, {} reclaimable, {} warnings",
            report.duplicate_groups,
            report.duplicate_files,
            report.reclaimable_display(),
            report.warnings.len()
        );

        Ok(report)
    }
}
