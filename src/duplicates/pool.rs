//! Bounded worker pool for content hashing.
//!
//! One [`HashPool`] is built per run and shared by every size group, so the
//! number of files open at once never exceeds the pool size no matter how
//! many groups or members there are. Each task owns its file handle and read
//! buffer; results come back in input order through rayon's indexed collect.

use std::path::PathBuf;

use rayon::prelude::*;

use crate::progress::ProgressCallback;
use crate::scanner::{HashResult, Hasher};

/// Error building the worker pool.
pub type PoolBuildError = rayon::ThreadPoolBuildError;

/// Fixed-size pool of hashing workers.
#[derive(Debug)]
pub struct HashPool {
    pool: rayon::ThreadPool,
}

impl HashPool {
    /// Build a pool with `threads` workers.
    ///
    /// `0` selects one worker per available processing unit.
    ///
    /// # Errors
    ///
    /// Returns an error if the operating system refuses to spawn the workers.
    pub fn new(threads: usize) -> Result<Self, PoolBuildError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("songdupe-hash-{i}"))
            .build()?;
        log::debug!("Hash pool started with {} workers", pool.current_num_threads());
        Ok(Self { pool })
    }

    /// Number of workers in the pool.
    #[must_use]
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Hash every path, blocking until all tasks have finished.
    ///
    /// The returned results are in the same order as `paths`.
    pub fn hash_all(
        &self,
        hasher: &Hasher,
        paths: &[PathBuf],
        progress: Option<&dyn ProgressCallback>,
    ) -> Vec<HashResult> {
        self.pool.install(|| {
            paths
                .par_iter()
                .map(|path| {
                    let result = hasher.hash(path);
                    match &result.digest {
                        Ok(_) => log::trace!("Hashed {}", path.display()),
                        Err(e) => log::warn!("Failed to hash {}: {}", path.display(), e),
                    }
                    if let Some(callback) = progress {
                        callback.on_file_hashed(path);
                    }
                    result
                })
                .collect()
        })
    }
}
