//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Size-based file grouping (Phase 1)
//! - Full content hash comparison on a bounded pool (Phase 2)
//! - Report assembly and rendering

pub mod finder;
pub mod groups;
pub mod pool;
pub mod report;

pub use finder::{group_by_hash, DuplicateFinder, FinderConfig, FinderError, HashGrouping};
pub use groups::{bucket_by_size, DuplicateGroup, GroupingStats, SizeGroup};
pub use pool::{HashPool, PoolBuildError};
pub use report::{DuplicateReport, ScanCounts};
