//! JSON output formatter for duplicate reports.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "duplicates": [
//!     {
//!       "sha256": "2d711642b726b04401627ca9fbac32f5c8530fb1903cc4db02258717921a4881",
//!       "size": 10,
//!       "files": ["/music/a.mp3", "/backup/a.mp3"]
//!     }
//!   ],
//!   "summary": {
//!     "total_files": 4,
//!     "total_size": 50,
//!     "size_groups": 1,
//!     "hashed_files": 3,
//!     "duplicate_groups": 1,
//!     "duplicate_files": 1,
//!     "reclaimable_space": 10,
//!     "scan_duration_ms": 3,
//!     "exit_code": 0,
//!     "exit_code_name": "SD000"
//!   },
//!   "warnings": [
//!     { "stage": "hash", "path": "/music/gone.mp3", "message": "File not found: /music/gone.mp3" }
//!   ]
//! }
//! ```

use std::io::Write;

use serde::Serialize;

use crate::duplicates::{DuplicateGroup, DuplicateReport};
use crate::error::ExitCode;
use crate::scanner::ScanWarning;

/// A single duplicate group in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonDuplicateGroup {
    /// SHA-256 digest as hexadecimal string (64 characters)
    pub sha256: String,
    /// File size in bytes
    pub size: u64,
    /// Member paths in report order
    pub files: Vec<String>,
}

impl From<&DuplicateGroup> for JsonDuplicateGroup {
    fn from(group: &DuplicateGroup) -> Self {
        Self {
            sha256: group.digest_hex(),
            size: group.size,
            files: group
                .members
                .iter()
                .map(|p| p.to_string_lossy().into_owned())
                .collect(),
        }
    }
}

/// Summary statistics in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    pub total_files: usize,
    pub total_size: u64,
    pub size_groups: usize,
    pub hashed_files: usize,
    pub duplicate_groups: usize,
    pub duplicate_files: usize,
    /// Bytes freed by keeping one copy per group
    pub reclaimable_space: u64,
    pub scan_duration_ms: u64,
    /// The exit code number
    pub exit_code: i32,
    /// The machine-readable exit code name (e.g., "SD000")
    pub exit_code_name: String,
}

impl JsonSummary {
    #[must_use]
    pub fn new(report: &DuplicateReport, exit_code: ExitCode) -> Self {
        Self {
            total_files: report.total_files,
            total_size: report.total_size,
            size_groups: report.size_groups,
            hashed_files: report.hashed_files,
            duplicate_groups: report.duplicate_groups,
            duplicate_files: report.duplicate_files,
            reclaimable_space: report.reclaimable_space,
            scan_duration_ms: report.scan_duration.as_millis() as u64,
            exit_code: exit_code.as_i32(),
            exit_code_name: exit_code.code_prefix().to_string(),
        }
    }
}

/// A recovered problem in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonWarning {
    /// Pipeline stage that hit the problem ("discovery" or "hash")
    pub stage: &'static str,
    pub path: String,
    pub message: String,
}

impl From<&ScanWarning> for JsonWarning {
    fn from(warning: &ScanWarning) -> Self {
        Self {
            stage: warning.stage(),
            path: warning.path().to_string_lossy().into_owned(),
            message: warning.to_string(),
        }
    }
}

/// Complete JSON output structure.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// Duplicate groups in report order
    pub duplicates: Vec<JsonDuplicateGroup>,
    /// Scan summary statistics
    pub summary: JsonSummary,
    /// Files skipped during the scan
    pub warnings: Vec<JsonWarning>,
}

impl JsonOutput {
    /// Create a JSON document from a report and the exit code it maps to.
    ///
    /// # Example
    ///
    /// ```
    /// use songdupe::duplicates::{DuplicateReport, ScanCounts};
    /// use songdupe::error::ExitCode;
    /// use songdupe::output::json::JsonOutput;
    ///
    /// let report = DuplicateReport::build(Vec::new(), ScanCounts::default(), Vec::new());
    /// let output = JsonOutput::new(&report, ExitCode::NoDuplicates);
    /// assert!(output.duplicates.is_empty());
    /// assert_eq!(output.summary.exit_code_name, "SD002");
    /// ```
    #[must_use]
    pub fn new(report: &DuplicateReport, exit_code: ExitCode) -> Self {
        Self {
            duplicates: report.groups.iter().map(JsonDuplicateGroup::from).collect(),
            summary: JsonSummary::new(report, exit_code),
            warnings: report.warnings.iter().map(JsonWarning::from).collect(),
        }
    }

    /// Serialize to pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write pretty-printed JSON followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), JsonOutputError> {
        serde_json::to_writer_pretty(&mut *writer, self)?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Errors that can occur during JSON output.
#[derive(thiserror::Error, Debug)]
pub enum JsonOutputError {
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error during writing
    #[error("I/O error during JSON generation: {0}")]
    Io(#[from] std::io::Error),
}
