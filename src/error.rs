//! Structured error handling and exit codes.

use serde::Serialize;

use crate::duplicates::DuplicateReport;

/// Exit codes for the songdupe application.
///
/// - 0: Success (completed normally, duplicates found)
/// - 1: General error (invalid root, bad configuration, unexpected failure)
/// - 2: No duplicates found (completed normally, no duplicates)
/// - 3: Partial success (completed, but some files were skipped with warnings)
///
/// clap exits with 2 on usage errors by default, which would read as "no
/// duplicates". `main` parses with `try_parse` and maps usage errors to 1
/// through [`ExitCode::for_cli_error`], so 2 always means a completed scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: Scan completed and duplicates were found.
    Success = 0,
    /// General error: An unexpected error occurred.
    GeneralError = 1,
    /// No duplicates: Scan completed but no duplicates were found.
    NoDuplicates = 2,
    /// Partial success: Scan completed but encountered some non-fatal errors.
    PartialSuccess = 3,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "SD000",
            Self::GeneralError => "SD001",
            Self::NoDuplicates => "SD002",
            Self::PartialSuccess => "SD003",
        }
    }

    /// Pick the exit code for a command line that failed to parse.
    ///
    /// `--help` and `--version` are successes; anything else is a general
    /// error.
    #[must_use]
    pub fn for_cli_error(err: &clap::Error) -> Self {
        use clap::error::ErrorKind;

        match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => Self::Success,
            _ => Self::GeneralError,
        }
    }

    /// Pick the exit code describing a finished scan.
    ///
    /// Warnings take precedence over the duplicate count.
    #[must_use]
    pub fn for_report(report: &DuplicateReport) -> Self {
        if report.has_warnings() {
            Self::PartialSuccess
        } else if report.is_empty() {
            Self::NoDuplicates
        } else {
            Self::Success
        }
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "SD001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message
    pub message: String,
    /// Causes below the top-level message, outermost first
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub causes: Vec<String>,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: err.to_string(),
            causes: err.chain().skip(1).map(ToString::to_string).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duplicates::{DuplicateGroup, ScanCounts};
    use crate::scanner::{ScanError, ScanWarning};
    use std::path::PathBuf;

    fn report(groups: usize, warnings: usize) -> DuplicateReport {
        let bucket: Vec<DuplicateGroup> = (0..groups)
            .map(|i| {
                DuplicateGroup::new(
                    [i as u8; 32],
                    1,
                    vec![PathBuf::from(format!("/{i}a")), PathBuf::from(format!("/{i}b"))],
                )
            })
            .collect();
        let warnings: Vec<ScanWarning> = (0..warnings)
            .map(|i| ScanError::NotFound(PathBuf::from(format!("/w{i}"))).into())
            .collect();
        DuplicateReport::build(vec![bucket], ScanCounts::default(), warnings)
    }

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::GeneralError.as_i32(), 1);
        assert_eq!(ExitCode::NoDuplicates.as_i32(), 2);
        assert_eq!(ExitCode::PartialSuccess.as_i32(), 3);
    }

    #[test]
    fn test_code_prefixes() {
        assert_eq!(ExitCode::Success.code_prefix(), "SD000");
        assert_eq!(ExitCode::PartialSuccess.code_prefix(), "SD003");
    }

    #[test]
    fn test_exit_code_for_report() {
        assert_eq!(ExitCode::for_report(&report(1, 0)), ExitCode::Success);
        assert_eq!(ExitCode::for_report(&report(0, 0)), ExitCode::NoDuplicates);
        assert_eq!(ExitCode::for_report(&report(1, 1)), ExitCode::PartialSuccess);
        assert_eq!(ExitCode::for_report(&report(0, 2)), ExitCode::PartialSuccess);
    }

    #[test]
    fn test_usage_errors_do_not_collide_with_no_duplicates() {
        use crate::cli::Cli;
        use clap::Parser;

        let bad_flag = Cli::try_parse_from(["songdupe", "scan", "--bogus"]).unwrap_err();
        assert_eq!(ExitCode::for_cli_error(&bad_flag), ExitCode::GeneralError);

        let bad_value =
            Cli::try_parse_from(["songdupe", "scan", "--chunk-size", "lots"]).unwrap_err();
        assert_eq!(ExitCode::for_cli_error(&bad_value), ExitCode::GeneralError);

        let missing = Cli::try_parse_from(["songdupe"]).unwrap_err();
        assert_eq!(ExitCode::for_cli_error(&missing), ExitCode::GeneralError);
    }

    #[test]
    fn test_help_and_version_exit_success() {
        use crate::cli::Cli;
        use clap::Parser;

        let help = Cli::try_parse_from(["songdupe", "--help"]).unwrap_err();
        assert_eq!(ExitCode::for_cli_error(&help), ExitCode::Success);

        let version = Cli::try_parse_from(["songdupe", "--version"]).unwrap_err();
        assert_eq!(ExitCode::for_cli_error(&version), ExitCode::Success);
    }

    #[test]
    fn test_structured_error_json() {
        let err = anyhow::anyhow!("disk gone").context("Failed to scan /music");
        let structured = StructuredError::new(&err, ExitCode::GeneralError);

        assert_eq!(structured.code, "SD001");
        assert_eq!(structured.message, "Failed to scan /music");
        assert_eq!(structured.causes, vec!["disk gone".to_string()]);

        let json = serde_json::to_value(&structured).unwrap();
        assert_eq!(json["exit_code"], 1);
        assert_eq!(json["causes"][0], "disk gone");
    }
}
