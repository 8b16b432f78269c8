//! Output formatters for duplicate reports.
//!
//! - Text for people (the default)
//! - JSON for automation and scripting
//! - CSV for spreadsheet import
//!
//! # Example
//!
//! ```no_run
//! use songdupe::cli::OutputFormat;
//! use songdupe::duplicates::DuplicateFinder;
//! use songdupe::error::ExitCode;
//! use songdupe::output::write_report;
//! use std::path::Path;
//!
//! let report = DuplicateFinder::with_defaults()
//!     .find_duplicates(Path::new("/Volumes/MUSIC"))
//!     .unwrap();
//! let code = ExitCode::for_report(&report);
//! write_report(&mut std::io::stdout(), &report, OutputFormat::Json, code, false).unwrap();
//! ```

pub mod csv;
pub mod json;
pub mod text;

use std::io::Write;

use anyhow::Result;

pub use csv::CsvOutput;
pub use json::JsonOutput;
pub use text::TextOutput;

use crate::cli::OutputFormat;
use crate::duplicates::DuplicateReport;
use crate::error::ExitCode;

/// Write `report` in the requested format.
///
/// `color` only affects text output.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_report<W: Write>(
    writer: &mut W,
    report: &DuplicateReport,
    format: OutputFormat,
    exit_code: ExitCode,
    color: bool,
) -> Result<()> {
    match format {
        OutputFormat::Text => TextOutput::new(report, color).write_to(writer)?,
        OutputFormat::Json => JsonOutput::new(report, exit_code).write_to(writer)?,
        OutputFormat::Csv => CsvOutput::new(&report.groups).write_to(&mut *writer)?,
    }
    writer.flush()?;
    Ok(())
}
