//! Human-readable report output.
//!
//! Prints the rendered duplicate groups, then a short summary and any
//! warnings. Headings are styled with `yansi` when colour is enabled.

use std::io::{self, Write};

use bytesize::ByteSize;
use yansi::Paint;

use crate::duplicates::DuplicateReport;

/// Text output formatter.
pub struct TextOutput<'a> {
    report: &'a DuplicateReport,
    color: bool,
}

impl<'a> TextOutput<'a> {
    #[must_use]
    pub fn new(report: &'a DuplicateReport, color: bool) -> Self {
        Self { report, color }
    }

    fn heading(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn warn(&self, text: &str) -> String {
        if self.color {
            text.yellow().to_string()
        } else {
            text.to_string()
        }
    }

    /// Write the full text report.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let report = self.report;

        if report.is_empty() {
            writeln!(writer, "{}", self.heading("No duplicate music files found."))?;
        } else {
            writer.write_all(report.render().as_bytes())?;
            writeln!(writer)?;
            writeln!(
                writer,
                "{}",
                self.heading(&format!(
                    "{} duplicate group(s), {} redundant file(s), {} reclaimable",
                    report.duplicate_groups,
                    report.duplicate_files,
                    report.reclaimable_display()
                ))
            )?;
        }

        writeln!(
            writer,
            "Scanned {} music file(s) ({}), hashed {} in {:.2}s",
            report.total_files,
            ByteSize(report.total_size),
            report.hashed_files,
            report.scan_duration.as_secs_f64()
        )?;

        if report.has_warnings() {
            writeln!(writer)?;
            writeln!(
                writer,
                "{}",
                self.warn(&format!("Skipped {} file(s):", report.warnings.len()))
            )?;
            for warning in &report.warnings {
                writeln!(writer, "  [{}] {}", warning.stage(), warning)?;
            }
        }

        Ok(())
    }

    /// Render the text report to a string.
    #[must_use]
    pub fn to_string_lossy(&self) -> String {
        let mut buffer = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write_to(&mut buffer);
        String::from_utf8_lossy(&buffer).into_owned()
    }
}
