//! Progress reporting for the duplicate detection pipeline.
//!
//! The pipeline never prints. It reports observational events through
//! [`ProgressCallback`]; the CLI plugs in [`ConsoleProgress`], which prints
//! one notice per stage and draws an indicatif bar while a size group is
//! being hashed. Tests plug in their own recorder.

use std::io::IsTerminal;
use std::path::Path;
use std::sync::Mutex;

use bytesize::ByteSize;
use indicatif::{ProgressBar, ProgressStyle};

/// Observer of pipeline progress.
///
/// All methods default to no-ops. Events never influence results.
/// `on_file_hashed` is called from hashing workers, concurrently.
pub trait ProgressCallback: Send + Sync {
    /// Discovery finished with `count` candidates.
    fn on_files_discovered(&self, _count: usize) {}

    /// Size bucketing kept `count` groups of 2+ same-size files.
    fn on_size_groups(&self, _count: usize) {}

    /// About to hash `files` members of the size group for `size` bytes.
    fn on_bucket_start(&self, _size: u64, _files: usize) {}

    /// One file finished hashing (successfully or not).
    fn on_file_hashed(&self, _path: &Path) {}

    /// All members of the size group for `size` bytes are hashed.
    fn on_bucket_end(&self, _size: u64) {}
}

/// Terminal progress reporter.
///
/// Notices go to standard output, or to standard error when the report
/// itself is machine-readable and owns standard output.
pub struct ConsoleProgress {
    bucket: Mutex<Option<ProgressBar>>,
    quiet: bool,
    notices_to_stderr: bool,
}

impl ConsoleProgress {
    /// Create a console reporter.
    ///
    /// # Arguments
    ///
    /// * `quiet` - If true, nothing is printed or drawn.
    /// * `notices_to_stderr` - Print notices on stderr instead of stdout.
    ///
    /// # Examples
    ///
    /// ```
    /// use songdupe::progress::ConsoleProgress;
    ///
    /// let progress = ConsoleProgress::new(false, false);
    /// ```
    #[must_use]
    pub fn new(quiet: bool, notices_to_stderr: bool) -> Self {
        Self {
            bucket: Mutex::new(None),
            quiet,
            notices_to_stderr,
        }
    }

    fn notice(&self, message: &str) {
        if self.quiet {
            return;
        }
        if self.notices_to_stderr {
            eprintln!("{message}");
        } else {
            println!("{message}");
        }
    }

    fn bucket_style() -> ProgressStyle {
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{bar:40.green/blue}] {pos}/{len} ({percent}%) {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█>-")
    }
}

impl ProgressCallback for ConsoleProgress {
    fn on_files_discovered(&self, count: usize) {
        self.notice(&format!("Found {count} music file(s)"));
    }

    fn on_size_groups(&self, count: usize) {
        self.notice(&format!(
            "Found {count} group(s) of same-size files, comparing content hashes"
        ));
    }

    fn on_bucket_start(&self, size: u64, files: usize) {
        self.notice(&format!(
            "Hashing {files} files of size {} ({size} bytes)",
            ByteSize(size)
        ));

        if self.quiet || !std::io::stderr().is_terminal() {
            return;
        }
        let pb = ProgressBar::new(files as u64);
        pb.set_style(Self::bucket_style());
        if let Ok(mut bucket) = self.bucket.lock() {
            *bucket = Some(pb);
        }
    }

    fn on_file_hashed(&self, path: &Path) {
        if let Ok(bucket) = self.bucket.lock() {
            if let Some(ref pb) = *bucket {
                pb.inc(1);
                pb.set_message(truncate_path(&path.to_string_lossy(), 30));
            }
        }
    }

    fn on_bucket_end(&self, _size: u64) {
        if let Ok(mut bucket) = self.bucket.lock() {
            if let Some(pb) = bucket.take() {
                pb.finish_and_clear();
            }
        }
    }
}

/// Truncate a path for display in the progress bar.
fn truncate_path(path: &str, max_len: usize) -> String {
    if path.chars().count() <= max_len {
        return path.to_string();
    }

    let file_name = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let name_len = file_name.chars().count();
    if name_len >= max_len {
        let tail: String = file_name.chars().skip(name_len + 3 - max_len).collect();
        return format!("...{tail}");
    }

    format!(".../{file_name}")
}
