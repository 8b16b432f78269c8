//! songdupe - duplicate music file finder
//!
//! Walks a directory tree, keeps files with music extensions, narrows them
//! down by exact size and confirms duplicates with SHA-256 content hashes
//! computed on a bounded worker pool.
//!
//! The library half is usable on its own:
//!
//! ```no_run
//! use songdupe::duplicates::{DuplicateFinder, FinderConfig};
//! use std::path::Path;
//!
//! let report = DuplicateFinder::new(FinderConfig::default())
//!     .find_duplicates(Path::new("/Volumes/MUSIC"))
//!     .unwrap();
//! for group in &report.groups {
//!     println!("{} copies of {}", group.len(), group.members[0].display());
//! }
//! ```

pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;

use std::io::IsTerminal;
use std::sync::Arc;

use anyhow::{Context, Result};

use cli::{Cli, Commands, ConfigArgs, ScanArgs};
use config::Config;
use duplicates::DuplicateFinder;
use error::ExitCode;
use progress::ConsoleProgress;

/// Run the command selected on the command line.
///
/// Logging must already be initialized.
///
/// # Errors
///
/// Returns an error for an invalid configuration or root directory, or when
/// the report cannot be written.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    let color = !cli.no_color && std::io::stdout().is_terminal();
    if !color {
        yansi::disable();
    }

    match cli.command {
        Commands::Scan(ref args) => run_scan(args, cli.quiet, color),
        Commands::Config(ref args) => run_config(args),
    }
}

fn run_scan(args: &ScanArgs, quiet: bool, color: bool) -> Result<ExitCode> {
    let mut config = Config::load(args.config.as_deref())?;
    config.merge_scan_args(args)?;
    let root = config.root()?.to_path_buf();

    log::debug!("Effective configuration: {config:?}");

    let progress = Arc::new(ConsoleProgress::new(
        quiet,
        args.output.is_machine_readable(),
    ));
    let finder = DuplicateFinder::new(config.finder_config().with_progress_callback(progress));

    let report = finder
        .find_duplicates(&root)
        .with_context(|| format!("Failed to scan {}", root.display()))?;

    let exit_code = ExitCode::for_report(&report);
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    output::write_report(&mut handle, &report, args.output, exit_code, color)?;

    Ok(exit_code)
}

fn run_config(args: &ConfigArgs) -> Result<ExitCode> {
    if args.path {
        match args.config.clone().or_else(Config::default_path) {
            Some(path) => println!("{}", path.display()),
            None => anyhow::bail!("Could not determine the configuration directory"),
        }
    }

    if args.show {
        let config = Config::load(args.config.as_deref())?;
        print!("{}", config.to_toml()?);
    }

    Ok(ExitCode::Success)
}
