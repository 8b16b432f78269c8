//! Application configuration.
//!
//! Settings are layered with `figment`, later layers winning:
//!
//! 1. Built-in defaults
//! 2. TOML file (platform config dir, or `--config FILE`)
//! 3. `SONGDUPE_*` environment variables
//! 4. Command-line flags
//!
//! The result is an explicit value handed to the finder; nothing here is
//! process-global.
//!
//! ```toml
//! root = "/Volumes/MUSIC"
//! extensions = [".mp3", ".flac"]
//! threads = 8
//! chunk_size = 65536
//! follow_symlinks = false
//! ```

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::ScanArgs;
use crate::duplicates::FinderConfig;
use crate::scanner::{
    ExtensionSet, WalkerConfig, CHUNK_SIZE, DEFAULT_EXTENSIONS, MAX_CHUNK_SIZE,
};

/// Prefix for environment overrides, e.g. `SONGDUPE_THREADS=4`.
pub const ENV_PREFIX: &str = "SONGDUPE_";

const CONFIG_FILE_NAME: &str = "config.toml";

/// Effective configuration for a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory to scan when no path is given on the command line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
    /// Filename suffixes that mark a music file.
    pub extensions: Vec<String>,
    /// Hashing workers; 0 means one per available processing unit.
    pub threads: usize,
    /// Read chunk size for hashing, in bytes.
    pub chunk_size: usize,
    /// Follow symbolic links during discovery.
    pub follow_symlinks: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: None,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_string()).collect(),
            threads: 0,
            chunk_size: CHUNK_SIZE,
            follow_symlinks: false,
        }
    }
}

impl Config {
    /// Platform-specific location of the configuration file.
    ///
    /// Returns `None` when no home directory can be determined.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "songdupe", "songdupe")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Build the layered provider (defaults, file, environment).
    ///
    /// A missing file contributes nothing.
    #[must_use]
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = file {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load configuration from an explicit file, or the default location.
    ///
    /// # Errors
    ///
    /// Fails if an explicitly requested file does not exist, or if any layer
    /// holds a value of the wrong type.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let file = match explicit {
            Some(path) => {
                if !path.is_file() {
                    bail!("Config file not found: {}", path.display());
                }
                Some(path.to_path_buf())
            }
            None => Self::default_path(),
        };

        if let Some(ref path) = file {
            log::debug!("Loading configuration from {}", path.display());
        }

        let mut config: Config = Self::figment(file.as_deref())
            .extract()
            .context("Invalid configuration")?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Apply `scan` flags on top of the loaded layers.
    ///
    /// Only flags the user actually passed override the configuration.
    pub fn merge_scan_args(&mut self, args: &ScanArgs) -> Result<()> {
        if let Some(ref path) = args.path {
            self.root = Some(path.clone());
        }
        if !args.extensions.is_empty() {
            self.extensions = args.extensions.clone();
        }
        if let Some(threads) = args.threads {
            self.threads = threads;
        }
        if let Some(chunk_size) = args.chunk_size {
            self.chunk_size = usize::try_from(chunk_size)
                .with_context(|| format!("Chunk size too large: {chunk_size}"))?;
        }
        if args.follow_symlinks {
            self.follow_symlinks = true;
        }
        self.normalize();
        self.validate()
    }

    fn normalize(&mut self) {
        self.extensions = ExtensionSet::new(&self.extensions).suffixes().to_vec();
    }

    fn validate(&self) -> Result<()> {
        if self.extensions.is_empty() {
            bail!("At least one file extension must be configured");
        }
        if self.chunk_size == 0 {
            bail!("Chunk size must be greater than zero");
        }
        if self.chunk_size > MAX_CHUNK_SIZE {
            bail!(
                "Chunk size {} exceeds the maximum of {} bytes",
                self.chunk_size,
                MAX_CHUNK_SIZE
            );
        }
        Ok(())
    }

    /// The directory to scan.
    ///
    /// # Errors
    ///
    /// Fails when neither the command line nor any configuration layer set one.
    pub fn root(&self) -> Result<&Path> {
        match self.root {
            Some(ref root) => Ok(root.as_path()),
            None => bail!(
                "No directory to scan: pass PATH or set `root` in the config file ({}ROOT also works)",
                ENV_PREFIX
            ),
        }
    }

    /// Discovery settings derived from this configuration.
    #[must_use]
    pub fn walker_config(&self) -> WalkerConfig {
        WalkerConfig::new(self.follow_symlinks, ExtensionSet::new(&self.extensions))
    }

    /// Finder settings derived from this configuration.
    #[must_use]
    pub fn finder_config(&self) -> FinderConfig {
        FinderConfig::default()
            .with_threads(self.threads)
            .with_chunk_size(self.chunk_size)
            .with_walker_config(self.walker_config())
    }

    /// Render as TOML, the same shape the config file uses.
    ///
    /// # Errors
    ///
    /// Fails only if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}
