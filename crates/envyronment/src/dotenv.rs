//! Load `.env` files into the process environment.
//!
//! Loading is explicit: the application calls [`init`] (or
//! [`DotenvConfig::load`]) once at start-up, before reading any variables.
//! Nothing is loaded implicitly.
//!
//! A missing file is not an error, and neither is building without the
//! `dotenv` feature. In both cases the report simply lists nothing as loaded.
//!
//! # Example
//!
//! ```no_run
//! use envyronment::{init_with, read_or, DotenvConfig};
//!
//! // Prefer local overrides.
//! init_with(&DotenvConfig::new().file(".env.local").file(".env"))?;
//! let log_level = read_or("LOG_LEVEL", "info")?;
//! # Ok::<(), envyronment::EnvError>(())
//! ```

use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use crate::error::EnvError;

/// File loaded by [`init`].
pub const DEFAULT_DOTENV_FILE: &str = ".env";

/// Which dotenv files to load and how.
///
/// Files are loaded in order. Without `override_existing`, a variable that is
/// already set (by the process or an earlier file) keeps its value, so the
/// first file listed wins. With it, later files replace earlier values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotenvConfig {
    files: Vec<PathBuf>,
    override_existing: bool,
}

impl Default for DotenvConfig {
    /// `.env` in the current directory, no override.
    fn default() -> Self {
        Self::new().file(DEFAULT_DOTENV_FILE)
    }
}

impl DotenvConfig {
    /// Config with no files.
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            override_existing: false,
        }
    }

    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push(path.into());
        self
    }

    pub fn files<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.files.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn override_existing(mut self, override_existing: bool) -> Self {
        self.override_existing = override_existing;
        self
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn overrides_existing(&self) -> bool {
        self.override_existing
    }

    /// Load every configured file into the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::Dotenv`] for the first file that exists but cannot
    /// be read or parsed. Files before it stay loaded, and so do the
    /// variables from lines of the failing file that precede the bad line.
    #[cfg(feature = "dotenv")]
    pub fn load(&self) -> Result<DotenvReport, EnvError> {
        let mut report = DotenvReport::default();

        for path in &self.files {
            let result = if self.override_existing {
                dotenvy::from_path_override(path)
            } else {
                dotenvy::from_path(path)
            };

            match result {
                Ok(()) => {
                    tracing::info!(path = %path.display(), "Loaded dotenv file");
                    report.loaded.push(path.clone());
                }
                Err(err) if err.not_found() => {
                    tracing::debug!(path = %path.display(), "Dotenv file not found, skipping");
                    report.missing.push(path.clone());
                }
                Err(source) => {
                    return Err(EnvError::Dotenv {
                        path: path.clone(),
                        source,
                    });
                }
            }
        }

        Ok(report)
    }

    /// Dotenv support is compiled out; nothing is loaded.
    #[cfg(not(feature = "dotenv"))]
    pub fn load(&self) -> Result<DotenvReport, EnvError> {
        tracing::debug!(
            files = self.files.len(),
            "Dotenv support disabled, skipping"
        );
        Ok(DotenvReport::default())
    }
}

/// Outcome of a dotenv load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DotenvReport {
    /// Files that were found and loaded, in load order.
    pub loaded: Vec<PathBuf>,
    /// Files that did not exist.
    pub missing: Vec<PathBuf>,
}

impl DotenvReport {
    pub fn loaded_any(&self) -> bool {
        !self.loaded.is_empty()
    }
}

static INIT_REPORT: Mutex<Option<DotenvReport>> = Mutex::new(None);

/// Load `.env` from the current directory, once per process.
///
/// Later calls return the report of the first successful call without
/// touching the environment again.
pub fn init() -> Result<DotenvReport, EnvError> {
    init_with(&DotenvConfig::default())
}

/// [`init`] with a custom config. Only the first successful call loads.
///
/// A failed load does not count, so the application may fix the file and
/// call again. Variables set before the failure stay set; without
/// `override_existing` the retry will not replace them.
pub fn init_with(config: &DotenvConfig) -> Result<DotenvReport, EnvError> {
    let mut guard = INIT_REPORT.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(report) = guard.as_ref() {
        tracing::debug!("Dotenv already initialized");
        return Ok(report.clone());
    }

    let report = config.load()?;
    *guard = Some(report.clone());
    Ok(report)
}

/// Whether [`init`] or [`init_with`] has completed successfully.
pub fn is_initialized() -> bool {
    INIT_REPORT
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .is_some()
}
