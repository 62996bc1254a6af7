//! Scratch directory for compiled instances.

use std::{
    fs::{create_dir_all, remove_dir_all},
    path::{Path, PathBuf},
};

use crispy_core::{glob_fonts, remove_dir_if_exists};
use log::{info, warn};

use crate::{
    compile::OutputFormat,
    error::{Error, Result},
};

/// Directory the compiler writes into. Removed when dropped.
#[derive(Debug)]
pub struct ExportDir {
    path: PathBuf,
}

impl ExportDir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Empty the directory so binaries from an earlier run are not measured.
    pub fn prepare(&self) -> Result<()> {
        remove_dir_if_exists(&self.path).map_err(|e| self.error(format!("{e:#}")))?;
        create_dir_all(&self.path).map_err(|e| self.error(e))
    }

    /// Generated binaries of `format`, sorted by file name.
    pub fn binaries(&self, format: OutputFormat) -> Result<Vec<PathBuf>> {
        glob_fonts(&self.path, &format!("*.{format}")).map_err(|e| self.error(format!("{e:#}")))
    }

    fn error(&self, message: impl ToString) -> Error {
        Error::Export { path: self.path.clone(), message: message.to_string() }
    }
}

impl Drop for ExportDir {
    fn drop(&mut self) {
        if !self.path.exists() {
            return;
        }
        match remove_dir_all(&self.path) {
            Ok(()) => info!("Export folder cleaned up: {}", self.path.display()),
            Err(e) => warn!("Could not remove {}: {e}", self.path.display()),
        }
    }
}
