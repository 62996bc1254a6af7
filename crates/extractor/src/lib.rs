//! Crispy Designspace Extractor - recover a designspace from a variable font.
//!
//! Reads `fvar`, `avar` and `name` and produces a [`designspace::DesignSpace`]
//! with one axis per variation axis, a single source at the default location
//! and one instance per named instance.

mod error;
mod extract;

use std::{
    fs::read,
    path::{Path, PathBuf},
};

use crispy_core::config::DESIGNSPACE_EXTENSION;
use log::info;

pub use error::{Error, Result};
pub use extract::extract_designspace;

/// `{font stem}.designspace` in the working directory.
pub fn default_output_path(font_path: &Path) -> PathBuf {
    let stem = font_path.file_stem().unwrap_or(font_path.as_os_str());
    PathBuf::from(format!("{}.{DESIGNSPACE_EXTENSION}", stem.to_string_lossy()))
}

/// Extract the designspace of the font at `font_path` and write it to
/// `output`, or to [`default_output_path`] when none is given.
pub fn extract_to_file(font_path: &Path, output: Option<&Path>) -> Result<PathBuf> {
    let data = read(font_path)
        .map_err(|source| Error::Io { path: font_path.to_path_buf(), source })?;
    let designspace = extract_designspace(&data, font_path)?;

    let output = output.map_or_else(|| default_output_path(font_path), Path::to_path_buf);
    designspace.save(&output)?;
    info!("Designspace saved to: {}", output.display());
    Ok(output)
}
