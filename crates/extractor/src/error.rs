use std::{path::PathBuf, result};

use read_fonts::ReadError;

/// Error types for designspace extraction.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to parse font: {0}")]
    Parse(#[from] ReadError),

    #[error("not a variable font (no fvar table)")]
    NotVariableFont,

    #[error("failed to read {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    #[error(transparent)]
    Designspace(#[from] designspace::Error),
}

pub type Result<T> = result::Result<T, Error>;
