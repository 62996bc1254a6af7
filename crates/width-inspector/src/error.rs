use std::{path::PathBuf, process::ExitStatus, result};

use read_fonts::ReadError;

/// Error types for width inspection.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("don't know how to compile {0} (expected .glyphs, .glyphspackage, .designspace or .ufo)")]
    UnsupportedSource(PathBuf),

    #[error("unknown output format: {0} (expected otf or ttf)")]
    UnknownFormat(String),

    #[error("failed to run {program}: {source}")]
    Spawn { program: String, source: std::io::Error },

    #[error("{program} failed: {status}")]
    CompilerFailed { program: String, status: ExitStatus },

    #[error("export directory {path}: {message}")]
    Export { path: PathBuf, message: String },

    #[error("failed to read {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    #[error("failed to parse font: {0}")]
    Font(#[from] ReadError),

    #[error("font data could not be loaded for shaping")]
    Shaping,
}

pub type Result<T> = result::Result<T, Error>;
