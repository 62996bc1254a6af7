//! Error types for the axis merge.

use std::path::PathBuf;

/// Result type for axis merge operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort an axis merge.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The mapping file could not be opened.
    #[error("Failed to open mapping '{path}': {source}")]
    OpenMapping {
        path: PathBuf,
        source: std::io::Error,
    },

    /// CSV decoding failure.
    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The mapping has no header row.
    #[error("CSV file is empty or malformed: no header row found")]
    MissingHeader,

    /// The instance-name column is absent from the header.
    #[error("CSV header has no '{0}' column")]
    MissingInstanceColumn(String),

    /// A cell holds something other than a number.
    #[error("Row {row}, column '{column}': '{value}' is not a number")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    /// An extension axis column has no values on any row.
    #[error("Extension axis '{0}' has no values in the mapping")]
    EmptyAxis(String),

    /// Loading or writing the designspace failed.
    #[error(transparent)]
    Designspace(#[from] designspace::Error),

    /// Copying a master directory failed.
    #[error("Failed to duplicate master '{from}' -> '{to}': {message}")]
    CopyMaster {
        from: PathBuf,
        to: PathBuf,
        message: String,
    },

    /// Creating the output directory failed.
    #[error("Failed to create output directory '{path}': {source}")]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },
}
