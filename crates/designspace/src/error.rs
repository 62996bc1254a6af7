//! Error types for designspace documents.

use std::path::PathBuf;

/// Result type for designspace operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading, validating or writing a designspace.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to read or write a designspace file.
    #[error("Failed to access '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The document is not well-formed XML.
    #[error("Malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    /// Streaming XML reader or writer failure.
    #[error("XML stream error: {0}")]
    XmlStream(#[from] quick_xml::Error),

    /// Attribute decoding failure in the streaming pass.
    #[error("XML attribute error: {0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    /// An attribute value could not be unescaped.
    #[error("Invalid XML attribute value: {0}")]
    XmlValue(String),

    /// In-memory write failure.
    #[error("Write error: {0}")]
    Write(#[from] std::io::Error),

    /// The root element is not `<designspace>`.
    #[error("Expected <designspace> root element, found <{0}>")]
    NotDesignspace(String),

    /// A required attribute is absent.
    #[error("<{element}> is missing required attribute '{attribute}'")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    /// An attribute that should hold a number does not.
    #[error("<{element}> attribute '{attribute}' is not a number: '{value}'")]
    InvalidNumber {
        element: &'static str,
        attribute: &'static str,
        value: String,
    },

    /// A location names an axis the document does not declare.
    #[error("Location refers to unknown axis '{0}'")]
    UnknownAxis(String),

    /// Invalid designspace configuration.
    #[error("Invalid designspace: {0}")]
    InvalidDesignspace(String),

    /// Serialized output was not valid UTF-8.
    #[error("Serialized designspace is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
