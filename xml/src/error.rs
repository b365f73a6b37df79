//! Error types for dump-file reading.

use thiserror::Error;

/// Errors that can occur while streaming records from a dump file.
#[derive(Debug, Error)]
pub enum XmlError {
    /// File I/O failure while opening or reading the source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not well-formed XML. The stream ends here; there is
    /// no partial recovery within a file.
    #[error("malformed XML: {0}")]
    Parse(#[from] quick_xml::Error),
}

/// Convenience alias for results with [`XmlError`].
pub type Result<T> = std::result::Result<T, XmlError>;
