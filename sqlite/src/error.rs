//! Error types for the storage backend.
//!
//! The variants encode the importer's two severities: [`SearchSetup`] and
//! [`IndexCreation`] are the fatal paths that must terminate the run,
//! while coercion, unknown-column, and plain database errors surface per
//! record and are caught inside the loader.
//!
//! [`SearchSetup`]: StoreError::SearchSetup
//! [`IndexCreation`]: StoreError::IndexCreation

use thiserror::Error;

/// Errors that can occur during loading and schema setup.
#[derive(Debug, Error)]
pub enum StoreError {
    /// SQLite operation failure.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The dump stream failed (I/O or malformed XML); the file is abandoned
    /// without a commit.
    #[error("dump read error: {0}")]
    Xml(#[from] sedump_xml::XmlError),

    /// A raw value could not be coerced to its column's declared type.
    #[error(transparent)]
    Coerce(#[from] sedump_core::CoerceError),

    /// A record carried an attribute with no catalog column.
    #[error("unknown column '{column}' for table '{table}'")]
    UnknownColumn {
        /// Table being loaded.
        table: String,
        /// The attribute name with no matching column.
        column: String,
    },

    /// Creating the search structure or one of its triggers failed.
    #[error("full-text search setup failed: {0}")]
    SearchSetup(#[source] rusqlite::Error),

    /// Creating one of the secondary indices failed.
    #[error("index creation failed: {0}")]
    IndexCreation(#[source] rusqlite::Error),
}

/// Convenience alias for results with [`StoreError`].
pub type Result<T> = std::result::Result<T, StoreError>;
