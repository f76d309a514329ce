//! Error types that can be emitted from this library
//!

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent warpper for [`serde_json::Error`], raised for text that is not JSON at all
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    /// The data ended in the middle of a record
    #[error("truncated {record}")]
    TruncatedRecord {
        /// Which record was being read, `header` or `frame N`
        record: String,
        #[source]
        source: pac_bytes::Error,
    },

    /// A value does not fit the binary layout
    #[error("schema violation: {0}")]
    SchemaViolation(String),
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
