//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A read asked for more bytes than the buffer has left
    #[error("read of {requested} bytes at offset {offset} exceeds buffer ({remaining} bytes remaining)")]
    OutOfBounds {
        /// Position of the cursor when the read was attempted
        offset: usize,
        /// Number of bytes the read needed
        requested: usize,
        /// Number of bytes left after `offset`
        remaining: usize,
    },

    /// A length prefix is too narrow for the payload it describes
    #[error("length {len} does not fit in a {width}-byte prefix")]
    LengthOverflow {
        /// Length of the payload
        len: usize,
        /// Width of the prefix in bytes
        width: usize,
    },
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
