//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent warpper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Transparent warpper for [`binrw::Error`]
    #[error(transparent)]
    BinRWError(#[from] binrw::Error),

    /// A bitmap ended before one of its structures did
    #[error(transparent)]
    OutOfBounds(#[from] pac_bytes::Error),

    /// data does not start with the `ZLC3` signature
    #[error("data does not start with the ZLC3 signature")]
    BadMagic,

    /// the compressed stream does not decode to the declared bitmap
    #[error("corrupt bmz stream: {0}")]
    CorruptStream(String),

    /// the embedded bitmap uses a layout this library does not handle
    #[error("unsupported bitmap format: {0}")]
    UnsupportedFormat(String),

    /// image fields are inconsistent with each other
    #[error("invalid bitmap: {0}")]
    InvalidImage(String),

    /// a bitmap of this size cannot be described by the headers
    #[error("bitmap of {0} bytes is too large")]
    TooLarge(usize),
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
