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

    /// file is an invalid pac archive
    #[error("file is an invalid pac archive")]
    Parse(#[from] ParseError),

    /// unable to decode {name} at offset {offset:#x}
    #[error("unable to decode {name} at offset {offset:#x}")]
    Codec {
        name: String,
        offset: u64,
        #[source]
        source: CodecError,
    },

    /// unable to encode {name}
    #[error("unable to encode {name}")]
    Encode {
        name: String,
        #[source]
        source: CodecError,
    },

    /// unable to find requested file
    #[error("unable to find requested file")]
    FileNotFound(#[from] FileNotFoundError),

    /// archive already contains {0}
    #[error("archive already contains {0}")]
    DuplicateName(String),

    /// name {name} is {len} bytes long
    #[error("name {name} is {len} bytes long, at most {} fit in a record", crate::types::MAX_NAME_LEN)]
    NameTooLong { name: String, len: usize },

    /// {0:?} cannot be stored as an entry name
    #[error("{0:?} cannot be stored as an entry name")]
    InvalidName(String),

    /// archive of {0} bytes does not fit 32 bit offsets
    #[error("archive of {0} bytes does not fit 32 bit offsets")]
    ArchiveTooLarge(u64),
}

/// Error type describing why an archive could not be opened
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// the index does not have the shape of a pac index
    #[error("not a pac index: {0}")]
    BadMagic(String),

    /// the buffer ends before the index does
    #[error("index needs {required} bytes but only {len} are present")]
    TruncatedIndex { required: u64, len: usize },

    /// an index record is inconsistent with the archive
    #[error("record {index} is invalid: {reason}")]
    InvalidEntry { index: usize, reason: String },
}

/// Error type for the codecs applied to archive entries
#[derive(Error, Diagnostic, Debug)]
pub enum CodecError {
    /// Transparent warpper for [`pac_bmz::error::Error`]
    #[error(transparent)]
    Bitmap(#[from] pac_bmz::error::Error),

    /// Transparent warpper for [`pac_ttp::error::Error`]
    #[error(transparent)]
    Animation(#[from] pac_ttp::error::Error),
}

/// Error type to provide further information when a file has not been found
#[derive(Error, Diagnostic, Debug)]
#[error("unable to find requested file")]
pub enum FileNotFoundError {
    /// at index {0}
    #[error("at index {0}")]
    Index(usize),

    /// by name {0}
    #[error("by name {0}")]
    Name(String),
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
