//! Bounds-checked byte cursors used by the PAC archive and its codecs.
//!
//! [`ByteReader`] walks a borrowed buffer and refuses to read past its end, reporting
//! [`Error::OutOfBounds`] instead. [`ByteWriter`] mirrors it on a growable buffer.
//! Multi-byte integers take their endianness from a [`byteorder::ByteOrder`] type parameter.

pub mod error;
pub mod read;
pub mod write;

pub use error::{Error, Result};
pub use read::ByteReader;
pub use write::ByteWriter;

/// Width of the length field in front of a length-prefixed byte run
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LengthWidth {
    U8,
    U16,
    U32,
}

impl LengthWidth {
    /// Size of the prefix in bytes
    pub const fn size(self) -> usize {
        match self {
            LengthWidth::U8 => 1,
            LengthWidth::U16 => 2,
            LengthWidth::U32 => 4,
        }
    }
}
