//! Base types for structure of BMZ file.

use std::io::Cursor;

use binrw::{BinRead, BinWrite};

use crate::error::{Error, Result};

/// Signature every BMZ file starts with
pub const BMZ_MAGIC: [u8; 4] = *b"ZLC3";

/// BMZ file header
///
/// The signature "ZLC3" followed by the size of the bitmap once inflated.
/// All data is stored in little endian format
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[brw(magic = b"ZLC3", little)]
pub struct BmzHeader {
    /// The size in bytes of the embedded bitmap file before compression
    pub uncompressed_size: u32,
}

impl BmzHeader {
    /// Size of the header on disk, signature included
    pub const SIZE: usize = 8;

    /// Read the header at the start of `data`.
    ///
    /// Fails with [`Error::BadMagic`] when the signature is missing and with
    /// [`Error::CorruptStream`] when the signature is there but the size field is cut off.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if !data.starts_with(&BMZ_MAGIC) {
            return Err(Error::BadMagic);
        }
        if data.len() < Self::SIZE {
            return Err(Error::CorruptStream(format!(
                "header needs {} bytes, found {}",
                Self::SIZE,
                data.len()
            )));
        }
        Ok(BmzHeader::read(&mut Cursor::new(&data[..Self::SIZE]))?)
    }
}
