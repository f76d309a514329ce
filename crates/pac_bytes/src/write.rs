//! Appending primitives to a growable buffer
//!

use byteorder::ByteOrder;

use crate::error::{Error, Result};
use crate::LengthWidth;

/// The write side of [`crate::ByteReader`]; every read has a matching append.
#[derive(Debug, Clone, Default)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        ByteWriter {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes written so far
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn write_u16<E: ByteOrder>(&mut self, value: u16) {
        let mut bytes = [0u8; 2];
        E::write_u16(&mut bytes, value);
        self.write_bytes(&bytes);
    }

    pub fn write_u32<E: ByteOrder>(&mut self, value: u32) {
        let mut bytes = [0u8; 4];
        E::write_u32(&mut bytes, value);
        self.write_bytes(&bytes);
    }

    pub fn write_i32<E: ByteOrder>(&mut self, value: i32) {
        let mut bytes = [0u8; 4];
        E::write_i32(&mut bytes, value);
        self.write_bytes(&bytes);
    }

    /// Write `bytes` behind a length prefix of the given width.
    ///
    /// Nothing is written when the length does not fit the prefix.
    pub fn write_prefixed<E: ByteOrder>(&mut self, width: LengthWidth, bytes: &[u8]) -> Result<()> {
        let overflow = || Error::LengthOverflow {
            len: bytes.len(),
            width: width.size(),
        };
        match width {
            LengthWidth::U8 => self.write_u8(u8::try_from(bytes.len()).map_err(|_| overflow())?),
            LengthWidth::U16 => {
                self.write_u16::<E>(u16::try_from(bytes.len()).map_err(|_| overflow())?)
            }
            LengthWidth::U32 => {
                self.write_u32::<E>(u32::try_from(bytes.len()).map_err(|_| overflow())?)
            }
        }
        self.write_bytes(bytes);
        Ok(())
    }
}

impl From<ByteWriter> for Vec<u8> {
    fn from(value: ByteWriter) -> Self {
        value.into_inner()
    }
}
