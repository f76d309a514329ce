//! Sequential reading from a borrowed byte buffer
//!

use byteorder::ByteOrder;

use crate::error::{Error, Result};
use crate::LengthWidth;

/// A cursor over a fixed buffer whose reads never go past its end.
///
/// Every read either returns the requested data and advances the position, or fails with
/// [`Error::OutOfBounds`] and leaves the position untouched.
///
/// ```
/// use byteorder::LittleEndian;
/// use pac_bytes::ByteReader;
///
/// let mut reader = ByteReader::new(&[0x02, 0x00, 0x00, 0x00, b'h', b'i']);
/// let len = reader.read_u32::<LittleEndian>()?;
/// assert_eq!(reader.read_bytes(len as usize)?, b"hi");
/// assert!(reader.read_u8().is_err());
/// # Ok::<(), pac_bytes::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Start reading at the beginning of `data`
    pub fn new(data: &'a [u8]) -> Self {
        ByteReader { data, pos: 0 }
    }

    /// Current offset from the start of the buffer
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of bytes left to read
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Whether every byte has been consumed
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// The whole underlying buffer
    pub fn get_ref(&self) -> &'a [u8] {
        self.data
    }

    /// Move to an absolute offset. Seeking to the very end is allowed.
    pub fn seek(&mut self, pos: usize) -> Result<()> {
        if pos > self.data.len() {
            return Err(Error::OutOfBounds {
                offset: pos,
                requested: 0,
                remaining: 0,
            });
        }
        self.pos = pos;
        Ok(())
    }

    /// Skip `n` bytes
    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.read_bytes(n).map(|_| ())
    }

    /// Everything from the current position to the end, consuming it
    pub fn read_rest(&mut self) -> &'a [u8] {
        let rest = &self.data[self.pos..];
        self.pos = self.data.len();
        rest
    }

    /// Read exactly `n` bytes
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(Error::OutOfBounds {
                offset: self.pos,
                requested: n,
                remaining,
            });
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Read a fixed size array
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut array = [0u8; N];
        array.copy_from_slice(self.read_bytes(N)?);
        Ok(array)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_u16<E: ByteOrder>(&mut self) -> Result<u16> {
        self.read_bytes(2).map(E::read_u16)
    }

    pub fn read_u32<E: ByteOrder>(&mut self) -> Result<u32> {
        self.read_bytes(4).map(E::read_u32)
    }

    pub fn read_i32<E: ByteOrder>(&mut self) -> Result<i32> {
        self.read_bytes(4).map(E::read_i32)
    }

    /// Read a length prefix of the given width followed by that many bytes.
    ///
    /// On failure the position is restored to where the prefix started.
    pub fn read_prefixed<E: ByteOrder>(&mut self, width: LengthWidth) -> Result<&'a [u8]> {
        let start = self.pos;
        let len = match width {
            LengthWidth::U8 => self.read_u8()? as usize,
            LengthWidth::U16 => self.read_u16::<E>()? as usize,
            LengthWidth::U32 => self.read_u32::<E>()? as usize,
        };
        self.read_bytes(len).map_err(|e| {
            self.pos = start;
            e
        })
    }
}
