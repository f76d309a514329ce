//! Base types for structure of PAC file.

use binrw::{BinRead, BinWrite};

/// Size of the entry count at the start of the file
pub const HEADER_SIZE: usize = 4;

/// Size of a single index record
pub const RECORD_SIZE: usize = 64;

/// Size of the name field of an index record
pub const NAME_SIZE: usize = 56;

/// Longest name that still leaves room for its NUL terminator
pub const MAX_NAME_LEN: usize = NAME_SIZE - 1;

/// PAC file header
///
/// Only the number of records in the index.
/// All data is stored in little endian format
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct PacHeader {
    /// The number of records stored in the index
    pub entries: u32,
}

impl PacHeader {
    /// Offset of the first byte after the index
    pub fn index_end(&self) -> u64 {
        HEADER_SIZE as u64 + RECORD_SIZE as u64 * self.entries as u64
    }
}

/// PAC index record
///
/// Defines an entry in the PAC file
#[derive(BinRead, BinWrite, Debug, Copy, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct PacRecord {
    /// The offset to the data for this record from the start of the file
    pub offset: u32,

    /// The size of this record's data
    pub size: u32,

    /// Shift-JIS name, NUL terminated and padded with NUL
    pub name: [u8; NAME_SIZE],
}

impl Default for PacRecord {
    fn default() -> Self {
        Self {
            offset: Default::default(),
            size: Default::default(),
            name: [0; NAME_SIZE],
        }
    }
}

impl PacRecord {
    /// Name bytes up to the terminator, or `None` when the field has no terminator
    pub fn name_bytes(&self) -> Option<&[u8]> {
        self.name
            .iter()
            .position(|&b| b == 0)
            .map(|end| &self.name[..end])
    }

    /// Offset one past the last byte of the record's data
    pub fn end(&self) -> u64 {
        self.offset as u64 + self.size as u64
    }

    /// Build a record for an already encoded name.
    ///
    /// `name` must be at most [`MAX_NAME_LEN`] bytes long.
    pub(crate) fn with_name(name: &[u8], offset: u32, size: u32) -> Self {
        let mut record = PacRecord {
            offset,
            size,
            ..Default::default()
        };
        record.name[..name.len()].copy_from_slice(name);
        record
    }
}
