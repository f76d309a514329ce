//! Types for reading PAC archives
//!

use std::{
    fmt::{self, Debug},
    io::{Cursor, Read},
};

use binrw::BinRead;
use encoding_rs::SHIFT_JIS;
use indexmap::IndexMap;
use pac_bmz::BmzHeader;
use tracing::{debug, instrument, trace};

use crate::{
    entry::{ArchiveEntry, DecodedEntry, EntryKind},
    error::{CodecError, Error, FileNotFoundError, ParseError, Result},
    types::{PacHeader, PacRecord, HEADER_SIZE},
};

/// PAC archive reader
///
/// The whole archive is held in memory. Entries are validated once when the archive is opened, so
/// every later lookup is a slice of that buffer.
///
/// ```no_run
/// fn list_pac_contents(path: &str) -> pac_archive::error::Result<()> {
///     let pac = pac_archive::PacArchive::new(std::fs::File::open(path)?)?;
///
///     for entry in pac.entries() {
///         println!("{} {:?} {}", entry.name, entry.kind, entry.size);
///     }
///
///     Ok(())
/// }
/// ```
pub struct PacArchive {
    data: Vec<u8>,
    files: IndexMap<Box<str>, ArchiveEntry>,
}

impl Debug for PacArchive {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("PacArchive")
            .field("size", &self.data.len())
            .field("files", &self.files.len())
            .finish()
    }
}

impl PacArchive {
    /// Read a PAC archive from an in-memory buffer
    #[instrument(skip_all, err, fields(size = data.len()))]
    pub fn open(data: Vec<u8>) -> Result<PacArchive> {
        let files = Self::get_metadata(&data)?;
        debug!(entries = files.len(), "opened pac archive");

        Ok(PacArchive { data, files })
    }

    /// Read a PAC archive collecting the files it contains.
    pub fn new(mut reader: impl Read) -> Result<PacArchive> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::open(data)
    }

    /// Number of entries contained in this PAC.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether this PAC archive contains no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over all the file names in this archive, in index order.
    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(|s| s.as_ref())
    }

    /// Returns an iterator over all the entries in this archive, in index order.
    pub fn entries(&self) -> impl Iterator<Item = &ArchiveEntry> {
        self.files.values()
    }

    /// Total size of the files once decoded, if it can be known.
    pub fn decoded_size(&self) -> Option<u128> {
        let mut total = 0u128;
        for file in self.files.values() {
            total = total.checked_add(file.size as u128)?;
        }
        Some(total)
    }

    /// Get the index of a file entry by name, if it's present.
    #[inline(always)]
    pub fn index_for_name(&self, name: &str) -> Option<usize> {
        self.files.get_index_of(name)
    }

    /// Get the name of a file entry, if it's present.
    #[inline(always)]
    pub fn name_for_index(&self, index: usize) -> Option<&str> {
        self.files.get_index(index).map(|(name, _)| name.as_ref())
    }

    /// Search for a file entry by name
    pub fn by_name(&self, name: &str) -> Result<&ArchiveEntry> {
        self.files
            .get(name)
            .ok_or_else(|| Error::FileNotFound(FileNotFoundError::Name(name.to_owned())))
    }

    /// Get a contained file by index
    pub fn by_index(&self, file_number: usize) -> Result<&ArchiveEntry> {
        self.files
            .get_index(file_number)
            .map(|(_, entry)| entry)
            .ok_or(Error::FileNotFound(FileNotFoundError::Index(file_number)))
    }

    /// Stored bytes of the named entry
    pub fn extract(&self, name: &str) -> Result<&[u8]> {
        let entry = self.by_name(name)?;
        Ok(self.data_for(entry))
    }

    /// Stored bytes of an entry of this archive
    pub fn data_for(&self, entry: &ArchiveEntry) -> &[u8] {
        &self.data[entry.data_range()]
    }

    /// Named entry with the codec for its kind applied
    #[instrument(skip(self), err)]
    pub fn extract_decoded(&self, name: &str) -> Result<DecodedEntry> {
        let entry = self.by_name(name)?;
        self.decode(entry)
    }

    /// Apply the codec for its kind to an entry of this archive
    pub fn decode(&self, entry: &ArchiveEntry) -> Result<DecodedEntry> {
        let data = self.data_for(entry);
        let decoded = match entry.kind {
            EntryKind::Raw => Ok(DecodedEntry::Raw(data.to_vec())),
            EntryKind::Bitmap => pac_bmz::decompress(data)
                .map(DecodedEntry::Bitmap)
                .map_err(CodecError::from),
            EntryKind::Animation => pac_ttp::decode(data)
                .map(DecodedEntry::Animation)
                .map_err(CodecError::from),
        };

        decoded.map_err(|source| Error::Codec {
            name: entry.name.to_string(),
            offset: entry.offset,
            source,
        })
    }

    /// Decode every entry in index order.
    ///
    /// A failing entry yields its error and the iteration carries on with the next one.
    pub fn decode_all(&self) -> impl Iterator<Item = (&ArchiveEntry, Result<DecodedEntry>)> {
        self.entries().map(|entry| (entry, self.decode(entry)))
    }

    /// The whole archive as read
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Unwrap and return the archive buffer
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }

    fn get_records(data: &[u8]) -> Result<Vec<PacRecord>> {
        if data.len() < HEADER_SIZE {
            return Err(ParseError::TruncatedIndex {
                required: HEADER_SIZE as u64,
                len: data.len(),
            }
            .into());
        }

        let mut reader = Cursor::new(data);
        let header = PacHeader::read(&mut reader)?;
        if header.index_end() > data.len() as u64 {
            return Err(ParseError::TruncatedIndex {
                required: header.index_end(),
                len: data.len(),
            }
            .into());
        }

        (0..header.entries)
            .map(|_| PacRecord::read(&mut reader).map_err(Error::from))
            .collect()
    }

    fn get_metadata(data: &[u8]) -> Result<IndexMap<Box<str>, ArchiveEntry>> {
        let records = Self::get_records(data)?;
        let index_end = PacHeader {
            entries: records.len() as u32,
        }
        .index_end();

        let mut names = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            let name = match record.name_bytes() {
                None => {
                    return Err(
                        ParseError::BadMagic(format!("name of record {index} is not terminated"))
                            .into(),
                    )
                }
                Some([]) => {
                    return Err(ParseError::BadMagic(format!("record {index} has no name")).into())
                }
                Some(name) => name,
            };
            if (record.offset as u64) < index_end {
                return Err(ParseError::BadMagic(format!(
                    "data of record {index} starts at {:#x}, inside the index",
                    record.offset
                ))
                .into());
            }
            names.push(name);
        }

        for (index, record) in records.iter().enumerate() {
            if record.end() > data.len() as u64 {
                return Err(ParseError::InvalidEntry {
                    index,
                    reason: format!(
                        "data ends at {:#x}, past the end of the archive at {:#x}",
                        record.end(),
                        data.len()
                    ),
                }
                .into());
            }
        }
        Self::check_overlaps(&records)?;

        let mut files = IndexMap::with_capacity(records.len());
        for (index, (record, name_raw)) in records.iter().zip(names).enumerate() {
            let (name, had_errors) = SHIFT_JIS.decode_without_bom_handling(name_raw);
            if had_errors {
                debug!(index, %name, "entry name is not valid Shift-JIS");
            }

            let kind = EntryKind::from_name(&name);
            let stored = &data[record.offset as usize..record.end() as usize];
            let size = match kind {
                EntryKind::Bitmap => match BmzHeader::parse(stored) {
                    Ok(header) => header.uncompressed_size as u64,
                    Err(e) => {
                        debug!(index, %name, "unreadable bmz header: {e}");
                        record.size as u64
                    }
                },
                _ => record.size as u64,
            };

            let entry = ArchiveEntry {
                index,
                name: name.into(),
                name_raw: name_raw.into(),
                offset: record.offset as u64,
                stored_size: record.size as u64,
                size,
                kind,
            };
            trace!(?entry, "read index record");

            if files.contains_key(&entry.name) {
                return Err(ParseError::InvalidEntry {
                    index,
                    reason: format!("name {} is used by an earlier record", entry.name),
                }
                .into());
            }
            files.insert(entry.name.clone(), entry);
        }

        Ok(files)
    }

    /// Data ranges may not overlap, except for records pointing at exactly the same bytes.
    fn check_overlaps(records: &[PacRecord]) -> Result<()> {
        let mut ranges = records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.size > 0)
            .map(|(index, r)| (r.offset as u64, r.end(), index))
            .collect::<Vec<_>>();
        ranges.sort_unstable();

        let mut current: Option<(u64, u64, usize)> = None;
        for (start, end, index) in ranges {
            match current {
                Some((run_start, run_end, _)) if (start, end) == (run_start, run_end) => {
                    trace!(index, "record shares its data with another record");
                }
                Some((_, run_end, other)) if start < run_end => {
                    return Err(ParseError::InvalidEntry {
                        index: index.max(other),
                        reason: format!(
                            "data overlaps record {}",
                            index.min(other)
                        ),
                    }
                    .into());
                }
                _ => current = Some((start, end, index)),
            }
        }

        Ok(())
    }
}
