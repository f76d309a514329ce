//! Types for writing PAC archives
//!

use std::io::{Cursor, Write};

use binrw::BinWrite;
use bon::Builder;
use encoding_rs::SHIFT_JIS;
use indexmap::IndexMap;
use pac_bmz::{BitmapImage, Compression};
use pac_ttp::TtpAnimation;
use tracing::{debug, instrument};

use crate::error::{CodecError, Error, Result};
use crate::types::{PacHeader, PacRecord, HEADER_SIZE, MAX_NAME_LEN, RECORD_SIZE};

/// Options for how the PAC file should be written
#[derive(Debug, Clone, Copy, Builder)]
pub struct PacWriterOptions {
    /// The zlib level used when a [`BitmapImage`] is added
    #[builder(default)]
    pub bitmap_compression: Compression,
}

impl Default for PacWriterOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Contents of an entry to be added to an archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntrySource {
    /// Bytes stored as they are
    Raw(Vec<u8>),
    /// Image stored as a BMZ file
    Bitmap(BitmapImage),
    /// Animation stored as a TTP file
    Animation(TtpAnimation),
}

impl From<Vec<u8>> for EntrySource {
    fn from(value: Vec<u8>) -> Self {
        EntrySource::Raw(value)
    }
}

impl From<&[u8]> for EntrySource {
    fn from(value: &[u8]) -> Self {
        EntrySource::Raw(value.to_vec())
    }
}

impl From<BitmapImage> for EntrySource {
    fn from(value: BitmapImage) -> Self {
        EntrySource::Bitmap(value)
    }
}

impl From<TtpAnimation> for EntrySource {
    fn from(value: TtpAnimation) -> Self {
        EntrySource::Animation(value)
    }
}

#[derive(Debug)]
struct PendingEntry {
    name: Box<str>,
    data: Vec<u8>,
}

/// PAC archive generator
///
/// Entries are kept in memory in the order they were added and laid out back to back after the
/// index when the archive is serialized. The same entries added in the same order always give the
/// same bytes.
///
/// ```
/// # fn doit() -> pac_archive::error::Result<()>
/// # {
/// use pac_archive::{PacWriter, PacWriterOptions};
///
/// let mut pac = PacWriter::new(PacWriterOptions::builder()
///            .bitmap_compression(pac_bmz::Compression::best())
///            .build());
///
/// pac.add_raw("hello_world.txt", b"Hello, World!".to_vec())?;
///
/// // We use a buffer here, though you'd normally use a `File`
/// let buf = pac.finish(Vec::new())?;
/// assert_eq!(buf.len(), 4 + 64 + 13);
///
/// # Ok(())
/// # }
/// # doit().unwrap();
/// ```
#[derive(Debug)]
pub struct PacWriter {
    options: PacWriterOptions,
    /// Keyed by the encoded name, which is what a reader compares
    files: IndexMap<Vec<u8>, PendingEntry>,
}

impl Default for PacWriter {
    fn default() -> Self {
        Self::new(PacWriterOptions::default())
    }
}

impl PacWriter {
    pub fn new(options: PacWriterOptions) -> PacWriter {
        PacWriter {
            options,
            files: IndexMap::new(),
        }
    }

    /// Number of entries added so far
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Add an entry, encoding decoded sources with their codec.
    ///
    /// The name is checked before anything is encoded. A failed add leaves the writer unchanged.
    #[instrument(skip(self, source), err)]
    pub fn add(&mut self, name: &str, source: impl Into<EntrySource>) -> Result<()> {
        let name_raw = encode_name(name)?;
        if let Some(existing) = self.files.get(&name_raw) {
            return Err(Error::DuplicateName(existing.name.to_string()));
        }

        let encoded = match source.into() {
            EntrySource::Raw(data) => Ok(data),
            EntrySource::Bitmap(image) => {
                pac_bmz::compress_with(&image, self.options.bitmap_compression)
                    .map_err(CodecError::from)
            }
            EntrySource::Animation(animation) => {
                pac_ttp::encode(&animation).map_err(CodecError::from)
            }
        };
        let data = encoded.map_err(|source| Error::Encode {
            name: name.to_owned(),
            source,
        })?;

        debug!(size = data.len(), "added entry");
        self.files.insert(
            name_raw,
            PendingEntry {
                name: name.into(),
                data,
            },
        );

        Ok(())
    }

    /// Add an entry stored exactly as given
    pub fn add_raw(&mut self, name: &str, data: impl Into<Vec<u8>>) -> Result<()> {
        self.add(name, EntrySource::Raw(data.into()))
    }

    /// Lay out the index and the data of every entry added
    #[instrument(skip_all, err, fields(entries = self.files.len()))]
    pub fn serialize(self) -> Result<Vec<u8>> {
        let index_end = (HEADER_SIZE + RECORD_SIZE * self.files.len()) as u64;
        let total = self
            .files
            .values()
            .fold(index_end, |total, file| total + file.data.len() as u64);
        if total > u32::MAX as u64 {
            return Err(Error::ArchiveTooLarge(total));
        }

        let header = PacHeader {
            entries: self.files.len() as u32,
        };

        let mut out = Cursor::new(Vec::with_capacity(total as usize));
        header.write(&mut out)?;

        let mut offset = header.index_end() as u32;
        for (name_raw, file) in &self.files {
            let size = file.data.len() as u32;
            PacRecord::with_name(name_raw, offset, size).write(&mut out)?;
            offset += size;
        }

        let mut out = out.into_inner();
        for file in self.files.into_values() {
            out.extend_from_slice(&file.data);
        }

        debug!(size = out.len(), "serialized pac archive");
        Ok(out)
    }

    /// Serialize the archive into `writer`
    ///
    /// This will return the writer.
    pub fn finish<W: Write>(self, mut writer: W) -> Result<W> {
        writer.write_all(&self.serialize()?)?;
        Ok(writer)
    }
}

/// Build an archive from `(name, contents)` pairs with the default options
pub fn create<I, N, S>(entries: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = (N, S)>,
    N: AsRef<str>,
    S: Into<EntrySource>,
{
    let mut writer = PacWriter::default();
    for (name, source) in entries {
        writer.add(name.as_ref(), source)?;
    }
    writer.serialize()
}

fn encode_name(name: &str) -> Result<Vec<u8>> {
    if name.is_empty() || name.contains('\0') {
        return Err(Error::InvalidName(name.to_owned()));
    }

    // Some characters encode to the bytes of another one (`¥` to `\`), so the name read back
    // has to be the name given.
    let (bytes, _, unmappable) = SHIFT_JIS.encode(name);
    let (decoded, malformed) = SHIFT_JIS.decode_without_bom_handling(&bytes);
    if unmappable || malformed || decoded != name {
        return Err(Error::InvalidName(name.to_owned()));
    }
    if bytes.len() > MAX_NAME_LEN {
        return Err(Error::NameTooLong {
            name: name.to_owned(),
            len: bytes.len(),
        });
    }

    Ok(bytes.into_owned())
}
