//! This library handles reading from and creating **PAC** archives, along with the **BMZ** bitmaps
//! and **TTP** animations stored inside them.
//!
//! # PAC Archive Format Documentation
//!
//! A PAC file is a flat container: an entry count, a fixed size index record per entry, then the
//! entry data. There are no signature bytes, no compression at the container level and no
//! alignment padding between entries.
//!
//! ## File Structure
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Entry Count            | 4 bytes: Number of records in the index                    |
//! | 0x0004         | Index                  | Entry Count × 64 byte records                              |
//! | 0x0004 + 64·n  | Data                   | Entry data, in index order                                 |
//!
//! ### Index Record
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Data Offset            | 4 bytes: Offset of the entry data from the start of file   |
//! | 0x0004         | Data Size              | 4 bytes: Size of the entry data                            |
//! | 0x0008         | Name                   | 56 bytes: Shift-JIS name, NUL terminated and NUL padded    |
//!
//! - **Data Offset**: absolute, so entries may in principle be stored in any order. Archives
//!   written by [`PacWriter`] store them back to back in index order.
//! - **Name**: at most 55 bytes so that the terminator always fits.
//!
//! Since the format carries no magic number, [`PacArchive::open`] checks the shape of the index
//! instead: every name must be terminated and non-empty, and no data may start inside the index.
//!
//! ### Entry Kinds
//!
//! The extension of an entry name decides how [`PacArchive::extract_decoded`] treats it:
//!
//! - `.bmz`: a compressed bitmap, see [`pac_bmz`]
//! - `.ttp`: an animation descriptor, see [`pac_ttp`]
//! - anything else is returned as is
//!
//! ## Additional Information
//!
//! - **File Extension**: `.pac`
//! - **Endianness**: Little-endian for all multi-byte integers
//!
//! ```
//! use pac_archive::{DecodedEntry, PacArchive};
//!
//! let data = pac_archive::create([("readme.txt", b"hello".to_vec())])?;
//! let pac = PacArchive::open(data)?;
//!
//! assert_eq!(pac.extract("readme.txt")?, b"hello");
//! assert!(matches!(pac.extract_decoded("readme.txt")?, DecodedEntry::Raw(_)));
//! # Ok::<(), pac_archive::error::Error>(())
//! ```

pub mod artifact;
pub mod entry;
pub mod error;
pub mod read;
pub mod types;
pub mod write;

pub use entry::{ArchiveEntry, DecodedEntry, EntryKind};
pub use read::PacArchive;
pub use write::{create, EntrySource, PacWriter, PacWriterOptions};
