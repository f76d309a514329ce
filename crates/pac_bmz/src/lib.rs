//! This library handles reading from and creating **BMZ** compressed bitmaps stored in PAC archives.
//!
//! # BMZ Format Documentation
//!
//! A BMZ file is a complete Windows `.bmp` file compressed with zlib, behind a small header.
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Magic number           | 4 bytes: "ZLC3"                                            |
//! | 0x0004         | Uncompressed Size      | 4 bytes: Size of the embedded `.bmp` file once inflated    |
//! | 0x0008         | Stream                 | zlib (RFC 1950) stream running to the end of the file      |
//!
//! - **Magic Number**: the ASCII bytes `ZLC3`.
//! - **Uncompressed Size**: a 4-byte unsigned integer. Inflating the stream must yield exactly
//!   this many bytes.
//! - **Stream**: a zlib stream, header and Adler-32 trailer included, with nothing after it.
//!
//! The inflated `.bmp` is decoded into a [`BitmapImage`] by [`BitmapImage::from_bmp`]; uncompressed
//! 1, 4, 8, 24 and 32 bit images are understood. [`compress`] always writes a bottom-up image with a
//! 40 byte `BITMAPINFOHEADER`, so re-encoding a BMZ keeps every pixel but not necessarily every byte.
//!
//! ## Additional Information
//!
//! - **File Extension**: `.bmz`
//! - **Endianness**: Little-endian for all multi-byte integers
//!
//! ```
//! use pac_bmz::{BitmapImage, PixelFormat};
//!
//! let image = BitmapImage::new(2, 1, PixelFormat::Bgr24, Vec::new(), vec![0; 6])?;
//! let bmz = pac_bmz::compress(&image)?;
//! assert_eq!(pac_bmz::decompress(&bmz)?, image);
//! # Ok::<(), pac_bmz::error::Error>(())
//! ```

pub mod bitmap;
pub mod compression;
pub mod error;
pub mod types;

pub use bitmap::{BitmapImage, PixelFormat};
pub use compression::{compress, compress_with, decompress, deflate, inflate};
pub use flate2::Compression;
pub use types::{BmzHeader, BMZ_MAGIC};
