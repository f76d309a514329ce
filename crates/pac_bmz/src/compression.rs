//! BMZ compression and decompression handling.

use std::io::{Cursor, Write};

use binrw::BinWrite;
use flate2::{write::ZlibEncoder, Compression, Decompress, FlushDecompress, Status};
use tracing::{debug, instrument};

use crate::bitmap::BitmapImage;
use crate::error::{Error, Result};
use crate::types::BmzHeader;

/// Best ratio deflate can reach; a header promising more than this is lying
const MAX_DEFLATE_RATIO: usize = 1032;

/// Inflate a BMZ file into the `.bmp` file it wraps.
///
/// The zlib stream must end exactly where the input ends and must produce exactly the number
/// of bytes announced by the header, anything else is reported as [`Error::CorruptStream`].
#[instrument(skip_all, err, fields(size = data.len()))]
pub fn inflate(data: &[u8]) -> Result<Vec<u8>> {
    let header = BmzHeader::parse(data)?;
    let stream = &data[BmzHeader::SIZE..];
    let expected = header.uncompressed_size as usize;

    if expected > stream.len().saturating_mul(MAX_DEFLATE_RATIO) {
        return Err(Error::CorruptStream(format!(
            "{} compressed bytes cannot inflate to {expected}",
            stream.len()
        )));
    }

    let mut decoder = Decompress::new(true);
    let mut output = Vec::with_capacity(expected.saturating_add(1));
    let status = decoder
        .decompress_vec(stream, &mut output, FlushDecompress::Finish)
        .map_err(|e| Error::CorruptStream(e.to_string()))?;

    if status != Status::StreamEnd {
        return Err(Error::CorruptStream(if output.len() > expected {
            format!("stream inflates past the declared {expected} bytes")
        } else {
            "stream ends before its end marker".to_string()
        }));
    }
    if output.len() != expected {
        return Err(Error::CorruptStream(format!(
            "stream inflates to {} bytes, header declares {expected}",
            output.len()
        )));
    }
    if decoder.total_in() != stream.len() as u64 {
        return Err(Error::CorruptStream(format!(
            "stream consumed {} of {} bytes",
            decoder.total_in(),
            stream.len()
        )));
    }

    debug!(compressed = stream.len(), inflated = expected, "inflated bmz");
    Ok(output)
}

/// Wrap an encoded `.bmp` file into a BMZ file
#[instrument(skip_all, err, fields(size = bitmap.len()))]
pub fn deflate(bitmap: &[u8], level: Compression) -> Result<Vec<u8>> {
    let header = BmzHeader {
        uncompressed_size: u32::try_from(bitmap.len())
            .map_err(|_| Error::TooLarge(bitmap.len()))?,
    };

    let mut out = Cursor::new(Vec::with_capacity(BmzHeader::SIZE + bitmap.len() / 2));
    header.write(&mut out)?;

    let mut encoder = ZlibEncoder::new(out.into_inner(), level);
    encoder.write_all(bitmap)?;
    Ok(encoder.finish()?)
}

/// Decode a BMZ file into its image
pub fn decompress(data: &[u8]) -> Result<BitmapImage> {
    BitmapImage::from_bmp(&inflate(data)?)
}

/// Encode an image as a BMZ file using the default compression level
pub fn compress(image: &BitmapImage) -> Result<Vec<u8>> {
    compress_with(image, Compression::default())
}

/// Encode an image as a BMZ file using the given compression level
pub fn compress_with(image: &BitmapImage, level: Compression) -> Result<Vec<u8>> {
    deflate(&image.to_bmp()?, level)
}
