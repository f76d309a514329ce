//! Uncompressed bitmaps and their `.bmp` file encoding
//!

use byteorder::LittleEndian;
use pac_bytes::{ByteReader, ByteWriter};
use tracing::{instrument, trace};

use crate::error::{Error, Result};

/// Size of `BITMAPFILEHEADER`
pub const FILE_HEADER_SIZE: usize = 14;

/// Size of `BITMAPINFOHEADER`, the only info header written
pub const INFO_HEADER_SIZE: usize = 40;

/// Info header sizes that share the `BITMAPINFOHEADER` prefix (v1, v2, v3, v4, v5)
const READABLE_INFO_HEADERS: [u32; 5] = [40, 52, 56, 108, 124];

/// `BI_RGB`, uncompressed rows
const BI_RGB: u32 = 0;

/// 72 DPI
const PIXELS_PER_METRE: i32 = 2835;

/// Layout of a single pixel in [`BitmapImage::pixels`]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// 1-bit palette index, stored one index per byte
    Indexed1,
    /// 4-bit palette index, stored one index per byte
    Indexed4,
    /// 8-bit palette index
    Indexed8,
    /// Blue, green, red
    Bgr24,
    /// Blue, green, red, alpha
    Bgra32,
}

impl PixelFormat {
    /// Map a `.bmp` bit count onto a format
    pub fn from_bit_count(bits: u16) -> Option<Self> {
        match bits {
            1 => Some(PixelFormat::Indexed1),
            4 => Some(PixelFormat::Indexed4),
            8 => Some(PixelFormat::Indexed8),
            24 => Some(PixelFormat::Bgr24),
            32 => Some(PixelFormat::Bgra32),
            _ => None,
        }
    }

    /// Bits used by one pixel inside a `.bmp` row
    pub const fn bit_count(self) -> u16 {
        match self {
            PixelFormat::Indexed1 => 1,
            PixelFormat::Indexed4 => 4,
            PixelFormat::Indexed8 => 8,
            PixelFormat::Bgr24 => 24,
            PixelFormat::Bgra32 => 32,
        }
    }

    /// Bytes used by one pixel in the unpacked pixel buffer
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Indexed1 | PixelFormat::Indexed4 | PixelFormat::Indexed8 => 1,
            PixelFormat::Bgr24 => 3,
            PixelFormat::Bgra32 => 4,
        }
    }

    pub const fn is_indexed(self) -> bool {
        self.max_palette() != 0
    }

    /// Largest palette a format can address, zero for direct color
    pub const fn max_palette(self) -> usize {
        match self {
            PixelFormat::Indexed1 => 2,
            PixelFormat::Indexed4 => 16,
            PixelFormat::Indexed8 => 256,
            PixelFormat::Bgr24 | PixelFormat::Bgra32 => 0,
        }
    }

    /// Length of one `.bmp` row, padded to four bytes
    fn stride(self, width: usize) -> Option<usize> {
        let bits = width.checked_mul(self.bit_count() as usize)?;
        Some(bits.checked_add(31)? / 32 * 4)
    }
}

/// A decoded bitmap.
///
/// Pixels are stored row-major from the top row down, without row padding. Indexed formats keep
/// one palette index per byte whatever their bit count. Palette entries are `.bmp` quads:
/// blue, green, red, reserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitmapImage {
    width: u32,
    height: u32,
    format: PixelFormat,
    palette: Vec<[u8; 4]>,
    pixels: Vec<u8>,
}

impl BitmapImage {
    /// Build an image, checking that the pixel buffer matches the dimensions and format.
    pub fn new(
        width: u32,
        height: u32,
        format: PixelFormat,
        palette: Vec<[u8; 4]>,
        pixels: Vec<u8>,
    ) -> Result<Self> {
        if width == 0 || height == 0 || width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(Error::InvalidImage(format!(
                "dimensions {width}x{height} out of range"
            )));
        }

        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(format.bytes_per_pixel()))
            .ok_or_else(|| Error::InvalidImage(format!("{width}x{height} overflows")))?;
        if pixels.len() != expected {
            return Err(Error::InvalidImage(format!(
                "{width}x{height} {format:?} needs {expected} bytes of pixels, got {}",
                pixels.len()
            )));
        }

        if format.is_indexed() {
            if palette.is_empty() || palette.len() > format.max_palette() {
                return Err(Error::InvalidImage(format!(
                    "{format:?} palette of {} colors",
                    palette.len()
                )));
            }
            if format.max_palette() < 256 {
                let limit = format.max_palette();
                if let Some(index) = pixels.iter().find(|&&i| i as usize >= limit) {
                    return Err(Error::InvalidImage(format!(
                        "palette index {index} does not fit {format:?}"
                    )));
                }
            }
        } else if !palette.is_empty() {
            return Err(Error::InvalidImage(format!("{format:?} cannot carry a palette")));
        }

        Ok(BitmapImage {
            width,
            height,
            format,
            palette,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn palette(&self) -> &[[u8; 4]] {
        &self.palette
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// The pixels of row `y`, counted from the top
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let len = self.row_len();
        let start = y as usize * len;
        Some(&self.pixels[start..start + len])
    }

    /// The bytes of a single pixel
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width {
            return None;
        }
        let bpp = self.format.bytes_per_pixel();
        self.row(y)
            .map(|row| &row[x as usize * bpp..(x as usize + 1) * bpp])
    }

    fn row_len(&self) -> usize {
        self.width as usize * self.format.bytes_per_pixel()
    }

    /// Parse a `.bmp` file.
    ///
    /// Accepts uncompressed (`BI_RGB`) 1, 4, 8, 24 and 32 bit images with any info header that
    /// starts with the `BITMAPINFOHEADER` fields. Rows may be stored bottom-up or top-down.
    #[instrument(skip_all, err, fields(size = data.len()))]
    pub fn from_bmp(data: &[u8]) -> Result<Self> {
        let mut reader = ByteReader::new(data);

        if &reader.read_array::<2>()? != b"BM" {
            return Err(Error::UnsupportedFormat("missing BM signature".into()));
        }
        let _file_size = reader.read_u32::<LittleEndian>()?;
        reader.skip(4)?;
        let pixel_offset = reader.read_u32::<LittleEndian>()? as usize;

        let header_size = reader.read_u32::<LittleEndian>()?;
        if !READABLE_INFO_HEADERS.contains(&header_size) {
            return Err(Error::UnsupportedFormat(format!(
                "{header_size} byte info header"
            )));
        }
        let width = reader.read_i32::<LittleEndian>()?;
        let height = reader.read_i32::<LittleEndian>()?;
        let planes = reader.read_u16::<LittleEndian>()?;
        let bit_count = reader.read_u16::<LittleEndian>()?;
        let compression = reader.read_u32::<LittleEndian>()?;
        let _image_size = reader.read_u32::<LittleEndian>()?;
        let _x_resolution = reader.read_i32::<LittleEndian>()?;
        let _y_resolution = reader.read_i32::<LittleEndian>()?;
        let colors_used = reader.read_u32::<LittleEndian>()? as usize;
        let _colors_important = reader.read_u32::<LittleEndian>()?;

        if planes != 1 {
            return Err(Error::UnsupportedFormat(format!("{planes} planes")));
        }
        let format = PixelFormat::from_bit_count(bit_count).ok_or_else(|| {
            Error::UnsupportedFormat(format!("{bit_count} bits per pixel"))
        })?;
        if compression != BI_RGB {
            return Err(Error::UnsupportedFormat(format!(
                "compression method {compression}"
            )));
        }
        if width <= 0 || height == 0 {
            return Err(Error::InvalidImage(format!(
                "dimensions {width}x{height} out of range"
            )));
        }

        let top_down = height < 0;
        let width = width as u32;
        let height = height.unsigned_abs();
        trace!(width, height, ?format, top_down, "bitmap header");

        let palette = if format.is_indexed() {
            let count = if colors_used == 0 {
                format.max_palette()
            } else {
                colors_used
            };
            if count > format.max_palette() {
                return Err(Error::UnsupportedFormat(format!(
                    "{count} palette entries for {bit_count} bits per pixel"
                )));
            }
            reader.seek(FILE_HEADER_SIZE + header_size as usize)?;
            (0..count)
                .map(|_| reader.read_array::<4>())
                .collect::<pac_bytes::Result<Vec<_>>>()?
        } else {
            Vec::new()
        };

        let stride = format
            .stride(width as usize)
            .ok_or_else(|| Error::TooLarge(usize::MAX))?;
        let total = stride
            .checked_mul(height as usize)
            .ok_or_else(|| Error::TooLarge(usize::MAX))?;
        reader.seek(pixel_offset)?;
        let raw = reader.read_bytes(total)?;

        let row_len = width as usize * format.bytes_per_pixel();
        let mut pixels = Vec::with_capacity(row_len * height as usize);
        for y in 0..height as usize {
            let source = if top_down { y } else { height as usize - 1 - y };
            let row = &raw[source * stride..(source + 1) * stride];
            match format {
                PixelFormat::Indexed1 | PixelFormat::Indexed4 => {
                    unpack_indices(row, width as usize, format.bit_count() as usize, &mut pixels)
                }
                _ => pixels.extend_from_slice(&row[..row_len]),
            }
        }

        BitmapImage::new(width, height, format, palette, pixels)
    }

    /// Encode as a bottom-up `.bmp` file with a `BITMAPINFOHEADER`.
    #[instrument(skip_all, err, fields(width = self.width, height = self.height))]
    pub fn to_bmp(&self) -> Result<Vec<u8>> {
        let stride = self
            .format
            .stride(self.width as usize)
            .ok_or_else(|| Error::TooLarge(usize::MAX))?;
        let image_size = stride
            .checked_mul(self.height as usize)
            .ok_or_else(|| Error::TooLarge(usize::MAX))?;
        let pixel_offset = FILE_HEADER_SIZE + INFO_HEADER_SIZE + self.palette.len() * 4;
        let file_size = pixel_offset
            .checked_add(image_size)
            .ok_or_else(|| Error::TooLarge(usize::MAX))?;
        let too_large = |_| Error::TooLarge(file_size);

        let mut writer = ByteWriter::with_capacity(file_size);

        writer.write_bytes(b"BM");
        writer.write_u32::<LittleEndian>(u32::try_from(file_size).map_err(too_large)?);
        writer.write_u32::<LittleEndian>(0);
        writer.write_u32::<LittleEndian>(pixel_offset as u32);

        writer.write_u32::<LittleEndian>(INFO_HEADER_SIZE as u32);
        writer.write_i32::<LittleEndian>(self.width as i32);
        writer.write_i32::<LittleEndian>(self.height as i32);
        writer.write_u16::<LittleEndian>(1);
        writer.write_u16::<LittleEndian>(self.format.bit_count());
        writer.write_u32::<LittleEndian>(BI_RGB);
        writer.write_u32::<LittleEndian>(u32::try_from(image_size).map_err(too_large)?);
        writer.write_i32::<LittleEndian>(PIXELS_PER_METRE);
        writer.write_i32::<LittleEndian>(PIXELS_PER_METRE);
        writer.write_u32::<LittleEndian>(self.palette.len() as u32);
        writer.write_u32::<LittleEndian>(0);

        for entry in &self.palette {
            writer.write_bytes(entry);
        }

        let row_len = self.row_len();
        let mut row = vec![0u8; stride];
        for y in (0..self.height as usize).rev() {
            let source = &self.pixels[y * row_len..(y + 1) * row_len];
            row.fill(0);
            match self.format {
                PixelFormat::Indexed1 | PixelFormat::Indexed4 => {
                    pack_indices(source, self.format.bit_count() as usize, &mut row)
                }
                _ => row[..row_len].copy_from_slice(source),
            }
            writer.write_bytes(&row);
        }

        Ok(writer.into_inner())
    }
}

/// Expand sub-byte palette indices, most significant bits first
fn unpack_indices(row: &[u8], width: usize, bits: usize, out: &mut Vec<u8>) {
    let mask = (1u8 << bits) - 1;
    for x in 0..width {
        let bit = x * bits;
        let shift = 8 - bits - bit % 8;
        out.push((row[bit / 8] >> shift) & mask);
    }
}

fn pack_indices(indices: &[u8], bits: usize, row: &mut [u8]) {
    for (x, index) in indices.iter().enumerate() {
        let bit = x * bits;
        let shift = 8 - bits - bit % 8;
        row[bit / 8] |= index << shift;
    }
}
