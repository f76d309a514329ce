use pac_bmz::{error::Result, BitmapImage, Compression, PixelFormat};
use pretty_assertions::assert_eq;
use tracing::info;
use tracing_test::traced_test;

fn patterned(width: u32, height: u32, format: PixelFormat) -> Result<BitmapImage> {
    let palette = if format.is_indexed() {
        (0..format.max_palette())
            .map(|i| [i as u8, (i * 3) as u8, (i * 7) as u8, 0])
            .collect()
    } else {
        Vec::new()
    };

    let len = width as usize * height as usize * format.bytes_per_pixel();
    let pixels = (0..len)
        .map(|i| {
            if format.is_indexed() {
                (i % format.max_palette()) as u8
            } else {
                (i * 31 % 256) as u8
            }
        })
        .collect();

    BitmapImage::new(width, height, format, palette, pixels)
}

#[traced_test]
#[test]
fn every_format_survives_compression() -> Result<()> {
    let formats = [
        PixelFormat::Indexed1,
        PixelFormat::Indexed4,
        PixelFormat::Indexed8,
        PixelFormat::Bgr24,
        PixelFormat::Bgra32,
    ];

    for format in formats {
        // Odd widths exercise row padding and partially filled bytes
        for (width, height) in [(1, 1), (3, 5), (16, 16), (33, 2)] {
            let image = patterned(width, height, format)?;
            let bmz = pac_bmz::compress(&image)?;
            info!("{format:?} {width}x{height}: {} bytes", bmz.len());

            assert_eq!(pac_bmz::decompress(&bmz)?, image);
        }
    }

    Ok(())
}

#[test]
fn compression_level_does_not_change_pixels() -> Result<()> {
    let image = patterned(64, 64, PixelFormat::Bgr24)?;

    let fast = pac_bmz::compress_with(&image, Compression::fast())?;
    let best = pac_bmz::compress_with(&image, Compression::best())?;
    let stored = pac_bmz::compress_with(&image, Compression::none())?;

    assert_eq!(pac_bmz::inflate(&fast)?, pac_bmz::inflate(&best)?);
    assert_eq!(pac_bmz::decompress(&stored)?, image);

    Ok(())
}

#[test]
fn header_records_bitmap_size() -> Result<()> {
    let image = patterned(3, 5, PixelFormat::Indexed4)?;
    let bmz = pac_bmz::compress(&image)?;

    let header = pac_bmz::BmzHeader::parse(&bmz)?;
    assert_eq!(header.uncompressed_size as usize, image.to_bmp()?.len());

    Ok(())
}
