//! Decoding TTP files
//!

use byteorder::LittleEndian;
use pac_bytes::{ByteReader, LengthWidth};
use tracing::{debug, instrument};

use crate::error::{Error, Result};
use crate::types::{ResName, TtpAnimation, TtpFrame};

/// Decode a TTP file.
///
/// Bytes left after the last frame are kept in [`TtpAnimation::trailer`] so that encoding the
/// result gives back the input.
///
/// ```
/// let data = [
///     0x00, 0x00, 0x00, 0x00, // unknown
///     0x00, 0x00, 0x00, 0x00, // frame count
///     0x80, 0x02, 0x00, 0x00, // window width
///     0xE0, 0x01, 0x00, 0x00, // window height
/// ];
/// let animation = pac_ttp::decode(&data)?;
/// assert_eq!(animation.window_width, 640);
/// assert_eq!(pac_ttp::encode(&animation)?, data);
/// # Ok::<(), pac_ttp::error::Error>(())
/// ```
#[instrument(skip_all, err, fields(size = data.len()))]
pub fn decode(data: &[u8]) -> Result<TtpAnimation> {
    let mut reader = ByteReader::new(data);
    let header = |source| Error::TruncatedRecord {
        record: "header".into(),
        source,
    };

    let unknown = reader.read_u32::<LittleEndian>().map_err(header)?;
    let frame_count = reader.read_u32::<LittleEndian>().map_err(header)?;
    let window_width = reader.read_u32::<LittleEndian>().map_err(header)?;
    let window_height = reader.read_u32::<LittleEndian>().map_err(header)?;

    let capacity = (frame_count as usize).min(reader.remaining() / TtpFrame::MIN_SIZE);
    let mut frames = Vec::with_capacity(capacity);
    for index in 0..frame_count {
        let frame = read_frame(&mut reader).map_err(|source| Error::TruncatedRecord {
            record: format!("frame {index}"),
            source,
        })?;
        frames.push(frame);
    }

    let trailer = reader.read_rest().to_vec();
    if !trailer.is_empty() {
        debug!(len = trailer.len(), "keeping bytes after the last frame");
    }

    Ok(TtpAnimation {
        unknown,
        window_width,
        window_height,
        frames,
        trailer,
    })
}

fn read_frame(reader: &mut ByteReader<'_>) -> pac_bytes::Result<TtpFrame> {
    let sprite_name = read_name(reader)?;
    let se_name = read_name(reader)?;
    let textbox_name = read_name(reader)?;

    let mut values = [0u32; 5];
    for value in values.iter_mut() {
        *value = reader.read_u32::<LittleEndian>()?;
    }

    Ok(TtpFrame {
        sprite_name,
        se_name,
        textbox_name,
        values,
    })
}

fn read_name(reader: &mut ByteReader<'_>) -> pac_bytes::Result<ResName> {
    reader
        .read_prefixed::<LittleEndian>(LengthWidth::U32)
        .map(|bytes| ResName::new(bytes.to_vec()))
}
