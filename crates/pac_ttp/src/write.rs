//! Encoding TTP files
//!

use byteorder::LittleEndian;
use pac_bytes::{ByteWriter, LengthWidth};
use tracing::instrument;

use crate::error::{Error, Result};
use crate::types::{TtpAnimation, TtpFrame};

/// Encode an animation back into a TTP file
#[instrument(skip_all, err, fields(frames = animation.frames.len()))]
pub fn encode(animation: &TtpAnimation) -> Result<Vec<u8>> {
    let frame_count = u32::try_from(animation.frames.len()).map_err(|_| {
        Error::SchemaViolation(format!(
            "{} frames do not fit the frame count",
            animation.frames.len()
        ))
    })?;

    let mut writer = ByteWriter::with_capacity(
        16 + animation.frames.len() * TtpFrame::MIN_SIZE + animation.trailer.len(),
    );
    writer.write_u32::<LittleEndian>(animation.unknown);
    writer.write_u32::<LittleEndian>(frame_count);
    writer.write_u32::<LittleEndian>(animation.window_width);
    writer.write_u32::<LittleEndian>(animation.window_height);

    for (index, frame) in animation.frames.iter().enumerate() {
        for (field, name) in [
            ("sprite_name", &frame.sprite_name),
            ("se_name", &frame.se_name),
            ("textbox_name", &frame.textbox_name),
        ] {
            writer
                .write_prefixed::<LittleEndian>(LengthWidth::U32, name.as_bytes())
                .map_err(|e| Error::SchemaViolation(format!("frame {index} {field}: {e}")))?;
        }
        for value in frame.values {
            writer.write_u32::<LittleEndian>(value);
        }
    }

    writer.write_bytes(&animation.trailer);

    Ok(writer.into_inner())
}

#[cfg(test)]
mod test {
    use pretty_assertions::{assert_eq, assert_str_eq};

    use crate::error::Result;
    use crate::read::decode;
    use crate::types::{ResName, TtpAnimation, TtpFrame};
    use crate::write::encode;

    #[test]
    fn write_two_frames() -> Result<()> {
        #[rustfmt::skip]
        let expected = [
            // Header
            0x00, 0x00, 0x00, 0x00,
            0x02, 0x00, 0x00, 0x00,
            0x20, 0x03, 0x00, 0x00,
            0x58, 0x02, 0x00, 0x00,
            // Frame 0
            0x01, 0x00, 0x00, 0x00, b'a',
            0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
            0x01, 0x00, 0x00, 0x00,
            0x02, 0x00, 0x00, 0x00,
            0x03, 0x00, 0x00, 0x00,
            0x04, 0x00, 0x00, 0x00,
            0x05, 0x00, 0x00, 0x00,
            // Frame 1
            0x00, 0x00, 0x00, 0x00,
            0x02, 0x00, 0x00, 0x00, b's', b'e',
            0x00, 0x00, 0x00, 0x00,
            0xFF, 0xFF, 0xFF, 0xFF,
            0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
        ];

        let animation = TtpAnimation {
            unknown: 0,
            window_width: 800,
            window_height: 600,
            frames: vec![
                TtpFrame {
                    sprite_name: ResName::from_text("a")?,
                    values: [1, 2, 3, 4, 5],
                    ..Default::default()
                },
                TtpFrame {
                    se_name: ResName::from_text("se")?,
                    values: [u32::MAX, 0, 0, 0, 0],
                    ..Default::default()
                },
            ],
            trailer: Vec::new(),
        };

        let actual = encode(&animation)?;
        assert_str_eq!(format!("{:02X?}", actual), format!("{:02X?}", expected));
        assert_eq!(decode(&actual)?, animation);

        Ok(())
    }

    #[test]
    fn write_keeps_trailer() -> Result<()> {
        let animation = TtpAnimation {
            trailer: vec![0x01, 0x02],
            ..Default::default()
        };

        let actual = encode(&animation)?;
        assert_eq!(actual.len(), 18);
        assert_eq!(&actual[16..], &[0x01, 0x02]);

        Ok(())
    }
}
