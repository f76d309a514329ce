//! Base types for structure of TTP file.

use std::fmt;

use derive_more::derive::{Constructor, Deref};
use encoding_rs::SHIFT_JIS;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// An animation descriptor
///
/// Serializes through [`TtpDocument`], which adds the `frame_count` field of the binary header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TtpDocument", into = "TtpDocument")]
pub struct TtpAnimation {
    /// First header field, meaning unknown
    pub unknown: u32,

    /// Width of the window the animation plays in
    pub window_width: u32,

    /// Height of the window the animation plays in
    pub window_height: u32,

    /// Frames in playback order
    pub frames: Vec<TtpFrame>,

    /// Bytes found after the last frame, kept as they are
    pub trailer: Vec<u8>,
}

/// A single frame record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TtpFrame {
    pub sprite_name: ResName,
    pub se_name: ResName,
    pub textbox_name: ResName,

    /// Timing and placement values, in file order
    pub values: [u32; 5],
}

impl TtpFrame {
    /// Smallest possible frame: three empty names and five values
    pub const MIN_SIZE: usize = 3 * 4 + 5 * 4;
}

/// Resource name stored as Shift-JIS bytes
///
/// In text form it is a string when the bytes survive a decode/encode cycle unchanged, and
/// `{ "raw": [...] }` otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Constructor, Deref)]
pub struct ResName(Vec<u8>);

impl ResName {
    /// Encode a name as Shift-JIS
    ///
    /// Text that would decode to something else, such as `¥` which shares its byte with `\`,
    /// is rejected.
    pub fn from_text(text: &str) -> Result<Self> {
        let (bytes, _, unmappable) = SHIFT_JIS.encode(text);
        if unmappable {
            return Err(Error::SchemaViolation(format!(
                "{text:?} cannot be encoded as Shift-JIS"
            )));
        }
        let (decoded, malformed) = SHIFT_JIS.decode_without_bom_handling(&bytes);
        if malformed || decoded != text {
            return Err(Error::SchemaViolation(format!(
                "{text:?} reads back as {decoded:?} once encoded as Shift-JIS"
            )));
        }
        Ok(ResName(bytes.into_owned()))
    }

    /// Decoded name, if decoding it loses nothing
    pub fn to_text(&self) -> Option<String> {
        let (text, had_errors) = SHIFT_JIS.decode_without_bom_handling(&self.0);
        if had_errors {
            return None;
        }
        let (bytes, _, unmappable) = SHIFT_JIS.encode(&text);
        (!unmappable && bytes.as_ref() == self.0.as_slice()).then(|| text.into_owned())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl fmt::Display for ResName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&SHIFT_JIS.decode_without_bom_handling(&self.0).0)
    }
}

/// Text layout of a [`TtpAnimation`], mirroring the binary header
#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TtpDocument {
    unknown: u32,
    #[serde(default)]
    frame_count: Option<u32>,
    window_width: u32,
    window_height: u32,
    frames: Vec<TtpFrame>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    trailer: Vec<u8>,
}

impl From<TtpAnimation> for TtpDocument {
    fn from(value: TtpAnimation) -> Self {
        TtpDocument {
            unknown: value.unknown,
            frame_count: u32::try_from(value.frames.len()).ok(),
            window_width: value.window_width,
            window_height: value.window_height,
            frames: value.frames,
            trailer: value.trailer,
        }
    }
}

impl TryFrom<TtpDocument> for TtpAnimation {
    type Error = String;

    fn try_from(value: TtpDocument) -> core::result::Result<Self, Self::Error> {
        if let Some(count) = value.frame_count {
            if count as usize != value.frames.len() {
                return Err(format!(
                    "frame_count is {count} but {} frames are listed",
                    value.frames.len()
                ));
            }
        }

        Ok(TtpAnimation {
            unknown: value.unknown,
            window_width: value.window_width,
            window_height: value.window_height,
            frames: value.frames,
            trailer: value.trailer,
        })
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::error::{Error, Result};
    use crate::types::ResName;

    #[test]
    fn ascii_name_round_trip() -> Result<()> {
        let name = ResName::from_text("chr01_a")?;
        assert_eq!(name.as_bytes(), b"chr01_a");
        assert_eq!(name.to_text().as_deref(), Some("chr01_a"));
        Ok(())
    }

    #[test]
    fn shift_jis_name() -> Result<()> {
        let name = ResName::new(vec![0x83, 0x65, 0x83, 0x58, 0x83, 0x67]);
        assert_eq!(name.to_text().as_deref(), Some("テスト"));
        assert_eq!(ResName::from_text("テスト")?, name);
        assert_eq!(name.to_string(), "テスト");
        Ok(())
    }

    #[test]
    fn broken_name_has_no_text() {
        let name = ResName::new(vec![b'a', 0x81]);
        assert_eq!(name.to_text(), None);
        assert_eq!(name.len(), 2);
    }

    #[test]
    fn unmappable_text_is_rejected() {
        assert!(matches!(
            ResName::from_text("😀"),
            Err(Error::SchemaViolation(_))
        ));
    }

    #[test]
    fn ambiguous_text_is_rejected() {
        for text in ["¥", "a‾", "\u{2212}"] {
            assert!(
                matches!(ResName::from_text(text), Err(Error::SchemaViolation(_))),
                "{text:?}"
            );
        }
    }

    #[test]
    fn text_sharing_bytes_still_round_trips() -> Result<()> {
        let name = ResName::from_text("a\\b－")?;
        assert_eq!(name.to_text().as_deref(), Some("a\\b－"));
        Ok(())
    }
}
