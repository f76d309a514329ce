//! Naming and encoding of the files an archive is extracted to and packed from
//!
//! A bitmap entry `name.bmz` is extracted to `name.bmz.bmp` and an animation entry `name.ttp` to
//! `name.ttp.json`. Every other entry keeps its bytes and, as long as packing would not read it as
//! one of those, its name. A raw entry named like an artifact, such as `name.bmz.bmp`, gets `.raw`
//! appended. So does one that would be read as escaped that way, which keeps the mapping one to
//! one. Packing reverses it.

use pac_bmz::BitmapImage;

use crate::entry::{DecodedEntry, EntryKind};
use crate::error::CodecError;
use crate::write::EntrySource;

/// Extension added to the artifact of a bitmap entry
pub const BITMAP_SUFFIX: &str = ".bmp";

/// Extension added to the artifact of an animation entry
pub const ANIMATION_SUFFIX: &str = ".json";

/// Extension added to the artifact of a raw entry whose name would otherwise be misread
pub const RAW_SUFFIX: &str = ".raw";

/// What is appended to the name of an entry of this kind when it is extracted, escaping aside
pub const fn suffix(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::Raw => "",
        EntryKind::Bitmap => BITMAP_SUFFIX,
        EntryKind::Animation => ANIMATION_SUFFIX,
    }
}

/// File name an entry is extracted to
pub fn artifact_name(entry_name: &str) -> String {
    match EntryKind::from_name(entry_name) {
        EntryKind::Raw if needs_escape(entry_name) => format!("{entry_name}{RAW_SUFFIX}"),
        kind => format!("{entry_name}{}", suffix(kind)),
    }
}

/// Entry name and kind for a file found while packing
///
/// Only `.bmz.bmp` and `.ttp.json` files are converted back. A file called `name.bmz` is
/// taken to be a BMZ file already and stored as is. A trailing `.raw` is dropped only from names
/// [`artifact_name`] escapes.
pub fn entry_name(artifact_name: &str) -> (&str, EntryKind) {
    if let Some(stem) = strip_suffix_ignore_case(artifact_name, RAW_SUFFIX) {
        if needs_escape(stem) {
            return (stem, EntryKind::Raw);
        }
    }

    codec_artifact(artifact_name).unwrap_or((artifact_name, EntryKind::Raw))
}

/// Stem and kind of a name that reads as the artifact of a bitmap or an animation
fn codec_artifact(name: &str) -> Option<(&str, EntryKind)> {
    [
        (BITMAP_SUFFIX, EntryKind::Bitmap),
        (ANIMATION_SUFFIX, EntryKind::Animation),
    ]
    .into_iter()
    .find_map(|(suffix, kind)| {
        strip_suffix_ignore_case(name, suffix)
            .filter(|stem| EntryKind::from_name(stem) == kind)
            .map(|stem| (stem, kind))
    })
}

/// Whether a raw entry called `name` has to be extracted under an escaped name
fn needs_escape(name: &str) -> bool {
    codec_artifact(name).is_some()
        || strip_suffix_ignore_case(name, RAW_SUFFIX).is_some_and(needs_escape)
}

fn strip_suffix_ignore_case<'a>(name: &'a str, suffix: &str) -> Option<&'a str> {
    let split = name.len().checked_sub(suffix.len())?;
    let (stem, tail) = (name.get(..split)?, name.get(split..)?);
    tail.eq_ignore_ascii_case(suffix).then_some(stem)
}

impl DecodedEntry {
    /// Bytes of the file this entry is extracted to
    pub fn to_artifact(&self) -> Result<Vec<u8>, CodecError> {
        Ok(match self {
            DecodedEntry::Raw(data) => data.clone(),
            DecodedEntry::Bitmap(image) => image.to_bmp()?,
            DecodedEntry::Animation(animation) => pac_ttp::to_json(animation)?.into_bytes(),
        })
    }
}

impl EntrySource {
    /// Read back a file written by [`DecodedEntry::to_artifact`]
    pub fn from_artifact(kind: EntryKind, data: Vec<u8>) -> Result<Self, CodecError> {
        Ok(match kind {
            EntryKind::Raw => EntrySource::Raw(data),
            EntryKind::Bitmap => EntrySource::Bitmap(BitmapImage::from_bmp(&data)?),
            EntryKind::Animation => {
                let text = String::from_utf8(data).map_err(|e| {
                    pac_ttp::error::Error::SchemaViolation(format!("text is not UTF-8: {e}"))
                })?;
                EntrySource::Animation(pac_ttp::from_json(&text)?)
            }
        })
    }
}

#[cfg(test)]
mod test {
    use pac_bmz::{BitmapImage, PixelFormat};
    use pac_ttp::TtpAnimation;
    use pretty_assertions::assert_eq;

    use crate::artifact::{artifact_name, entry_name};
    use crate::entry::{DecodedEntry, EntryKind};
    use crate::error::CodecError;
    use crate::write::EntrySource;

    #[test]
    fn names_map_both_ways() {
        for (entry, artifact, kind) in [
            ("a.bmz", "a.bmz.bmp", EntryKind::Bitmap),
            ("b.TTP", "b.TTP.json", EntryKind::Animation),
            ("c.txt", "c.txt", EntryKind::Raw),
            ("c.raw", "c.raw", EntryKind::Raw),
            ("d.bmz.bmp", "d.bmz.bmp.raw", EntryKind::Raw),
            ("d.bmz.BMP.raw", "d.bmz.BMP.raw.raw", EntryKind::Raw),
            ("e.ttp.json", "e.ttp.json.raw", EntryKind::Raw),
            ("sub/f.bmz.bmp", "sub/f.bmz.bmp.raw", EntryKind::Raw),
        ] {
            assert_eq!(artifact_name(entry), artifact);
            assert_eq!(entry_name(artifact), (entry, kind));
        }
    }

    #[test]
    fn packing_names() {
        assert_eq!(entry_name("a.bmz.BMP"), ("a.bmz", EntryKind::Bitmap));
        assert_eq!(entry_name("a.bmz"), ("a.bmz", EntryKind::Raw));
        assert_eq!(entry_name("a.bmp"), ("a.bmp", EntryKind::Raw));
        assert_eq!(entry_name("a.txt.json"), ("a.txt.json", EntryKind::Raw));
        assert_eq!(entry_name(".json"), (".json", EntryKind::Raw));
        assert_eq!(entry_name("テ.ttp.json"), ("テ.ttp", EntryKind::Animation));
        assert_eq!(entry_name("a.bmz.bmp.RAW"), ("a.bmz.bmp", EntryKind::Raw));
        assert_eq!(entry_name("a.txt.raw"), ("a.txt.raw", EntryKind::Raw));
    }

    #[test]
    fn artifacts_round_trip() -> Result<(), CodecError> {
        let image = BitmapImage::new(
            2,
            1,
            PixelFormat::Indexed8,
            vec![[0, 0, 0, 0], [255, 255, 255, 0]],
            vec![0, 1],
        )?;
        let animation = TtpAnimation {
            window_width: 320,
            ..Default::default()
        };

        for decoded in [
            DecodedEntry::Raw(b"abc".to_vec()),
            DecodedEntry::Bitmap(image.clone()),
            DecodedEntry::Animation(animation.clone()),
        ] {
            let bytes = decoded.to_artifact()?;
            let source = EntrySource::from_artifact(decoded.kind(), bytes)?;
            match (source, decoded) {
                (EntrySource::Raw(a), DecodedEntry::Raw(b)) => assert_eq!(a, b),
                (EntrySource::Bitmap(a), DecodedEntry::Bitmap(b)) => assert_eq!(a, b),
                (EntrySource::Animation(a), DecodedEntry::Animation(b)) => assert_eq!(a, b),
                (source, decoded) => panic!("{source:?} does not match {decoded:?}"),
            }
        }

        Ok(())
    }

    #[test]
    fn animation_artifact_must_be_text() {
        assert!(matches!(
            EntrySource::from_artifact(EntryKind::Animation, vec![0xFF]),
            Err(CodecError::Animation(pac_ttp::error::Error::SchemaViolation(_)))
        ));
    }
}
