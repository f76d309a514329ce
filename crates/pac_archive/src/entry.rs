//! Entries of a PAC archive
//!

use std::ops::Range;
use std::path::{Component, Path, PathBuf};

use pac_bmz::BitmapImage;
use pac_ttp::TtpAnimation;

use crate::artifact::artifact_name;

/// How the data of an entry is interpreted, decided by the extension of its name
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Opaque bytes
    #[default]
    Raw,
    /// A `.bmz` compressed bitmap
    Bitmap,
    /// A `.ttp` animation descriptor
    Animation,
}

impl EntryKind {
    /// Kind of an entry called `name`. Extensions are compared without regard to case.
    pub fn from_name(name: &str) -> Self {
        match name.rsplit_once('.') {
            Some((_, ext)) if ext.eq_ignore_ascii_case("bmz") => EntryKind::Bitmap,
            Some((_, ext)) if ext.eq_ignore_ascii_case("ttp") => EntryKind::Animation,
            _ => EntryKind::Raw,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            EntryKind::Raw => "raw",
            EntryKind::Bitmap => "bitmap",
            EntryKind::Animation => "animation",
        }
    }
}

/// Structure representing a PAC file entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Position in the index
    pub index: usize,
    /// Name of the file
    pub name: Box<str>,
    /// Raw file name. To be used when name was incorrectly decoded.
    pub name_raw: Box<[u8]>,
    /// Offset of the data from the start of the archive
    pub offset: u64,
    /// Size of the data in the archive
    pub stored_size: u64,
    /// Size of the data once decoded.
    ///
    /// For bitmaps this is the size of the embedded `.bmp` file taken from the BMZ header,
    /// for everything else the stored size.
    pub size: u64,
    /// How the data is interpreted
    pub kind: EntryKind,
}

impl ArchiveEntry {
    /// Byte range of the data within the archive
    pub fn data_range(&self) -> Range<usize> {
        self.offset as usize..(self.offset + self.stored_size) as usize
    }

    /// Get the name as a relative path that stays inside the directory it is joined to.
    ///
    /// Components are separated by `/` and map one to one onto path components. Returns `None`
    /// for names that are absolute, climb out with `..`, or hold a component that would not come
    /// back unchanged from the file system: empty, `.`, or containing `\` or `:`.
    ///
    /// # Warnings
    ///
    /// Use this rather than [`ArchiveEntry::name`] when extracting. Writing to the raw name lets
    /// a crafted archive overwrite files outside the target directory.
    pub fn enclosed_name(&self) -> Option<PathBuf> {
        enclosed_path(&self.name)
    }

    /// Relative path of the artifact this entry is extracted to, see [`crate::artifact`]
    pub fn artifact_path(&self) -> Option<PathBuf> {
        enclosed_path(&artifact_name(&self.name))
    }
}

pub(crate) fn enclosed_path(name: &str) -> Option<PathBuf> {
    if name.contains(['\0', '\\', ':']) {
        return None;
    }

    let mut path = PathBuf::new();
    for part in name.split('/') {
        let mut components = Path::new(part).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(normal)), None) if normal == part => path.push(part),
            _ => return None,
        }
    }

    Some(path)
}

/// Data of an entry after the codec for its kind has been applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedEntry {
    Raw(Vec<u8>),
    Bitmap(BitmapImage),
    Animation(TtpAnimation),
}

impl DecodedEntry {
    pub fn kind(&self) -> EntryKind {
        match self {
            DecodedEntry::Raw(_) => EntryKind::Raw,
            DecodedEntry::Bitmap(_) => EntryKind::Bitmap,
            DecodedEntry::Animation(_) => EntryKind::Animation,
        }
    }
}

#[cfg(test)]
mod test {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use crate::entry::{enclosed_path, EntryKind};

    #[test]
    fn kind_from_extension() {
        assert_eq!(EntryKind::from_name("a.bmz"), EntryKind::Bitmap);
        assert_eq!(EntryKind::from_name("A.BMZ"), EntryKind::Bitmap);
        assert_eq!(EntryKind::from_name("op.Ttp"), EntryKind::Animation);
        assert_eq!(EntryKind::from_name("bmz"), EntryKind::Raw);
        assert_eq!(EntryKind::from_name("a.bmz.bak"), EntryKind::Raw);
        assert_eq!(EntryKind::from_name("readme.txt"), EntryKind::Raw);
    }

    #[test]
    fn enclosed_names() {
        assert_eq!(enclosed_path("a.bmz"), Some(PathBuf::from("a.bmz")));
        assert_eq!(
            enclosed_path("sub/dir/a.ttp"),
            Some(PathBuf::from("sub").join("dir").join("a.ttp"))
        );
        assert_eq!(enclosed_path("..a"), Some(PathBuf::from("..a")));
    }

    #[test]
    fn escaping_names() {
        for name in ["../a", "sub/../../a", "/etc/passwd", "\\a", "C:\\a", "c:a", "", ".", "a\0b"] {
            assert_eq!(enclosed_path(name), None, "{name:?}");
        }
    }

    #[test]
    fn names_without_a_single_path() {
        for name in ["sub\\a.txt", "./a", "a//b", "a/", "sub/./a"] {
            assert_eq!(enclosed_path(name), None, "{name:?}");
        }
    }
}
