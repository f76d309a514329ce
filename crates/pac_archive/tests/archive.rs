use pac_archive::{
    error::{Error, FileNotFoundError, ParseError, Result},
    DecodedEntry, EntryKind, EntrySource, PacArchive, PacWriter,
};
use pac_bmz::{BitmapImage, PixelFormat};
use pac_ttp::{ResName, TtpAnimation, TtpFrame};
use pretty_assertions::assert_eq;
use tracing::info;
use tracing_test::traced_test;

fn solid_bitmap() -> BitmapImage {
    let pixels = [0x20, 0x80, 0xF0].repeat(16 * 16);
    BitmapImage::new(16, 16, PixelFormat::Bgr24, Vec::new(), pixels)
        .expect("a 16x16 bgr image is valid")
}

fn three_frames() -> TtpAnimation {
    let frames = (0..3u32)
        .map(|i| TtpFrame {
            sprite_name: ResName::from_text(&format!("spr{i:02}")).expect("ascii name"),
            se_name: ResName::from_text(if i == 1 { "se_click" } else { "" }).expect("ascii name"),
            textbox_name: ResName::from_text("窓").expect("shift-jis name"),
            values: [i, i * 10, i * 100, 0, 1],
        })
        .collect();

    TtpAnimation {
        unknown: 0,
        window_width: 640,
        window_height: 480,
        frames,
        trailer: Vec::new(),
    }
}

fn sample_entries() -> Vec<(&'static str, EntrySource)> {
    vec![
        ("a.bmz", EntrySource::Bitmap(solid_bitmap())),
        ("b.ttp", EntrySource::Animation(three_frames())),
        ("readme.txt", EntrySource::Raw(b"not decoded".to_vec())),
        ("empty.dat", EntrySource::Raw(Vec::new())),
    ]
}

#[traced_test]
#[test]
fn decoded_entries_survive_an_archive() -> Result<()> {
    let data = pac_archive::create(sample_entries())?;
    info!("archive is {} bytes", data.len());

    let pac = PacArchive::open(data)?;
    assert_eq!(pac.len(), 4);

    let DecodedEntry::Bitmap(image) = pac.extract_decoded("a.bmz")? else {
        panic!("a.bmz is not a bitmap");
    };
    assert_eq!(image, solid_bitmap());

    let DecodedEntry::Animation(animation) = pac.extract_decoded("b.ttp")? else {
        panic!("b.ttp is not an animation");
    };
    assert_eq!(animation.frames.len(), 3);
    assert_eq!(animation, three_frames());

    let bitmap = pac.by_name("a.bmz")?;
    assert_eq!(bitmap.kind, EntryKind::Bitmap);
    assert_eq!(bitmap.size, 14 + 40 + 16 * 16 * 3);

    Ok(())
}

#[test]
fn raw_entries_are_byte_identical() -> Result<()> {
    let entries = [
        ("one.bin", (0..=255u8).collect::<Vec<_>>()),
        ("two.bmz", b"ZLC3 but not really".to_vec()),
        ("three", Vec::new()),
    ];

    let pac = PacArchive::open(pac_archive::create(entries.clone())?)?;

    assert_eq!(pac.file_names().collect::<Vec<_>>(), vec!["one.bin", "two.bmz", "three"]);
    for (name, data) in &entries {
        assert_eq!(pac.extract(name)?, data.as_slice());
    }
    assert!(matches!(
        pac.extract("four"),
        Err(Error::FileNotFound(FileNotFoundError::Name(_)))
    ));

    Ok(())
}

#[test]
fn create_is_deterministic() -> Result<()> {
    assert_eq!(
        pac_archive::create(sample_entries())?,
        pac_archive::create(sample_entries())?
    );

    Ok(())
}

#[test]
fn reserialized_archive_is_identical() -> Result<()> {
    let data = pac_archive::create(sample_entries())?;
    let pac = PacArchive::open(data.clone())?;

    let mut writer = PacWriter::default();
    for entry in pac.entries() {
        writer.add_raw(&entry.name, pac.data_for(entry))?;
    }

    assert_eq!(writer.serialize()?, data);

    Ok(())
}

#[test]
fn truncated_archives_never_open() -> Result<()> {
    let data = pac_archive::create(sample_entries())?;

    for len in 0..data.len() {
        match PacArchive::open(data[..len].to_vec()) {
            Err(Error::Parse(ParseError::TruncatedIndex { .. }))
            | Err(Error::Parse(ParseError::InvalidEntry { .. })) => {}
            other => panic!("cut at {len} gave {other:?}"),
        }
    }

    Ok(())
}

#[test]
fn failed_entries_do_not_stop_decoding() -> Result<()> {
    let pac = PacArchive::open(pac_archive::create([
        ("broken.bmz", b"ZLC3\x10\x00\x00\x00garbage".to_vec()),
        ("fine.txt", b"fine".to_vec()),
    ])?)?;

    let outcomes = pac
        .decode_all()
        .map(|(entry, result)| (entry.name.to_string(), result.is_ok()))
        .collect::<Vec<_>>();

    assert_eq!(
        outcomes,
        vec![("broken.bmz".to_string(), false), ("fine.txt".to_string(), true)]
    );

    Ok(())
}
