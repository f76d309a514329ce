use divan::AllocProfiler;

#[global_allocator]
static ALLOC: AllocProfiler = AllocProfiler::system();

fn main() {
    divan::main();
}

fn get_input() -> Vec<u8> {
    let image = pac_bmz::BitmapImage::new(
        256,
        256,
        pac_bmz::PixelFormat::Bgr24,
        Vec::new(),
        (0..256 * 256 * 3).map(|i| (i % 251) as u8).collect(),
    )
    .unwrap();

    let mut writer = pac_archive::PacWriter::default();
    writer.add("image.bmz", image).unwrap();
    for i in 0..64 {
        writer
            .add_raw(&format!("file_{i:02}.bin"), vec![i as u8; 4096])
            .unwrap();
    }
    writer.serialize().unwrap()
}

pub mod read {
    use divan::Bencher;
    use pac_archive::PacArchive;

    #[divan::bench]
    fn open(bencher: Bencher) {
        bencher.with_inputs(super::get_input).bench_values(|data| {
            divan::black_box(PacArchive::open(data).unwrap());
        });
    }

    #[divan::bench]
    fn extract_raw(bencher: Bencher) {
        let pac = PacArchive::open(super::get_input()).unwrap();
        bencher.bench_local(|| {
            divan::black_box(pac.extract("file_63.bin").unwrap());
        });
    }

    #[divan::bench(sample_count = 10)]
    fn extract_decoded_bitmap(bencher: Bencher) {
        let pac = PacArchive::open(super::get_input()).unwrap();
        bencher.bench_local(|| {
            divan::black_box(pac.extract_decoded("image.bmz").unwrap());
        });
    }
}

pub mod write {
    use divan::Bencher;
    use pac_archive::PacArchive;

    #[divan::bench(sample_count = 10)]
    fn serialize(bencher: Bencher) {
        let pac = PacArchive::open(super::get_input()).unwrap();
        bencher.bench_local(|| {
            let mut writer = pac_archive::PacWriter::default();
            for entry in pac.entries() {
                writer.add_raw(&entry.name, pac.data_for(entry)).unwrap();
            }
            divan::black_box(writer.serialize().unwrap());
        });
    }
}
