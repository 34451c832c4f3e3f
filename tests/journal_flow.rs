//! End-to-end journal flow over the public API.
//!
//! Walks the whole lifecycle against an on-disk store: open → normalize and
//! add several items → list → delete → compose a collage → check the artifact
//! name convention. Also covers the partial-failure composite, where one
//! record's payload is damaged after storage.

use castoff::collage::{ComposeOptions, compose};
use castoff::config::JournalConfig;
use castoff::imaging::{NormalizeParams, normalize_image};
use castoff::item::{ItemDraft, parse_item_date};
use castoff::naming::{collage_filename, parse_collage_filename};
use castoff::store::ItemStore;
use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgb, RgbImage};
use tempfile::TempDir;

/// JPEG bytes of a solid-color photo, standing in for a camera upload.
fn photo(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb(rgb));
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, 90)
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        .expect("test photo must encode");
    bytes
}

/// Normalize a photo and build a draft, the way the `add` command does.
fn draft(source: &[u8], date: &str, reason: &str, method: Option<&str>) -> ItemDraft {
    ItemDraft {
        image: normalize_image(source, NormalizeParams::default()).expect("normalize"),
        date: parse_item_date(date).expect("date"),
        reason: reason.to_string(),
        disposal_method: method.map(str::to_string),
    }
}

#[test]
fn full_journal_lifecycle() {
    let tmp = TempDir::new().unwrap();
    let db_path = tmp.path().join("journal.db");

    // Record three items, out of date order, with differently shaped photos.
    let store = ItemStore::open(&db_path).unwrap();
    let id_mid = store
        .add(&draft(&photo(1000, 500, [200, 40, 40]), "2024-01-05", "worn out", None))
        .unwrap();
    let id_old = store
        .add(&draft(
            &photo(300, 900, [40, 200, 40]),
            "2024-01-01",
            "outgrown",
            Some("donated"),
        ))
        .unwrap();
    let id_new = store
        .add(&draft(&photo(640, 640, [40, 40, 200]), "2024-01-10", "broken", Some("")))
        .unwrap();

    // Every stored payload honours the 512×512 contract.
    let items = store.list_all().unwrap();
    assert_eq!(items.len(), 3);
    for item in &items {
        let img = image::load_from_memory(&item.image).expect("stored payload decodes");
        assert_eq!((img.width(), img.height()), (512, 512));
    }

    // Reopen from disk: records survive, ids keep increasing.
    drop(store);
    let store = ItemStore::open(&db_path).unwrap();
    assert_eq!(store.count().unwrap(), 3);
    let id_extra = store
        .add(&draft(&photo(64, 64, [0, 0, 0]), "2024-02-01", "dup", None))
        .unwrap();
    assert!(id_extra > id_new && id_extra > id_mid && id_extra > id_old);

    // Idempotent delete.
    store.delete(id_extra).unwrap();
    store.delete(id_extra).unwrap();
    let items = store.list_all().unwrap();
    assert_eq!(items.len(), 3);
    assert!(items.iter().all(|i| i.id != id_extra));

    // Compose and verify chronological cell order via pixel sampling.
    let options = ComposeOptions::from_config(&JournalConfig::default());
    let collage = compose(&items, &options).unwrap();
    assert_eq!(collage.failed_cells, 0);
    // 3 items → 2×2 grid.
    assert_eq!((collage.width, collage.height), (430, 510));

    let img = image::load_from_memory(&collage.png).unwrap().to_rgb8();
    let center = |col: u32, row: u32| {
        // 200px cells, 10px gutters, 80px header.
        *img.get_pixel(10 + col * 210 + 100, 90 + row * 210 + 100)
    };
    let close = |p: Rgb<u8>, e: [u8; 3]| p.0.iter().zip(e).all(|(a, b)| a.abs_diff(b) < 30);
    assert!(close(center(0, 0), [40, 200, 40]), "2024-01-01 first");
    assert!(close(center(1, 0), [200, 40, 40]), "2024-01-05 second");
    assert!(close(center(0, 1), [40, 40, 200]), "2024-01-10 third");

    // Artifact name roundtrips through the convention.
    let name = collage_filename("castoff", items.len(), 1_712_345_678_901);
    let out_path = tmp.path().join(&name);
    std::fs::write(&out_path, &collage.png).unwrap();
    let parsed = parse_collage_filename(&name).unwrap();
    assert_eq!(parsed.prefix, "castoff");
    assert_eq!(parsed.items, 3);
    assert_eq!(parsed.epoch_millis, 1_712_345_678_901);
    assert!(out_path.exists());
}

#[test]
fn collage_survives_a_damaged_record() {
    let store = ItemStore::open_in_memory().unwrap();
    store
        .add(&draft(&photo(400, 400, [200, 40, 40]), "2024-01-01", "fine", None))
        .unwrap();
    // A payload that validates (non-empty) but is not an image. Simulates
    // on-disk corruption of one record.
    store
        .add(&ItemDraft {
            image: b"scrambled bytes, not a jpeg".to_vec(),
            date: parse_item_date("2024-01-02").unwrap(),
            reason: "damaged".to_string(),
            disposal_method: None,
        })
        .unwrap();
    store
        .add(&draft(&photo(400, 400, [40, 40, 200]), "2024-01-03", "fine too", None))
        .unwrap();

    let items = store.list_all().unwrap();
    let collage = compose(&items, &ComposeOptions::from_config(&JournalConfig::default())).unwrap();

    // One blank cell, two drawn, whole export still a valid PNG.
    assert_eq!(collage.failed_cells, 1);
    let img = image::load_from_memory(&collage.png).unwrap().to_rgb8();
    assert_eq!((img.width(), img.height()), (collage.width, collage.height));
}

#[test]
fn empty_journal_cannot_compose() {
    let store = ItemStore::open_in_memory().unwrap();
    let items = store.list_all().unwrap();
    let err = compose(&items, &ComposeOptions::from_config(&JournalConfig::default()));
    assert!(err.is_err(), "zero items must be rejected");
}
