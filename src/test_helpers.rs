//! Shared test utilities for the castoff test suite.
//!
//! Provides calendar/date shorthand, draft and item builders, synthetic image
//! payloads, and lookup helpers that work with store-phase data structures
//! (`ItemDraft`, `Item`).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let store = ItemStore::open_in_memory().unwrap();
//! let id = store.add(&draft("2024-01-05", "worn out")).unwrap();
//!
//! let items = store.list_all().unwrap();
//! let item = find_item(&items, id);
//! assert_eq!(item.date, date("2024-01-05"));
//! ```

use crate::item::{Item, ItemDraft};
use chrono::{NaiveDate, Utc};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

// =========================================================================
// Calendar shorthand
// =========================================================================

/// Parse a `YYYY-MM-DD` literal. Panics on typos so tests fail loudly.
pub fn date(text: &str) -> NaiveDate {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .unwrap_or_else(|_| panic!("test date {text:?} must be YYYY-MM-DD"))
}

// =========================================================================
// Builders
// =========================================================================

/// A valid draft with a small synthetic JPEG payload.
pub fn draft(date_str: &str, reason: &str) -> ItemDraft {
    ItemDraft {
        image: synth_jpeg(64, 64),
        date: date(date_str),
        reason: reason.to_string(),
        disposal_method: None,
    }
}

/// A fully-populated stored item, bypassing the store. For exercising
/// consumers of [`Item`] (collage, output) without a database.
pub fn stored_item(id: i64, date_str: &str, image: Vec<u8>) -> Item {
    Item {
        id,
        image,
        date: date(date_str),
        reason: format!("item {id}"),
        disposal_method: None,
        created_at: Utc::now(),
    }
}

// =========================================================================
// Synthetic image payloads
// =========================================================================

/// JPEG bytes of a gradient test pattern.
pub fn synth_jpeg(width: u32, height: u32) -> Vec<u8> {
    encode_jpeg(&gradient(width, height))
}

/// JPEG bytes of a single solid color, for pixel-sampling assertions.
pub fn solid_jpeg(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    encode_jpeg(&RgbImage::from_pixel(width, height, Rgb(rgb)))
}

/// PNG bytes of the same gradient pattern.
pub fn synth_png(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(gradient(width, height))
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("synthetic PNG must encode");
    bytes
}

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    })
}

fn encode_jpeg(img: &RgbImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, 90)
        .write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            ExtendedColorType::Rgb8,
        )
        .expect("synthetic JPEG must encode");
    bytes
}

// =========================================================================
// Lookups — panic with a clear message on miss
// =========================================================================

/// Find an item by id. Panics if not found.
pub fn find_item(items: &[Item], id: i64) -> &Item {
    items.iter().find(|i| i.id == id).unwrap_or_else(|| {
        let ids: Vec<i64> = items.iter().map(|i| i.id).collect();
        panic!("item {id} not found. Available: {ids:?}")
    })
}
