//! CLI output formatting for all journal commands.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not storage-centric**. The primary display
//! for every item is its semantic identity — id, date, reason — with storage
//! details (payload size, disposal method) shown as secondary context via
//! indented lines.
//!
//! # Output Format
//!
//! ## List
//!
//! ```text
//! Items (2)
//! 001 2024-01-05 worn beyond repair
//!     Disposal: donated
//!     Stored: 48213 bytes
//! 002 2024-02-11 outgrown
//!     Stored: 51477 bytes
//! ```
//!
//! ## Add / Remove / Collage
//!
//! ```text
//! Added item 003 (2024-03-01)
//!     Stored: 49152 bytes, 512x512 JPEG
//!
//! Removed item 003
//!
//! Collage → ./castoff-3items-1700000000000.png
//!     Size: 430x510
//!     Cells: 3
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure — no I/O, no side effects. `--json` output goes through
//! [`format_list_json`], which serializes item metadata plus the payload byte
//! length, never the raw image bytes.

use crate::collage::Collage;
use crate::item::Item;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format an item id as 3-digit zero-padded (wider ids print in full).
fn format_id(id: i64) -> String {
    format!("{:0>3}", id)
}

/// Header line for one item: id + date + reason.
fn item_header(item: &Item) -> String {
    format!("{} {} {}", format_id(item.id), item.date, item.reason)
}

/// Items sorted the way every listing presents them: by date, then id.
fn chronological(items: &[Item]) -> Vec<&Item> {
    let mut order: Vec<&Item> = items.iter().collect();
    order.sort_by_key(|item| (item.date, item.id));
    order
}

// ============================================================================
// Add
// ============================================================================

/// Format the result of storing a new item.
pub fn format_add(id: i64, date: NaiveDate, stored_bytes: usize) -> Vec<String> {
    vec![
        format!("Added item {} ({})", format_id(id), date),
        format!("    Stored: {} bytes, 512x512 JPEG", stored_bytes),
    ]
}

/// Print add output to stdout.
pub fn print_add(id: i64, date: NaiveDate, stored_bytes: usize) {
    for line in format_add(id, date, stored_bytes) {
        println!("{}", line);
    }
}

// ============================================================================
// Remove
// ============================================================================

/// Format the result of removing an item. Removal is idempotent, so the
/// message is the same whether or not the id existed.
pub fn format_remove(id: i64) -> Vec<String> {
    vec![format!("Removed item {}", format_id(id))]
}

/// Print remove output to stdout.
pub fn print_remove(id: i64) {
    for line in format_remove(id) {
        println!("{}", line);
    }
}

// ============================================================================
// List
// ============================================================================

/// Format the journal listing, oldest first.
///
/// Information-first: each item leads with id, date and reason; disposal
/// method and payload size are indented context lines.
pub fn format_list(items: &[Item]) -> Vec<String> {
    if items.is_empty() {
        return vec!["No items recorded.".to_string()];
    }

    let mut lines = vec![format!("Items ({})", items.len())];
    for item in chronological(items) {
        lines.push(item_header(item));
        if let Some(ref method) = item.disposal_method {
            if !method.is_empty() {
                lines.push(format!("    Disposal: {}", method));
            }
        }
        lines.push(format!("    Stored: {} bytes", item.image.len()));
    }
    lines
}

/// Print the listing to stdout.
pub fn print_list(items: &[Item]) {
    for line in format_list(items) {
        println!("{}", line);
    }
}

/// One item's metadata as exposed by `list --json`.
///
/// Carries the payload byte length instead of the payload itself; raw image
/// bytes never reach the terminal.
#[derive(Debug, Serialize)]
pub struct ItemSummary {
    pub id: i64,
    pub date: NaiveDate,
    pub reason: String,
    pub disposal_method: Option<String>,
    pub created_at: DateTime<Utc>,
    pub image_bytes: usize,
}

impl From<&Item> for ItemSummary {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id,
            date: item.date,
            reason: item.reason.clone(),
            disposal_method: item.disposal_method.clone(),
            created_at: item.created_at,
            image_bytes: item.image.len(),
        }
    }
}

/// Serialize the listing as a JSON array of [`ItemSummary`], oldest first.
pub fn format_list_json(items: &[Item]) -> serde_json::Result<String> {
    let summaries: Vec<ItemSummary> = chronological(items)
        .into_iter()
        .map(ItemSummary::from)
        .collect();
    serde_json::to_string_pretty(&summaries)
}

// ============================================================================
// Collage
// ============================================================================

/// Format the result of a collage export.
pub fn format_collage(path: &Path, items: usize, collage: &Collage) -> Vec<String> {
    let mut lines = vec![
        format!("Collage \u{2192} {}", path.display()),
        format!("    Size: {}x{}", collage.width, collage.height),
        format!("    Cells: {}", items),
    ];
    if collage.failed_cells > 0 {
        lines.push(format!(
            "    {} cell(s) left blank: payload unreadable",
            collage.failed_cells
        ));
    }
    lines
}

/// Print collage output to stdout.
pub fn print_collage(path: &Path, items: usize, collage: &Collage) {
    for line in format_collage(path, items, collage) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
