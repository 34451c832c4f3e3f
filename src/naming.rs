//! Centralized filename handling for the collage artifact convention.
//!
//! Every exported collage is named `<prefix>-<N>items-<millis>.png`: the
//! configured prefix, the number of items composed, and the export timestamp
//! in epoch milliseconds. Formatting and parsing both live here so the two
//! directions can never drift apart.
//!
//! - `castoff-3items-1700000000000.png` → prefix "castoff", 3 items
//! - `my-journal-12items-1700000000000.png` → dashes in the prefix are fine;
//!   the two trailing segments are always count and timestamp.

/// Build the artifact filename for a collage of `items` items exported at
/// `epoch_millis`.
pub fn collage_filename(prefix: &str, items: usize, epoch_millis: i64) -> String {
    format!("{prefix}-{items}items-{epoch_millis}.png")
}

/// Result of parsing an artifact name like `castoff-3items-1700000000000.png`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedArtifact {
    /// Prefix part, dashes preserved.
    pub prefix: String,
    /// Number of items the collage was composed from.
    pub items: usize,
    /// Export timestamp in epoch milliseconds.
    pub epoch_millis: i64,
}

/// Parse an artifact filename back into its parts.
///
/// Returns `None` for anything that does not match the convention exactly:
/// wrong extension, missing `items` marker, non-numeric count or timestamp,
/// or an empty prefix.
pub fn parse_collage_filename(name: &str) -> Option<ParsedArtifact> {
    let stem = name.strip_suffix(".png")?;
    let (rest, millis_text) = stem.rsplit_once('-')?;
    let epoch_millis: i64 = millis_text.parse().ok()?;
    let (prefix, items_text) = rest.rsplit_once('-')?;
    let items: usize = items_text.strip_suffix("items")?.parse().ok()?;
    if prefix.is_empty() {
        return None;
    }
    Some(ParsedArtifact {
        prefix: prefix.to_string(),
        items,
        epoch_millis,
    })
}
