//! The item record model shared by the store, the collage pipeline, and the CLI.
//!
//! An [`Item`] is one discarded-belonging entry: a normalized photo plus short
//! metadata. Callers build an [`ItemDraft`] (everything except the
//! store-assigned fields) and hand it to [`ItemStore::add`], which returns the
//! assigned id. Records are immutable after creation — there is no update
//! operation, only `add` and `delete`.
//!
//! Validation lives here so both the caller boundary and the store can enforce
//! the same rules: the store re-validates every draft before writing, even
//! though the CLI validates first.
//!
//! [`ItemStore::add`]: crate::store::ItemStore::add

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

/// Maximum length of the `reason` field, counted in Unicode code points.
pub const REASON_MAX_CHARS: usize = 50;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("item image payload is empty")]
    EmptyImage,
    #[error("reason is {len} characters, maximum is {max}")]
    ReasonTooLong { max: usize, len: usize },
    #[error("`{0}` is not a valid YYYY-MM-DD date")]
    InvalidDate(String),
    #[error("cannot compose a collage from an empty journal")]
    NoItems,
}

/// Caller-supplied fields of an item, before the store assigns `id` and
/// `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDraft {
    /// Normalized image payload (512×512 JPEG from
    /// [`normalize_image`](crate::imaging::normalize_image)).
    pub image: Vec<u8>,
    /// The day the item was discarded (semantic date, no time component).
    pub date: NaiveDate,
    /// Why it was let go. At most [`REASON_MAX_CHARS`] code points.
    pub reason: String,
    /// How it was disposed of (optional short tag; empty string permitted).
    pub disposal_method: Option<String>,
}

impl ItemDraft {
    /// Check the draft invariants: image present, reason within the limit.
    ///
    /// The reason limit counts code points, not bytes, so multibyte text gets
    /// the same 50 characters as ASCII.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.image.is_empty() {
            return Err(ValidationError::EmptyImage);
        }
        let len = self.reason.chars().count();
        if len > REASON_MAX_CHARS {
            return Err(ValidationError::ReasonTooLong {
                max: REASON_MAX_CHARS,
                len,
            });
        }
        Ok(())
    }
}

/// One stored discarded-item record.
///
/// `id` and `created_at` are assigned by the store at creation and never
/// change; `id` is the sole delete key and is never reused, even after the
/// record it named is deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: i64,
    pub image: Vec<u8>,
    pub date: NaiveDate,
    pub reason: String,
    pub disposal_method: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Parse a `YYYY-MM-DD` form value into a calendar date.
///
/// This is the caller-boundary check for the `date` field; downstream code
/// works with the typed date only.
pub fn parse_item_date(input: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(input.to_string()))
}
