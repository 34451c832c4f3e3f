//! # Castoff
//!
//! A single-user journal of discarded things. Every record pairs a photo of
//! the item with the day it was let go, a short reason, and optionally how it
//! left — and the whole journal can be rendered as one shareable collage.
//!
//! # Architecture: Normalize / Store / Compose
//!
//! Three independent pieces, each usable on its own:
//!
//! ```text
//! 1. Normalize   raw image bytes  →  512×512 JPEG     (deterministic)
//! 2. Store       draft + payload  →  SQLite row       (id assigned, durable)
//! 3. Compose     all items        →  collage PNG      (grid + header band)
//! ```
//!
//! This separation exists for three reasons:
//!
//! - **Determinism**: normalization is a pure function of the source bytes, so
//!   the stored payload never depends on when or where an item was added.
//! - **Durability**: one SQLite file is the whole journal — payloads included —
//!   so a copy of that file is a complete backup.
//! - **Tolerance**: composition reads stored payloads defensively; one damaged
//!   record degrades to a blank cell instead of blocking the export.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`item`] | Item record and draft types, field validation |
//! | [`store`] | SQLite-backed item storage: open, add, delete, list |
//! | [`imaging`] | Cover-fit normalization of arbitrary input images |
//! | [`collage`] | Grid layout, bitmap text, parallel cell decode, PNG render |
//! | [`naming`] | `<prefix>-<N>items-<millis>.png` artifact name convention |
//! | [`config`] | `config.toml` loading, validation, merging |
//! | [`output`] | CLI output formatting — information-first item display |
//!
//! # Design Decisions
//!
//! ## SQLite As The Journal File
//!
//! Records live in a single SQLite database with the image payload inline as a
//! BLOB. At journal scale (hundreds of records, ~50 KB per payload) this is
//! far simpler than a directory of files plus an index, and it inherits
//! transactional writes for free. `AUTOINCREMENT` ids are never reused, so an
//! id in a user's notes stays unambiguous forever.
//!
//! ## Fixed Normalization Contract
//!
//! The stored format — 512×512, JPEG quality 90, Lanczos3 cover-fit — is a
//! constant, not configuration. Everything downstream (cell rendering, payload
//! size expectations, re-exports years later) can rely on it without checking.
//!
//! ## Pure-Rust Imaging
//!
//! The [`imaging`] module uses the `image` crate for decode, resampling, and
//! encode. No system dependencies: no ImageMagick, no version conflicts. The
//! binary is fully self-contained, and the journal stays renderable on any
//! machine the binary runs on.
//!
//! ## Bitmap Header Text
//!
//! Collage headers are drawn with the embedded `font8x8` glyph set instead of
//! a font file and rasterizer stack. The text is a title and a date range —
//! scaled 8×8 glyphs are legible, dependency-light, and render identically
//! everywhere.
//!
//! ## Blank-Cell Tolerance
//!
//! The collage is the product of the whole journal, so composition must not be
//! held hostage by its weakest record. Cell decodes run in parallel and every
//! outcome is collected; failures are logged, left as background, and counted
//! in the result rather than raised.

pub mod collage;
pub mod config;
pub mod imaging;
pub mod item;
pub mod naming;
pub mod output;
pub mod store;

#[cfg(test)]
pub(crate) mod test_helpers;
