//! Collage composition — all stored items rendered as one shareable image.
//!
//! The module is split into:
//! - **Layout**: Pure grid/canvas geometry (unit testable)
//! - **Text**: `font8x8` bitmap text and rectangle primitives
//! - **Render**: [`compose`] — sort, decode cells in parallel, paint, encode

pub mod layout;
mod render;
mod text;

pub use layout::{Grid, HEADER_HEIGHT, PAD, THUMB, grid_for};
pub use render::{Collage, CollageError, ComposeOptions, compose};
