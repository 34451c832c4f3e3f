//! Image normalization — pure Rust, deterministic output.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::load_from_memory` |
//! | **Cover fit** | [`cover_fit`] scale + center-crop math |
//! | **Resample** | Lanczos3 via `resize_exact` |
//! | **Encode** | `JpegEncoder` at configurable quality |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for cover-fit geometry (unit testable)
//! - **Parameters**: Data structures describing the stored-image contract
//! - **Normalize**: Decode → fit → encode pipeline over byte slices

mod calculations;
mod normalize;
mod params;

pub use calculations::{CoverFit, cover_fit};
pub use normalize::{NormalizeError, fit_to_square, normalize_image};
pub use params::{NormalizeParams, Quality};
