//! Parameter types for image normalization.
//!
//! These structs describe *what* to produce, not *how* to produce it; the
//! pixel work lives in [`normalize`](super::normalize). The stored-image
//! contract (512×512, JPEG quality 90) is the [`NormalizeParams::default`],
//! and every journal writes with it — the types exist so the contract has one
//! authoritative definition instead of numbers scattered through the
//! pipeline.

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u8);

impl Quality {
    pub fn new(value: u8) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(90)
    }
}

/// Full specification for one normalization: square edge length plus JPEG
/// quality.
///
/// The default is the stored-image contract. Other sizes exist only so the
/// collage cell renderer can reuse the same cover-fit pipeline at 200px.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeParams {
    /// Edge length of the square output, in pixels.
    pub size: u32,
    pub quality: Quality,
}

impl Default for NormalizeParams {
    fn default() -> Self {
        Self {
            size: 512,
            quality: Quality::default(),
        }
    }
}
