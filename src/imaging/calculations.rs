//! Pure calculation functions for cover-fit geometry.
//!
//! All functions here are pure and testable without any I/O or pixels.

/// Resize-and-crop plan produced by [`cover_fit`].
///
/// The source is first scaled to `scaled_width × scaled_height` (both at least
/// the target), then the centered `target × target` window starting at
/// `(crop_x, crop_y)` is cut out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverFit {
    /// Uniform scale factor, `max(target/w, target/h)`.
    pub scale: f64,
    /// Scaled width, rounded, never below the target.
    pub scaled_width: u32,
    /// Scaled height, rounded, never below the target.
    pub scaled_height: u32,
    /// Left edge of the centered crop window within the scaled image.
    pub crop_x: u32,
    /// Top edge of the centered crop window within the scaled image.
    pub crop_y: u32,
}

/// Plan a cover-fit center crop of `source` into a `target × target` square.
///
/// The scale is chosen so the scaled image covers the whole square (no
/// letterboxing); the overflow on the long axis is split evenly between both
/// sides. Upscales small sources as readily as it downscales large ones.
///
/// Source dimensions must be non-zero; callers reject undecodable or
/// zero-sized images before any geometry runs.
///
/// # Examples
/// ```
/// # use castoff::imaging::cover_fit;
/// // 1000×500 into 512: scale = max(0.512, 1.024) = 1.024 → 1024×512,
/// // cropping 256px off each horizontal side.
/// let fit = cover_fit((1000, 500), 512);
/// assert_eq!((fit.scaled_width, fit.scaled_height), (1024, 512));
/// assert_eq!((fit.crop_x, fit.crop_y), (256, 0));
/// ```
pub fn cover_fit(source: (u32, u32), target: u32) -> CoverFit {
    let (src_w, src_h) = source;
    let scale = (target as f64 / src_w as f64).max(target as f64 / src_h as f64);

    // The constrained axis rounds back to exactly `target`; the max() guards
    // against a sub-target result from floating point on the other axis.
    let scaled_width = ((src_w as f64 * scale).round() as u32).max(target);
    let scaled_height = ((src_h as f64 * scale).round() as u32).max(target);

    CoverFit {
        scale,
        scaled_width,
        scaled_height,
        crop_x: (scaled_width - target) / 2,
        crop_y: (scaled_height - target) / 2,
    }
}
