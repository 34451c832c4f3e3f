//! Decode, cover-fit, and re-encode of caller-supplied image bytes.
//!
//! [`normalize_image`] is the write path of the stored-image contract: any
//! decodable raster in, exactly 512×512 JPEG out. The same decode-and-fit
//! step, minus the final encode, is exposed as [`fit_to_square`] so the
//! collage renderer can scale stored payloads into 200px cells with identical
//! geometry.
//!
//! Everything here is pure with respect to the input bytes — the same source
//! always produces the same output, which is what makes stored payloads
//! stable across re-imports.

use super::calculations::cover_fit;
use super::params::NormalizeParams;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, RgbImage};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NormalizeError {
    /// The source bytes are not a decodable image.
    #[error("failed to decode source image: {0}")]
    Decode(#[source] image::ImageError),
    /// The source decoded to an image with a zero dimension, which has no
    /// cover-fit geometry. Decode-class failure, kept separate because no
    /// engine error exists to wrap.
    #[error("source image decoded to {width}x{height}")]
    EmptyDimensions { width: u32, height: u32 },
    /// The normalized result could not be serialized.
    #[error("failed to encode normalized image: {0}")]
    Encode(#[source] image::ImageError),
}

/// Decode `source` and cover-fit it into a `size × size` square.
///
/// Scale factor and crop window come from
/// [`cover_fit`](super::calculations::cover_fit); resampling is Lanczos3.
/// The result is RGB — alpha has no representation in the stored format, so
/// it is dropped here for every caller.
pub fn fit_to_square(source: &[u8], size: u32) -> Result<RgbImage, NormalizeError> {
    let decoded = image::load_from_memory(source).map_err(NormalizeError::Decode)?;
    let (width, height) = (decoded.width(), decoded.height());
    if width == 0 || height == 0 {
        return Err(NormalizeError::EmptyDimensions { width, height });
    }

    let fit = cover_fit((width, height), size);
    let scaled = decoded.resize_exact(fit.scaled_width, fit.scaled_height, FilterType::Lanczos3);
    let cropped: DynamicImage = scaled.crop_imm(fit.crop_x, fit.crop_y, size, size);
    Ok(cropped.to_rgb8())
}

/// Normalize arbitrary image bytes into the stored payload format.
///
/// With [`NormalizeParams::default`] this is the stored-image contract:
/// a 512×512 cover-fit center crop encoded as JPEG at quality 90.
pub fn normalize_image(source: &[u8], params: NormalizeParams) -> Result<Vec<u8>, NormalizeError> {
    let square = fit_to_square(source, params.size)?;

    let mut encoded = Vec::new();
    JpegEncoder::new_with_quality(&mut encoded, params.quality.value())
        .write_image(
            square.as_raw(),
            square.width(),
            square.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(NormalizeError::Encode)?;
    Ok(encoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{synth_jpeg, synth_png};

    fn decoded_dimensions(bytes: &[u8]) -> (u32, u32) {
        let img = image::load_from_memory(bytes).expect("output must decode");
        (img.width(), img.height())
    }

    // =========================================================================
    // Output contract tests
    // =========================================================================

    #[test]
    fn landscape_source_becomes_exact_square() {
        let out = normalize_image(&synth_jpeg(1000, 500), NormalizeParams::default()).unwrap();
        assert_eq!(decoded_dimensions(&out), (512, 512));
    }

    #[test]
    fn portrait_source_becomes_exact_square() {
        let out = normalize_image(&synth_jpeg(300, 900), NormalizeParams::default()).unwrap();
        assert_eq!(decoded_dimensions(&out), (512, 512));
    }

    #[test]
    fn small_source_is_upscaled_to_the_contract_size() {
        let out = normalize_image(&synth_jpeg(40, 30), NormalizeParams::default()).unwrap();
        assert_eq!(decoded_dimensions(&out), (512, 512));
    }

    #[test]
    fn already_square_source_keeps_its_content_size() {
        let out = normalize_image(&synth_jpeg(512, 512), NormalizeParams::default()).unwrap();
        assert_eq!(decoded_dimensions(&out), (512, 512));
    }

    #[test]
    fn output_is_jpeg() {
        let out = normalize_image(&synth_jpeg(640, 480), NormalizeParams::default()).unwrap();
        assert_eq!(
            image::guess_format(&out).unwrap(),
            image::ImageFormat::Jpeg
        );
    }

    #[test]
    fn png_sources_are_accepted() {
        let out = normalize_image(&synth_png(800, 600), NormalizeParams::default()).unwrap();
        assert_eq!(decoded_dimensions(&out), (512, 512));
    }

    #[test]
    fn normalization_is_deterministic() {
        let source = synth_jpeg(777, 333);
        let a = normalize_image(&source, NormalizeParams::default()).unwrap();
        let b = normalize_image(&source, NormalizeParams::default()).unwrap();
        assert_eq!(a, b);
    }

    // =========================================================================
    // fit_to_square tests
    // =========================================================================

    #[test]
    fn fit_to_square_honours_the_requested_size() {
        let square = fit_to_square(&synth_jpeg(1000, 500), 200).unwrap();
        assert_eq!((square.width(), square.height()), (200, 200));
    }

    #[test]
    fn fit_to_square_of_stored_payload_matches_cell_size() {
        // The collage path: a normalized 512px payload scaled into a cell.
        let stored = normalize_image(&synth_jpeg(1200, 900), NormalizeParams::default()).unwrap();
        let cell = fit_to_square(&stored, 200).unwrap();
        assert_eq!((cell.width(), cell.height()), (200, 200));
    }

    // =========================================================================
    // Decode failure tests
    // =========================================================================

    #[test]
    fn garbage_bytes_fail_as_decode() {
        let err = normalize_image(b"definitely not an image", NormalizeParams::default())
            .unwrap_err();
        assert!(matches!(err, NormalizeError::Decode(_)));
    }

    #[test]
    fn empty_input_fails_as_decode() {
        let err = normalize_image(&[], NormalizeParams::default()).unwrap_err();
        assert!(matches!(err, NormalizeError::Decode(_)));
    }

    #[test]
    fn truncated_jpeg_fails_as_decode() {
        let mut bytes = synth_jpeg(400, 300);
        bytes.truncate(bytes.len() / 3);
        let err = normalize_image(&bytes, NormalizeParams::default()).unwrap_err();
        assert!(matches!(err, NormalizeError::Decode(_)));
    }
}
