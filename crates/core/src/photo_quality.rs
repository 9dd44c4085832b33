//! Heuristic quality scoring for avatar training photos.
//!
//! Scores are computed once at ingestion from raw pixel data and are
//! purely advisory (the capture UI colors a badge with them). Scoring
//! must never block the capture flow: undecodable input gets a neutral
//! fallback score instead of an error.
//!
//! The angle axis is a deterministic placeholder, not a pose estimator.

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Fallback applied to every axis when the image cannot be decoded.
pub const NEUTRAL_SCORE: f64 = 0.7;

/// Placeholder angle score. Real pose estimation is out of scope; a fixed
/// value keeps the overall score deterministic for identical input.
pub const ANGLE_PLACEHOLDER: f64 = 0.75;

/// Luma value that earns a perfect lighting score (out of 255).
const IDEAL_BRIGHTNESS: f64 = 140.0;

/// Luma standard deviation that earns a perfect clarity score.
const CLARITY_FULL_SCALE: f64 = 50.0;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Per-photo quality score, each axis in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PhotoQuality {
    pub lighting: f64,
    pub clarity: f64,
    pub angle: f64,
    pub overall: f64,
}

impl PhotoQuality {
    /// The neutral fallback score.
    pub fn neutral() -> Self {
        Self {
            lighting: NEUTRAL_SCORE,
            clarity: NEUTRAL_SCORE,
            angle: NEUTRAL_SCORE,
            overall: NEUTRAL_SCORE,
        }
    }
}

/// Axis weights for the overall score. Weights should sum to 1.
#[derive(Debug, Clone, Copy)]
pub struct QualityWeights {
    pub lighting: f64,
    pub clarity: f64,
    pub angle: f64,
}

impl Default for QualityWeights {
    fn default() -> Self {
        Self {
            lighting: 0.3,
            clarity: 0.3,
            angle: 0.4,
        }
    }
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Score an encoded image (PNG/JPEG/WebP).
///
/// Decoding failures return [`PhotoQuality::neutral`] rather than an
/// error.
pub fn score_image(bytes: &[u8], weights: &QualityWeights) -> PhotoQuality {
    match image::load_from_memory(bytes) {
        Ok(img) => {
            let (mean, stddev) = luma_stats(&img.to_rgb8());
            score_from_stats(mean, stddev, weights)
        }
        Err(_) => PhotoQuality::neutral(),
    }
}

/// Mean and standard deviation of per-pixel luma over an RGB buffer.
///
/// Luma uses the BT.601 weighting (0.299 R + 0.587 G + 0.114 B).
pub fn luma_stats(img: &image::RgbImage) -> (f64, f64) {
    let count = (img.width() as u64 * img.height() as u64) as f64;
    if count == 0.0 {
        return (0.0, 0.0);
    }

    let mut sum = 0.0;
    let mut sum_sq = 0.0;
    for pixel in img.pixels() {
        let [r, g, b] = pixel.0;
        let luma = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
        sum += luma;
        sum_sq += luma * luma;
    }

    let mean = sum / count;
    let variance = (sum_sq / count - mean * mean).max(0.0);
    (mean, variance.sqrt())
}

/// Score from precomputed luma statistics.
///
/// `lighting` peaks at a mean luma of 140/255 and falls off linearly;
/// `clarity` treats luma spread as a texture/contrast proxy, saturating
/// at a standard deviation of 50.
pub fn score_from_stats(mean_luma: f64, stddev_luma: f64, weights: &QualityWeights) -> PhotoQuality {
    let lighting = (1.0 - (mean_luma - IDEAL_BRIGHTNESS).abs() / IDEAL_BRIGHTNESS).clamp(0.0, 1.0);
    let clarity = (stddev_luma / CLARITY_FULL_SCALE).clamp(0.0, 1.0);
    let angle = ANGLE_PLACEHOLDER;
    let overall =
        (weights.lighting * lighting + weights.clarity * clarity + weights.angle * angle)
            .clamp(0.0, 1.0);

    PhotoQuality {
        lighting,
        clarity,
        angle,
        overall,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn encode_png(img: RgbImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn uniform(width: u32, height: u32, value: u8) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb([value, value, value]))
    }

    // -- luma_stats -----------------------------------------------------------

    #[test]
    fn uniform_image_has_zero_stddev() {
        let (mean, stddev) = luma_stats(&uniform(8, 8, 140));
        assert!((mean - 140.0).abs() < 1e-6);
        assert!(stddev.abs() < 1e-6);
    }

    #[test]
    fn checkerboard_has_high_stddev() {
        let img = RgbImage::from_fn(8, 8, |x, y| {
            if (x + y) % 2 == 0 {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        });
        let (mean, stddev) = luma_stats(&img);
        assert!((mean - 127.5).abs() < 1.0);
        assert!(stddev > 100.0);
    }

    // -- score_from_stats -----------------------------------------------------

    #[test]
    fn ideal_brightness_scores_full_lighting() {
        let quality = score_from_stats(140.0, 0.0, &QualityWeights::default());
        assert!((quality.lighting - 1.0).abs() < 1e-9);
    }

    #[test]
    fn black_image_scores_zero_lighting() {
        let quality = score_from_stats(0.0, 0.0, &QualityWeights::default());
        assert_eq!(quality.lighting, 0.0);
    }

    #[test]
    fn blown_out_image_scores_low_lighting() {
        let quality = score_from_stats(255.0, 0.0, &QualityWeights::default());
        assert!(quality.lighting < 0.2);
    }

    #[test]
    fn clarity_saturates_at_full_scale() {
        let quality = score_from_stats(140.0, 120.0, &QualityWeights::default());
        assert_eq!(quality.clarity, 1.0);
    }

    #[test]
    fn angle_is_deterministic_placeholder() {
        let a = score_from_stats(100.0, 20.0, &QualityWeights::default());
        let b = score_from_stats(200.0, 40.0, &QualityWeights::default());
        assert_eq!(a.angle, ANGLE_PLACEHOLDER);
        assert_eq!(b.angle, ANGLE_PLACEHOLDER);
    }

    #[test]
    fn overall_is_weighted_sum() {
        let weights = QualityWeights::default();
        let quality = score_from_stats(140.0, 50.0, &weights);
        let expected = 0.3 * 1.0 + 0.3 * 1.0 + 0.4 * ANGLE_PLACEHOLDER;
        assert!((quality.overall - expected).abs() < 1e-9);
    }

    // -- score_image ----------------------------------------------------------

    #[test]
    fn identical_pixels_score_identically() {
        let bytes = encode_png(uniform(16, 16, 140));
        let a = score_image(&bytes, &QualityWeights::default());
        let b = score_image(&bytes, &QualityWeights::default());
        assert_eq!(a, b);
    }

    #[test]
    fn well_lit_textured_image_beats_dark_flat_one() {
        let textured = RgbImage::from_fn(16, 16, |x, _| {
            let v = 90 + (x * 10) as u8;
            Rgb([v, v, v])
        });
        let good = score_image(&encode_png(textured), &QualityWeights::default());
        let bad = score_image(&encode_png(uniform(16, 16, 10)), &QualityWeights::default());
        assert!(good.overall > bad.overall);
    }

    #[test]
    fn undecodable_input_gets_neutral_fallback() {
        let quality = score_image(b"definitely not an image", &QualityWeights::default());
        assert_eq!(quality, PhotoQuality::neutral());
        assert_eq!(quality.overall, NEUTRAL_SCORE);
    }

    #[test]
    fn empty_input_gets_neutral_fallback() {
        assert_eq!(
            score_image(&[], &QualityWeights::default()),
            PhotoQuality::neutral()
        );
    }
}
