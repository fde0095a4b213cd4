//! High-level image operations.
//!
//! These functions combine the pure calculations with backend execution:
//! the size-constrained quality search, the area-bounded resize, and the
//! orientation normalization. None of them mutate their input image.

use super::backend::{BackendError, ImageBackend, OrientationTag};
use super::calculations::{Rotation, area_bounded_dimensions, rotation_for};
use super::params::Quality;
use crate::config::SizeConstraint;
use image::DynamicImage;
use image::imageops::FilterType;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// The accepted attempt of a size-constrained encode.
#[derive(Debug, Clone)]
pub struct EncodeOutcome {
    /// Encoded WebP bytes of the accepted attempt.
    pub bytes: Vec<u8>,
    /// Quality the accepted attempt was encoded at.
    pub quality: Quality,
    /// Size of `bytes`.
    pub size_bytes: u64,
    /// Whether the size ceiling was met. When `false` the bytes are the
    /// best effort from the lowest quality the search reached — callers
    /// still get a usable encoding, just an oversized one.
    pub satisfied: bool,
}

impl EncodeOutcome {
    /// Achieved size in kilobytes.
    pub fn size_kb(&self) -> f64 {
        self.size_bytes as f64 / 1024.0
    }
}

/// Encode `image` as lossy WebP within a byte-size ceiling.
///
/// Walks a descending quality ladder from `start_quality`: encode, measure,
/// accept the first attempt that fits. Linear (or geometric) search rather
/// than binary search — a few extra encode passes buy the guarantee that the
/// first passing attempt is also the highest-quality one, which is the
/// tie-break we want.
///
/// When the ladder is exhausted (the next rung would fall below
/// `min_quality`) the last attempt is returned with `satisfied = false`.
pub fn encode_to_size(
    backend: &impl ImageBackend,
    image: &DynamicImage,
    constraint: &SizeConstraint,
) -> Result<EncodeOutcome> {
    let ceiling = constraint.max_size_bytes();
    let mut quality = constraint.start_quality;

    loop {
        let attempt_quality = Quality::new(quality);
        let bytes = backend.encode_webp(image, attempt_quality)?;
        let size_bytes = bytes.len() as u64;

        if size_bytes <= ceiling {
            return Ok(EncodeOutcome {
                bytes,
                quality: attempt_quality,
                size_bytes,
                satisfied: true,
            });
        }

        let next = constraint.decay.next(quality);
        if next < constraint.min_quality {
            return Ok(EncodeOutcome {
                bytes,
                quality: attempt_quality,
                size_bytes,
                satisfied: false,
            });
        }
        quality = next;
    }
}

/// Downscale `image` so its pixel area fits `target_area`.
///
/// Images already within budget are returned as-is (never upscaled).
/// Lanczos3 resampling: the resize happens once per image, so output
/// quality wins over resize speed.
pub fn resize_to_area(image: &DynamicImage, target_area: u64) -> DynamicImage {
    match area_bounded_dimensions((image.width(), image.height()), target_area) {
        Some((w, h)) => image.resize_exact(w, h, FilterType::Lanczos3),
        None => image.clone(),
    }
}

/// Rotate `image` upright based on its EXIF orientation, falling back to the
/// landscape heuristic when no tag is present.
///
/// Returns the (possibly rotated) image and the rotation that was applied,
/// if any. The rotation decision itself lives in
/// [`rotation_for`](super::calculations::rotation_for).
pub fn normalize_orientation(
    image: &DynamicImage,
    tag: Option<OrientationTag>,
) -> (DynamicImage, Option<Rotation>) {
    match rotation_for(tag, (image.width(), image.height())) {
        Some(rotation) => (apply_rotation(image, rotation), Some(rotation)),
        None => (image.clone(), None),
    }
}

/// Apply a counter-clockwise rotation with canvas expansion.
///
/// The `image` crate names its rotations clockwise, hence the swap.
fn apply_rotation(image: &DynamicImage, rotation: Rotation) -> DynamicImage {
    match rotation {
        Rotation::Ccw90 => image.rotate270(),
        Rotation::Ccw180 => image.rotate180(),
        Rotation::Ccw270 => image.rotate90(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QualityDecay;
    use crate::imaging::backend::tests::MockBackend;
    use image::RgbImage;

    fn test_image(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, image::Rgb([120, 90, 60])))
    }

    // =========================================================================
    // encode_to_size
    // =========================================================================

    #[test]
    fn first_attempt_within_ceiling_succeeds_immediately() {
        let backend = MockBackend::with_curve(|_| 10 * 1024);
        let outcome =
            encode_to_size(&backend, &test_image(4, 4), &SizeConstraint::default()).unwrap();

        assert!(outcome.satisfied);
        assert_eq!(outcome.quality.value(), 85.0);
        assert_eq!(outcome.size_bytes, 10 * 1024);
        assert_eq!(backend.encode_qualities(), vec![85.0]);
    }

    #[test]
    fn ladder_descends_until_first_passing_quality() {
        // 200 KB at q > 40, 100 KB at q <= 40; ceiling 150 KB.
        let backend = MockBackend::with_curve(|q| {
            if q > 40.0 { 200 * 1024 } else { 100 * 1024 }
        });
        let outcome =
            encode_to_size(&backend, &test_image(4, 4), &SizeConstraint::default()).unwrap();

        assert!(outcome.satisfied);
        assert_eq!(outcome.quality.value(), 40.0);
        assert_eq!(
            backend.encode_qualities(),
            vec![85.0, 80.0, 75.0, 70.0, 65.0, 60.0, 55.0, 50.0, 45.0, 40.0]
        );
    }

    #[test]
    fn exhausted_ladder_returns_floor_attempt_unsatisfied() {
        let backend = MockBackend::with_curve(|_| 200 * 1024);
        let outcome =
            encode_to_size(&backend, &test_image(4, 4), &SizeConstraint::default()).unwrap();

        assert!(!outcome.satisfied);
        // Last attempt is the quality floor itself: 85, 80, ..., 20.
        assert_eq!(outcome.quality.value(), 20.0);
        assert_eq!(outcome.size_bytes, 200 * 1024);
        assert_eq!(outcome.bytes.len(), 200 * 1024);

        let qualities = backend.encode_qualities();
        assert_eq!(qualities.len(), 14);
        assert_eq!(*qualities.last().unwrap(), 20.0);
    }

    #[test]
    fn quality_stays_within_bounds() {
        let backend = MockBackend::with_curve(|_| 200 * 1024);
        let constraint = SizeConstraint {
            start_quality: 75.0,
            decay: QualityDecay::Factor(0.9),
            ..SizeConstraint::default()
        };
        let outcome = encode_to_size(&backend, &test_image(4, 4), &constraint).unwrap();

        for q in backend.encode_qualities() {
            assert!(
                (constraint.min_quality..=constraint.start_quality).contains(&q),
                "quality {q} out of bounds"
            );
        }
        assert!(!outcome.satisfied);
        // 75 * 0.9^12 ≈ 21.2 is the last rung at or above the floor.
        assert!((outcome.quality.value() - 21.2).abs() < 0.1);
    }

    #[test]
    fn geometric_decay_produces_fractional_qualities() {
        let backend = MockBackend::with_curve(|q| if q > 70.0 { 200 * 1024 } else { 1 });
        let constraint = SizeConstraint {
            start_quality: 80.0,
            decay: QualityDecay::Factor(0.9),
            ..SizeConstraint::default()
        };
        let outcome = encode_to_size(&backend, &test_image(4, 4), &constraint).unwrap();

        assert!(outcome.satisfied);
        let qualities = backend.encode_qualities();
        assert_eq!(qualities.len(), 3);
        for (q, expected) in qualities.iter().zip([80.0, 72.0, 64.8]) {
            assert!((q - expected).abs() < 1e-3, "{q} vs {expected}");
        }
    }

    #[test]
    fn size_kb_reports_fractional_kilobytes() {
        let backend = MockBackend::with_curve(|_| 1536);
        let outcome =
            encode_to_size(&backend, &test_image(4, 4), &SizeConstraint::default()).unwrap();
        assert_eq!(outcome.size_kb(), 1.5);
    }

    // =========================================================================
    // resize_to_area
    // =========================================================================

    #[test]
    fn resize_within_budget_keeps_dimensions() {
        let img = test_image(30, 20);
        let out = resize_to_area(&img, 600);
        assert_eq!((out.width(), out.height()), (30, 20));
    }

    #[test]
    fn resize_over_budget_scales_down() {
        // 400x300 into 1,200 px: scale = 0.1 → 40x30
        let img = test_image(400, 300);
        let out = resize_to_area(&img, 1_200);
        assert_eq!((out.width(), out.height()), (40, 30));
    }

    #[test]
    fn resize_never_upscales() {
        let img = test_image(10, 10);
        let out = resize_to_area(&img, 1_000_000);
        assert_eq!((out.width(), out.height()), (10, 10));
    }

    // =========================================================================
    // normalize_orientation
    // =========================================================================

    #[test]
    fn exif_quarter_turn_swaps_dimensions() {
        let img = test_image(30, 20);
        let (out, rotation) = normalize_orientation(&img, Some(OrientationTag::Rotate90Cw));
        assert_eq!(rotation, Some(Rotation::Ccw270));
        assert_eq!((out.width(), out.height()), (20, 30));
    }

    #[test]
    fn exif_half_turn_keeps_dimensions() {
        let img = test_image(30, 20);
        let (out, rotation) = normalize_orientation(&img, Some(OrientationTag::Rotate180));
        assert_eq!(rotation, Some(Rotation::Ccw180));
        assert_eq!((out.width(), out.height()), (30, 20));
    }

    #[test]
    fn exif_normal_suppresses_landscape_heuristic() {
        let img = test_image(30, 20);
        let (out, rotation) = normalize_orientation(&img, Some(OrientationTag::Normal));
        assert_eq!(rotation, None);
        assert_eq!((out.width(), out.height()), (30, 20));
    }

    #[test]
    fn untagged_landscape_rotates_ccw() {
        // A 2x1 strip [A B] rotated 90° CCW puts B on top.
        let mut strip = RgbImage::new(2, 1);
        strip.put_pixel(0, 0, image::Rgb([1, 1, 1])); // A
        strip.put_pixel(1, 0, image::Rgb([2, 2, 2])); // B
        let img = DynamicImage::ImageRgb8(strip);

        let (out, rotation) = normalize_orientation(&img, None);
        assert_eq!(rotation, Some(Rotation::Ccw90));
        assert_eq!((out.width(), out.height()), (1, 2));
        let rgb = out.to_rgb8();
        assert_eq!(rgb.get_pixel(0, 0).0, [2, 2, 2]);
        assert_eq!(rgb.get_pixel(0, 1).0, [1, 1, 1]);
    }

    #[test]
    fn untagged_portrait_is_untouched() {
        let img = test_image(20, 30);
        let (out, rotation) = normalize_orientation(&img, None);
        assert_eq!(rotation, None);
        assert_eq!((out.width(), out.height()), (20, 30));
    }
}
