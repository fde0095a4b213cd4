//! Pure calculation functions for resizing and orientation decisions.
//!
//! All functions here are pure and testable without any I/O or images.

use super::backend::OrientationTag;

/// Calculate dimensions that fit a pixel-area budget, preserving aspect ratio.
///
/// Returns `None` when the image already fits (`w*h <= target_area`) — the
/// caller should leave it untouched; this never upscales. Otherwise both edges
/// are scaled by `sqrt(target_area / area)`, rounded, and floored to 1 so
/// extreme aspect ratios cannot collapse an edge to zero.
///
/// # Examples
/// ```
/// # use picpress::imaging::area_bounded_dimensions;
/// // 4000x3000 into a 90,000 px budget → ~346x260
/// assert_eq!(area_bounded_dimensions((4000, 3000), 90_000), Some((346, 260)));
///
/// // Already within budget → no resize
/// assert_eq!(area_bounded_dimensions((300, 200), 90_000), None);
/// ```
pub fn area_bounded_dimensions(source: (u32, u32), target_area: u64) -> Option<(u32, u32)> {
    let (w, h) = source;
    let area = w as u64 * h as u64;
    if area <= target_area {
        return None;
    }

    let scale = (target_area as f64 / area as f64).sqrt();
    let new_w = ((w as f64 * scale).round() as u32).max(1);
    let new_h = ((h as f64 * scale).round() as u32).max(1);
    Some((new_w, new_h))
}

/// A corrective rotation, expressed in degrees counter-clockwise.
///
/// All rotations expand the canvas (width and height swap for the quarter
/// turns) — nothing is ever cropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Ccw90,
    Ccw180,
    Ccw270,
}

impl Rotation {
    /// Rotation amount in degrees counter-clockwise.
    pub fn degrees_ccw(self) -> u32 {
        match self {
            Rotation::Ccw90 => 90,
            Rotation::Ccw180 => 180,
            Rotation::Ccw270 => 270,
        }
    }
}

/// Decide the corrective rotation for an image.
///
/// Three branches, evaluated in order:
///
/// 1. A known EXIF tag wins: 3 → 180°, 6 → 270°, 8 → 90°.
/// 2. No tag: landscape images (`w > h`) are rotated 90°. This assumes
///    un-tagged source photos are meant to be portrait — a property of the
///    gallery's content, not a general rule.
/// 3. Otherwise no rotation.
///
/// The mirrored orientations (2, 4, 5, 7) and normal (1) are treated as
/// "no correction needed"; mirror flips are deliberately not handled.
pub fn rotation_for(tag: Option<OrientationTag>, dimensions: (u32, u32)) -> Option<Rotation> {
    match tag {
        Some(tag) => match tag {
            OrientationTag::Rotate180 => Some(Rotation::Ccw180),
            OrientationTag::Rotate90Cw => Some(Rotation::Ccw270),
            OrientationTag::Rotate270Cw => Some(Rotation::Ccw90),
            _ => None,
        },
        None => {
            let (w, h) = dimensions;
            (w > h).then_some(Rotation::Ccw90)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // area_bounded_dimensions tests
    // =========================================================================

    #[test]
    fn area_within_budget_is_noop() {
        assert_eq!(area_bounded_dimensions((300, 300), 90_000), None);
        assert_eq!(area_bounded_dimensions((1, 1), 90_000), None);
    }

    #[test]
    fn area_exactly_at_budget_is_noop() {
        // 300*300 = 90,000 exactly
        assert_eq!(area_bounded_dimensions((300, 300), 90_000), None);
    }

    #[test]
    fn area_over_budget_scales_down() {
        // 4000x3000 = 12 MP into 90,000: scale = sqrt(0.0075) ≈ 0.0866
        assert_eq!(area_bounded_dimensions((4000, 3000), 90_000), Some((346, 260)));
    }

    #[test]
    fn resized_area_fits_budget() {
        for (w, h) in [(4000u32, 3000u32), (5000, 1000), (1920, 1080), (601, 600)] {
            let (nw, nh) = area_bounded_dimensions((w, h), 90_000).unwrap();
            assert!(nw as u64 * nh as u64 <= 90_000, "{w}x{h} -> {nw}x{nh}");
        }
    }

    #[test]
    fn aspect_ratio_preserved_within_rounding() {
        let (nw, nh) = area_bounded_dimensions((4000, 3000), 1_500_000).unwrap();
        let original = 4000.0 / 3000.0;
        let resized = nw as f64 / nh as f64;
        assert!((original - resized).abs() < 0.01, "{nw}x{nh}");
    }

    #[test]
    fn extreme_aspect_never_collapses_to_zero() {
        // A 1px-tall strip: the short edge must floor at 1.
        let (nw, nh) = area_bounded_dimensions((100_000, 1), 100).unwrap();
        assert!(nw >= 1 && nh >= 1);
        assert_eq!(nh, 1);
    }

    // =========================================================================
    // rotation_for tests
    // =========================================================================

    #[test]
    fn exif_3_rotates_180() {
        let r = rotation_for(Some(OrientationTag::Rotate180), (100, 200));
        assert_eq!(r, Some(Rotation::Ccw180));
    }

    #[test]
    fn exif_6_rotates_270() {
        let r = rotation_for(Some(OrientationTag::Rotate90Cw), (100, 200));
        assert_eq!(r, Some(Rotation::Ccw270));
    }

    #[test]
    fn exif_8_rotates_90() {
        let r = rotation_for(Some(OrientationTag::Rotate270Cw), (100, 200));
        assert_eq!(r, Some(Rotation::Ccw90));
    }

    #[test]
    fn exif_normal_and_mirrored_are_untouched() {
        for tag in [
            OrientationTag::Normal,
            OrientationTag::MirrorHorizontal,
            OrientationTag::MirrorVertical,
            OrientationTag::MirrorHorizontalRotate270Cw,
            OrientationTag::MirrorHorizontalRotate90Cw,
        ] {
            // Landscape dimensions: EXIF presence must suppress the heuristic.
            assert_eq!(rotation_for(Some(tag), (200, 100)), None);
        }
    }

    #[test]
    fn no_exif_landscape_rotates_90() {
        assert_eq!(rotation_for(None, (200, 100)), Some(Rotation::Ccw90));
    }

    #[test]
    fn no_exif_portrait_is_untouched() {
        assert_eq!(rotation_for(None, (100, 200)), None);
        // Square counts as portrait
        assert_eq!(rotation_for(None, (100, 100)), None);
    }

    #[test]
    fn rotation_degrees() {
        assert_eq!(Rotation::Ccw90.degrees_ccw(), 90);
        assert_eq!(Rotation::Ccw180.degrees_ccw(), 180);
        assert_eq!(Rotation::Ccw270.degrees_ccw(), 270);
    }
}
