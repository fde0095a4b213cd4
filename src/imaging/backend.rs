//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the three operations every backend must
//! support: decode, read_orientation, and encode_webp. The orientation seam
//! exists so the rotation decision logic in
//! [`calculations`](super::calculations) stays independent of whichever
//! library happens to parse the EXIF block.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend) — pure Rust plus libwebp,
//! statically linked into the binary.

use super::params::Quality;
use image::DynamicImage;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode image: {0}")]
    Decode(String),
    #[error("WebP encode failed: {0}")]
    Encode(String),
}

/// EXIF orientation tag values (1–8).
///
/// The tag describes how raw sensor pixel data should be transformed for
/// correct display. Variant names describe that required transformation,
/// with rotations given clockwise as the EXIF spec does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrientationTag {
    /// 1 — already upright.
    Normal,
    /// 2 — flip left-right.
    MirrorHorizontal,
    /// 3 — rotate 180°.
    Rotate180,
    /// 4 — flip top-bottom.
    MirrorVertical,
    /// 5 — mirror then rotate 270° clockwise.
    MirrorHorizontalRotate270Cw,
    /// 6 — rotate 90° clockwise.
    Rotate90Cw,
    /// 7 — mirror then rotate 90° clockwise.
    MirrorHorizontalRotate90Cw,
    /// 8 — rotate 270° clockwise.
    Rotate270Cw,
}

impl OrientationTag {
    /// Parse a raw EXIF orientation value. Values outside 1–8 are invalid
    /// per the EXIF specification and yield `None`.
    pub fn from_exif(value: u32) -> Option<Self> {
        match value {
            1 => Some(Self::Normal),
            2 => Some(Self::MirrorHorizontal),
            3 => Some(Self::Rotate180),
            4 => Some(Self::MirrorVertical),
            5 => Some(Self::MirrorHorizontalRotate270Cw),
            6 => Some(Self::Rotate90Cw),
            7 => Some(Self::MirrorHorizontalRotate90Cw),
            8 => Some(Self::Rotate270Cw),
            _ => None,
        }
    }
}

/// Trait for image processing backends.
///
/// Every backend must implement all three operations so the batch layer and
/// the high-level operations are backend-agnostic and testable with a mock.
pub trait ImageBackend: Sync {
    /// Decode an image file into pixels.
    fn decode(&self, path: &Path) -> Result<DynamicImage, BackendError>;

    /// Read the embedded EXIF orientation tag, best-effort: a file with no
    /// EXIF block, an unreadable block, or an invalid tag value is `None`.
    fn read_orientation(&self, path: &Path) -> Option<OrientationTag>;

    /// Encode pixels as lossy WebP at the given quality.
    fn encode_webp(&self, image: &DynamicImage, quality: Quality) -> Result<Vec<u8>, BackendError>;
}
