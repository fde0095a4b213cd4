//! Pure Rust image processing backend.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, WebP) | `image` crate (pure Rust decoders) |
//! | EXIF orientation | `kamadak-exif` (`Tag::Orientation`, primary IFD) |
//! | Encode → WebP (lossy) | `webp` crate (libwebp, `encode_simple`) |

use super::backend::{BackendError, ImageBackend, OrientationTag};
use super::params::Quality;
use image::{DynamicImage, ImageReader};
use std::path::Path;

/// Production backend using the `image` crate ecosystem plus libwebp.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageBackend for RustBackend {
    fn decode(&self, path: &Path) -> Result<DynamicImage, BackendError> {
        ImageReader::open(path)
            .map_err(BackendError::Io)?
            .decode()
            .map_err(|e| BackendError::Decode(format!("{}: {}", path.display(), e)))
    }

    fn read_orientation(&self, path: &Path) -> Option<OrientationTag> {
        let file = std::fs::File::open(path).ok()?;
        let mut reader = std::io::BufReader::new(file);
        let exif = exif::Reader::new().read_from_container(&mut reader).ok()?;
        let value = exif
            .get_field(exif::Tag::Orientation, exif::In::PRIMARY)?
            .value
            .get_uint(0)?;
        OrientationTag::from_exif(value)
    }

    fn encode_webp(&self, image: &DynamicImage, quality: Quality) -> Result<Vec<u8>, BackendError> {
        // libwebp wants interleaved RGB; greyscale and paletted inputs are
        // converted first, matching the original pipeline's RGB normalization.
        let rgb = image.to_rgb8();
        let encoder = webp::Encoder::from_rgb(rgb.as_raw(), rgb.width(), rgb.height());
        let encoded = encoder
            .encode_simple(false, quality.value())
            .map_err(|e| BackendError::Encode(format!("{:?}", e)))?;
        Ok(encoded.to_vec())
    }
}
