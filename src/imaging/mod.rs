//! Image processing — pure Rust decoders plus libwebp for lossy encoding.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** (JPEG, PNG, WebP) | `image` crate |
//! | **EXIF orientation** | `kamadak-exif` |
//! | **Resize** | Lanczos3, pixel-area budget |
//! | **Encode → WebP** | libwebp via the `webp` crate, quality search |
//!
//! The module is split into:
//! - **Calculations**: pure functions for dimension math and rotation
//!   decisions (unit testable, no I/O)
//! - **Parameters**: the [`Quality`] scalar
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: the quality search, resize, and orientation
//!   normalization combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend, OrientationTag};
pub use calculations::{Rotation, area_bounded_dimensions, rotation_for};
pub use operations::{EncodeOutcome, encode_to_size, normalize_orientation, resize_to_area};
pub use params::Quality;
pub use rust_backend::RustBackend;
