//! # Picpress
//!
//! Batch image optimizer for web galleries: re-encodes JPEGs into
//! size-constrained WebP, downscales to a pixel-area budget, and rotates
//! photos upright from EXIF metadata.
//!
//! # Architecture: Three Passes
//!
//! Picpress runs one of three independent passes over a directory of images,
//! each producing files in an output directory plus a per-file batch report:
//!
//! ```text
//! compress   *.jpg  →  *.webp        (quality search under a byte ceiling)
//! shrink     *.jpg  →  *.webp        (area-bounded resize, then the search)
//! rotate     images →  upright copies (EXIF tag or portrait heuristic)
//! ```
//!
//! The two algorithmic kernels are deliberately small and pure:
//!
//! - **Quality search** ([`imaging::encode_to_size`]): a monotonic descending
//!   ladder rather than binary search. A few extra encode passes buy the
//!   guarantee that the first attempt meeting the ceiling is also the
//!   highest-quality one — visual quality wins over speed.
//! - **Rotation decision** ([`imaging::rotation_for`]): EXIF tag first, then
//!   a landscape-means-sideways heuristic for un-tagged files.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Size constraints, quality schedules, and target-area presets |
//! | [`imaging`] | Backend trait, pure calculations, and the three operations |
//! | [`batch`] | Directory walking, per-file dispatch, batch report |
//! | [`output`] | CLI output formatting — per-file status lines and summary |
//!
//! # Design Decisions
//!
//! ## Results, Not Exceptions
//!
//! One broken photo must never abort a thousand-file run. Every per-file
//! failure (unreadable image, unwritable output) becomes an entry in the
//! [`batch::BatchReport`] and processing continues; only run-level setup
//! problems propagate as errors. The report serializes to JSON for scripting.
//!
//! ## Backend Seam
//!
//! Decode, EXIF reading, and WebP encoding sit behind the
//! [`imaging::ImageBackend`] trait. The decision logic — which rotation,
//! which quality — never touches a codec directly, so the search loop and
//! the orientation rules are tested against a scripted mock with no pixel
//! work at all.
//!
//! ## Single-Threaded On Purpose
//!
//! Each image is fully processed (decode → transform → encode → write)
//! before the next begins. The workloads are small batches run by hand;
//! deterministic ordering and simple resource scoping are worth more here
//! than core saturation.

pub mod batch;
pub mod config;
pub mod imaging;
pub mod output;
