//! Batch processing over a directory of images.
//!
//! Walks the input directory, runs one of the imaging operations per file,
//! and collects a per-file result into a [`BatchReport`]. Failures never
//! abort the run: decode and write errors are recorded for the file and
//! processing continues with the next one. Only run-level setup failures
//! (missing input directory, output directory that cannot be created)
//! propagate.
//!
//! ## Output layout
//!
//! Relative sub-paths are mirrored into the output directory:
//!
//! ```text
//! photos/                          photos/compressed_images/
//! ├── 001-dawn.jpg            →    ├── 001-dawn.webp
//! └── trips/                       └── trips/
//!     └── 002-rome.jpg                 └── 002-rome.webp
//! ```
//!
//! The output directory is skipped during discovery, so re-running a pass
//! with the output nested inside the input never re-processes its own
//! results.

use crate::config::SizeConstraint;
use crate::imaging::{
    BackendError, ImageBackend, encode_to_size, normalize_orientation, resize_to_area,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

/// Extensions the compression passes pick up (JPEG sources only).
const COMPRESS_EXTENSIONS: &[&str] = &["jpg", "jpeg"];
/// Extensions the rotation pass picks up.
const ROTATE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Input directory not found: {0}")]
    InputNotFound(PathBuf),
}

/// Options for a compression pass.
#[derive(Debug, Clone)]
pub struct CompressOptions {
    /// Byte-size ceiling and quality schedule.
    pub constraint: SizeConstraint,
    /// Pixel-area budget applied before the quality search, if any.
    pub target_area: Option<u64>,
}

/// What happened to a single file.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileStatus {
    /// Re-encoded as WebP. `satisfied` is false when the result is still
    /// over the ceiling after exhausting the quality floor — the best
    /// attempt is persisted regardless.
    Compressed {
        quality: f32,
        size_kb: f64,
        width: u32,
        height: u32,
        satisfied: bool,
    },
    /// Rotated upright and written out.
    Rotated { degrees_ccw: u32 },
    /// Already upright; copied through unchanged.
    Upright,
    /// Unreadable or corrupt image.
    DecodeError { message: String },
    /// Output could not be produced or written.
    IoError { message: String },
}

/// Per-file entry in the batch report.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// Source path relative to the input root.
    pub source: PathBuf,
    /// Output path relative to the output root, when one was written.
    pub output: Option<PathBuf>,
    #[serde(flatten)]
    pub status: FileStatus,
}

/// Result of a whole batch run, serializable to JSON.
#[derive(Debug, Default, Serialize)]
pub struct BatchReport {
    pub files: Vec<FileReport>,
}

impl BatchReport {
    /// Files written successfully (compressed within the ceiling, rotated,
    /// or copied through upright).
    pub fn succeeded(&self) -> usize {
        self.files
            .iter()
            .filter(|f| match &f.status {
                FileStatus::Compressed { satisfied, .. } => *satisfied,
                FileStatus::Rotated { .. } | FileStatus::Upright => true,
                _ => false,
            })
            .count()
    }

    /// Files written but still over the size ceiling.
    pub fn constraint_misses(&self) -> usize {
        self.files
            .iter()
            .filter(|f| {
                matches!(
                    f.status,
                    FileStatus::Compressed {
                        satisfied: false,
                        ..
                    }
                )
            })
            .count()
    }

    /// Files that produced no output.
    pub fn errors(&self) -> usize {
        self.files
            .iter()
            .filter(|f| {
                matches!(
                    f.status,
                    FileStatus::DecodeError { .. } | FileStatus::IoError { .. }
                )
            })
            .count()
    }
}

/// Re-encode every JPEG under `input` as size-constrained WebP in `output`.
///
/// `on_file` is called once per file as its report entry is produced —
/// the CLI uses it for progress lines.
pub fn compress_dir(
    backend: &impl ImageBackend,
    input: &Path,
    output: &Path,
    options: &CompressOptions,
    mut on_file: impl FnMut(&FileReport),
) -> Result<BatchReport, BatchError> {
    let mut report = BatchReport::default();

    for (source, rel) in discover(input, output, COMPRESS_EXTENSIONS)? {
        let rel_out = rel.with_extension("webp");
        let status = compress_one(backend, &source, &output.join(&rel_out), options);
        let entry = FileReport {
            source: rel,
            output: matches!(&status, FileStatus::Compressed { .. }).then_some(rel_out),
            status,
        };
        on_file(&entry);
        report.files.push(entry);
    }

    Ok(report)
}

fn compress_one(
    backend: &impl ImageBackend,
    source: &Path,
    dest: &Path,
    options: &CompressOptions,
) -> FileStatus {
    let image = match backend.decode(source) {
        Ok(image) => image,
        Err(e) => return status_for_backend_error(e),
    };

    let image = match options.target_area {
        Some(area) => resize_to_area(&image, area),
        None => image,
    };

    let outcome = match encode_to_size(backend, &image, &options.constraint) {
        Ok(outcome) => outcome,
        Err(e) => return status_for_backend_error(e),
    };

    if let Err(e) = write_bytes(dest, &outcome.bytes) {
        return FileStatus::IoError {
            message: e.to_string(),
        };
    }

    FileStatus::Compressed {
        quality: outcome.quality.value(),
        size_kb: outcome.size_kb(),
        width: image.width(),
        height: image.height(),
        satisfied: outcome.satisfied,
    }
}

/// Normalize orientation for every image under `input`, writing results to
/// `output` with the original filename and format.
///
/// Already-upright images are copied through unchanged, so the output
/// directory is always a complete, corrected mirror of the input.
pub fn rotate_dir(
    backend: &impl ImageBackend,
    input: &Path,
    output: &Path,
    mut on_file: impl FnMut(&FileReport),
) -> Result<BatchReport, BatchError> {
    let mut report = BatchReport::default();

    for (source, rel) in discover(input, output, ROTATE_EXTENSIONS)? {
        let status = rotate_one(backend, &source, &output.join(&rel));
        let entry = FileReport {
            source: rel.clone(),
            output: matches!(&status, FileStatus::Rotated { .. } | FileStatus::Upright)
                .then_some(rel),
            status,
        };
        on_file(&entry);
        report.files.push(entry);
    }

    Ok(report)
}

fn rotate_one(backend: &impl ImageBackend, source: &Path, dest: &Path) -> FileStatus {
    // Orientation is read before decoding: the tag lives in the file's EXIF
    // block, which decoders don't surface.
    let tag = backend.read_orientation(source);

    let image = match backend.decode(source) {
        Ok(image) => image,
        Err(e) => return status_for_backend_error(e),
    };

    let (upright, rotation) = normalize_orientation(&image, tag);

    if let Some(parent) = dest.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            return FileStatus::IoError {
                message: e.to_string(),
            };
        }
    }
    if let Err(e) = upright.save(dest) {
        return FileStatus::IoError {
            message: e.to_string(),
        };
    }

    match rotation {
        Some(rotation) => FileStatus::Rotated {
            degrees_ccw: rotation.degrees_ccw(),
        },
        None => FileStatus::Upright,
    }
}

/// Find processable files under `input`, sorted by name, as
/// `(absolute, relative)` pairs. The output directory is pruned so a pass
/// never consumes its own results.
fn discover(
    input: &Path,
    output: &Path,
    extensions: &[&str],
) -> Result<Vec<(PathBuf, PathBuf)>, BatchError> {
    if !input.is_dir() {
        return Err(BatchError::InputNotFound(input.to_path_buf()));
    }
    std::fs::create_dir_all(output)?;
    // Canonicalized so the prune works whether the output path is given as
    // relative or absolute.
    let output_canon = output.canonicalize().ok();

    let mut files = Vec::new();
    for entry in WalkDir::new(input)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_output_dir(e, output_canon.as_deref()))
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() || !has_extension(entry.path(), extensions) {
            continue;
        }
        if let Ok(rel) = entry.path().strip_prefix(input) {
            files.push((entry.path().to_path_buf(), rel.to_path_buf()));
        }
    }
    Ok(files)
}

fn is_output_dir(entry: &DirEntry, output_canon: Option<&Path>) -> bool {
    entry.file_type().is_dir()
        && output_canon
            .is_some_and(|out| entry.path().canonicalize().is_ok_and(|p| p == out))
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_ascii_lowercase();
            extensions.iter().any(|e| *e == ext)
        })
}

fn write_bytes(dest: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(dest, bytes)
}

fn status_for_backend_error(error: BackendError) -> FileStatus {
    match error {
        BackendError::Io(e) => FileStatus::IoError {
            message: e.to_string(),
        },
        BackendError::Decode(message) => FileStatus::DecodeError { message },
        BackendError::Encode(message) => FileStatus::IoError { message },
    }
}
