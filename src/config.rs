//! Compression and resize configuration.
//!
//! Everything the processing components need is passed in explicitly as small
//! config structs — no config files, no environment variables. The defaults
//! here are the tuning that shipped with the original gallery pipeline:
//!
//! ```text
//! Size ceiling:     150 KB
//! Quality search:   85 → 20, step 5        (plain compression)
//!                   80/75 → 20, factor 0.9 (resize + compression)
//! Target areas:     main 1.5 MP, thumb 90 KP, default 800 KP
//! ```

use serde::Serialize;

/// Default output size ceiling in kilobytes.
pub const DEFAULT_MAX_SIZE_KB: u64 = 150;
/// Lowest quality the search will attempt.
pub const DEFAULT_MIN_QUALITY: f32 = 20.0;
/// Initial quality guess for plain compression.
pub const DEFAULT_START_QUALITY: f32 = 85.0;
/// Quality decrement per attempt for plain compression.
pub const DEFAULT_QUALITY_STEP: f32 = 5.0;
/// Per-attempt quality multiplier for the resize + compress path.
pub const DEFAULT_QUALITY_FACTOR: f32 = 0.9;

/// How quality decreases between encode attempts.
///
/// Both kinds give a monotonically descending ladder, so the first attempt
/// that satisfies the size ceiling is also the highest-quality one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityDecay {
    /// Subtract a fixed number of quality points per attempt.
    Step(f32),
    /// Multiply quality by a factor (< 1.0) per attempt.
    Factor(f32),
}

impl QualityDecay {
    /// The quality the next encode attempt would use.
    pub fn next(self, quality: f32) -> f32 {
        match self {
            QualityDecay::Step(step) => quality - step,
            QualityDecay::Factor(factor) => quality * factor,
        }
    }
}

/// Byte-size constraint driving the quality search.
///
/// The search runs from `start_quality` down to `min_quality` inclusive; the
/// achieved quality is always within that range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SizeConstraint {
    /// Output size ceiling in kilobytes.
    pub max_size_kb: u64,
    /// Quality of the first encode attempt.
    pub start_quality: f32,
    /// Lowest acceptable quality; the search never goes below this.
    pub min_quality: f32,
    /// Quality schedule between attempts.
    pub decay: QualityDecay,
}

impl SizeConstraint {
    /// The ceiling expressed in bytes.
    pub fn max_size_bytes(&self) -> u64 {
        self.max_size_kb * 1024
    }
}

impl Default for SizeConstraint {
    fn default() -> Self {
        Self {
            max_size_kb: DEFAULT_MAX_SIZE_KB,
            start_quality: DEFAULT_START_QUALITY,
            min_quality: DEFAULT_MIN_QUALITY,
            decay: QualityDecay::Step(DEFAULT_QUALITY_STEP),
        }
    }
}

/// Output variant selecting a pixel-area budget for the resize pass.
///
/// Areas are resolution budgets independent of aspect ratio: a `main` image
/// may be 1500×1000 or 1000×1500, both fit the same budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Full-size gallery image (~1500×1000).
    Main,
    /// Grid thumbnail (~300×300).
    Thumb,
    /// Anything else (~900×900).
    Default,
}

impl Variant {
    /// Maximum pixel area for this variant.
    pub fn target_area(self) -> u64 {
        match self {
            Variant::Main => 1_500_000,
            Variant::Thumb => 90_000,
            Variant::Default => 800_000,
        }
    }

    /// Size constraint tuned for this variant: the resize already bounds the
    /// pixel count, so the search starts lower and decays geometrically.
    pub fn constraint(self) -> SizeConstraint {
        let start_quality = match self {
            Variant::Main => 80.0,
            Variant::Thumb | Variant::Default => 75.0,
        };
        SizeConstraint {
            start_quality,
            decay: QualityDecay::Factor(DEFAULT_QUALITY_FACTOR),
            ..SizeConstraint::default()
        }
    }
}
