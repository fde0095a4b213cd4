use clap::{Parser, Subcommand};
use picpress::batch::{self, CompressOptions};
use picpress::config::{
    DEFAULT_MAX_SIZE_KB, DEFAULT_MIN_QUALITY, DEFAULT_QUALITY_STEP, DEFAULT_START_QUALITY,
    QualityDecay, SizeConstraint, Variant,
};
use picpress::imaging::RustBackend;
use picpress::output;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "picpress")]
#[command(about = "Batch image optimizer for web galleries")]
#[command(long_about = "\
Batch image optimizer for web galleries

Walks a directory of images and runs one of three passes:

  compress   Re-encode JPEGs as WebP under a size ceiling. Quality starts
             high and steps down until the encoded file fits, so the output
             is always the best quality that meets the budget.

  shrink     Downscale to a pixel-area budget first (main/thumb/default
             presets), then run the same quality search. Images already
             within budget are never upscaled.

  rotate     Turn photos upright: EXIF orientation when present, otherwise
             landscape images are assumed to be sideways portraits and
             rotated 90°. Already-upright images are copied through.

Outputs mirror the input's directory structure. Broken files are reported
and skipped — a single bad photo never aborts the run.")]
#[command(version)]
struct Cli {
    /// Input directory to scan for images
    #[arg(long, default_value = ".", global = true)]
    input: PathBuf,

    /// Write the batch report as JSON to this path
    #[arg(long, global = true)]
    report: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

/// Shared flags for the two compression passes.
#[derive(clap::Args)]
struct CeilingArgs {
    /// Output size ceiling in kilobytes
    #[arg(long, default_value_t = DEFAULT_MAX_SIZE_KB)]
    max_kb: u64,

    /// Lowest quality the search will attempt
    #[arg(long, default_value_t = DEFAULT_MIN_QUALITY)]
    min_quality: f32,
}

#[derive(Subcommand)]
enum Command {
    /// Re-encode JPEGs as WebP under a size ceiling
    Compress {
        /// Output directory
        #[arg(long, default_value = "compressed_images")]
        output: PathBuf,

        #[command(flatten)]
        ceiling: CeilingArgs,

        /// Initial quality guess
        #[arg(long, default_value_t = DEFAULT_START_QUALITY)]
        quality: f32,

        /// Quality decrement per attempt
        #[arg(long, default_value_t = DEFAULT_QUALITY_STEP)]
        step: f32,
    },
    /// Downscale to a pixel-area budget, then compress
    Shrink {
        /// Output directory
        #[arg(long, default_value = "compressed_images")]
        output: PathBuf,

        #[command(flatten)]
        ceiling: CeilingArgs,

        /// Pixel-area preset: main ~1.5 MP, thumb ~90 KP, default ~800 KP
        #[arg(long, value_enum, default_value_t = Variant::Default)]
        variant: Variant,
    },
    /// Rotate images upright from EXIF orientation or the portrait heuristic
    Rotate {
        /// Output directory
        #[arg(long, default_value = "rotated")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let backend = RustBackend::new();

    let report = match &cli.command {
        Command::Compress {
            output,
            ceiling,
            quality,
            step,
        } => {
            println!(
                "==> Compressing {} → {}",
                cli.input.display(),
                output.display()
            );
            let options = CompressOptions {
                constraint: SizeConstraint {
                    max_size_kb: ceiling.max_kb,
                    start_quality: *quality,
                    min_quality: ceiling.min_quality,
                    decay: QualityDecay::Step(*step),
                },
                target_area: None,
            };
            batch::compress_dir(
                &backend,
                &cli.input,
                output,
                &options,
                output::print_file_line,
            )?
        }
        Command::Shrink {
            output,
            ceiling,
            variant,
        } => {
            println!(
                "==> Shrinking {} → {} ({:?} variant)",
                cli.input.display(),
                output.display(),
                variant
            );
            let options = CompressOptions {
                constraint: SizeConstraint {
                    max_size_kb: ceiling.max_kb,
                    min_quality: ceiling.min_quality,
                    ..variant.constraint()
                },
                target_area: Some(variant.target_area()),
            };
            batch::compress_dir(
                &backend,
                &cli.input,
                output,
                &options,
                output::print_file_line,
            )?
        }
        Command::Rotate { output } => {
            println!(
                "==> Rotating {} → {}",
                cli.input.display(),
                output.display()
            );
            batch::rotate_dir(&backend, &cli.input, output, output::print_file_line)?
        }
    };

    output::print_summary(&report);

    if let Some(path) = &cli.report {
        std::fs::write(path, serde_json::to_string_pretty(&report)?)?;
        println!("Report written to {}", path.display());
    }

    Ok(())
}
