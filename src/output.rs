//! CLI output formatting.
//!
//! Each entity has a `format_*` function (returns a `String` or
//! `Vec<String>`) for testability and a `print_*` wrapper that writes to
//! stdout. Format functions are pure — no I/O, no side effects.
//!
//! ```text
//! [OK]   001-dawn.jpg → 001-dawn.webp (132.4 KB, q=80)
//! [WARN] panorama.jpg → panorama.webp (still 210.7 KB at q=20)
//! [ROT]  landscape.png rotated 90°
//! [OK]   portrait.png already upright
//! [ERR]  broken.jpg: Failed to decode image: ...
//!
//! Processed 5 files: 3 ok, 1 over target, 1 error
//! ```

use crate::batch::{BatchReport, FileReport, FileStatus};

/// Format the status line for one processed file.
pub fn format_file_line(report: &FileReport) -> String {
    let source = report.source.display();
    match &report.status {
        FileStatus::Compressed {
            quality,
            size_kb,
            satisfied,
            ..
        } => {
            let output = report
                .output
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            if *satisfied {
                format!("[OK]   {source} → {output} ({size_kb:.1} KB, q={quality:.0})")
            } else {
                format!("[WARN] {source} → {output} (still {size_kb:.1} KB at q={quality:.0})")
            }
        }
        FileStatus::Rotated { degrees_ccw } => {
            format!("[ROT]  {source} rotated {degrees_ccw}°")
        }
        FileStatus::Upright => format!("[OK]   {source} already upright"),
        FileStatus::DecodeError { message } => format!("[ERR]  {source}: {message}"),
        FileStatus::IoError { message } => format!("[ERR]  {source}: {message}"),
    }
}

/// Format the end-of-run summary.
pub fn format_summary(report: &BatchReport) -> Vec<String> {
    let total = report.files.len();
    let mut parts = vec![format!("{} ok", report.succeeded())];
    if report.constraint_misses() > 0 {
        parts.push(format!("{} over target", report.constraint_misses()));
    }
    if report.errors() > 0 {
        let errors = report.errors();
        parts.push(format!(
            "{errors} error{}",
            if errors == 1 { "" } else { "s" }
        ));
    }
    vec![
        String::new(),
        format!(
            "Processed {total} file{}: {}",
            if total == 1 { "" } else { "s" },
            parts.join(", ")
        ),
    ]
}

pub fn print_file_line(report: &FileReport) {
    println!("{}", format_file_line(report));
}

pub fn print_summary(report: &BatchReport) {
    for line in format_summary(report) {
        println!("{}", line);
    }
}
