//! Terminal rendering: progress bar and final summary.
//!
//! The CLI stand-in for the original file list UI. Dispatch progress drives
//! an `indicatif` bar; once the batch settles, the registry snapshot is
//! rendered as a per-file summary with totals.

use std::fmt;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::core::{FileRecord, FileState, ProgressEvent, ProgressKind};

/// Creates the batch progress bar.
pub fn batch_progress_bar(total: u64) -> ProgressBar {
    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {wide_msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-"),
    );
    bar
}

/// Applies a dispatch progress event to the bar.
pub fn apply_progress(bar: &ProgressBar, event: &ProgressEvent) {
    match event.kind {
        ProgressKind::Start => bar.set_position(0),
        ProgressKind::FileCompleted | ProgressKind::FileFailed => {
            bar.set_position(event.completed_tasks as u64);
            if let Some(message) = &event.message {
                bar.set_message(message.clone());
            }
        }
        ProgressKind::Complete => bar.finish_and_clear(),
    }
}

/// Formats a byte count with a binary unit suffix.
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Final per-file summary, built from a registry snapshot.
pub struct SummaryReport {
    records: Vec<FileRecord>,
}

impl SummaryReport {
    pub fn new(records: Vec<FileRecord>) -> Self {
        Self { records }
    }

    /// JSON rendition of the snapshot, for the `--json` flag.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.records)
    }
}

impl fmt::Display for SummaryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name_width = self
            .records
            .iter()
            .map(|r| r.file_name.len())
            .max()
            .unwrap_or(0);

        let mut completed = 0usize;
        let mut failed = 0usize;
        let mut total_original = 0u64;
        let mut total_new = 0u64;

        for record in &self.records {
            let name = format!("{:name_width$}", record.file_name);
            let kind = format!("{:5}", record.kind.label());
            match &record.state {
                FileState::Completed { result } => {
                    completed += 1;
                    total_original += result.original_size;
                    total_new += result.new_size;
                    writeln!(
                        f,
                        "{} {} {} {} → {} ({:.1}% saved) → {}",
                        style("✓").green(),
                        name,
                        style(kind).dim(),
                        format_bytes(result.original_size),
                        format_bytes(result.new_size),
                        result.compression_ratio(),
                        style(&result.file_name).cyan(),
                    )?;
                }
                FileState::Error { message } => {
                    failed += 1;
                    writeln!(
                        f,
                        "{} {} {} {}",
                        style("✗").red(),
                        name,
                        style(kind).dim(),
                        style(message).red(),
                    )?;
                }
                other => {
                    writeln!(
                        f,
                        "{} {} {} {}",
                        style("•").dim(),
                        name,
                        style(kind).dim(),
                        style(other.label()).dim(),
                    )?;
                }
            }
        }

        if completed > 0 || failed > 0 {
            writeln!(f)?;
            let saved = total_original as i64 - total_new as i64;
            let ratio = if total_original > 0 {
                saved as f64 / total_original as f64 * 100.0
            } else {
                0.0
            };
            writeln!(
                f,
                "{} completed, {} failed — {} → {} ({:.1}% saved)",
                style(completed).green(),
                if failed > 0 {
                    style(failed).red()
                } else {
                    style(failed).dim()
                },
                format_bytes(total_original),
                format_bytes(total_new),
                ratio,
            )?;
        }

        Ok(())
    }
}
