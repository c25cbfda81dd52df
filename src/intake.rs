//! Intake surface: path expansion and classification.
//!
//! The CLI equivalent of the original drop zone. Files are accepted
//! directly, directories are scanned, and every file is classified by
//! extension before a pending record is created. Unsupported kinds are
//! skipped silently (debug-logged), oversized files with a warning.

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

use crate::core::FileRecord;
use crate::utils::{FileKind, OptimizerResult, ValidationError};

/// Default intake size cap in megabytes.
pub const MAX_FILE_SIZE_MB: u64 = 10;

/// Intake configuration.
#[derive(Debug, Clone)]
pub struct IntakeOptions {
    /// Files above this size are skipped
    pub max_size_bytes: u64,
    /// Whether directory arguments are scanned recursively
    pub recursive: bool,
}

impl Default for IntakeOptions {
    fn default() -> Self {
        Self {
            max_size_bytes: MAX_FILE_SIZE_MB * 1024 * 1024,
            recursive: false,
        }
    }
}

/// Outcome of an intake pass.
#[derive(Debug, Default)]
pub struct IntakeSummary {
    /// Pending records for every accepted file, in discovery order
    pub records: Vec<FileRecord>,
    /// Files skipped because their extension is not supported
    pub skipped_unsupported: usize,
    /// Files skipped because they exceed the size cap
    pub skipped_oversized: usize,
}

/// Expands and classifies the given paths into pending records.
///
/// Paths named explicitly must exist; a missing argument is an error rather
/// than a skip. Inside directory scans, anything unclassifiable is skipped.
pub async fn collect(paths: &[PathBuf], options: &IntakeOptions) -> OptimizerResult<IntakeSummary> {
    let mut summary = IntakeSummary::default();

    for path in paths {
        let meta = fs::metadata(path)
            .await
            .map_err(|_| ValidationError::path_not_found(path.clone()))?;

        if meta.is_dir() {
            collect_dir(path, options, &mut summary).await?;
        } else if meta.is_file() {
            consider_file(path, meta.len(), options, &mut summary);
        } else {
            return Err(ValidationError::not_a_file(path.clone()).into());
        }
    }

    debug!(
        "intake: {} accepted, {} unsupported, {} oversized",
        summary.records.len(),
        summary.skipped_unsupported,
        summary.skipped_oversized
    );
    Ok(summary)
}

/// Scans a directory, one level deep unless `recursive` is set.
async fn collect_dir(
    dir: &Path,
    options: &IntakeOptions,
    summary: &mut IntakeSummary,
) -> OptimizerResult<()> {
    let mut stack = vec![dir.to_path_buf()];

    while let Some(current) = stack.pop() {
        let mut entries = fs::read_dir(&current).await?;
        while let Some(entry) = entries.next_entry().await? {
            let entry_path = entry.path();
            let meta = entry.metadata().await?;

            if meta.is_dir() {
                if options.recursive {
                    stack.push(entry_path);
                }
            } else if meta.is_file() {
                consider_file(&entry_path, meta.len(), options, summary);
            }
        }
    }

    Ok(())
}

fn consider_file(
    path: &Path,
    size: u64,
    options: &IntakeOptions,
    summary: &mut IntakeSummary,
) {
    let Some(kind) = FileKind::classify(path) else {
        debug!("skipping unsupported file: {}", path.display());
        summary.skipped_unsupported += 1;
        return;
    };

    if size > options.max_size_bytes {
        warn!(
            "skipping {} ({} bytes over the {} byte cap)",
            path.display(),
            size - options.max_size_bytes,
            options.max_size_bytes
        );
        summary.skipped_oversized += 1;
        return;
    }

    summary.records.push(FileRecord::new(path, kind, size));
}
