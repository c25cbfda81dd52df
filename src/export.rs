//! Artifact export.
//!
//! The CLI equivalent of the per-file download: every completed record's
//! artifact is written to the output directory under its artifact name.

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

use crate::core::{FileRegistry, FileState};
use crate::utils::OptimizerResult;

/// Writes all completed artifacts into `out_dir`, creating it if needed.
///
/// Returns the written paths. Records that are not completed are left
/// untouched; re-exporting overwrites previous outputs.
pub async fn export_completed(
    registry: &FileRegistry,
    out_dir: &Path,
) -> OptimizerResult<Vec<PathBuf>> {
    let completed: Vec<_> = registry
        .snapshot()
        .into_iter()
        .filter_map(|record| match record.state {
            FileState::Completed { result } => Some(result),
            _ => None,
        })
        .collect();

    if completed.is_empty() {
        debug!("no completed artifacts to export");
        return Ok(Vec::new());
    }

    fs::create_dir_all(out_dir).await?;

    let mut written = Vec::with_capacity(completed.len());
    for artifact in completed {
        let target = out_dir.join(&artifact.file_name);
        fs::write(&target, &artifact.data).await?;
        debug!("wrote {} ({} bytes)", target.display(), artifact.new_size);
        written.push(target);
    }

    info!("Exported {} artifact(s) to {}", written.len(), out_dir.display());
    Ok(written)
}
