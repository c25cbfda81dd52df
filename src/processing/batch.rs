//! Concurrent batch dispatch.
//!
//! Takes every dispatchable record in the registry (pending plus errored,
//! so failures are retried), routes each to its backend, and settles it as
//! completed or errored. A failing record never aborts the batch.

use std::sync::atomic::{AtomicUsize, Ordering};

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::core::{FileRecord, FileRegistry, OutputArtifact, ProgressEvent, ProgressKind};
use crate::processing::{image, minify, validation};
use crate::utils::{FileKind, OptimizerError, OptimizerResult};

/// Dispatch configuration.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Maximum number of files in flight at once
    pub concurrency: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        let concurrency = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4);
        Self { concurrency }
    }
}

/// Outcome of one dispatch run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Number of records dispatched
    pub dispatched: usize,
    /// Number of records that completed
    pub completed: usize,
    /// (file name, error message) for every record that failed
    pub failed: Vec<(String, String)>,
}

/// Handles concurrent processing of dispatchable records.
pub struct BatchProcessor {
    registry: FileRegistry,
    config: BatchConfig,
}

impl BatchProcessor {
    pub fn new(registry: FileRegistry) -> Self {
        Self::with_config(registry, BatchConfig::default())
    }

    pub fn with_config(registry: FileRegistry, config: BatchConfig) -> Self {
        Self { registry, config }
    }

    /// Processes every dispatchable record, emitting a progress event as
    /// each one settles. An empty dispatch set is a no-op.
    pub async fn process(
        &self,
        on_progress: impl Fn(ProgressEvent) + Send + Sync,
    ) -> BatchSummary {
        let records = self.registry.dispatchable();
        let total = records.len();
        if total == 0 {
            debug!("nothing to dispatch");
            return BatchSummary::default();
        }

        info!(
            "Dispatching {} file(s) (concurrency {})",
            total, self.config.concurrency
        );
        on_progress(ProgressEvent::new(ProgressKind::Start, 0, total));

        let settled = AtomicUsize::new(0);
        let on_progress = &on_progress;
        let settled_ref = &settled;

        let outcomes: Vec<Option<(String, String)>> = stream::iter(records)
            .map(|record| {
                let registry = self.registry.clone();
                async move {
                    let id = record.id;
                    let file_name = record.file_name.clone();
                    registry.mark_processing(id);

                    match process_record(&record).await {
                        Ok(artifact) => {
                            let done = settled_ref.fetch_add(1, Ordering::SeqCst) + 1;
                            let message = format!(
                                "{} optimized ({:.2} KB saved / {:.0}% compression)",
                                file_name,
                                artifact.saved_bytes() as f64 / 1024.0,
                                artifact.compression_ratio()
                            );
                            debug!("{message}");
                            on_progress(
                                ProgressEvent::new(ProgressKind::FileCompleted, done, total)
                                    .with_file(file_name.as_str())
                                    .with_message(message),
                            );
                            registry.complete(id, artifact);
                            None
                        }
                        Err(e) => {
                            let message = e.to_string();
                            warn!("optimization failed for {}: {}", file_name, message);
                            let done = settled_ref.fetch_add(1, Ordering::SeqCst) + 1;
                            on_progress(
                                ProgressEvent::new(ProgressKind::FileFailed, done, total)
                                    .with_file(file_name.as_str())
                                    .with_message(message.clone()),
                            );
                            registry.fail(id, message.clone());
                            Some((file_name, message))
                        }
                    }
                }
            })
            .buffer_unordered(self.config.concurrency)
            .collect()
            .await;

        on_progress(ProgressEvent::new(ProgressKind::Complete, total, total));

        let failed: Vec<_> = outcomes.into_iter().flatten().collect();
        if failed.is_empty() {
            info!("Batch completed: {} file(s) processed", total);
        } else {
            warn!(
                "Batch completed with {} failure(s) out of {}",
                failed.len(),
                total
            );
        }

        BatchSummary {
            dispatched: total,
            completed: total - failed.len(),
            failed,
        }
    }
}

/// Runs one record through its backend, off the async runtime's worker
/// threads for the CPU-bound part.
async fn process_record(record: &FileRecord) -> OptimizerResult<OutputArtifact> {
    validation::validate_record(record).await?;

    let data = tokio::fs::read(&record.path).await?;
    let original_size = data.len() as u64;

    match record.kind {
        kind @ (FileKind::Js | FileKind::Css) => {
            let source = String::from_utf8(data).map_err(|_| {
                OptimizerError::minify(format!("{} is not valid UTF-8", record.file_name))
            })?;
            let minified =
                tokio::task::spawn_blocking(move || minify::minify_text(&source, kind))
                    .await
                    .map_err(|e| {
                        OptimizerError::minify(format!("Minification task panicked: {e}"))
                    })??;

            let bytes = minified.into_bytes();
            Ok(OutputArtifact {
                file_name: minify::artifact_name(&record.file_name, kind),
                new_size: bytes.len() as u64,
                data: bytes,
                original_size,
            })
        }
        FileKind::Image(source_format) => {
            let options = record.options;
            let (bytes, produced) = tokio::task::spawn_blocking(move || {
                image::recompress(&data, source_format, &options)
            })
            .await
            .map_err(|e| OptimizerError::image(format!("Encoding task panicked: {e}")))??;

            Ok(OutputArtifact {
                file_name: image::artifact_name(
                    &record.file_name,
                    produced,
                    options.convert_to_webp,
                ),
                new_size: bytes.len() as u64,
                data: bytes,
                original_size,
            })
        }
    }
}
