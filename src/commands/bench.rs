//! Throughput benchmark: runs the pipeline without exporting anything.

use std::fmt;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use crate::cli::BenchOpts;
use crate::core::{FileRegistry, FileState};
use crate::processing::{validation, BatchConfig, BatchProcessor};
use crate::report::format_bytes;
use crate::utils::{OptimizerError, OptimizerResult};
use crate::intake;

/// Result of a benchmark run measuring optimization throughput.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkResult {
    /// Total wall-clock time for the entire batch in milliseconds
    pub total_time_ms: u64,
    /// Average time per file in milliseconds
    pub avg_per_file_ms: f64,
    /// Throughput in files per second
    pub throughput_files_per_sec: f64,
    /// Number of files dispatched
    pub file_count: usize,
    /// Files that completed successfully
    pub completed_count: usize,
    /// Total input bytes across all files
    pub total_input_bytes: u64,
    /// Total output bytes across completed files
    pub total_output_bytes: u64,
}

impl fmt::Display for BenchmarkResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Batch Optimizer Benchmark Report ===")?;
        writeln!(f)?;
        writeln!(f, "- Total Duration: {} ms", self.total_time_ms)?;
        writeln!(f, "- Average Per File: {:.1} ms", self.avg_per_file_ms)?;
        writeln!(f, "- Throughput: {:.2} files/s", self.throughput_files_per_sec)?;
        writeln!(
            f,
            "- Files: {} dispatched, {} completed",
            self.file_count, self.completed_count
        )?;
        writeln!(
            f,
            "- Bytes: {} in → {} out",
            format_bytes(self.total_input_bytes),
            format_bytes(self.total_output_bytes)
        )?;
        Ok(())
    }
}

pub async fn run(opts: BenchOpts) -> OptimizerResult<()> {
    let Some(result) = execute(&opts).await? else {
        info!("No supported files found");
        return Ok(());
    };

    if opts.json {
        let json = serde_json::to_string_pretty(&result)
            .map_err(|e| OptimizerError::io(e.to_string()))?;
        println!("{json}");
    } else {
        print!("{result}");
    }
    Ok(())
}

/// Runs the timed batch and returns its result, or `None` when intake
/// finds nothing to dispatch.
pub(crate) async fn execute(opts: &BenchOpts) -> OptimizerResult<Option<BenchmarkResult>> {
    validation::validate_quality(opts.quality)?;

    let intake_opts = intake::IntakeOptions {
        recursive: opts.recursive,
        ..intake::IntakeOptions::default()
    };
    let summary = intake::collect(&opts.paths, &intake_opts).await?;
    if summary.records.is_empty() {
        return Ok(None);
    }

    let registry = FileRegistry::new();
    let ids = registry.add_all(summary.records);
    for id in &ids {
        registry.set_quality(*id, opts.quality);
        if opts.webp {
            registry.set_convert_to_webp(*id, true);
        }
    }

    let config = opts
        .jobs
        .map(|jobs| BatchConfig {
            concurrency: jobs.max(1),
        })
        .unwrap_or_default();
    let processor = BatchProcessor::with_config(registry.clone(), config);

    debug!("benchmarking {} file(s)", registry.len());
    let start = Instant::now();
    let batch = processor.process(|_| {}).await;
    let elapsed_ms = start.elapsed().as_millis() as u64;

    let mut total_input_bytes = 0u64;
    let mut total_output_bytes = 0u64;
    for record in registry.snapshot() {
        total_input_bytes += record.size;
        if let FileState::Completed { result } = record.state {
            total_output_bytes += result.new_size;
        }
    }

    let avg_per_file_ms = elapsed_ms as f64 / batch.dispatched as f64;
    let throughput_files_per_sec = if elapsed_ms > 0 {
        batch.dispatched as f64 / (elapsed_ms as f64 / 1000.0)
    } else {
        f64::INFINITY
    };

    Ok(Some(BenchmarkResult {
        total_time_ms: elapsed_ms,
        avg_per_file_ms,
        throughput_files_per_sec,
        file_count: batch.dispatched,
        completed_count: batch.completed,
        total_input_bytes,
        total_output_bytes,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn opts_for(paths: Vec<PathBuf>, recursive: bool) -> BenchOpts {
        BenchOpts {
            paths,
            webp: false,
            quality: 80,
            recursive,
            jobs: Some(2),
            json: true,
        }
    }

    #[tokio::test]
    async fn recursive_flag_reaches_intake() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(dir.path().join("top.js"), b"var a = 1;\n").unwrap();
        std::fs::write(nested.join("deep.css"), b"body { margin: 0; }\n").unwrap();

        let flat = execute(&opts_for(vec![dir.path().to_path_buf()], false))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(flat.file_count, 1);

        let deep = execute(&opts_for(vec![dir.path().to_path_buf()], true))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(deep.file_count, 2);
        assert_eq!(deep.completed_count, 2);
    }

    #[tokio::test]
    async fn empty_intake_yields_no_result() {
        let dir = tempfile::tempdir().unwrap();
        let result = execute(&opts_for(vec![dir.path().to_path_buf()], true))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn report_renders_counts() {
        let result = BenchmarkResult {
            total_time_ms: 120,
            avg_per_file_ms: 60.0,
            throughput_files_per_sec: 16.7,
            file_count: 2,
            completed_count: 2,
            total_input_bytes: 4096,
            total_output_bytes: 1024,
        };
        let rendered = result.to_string();
        assert!(rendered.contains("2 dispatched, 2 completed"));
        assert!(rendered.contains("4.00 KB in → 1.00 KB out"));
    }
}
