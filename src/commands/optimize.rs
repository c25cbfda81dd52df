//! End-to-end optimize operation: intake → dispatch → export → summary.

use indicatif::ProgressBar;
use tracing::{debug, info};

use crate::cli::OptimizeOpts;
use crate::core::FileRegistry;
use crate::processing::{validation, BatchConfig, BatchProcessor};
use crate::utils::{OptimizerError, OptimizerResult};
use crate::{export, intake, report};

pub async fn run(opts: OptimizeOpts) -> OptimizerResult<()> {
    validation::validate_quality(opts.quality)?;

    let intake_opts = intake::IntakeOptions {
        max_size_bytes: opts.max_size_mb * 1024 * 1024,
        recursive: opts.recursive,
    };
    let summary = intake::collect(&opts.paths, &intake_opts).await?;
    if summary.skipped_unsupported + summary.skipped_oversized > 0 {
        info!(
            "Skipped {} unsupported and {} oversized file(s)",
            summary.skipped_unsupported, summary.skipped_oversized
        );
    }
    if summary.records.is_empty() {
        info!("No supported files found");
        return Ok(());
    }

    let registry = FileRegistry::new();
    let ids = registry.add_all(summary.records);
    for id in &ids {
        registry.set_quality(*id, opts.quality);
        if opts.webp {
            registry.set_convert_to_webp(*id, true);
        }
    }
    debug!("{} record(s) registered", registry.len());

    let config = opts
        .jobs
        .map(|jobs| BatchConfig {
            concurrency: jobs.max(1),
        })
        .unwrap_or_default();
    let processor = BatchProcessor::with_config(registry.clone(), config);

    // The summary carries the failure detail, so the bar stays quiet in
    // JSON mode.
    let bar = if opts.json {
        ProgressBar::hidden()
    } else {
        report::batch_progress_bar(registry.len() as u64)
    };
    let batch = processor
        .process(|event| report::apply_progress(&bar, &event))
        .await;
    bar.finish_and_clear();

    let written = export::export_completed(&registry, &opts.out_dir).await?;

    let summary = report::SummaryReport::new(registry.snapshot());
    if opts.json {
        let json = summary
            .to_json()
            .map_err(|e| OptimizerError::io(e.to_string()))?;
        println!("{json}");
    } else {
        print!("{summary}");
        if !written.is_empty() {
            println!(
                "{} artifact(s) written to {}",
                written.len(),
                opts.out_dir.display()
            );
        }
    }

    if !batch.failed.is_empty() {
        info!(
            "{} file(s) failed; run again to retry them",
            batch.failed.len()
        );
    }
    Ok(())
}
