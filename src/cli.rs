//! Command-line definitions.

use std::path::PathBuf;
use clap::{Args, Parser, Subcommand};

use crate::intake::MAX_FILE_SIZE_MB;

/// Local batch asset optimizer: minify JS/CSS, recompress PNG/JPEG.
#[derive(Parser, Debug)]
#[command(name = "minimate")]
#[command(about = "Minify JavaScript/CSS and recompress PNG/JPEG locally")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Optimize files and write the results to an output directory
    Optimize(OptimizeOpts),
    /// Run the pipeline without writing outputs and report throughput
    Bench(BenchOpts),
}

#[derive(Args, Debug, Clone)]
pub struct OptimizeOpts {
    /// Files or directories to optimize
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Output directory for optimized artifacts
    #[arg(short, long, default_value = "optimized")]
    pub out_dir: PathBuf,

    /// Convert raster images to WebP
    #[arg(long)]
    pub webp: bool,

    /// Re-encode quality for lossy formats (1-100)
    #[arg(short, long, default_value_t = 80)]
    pub quality: u8,

    /// Scan directories recursively
    #[arg(short, long)]
    pub recursive: bool,

    /// Maximum number of files processed at once (defaults to CPU count)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Skip files larger than this many megabytes
    #[arg(long, default_value_t = MAX_FILE_SIZE_MB)]
    pub max_size_mb: u64,

    /// Print the final registry snapshot as JSON instead of the summary
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct BenchOpts {
    /// Files or directories to run through the pipeline
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Convert raster images to WebP
    #[arg(long)]
    pub webp: bool,

    /// Re-encode quality for lossy formats (1-100)
    #[arg(short, long, default_value_t = 80)]
    pub quality: u8,

    /// Scan directories recursively
    #[arg(short, long)]
    pub recursive: bool,

    /// Maximum number of files processed at once (defaults to CPU count)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Print the benchmark result as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_optimize_defaults() {
        let cli = Cli::try_parse_from(["minimate", "optimize", "assets/"]).unwrap();
        match cli.command {
            Command::Optimize(opts) => {
                assert_eq!(opts.paths, vec![PathBuf::from("assets/")]);
                assert_eq!(opts.out_dir, PathBuf::from("optimized"));
                assert_eq!(opts.quality, 80);
                assert_eq!(opts.max_size_mb, MAX_FILE_SIZE_MB);
                assert!(!opts.webp);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn requires_paths() {
        assert!(Cli::try_parse_from(["minimate", "optimize"]).is_err());
    }

    #[test]
    fn parses_bench_flags() {
        let cli =
            Cli::try_parse_from(["minimate", "bench", "--webp", "-j", "2", "a.png"]).unwrap();
        match cli.command {
            Command::Bench(opts) => {
                assert!(opts.webp);
                assert_eq!(opts.jobs, Some(2));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
