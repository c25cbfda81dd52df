// Module declarations in dependency order
pub mod utils;
pub mod core;
pub mod intake;
pub mod processing;
pub mod export;
pub mod report;
pub mod cli;
pub mod commands;

// Public exports for external consumers
pub use core::{FileRecord, FileRegistry, FileState, ImageOptions, OutputArtifact};
pub use processing::{BatchConfig, BatchProcessor, BatchSummary};
pub use utils::{FileKind, ImageFormat, OptimizerError, OptimizerResult};

// This library file is used as a public API for consuming this crate as a library.
// The actual application entry point is in main.rs.
