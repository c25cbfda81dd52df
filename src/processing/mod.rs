//! Transformation backends and the batch dispatcher.

mod batch;
pub mod image;
pub mod minify;
pub mod validation;

pub use batch::{BatchConfig, BatchProcessor, BatchSummary};
