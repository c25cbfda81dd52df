//! Core types and registry state.
//!
//! This module contains the fundamental types used throughout the pipeline:
//! - [`FileRecord`]: a tracked intake file and its lifecycle state
//! - [`FileRegistry`]: the in-memory registry all stages transition through
//! - [`OutputArtifact`]: the result of a successful transformation
//! - [`ProgressEvent`]: progress reporting for batch dispatch

mod progress;
mod record;
mod registry;

pub use progress::{ProgressEvent, ProgressKind};
pub use record::{FileRecord, FileState, ImageOptions, OutputArtifact};
pub use registry::{FileRegistry, StateCounts};
