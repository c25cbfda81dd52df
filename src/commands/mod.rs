//! Subcommand entry points for the CLI.
//!
//! This module exposes the operations wired from `main`:
//! - [`optimize::run`]: intake, batch dispatch, export and summary
//! - [`bench::run`]: the same pipeline, timed and without export

pub mod bench;
pub mod optimize;

pub use bench::BenchmarkResult;
