pub mod error;
pub mod formats;
pub mod fs;

pub use error::{OptimizerError, OptimizerResult, PathError, ValidationError};
pub use formats::{FileKind, ImageFormat};
pub use fs::{base_name, extract_filename};
