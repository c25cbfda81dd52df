//! Per-file record and lifecycle state.

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::utils::{extract_filename, FileKind};

/// Result of a successful transformation.
///
/// Holds the output bytes in memory until export, the way the original kept
/// a downloadable blob per completed file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputArtifact {
    /// Suggested output file name (`bundle.min.js`, `photo.webp`, ...)
    pub file_name: String,
    /// Transformed bytes, written out on export
    #[serde(skip)]
    pub data: Vec<u8>,
    /// Original file size in bytes
    pub original_size: u64,
    /// Transformed size in bytes
    pub new_size: u64,
}

impl OutputArtifact {
    /// Bytes saved (negative if the output grew).
    pub fn saved_bytes(&self) -> i64 {
        self.original_size as i64 - self.new_size as i64
    }

    /// Savings as a percentage of the original size.
    pub fn compression_ratio(&self) -> f64 {
        if self.original_size > 0 {
            self.saved_bytes() as f64 / self.original_size as f64 * 100.0
        } else {
            0.0
        }
    }
}

/// Lifecycle state of a file record.
///
/// The transformation result lives inside the `Completed` variant, so a
/// result exists exactly when a record is completed.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum FileState {
    Pending,
    Processing,
    Completed { result: OutputArtifact },
    Error { message: String },
}

impl FileState {
    /// Pending and errored records are picked up by the next dispatch,
    /// which is how errored items get retried.
    pub fn is_dispatchable(&self) -> bool {
        matches!(self, Self::Pending | Self::Error { .. })
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    /// Short label for rendering.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed { .. } => "completed",
            Self::Error { .. } => "error",
        }
    }
}

/// Per-kind options for a record.
///
/// Only meaningful for raster inputs; the dispatcher ignores these for text
/// records.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageOptions {
    /// Convert the output to WebP and rename the artifact accordingly
    pub convert_to_webp: bool,
    /// Re-encode quality (1-100), applied to lossy formats
    pub quality: u8,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            convert_to_webp: false,
            quality: 80,
        }
    }
}

/// A single file tracked by the registry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub id: Uuid,
    /// Path to the source file
    pub path: PathBuf,
    /// File name component, kept separate for rendering and artifact naming
    pub file_name: String,
    /// Classified kind (routing key for the dispatcher)
    pub kind: FileKind,
    /// Source size in bytes
    pub size: u64,
    pub options: ImageOptions,
    #[serde(flatten)]
    pub state: FileState,
}

impl FileRecord {
    /// Creates a new pending record for a classified file.
    pub fn new(path: impl AsRef<Path>, kind: FileKind, size: u64) -> Self {
        let path = path.as_ref().to_path_buf();
        let file_name = extract_filename(&path);
        Self {
            id: Uuid::new_v4(),
            path,
            file_name,
            kind,
            size,
            options: ImageOptions::default(),
            state: FileState::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_is_pending() {
        let record = FileRecord::new("/tmp/app.js", FileKind::Js, 42);
        assert!(matches!(record.state, FileState::Pending));
        assert_eq!(record.file_name, "app.js");
        assert!(!record.options.convert_to_webp);
    }

    #[test]
    fn dispatchable_states() {
        assert!(FileState::Pending.is_dispatchable());
        assert!(FileState::Error { message: "boom".into() }.is_dispatchable());
        assert!(!FileState::Processing.is_dispatchable());
        let completed = FileState::Completed {
            result: OutputArtifact {
                file_name: "a.min.js".into(),
                data: vec![],
                original_size: 10,
                new_size: 5,
            },
        };
        assert!(!completed.is_dispatchable());
    }

    #[test]
    fn artifact_savings() {
        let artifact = OutputArtifact {
            file_name: "a.min.js".into(),
            data: vec![],
            original_size: 200,
            new_size: 50,
        };
        assert_eq!(artifact.saved_bytes(), 150);
        assert!((artifact.compression_ratio() - 75.0).abs() < f64::EPSILON);

        let grew = OutputArtifact {
            file_name: "tiny.png".into(),
            data: vec![],
            original_size: 10,
            new_size: 30,
        };
        assert_eq!(grew.saved_bytes(), -20);
    }
}
