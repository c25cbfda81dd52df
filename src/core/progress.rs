use serde::Serialize;

/// Progress event type
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ProgressKind {
    Start,
    FileCompleted,
    FileFailed,
    Complete,
}

/// Progress event emitted by the dispatcher after each file settles.
///
/// Consumed by the terminal renderer; serializable so a JSON consumer gets
/// the same payload shape as the rest of the outward-facing types.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent {
    pub kind: ProgressKind,
    /// Number of settled files (completed or failed)
    pub completed_tasks: usize,
    /// Total number of files in the dispatch
    pub total_tasks: usize,
    /// Progress percentage (0-100)
    pub progress_percentage: usize,
    /// File the event refers to, absent for batch-level events
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    /// Status or error message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ProgressEvent {
    pub fn new(kind: ProgressKind, completed_tasks: usize, total_tasks: usize) -> Self {
        let progress_percentage = if total_tasks > 0 {
            (completed_tasks * 100) / total_tasks
        } else {
            0
        };

        Self {
            kind,
            completed_tasks,
            total_tasks,
            progress_percentage,
            file_name: None,
            message: None,
        }
    }

    pub fn with_file(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}
