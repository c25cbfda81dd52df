//! In-memory file registry.
//!
//! Holds every intake file and its lifecycle state for the duration of a
//! run. All pipeline stages go through the registry for state transitions;
//! updates take the lock briefly and the last update wins.

use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;
use uuid::Uuid;
use crate::core::record::{FileRecord, FileState, OutputArtifact};

/// Counts of records per lifecycle state, for rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StateCounts {
    pub pending: usize,
    pub processing: usize,
    pub completed: usize,
    pub error: usize,
}

/// Thread-safe registry of file records, in intake order.
#[derive(Clone, Default)]
pub struct FileRegistry {
    inner: Arc<Mutex<Vec<FileRecord>>>,
}

impl FileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<FileRecord>> {
        // A poisoned lock only means another thread panicked mid-update;
        // the record data itself is still usable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Adds a record, returning its id.
    pub fn add(&self, record: FileRecord) -> Uuid {
        let id = record.id;
        self.lock().push(record);
        id
    }

    /// Adds a batch of records, returning their ids.
    pub fn add_all(&self, records: Vec<FileRecord>) -> Vec<Uuid> {
        let mut guard = self.lock();
        let ids = records.iter().map(|r| r.id).collect();
        guard.extend(records);
        ids
    }

    /// Removes a record by id. Returns true if it existed.
    pub fn remove(&self, id: Uuid) -> bool {
        let mut guard = self.lock();
        let before = guard.len();
        guard.retain(|r| r.id != id);
        guard.len() != before
    }

    /// Sets the WebP conversion option on an image record.
    ///
    /// A no-op on text records, mirroring the original toggle which only
    /// applied to image items. Returns true if the option was changed.
    pub fn set_convert_to_webp(&self, id: Uuid, convert: bool) -> bool {
        let mut guard = self.lock();
        match guard.iter_mut().find(|r| r.id == id) {
            Some(record) if record.kind.is_image() => {
                record.options.convert_to_webp = convert;
                true
            }
            _ => false,
        }
    }

    /// Sets the re-encode quality on an image record.
    pub fn set_quality(&self, id: Uuid, quality: u8) -> bool {
        let mut guard = self.lock();
        match guard.iter_mut().find(|r| r.id == id) {
            Some(record) if record.kind.is_image() => {
                record.options.quality = quality;
                true
            }
            _ => false,
        }
    }

    /// Snapshot of every record, in intake order.
    pub fn snapshot(&self) -> Vec<FileRecord> {
        self.lock().clone()
    }

    /// Records eligible for dispatch: pending ones plus errored ones
    /// (errored records are retried).
    pub fn dispatchable(&self) -> Vec<FileRecord> {
        self.lock()
            .iter()
            .filter(|r| r.state.is_dispatchable())
            .cloned()
            .collect()
    }

    pub fn get(&self, id: Uuid) -> Option<FileRecord> {
        self.lock().iter().find(|r| r.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Marks a record as processing, clearing any previous error.
    pub fn mark_processing(&self, id: Uuid) {
        self.set_state(id, FileState::Processing);
    }

    /// Marks a record as completed with its artifact.
    pub fn complete(&self, id: Uuid, artifact: OutputArtifact) {
        self.set_state(id, FileState::Completed { result: artifact });
    }

    /// Marks a record as errored with a message.
    pub fn fail(&self, id: Uuid, message: impl Into<String>) {
        let message = message.into();
        debug!("record {} failed: {}", id, message);
        self.set_state(id, FileState::Error { message });
    }

    fn set_state(&self, id: Uuid, state: FileState) {
        let mut guard = self.lock();
        if let Some(record) = guard.iter_mut().find(|r| r.id == id) {
            record.state = state;
        }
    }

    /// Per-state record counts.
    pub fn counts(&self) -> StateCounts {
        let guard = self.lock();
        let mut counts = StateCounts::default();
        for record in guard.iter() {
            match record.state {
                FileState::Pending => counts.pending += 1,
                FileState::Processing => counts.processing += 1,
                FileState::Completed { .. } => counts.completed += 1,
                FileState::Error { .. } => counts.error += 1,
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{FileKind, ImageFormat};

    fn js_record(name: &str) -> FileRecord {
        FileRecord::new(format!("/tmp/{name}"), FileKind::Js, 100)
    }

    fn png_record(name: &str) -> FileRecord {
        FileRecord::new(
            format!("/tmp/{name}"),
            FileKind::Image(ImageFormat::Png),
            100,
        )
    }

    fn artifact() -> OutputArtifact {
        OutputArtifact {
            file_name: "out.min.js".into(),
            data: b"x".to_vec(),
            original_size: 100,
            new_size: 1,
        }
    }

    #[test]
    fn add_and_remove() {
        let registry = FileRegistry::new();
        let id = registry.add(js_record("a.js"));
        registry.add(js_record("b.js"));
        assert_eq!(registry.len(), 2);

        assert!(registry.remove(id));
        assert!(!registry.remove(id));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn lifecycle_transitions() {
        let registry = FileRegistry::new();
        let id = registry.add(js_record("a.js"));

        registry.mark_processing(id);
        assert_eq!(registry.get(id).unwrap().state.label(), "processing");

        registry.complete(id, artifact());
        let record = registry.get(id).unwrap();
        assert!(record.state.is_completed());
        match record.state {
            FileState::Completed { result } => assert_eq!(result.new_size, 1),
            other => panic!("unexpected state: {:?}", other),
        }
    }

    #[test]
    fn dispatch_picks_pending_and_errored() {
        let registry = FileRegistry::new();
        let done = registry.add(js_record("done.js"));
        let failed = registry.add(js_record("failed.js"));
        let fresh = registry.add(js_record("fresh.js"));

        registry.complete(done, artifact());
        registry.fail(failed, "invalid css");

        let ids: Vec<_> = registry.dispatchable().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![failed, fresh]);
    }

    #[test]
    fn retry_clears_error() {
        let registry = FileRegistry::new();
        let id = registry.add(js_record("a.js"));
        registry.fail(id, "boom");

        registry.mark_processing(id);
        assert!(matches!(
            registry.get(id).unwrap().state,
            FileState::Processing
        ));
    }

    #[test]
    fn webp_toggle_only_applies_to_images() {
        let registry = FileRegistry::new();
        let text = registry.add(js_record("a.js"));
        let img = registry.add(png_record("icon.png"));

        assert!(!registry.set_convert_to_webp(text, true));
        assert!(registry.set_convert_to_webp(img, true));
        assert!(registry.get(img).unwrap().options.convert_to_webp);
        assert!(!registry.get(text).unwrap().options.convert_to_webp);
    }

    #[test]
    fn counts_by_state() {
        let registry = FileRegistry::new();
        let a = registry.add(js_record("a.js"));
        registry.add(js_record("b.js"));
        let c = registry.add(js_record("c.js"));

        registry.complete(a, artifact());
        registry.fail(c, "boom");

        let counts = registry.counts();
        assert_eq!(counts.pending, 1);
        assert_eq!(counts.completed, 1);
        assert_eq!(counts.error, 1);
        assert_eq!(counts.processing, 0);
    }
}
