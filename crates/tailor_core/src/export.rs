use std::path::PathBuf;

use crate::slot::InFlightSlot;

pub type ExportId = u64;

/// Default name of the saved artifact.
pub const EXPORT_FILENAME: &str = "optimized_resume.pdf";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedArtifact {
    pub path: PathBuf,
    pub page_count: usize,
}

/// Tracks the single export that may run at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExportTracker {
    slot: InFlightSlot,
    last_saved: Option<SavedArtifact>,
}

impl ExportTracker {
    pub fn is_busy(&self) -> bool {
        self.slot.is_busy()
    }

    pub fn last_saved(&self) -> Option<&SavedArtifact> {
        self.last_saved.as_ref()
    }

    pub(crate) fn begin(&mut self) -> Option<ExportId> {
        self.slot.try_acquire()
    }

    /// Clears the busy state for `export_id`. Returns false for stale ids.
    pub(crate) fn finish(&mut self, export_id: ExportId, saved: Option<SavedArtifact>) -> bool {
        if !self.slot.release(export_id) {
            return false;
        }
        if saved.is_some() {
            self.last_saved = saved;
        }
        true
    }
}
