use crate::intake::format_size_mb;
use crate::view_model::{
    AppViewModel, HeldFileView, EXPORT_BUSY_LABEL, EXPORT_LABEL, SUBMIT_BUSY_LABEL, SUBMIT_LABEL,
};
use crate::{
    resolve_route, EditableDocumentStore, ExportTracker, FileValidationGate,
    OptimizationRequest, OptimizationRequestController, Route,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub(crate) gate: FileValidationGate,
    pub(crate) job_description: String,
    pub(crate) hide_contact_details: bool,
    pub(crate) controller: OptimizationRequestController,
    pub(crate) store: EditableDocumentStore,
    pub(crate) exports: ExportTracker,
    pub(crate) route: Route,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            gate: FileValidationGate::new(),
            job_description: String::new(),
            hide_contact_details: true,
            controller: OptimizationRequestController::new(),
            store: EditableDocumentStore::new(),
            exports: ExportTracker::default(),
            route: Route::Entry,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gate(&self) -> &FileValidationGate {
        &self.gate
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    pub fn hide_contact_details(&self) -> bool {
        self.hide_contact_details
    }

    pub fn controller(&self) -> &OptimizationRequestController {
        &self.controller
    }

    pub fn submitted_request(&self) -> Option<&OptimizationRequest> {
        self.controller.submitted()
    }

    pub fn store(&self) -> &EditableDocumentStore {
        &self.store
    }

    pub fn exports(&self) -> &ExportTracker {
        &self.exports
    }

    pub fn route(&self) -> Route {
        resolve_route(self.route, self.store.has_document())
    }

    pub fn can_submit(&self) -> bool {
        self.controller
            .can_submit(self.gate.held(), &self.job_description)
    }

    pub fn view(&self) -> AppViewModel {
        let pending = self.controller.is_pending();
        let export_busy = self.exports.is_busy();
        AppViewModel {
            route: self.route(),
            held_file: self.gate.held().map(|file| HeldFileView {
                name: file.name().to_string(),
                size_label: format_size_mb(file.size_bytes()),
            }),
            job_description_chars: self.job_description.chars().count(),
            hide_contact_details: self.hide_contact_details,
            inputs_enabled: !pending,
            can_submit: self.can_submit(),
            submit_label: if pending { SUBMIT_BUSY_LABEL } else { SUBMIT_LABEL },
            request: self.controller.phase(),
            document: self.store.current_content().map(ToOwned::to_owned),
            export_busy,
            export_label: if export_busy { EXPORT_BUSY_LABEL } else { EXPORT_LABEL },
            last_export: self.exports.last_saved().cloned(),
            dirty: self.dirty,
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether anything observable changed since the last call, and
    /// resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
