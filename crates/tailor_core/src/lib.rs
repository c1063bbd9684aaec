//! Tailor core: pure workflow state machine and view-model helpers.
mod document;
mod effect;
mod export;
mod intake;
mod msg;
mod request;
mod route;
mod slot;
mod state;
mod update;
mod view_model;

pub use document::{DocumentBuffer, EditableDocumentStore};
pub use effect::Effect;
pub use export::{ExportId, ExportTracker, SavedArtifact, EXPORT_FILENAME};
pub use intake::{
    format_size_mb, is_accepted_type, AcceptRule, FileCandidate, FileValidationGate,
    IntakeOutcome, UploadedFile, ACCEPTED_TYPES, DOCX_MIME, MAX_ACCEPTED_FILES, PDF_MIME,
};
pub use msg::Msg;
pub use request::{
    FailureClass, OptimizationFailure, OptimizationOutcome, OptimizationRequest,
    OptimizationRequestController, RequestId, RequestPhase, GENERIC_FAILURE_DETAIL,
};
pub use route::{resolve_route, Route};
pub use slot::InFlightSlot;
pub use state::AppState;
pub use update::update;
pub use view_model::{
    AppViewModel, HeldFileView, EXPORT_BUSY_LABEL, EXPORT_LABEL, SUBMIT_BUSY_LABEL, SUBMIT_LABEL,
};
