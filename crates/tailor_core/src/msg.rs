use crate::{ExportId, FileCandidate, OptimizationFailure, RequestId, Route, SavedArtifact};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User dropped or picked one or more files.
    FilesDropped(Vec<FileCandidate>),
    /// User removed the held file.
    FileCleared,
    /// User edited the job description text.
    JobDescriptionChanged(String),
    /// User flipped the "hide contact details" switch.
    PrivacyToggled(bool),
    /// User pressed the optimize button.
    SubmitClicked,
    /// Transport finished a request.
    OptimizationFinished {
        request_id: RequestId,
        result: Result<String, OptimizationFailure>,
    },
    /// The editable surface lost focus; carries its final content.
    DocumentCommitted(String),
    /// User pressed the download button.
    ExportClicked,
    /// Export pipeline finished. Failures carry a diagnostic string only.
    ExportFinished {
        export_id: ExportId,
        result: Result<SavedArtifact, String>,
    },
    /// User followed a link.
    Navigate(Route),
    /// Fallback for placeholder wiring.
    NoOp,
}
