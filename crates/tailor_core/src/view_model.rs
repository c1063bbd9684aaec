use crate::{RequestPhase, Route, SavedArtifact};

pub const SUBMIT_LABEL: &str = "Generate Optimized Resume";
pub const SUBMIT_BUSY_LABEL: &str = "Optimizing...";
pub const EXPORT_LABEL: &str = "Download PDF";
pub const EXPORT_BUSY_LABEL: &str = "Generating PDF...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeldFileView {
    pub name: String,
    pub size_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub route: Route,
    pub held_file: Option<HeldFileView>,
    pub job_description_chars: usize,
    pub hide_contact_details: bool,
    pub inputs_enabled: bool,
    pub can_submit: bool,
    pub submit_label: &'static str,
    pub request: RequestPhase,
    pub document: Option<String>,
    pub export_busy: bool,
    pub export_label: &'static str,
    pub last_export: Option<SavedArtifact>,
    pub dirty: bool,
}
