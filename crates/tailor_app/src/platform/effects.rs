use std::time::Duration;

use tailor_core::{
    Effect, FailureClass, FileCandidate, Msg, OptimizationFailure, OptimizationRequest, Route,
    SavedArtifact,
};
use tailor_engine::{
    EngineError, EngineEvent, EngineHandle, FailureKind, LocalFile, OptimizeError, OptimizePayload,
};
use tailor_logging::{tailor_debug, tailor_info};

/// Executes core effects on the engine and turns engine events back into
/// messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    /// Runs `effects`, returning the routes the core asked to navigate to.
    pub fn run(&self, effects: Vec<Effect>) -> Vec<Route> {
        let mut routes = Vec::new();
        for effect in effects {
            match effect {
                Effect::SubmitOptimization {
                    request_id,
                    request,
                } => {
                    tailor_info!(
                        "SubmitOptimization request_id={} file={} job_chars={}",
                        request_id,
                        request.file().name(),
                        request.job_description().chars().count()
                    );
                    self.engine
                        .submit_optimization(request_id, payload_for(&request));
                }
                Effect::NavigateTo(route) => {
                    tailor_debug!("NavigateTo {:?}", route);
                    routes.push(route);
                }
                Effect::ExportDocument { export_id, html } => {
                    tailor_info!("ExportDocument export_id={} html_len={}", export_id, html.len());
                    self.engine.export(export_id, html);
                }
            }
        }
        routes
    }

    /// Next engine result as a message; `Ok(None)` when `timeout` passes.
    pub fn next_msg(&self, timeout: Duration) -> Result<Option<Msg>, EngineError> {
        Ok(self.engine.wait_event(timeout)?.map(msg_for_event))
    }
}

pub fn candidate_for(file: LocalFile) -> FileCandidate {
    FileCandidate {
        name: file.name,
        size_bytes: file.size_bytes,
        mime_type: file.mime_type,
        path: file.path,
    }
}

fn payload_for(request: &OptimizationRequest) -> OptimizePayload {
    let file = request.file();
    OptimizePayload {
        file_name: file.name().to_string(),
        file_path: file.path().to_path_buf(),
        mime_type: file.mime_type().to_string(),
        job_description: request.job_description().to_string(),
        hide_contact_details: request.hide_contact_details(),
    }
}

fn msg_for_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::OptimizationCompleted { request_id, result } => Msg::OptimizationFinished {
            request_id,
            result: result.map_err(|err| failure_for(&err)),
        },
        EngineEvent::ExportCompleted { export_id, result } => Msg::ExportFinished {
            export_id,
            result: result
                .map(|receipt| SavedArtifact {
                    path: receipt.path,
                    page_count: receipt.page_count,
                })
                .map_err(|err| err.to_string()),
        },
    }
}

fn failure_for(err: &OptimizeError) -> OptimizationFailure {
    let class = match err.kind {
        FailureKind::Timeout => FailureClass::Timeout,
        FailureKind::HttpStatus(code) => FailureClass::Rejected(code),
        FailureKind::MalformedResponse => FailureClass::Malformed,
        FailureKind::Io | FailureKind::InvalidPayload | FailureKind::InvalidUrl => {
            FailureClass::Local
        }
        FailureKind::Network | FailureKind::TooLarge { .. } => FailureClass::Network,
    };
    OptimizationFailure::new(class, err.detail.clone())
}
