use tailor_logging::{tailor_debug, tailor_error, tailor_info};

use crate::{resolve_route, AppState, Effect, IntakeOutcome, Msg, Route};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let pending = state.controller.is_pending();
    let effects = match msg {
        // Intake controls are disabled while a request is in flight.
        Msg::FilesDropped(_)
        | Msg::FileCleared
        | Msg::JobDescriptionChanged(_)
        | Msg::PrivacyToggled(_)
            if pending =>
        {
            tailor_debug!("input ignored while request is pending");
            Vec::new()
        }
        Msg::FilesDropped(candidates) => {
            match state.gate.submit(candidates) {
                IntakeOutcome::Accepted { file, dropped } => {
                    tailor_info!("holding {:?} ({} dropped)", file.name(), dropped);
                    state.mark_dirty();
                }
                IntakeOutcome::Rejected { dropped } => {
                    tailor_debug!("intake rejected all {} candidate(s)", dropped);
                }
            }
            Vec::new()
        }
        Msg::FileCleared => {
            if state.gate.clear() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::JobDescriptionChanged(text) => {
            if state.job_description != text {
                state.job_description = text;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::PrivacyToggled(hide) => {
            if state.hide_contact_details != hide {
                state.hide_contact_details = hide;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SubmitClicked => {
            let submitted = state.controller.submit(
                state.gate.held(),
                &state.job_description,
                state.hide_contact_details,
            );
            match submitted {
                Some((request_id, request)) => {
                    state.route = Route::Optimize;
                    state.mark_dirty();
                    vec![Effect::SubmitOptimization {
                        request_id,
                        request,
                    }]
                }
                None => Vec::new(),
            }
        }
        Msg::OptimizationFinished { request_id, result } => {
            match state.controller.resolve(request_id, result) {
                Some(html) => {
                    state.store.initialize(html);
                    state.route = Route::Result;
                    state.mark_dirty();
                    vec![Effect::NavigateTo(Route::Result)]
                }
                None => {
                    // Settled with an error, as opposed to a stale completion.
                    if pending && !state.controller.is_pending() {
                        state.mark_dirty();
                    }
                    Vec::new()
                }
            }
        }
        Msg::DocumentCommitted(html) => {
            if state.store.commit(html) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ExportClicked => {
            let Some(html) = state.store.current_content().map(ToOwned::to_owned) else {
                return (state, Vec::new());
            };
            match state.exports.begin() {
                Some(export_id) => {
                    tailor_info!("export {} started", export_id);
                    state.mark_dirty();
                    vec![Effect::ExportDocument { export_id, html }]
                }
                None => {
                    tailor_debug!("export ignored: another export is running");
                    Vec::new()
                }
            }
        }
        Msg::ExportFinished { export_id, result } => {
            let saved = match result {
                Ok(saved) => {
                    tailor_info!(
                        "export {} saved {} ({} page(s))",
                        export_id,
                        saved.path.display(),
                        saved.page_count
                    );
                    Some(saved)
                }
                Err(reason) => {
                    tailor_error!("export {} failed: {}", export_id, reason);
                    None
                }
            };
            if state.exports.finish(export_id, saved) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::Navigate(requested) => {
            let next = resolve_route(requested, state.store.has_document());
            if state.route != next {
                state.route = next;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
