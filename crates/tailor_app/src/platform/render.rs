use tailor_core::{AppViewModel, RequestPhase, Route};

/// Text rendering of the view model, one screen per call.
pub fn render(view: &AppViewModel) -> String {
    let mut lines = Vec::new();
    match view.route {
        Route::Entry | Route::Optimize => render_intake(view, &mut lines),
        Route::Result => render_result(view, &mut lines),
    }
    lines.join("\n")
}

fn render_intake(view: &AppViewModel, lines: &mut Vec<String>) {
    match &view.held_file {
        Some(file) => lines.push(format!("Resume: {} ({})", file.name, file.size_label)),
        None => lines.push("Resume: none (PDF or DOCX)".to_string()),
    }
    lines.push(format!(
        "Job description: {} characters",
        view.job_description_chars
    ));
    lines.push(format!(
        "Hide contact details: {}",
        if view.hide_contact_details { "on" } else { "off" }
    ));
    let marker = if view.can_submit { "" } else { " (disabled)" };
    lines.push(format!("[{}]{}", view.submit_label, marker));
    match &view.request {
        RequestPhase::Error(detail) => lines.push(format!("Error: {detail}")),
        RequestPhase::Success if view.document.is_some() => {
            lines.push("Optimized resume available.".to_string())
        }
        _ => {}
    }
}

fn render_result(view: &AppViewModel, lines: &mut Vec<String>) {
    let chars = view.document.as_deref().map_or(0, |doc| doc.chars().count());
    lines.push(format!("Optimized resume ({chars} characters of markup)"));
    lines.push(format!("[{}]", view.export_label));
    if let Some(saved) = &view.last_export {
        lines.push(format!(
            "Saved {} ({} page(s))",
            saved.path.display(),
            saved.page_count
        ));
    }
}
