/// Client-observable views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    /// Intake: file drop, job description, privacy toggle.
    #[default]
    Entry,
    Optimize,
    Result,
}

/// The result view is only reachable once a document exists.
pub fn resolve_route(requested: Route, has_document: bool) -> Route {
    match requested {
        Route::Result if !has_document => Route::Entry,
        other => other,
    }
}
