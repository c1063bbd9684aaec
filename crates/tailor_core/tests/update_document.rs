use std::path::PathBuf;
use std::sync::Once;

use pretty_assertions::assert_eq;
use tailor_core::{
    update, AppState, EditableDocumentStore, Effect, FileCandidate, Msg, Route, SavedArtifact,
    EXPORT_BUSY_LABEL, EXPORT_FILENAME, EXPORT_LABEL, PDF_MIME,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(tailor_logging::initialize_for_tests);
}

fn with_document(html: &str) -> AppState {
    let candidate = FileCandidate {
        name: "resume.pdf".to_string(),
        size_bytes: 10,
        mime_type: PDF_MIME.to_string(),
        path: PathBuf::from("resume.pdf"),
    };
    let (state, _) = update(AppState::new(), Msg::FilesDropped(vec![candidate]));
    let (state, _) = update(state, Msg::JobDescriptionChanged("Engineer".to_string()));
    let (state, _) = update(state, Msg::SubmitClicked);
    let (mut state, _) = update(
        state,
        Msg::OptimizationFinished {
            request_id: 1,
            result: Ok(html.to_string()),
        },
    );
    state.consume_dirty();
    state
}

fn export_id(effects: &[Effect]) -> u64 {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::ExportDocument { export_id, .. } => Some(*export_id),
            _ => None,
        })
        .expect("export effect")
}

#[test]
fn store_starts_empty_and_ignores_commits_before_initialization() {
    let mut store = EditableDocumentStore::new();
    assert_eq!(store.current_content(), None);
    assert!(!store.commit("<p>orphan</p>".to_string()));
    assert_eq!(store.current_content(), None);
}

#[test]
fn initialization_replaces_prior_content_outright() {
    let mut store = EditableDocumentStore::new();
    store.initialize("<div>first</div>".to_string());
    store.commit("<div>edited</div>".to_string());
    store.initialize("<div>second</div>".to_string());
    assert_eq!(store.current_content(), Some("<div>second</div>"));
}

#[test]
fn success_payload_becomes_document_verbatim() {
    init_logging();
    let html = "<div class=\"cv\">\n  <h1>Ada</h1>&nbsp;<p>unclosed\n</div>";
    let state = with_document(html);
    assert_eq!(state.view().document.as_deref(), Some(html));
    assert_eq!(state.view().route, Route::Result);
}

#[test]
fn commit_overwrites_and_is_idempotent() {
    init_logging();
    let state = with_document("<div>original</div>");

    let (mut state, _) = update(state, Msg::DocumentCommitted("<div>edited</div>".to_string()));
    assert!(state.consume_dirty());
    assert_eq!(state.store().current_content(), Some("<div>edited</div>"));

    let (mut state, _) = update(state, Msg::DocumentCommitted("<div>edited</div>".to_string()));
    assert!(!state.consume_dirty());
    assert_eq!(state.store().current_content(), Some("<div>edited</div>"));
}

#[test]
fn export_reads_the_latest_commit() {
    init_logging();
    let state = with_document("<div>original</div>");
    let (state, _) = update(state, Msg::DocumentCommitted("<div>final</div>".to_string()));
    let (state, effects) = update(state, Msg::ExportClicked);

    assert_eq!(
        effects,
        vec![Effect::ExportDocument {
            export_id: 1,
            html: "<div>final</div>".to_string(),
        }]
    );
    let view = state.view();
    assert!(view.export_busy);
    assert_eq!(view.export_label, EXPORT_BUSY_LABEL);
}

#[test]
fn export_while_busy_does_not_start_a_second_render() {
    init_logging();
    let state = with_document("<div>cv</div>");
    let (state, first) = update(state, Msg::ExportClicked);
    let (state, second) = update(state, Msg::ExportClicked);

    assert_eq!(first.len(), 1);
    assert!(second.is_empty());
    assert!(state.exports().is_busy());
}

#[test]
fn export_completion_clears_busy_and_records_artifact() {
    init_logging();
    let state = with_document("<div>cv</div>");
    let (state, effects) = update(state, Msg::ExportClicked);
    let id = export_id(&effects);
    let saved = SavedArtifact {
        path: PathBuf::from("out").join(EXPORT_FILENAME),
        page_count: 1,
    };

    let (state, _) = update(
        state,
        Msg::ExportFinished {
            export_id: id,
            result: Ok(saved.clone()),
        },
    );
    let view = state.view();
    assert!(!view.export_busy);
    assert_eq!(view.export_label, EXPORT_LABEL);
    assert_eq!(view.last_export, Some(saved));
}

#[test]
fn export_failure_only_clears_busy_and_leaves_document() {
    init_logging();
    let state = with_document("<div>cv</div>");
    let (state, effects) = update(state, Msg::ExportClicked);
    let id = export_id(&effects);

    let (state, _) = update(
        state,
        Msg::ExportFinished {
            export_id: id,
            result: Err("rasterizer crashed".to_string()),
        },
    );
    let view = state.view();
    assert!(!view.export_busy);
    assert_eq!(view.last_export, None);
    assert_eq!(view.document.as_deref(), Some("<div>cv</div>"));

    let (_state, effects) = update(state, Msg::ExportClicked);
    assert_eq!(export_id(&effects), id + 1);
}

#[test]
fn export_without_document_is_ignored() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::ExportClicked);
    assert!(effects.is_empty());
    assert!(!state.exports().is_busy());
}

#[test]
fn result_route_redirects_to_entry_without_document() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Navigate(Route::Result));
    assert_eq!(state.view().route, Route::Entry);

    let state = with_document("<div>cv</div>");
    let (state, _) = update(state, Msg::Navigate(Route::Entry));
    assert_eq!(state.view().route, Route::Entry);
    assert!(state.view().document.is_some());
    let (state, _) = update(state, Msg::Navigate(Route::Result));
    assert_eq!(state.view().route, Route::Result);
}
