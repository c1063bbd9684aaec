use std::path::PathBuf;
use std::sync::Once;

use tailor_core::{
    update, AppState, FileCandidate, FileValidationGate, IntakeOutcome, Msg, DOCX_MIME, PDF_MIME,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(tailor_logging::initialize_for_tests);
}

fn candidate(name: &str, mime: &str) -> FileCandidate {
    FileCandidate {
        name: name.to_string(),
        size_bytes: 2048,
        mime_type: mime.to_string(),
        path: PathBuf::from(format!("/tmp/{name}")),
    }
}

#[test]
fn accepted_drop_is_held() {
    init_logging();
    let mut gate = FileValidationGate::new();
    let outcome = gate.submit(vec![candidate("resume.pdf", PDF_MIME)]);

    assert!(matches!(outcome, IntakeOutcome::Accepted { dropped: 0, .. }));
    assert_eq!(gate.held().map(|f| f.name()), Some("resume.pdf"));
}

#[test]
fn later_drop_replaces_held_file() {
    init_logging();
    let mut gate = FileValidationGate::new();
    gate.submit(vec![candidate("first.pdf", PDF_MIME)]);
    gate.submit(vec![candidate("second.docx", DOCX_MIME)]);

    let held = gate.held().unwrap();
    assert_eq!(held.name(), "second.docx");
    assert_eq!(held.mime_type(), DOCX_MIME);
}

#[test]
fn unsupported_drop_is_silently_rejected_and_keeps_held_file() {
    init_logging();
    let mut gate = FileValidationGate::new();
    assert_eq!(
        gate.submit(vec![candidate("resume.exe", "application/x-msdownload")]),
        IntakeOutcome::Rejected { dropped: 1 }
    );
    assert!(gate.held().is_none());

    gate.submit(vec![candidate("resume.pdf", PDF_MIME)]);
    gate.submit(vec![candidate("photo.png", "image/png")]);
    assert_eq!(gate.held().map(|f| f.name()), Some("resume.pdf"));
}

#[test]
fn multi_file_batch_truncates_to_one() {
    init_logging();
    let mut gate = FileValidationGate::new();
    let outcome = gate.submit(vec![
        candidate("notes.txt", "text/plain"),
        candidate("a.pdf", PDF_MIME),
        candidate("b.docx", DOCX_MIME),
    ]);

    match outcome {
        IntakeOutcome::Accepted { file, dropped } => {
            assert_eq!(file.name(), "a.pdf");
            assert_eq!(dropped, 2);
        }
        other => panic!("expected acceptance, got {other:?}"),
    }
    assert_eq!(gate.held().map(|f| f.name()), Some("a.pdf"));
}

#[test]
fn gate_holds_at_most_the_latest_accepted_file_over_any_sequence() {
    init_logging();
    let drops = [
        vec![candidate("a.pdf", PDF_MIME)],
        vec![candidate("x.exe", "application/octet-stream")],
        vec![candidate("b.docx", DOCX_MIME), candidate("c.pdf", PDF_MIME)],
        vec![],
        vec![candidate("d.pdf", "image/png")],
        vec![candidate("e.pdf", PDF_MIME)],
    ];
    let mut gate = FileValidationGate::new();
    let mut latest_accepted: Option<String> = None;
    for batch in drops {
        if let IntakeOutcome::Accepted { file, .. } = gate.submit(batch) {
            latest_accepted = Some(file.name().to_string());
        }
        assert_eq!(gate.held().map(|f| f.name().to_string()), latest_accepted);
    }
    assert_eq!(latest_accepted.as_deref(), Some("e.pdf"));
}

#[test]
fn clear_empties_the_gate_and_marks_dirty() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::FilesDropped(vec![candidate("resume.pdf", PDF_MIME)]),
    );
    let (mut state, _) = update(state, Msg::FileCleared);

    assert!(state.gate().held().is_none());
    assert!(state.view().held_file.is_none());
    assert!(state.consume_dirty());

    let (mut state, _) = update(state, Msg::FileCleared);
    assert!(!state.consume_dirty());
}

#[test]
fn held_file_view_shows_size_in_megabytes() {
    init_logging();
    let mut big = candidate("resume.pdf", PDF_MIME);
    big.size_bytes = 1_572_864;
    let (state, _) = update(AppState::new(), Msg::FilesDropped(vec![big]));

    let held = state.view().held_file.unwrap();
    assert_eq!(held.name, "resume.pdf");
    assert_eq!(held.size_label, "1.50 MB");
}
