use std::path::{Path, PathBuf};

use tailor_logging::tailor_debug;

/// Upper bound on files held by the gate.
pub const MAX_ACCEPTED_FILES: usize = 1;

/// A document type the intake accepts: one MIME type and the extensions
/// that may carry it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcceptRule {
    pub mime_type: &'static str,
    pub extensions: &'static [&'static str],
}

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

pub const ACCEPTED_TYPES: &[AcceptRule] = &[
    AcceptRule {
        mime_type: PDF_MIME,
        extensions: &["pdf"],
    },
    AcceptRule {
        mime_type: DOCX_MIME,
        extensions: &["docx"],
    },
];

/// A file offered to the gate by a drop or a picker selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub name: String,
    pub size_bytes: u64,
    pub mime_type: String,
    pub path: PathBuf,
}

/// The single resume file currently held by the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    name: String,
    size_bytes: u64,
    mime_type: String,
    path: PathBuf,
}

impl UploadedFile {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl From<FileCandidate> for UploadedFile {
    fn from(candidate: FileCandidate) -> Self {
        Self {
            name: candidate.name,
            size_bytes: candidate.size_bytes,
            mime_type: candidate.mime_type,
            path: candidate.path,
        }
    }
}

/// Result of offering a batch of candidates to the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakeOutcome {
    /// The first acceptable candidate replaced whatever was held.
    /// `dropped` counts candidates filtered out or truncated from the batch.
    Accepted { file: UploadedFile, dropped: usize },
    /// Nothing in the batch was acceptable; the held file is unchanged.
    Rejected { dropped: usize },
}

/// Holds at most one accepted resume file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileValidationGate {
    held: Option<UploadedFile>,
}

impl FileValidationGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn held(&self) -> Option<&UploadedFile> {
        self.held.as_ref()
    }

    /// Filters `candidates` through the type allow-list, truncates to
    /// [`MAX_ACCEPTED_FILES`], and replaces the held file with the survivor.
    ///
    /// Unsupported types are dropped silently; a batch with no survivors
    /// leaves the gate as it was.
    pub fn submit(&mut self, candidates: Vec<FileCandidate>) -> IntakeOutcome {
        let offered = candidates.len();
        let mut accepted: Vec<FileCandidate> = candidates
            .into_iter()
            .filter(|candidate| {
                let ok = is_accepted_type(&candidate.name, &candidate.mime_type);
                if !ok {
                    tailor_debug!(
                        "intake dropped {:?} (mime {:?})",
                        candidate.name,
                        candidate.mime_type
                    );
                }
                ok
            })
            .collect();
        accepted.truncate(MAX_ACCEPTED_FILES);

        match accepted.pop() {
            Some(candidate) => {
                let file = UploadedFile::from(candidate);
                self.held = Some(file.clone());
                IntakeOutcome::Accepted {
                    file,
                    dropped: offered - 1,
                }
            }
            None => IntakeOutcome::Rejected { dropped: offered },
        }
    }

    /// Returns the gate to the empty state. Returns whether a file was held.
    pub fn clear(&mut self) -> bool {
        self.held.take().is_some()
    }
}

/// True when `mime_type` is allow-listed and `name` carries one of the
/// extensions registered for it.
pub fn is_accepted_type(name: &str, mime_type: &str) -> bool {
    let Some(extension) = Path::new(name).extension().and_then(|ext| ext.to_str()) else {
        return false;
    };
    ACCEPTED_TYPES.iter().any(|rule| {
        rule.mime_type.eq_ignore_ascii_case(mime_type.trim())
            && rule
                .extensions
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(extension))
    })
}

/// Size label shown next to a held file, e.g. `0.25 MB`.
pub fn format_size_mb(size_bytes: u64) -> String {
    format!("{:.2} MB", size_bytes as f64 / 1024.0 / 1024.0)
}
