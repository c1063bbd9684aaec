use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A file on disk described the way a browser file picker would: name,
/// size and a declared MIME type derived from the extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    pub name: String,
    pub size_bytes: u64,
    pub mime_type: String,
    pub path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("{path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("{0} is not a regular file")]
    NotAFile(PathBuf),
}

pub fn describe_local_file(path: &Path) -> Result<LocalFile, IntakeError> {
    let meta = fs::metadata(path).map_err(|source| IntakeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if !meta.is_file() {
        return Err(IntakeError::NotAFile(path.to_path_buf()));
    }
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(LocalFile {
        name,
        size_bytes: meta.len(),
        mime_type: mime_for_path(path).to_string(),
        path: path.to_path_buf(),
    })
}

/// Declared MIME type for common document and image extensions.
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("pdf") => "application/pdf",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("doc") => "application/msword",
        Some("txt") => "text/plain",
        Some("html") | Some("htm") => "text/html",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{describe_local_file, mime_for_path, IntakeError};

    #[test]
    fn mime_follows_extension_case_insensitively() {
        assert_eq!(mime_for_path(Path::new("cv.PDF")), "application/pdf");
        assert_eq!(
            mime_for_path(Path::new("cv.docx")),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
        assert_eq!(
            mime_for_path(Path::new("setup.exe")),
            "application/octet-stream"
        );
        assert_eq!(mime_for_path(Path::new("README")), "application/octet-stream");
    }

    #[test]
    fn describes_size_and_name() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("resume.pdf");
        std::fs::write(&path, b"%PDF-1.4 tiny").unwrap();

        let file = describe_local_file(&path).unwrap();
        assert_eq!(file.name, "resume.pdf");
        assert_eq!(file.size_bytes, 13);
        assert_eq!(file.mime_type, "application/pdf");
    }

    #[test]
    fn directories_are_not_files() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(matches!(
            describe_local_file(dir.path()),
            Err(IntakeError::NotAFile(_))
        ));
    }
}
