use std::fmt;
use std::path::PathBuf;

pub type RequestId = u64;
pub type ExportId = u64;

/// Everything the transport needs to send one optimization request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizePayload {
    pub file_name: String,
    pub file_path: PathBuf,
    pub mime_type: String,
    pub job_description: String,
    pub hide_contact_details: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReceipt {
    pub path: PathBuf,
    pub page_count: usize,
    pub byte_len: u64,
}

#[derive(Debug)]
pub enum EngineEvent {
    OptimizationCompleted {
        request_id: RequestId,
        result: Result<String, OptimizeError>,
    },
    ExportCompleted {
        export_id: ExportId,
        result: Result<ExportReceipt, crate::ExportError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct OptimizeError {
    pub kind: FailureKind,
    pub message: String,
    /// Human-readable `detail` taken from an error response body.
    pub detail: Option<String>,
}

impl OptimizeError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: Option<String>) -> Self {
        self.detail = detail;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    InvalidPayload,
    HttpStatus(u16),
    Timeout,
    Network,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    MalformedResponse,
    Io,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::InvalidPayload => write!(f, "invalid request payload"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::MalformedResponse => write!(f, "malformed response"),
            FailureKind::Io => write!(f, "io error"),
        }
    }
}
