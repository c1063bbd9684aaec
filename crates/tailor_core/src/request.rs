use crate::intake::UploadedFile;
use crate::slot::InFlightSlot;
use tailor_logging::{tailor_debug, tailor_info, tailor_warn};

pub type RequestId = u64;

/// Shown when a failure carries no usable detail of its own.
pub const GENERIC_FAILURE_DETAIL: &str = "Something went wrong. Please try again.";

/// Payload handed to the transport. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizationRequest {
    file: UploadedFile,
    job_description: String,
    hide_contact_details: bool,
}

impl OptimizationRequest {
    /// Builds a request only when a file is present and the job description
    /// is not blank.
    pub fn build(
        file: Option<&UploadedFile>,
        job_description: &str,
        hide_contact_details: bool,
    ) -> Option<Self> {
        let file = file?;
        if job_description.trim().is_empty() {
            return None;
        }
        Some(Self {
            file: file.clone(),
            job_description: job_description.to_string(),
            hide_contact_details,
        })
    }

    pub fn file(&self) -> &UploadedFile {
        &self.file
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    pub fn hide_contact_details(&self) -> bool {
        self.hide_contact_details
    }
}

/// Coarse classification of a failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    Timeout,
    Network,
    /// The service answered with a non-success status.
    Rejected(u16),
    /// A success status whose body lacked a document.
    Malformed,
    /// The request never left the machine (e.g. the file became unreadable).
    Local,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizationFailure {
    pub class: FailureClass,
    /// User-displayable text.
    pub detail: String,
}

impl OptimizationFailure {
    pub fn new(class: FailureClass, detail: Option<String>) -> Self {
        let detail = detail
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| GENERIC_FAILURE_DETAIL.to_string());
        Self { class, detail }
    }
}

/// The live outcome of the most recently submitted request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptimizationOutcome {
    Pending,
    Success(String),
    Failure(OptimizationFailure),
}

/// Lifecycle phase as seen by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestPhase {
    #[default]
    Idle,
    Pending,
    Success,
    Error(String),
}

/// Owns the Idle → Pending → Success/Error lifecycle and guarantees that at
/// most one request is in flight.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OptimizationRequestController {
    slot: InFlightSlot,
    current: Option<(RequestId, OptimizationRequest, OptimizationOutcome)>,
}

impl OptimizationRequestController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.slot.is_busy()
    }

    pub fn phase(&self) -> RequestPhase {
        match &self.current {
            None => RequestPhase::Idle,
            Some((_, _, OptimizationOutcome::Pending)) => RequestPhase::Pending,
            Some((_, _, OptimizationOutcome::Success(_))) => RequestPhase::Success,
            Some((_, _, OptimizationOutcome::Failure(failure))) => {
                RequestPhase::Error(failure.detail.clone())
            }
        }
    }

    pub fn outcome(&self) -> Option<&OptimizationOutcome> {
        self.current.as_ref().map(|(_, _, outcome)| outcome)
    }

    /// The request most recently submitted, exactly as it was sent.
    pub fn submitted(&self) -> Option<&OptimizationRequest> {
        self.current.as_ref().map(|(_, request, _)| request)
    }

    pub fn can_submit(&self, file: Option<&UploadedFile>, job_description: &str) -> bool {
        !self.is_pending() && file.is_some() && !job_description.trim().is_empty()
    }

    /// Moves to Pending with a freshly built request. Returns `None` (and
    /// changes nothing) if inputs are incomplete or a request is in flight.
    pub fn submit(
        &mut self,
        file: Option<&UploadedFile>,
        job_description: &str,
        hide_contact_details: bool,
    ) -> Option<(RequestId, OptimizationRequest)> {
        let Some(request) =
            OptimizationRequest::build(file, job_description, hide_contact_details)
        else {
            tailor_debug!("submit ignored: missing file or blank job description");
            return None;
        };
        let Some(request_id) = self.slot.try_acquire() else {
            tailor_debug!("submit ignored: request already in flight");
            return None;
        };
        tailor_info!(
            "request {} pending (file={:?}, hide_contact_details={})",
            request_id,
            request.file().name(),
            request.hide_contact_details()
        );
        self.current = Some((request_id, request.clone(), OptimizationOutcome::Pending));
        Some((request_id, request))
    }

    /// Settles the in-flight request. Returns the document on success.
    ///
    /// Completions for any id other than the one in flight are ignored.
    pub fn resolve(
        &mut self,
        request_id: RequestId,
        result: Result<String, OptimizationFailure>,
    ) -> Option<String> {
        if !self.slot.release(request_id) {
            tailor_debug!("ignoring stale completion for request {}", request_id);
            return None;
        }
        let (_, _, outcome) = self.current.as_mut()?;
        match result {
            Ok(html) => {
                tailor_info!("request {} succeeded ({} bytes)", request_id, html.len());
                *outcome = OptimizationOutcome::Success(html.clone());
                Some(html)
            }
            Err(failure) => {
                tailor_warn!(
                    "request {} failed ({:?}): {}",
                    request_id,
                    failure.class,
                    failure.detail
                );
                *outcome = OptimizationOutcome::Failure(failure);
                None
            }
        }
    }
}
