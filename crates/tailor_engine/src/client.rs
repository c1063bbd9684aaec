use std::time::Duration;

use bytes::{Bytes, BytesMut};
use futures_util::StreamExt;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tailor_logging::{tailor_debug, tailor_info};
use url::Url;

use crate::{FailureKind, OptimizeError, OptimizePayload};

#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub base_url: String,
    pub endpoint_path: String,
    pub probe_path: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_response_bytes: u64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            endpoint_path: "/api/optimize".to_string(),
            probe_path: "/api/optimize/test".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_millis(120_000),
            max_response_bytes: 16 * 1024 * 1024,
        }
    }
}

impl ServiceSettings {
    pub fn endpoint_url(&self) -> Result<Url, OptimizeError> {
        join_url(&self.base_url, &self.endpoint_path)
    }

    pub fn probe_url(&self) -> Result<Url, OptimizeError> {
        join_url(&self.base_url, &self.probe_path)
    }
}

fn join_url(base: &str, path: &str) -> Result<Url, OptimizeError> {
    let joined = format!(
        "{}/{}",
        base.trim().trim_end_matches('/'),
        path.trim().trim_start_matches('/')
    );
    Url::parse(&joined).map_err(|err| OptimizeError::new(FailureKind::InvalidUrl, err.to_string()))
}

/// Body of the service's health probe.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceStatus {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

#[async_trait::async_trait]
pub trait OptimizeClient: Send + Sync {
    /// Sends one optimization request and returns the document markup.
    async fn optimize(&self, payload: &OptimizePayload) -> Result<String, OptimizeError>;

    async fn probe(&self) -> Result<ServiceStatus, OptimizeError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestOptimizeClient {
    settings: ServiceSettings,
    client: reqwest::Client,
}

impl ReqwestOptimizeClient {
    pub fn new(settings: ServiceSettings) -> Result<Self, OptimizeError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| OptimizeError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Bytes, OptimizeError> {
        let max_bytes = self.settings.max_response_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, content_len));
            }
        }

        let mut body = BytesMut::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|err| self.map_reqwest_error(err))?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, next_len));
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body.freeze())
    }

    fn map_reqwest_error(&self, err: reqwest::Error) -> OptimizeError {
        if err.is_timeout() {
            let detail = format!(
                "The optimization service did not respond within {} seconds.",
                self.settings.request_timeout.as_secs()
            );
            return OptimizeError::new(FailureKind::Timeout, err.to_string())
                .with_detail(Some(detail));
        }
        OptimizeError::new(FailureKind::Network, err.to_string())
    }
}

#[async_trait::async_trait]
impl OptimizeClient for ReqwestOptimizeClient {
    async fn optimize(&self, payload: &OptimizePayload) -> Result<String, OptimizeError> {
        let url = self.settings.endpoint_url()?;
        let contents = tokio::fs::read(&payload.file_path).await.map_err(|err| {
            OptimizeError::new(
                FailureKind::Io,
                format!("failed to read {}: {err}", payload.file_path.display()),
            )
        })?;
        let form = build_form(payload, contents)?;

        tailor_info!("POST {} ({})", url, payload.file_name);
        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|err| self.map_reqwest_error(err))?;

        let status = response.status();
        let body = self.read_body(response).await?;
        tailor_debug!("response status={} bytes={}", status, body.len());

        if !status.is_success() {
            return Err(
                OptimizeError::new(FailureKind::HttpStatus(status.as_u16()), status.to_string())
                    .with_detail(extract_detail(&body)),
            );
        }
        parse_document(&body)
    }

    async fn probe(&self) -> Result<ServiceStatus, OptimizeError> {
        let url = self.settings.probe_url()?;
        let response = self
            .client
            .post(url)
            .send()
            .await
            .map_err(|err| self.map_reqwest_error(err))?;
        let status = response.status();
        let body = self.read_body(response).await?;
        if !status.is_success() {
            return Err(
                OptimizeError::new(FailureKind::HttpStatus(status.as_u16()), status.to_string())
                    .with_detail(extract_detail(&body)),
            );
        }
        serde_json::from_slice(&body)
            .map_err(|err| OptimizeError::new(FailureKind::MalformedResponse, err.to_string()))
    }
}

/// Multipart body: `resume` file part, `job_description` text and
/// `hide_contact_details` as the literal `true`/`false`.
fn build_form(payload: &OptimizePayload, contents: Vec<u8>) -> Result<Form, OptimizeError> {
    let part = Part::bytes(contents)
        .file_name(payload.file_name.clone())
        .mime_str(&payload.mime_type)
        .map_err(|err| OptimizeError::new(FailureKind::InvalidPayload, err.to_string()))?;
    let hide = if payload.hide_contact_details {
        "true"
    } else {
        "false"
    };
    Ok(Form::new()
        .part("resume", part)
        .text("job_description", payload.job_description.clone())
        .text("hide_contact_details", hide))
}

#[derive(Deserialize)]
struct OptimizeResponse {
    html: String,
}

fn parse_document(body: &[u8]) -> Result<String, OptimizeError> {
    serde_json::from_slice::<OptimizeResponse>(body)
        .map(|response| response.html)
        .map_err(|err| OptimizeError::new(FailureKind::MalformedResponse, err.to_string()))
}

/// Reads a displayable `detail` from an error body. Accepts a plain string
/// or a list of validation entries carrying `msg`.
pub(crate) fn extract_detail(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    let detail = match value.get("detail")? {
        serde_json::Value::String(text) => text.trim().to_string(),
        serde_json::Value::Array(entries) => entries
            .iter()
            .filter_map(|entry| entry.get("msg").and_then(|msg| msg.as_str()))
            .collect::<Vec<_>>()
            .join("; "),
        _ => return None,
    };
    if detail.is_empty() {
        None
    } else {
        Some(detail)
    }
}

fn too_large(max_bytes: u64, actual: u64) -> OptimizeError {
    OptimizeError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

#[cfg(test)]
mod tests {
    use super::{extract_detail, ServiceSettings};

    #[test]
    fn detail_from_string_field() {
        let body = br#"{"detail": "Optimization failed: model overloaded"}"#;
        assert_eq!(
            extract_detail(body).as_deref(),
            Some("Optimization failed: model overloaded")
        );
    }

    #[test]
    fn detail_from_validation_list() {
        let body = br#"{"detail": [{"loc": ["body", "resume"], "msg": "field required"}]}"#;
        assert_eq!(extract_detail(body).as_deref(), Some("field required"));
    }

    #[test]
    fn missing_or_unparsable_detail_is_none() {
        assert_eq!(extract_detail(b"{}"), None);
        assert_eq!(extract_detail(br#"{"detail": ""}"#), None);
        assert_eq!(extract_detail(br#"{"detail": 42}"#), None);
        assert_eq!(extract_detail(b"<html>502 Bad Gateway</html>"), None);
        assert_eq!(extract_detail(b""), None);
    }

    #[test]
    fn endpoint_joins_without_doubled_slashes() {
        let settings = ServiceSettings {
            base_url: "http://localhost:9000/".to_string(),
            ..ServiceSettings::default()
        };
        assert_eq!(
            settings.endpoint_url().unwrap().as_str(),
            "http://localhost:9000/api/optimize"
        );
        assert_eq!(
            ServiceSettings::default().probe_url().unwrap().as_str(),
            "http://127.0.0.1:8000/api/optimize/test"
        );
    }
}
