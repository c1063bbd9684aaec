use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tailor_engine::ServiceSettings;

use super::logging::DEFAULT_LOG_FILE;

const DEFAULT_CONFIG_FILE: &str = "tailor.ron";

/// Optional overrides read from a RON file. Every field may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service_url: Option<String>,
    pub request_timeout_ms: Option<u64>,
    pub output_dir: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub chromium_sandbox: Option<bool>,
}

impl AppConfig {
    pub fn log_file(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE))
    }

    /// Service settings with file values applied, then the CLI override.
    pub fn service(&self, url_override: Option<&str>) -> ServiceSettings {
        let mut service = ServiceSettings::default();
        if let Some(url) = url_override.or(self.service_url.as_deref()) {
            service.base_url = url.to_string();
        }
        if let Some(ms) = self.request_timeout_ms {
            service.request_timeout = Duration::from_millis(ms);
        }
        service
    }

    /// Sandboxed unless the file disables it or `--no-sandbox` is given.
    pub fn chromium_sandbox(&self, no_sandbox_flag: bool) -> bool {
        !no_sandbox_flag && self.chromium_sandbox.unwrap_or(true)
    }

    pub fn output_dir(&self, dir_override: Option<&Path>) -> PathBuf {
        dir_override
            .map(Path::to_path_buf)
            .or_else(|| self.output_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

pub fn parse_config(text: &str) -> Result<AppConfig, ron::error::SpannedError> {
    ron::from_str(text)
}

/// Reads the explicit config file, or `./tailor.ron` when it exists.
/// `Ok(None)` means no file was asked for and none was found.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<Option<AppConfig>> {
    let path = explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound && explicit.is_none() => return Ok(None),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read config {}", path.display()))
        }
    };
    let config = parse_config(&text)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    Ok(Some(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = parse_config(r#"(service_url: Some("http://svc:9000"))"#).unwrap();
        assert_eq!(
            config,
            AppConfig {
                service_url: Some("http://svc:9000".to_string()),
                ..AppConfig::default()
            }
        );

        let service = config.service(None);
        assert_eq!(service.base_url, "http://svc:9000");
        assert_eq!(service.request_timeout, Duration::from_millis(120_000));
        assert_eq!(config.log_file(), PathBuf::from("./tailor.log"));
    }

    #[test]
    fn cli_values_override_file_values() {
        let config = AppConfig {
            service_url: Some("http://file".to_string()),
            request_timeout_ms: Some(5_000),
            output_dir: Some(PathBuf::from("from_file")),
            log_file: None,
            chromium_sandbox: None,
        };
        let service = config.service(Some("http://flag"));
        assert_eq!(service.base_url, "http://flag");
        assert_eq!(service.request_timeout, Duration::from_secs(5));
        assert_eq!(config.output_dir(None), PathBuf::from("from_file"));
        assert_eq!(
            config.output_dir(Some(Path::new("from_flag"))),
            PathBuf::from("from_flag")
        );
    }

    #[test]
    fn chromium_sandbox_can_be_disabled_from_file_or_flag() {
        assert!(AppConfig::default().chromium_sandbox(false));
        assert!(!AppConfig::default().chromium_sandbox(true));

        let config = parse_config("(chromium_sandbox: Some(false))").unwrap();
        assert!(!config.chromium_sandbox(false));
    }

    #[test]
    fn invalid_config_is_an_error() {
        assert!(parse_config("(service_url: 42)").is_err());
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.ron");
        assert!(load_config(Some(&missing)).is_err());
    }

    #[test]
    fn explicit_config_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tailor.ron");
        fs::write(&path, "(request_timeout_ms: Some(60000))").unwrap();
        let config = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(config.request_timeout_ms, Some(60_000));
    }
}
