use std::{env, path::PathBuf, time::Duration};

use secrecy::{ExposeSecret, SecretString};

use crate::errors::{AppError, AppResult};

pub const DEFAULT_DOCUMENT_PATH: &str = "Harvard Manager Mentor.pdf";
pub const DEFAULT_DOCUMENT_SOURCE_BASE_URL: &str = "https://drive.google.com";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Fixed sampling configuration sent with every generation request.
#[derive(Clone, Debug, PartialEq)]
pub struct SamplingConfig {
    pub temperature: f32,
    pub top_p: f32,
    /// Optional output cap; `None` leaves the provider default in place.
    pub max_output_tokens: Option<u32>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            temperature: 0.5,
            top_p: 0.95,
            max_output_tokens: Some(2048),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub google_api_key: Option<SecretString>,
    pub gdrive_file_id: String,
    pub document_path: PathBuf,
    pub document_sha256: Option<String>,
    pub document_source_base_url: String,
    pub gemini_base_url: String,
    pub gemini_model: String,
    pub sampling: SamplingConfig,
    pub http_timeout: Duration,
    pub web_server_host: String,
    pub web_server_port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = SamplingConfig::default();

        Self {
            google_api_key: non_empty_var("GOOGLE_API_KEY").map(SecretString::from),
            gdrive_file_id: non_empty_var("GDRIVE_FILE_ID").unwrap_or_default(),
            document_path: non_empty_var("DOCUMENT_PATH")
                .unwrap_or_else(|| DEFAULT_DOCUMENT_PATH.to_string())
                .into(),
            document_sha256: non_empty_var("DOCUMENT_SHA256").map(|s| s.to_lowercase()),
            document_source_base_url: non_empty_var("DOCUMENT_SOURCE_BASE_URL")
                .unwrap_or_else(|| DEFAULT_DOCUMENT_SOURCE_BASE_URL.to_string()),
            gemini_base_url: non_empty_var("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            gemini_model: non_empty_var("GEMINI_MODEL")
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            sampling: SamplingConfig {
                temperature: parsed_var("GEMINI_TEMPERATURE").unwrap_or(defaults.temperature),
                top_p: parsed_var("GEMINI_TOP_P").unwrap_or(defaults.top_p),
                max_output_tokens: match parsed_var::<u32>("GEMINI_MAX_OUTPUT_TOKENS") {
                    Some(0) => None,
                    Some(cap) => Some(cap),
                    None => defaults.max_output_tokens,
                },
            },
            http_timeout: Duration::from_secs(parsed_var("HTTP_TIMEOUT_SECONDS").unwrap_or(120)),
            web_server_host: non_empty_var("WEB_SERVER_HOST")
                .unwrap_or_else(|| "127.0.0.1".to_string()),
            web_server_port: parsed_var("WEB_SERVER_PORT").unwrap_or(8080),
        }
    }

    /// Checks the settings the server cannot run without.
    pub fn validate(&self) -> AppResult<()> {
        let has_key = self
            .google_api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().trim().is_empty());
        if !has_key {
            return Err(AppError::Configuration(
                "GOOGLE_API_KEY is not set".to_string(),
            ));
        }

        if let Some(digest) = &self.document_sha256 {
            if digest.len() != 64 || hex::decode(digest).is_err() {
                return Err(AppError::Configuration(format!(
                    "DOCUMENT_SHA256 must be 64 hex characters, got '{}'",
                    digest
                )));
            }
        }

        if !(0.0..=2.0).contains(&self.sampling.temperature) {
            return Err(AppError::Configuration(format!(
                "GEMINI_TEMPERATURE out of range: {}",
                self.sampling.temperature
            )));
        }
        if !(0.0..=1.0).contains(&self.sampling.top_p) {
            return Err(AppError::Configuration(format!(
                "GEMINI_TOP_P out of range: {}",
                self.sampling.top_p
            )));
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            google_api_key: Some(SecretString::from("test_api_key".to_string())),
            gdrive_file_id: "abc123".to_string(),
            document_path: PathBuf::from("doc.pdf"),
            document_sha256: None,
            document_source_base_url: DEFAULT_DOCUMENT_SOURCE_BASE_URL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            sampling: SamplingConfig::default(),
            http_timeout: Duration::from_secs(5),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parsed_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    non_empty_var(name).and_then(|v| v.parse().ok())
}
