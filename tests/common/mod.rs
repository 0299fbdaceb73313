#![allow(dead_code)]

use std::{path::PathBuf, time::Duration};

use mentor_server::config::{Config, SamplingConfig};
use secrecy::SecretString;

#[path = "../../src/test_utils/pdf_fixture.rs"]
mod pdf_fixture;

pub use pdf_fixture::pdf_bytes;

/// Configuration pointing both remote services at `base_url`.
pub fn config_for(base_url: &str, document_path: PathBuf) -> Config {
    Config {
        google_api_key: Some(SecretString::from("test-key".to_string())),
        gdrive_file_id: "abc123".to_string(),
        document_path,
        document_sha256: None,
        document_source_base_url: base_url.to_string(),
        gemini_base_url: base_url.to_string(),
        gemini_model: "gemini-2.5-flash".to_string(),
        sampling: SamplingConfig::default(),
        http_timeout: Duration::from_secs(5),
        web_server_host: "127.0.0.1".to_string(),
        web_server_port: 0,
    }
}
