use std::sync::Arc;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    services::{
        ConversationService, DocumentCache, DocumentService, DriveDocumentSource, GeminiClient,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub document_service: Arc<DocumentService>,
    pub conversation_service: Arc<ConversationService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTP client: {}", e)))?;

        let source = Arc::new(DriveDocumentSource::new(
            http.clone(),
            config.document_source_base_url.clone(),
        ));
        let document_service = Arc::new(DocumentService::new(
            source,
            Arc::new(DocumentCache::new()),
            config.gdrive_file_id.clone(),
            config.document_sha256.clone(),
        ));

        let provider = Arc::new(GeminiClient::from_config(http, &config));
        let conversation_service = Arc::new(ConversationService::new(
            provider,
            config.sampling.clone(),
        ));

        Ok(Self {
            document_service,
            conversation_service,
            config: Arc::new(config),
        })
    }

    pub fn from_parts(
        document_service: Arc<DocumentService>,
        conversation_service: Arc<ConversationService>,
        config: Config,
    ) -> Self {
        Self {
            document_service,
            conversation_service,
            config: Arc::new(config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_cloneable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_app_state_builds_from_test_config() {
        let state = AppState::new(Config::test_config()).unwrap();
        assert_eq!(state.config.gdrive_file_id, "abc123");
    }
}
