use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{
    config::{Config, SamplingConfig},
    errors::{AppError, AppResult},
};

#[cfg(test)]
use mockall::automock;

/// One role-tagged message in the provider's vocabulary (`user` / `model`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderContent {
    pub role: String,
    pub parts: Vec<ProviderPart>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderPart {
    pub text: String,
}

impl ProviderContent {
    pub fn text(role: &str, text: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            parts: vec![ProviderPart { text: text.into() }],
        }
    }
}

/// Everything a single generation call needs.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationRequest {
    pub system_instruction: String,
    pub contents: Vec<ProviderContent>,
    pub sampling: SamplingConfig,
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> AppResult<String>;

    fn name(&self) -> &'static str;
}

/// Client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    client: Client,
    api_key: Option<SecretString>,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(
        client: Client,
        api_key: Option<SecretString>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    pub fn from_config(client: Client, config: &Config) -> Self {
        Self::new(
            client,
            config.google_api_key.clone(),
            config.gemini_base_url.clone(),
            config.gemini_model.clone(),
        )
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    system_instruction: GeminiSystemInstruction,
    contents: &'a [ProviderContent],
    generation_config: GeminiGenerationConfig,
}

#[derive(Serialize)]
struct GeminiSystemInstruction {
    parts: Vec<ProviderPart>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    temperature: f32,
    top_p: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiPartResponse>,
}

#[derive(Deserialize)]
struct GeminiPartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct GeminiErrorEnvelope {
    error: GeminiError,
}

#[derive(Deserialize)]
struct GeminiError {
    message: String,
    status: Option<String>,
}

fn response_text(response: GeminiResponse) -> AppResult<String> {
    if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(AppError::Provider(format!("prompt blocked: {}", reason)));
    }

    let candidate = response
        .candidates
        .and_then(|c| c.into_iter().next())
        .ok_or_else(|| AppError::Provider("response contained no candidates".to_string()))?;

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "UNKNOWN".to_string());
        return Err(AppError::Provider(format!(
            "response contained no text (finish reason {})",
            reason
        )));
    }
    Ok(text)
}

#[async_trait]
impl GenerationProvider for GeminiClient {
    async fn generate(&self, request: GenerationRequest) -> AppResult<String> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| AppError::Configuration("GOOGLE_API_KEY is not set".to_string()))?;

        let body = GeminiRequest {
            system_instruction: GeminiSystemInstruction {
                parts: vec![ProviderPart {
                    text: request.system_instruction,
                }],
            },
            contents: &request.contents,
            generation_config: GeminiGenerationConfig {
                temperature: request.sampling.temperature,
                top_p: request.sampling.top_p,
                max_output_tokens: request.sampling.max_output_tokens,
            },
        };

        log::debug!(
            "Calling {} with {} turns",
            self.model,
            request.contents.len()
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let detail = match serde_json::from_str::<GeminiErrorEnvelope>(&raw) {
                Ok(envelope) => match envelope.error.status {
                    Some(code) => format!("{} ({})", envelope.error.message, code),
                    None => envelope.error.message,
                },
                Err(_) => raw,
            };
            return Err(AppError::Provider(format!("{} - {}", status, detail)));
        }

        let parsed: GeminiResponse = response
            .json()
            .await
            .map_err(|e| AppError::Provider(format!("malformed response: {}", e)))?;
        response_text(parsed)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_includes_model() {
        let client = GeminiClient::new(
            Client::new(),
            None,
            "https://generativelanguage.googleapis.com/",
            "gemini-2.5-flash",
        );
        assert_eq!(
            client.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_request_serializes_to_wire_format() {
        let contents = vec![ProviderContent::text("user", "hi")];
        let body = GeminiRequest {
            system_instruction: GeminiSystemInstruction {
                parts: vec![ProviderPart {
                    text: "be brief".to_string(),
                }],
            },
            contents: &contents,
            generation_config: GeminiGenerationConfig {
                temperature: 0.5,
                top_p: 0.95,
                max_output_tokens: None,
            },
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "be brief");
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["generationConfig"]["temperature"], 0.5);
        assert!(json["generationConfig"].get("maxOutputTokens").is_none());
    }

    #[test]
    fn test_response_text_joins_parts() {
        let response: GeminiResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Hello "},{"text":"there"}]},"finishReason":"STOP"}]}"#,
        )
        .unwrap();

        assert_eq!(response_text(response).unwrap(), "Hello there");
    }

    #[test]
    fn test_blocked_prompt_is_provider_error() {
        let response: GeminiResponse =
            serde_json::from_str(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).unwrap();

        let err = response_text(response).unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[test]
    fn test_empty_candidate_reports_finish_reason() {
        let response: GeminiResponse =
            serde_json::from_str(r#"{"candidates":[{"finishReason":"MAX_TOKENS"}]}"#).unwrap();

        let err = response_text(response).unwrap_err();
        assert!(matches!(err, AppError::Provider(_)));
        assert!(err.to_string().contains("MAX_TOKENS"));
    }

    #[actix_rt::test]
    async fn test_missing_key_is_configuration_error() {
        let client = GeminiClient::new(Client::new(), None, "http://127.0.0.1:9", "m");
        let request = GenerationRequest {
            system_instruction: "x".to_string(),
            contents: vec![],
            sampling: SamplingConfig::default(),
        };

        let err = client.generate(request).await.unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }
}
