use std::sync::Arc;

use crate::{
    config::SamplingConfig,
    constants::persona_prompts::{CONTEXT_PLACEHOLDER, FALLBACK_INSTRUCTION},
    models::domain::{Persona, Turn},
    services::generation_provider::{GenerationProvider, GenerationRequest, ProviderContent},
};

pub const PROVIDER_ERROR_PREFIX: &str = "Erro na API Google";

/// Instruction for `persona` with the document text interpolated verbatim.
/// Unknown identifiers get the generic assistant instruction.
pub fn build_instruction(persona: &str, document_text: &str) -> String {
    match Persona::from_identifier(persona) {
        Some(persona) => persona.template().replace(CONTEXT_PLACEHOLDER, document_text),
        None => FALLBACK_INSTRUCTION.to_string(),
    }
}

/// One provider message per turn, same order, `assistant` mapped to `model`.
pub fn translate_history(turns: &[Turn]) -> Vec<ProviderContent> {
    turns
        .iter()
        .map(|turn| ProviderContent::text(turn.role.provider_role(), turn.content.as_str()))
        .collect()
}

/// Turns a replayed transcript into a single generation call. Holds no
/// per-conversation state.
pub struct ConversationService {
    provider: Arc<dyn GenerationProvider>,
    sampling: SamplingConfig,
}

impl ConversationService {
    pub fn new(provider: Arc<dyn GenerationProvider>, sampling: SamplingConfig) -> Self {
        Self { provider, sampling }
    }

    pub fn request_for(&self, turns: &[Turn], persona: &str, document_text: &str) -> GenerationRequest {
        GenerationRequest {
            system_instruction: build_instruction(persona, document_text),
            contents: translate_history(turns),
            sampling: self.sampling.clone(),
        }
    }

    /// Model output, or a displayable description of why there is none.
    pub async fn reply(&self, turns: &[Turn], persona: &str, document_text: &str) -> String {
        let request = self.request_for(turns, persona, document_text);

        match self.provider.generate(request).await {
            Ok(text) => text,
            Err(e) => {
                log::error!("{} generation failed: {}", self.provider.name(), e);
                format!("{}: {}", PROVIDER_ERROR_PREFIX, e)
            }
        }
    }
}
