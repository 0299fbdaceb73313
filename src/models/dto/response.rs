use std::path::Path;

use serde::Serialize;

use crate::models::domain::{ExtractedDocument, Persona, Turn};

#[derive(Debug, Clone, Serialize)]
pub struct PersonaDto {
    pub id: Persona,
    pub label: &'static str,
    pub caption: &'static str,
    pub suggestions: Vec<SuggestionDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuggestionDto {
    pub label: &'static str,
    pub prompt: &'static str,
}

impl From<Persona> for PersonaDto {
    fn from(persona: Persona) -> Self {
        PersonaDto {
            id: persona,
            label: persona.label(),
            caption: persona.caption(),
            suggestions: persona
                .suggestions()
                .iter()
                .map(|&(label, prompt)| SuggestionDto { label, prompt })
                .collect(),
        }
    }
}

pub type ReplyResponse = Turn;

#[derive(Debug, Clone, Serialize)]
pub struct DocumentStatusDto {
    pub filename: String,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<usize>,
    pub skipped_pages: Vec<u32>,
    pub characters: usize,
}

impl DocumentStatusDto {
    pub fn from_document(filename: &Path, document: Option<&ExtractedDocument>) -> Self {
        let filename = filename.display().to_string();
        match document {
            Some(doc) => DocumentStatusDto {
                filename,
                available: true,
                page_count: Some(doc.page_count),
                skipped_pages: doc.skipped_pages.clone(),
                characters: doc.text.chars().count(),
            },
            None => DocumentStatusDto {
                filename,
                available: false,
                page_count: None,
                skipped_pages: Vec::new(),
                characters: 0,
            },
        }
    }
}
