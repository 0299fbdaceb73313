pub mod conversation_service;
pub mod document_cache;
pub mod document_service;
pub mod document_source;
pub mod generation_provider;
pub mod pdf_text;

pub use conversation_service::ConversationService;
pub use document_cache::DocumentCache;
pub use document_service::DocumentService;
pub use document_source::{DocumentSource, DriveDocumentSource};
pub use generation_provider::{GeminiClient, GenerationProvider};
