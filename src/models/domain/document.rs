use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Text extracted from a locally cached document. Never mutated once built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExtractedDocument {
    pub filename: PathBuf,
    pub text: String,
    pub page_count: usize,
    /// 1-based numbers of pages that failed extraction or yielded no text.
    pub skipped_pages: Vec<u32>,
    pub extracted_at: DateTime<Utc>,
}

impl ExtractedDocument {
    pub fn is_degraded(&self) -> bool {
        !self.skipped_pages.is_empty()
    }
}
