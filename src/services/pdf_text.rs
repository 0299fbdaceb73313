use std::path::Path;

use chrono::Utc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::ExtractedDocument,
};

/// A document whose text can be pulled one page at a time.
pub trait PagedDocument {
    /// 1-based page numbers in reading order.
    fn page_numbers(&self) -> Vec<u32>;
    fn page_text(&self, page: u32) -> AppResult<String>;
}

pub struct PdfDocument {
    inner: lopdf::Document,
}

impl PdfDocument {
    pub fn open(path: &Path) -> AppResult<Self> {
        let inner = lopdf::Document::load(path)?;
        if inner.is_encrypted() {
            return Err(AppError::Parse(format!(
                "{} is password protected",
                path.display()
            )));
        }
        Ok(Self { inner })
    }
}

impl PagedDocument for PdfDocument {
    fn page_numbers(&self) -> Vec<u32> {
        self.inner.get_pages().keys().copied().collect()
    }

    fn page_text(&self, page: u32) -> AppResult<String> {
        Ok(self.inner.extract_text(&[page])?)
    }
}

/// Result of a best-effort pass over every page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageExtraction {
    pub text: String,
    pub page_count: usize,
    pub skipped_pages: Vec<u32>,
}

/// Concatenates page texts with a newline between pages. A page that fails
/// or yields only whitespace is skipped and recorded, never aborting the pass.
pub fn extract_pages(document: &dyn PagedDocument) -> PageExtraction {
    let pages = document.page_numbers();
    let mut texts = Vec::with_capacity(pages.len());
    let mut skipped_pages = Vec::new();

    for page in &pages {
        match document.page_text(*page) {
            Ok(text) if !text.trim().is_empty() => texts.push(text),
            Ok(_) => {
                log::debug!("Page {} has no extractable text", page);
                skipped_pages.push(*page);
            }
            Err(e) => {
                log::warn!("Skipping page {}: {}", page, e);
                skipped_pages.push(*page);
            }
        }
    }

    PageExtraction {
        text: texts.join("\n"),
        page_count: pages.len(),
        skipped_pages,
    }
}

/// Opens `path` as a PDF and extracts its text. Blocking; run it off the
/// async executor.
pub fn extract_document(path: &Path) -> AppResult<ExtractedDocument> {
    let document = PdfDocument::open(path)?;
    let extraction = extract_pages(&document);

    if extraction.page_count == 0 {
        return Err(AppError::Parse(format!("{} has no pages", path.display())));
    }
    if !extraction.skipped_pages.is_empty() {
        log::warn!(
            "Extracted {} with {} of {} pages skipped: {:?}",
            path.display(),
            extraction.skipped_pages.len(),
            extraction.page_count,
            extraction.skipped_pages
        );
    }

    Ok(ExtractedDocument {
        filename: path.to_path_buf(),
        text: extraction.text,
        page_count: extraction.page_count,
        skipped_pages: extraction.skipped_pages,
        extracted_at: Utc::now(),
    })
}
