pub mod pdf_fixture;

pub mod fixtures {
    use std::{cell::RefCell, path::Path};

    use crate::{
        errors::AppResult,
        models::domain::Turn,
        services::pdf_text::PagedDocument,
    };

    pub use super::pdf_fixture::pdf_bytes;

    pub fn write_pdf(path: &Path, pages: &[&str]) {
        std::fs::write(path, pdf_bytes(pages)).expect("pdf written");
    }

    /// In-memory paged document with scripted per-page outcomes.
    pub struct FakePages {
        pages: Vec<AppResult<String>>,
        pub calls: RefCell<Vec<u32>>,
    }

    impl FakePages {
        pub fn new(pages: Vec<AppResult<String>>) -> Self {
            Self {
                pages,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl PagedDocument for FakePages {
        fn page_numbers(&self) -> Vec<u32> {
            (1..=self.pages.len() as u32).collect()
        }

        fn page_text(&self, page: u32) -> AppResult<String> {
            self.calls.borrow_mut().push(page);
            self.pages[(page - 1) as usize].clone()
        }
    }

    pub fn sample_transcript() -> Vec<Turn> {
        vec![Turn::user("A"), Turn::assistant("B"), Turn::user("C")]
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::{errors::AppError, services::pdf_text::PagedDocument};

    #[test]
    fn test_fake_pages_replays_outcomes() {
        let doc = FakePages::new(vec![
            Ok("one".to_string()),
            Err(AppError::Parse("broken".to_string())),
        ]);

        assert_eq!(doc.page_numbers(), vec![1, 2]);
        assert!(doc.page_text(2).is_err());
        assert_eq!(*doc.calls.borrow(), vec![2]);
    }

    #[test]
    fn test_pdf_bytes_has_pdf_header() {
        let bytes = pdf_bytes(&["hello"]);
        assert!(bytes.starts_with(b"%PDF-1.5"));
    }

    #[test]
    fn test_sample_transcript_alternates() {
        assert_eq!(sample_transcript().len(), 3);
    }
}
