use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use tokio::sync::RwLock;

use crate::models::domain::ExtractedDocument;

/// Process-wide memo of extracted documents keyed by filename. Owned by the
/// application state so the host can reset it.
#[derive(Default)]
pub struct DocumentCache {
    entries: RwLock<HashMap<PathBuf, Arc<ExtractedDocument>>>,
}

impl DocumentCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, filename: &Path) -> Option<Arc<ExtractedDocument>> {
        self.entries.read().await.get(filename).cloned()
    }

    /// Stores `document` unless an entry already exists, returning whichever
    /// entry is cached afterwards.
    pub async fn insert(&self, document: ExtractedDocument) -> Arc<ExtractedDocument> {
        let mut entries = self.entries.write().await;
        entries
            .entry(document.filename.clone())
            .or_insert_with(|| Arc::new(document))
            .clone()
    }

    pub async fn invalidate(&self, filename: &Path) -> bool {
        self.entries.write().await.remove(filename).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn document(name: &str, text: &str) -> ExtractedDocument {
        ExtractedDocument {
            filename: PathBuf::from(name),
            text: text.to_string(),
            page_count: 1,
            skipped_pages: vec![],
            extracted_at: Utc::now(),
        }
    }

    #[actix_rt::test]
    async fn test_first_insert_wins() {
        let cache = DocumentCache::new();

        cache.insert(document("doc.pdf", "first")).await;
        let kept = cache.insert(document("doc.pdf", "second")).await;

        assert_eq!(kept.text, "first");
        assert_eq!(cache.get(Path::new("doc.pdf")).await.unwrap().text, "first");
    }

    #[actix_rt::test]
    async fn test_invalidate_removes_only_that_entry() {
        let cache = DocumentCache::new();
        cache.insert(document("a.pdf", "a")).await;
        cache.insert(document("b.pdf", "b")).await;

        assert!(cache.invalidate(Path::new("a.pdf")).await);
        assert!(!cache.invalidate(Path::new("a.pdf")).await);
        assert!(cache.get(Path::new("a.pdf")).await.is_none());
        assert!(cache.get(Path::new("b.pdf")).await.is_some());
    }
}
