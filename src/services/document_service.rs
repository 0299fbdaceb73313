use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use sha2::{Digest, Sha256};
use tokio::{fs, sync::Mutex};

use crate::{
    errors::{AppError, AppResult},
    models::domain::ExtractedDocument,
    services::{document_cache::DocumentCache, document_source::DocumentSource, pdf_text},
};

/// Keeps the configured document on local storage and memoizes its text.
pub struct DocumentService {
    source: Arc<dyn DocumentSource>,
    cache: Arc<DocumentCache>,
    remote_id: String,
    expected_sha256: Option<String>,
    load_lock: Mutex<()>,
}

impl DocumentService {
    pub fn new(
        source: Arc<dyn DocumentSource>,
        cache: Arc<DocumentCache>,
        remote_id: impl Into<String>,
        expected_sha256: Option<String>,
    ) -> Self {
        Self {
            source,
            cache,
            remote_id: remote_id.into(),
            expected_sha256: expected_sha256.map(|d| d.to_lowercase()),
            load_lock: Mutex::new(()),
        }
    }

    /// Returns true when a usable, non-empty copy of `filename` exists after
    /// the call. Downloads at most once; never returns an error.
    pub async fn ensure_local(&self, filename: &Path, remote_id: &str) -> bool {
        match self.try_ensure_local(filename, remote_id).await {
            Ok(()) => true,
            Err(e) => {
                log::error!("Document {} unavailable: {}", filename.display(), e);
                false
            }
        }
    }

    async fn try_ensure_local(&self, filename: &Path, remote_id: &str) -> AppResult<()> {
        if self.has_usable_copy(filename).await? {
            return Ok(());
        }

        if remote_id.trim().is_empty() {
            return Err(AppError::Configuration(
                "remote document identifier is not configured".to_string(),
            ));
        }

        if let Some(parent) = filename.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        self.source.fetch(remote_id.trim(), filename).await?;

        if let Some(expected) = &self.expected_sha256 {
            let actual = sha256_file(filename).await?;
            if actual != *expected {
                let _ = fs::remove_file(filename).await;
                return Err(AppError::Transport(format!(
                    "downloaded file digest {} does not match expected {}",
                    actual, expected
                )));
            }
        }

        if !is_non_empty_file(filename).await? {
            return Err(AppError::Transport(format!(
                "download finished but {} is missing or empty",
                filename.display()
            )));
        }
        Ok(())
    }

    /// Presence is the cache key. With a configured digest, a stale or
    /// truncated copy is discarded instead.
    async fn has_usable_copy(&self, filename: &Path) -> AppResult<bool> {
        if !is_non_empty_file(filename).await? {
            return Ok(false);
        }

        if let Some(expected) = &self.expected_sha256 {
            let actual = sha256_file(filename).await?;
            if actual != *expected {
                log::warn!(
                    "Cached {} has digest {}, expected {}; downloading again",
                    filename.display(),
                    actual,
                    expected
                );
                fs::remove_file(filename).await?;
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Extracted text of `filename`, or `None` when it cannot be provisioned
    /// or parsed.
    pub async fn get_text(&self, filename: &Path) -> Option<String> {
        self.get_document(filename).await.map(|doc| doc.text.clone())
    }

    /// Memoized extraction of `filename`. Failures are not memoized, so the
    /// next call tries again.
    pub async fn get_document(&self, filename: &Path) -> Option<Arc<ExtractedDocument>> {
        if let Some(document) = self.cache.get(filename).await {
            return Some(document);
        }

        let _guard = self.load_lock.lock().await;
        if let Some(document) = self.cache.get(filename).await {
            return Some(document);
        }

        if !self.ensure_local(filename, &self.remote_id).await {
            return None;
        }

        let path: PathBuf = filename.to_path_buf();
        match tokio::task::spawn_blocking(move || pdf_text::extract_document(&path)).await {
            Ok(Ok(document)) => {
                log::info!(
                    "Loaded {} ({} pages, {} characters)",
                    filename.display(),
                    document.page_count,
                    document.text.len()
                );
                Some(self.cache.insert(document).await)
            }
            Ok(Err(e)) => {
                log::error!("Failed to read {}: {}", filename.display(), e);
                None
            }
            Err(e) => {
                log::error!("Extraction task for {} failed: {}", filename.display(), e);
                None
            }
        }
    }

    /// Already-extracted document, without triggering a download or parse.
    pub async fn cached(&self, filename: &Path) -> Option<Arc<ExtractedDocument>> {
        self.cache.get(filename).await
    }

    pub async fn invalidate(&self, filename: &Path) -> bool {
        let removed = self.cache.invalidate(filename).await;
        if removed {
            log::info!("Invalidated cached text of {}", filename.display());
        }
        removed
    }
}

async fn is_non_empty_file(path: &Path) -> AppResult<bool> {
    match fs::metadata(path).await {
        Ok(meta) => Ok(meta.is_file() && meta.len() > 0),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

async fn sha256_file(path: &Path) -> AppResult<String> {
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || -> AppResult<String> {
        let mut file = std::fs::File::open(&path)?;
        let mut hasher = Sha256::new();
        std::io::copy(&mut file, &mut hasher)?;
        Ok(hex::encode(hasher.finalize()))
    })
    .await
    .map_err(|e| AppError::InternalError(format!("digest task failed: {}", e)))?
}
