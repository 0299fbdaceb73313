use std::path::{Path, PathBuf};

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{header::CONTENT_TYPE, Client, Response};
use tokio::{fs, io::AsyncWriteExt};

use crate::errors::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

/// PDF readers accept the header anywhere in the first kilobyte.
const PDF_MAGIC: &[u8] = b"%PDF-";
const MAGIC_WINDOW: usize = 1024;

static CONFIRM_TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"confirm=([0-9A-Za-z_-]+)").expect("CONFIRM_TOKEN_REGEX is a valid regex pattern")
});

/// A remote single-file store addressed by an opaque identifier.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Downloads the file identified by `remote_id` into `destination`.
    /// On error nothing is left at `destination`.
    async fn fetch(&self, remote_id: &str, destination: &Path) -> AppResult<()>;
}

/// Downloads a PDF from a Drive-style `/uc?id=` endpoint. Bodies that do not
/// carry the PDF header are discarded instead of being saved.
pub struct DriveDocumentSource {
    client: Client,
    base_url: String,
}

impl DriveDocumentSource {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn download_url(&self, remote_id: &str) -> String {
        format!("{}/uc?id={}", self.base_url, remote_id)
    }

    async fn request(&self, remote_id: &str, confirm: Option<&str>) -> AppResult<Response> {
        let mut query = vec![("id", remote_id)];
        if let Some(token) = confirm {
            query.push(("confirm", token));
        }

        let response = self
            .client
            .get(format!("{}/uc", self.base_url))
            .query(&query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Transport(format!(
                "document source answered {} for id '{}'",
                status, remote_id
            )));
        }
        Ok(response)
    }
}

fn is_html(response: &Response) -> bool {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("text/html"))
}

/// Sibling path the body is streamed into before being renamed into place.
pub fn partial_path(destination: &Path) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".part");
    destination.with_file_name(name)
}

fn has_pdf_magic(head: &[u8]) -> bool {
    head.windows(PDF_MAGIC.len()).any(|w| w == PDF_MAGIC)
}

/// Streams the body into `file`, returning the byte count and the leading
/// bytes used to sniff the payload.
async fn stream_body(response: &mut Response, file: &mut fs::File) -> AppResult<(u64, Vec<u8>)> {
    let mut written = 0u64;
    let mut head = Vec::with_capacity(MAGIC_WINDOW);
    while let Some(chunk) = response.chunk().await? {
        if head.len() < MAGIC_WINDOW {
            let take = (MAGIC_WINDOW - head.len()).min(chunk.len());
            head.extend_from_slice(&chunk[..take]);
        }
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;
    file.sync_all().await?;
    Ok((written, head))
}

async fn write_body(mut response: Response, destination: &Path) -> AppResult<u64> {
    let partial = partial_path(destination);
    let mut file = fs::File::create(&partial).await?;

    let result = stream_body(&mut response, &mut file).await;
    drop(file);

    let written = match result {
        Ok((n, head)) if n > 0 && has_pdf_magic(&head) => n,
        Ok((0, _)) => {
            let _ = fs::remove_file(&partial).await;
            return Err(AppError::Transport(
                "document source returned an empty body".to_string(),
            ));
        }
        Ok((_, head)) => {
            let _ = fs::remove_file(&partial).await;
            let preview = String::from_utf8_lossy(&head[..head.len().min(64)]).into_owned();
            return Err(AppError::Transport(format!(
                "document source returned something other than a PDF: {:?}",
                preview
            )));
        }
        Err(e) => {
            let _ = fs::remove_file(&partial).await;
            return Err(e);
        }
    };

    fs::rename(&partial, destination).await?;
    Ok(written)
}

#[async_trait]
impl DocumentSource for DriveDocumentSource {
    async fn fetch(&self, remote_id: &str, destination: &Path) -> AppResult<()> {
        log::info!("Downloading {} to {}", self.download_url(remote_id), destination.display());

        let mut response = self.request(remote_id, None).await?;

        if is_html(&response) {
            // Large files are served behind a confirmation page.
            let page = response.text().await?;
            let token = CONFIRM_TOKEN_REGEX
                .captures(&page)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string())
                .ok_or_else(|| {
                    AppError::Transport(
                        "document source returned an HTML page instead of the file".to_string(),
                    )
                })?;

            log::debug!("Following download confirmation for id '{}'", remote_id);
            response = self.request(remote_id, Some(&token)).await?;
            if is_html(&response) {
                return Err(AppError::Transport(
                    "document source kept returning an HTML page".to_string(),
                ));
            }
        }

        let bytes = write_body(response, destination).await?;
        log::info!("Downloaded {} bytes to {}", bytes, destination.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_url_template() {
        let source = DriveDocumentSource::new(Client::new(), "https://drive.google.com/");
        assert_eq!(
            source.download_url("abc123"),
            "https://drive.google.com/uc?id=abc123"
        );
    }

    #[test]
    fn test_partial_path_keeps_directory() {
        let partial = partial_path(Path::new("/tmp/cache/doc.pdf"));
        assert_eq!(partial, PathBuf::from("/tmp/cache/doc.pdf.part"));
    }

    #[test]
    fn test_pdf_magic_detection() {
        assert!(has_pdf_magic(b"%PDF-1.7\n%\xe2\xe3"));
        assert!(has_pdf_magic(b"\xef\xbb\xbf\r\n%PDF-1.4"));
        assert!(!has_pdf_magic(b"<html>Google Drive - Virus scan warning</html>"));
        assert!(!has_pdf_magic(b"<!DOCTYPE html><html></html>"));
        assert!(!has_pdf_magic(b""));
    }

    #[test]
    fn test_confirm_token_regex() {
        let page = r#"<a href="/uc?export=download&amp;confirm=t0K-en_9&amp;id=abc">Download</a>"#;
        let token = CONFIRM_TOKEN_REGEX.captures(page).and_then(|c| c.get(1));
        assert_eq!(token.map(|m| m.as_str()), Some("t0K-en_9"));
    }
}
