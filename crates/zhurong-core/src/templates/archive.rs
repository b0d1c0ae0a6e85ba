//! Template download and extraction
//!
//! Templates are fetched as the hosting service's zip archive of a tag or
//! branch. Archives wrap the repository in a single top-level folder
//! (`<name>-<tag>/`), which is stripped on extraction.

use super::location::RepoLocation;
use crate::error::FetchError;
use async_trait::async_trait;
use std::fs;
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};
use url::Url;
use zip::ZipArchive;

/// Fetches a template repository into a directory
#[async_trait]
pub trait Downloader: Send + Sync {
    /// Download `location` into `destination` (created if absent), returning
    /// the number of files written
    async fn download(&self, location: &RepoLocation, destination: &Path)
        -> Result<usize, FetchError>;
}

/// Downloads repository zip archives over HTTP
#[derive(Debug, Clone)]
pub struct ArchiveDownloader {
    token: Option<String>,
    client: reqwest::Client,
}

impl ArchiveDownloader {
    /// Create a new downloader with a custom user agent
    pub fn new(user_agent: &str) -> Self {
        Self {
            token: None,
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Authenticate archive requests with a bearer token (private templates)
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    async fn fetch_archive(&self, url: Url, destination: &Path) -> Result<usize, FetchError> {
        tracing::debug!(%url, destination = %destination.display(), "downloading template archive");

        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::from_response(status, &body));
        }

        let bytes = response.bytes().await?;
        let destination = destination.to_path_buf();
        let written =
            tokio::task::spawn_blocking(move || extract_archive(&bytes, &destination)).await??;

        tracing::debug!(files = written, "template extracted");
        Ok(written)
    }
}

#[async_trait]
impl Downloader for ArchiveDownloader {
    async fn download(
        &self,
        location: &RepoLocation,
        destination: &Path,
    ) -> Result<usize, FetchError> {
        let url = location.archive_url()?;
        self.fetch_archive(url, destination).await
    }
}

/// Extract a repository archive into `destination`, stripping the top-level folder
pub fn extract_archive(zip_bytes: &[u8], destination: &Path) -> Result<usize, FetchError> {
    let mut archive = ZipArchive::new(Cursor::new(zip_bytes))?;

    fs::create_dir_all(destination).map_err(|e| {
        FetchError::io(format!("Failed to create {}", destination.display()), e)
    })?;

    let mut written = 0;
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;

        let enclosed = entry
            .enclosed_name()
            .ok_or_else(|| FetchError::UnsafeEntry(entry.name().to_string()))?;
        let relative: PathBuf = enclosed.components().skip(1).collect();

        // The wrapping folder itself, or an entry outside any folder
        if relative.as_os_str().is_empty() {
            if !entry.is_dir() {
                tracing::debug!(
                    entry = entry.name(),
                    "skipping archive entry outside the top-level folder"
                );
            }
            continue;
        }

        let target = destination.join(&relative);
        if entry.is_dir() {
            fs::create_dir_all(&target).map_err(|e| {
                FetchError::io(format!("Failed to create directory: {}", target.display()), e)
            })?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                FetchError::io(format!("Failed to create directory: {}", parent.display()), e)
            })?;
        }

        let mut file = fs::File::create(&target)
            .map_err(|e| FetchError::io(format!("Failed to write file: {}", target.display()), e))?;
        io::copy(&mut entry, &mut file)
            .map_err(|e| FetchError::io(format!("Failed to write file: {}", target.display()), e))?;

        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&target, fs::Permissions::from_mode(mode & 0o777)).map_err(
                |e| FetchError::io(format!("Failed to set permissions: {}", target.display()), e),
            )?;
        }

        written += 1;
    }

    Ok(written)
}
