//! HTTP client for the directory/preview/download backend.
//!
//! Endpoints, relative to the configured base URL:
//!
//! - `GET directory`: JSON directory description.
//! - `GET file_preview?location=…`: `{ "content": "…" }`.
//! - `GET file_download?location=…`: raw file bytes.
//!
//! No request timeout is configured; a request that never completes
//! leaves its caller waiting.

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::directory::DirectoryNode;

/// Errors that can occur while talking to the backend.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("decode error: {0}")]
    Decode(String),
}

/// The operations the browser needs from the backend.
#[async_trait]
pub trait FileService: Send + Sync {
    /// Fetches and decodes the whole directory description.
    async fn fetch_directory(&self) -> Result<DirectoryNode, HttpError>;

    /// Fetches the text preview of the file at `location`.
    async fn fetch_preview(&self, location: &str) -> Result<String, HttpError>;

    /// Fetches the raw bytes of the file at `location`.
    async fn download(&self, location: &str) -> Result<Vec<u8>, HttpError>;

    /// The URL a download of `location` is served from.
    fn download_url(&self, location: &str) -> Url;
}

#[derive(Debug, Deserialize)]
struct PreviewBody {
    content: String,
}

/// [`FileService`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpFileService {
    client: reqwest::Client,
    base: Url,
}

impl HttpFileService {
    /// Creates a client for the backend at `base_url`.
    ///
    /// A path prefix in `base_url` is kept (`http://host/api` serves
    /// `http://host/api/directory`).
    pub fn new(base_url: &str) -> Result<Self, HttpError> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self, HttpError> {
        let base =
            Url::parse(base_url).map_err(|e| HttpError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            return Err(HttpError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self { client, base })
    }

    fn endpoint(&self, name: &str) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(name);
        }
        url
    }

    fn located(&self, name: &str, location: &str) -> Url {
        let mut url = self.endpoint(name);
        url.query_pairs_mut().append_pair("location", location);
        url
    }

    /// The URL a preview of `location` is fetched from.
    pub fn preview_url(&self, location: &str) -> Url {
        self.located("file_preview", location)
    }

    async fn get(&self, url: Url) -> Result<reqwest::Response, HttpError> {
        tracing::debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| HttpError::Request(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::Status(status.as_u16()));
        }
        Ok(response)
    }
}

#[async_trait]
impl FileService for HttpFileService {
    async fn fetch_directory(&self) -> Result<DirectoryNode, HttpError> {
        let response = self.get(self.endpoint("directory")).await?;
        let value: serde_json::Value = response
            .json()
            .await
            .map_err(|e| HttpError::Decode(e.to_string()))?;
        DirectoryNode::decode(value).map_err(|e| HttpError::Decode(e.to_string()))
    }

    async fn fetch_preview(&self, location: &str) -> Result<String, HttpError> {
        let response = self.get(self.preview_url(location)).await?;
        let body: PreviewBody = response
            .json()
            .await
            .map_err(|e| HttpError::Decode(e.to_string()))?;
        Ok(body.content)
    }

    async fn download(&self, location: &str) -> Result<Vec<u8>, HttpError> {
        let response = self.get(self.download_url(location)).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| HttpError::Request(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    fn download_url(&self, location: &str) -> Url {
        self.located("file_download", location)
    }
}
