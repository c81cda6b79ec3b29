//! Configuration of an end-to-end extraction.

use crate::api::{Credentials, DEFAULT_BASE_URL};
use crate::download::DownloadMode;
use crate::downloader::DownloaderConfig;
use crate::http::HttpClientConfig;
use crate::job::PollPolicy;

/// How the extractor authenticates.
#[derive(Clone, Debug)]
pub enum Authentication {
    /// Request a token with these credentials before submitting.
    Credentials(Credentials),
    /// Use an already issued token.
    Token(String),
}

/// Configuration structure for the extractor
#[derive(Clone, Debug)]
pub struct ExtractionConfig {
    /// Base URL of the API.
    pub base_url: String,
    /// Authentication, required by [`Extractor::run`](super::Extractor::run).
    pub authentication: Option<Authentication>,
    /// Delay and budget of the status checks.
    pub poll_policy: PollPolicy,
    /// Where the result bytes are read from.
    pub mode: DownloadMode,
    /// HTTP client options.
    pub http: HttpClientConfig,
    /// Download options.
    pub downloader: DownloaderConfig,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            authentication: None,
            poll_policy: PollPolicy::default(),
            mode: DownloadMode::default(),
            http: HttpClientConfig::default(),
            downloader: DownloaderConfig::default(),
        }
    }
}
