//! Builder of [`Extractor`] instances.

use super::config::{Authentication, ExtractionConfig};
use super::extractor::Extractor;
use crate::api::Credentials;
use crate::download::DownloadMode;
use crate::downloader::DownloaderConfig;
use crate::error::Result;
use crate::job::PollPolicy;

use reqwest::Proxy;
use std::path::PathBuf;

/// A builder used to create an [`Extractor`].
///
/// ```rust
/// # fn main() -> extractdl::Result<()> {
/// use extractdl::extractor::ExtractorBuilder;
///
/// let extractor = ExtractorBuilder::new()
///     .credentials("user", "secret")
///     .connections(4)
///     .direct_download(true)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ExtractorBuilder {
    config: ExtractionConfig,
}

impl ExtractorBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        ExtractorBuilder::default()
    }

    /// Sets the base URL of the API.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Authenticate by requesting a token for these credentials.
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.config.authentication = Some(Authentication::Credentials(Credentials::new(
            username, password,
        )));
        self
    }

    /// Authenticate with an already issued token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.config.authentication = Some(Authentication::Token(token.into()));
        self
    }

    /// Set the delay and budget of the status checks.
    pub fn poll_policy(mut self, policy: PollPolicy) -> Self {
        self.config.poll_policy = policy;
        self
    }

    /// Read the result from the backing store instead of through the API.
    pub fn direct_download(mut self, direct: bool) -> Self {
        self.config.mode = if direct {
            DownloadMode::Direct
        } else {
            DownloadMode::Proxied
        };
        self
    }

    /// Set the number of concurrent connections of the download.
    pub fn connections(mut self, connections: usize) -> Self {
        self.config.downloader.connections = connections.max(1);
        self
    }

    /// Sets the directory where to store the output.
    pub fn directory(mut self, directory: PathBuf) -> Self {
        self.config.downloader.directory = directory;
        self
    }

    /// Set the whole download configuration.
    pub fn downloader(mut self, downloader: DownloaderConfig) -> Self {
        self.config.downloader = downloader;
        self
    }

    /// Set the number of retries for transient HTTP failures.
    pub fn retries(mut self, retries: u32) -> Self {
        self.config.http.retries = retries;
        self
    }

    /// Send every request through `proxy`.
    pub fn proxy(mut self, proxy: Proxy) -> Self {
        self.config.http.proxy = Some(proxy);
        self
    }

    /// Log every HTTP exchange.
    pub fn trace_http(mut self, trace: bool) -> Self {
        self.config.http.trace = trace;
        self
    }

    /// Create the [`Extractor`] with the specified options.
    ///
    /// Fails if the base URL is invalid or the HTTP client cannot be built.
    pub fn build(self) -> Result<Extractor> {
        Extractor::new(self.config)
    }
}
