//! Resolution of the concrete download target of a completed extraction.
//!
//! The result of a raw extraction is served by the API itself
//! ([`DownloadMode::Proxied`]) or, on request, by a redirect to the backing
//! store ([`DownloadMode::Direct`]). The store does not accept the API
//! headers, so a redirected target carries none.

use super::target::DownloadTarget;
use crate::api::{ApiClient, RawExtractionResult};
use crate::error::{Error, Result};
use crate::http::RequestHeaders;

use reqwest::header::LOCATION;
use reqwest::StatusCode;
use tracing::{debug, info, warn};

/// Where the result bytes are read from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DownloadMode {
    /// Through the API endpoint, with the API headers.
    #[default]
    Proxied,
    /// From the backing store the API redirects to.
    Direct,
}

/// Turns a completed extraction into a [`DownloadTarget`].
#[derive(Debug)]
pub struct FileLocator<'a> {
    api: &'a ApiClient,
    mode: DownloadMode,
    connections: usize,
}

impl<'a> FileLocator<'a> {
    /// Creates a locator. `connections` above 1 makes it look up the file
    /// size so the download can be split.
    pub fn new(api: &'a ApiClient, mode: DownloadMode, connections: usize) -> Self {
        Self {
            api,
            mode,
            connections,
        }
    }

    /// Resolves the target of `result`.
    pub async fn locate(&self, result: &RawExtractionResult) -> Result<DownloadTarget> {
        let url = self.api.endpoints().raw_extraction_result(&result.job_id)?;
        let mut target = DownloadTarget::new(url).with_headers(self.api.headers().clone());

        target = match self.size_and_name(result).await {
            Ok((filename, size)) => target.with_filename(filename).with_size(Some(size)),
            Err(Error::MetadataUnavailable(reason)) => {
                info!("Disable Concurrent Download: {}", reason);
                target
                    .with_filename(result.default_filename())
                    .with_size(None)
            }
            Err(e) => return Err(e),
        };

        match self.mode {
            DownloadMode::Proxied => Ok(target),
            DownloadMode::Direct => self.resolve_direct(target).await,
        }
    }

    /// Looks up the name and size of the extracted file.
    ///
    /// Fails with [`Error::MetadataUnavailable`] when a single connection is
    /// requested or the result announces no extraction id.
    async fn size_and_name(&self, result: &RawExtractionResult) -> Result<(String, u64)> {
        if self.connections <= 1 {
            return Err(Error::MetadataUnavailable(
                "single connection requested".to_string(),
            ));
        }
        let id = result.extraction_id().ok_or_else(|| {
            Error::MetadataUnavailable("no extraction id in the result notes".to_string())
        })?;

        let file = self.api.file_metadata(&id).await?;
        info!(
            "File: {}, Size: {} bytes",
            file.extracted_file_name, file.size
        );
        Ok((file.extracted_file_name, file.size))
    }

    /// Asks the API for the store location of `target`.
    ///
    /// On `302` the target becomes the `Location` with every header dropped.
    /// Any other success keeps the proxied target.
    pub async fn resolve_direct(&self, target: DownloadTarget) -> Result<DownloadTarget> {
        let headers = target.headers.with_direct_download();
        debug!(url = %target.url, "Requesting direct download location");
        let res = self
            .api
            .client()
            .get(target.url.clone())
            .headers(headers.to_header_map())
            .send()
            .await?;

        let status = res.status();
        if status == StatusCode::FOUND {
            let raw = res
                .headers()
                .get(LOCATION)
                .and_then(|v| v.to_str().ok())
                .ok_or_else(|| Error::Protocol {
                    status,
                    body: "redirect without a Location header".to_string(),
                })?
                .to_string();
            let url = target.url.join(&raw).map_err(|e| {
                Error::InvalidUrl(format!("The location \"{}\" cannot be parsed: {}", raw, e))
            })?;
            info!("Direct Download: {}", url.host_str().unwrap_or_default());
            return Ok(DownloadTarget {
                url,
                headers: RequestHeaders::stripped(),
                direct: true,
                ..target
            });
        }

        if status.is_client_error() || status.is_server_error() {
            let body = res.text().await.unwrap_or_default();
            return Err(Error::Protocol { status, body });
        }

        warn!(
            status = %status,
            "No redirect for direct download, reading through the API"
        );
        Ok(target)
    }
}
