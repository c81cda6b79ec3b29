//! End-to-end extraction: authenticate, submit, wait, locate, download.

use super::config::{Authentication, ExtractionConfig};
use crate::api::{ApiClient, Endpoints, RawExtractionResult};
use crate::download::{DownloadTarget, FileLocator, Summary};
use crate::downloader::{Downloader, DownloaderBuilder};
use crate::error::{Error, Result};
use crate::http::create_http_client;
use crate::job::{Job, JobPoller};

use serde::Serialize;
use std::fmt;
use tokio::time::Instant;
use tracing::{info, warn};

/// Everything produced by a successful [`Extractor::run`].
#[derive(Debug, Clone)]
pub struct ExtractionOutcome {
    /// The completed job.
    pub job: Job,
    /// Decoded terminal result.
    pub result: RawExtractionResult,
    /// The resource that was downloaded.
    pub target: DownloadTarget,
    /// The download itself.
    pub summary: Summary,
}

/// Runs extraction requests against the API and downloads their result.
///
/// ```rust,no_run
/// use extractdl::extractor::ExtractorBuilder;
/// use serde_json::json;
///
/// # async fn example() -> extractdl::Result<()> {
/// let extractor = ExtractorBuilder::new()
///     .credentials("user", "secret")
///     .connections(4)
///     .build()?;
/// let outcome = extractor
///     .run(&json!({
///         "@odata.type": "#DataScope.Select.Api.Extractions.ExtractionRequests.TickHistoryMarketDepthExtractionRequest",
///         "ContentFieldNames": ["Ask Price", "Bid Price"],
///     }))
///     .await?;
/// println!("{}", outcome.summary.output().display());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Extractor {
    config: ExtractionConfig,
    api: ApiClient,
    downloader: Downloader,
}

impl fmt::Debug for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extractor")
            .field("api", &self.api)
            .field("downloader", &self.downloader)
            .field("mode", &self.config.mode)
            .field("poll_policy", &self.config.poll_policy)
            .finish()
    }
}

impl Extractor {
    pub(crate) fn new(config: ExtractionConfig) -> Result<Self> {
        let endpoints = Endpoints::new(&config.base_url)?;
        let client = create_http_client(config.http.clone())?;
        let downloader = DownloaderBuilder::from_config(config.downloader.clone()).build();
        Ok(Self {
            api: ApiClient::new(client, endpoints),
            downloader,
            config,
        })
    }

    /// Gets the configuration.
    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Gets the unauthenticated API client.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Gets the downloader.
    pub fn downloader(&self) -> &Downloader {
        &self.downloader
    }

    /// Returns an API client carrying the configured token, requesting one
    /// first when credentials were given.
    pub async fn authenticate(&self) -> Result<ApiClient> {
        match self.config.authentication {
            Some(Authentication::Token(ref token)) => self.api.with_token(token),
            Some(Authentication::Credentials(ref credentials)) => {
                let token = self.api.request_token(credentials).await?;
                self.api.with_token(&token)
            }
            None => Err(Error::Internal(
                "no credentials or token configured".to_string(),
            )),
        }
    }

    /// Submits `request`, waits for the extraction to complete and downloads
    /// its result.
    ///
    /// `request` is the body of the `ExtractionRequest` member of the
    /// submitted document.
    pub async fn run<T: Serialize>(&self, request: &T) -> Result<ExtractionOutcome> {
        info!("Step 1: RequestToken");
        let api = self.authenticate().await?;

        info!("Step 2: Send Extraction Request");
        let initial = api.submit_extraction(request).await?;

        info!("Step 3: Wait for the Extraction to Complete");
        let origin = api.endpoints().extract_raw()?;
        let job = JobPoller::new(api.clone(), self.config.poll_policy)
            .poll(initial, &origin)
            .await?;
        let body = job.result().unwrap_or_default();
        let result: RawExtractionResult = serde_json::from_str(body)?;
        info!("JobId: {}", result.job_id);
        for note in &result.notes {
            info!("Note: {}", note);
        }
        for error in &result.identifier_validation_errors {
            warn!(
                "Invalid identifier {}: {}",
                error.identifier.identifier, error.message
            );
        }

        info!("Step 4: Get File Information");
        let target = FileLocator::new(&api, self.config.mode, self.downloader.connections())
            .locate(&result)
            .await?;

        info!("Step 5: Download File");
        let start = Instant::now();
        let summary = self.downloader.download(api.client(), &target).await?;
        info!(
            "Download Time: {:.3}s, Output: {}",
            start.elapsed().as_secs_f64(),
            summary.output().display()
        );

        Ok(ExtractionOutcome {
            job,
            result,
            target,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::extractor::ExtractorBuilder;

    #[tokio::test]
    async fn test_authenticate_with_token() {
        let e = ExtractorBuilder::new().token("abc").build().unwrap();
        let api = e.authenticate().await.unwrap();
        assert!(api.is_authenticated());
        assert!(!e.api().is_authenticated());
        assert_eq!(api.headers().get("authorization").unwrap(), "Token abc");
    }

    #[tokio::test]
    async fn test_authenticate_without_credentials() {
        let e = ExtractorBuilder::new().build().unwrap();
        assert!(matches!(
            e.authenticate().await.unwrap_err(),
            crate::Error::Internal(_)
        ));
    }
}
