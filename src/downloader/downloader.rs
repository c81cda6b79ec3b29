//! Core downloader implementation with fetch logic.
//!
//! A [`Downloader`] splits a sized [`DownloadTarget`] into byte ranges,
//! fetches them concurrently into their own segment files, then merges the
//! segments into the output file.
//!
//! # Examples
//!
//! ```rust,no_run
//! use extractdl::download::DownloadTarget;
//! use extractdl::downloader::DownloaderBuilder;
//! use extractdl::http::{create_http_client, HttpClientConfig};
//! use reqwest::Url;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = create_http_client(HttpClientConfig::default())?;
//! let target = DownloadTarget::new(Url::parse("https://example.com/data.csv.gz")?)
//!     .with_size(Some(1_000_000));
//!
//! let downloader = DownloaderBuilder::new()
//!     .directory(PathBuf::from("./downloads"))
//!     .connections(4)
//!     .build();
//! let summary = downloader.download(&client, &target).await?;
//! println!("{} bytes in {:?}", summary.size(), summary.elapsed());
//! # Ok(())
//! # }
//! ```

use super::config::DownloaderConfig;
use crate::download::{
    fetch_segment, merge, remove_parts, DownloadPlan, DownloadTarget, SegmentReport, Summary,
};
use crate::error::{Error, Result};
use crate::progress::{MonitorConfig, ProgressDisplay};

use futures::stream::{self, StreamExt, TryStreamExt};
use reqwest_middleware::ClientWithMiddleware;
use std::fmt;
use std::path::PathBuf;
use tokio::fs;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Represents the download controller.
///
/// A downloader can be created via its builder:
///
/// ```rust
/// # fn main()  {
/// use extractdl::downloader::DownloaderBuilder;
///
/// let d = DownloaderBuilder::new().build();
/// # }
/// ```
#[derive(Clone)]
pub struct Downloader {
    config: DownloaderConfig,
}

impl fmt::Debug for Downloader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Downloader")
            .field("config", &self.config)
            .finish()
    }
}

impl Downloader {
    /// Creates a new Downloader with the given configuration.
    pub(crate) fn new(config: DownloaderConfig) -> Self {
        Self { config }
    }

    /// Gets the directory where files will be downloaded.
    pub fn directory(&self) -> &PathBuf {
        &self.config.directory
    }

    /// Gets the number of byte ranges a sized resource is split into.
    pub fn connections(&self) -> usize {
        self.config.connections
    }

    /// Gets the number of segments fetched at the same time.
    pub fn max_concurrent_segments(&self) -> usize {
        self.config.max_concurrent_segments
    }

    /// Gets the progress sampling configuration.
    pub fn monitor(&self) -> MonitorConfig {
        self.config.monitor
    }

    /// Gets whether segment files are deleted after the merge.
    pub fn remove_parts(&self) -> bool {
        self.config.remove_parts
    }

    /// Gets whether progress bars are drawn.
    pub fn show_progress(&self) -> bool {
        self.config.show_progress
    }

    /// Plans the download of `target` into the configured directory.
    ///
    /// A target without a known, non-zero size is fetched as a single
    /// segment.
    pub fn plan(&self, target: &DownloadTarget) -> DownloadPlan {
        let parallelism = if target.is_segmentable() {
            self.config.connections.max(1)
        } else {
            1
        };
        let output = self.config.directory.join(target.output_name());
        DownloadPlan::new(target.size, parallelism, &output)
    }

    /// Downloads `target`.
    ///
    /// Every segment must succeed before the merge runs: the first failure
    /// drops the segments still in flight and is returned as is.
    pub async fn download(
        &self,
        client: &ClientWithMiddleware,
        target: &DownloadTarget,
    ) -> Result<Summary> {
        let start = Instant::now();

        debug!("Creating destination directory {:?}", &self.config.directory);
        fs::create_dir_all(&self.config.directory).await?;

        let plan = self.plan(target);
        info!(
            "Download: {}, {} segment(s), Size: {}",
            plan.output().display(),
            plan.segments().len(),
            plan.total_size()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "unknown".to_string())
        );
        for segment in plan.segments() {
            debug!("Segment {}: {}", segment.index, segment.range);
        }

        let display = ProgressDisplay::new(self.config.show_progress, plan.segments().len());
        let mut reports = self.fetch_all(client, target, &plan, &display).await?;
        display.finish();
        reports.sort_by_key(|r| r.index);

        let size = merge(&plan).await?;
        if let Some(expected) = plan.total_size() {
            if size != expected {
                return Err(Error::SizeMismatch {
                    path: plan.output().to_path_buf(),
                    expected,
                    actual: size,
                });
            }
        }

        if self.config.remove_parts {
            remove_parts(&plan).await?;
        }

        let elapsed = start.elapsed();
        info!("Download Time: {:.3}s", elapsed.as_secs_f64());
        Ok(Summary::new(
            plan.output().to_path_buf(),
            size,
            reports,
            elapsed,
            self.config.remove_parts && plan.is_segmented(),
        ))
    }

    /// Fetches every segment of `plan`, at most `max_concurrent_segments` at
    /// a time.
    async fn fetch_all(
        &self,
        client: &ClientWithMiddleware,
        target: &DownloadTarget,
        plan: &DownloadPlan,
        display: &ProgressDisplay,
    ) -> Result<Vec<SegmentReport>> {
        let monitor = self.config.monitor;
        stream::iter(plan.segments())
            .map(|segment| {
                let bar = display.segment_bar(segment.index);
                async move {
                    let report =
                        fetch_segment(client, target, segment, monitor, bar.clone()).await?;
                    display.finish_segment(&bar);
                    Ok::<_, Error>(report)
                }
            })
            .buffer_unordered(self.config.max_concurrent_segments.max(1))
            .try_collect()
            .await
            .inspect_err(|e| warn!("Segment download failed: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::downloader::DownloaderBuilder;
    use crate::download::SegmentRange;
    use reqwest::Url;

    fn target(size: Option<u64>) -> DownloadTarget {
        DownloadTarget::new(Url::parse("https://example.com/files/data.csv.gz").unwrap())
            .with_size(size)
    }

    #[test]
    fn test_plan_uses_connections_for_sized_targets() {
        let d = DownloaderBuilder::new()
            .directory(PathBuf::from("out"))
            .connections(4)
            .build();
        let plan = d.plan(&target(Some(1_000_000)));

        assert_eq!(plan.output(), PathBuf::from("out").join("data.csv.gz"));
        assert_eq!(plan.segments().len(), 4);
        assert_eq!(
            plan.segments()[3].range,
            SegmentRange::From(750_000)
        );
    }

    #[test]
    fn test_plan_unknown_size_is_single_segment() {
        let d = DownloaderBuilder::new().connections(4).build();
        let plan = d.plan(&target(None));

        assert!(!plan.is_segmented());
        assert_eq!(plan.segments()[0].range, SegmentRange::Full);
    }

    #[test]
    fn test_plan_zero_size_is_single_segment() {
        let d = DownloaderBuilder::new().connections(4).build();
        assert_eq!(d.plan(&target(Some(0))).segments().len(), 1);
    }
}
