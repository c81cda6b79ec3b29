//! Retrieval of a single segment.

use super::plan::{Segment, SegmentRange};
use super::target::DownloadTarget;
use crate::error::{Error, Result};
use crate::progress::{MonitorConfig, ProgressMonitor, ProgressReport};

use futures::StreamExt;
use indicatif::ProgressBar;
use reqwest::StatusCode;
use reqwest_middleware::ClientWithMiddleware;
use std::path::PathBuf;
use tokio::{fs::File, io::AsyncWriteExt, sync::oneshot};
use tracing::debug;

/// Outcome of a fetched segment.
#[derive(Debug, Clone)]
pub struct SegmentReport {
    /// Segment index.
    pub index: usize,
    /// File the segment was written to.
    pub path: PathBuf,
    /// HTTP status of the answer, 200 or 206.
    pub status: StatusCode,
    /// Bytes written.
    pub bytes: u64,
    /// Throughput figures of the paired monitor.
    pub progress: ProgressReport,
}

/// Fetches `segment` of `target` into the segment's own file.
///
/// Sends `Range: bytes=<start>-<end>` (or `bytes=<start>-` for the open last
/// segment, nothing for a full-file request) on top of the target headers.
/// A ranged request only accepts `206`: a `200` means the server ignored the
/// range and sent the whole resource. A full-file request accepts `200` or
/// `206`. Anything else fails with the status and body. When the size of the
/// resource is known, a segment that does not hold exactly its range fails
/// with [`Error::SizeMismatch`].
///
/// The body is streamed to disk while a [`ProgressMonitor`] samples the file;
/// the monitor is stopped and awaited before returning, whatever the outcome
/// of the transfer.
pub async fn fetch_segment(
    client: &ClientWithMiddleware,
    target: &DownloadTarget,
    segment: &Segment,
    monitor: MonitorConfig,
    bar: ProgressBar,
) -> Result<SegmentReport> {
    let headers = match segment.range.header_value() {
        Some(range) => target.headers.with_range(&range)?,
        None => target.headers.clone(),
    };

    debug!(
        "Download File: {}, range {}",
        segment.path.display(),
        segment.range
    );
    let res = client
        .get(target.url.clone())
        .headers(headers.to_header_map())
        .send()
        .await?;

    let status = res.status();
    let accepted = match segment.range {
        SegmentRange::Full => status == StatusCode::OK || status == StatusCode::PARTIAL_CONTENT,
        _ => status == StatusCode::PARTIAL_CONTENT,
    };
    if !accepted {
        let body = if status.is_success() {
            format!("range {} ignored by the server", segment.range)
        } else {
            res.text().await.unwrap_or_default()
        };
        return Err(Error::Protocol { status, body });
    }

    let expected = res.content_length();
    if let Some(len) = expected {
        bar.set_length(len);
    }

    debug!("Creating destination file {:?}", &segment.path);
    let mut file = File::create(&segment.path).await?;

    let (done_tx, done_rx) = oneshot::channel();
    let monitor = ProgressMonitor::new(&segment.path, expected, monitor).with_bar(bar);

    let transfer = async move {
        let mut written: u64 = 0;
        let mut stream = res.bytes_stream();
        while let Some(item) = stream.next().await {
            let mut chunk = item?;
            written += chunk.len() as u64;
            file.write_all_buf(&mut chunk).await?;
        }
        file.flush().await?;
        let _ = done_tx.send(written);
        Ok::<u64, Error>(written)
    };

    // A failed transfer drops `done_tx`, which stops the monitor as well.
    let (transferred, progress) = tokio::join!(transfer, monitor.run(done_rx));
    let bytes = transferred?;
    if let Some(expected) = segment.range.len(target.size) {
        if bytes != expected {
            return Err(Error::SizeMismatch {
                path: segment.path.clone(),
                expected,
                actual: bytes,
            });
        }
    }

    debug!(
        index = segment.index,
        bytes,
        status = %status,
        "Segment retrieved"
    );
    Ok(SegmentReport {
        index: segment.index,
        path: segment.path.clone(),
        status,
        bytes,
        progress,
    })
}
