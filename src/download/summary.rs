//! Download summary.

use super::fetch::SegmentReport;

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Represents the outcome of a completed download.
#[derive(Debug, Clone)]
pub struct Summary {
    /// Final output file.
    output: PathBuf,
    /// Size of the output in bytes.
    size: u64,
    /// Per segment reports, in index order.
    segments: Vec<SegmentReport>,
    /// Time spent fetching and merging.
    elapsed: Duration,
    /// Whether the temporary segment files were deleted.
    parts_removed: bool,
}

impl Summary {
    pub fn new(
        output: PathBuf,
        size: u64,
        segments: Vec<SegmentReport>,
        elapsed: Duration,
        parts_removed: bool,
    ) -> Self {
        Self {
            output,
            size,
            segments,
            elapsed,
            parts_removed,
        }
    }

    /// Get the output path.
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Get the output size.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Get the segment reports.
    pub fn segments(&self) -> &[SegmentReport] {
        &self.segments
    }

    /// Get the download duration.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Whether the temporary segment files were deleted.
    pub fn parts_removed(&self) -> bool {
        self.parts_removed
    }

    /// Whether the resource was fetched over more than one connection.
    pub fn is_segmented(&self) -> bool {
        self.segments.len() > 1
    }
}
