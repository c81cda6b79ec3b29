//! Partitioning of a resource into contiguous byte ranges.
//!
//! Every segment but the last has `total_size / parallelism` bytes; the last
//! one is open-ended and absorbs the remainder, so the union of the segments
//! is always the whole resource.
//!
//! ```rust
//! use extractdl::download::{plan_segments, SegmentRange};
//!
//! let ranges = plan_segments(Some(1_000_000), 4);
//! assert_eq!(ranges[0], SegmentRange::Bounded { start: 0, end: 249_999 });
//! assert_eq!(ranges[3], SegmentRange::From(750_000));
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

/// Byte range of one segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentRange {
    /// The whole resource, requested without a `Range` header.
    Full,
    /// From an offset to the end of the resource.
    From(u64),
    /// Inclusive range.
    Bounded { start: u64, end: u64 },
}

impl SegmentRange {
    /// First byte of the range.
    pub fn start(&self) -> u64 {
        match *self {
            SegmentRange::Full => 0,
            SegmentRange::From(start) => start,
            SegmentRange::Bounded { start, .. } => start,
        }
    }

    /// Last byte of the range (inclusive), `None` when open-ended.
    pub fn end(&self) -> Option<u64> {
        match *self {
            SegmentRange::Bounded { end, .. } => Some(end),
            _ => None,
        }
    }

    /// `Range` header value, `None` for a full-file request.
    pub fn header_value(&self) -> Option<String> {
        match *self {
            SegmentRange::Full => None,
            SegmentRange::From(start) => Some(format!("bytes={}-", start)),
            SegmentRange::Bounded { start, end } => Some(format!("bytes={}-{}", start, end)),
        }
    }

    /// Number of bytes covered, given the total size of the resource.
    pub fn len(&self, total_size: Option<u64>) -> Option<u64> {
        match *self {
            SegmentRange::Bounded { start, end } => Some(end - start + 1),
            SegmentRange::From(start) => total_size.map(|t| t.saturating_sub(start)),
            SegmentRange::Full => total_size,
        }
    }
}

impl fmt::Display for SegmentRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            SegmentRange::Full => f.write_str("full"),
            SegmentRange::From(start) => write!(f, "{}-", start),
            SegmentRange::Bounded { start, end } => write!(f, "{}-{}", start, end),
        }
    }
}

/// One contiguous part of a download and the file it is written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Position in the plan, starting at 1.
    pub index: usize,
    /// Byte range requested.
    pub range: SegmentRange,
    /// File receiving the bytes.
    pub path: PathBuf,
}

/// The full partition of a resource into segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadPlan {
    total_size: Option<u64>,
    output: PathBuf,
    segments: Vec<Segment>,
}

impl DownloadPlan {
    /// Plans the download of `total_size` bytes into `output`.
    ///
    /// A single segment plan writes straight to `output`. Otherwise segment
    /// `i` is written to `<output>.part<i>` and must be merged.
    pub fn new(total_size: Option<u64>, parallelism: usize, output: &Path) -> Self {
        let ranges = plan_segments(total_size, parallelism);
        let single = ranges.len() == 1;
        let segments = ranges
            .into_iter()
            .enumerate()
            .map(|(i, range)| Segment {
                index: i + 1,
                range,
                path: if single {
                    output.to_path_buf()
                } else {
                    part_path(output, i + 1)
                },
            })
            .collect();

        Self {
            total_size,
            output: output.to_path_buf(),
            segments,
        }
    }

    /// Total size of the resource, if known.
    pub fn total_size(&self) -> Option<u64> {
        self.total_size
    }

    /// Final output file.
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Segments, in index order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments.
    pub fn parallelism(&self) -> usize {
        self.segments.len()
    }

    /// Whether the segments are separate files needing a merge.
    pub fn is_segmented(&self) -> bool {
        self.segments.len() > 1
    }
}

/// Path of the temporary file of segment `index`.
pub fn part_path(output: &Path, index: usize) -> PathBuf {
    let mut name = output
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(format!(".part{}", index));
    output.with_file_name(name)
}

/// Splits `total_size` bytes into `parallelism` ranges.
///
/// An unknown or zero size, or a parallelism of 1, yields a single
/// [`SegmentRange::Full`]. Parallelism is capped at `total_size` so that no
/// range is empty.
pub fn plan_segments(total_size: Option<u64>, parallelism: usize) -> Vec<SegmentRange> {
    let total = match total_size {
        Some(total) if total > 0 => total,
        _ => return vec![SegmentRange::Full],
    };
    let count = (parallelism.max(1) as u64).min(total);
    if count == 1 {
        return vec![SegmentRange::Full];
    }

    let part_size = total / count;
    (1..=count)
        .map(|i| {
            let start = (i - 1) * part_size;
            if i == count {
                SegmentRange::From(start)
            } else {
                SegmentRange::Bounded {
                    start,
                    end: start + part_size - 1,
                }
            }
        })
        .collect()
}
