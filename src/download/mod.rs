//! Segmented retrieval of a single resource.
//!
//! - [`target`] - [`DownloadTarget`], the URL, size and headers of a resource
//! - [`locator`] - [`FileLocator`], resolves the target of a completed
//!   extraction, proxied or direct
//! - [`plan`] - [`DownloadPlan`], the partition of a resource into byte ranges
//! - [`fetch`] - [`fetch_segment`], retrieval of one range into its own file
//! - [`merge`] - reassembly of the segment files, in index order
//! - [`summary`] - [`Summary`] of a completed download
//!
//! # Examples
//!
//! ```rust
//! use extractdl::download::{DownloadPlan, SegmentRange};
//! use std::path::Path;
//!
//! let plan = DownloadPlan::new(Some(10), 3, Path::new("out.bin"));
//! assert_eq!(plan.segments().len(), 3);
//! assert_eq!(plan.segments()[0].range, SegmentRange::Bounded { start: 0, end: 2 });
//! assert_eq!(plan.segments()[2].path, Path::new("out.bin.part3"));
//! ```

pub mod fetch;
pub mod locator;
pub mod merge;
pub mod plan;
pub mod summary;
pub mod target;

pub use fetch::{fetch_segment, SegmentReport};
pub use locator::{DownloadMode, FileLocator};
pub use merge::{merge, remove_parts, MERGE_BUFFER_SIZE};
pub use plan::{part_path, plan_segments, DownloadPlan, Segment, SegmentRange};
pub use summary::Summary;
pub use target::DownloadTarget;
