//! Configuration structures and defaults for the downloader.
//!
//! # Examples
//!
//! ```rust
//! use extractdl::downloader::DownloaderConfig;
//! use extractdl::progress::MonitorConfig;
//! use std::time::Duration;
//!
//! let config = DownloaderConfig {
//!     connections: 4,
//!     monitor: MonitorConfig {
//!         interval: Duration::from_millis(500),
//!         log_every: 10,
//!     },
//!     ..DownloaderConfig::default()
//! };
//! assert!(!config.remove_parts);
//! ```

use crate::progress::MonitorConfig;

use std::env::current_dir;
use std::path::PathBuf;

/// Default upper bound of segments fetched at the same time.
pub const DEFAULT_MAX_CONCURRENT_SEGMENTS: usize = 8;

/// Configuration structure for the downloader
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloaderConfig {
    /// Directory where to store the downloaded files.
    pub directory: PathBuf,
    /// Number of byte ranges a sized resource is split into.
    pub connections: usize,
    /// Number of segments fetched at the same time.
    pub max_concurrent_segments: usize,
    /// Sampling cadence of the per segment progress monitors.
    pub monitor: MonitorConfig,
    /// Delete the segment files once merged.
    pub remove_parts: bool,
    /// Draw progress bars.
    pub show_progress: bool,
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            directory: current_dir().unwrap_or_default(),
            connections: 1,
            max_concurrent_segments: DEFAULT_MAX_CONCURRENT_SEGMENTS,
            monitor: MonitorConfig::default(),
            remove_parts: false,
            show_progress: false,
        }
    }
}
