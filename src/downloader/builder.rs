//! Builder pattern implementation for creating Downloader instances.
//!
//! # Examples
//!
//! ```rust
//! use extractdl::downloader::DownloaderBuilder;
//! use std::path::PathBuf;
//!
//! let downloader = DownloaderBuilder::new()
//!     .directory(PathBuf::from("./downloads"))
//!     .connections(4)
//!     .remove_parts(true)
//!     .build();
//! assert_eq!(downloader.connections(), 4);
//! ```

use super::{config::DownloaderConfig, downloader::Downloader};
use crate::progress::MonitorConfig;

use std::path::PathBuf;
use std::time::Duration;

/// A builder used to create a [`Downloader`].
#[derive(Debug, Default)]
pub struct DownloaderBuilder {
    config: DownloaderConfig,
}

impl DownloaderBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        DownloaderBuilder::default()
    }

    /// Creates a builder from an existing configuration.
    pub fn from_config(config: DownloaderConfig) -> Self {
        Self { config }
    }

    /// Sets the directory where to store the downloads.
    pub fn directory(mut self, directory: PathBuf) -> Self {
        self.config.directory = directory;
        self
    }

    /// Set the number of byte ranges a sized resource is split into.
    ///
    /// Values below 1 are treated as 1.
    pub fn connections(mut self, connections: usize) -> Self {
        self.config.connections = connections.max(1);
        self
    }

    /// Set the number of segments fetched at the same time.
    pub fn max_concurrent_segments(mut self, max: usize) -> Self {
        self.config.max_concurrent_segments = max.max(1);
        self
    }

    /// Set the delay between two progress samples.
    pub fn progress_interval(mut self, interval: Duration) -> Self {
        self.config.monitor.interval = interval;
        self
    }

    /// Log a progress line every `samples` samples.
    pub fn progress_log_every(mut self, samples: u32) -> Self {
        self.config.monitor.log_every = samples;
        self
    }

    /// Set the whole monitor configuration.
    pub fn monitor(mut self, monitor: MonitorConfig) -> Self {
        self.config.monitor = monitor;
        self
    }

    /// Delete the segment files once merged.
    pub fn remove_parts(mut self, remove: bool) -> Self {
        self.config.remove_parts = remove;
        self
    }

    /// Draw progress bars on the terminal.
    pub fn show_progress(mut self, show: bool) -> Self {
        self.config.show_progress = show;
        self
    }

    /// Create the [`Downloader`] with the specified options.
    pub fn build(self) -> Downloader {
        Downloader::new(self.config)
    }
}
