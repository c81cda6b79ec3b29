//! Downloader module containing the core downloader, its builder and its
//! configuration.
//!
//! - `downloader` - [`Downloader`], plans, fetches and merges one target
//! - `builder` - [`DownloaderBuilder`] for configuration using the builder pattern
//! - `config` - [`DownloaderConfig`] and its defaults
//!
//! # Examples
//!
//! ```rust
//! use extractdl::downloader::DownloaderBuilder;
//!
//! // Split sized resources into 4 ranges and clean up after merging.
//! let downloader = DownloaderBuilder::new()
//!     .connections(4)
//!     .remove_parts(true)
//!     .build();
//! ```

pub mod builder;
pub mod config;
pub mod downloader;

pub use builder::DownloaderBuilder;
pub use config::{DownloaderConfig, DEFAULT_MAX_CONCURRENT_SEGMENTS};
pub use downloader::Downloader;
