//! Extractdl submits asynchronous extraction requests to a data extraction
//! API, waits for them to complete and downloads their result, splitting
//! large files into byte ranges fetched concurrently.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use extractdl::{extractor::ExtractorBuilder, Error};
//! use serde_json::json;
//! use std::path::PathBuf;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! extractdl::logging::init();
//!
//! let extractor = ExtractorBuilder::new()
//!     .credentials("user", "secret")
//!     .directory(PathBuf::from("output"))
//!     .connections(4)
//!     .build()?;
//! let outcome = extractor.run(&json!({ "ContentFieldNames": ["Bid Price"] })).await?;
//! println!("{} bytes", outcome.summary.size());
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`api`] - Endpoints, documents and the authenticated API client
//! - [`job`] - Extraction jobs and the status polling loop
//! - [`download`] - Download targets, segment planning, fetching and merging
//! - [`downloader`] - The `Downloader` and `DownloaderBuilder` driving one download
//! - [`extractor`] - The `Extractor` running a whole extraction
//! - [`progress`] - Progress sampling and display
//! - [`http`] - HTTP client functionality and per-request headers
//! - [`error`] - Centralized error handling with the `Error` enum
//! - [`logging`] - Subscriber setup

pub mod api;
pub mod download;
pub mod downloader;
pub mod error;
pub mod extractor;
pub mod http;
pub mod job;
pub mod logging;
pub mod progress;

pub use api::{ApiClient, Credentials, Endpoints, RawExtractionResult};
pub use download::{DownloadMode, DownloadPlan, DownloadTarget, FileLocator, Summary};
pub use downloader::{Downloader, DownloaderBuilder};
pub use error::{Error, Result};
pub use extractor::{ExtractionOutcome, Extractor, ExtractorBuilder};
pub use http::{create_http_client, HttpClientConfig, RequestHeaders};
pub use job::{Job, JobPoller, JobStatus, PollPolicy};
