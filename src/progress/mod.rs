//! Progress observation and display.
//!
//! - `monitor` - [`ProgressMonitor`], samples the on-disk size of a transfer
//!   and reports throughput
//! - `display` - [`ProgressDisplay`], optional `indicatif` bars per segment
//!
//! # Examples
//!
//! ```rust,no_run
//! use extractdl::progress::{MonitorConfig, ProgressMonitor};
//! use std::path::Path;
//! use tokio::sync::oneshot;
//!
//! # async fn example() {
//! let monitor = ProgressMonitor::new(Path::new("out.part1"), Some(1024), MonitorConfig::default());
//! let (done, rx) = oneshot::channel();
//! let handle = tokio::spawn(monitor.run(rx));
//! // ... transfer writes out.part1 ...
//! done.send(1024).unwrap();
//! let report = handle.await.unwrap();
//! println!("avg {:.0} B/s", report.average_bytes_per_sec);
//! # }
//! ```

pub(crate) mod display;
pub(crate) mod monitor;

pub use display::ProgressDisplay;
pub use monitor::{MonitorConfig, ProgressMonitor, ProgressReport, ProgressSample, Throughput};
