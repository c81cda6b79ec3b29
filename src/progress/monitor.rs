//! On-disk progress observation of a single transfer.
//!
//! A [`ProgressMonitor`] samples the size of the file a transfer writes to at
//! a fixed cadence, logs a summary every few samples and, once the transfer
//! signals completion, reports average and peak throughput. It only ever
//! reads the file: a failed sample is skipped and never affects the transfer.

use indicatif::ProgressBar;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

/// Sampling cadence of a monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Delay between two samples.
    pub interval: Duration,
    /// Log a summary every `log_every` samples.
    pub log_every: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            log_every: 5,
        }
    }
}

/// Size of a file at a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressSample {
    pub path: PathBuf,
    pub bytes: u64,
    pub at: Instant,
}

/// Throughput figures of a finished transfer.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressReport {
    /// Monitored file.
    pub path: PathBuf,
    /// Bytes transferred.
    pub bytes: u64,
    /// Bytes expected, if known.
    pub expected: Option<u64>,
    /// Number of samples taken.
    pub samples: u32,
    /// Bytes transferred divided by the sampled time.
    pub average_bytes_per_sec: f64,
    /// Largest growth observed between two samples, per second.
    pub peak_bytes_per_sec: f64,
}

/// Running counters of a monitor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Throughput {
    samples: u32,
    previous: u64,
    peak_delta: u64,
}

impl Throughput {
    /// Records a sample and returns the growth since the previous one.
    pub fn record(&mut self, bytes: u64) -> u64 {
        self.samples += 1;
        let delta = bytes.saturating_sub(self.previous);
        self.peak_delta = self.peak_delta.max(delta);
        self.previous = bytes;
        delta
    }

    /// Number of samples recorded.
    pub fn samples(&self) -> u32 {
        self.samples
    }

    /// Whether the latest sample is one of every `log_every` that gets
    /// logged.
    pub fn is_log_sample(&self, log_every: u32) -> bool {
        self.samples > 0 && self.samples % log_every.max(1) == 0
    }

    /// Last observed size.
    pub fn last(&self) -> u64 {
        self.previous
    }

    /// Average over the sampled time. A transfer finishing before the first
    /// sample counts as one interval.
    pub fn average_per_sec(&self, bytes: u64, interval: Duration) -> f64 {
        let elapsed = self.samples.max(1) as f64 * interval.as_secs_f64();
        if elapsed > 0.0 {
            bytes as f64 / elapsed
        } else {
            bytes as f64
        }
    }

    /// Largest single-interval growth, per second.
    pub fn peak_per_sec(&self, interval: Duration) -> f64 {
        let secs = interval.as_secs_f64();
        if secs > 0.0 {
            self.peak_delta as f64 / secs
        } else {
            self.peak_delta as f64
        }
    }
}

/// Observes one in-flight transfer.
#[derive(Debug)]
pub struct ProgressMonitor {
    path: PathBuf,
    expected: Option<u64>,
    config: MonitorConfig,
    bar: Option<ProgressBar>,
}

impl ProgressMonitor {
    pub fn new(path: &Path, expected: Option<u64>, config: MonitorConfig) -> Self {
        Self {
            path: path.to_path_buf(),
            expected,
            config,
            bar: None,
        }
    }

    /// Mirror every sample on a progress bar.
    pub fn with_bar(mut self, bar: ProgressBar) -> Self {
        self.bar = Some(bar);
        self
    }

    /// Takes one sample, `None` if the file cannot be inspected.
    pub async fn sample(&self) -> Option<ProgressSample> {
        match tokio::fs::metadata(&self.path).await {
            Ok(metadata) => Some(ProgressSample {
                path: self.path.clone(),
                bytes: metadata.len(),
                at: Instant::now(),
            }),
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "Progress sample skipped");
                None
            }
        }
    }

    /// Samples until `done` yields the transferred byte count, or its sender
    /// is dropped, then reports.
    pub async fn run(self, mut done: oneshot::Receiver<u64>) -> ProgressReport {
        let interval = self.config.interval.max(Duration::from_millis(1));
        let log_every = self.config.log_every.max(1);
        let mut ticker = time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut throughput = Throughput::default();

        let finished = loop {
            tokio::select! {
                biased;
                result = &mut done => break result.ok(),
                _ = ticker.tick() => {
                    let bytes = match self.sample().await {
                        Some(sample) => sample.bytes,
                        None => throughput.last(),
                    };
                    throughput.record(bytes);
                    if let Some(ref bar) = self.bar {
                        bar.set_position(bytes);
                    }
                    if throughput.is_log_sample(log_every) {
                        self.log_sample(bytes);
                    }
                }
            }
        };

        let bytes = finished.unwrap_or_else(|| throughput.last());
        let report = ProgressReport {
            path: self.path.clone(),
            bytes,
            expected: self.expected,
            samples: throughput.samples(),
            average_bytes_per_sec: throughput.average_per_sec(bytes, interval),
            peak_bytes_per_sec: throughput.peak_per_sec(interval),
        };

        if let Some(ref bar) = self.bar {
            bar.set_position(bytes);
        }
        info!(
            "{}: Download Completed, Speed: Avg {:.2} KB/s, Max {:.2} KB/s",
            self.path.display(),
            report.average_bytes_per_sec / 1024.0,
            report.peak_bytes_per_sec / 1024.0
        );
        report
    }

    fn log_sample(&self, bytes: u64) {
        match self.expected {
            Some(total) if total > 0 => info!(
                "{}, Bytes: {}/Total: {} ({:.0}%)",
                self.path.display(),
                bytes,
                total,
                bytes as f64 / total as f64 * 100.0
            ),
            _ => info!("{}, Bytes: {}", self.path.display(), bytes),
        }
    }
}
