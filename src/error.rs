//! Error handling for the extraction client.
//!
//! Every fallible operation in the crate returns [`Result`]. Failures are
//! surfaced to the caller as values; nothing in the crate terminates the
//! process. The one recoverable condition, [`Error::MetadataUnavailable`], is
//! handled internally by the file locator, which degrades to a single
//! connection download.

use reqwest::StatusCode;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can happen while running an extraction.
#[derive(Error, Debug)]
pub enum Error {
    /// Error from an underlying system.
    ///
    /// Captures failures that don't fit into other categories.
    #[error("Internal error: {0}")]
    Internal(String),

    /// A URL could not be parsed or does not have the expected shape.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// I/O Error.
    ///
    /// Raised while creating, writing, reading or merging segment files.
    #[error("I/O error")]
    IOError {
        #[from]
        source: io::Error,
    },

    /// Connection level failure reported by the middleware stack (DNS, TLS,
    /// refused connection, middleware error).
    #[error("Transport error")]
    Transport {
        #[from]
        source: reqwest_middleware::Error,
    },

    /// Error from the Reqwest library, typically while streaming a body.
    #[error("Reqwest Error")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },

    /// The server answered with a status code that has no contractual meaning
    /// for the request that was sent.
    ///
    /// The raw body is kept for diagnosis.
    #[error("Unexpected status code {status}: {body}")]
    Protocol {
        /// Status code returned by the server.
        status: StatusCode,
        /// Raw response body.
        body: String,
    },

    /// A response body could not be decoded.
    #[error("Decode error")]
    Decode {
        #[from]
        source: serde_json::Error,
    },

    /// Sizing metadata required for a segmented download is missing.
    ///
    /// Recoverable: the locator falls back to a single connection download.
    #[error("Segmented download metadata unavailable: {0}")]
    MetadataUnavailable(String),

    /// A segment or merged file does not hold the announced number of bytes.
    #[error("{path:?} holds {actual} bytes, expected {expected}")]
    SizeMismatch {
        path: PathBuf,
        expected: u64,
        actual: u64,
    },

    /// The poll policy's attempt budget ran out while the job was still
    /// pending.
    #[error("Job still pending after {attempts} status checks")]
    PollBudgetExhausted {
        /// Number of status requests issued.
        attempts: u32,
    },
}

impl Error {
    /// Returns `true` when the error only means that parallel download
    /// metadata could not be resolved.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::MetadataUnavailable(_))
    }
}

/// Result type alias for operations that can fail with an [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
