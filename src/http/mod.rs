//! HTTP client setup and per-request header handling.
//!
//! - [`client`] - client creation and middleware configuration
//! - [`headers`] - immutable header sets passed to every request
//! - [`trace`] - optional diagnostic request/response logging
//!
//! # Examples
//!
//! ```rust
//! use extractdl::http::{create_http_client, HttpClientConfig, RequestHeaders};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = create_http_client(HttpClientConfig::default())?;
//! let headers = RequestHeaders::api().with_token("my-token")?;
//! assert_eq!(headers.len(), 3);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod headers;
pub mod trace;

pub use client::{create_http_client, HttpClientConfig};
pub use headers::RequestHeaders;
pub use trace::HttpTrace;
