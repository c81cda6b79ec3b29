//! HTTP client setup and middleware configuration.
//!
//! The client created here is shared by every stage of an extraction: token
//! request, submission, status polling, metadata lookup and segment fetches.
//!
//! # Features
//!
//! - **Tracing**: every request is wrapped in a `reqwest-tracing` span
//! - **Diagnostic dump**: optional request/response logging ([`HttpTrace`])
//! - **Retry Logic**: optional exponential backoff for transient failures,
//!   disabled by default
//! - **Proxy Support**: optional HTTP/HTTPS proxy configuration
//! - **No automatic redirects**: a `302` is returned to the caller so the
//!   direct-download redirect can be inspected
//!
//! # Examples
//!
//! ```rust
//! use extractdl::http::{create_http_client, HttpClientConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HttpClientConfig {
//!     retries: 2,
//!     proxy: None,
//!     trace: true,
//! };
//! let client = create_http_client(config)?;
//! # Ok(())
//! # }
//! ```

use super::trace::HttpTrace;

use reqwest::{redirect, Proxy};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use reqwest_tracing::TracingMiddleware;

/// Configuration for HTTP client setup.
///
/// There is deliberately no default header map here: headers travel with each
/// request as [`RequestHeaders`](super::RequestHeaders).
#[derive(Debug, Clone, Default)]
pub struct HttpClientConfig {
    /// Number of retries for transient failures. `0` disables retrying.
    pub retries: u32,
    /// Optional proxy configuration.
    pub proxy: Option<Proxy>,
    /// Log every request and response.
    pub trace: bool,
}

/// Creates an HTTP client with middleware configuration.
///
/// The inner client never follows redirects.
pub fn create_http_client(
    config: HttpClientConfig,
) -> Result<ClientWithMiddleware, reqwest::Error> {
    let mut inner_client_builder = reqwest::Client::builder().redirect(redirect::Policy::none());

    if let Some(proxy) = config.proxy {
        inner_client_builder = inner_client_builder.proxy(proxy);
    }

    let inner_client = inner_client_builder.build()?;

    let mut builder = ClientBuilder::new(inner_client).with(TracingMiddleware::default());

    if config.retries > 0 {
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.retries);
        builder = builder.with(RetryTransientMiddleware::new_with_policy(retry_policy));
    }

    if config.trace {
        builder = builder.with(HttpTrace);
    }

    Ok(builder.build())
}
