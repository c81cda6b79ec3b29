//! Diagnostic request/response tracing middleware.

use http::Extensions;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next};
use tracing::debug;

/// Logs method, URL and headers of every request, and status and headers of
/// every response. The `Authorization` value is never logged.
#[derive(Debug, Clone, Default)]
pub struct HttpTrace;

#[async_trait::async_trait]
impl Middleware for HttpTrace {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        debug!(
            method = %req.method(),
            url = %req.url(),
            headers = ?redact(req.headers()),
            "HTTP request"
        );

        let res = next.run(req, extensions).await?;

        debug!(
            status = %res.status(),
            url = %res.url(),
            headers = ?res.headers(),
            "HTTP response"
        );
        Ok(res)
    }
}

/// Returns a copy of `headers` with credentials masked.
pub(crate) fn redact(headers: &HeaderMap) -> HeaderMap {
    let mut headers = headers.clone();
    if headers.contains_key(AUTHORIZATION) {
        headers.insert(AUTHORIZATION, HeaderValue::from_static("<redacted>"));
    }
    headers
}
