//! Authenticated access to the extraction API.

use super::endpoints::Endpoints;
use super::models::{
    Credentials, ExtractedFile, ExtractionEnvelope, TokenRequest, TokenResponse,
};
use crate::error::{Error, Result};
use crate::http::RequestHeaders;
use crate::job::{PollResponse, StatusSource};

use async_trait::async_trait;
use reqwest::{header::LOCATION, Response, StatusCode, Url};
use reqwest_middleware::ClientWithMiddleware;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Sends API requests with an explicit, immutable header set.
#[derive(Clone)]
pub struct ApiClient {
    client: ClientWithMiddleware,
    endpoints: Endpoints,
    headers: RequestHeaders,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("endpoints", &self.endpoints)
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl ApiClient {
    /// Creates an unauthenticated client sending the API headers.
    pub fn new(client: ClientWithMiddleware, endpoints: Endpoints) -> Self {
        Self {
            client,
            endpoints,
            headers: RequestHeaders::api(),
        }
    }

    /// Returns a copy that authenticates with `token`.
    pub fn with_token(&self, token: &str) -> Result<Self> {
        Ok(Self {
            client: self.client.clone(),
            endpoints: self.endpoints.clone(),
            headers: self.headers.with_token(token)?,
        })
    }

    /// Whether an `Authorization` header is attached.
    pub fn is_authenticated(&self) -> bool {
        self.headers.get("authorization").is_some()
    }

    /// Headers sent with every API request.
    pub fn headers(&self) -> &RequestHeaders {
        &self.headers
    }

    /// The endpoint set.
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// The underlying HTTP client.
    pub fn client(&self) -> &ClientWithMiddleware {
        &self.client
    }

    /// Requests a bearer token for `credentials`.
    pub async fn request_token(&self, credentials: &Credentials) -> Result<String> {
        let url = self.endpoints.request_token()?;
        let body = serde_json::to_vec(&TokenRequest { credentials })?;
        debug!(url = %url, username = %credentials.username, "Requesting token");

        let res = self
            .client
            .post(url)
            .headers(self.headers.to_header_map())
            .body(body)
            .send()
            .await?;
        let body = expect_ok(res).await?;
        let token: TokenResponse = serde_json::from_str(&body)?;
        Ok(token.value)
    }

    /// Submits an extraction request document.
    ///
    /// The answer is returned undecoded: it is the starting point of the
    /// [`JobPoller`](crate::job::JobPoller).
    pub async fn submit_extraction<T: Serialize>(&self, request: &T) -> Result<PollResponse> {
        let url = self.endpoints.extract_raw()?;
        let body = serde_json::to_vec(&ExtractionEnvelope {
            extraction_request: request,
        })?;
        debug!(url = %url, "Submitting extraction");

        let res = self
            .client
            .post(url)
            .headers(self.headers.to_header_map())
            .body(body)
            .send()
            .await?;
        into_poll_response(res).await
    }

    /// Resolves the name and size of the file produced by a report
    /// extraction.
    pub async fn file_metadata(&self, extraction_id: &str) -> Result<ExtractedFile> {
        let url = self.endpoints.report_extraction_full_file(extraction_id)?;
        debug!(url = %url, "Requesting file information");

        let res = self
            .client
            .get(url)
            .headers(self.headers.to_header_map())
            .send()
            .await?;
        let body = expect_ok(res).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl StatusSource for ApiClient {
    async fn check_status(&self, url: &Url) -> Result<PollResponse> {
        let res = self
            .client
            .get(url.clone())
            .headers(self.headers.to_header_map())
            .send()
            .await?;
        into_poll_response(res).await
    }
}

/// Reads the body of a response that must be `200 OK`.
pub(crate) async fn expect_ok(res: Response) -> Result<String> {
    let status = res.status();
    let body = res.text().await?;
    if status != StatusCode::OK {
        return Err(Error::Protocol { status, body });
    }
    Ok(body)
}

async fn into_poll_response(res: Response) -> Result<PollResponse> {
    let status = res.status();
    let location = res
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    let body = res.text().await?;
    Ok(PollResponse {
        status,
        location,
        body,
    })
}
