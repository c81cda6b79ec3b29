use std::fs;
use std::path::Path;
use tempfile::TempDir;
use wiremock::{Request, Respond, ResponseTemplate};

use extractdl::api::{ApiClient, Endpoints};
use extractdl::http::{create_http_client, HttpClientConfig};
use reqwest_middleware::ClientWithMiddleware;

/// Path of the API below the mock server root.
pub const API_PREFIX: &str = "/api";

/// Creates a temporary directory for testing purposes
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Creates random file content of the given size
pub fn create_test_content(size: usize) -> Vec<u8> {
    (0..size).map(|_| rand::random::<u8>()).collect()
}

/// Asserts that a file holds exactly `expected`
pub fn assert_file_content(path: &Path, expected: &[u8]) {
    let content = fs::read(path).expect("Failed to read file");
    assert_eq!(content.len(), expected.len(), "File size mismatch at {:?}", path);
    assert!(content == expected, "File content mismatch at {:?}", path);
}

/// Creates a client with the default configuration
pub fn create_test_client() -> ClientWithMiddleware {
    create_http_client(HttpClientConfig::default()).expect("Failed to create client")
}

/// Creates an authenticated API client talking to `server_uri`
pub fn create_test_api(server_uri: &str) -> ApiClient {
    let endpoints =
        Endpoints::new(&format!("{}{}", server_uri, API_PREFIX)).expect("Invalid base url");
    ApiClient::new(create_test_client(), endpoints)
        .with_token("test-token")
        .expect("Invalid token")
}

/// Serves a fixed body, honouring `Range: bytes=<start>-[<end>]`.
///
/// Answers `206` with the requested slice when a range is present, `200` with
/// the whole body otherwise.
pub struct RangeResponder {
    body: Vec<u8>,
}

impl RangeResponder {
    pub fn new(body: Vec<u8>) -> Self {
        Self { body }
    }
}

impl Respond for RangeResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let range = request
            .headers
            .get("range")
            .and_then(|v| v.to_str().ok())
            .and_then(parse_range);

        let len = self.body.len();
        match range {
            Some((start, end)) if start < len => {
                let end = end.unwrap_or(len - 1).min(len - 1);
                ResponseTemplate::new(206)
                    .insert_header(
                        "content-range",
                        format!("bytes {}-{}/{}", start, end, len).as_str(),
                    )
                    .set_body_bytes(self.body[start..=end].to_vec())
            }
            Some(_) => ResponseTemplate::new(416),
            None => ResponseTemplate::new(200).set_body_bytes(self.body.clone()),
        }
    }
}

fn parse_range(value: &str) -> Option<(usize, Option<usize>)> {
    let spec = value.strip_prefix("bytes=")?;
    let (start, end) = spec.split_once('-')?;
    let start = start.parse().ok()?;
    let end = if end.is_empty() {
        None
    } else {
        Some(end.parse().ok()?)
    };
    Some((start, end))
}

/// Range header values received by the server, in arrival order
pub fn received_ranges(requests: &[Request]) -> Vec<Option<String>> {
    requests
        .iter()
        .map(|r| {
            r.headers
                .get("range")
                .and_then(|v| v.to_str().ok())
                .map(String::from)
        })
        .collect()
}
