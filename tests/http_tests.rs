//! Tests for the HTTP client configuration and header handling.

use extractdl::http::{create_http_client, HttpClientConfig, RequestHeaders};
use reqwest::StatusCode;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;
use common::helpers::*;

#[tokio::test]
async fn test_redirects_are_not_followed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/moved"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/elsewhere"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/elsewhere"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let res = create_test_client()
        .get(format!("{}/moved", server.uri()))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(res.headers().get("location").unwrap(), "/elsewhere");
}

#[tokio::test]
async fn test_no_retry_by_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let res = create_test_client()
        .get(server.uri())
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_trace_middleware_is_transparent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("authorization", "Token secret"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;
    let client = create_http_client(HttpClientConfig {
        retries: 0,
        proxy: None,
        trace: true,
    })
    .unwrap();
    let headers = RequestHeaders::new().with_token("secret").unwrap();

    let res = client
        .get(server.uri())
        .headers(headers.to_header_map())
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn test_api_headers_are_sent_explicitly() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/Extractions/ReportExtractions('7')/FullFile"))
        .and(header("authorization", "Token test-token"))
        .and(header("content-type", "application/json"))
        .and(header("prefer", "respond-async"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ExtractedFileName": "f.csv.gz",
            "Size": 10
        })))
        .expect(1)
        .mount(&server)
        .await;

    let file = create_test_api(&server.uri())
        .file_metadata("7")
        .await
        .unwrap();

    assert_eq!(file.extracted_file_name, "f.csv.gz");
    assert_eq!(file.size, 10);
}

#[tokio::test]
async fn test_undecodable_metadata_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = create_test_api(&server.uri())
        .file_metadata("7")
        .await
        .unwrap_err();

    assert!(matches!(err, extractdl::Error::Decode { .. }));
}
