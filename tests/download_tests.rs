//! Tests for segmented downloads against a local HTTP server.
//!
//! - byte-exact reassembly for every parallelism
//! - single stream fallback when the size is unknown
//! - failures never produce a merged output

use extractdl::download::{DownloadTarget, SegmentRange};
use extractdl::downloader::DownloaderBuilder;
use extractdl::Error;
use reqwest::{StatusCode, Url};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;
use common::helpers::*;

const FILE_PATH: &str = "/files/data.bin";

async fn serve(content: &[u8]) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FILE_PATH))
        .respond_with(RangeResponder::new(content.to_vec()))
        .mount(&server)
        .await;
    server
}

fn target(server: &MockServer, size: Option<u64>) -> DownloadTarget {
    let url = Url::parse(&format!("{}{}", server.uri(), FILE_PATH)).unwrap();
    DownloadTarget::new(url).with_size(size)
}

#[tokio::test]
async fn test_segmented_download_is_byte_identical() {
    let content = create_test_content(10_007);
    let server = serve(&content).await;
    let client = create_test_client();

    for parallelism in 1..=6 {
        let temp_dir = create_temp_dir();
        let downloader = DownloaderBuilder::new()
            .directory(temp_dir.path().to_path_buf())
            .connections(parallelism)
            .build();

        let summary = downloader
            .download(&client, &target(&server, Some(content.len() as u64)))
            .await
            .unwrap();

        assert_eq!(summary.segments().len(), parallelism);
        assert_eq!(summary.size(), content.len() as u64);
        assert_eq!(summary.output(), temp_dir.path().join("data.bin"));
        assert_file_content(summary.output(), &content);
    }
}

#[tokio::test]
async fn test_segments_request_their_ranges() {
    let content = create_test_content(1_000);
    let server = serve(&content).await;
    let temp_dir = create_temp_dir();
    let downloader = DownloaderBuilder::new()
        .directory(temp_dir.path().to_path_buf())
        .connections(4)
        .max_concurrent_segments(1)
        .build();

    let summary = downloader
        .download(&create_test_client(), &target(&server, Some(1_000)))
        .await
        .unwrap();

    let mut ranges = received_ranges(&server.received_requests().await.unwrap());
    ranges.sort();
    assert_eq!(
        ranges,
        vec![
            Some("bytes=0-249".to_string()),
            Some("bytes=250-499".to_string()),
            Some("bytes=500-749".to_string()),
            Some("bytes=750-".to_string()),
        ]
    );
    let indexes: Vec<_> = summary.segments().iter().map(|s| s.index).collect();
    assert_eq!(indexes, vec![1, 2, 3, 4]);
    assert!(summary
        .segments()
        .iter()
        .all(|s| s.status == StatusCode::PARTIAL_CONTENT));
    assert_eq!(summary.segments()[3].bytes, 250);
}

#[tokio::test]
async fn test_unknown_size_is_a_single_stream() {
    let content = create_test_content(4_096);
    let server = serve(&content).await;
    let temp_dir = create_temp_dir();
    let downloader = DownloaderBuilder::new()
        .directory(temp_dir.path().to_path_buf())
        .connections(4)
        .build();

    let summary = downloader
        .download(&create_test_client(), &target(&server, None))
        .await
        .unwrap();

    assert!(!summary.is_segmented());
    assert_eq!(summary.segments()[0].status, StatusCode::OK);
    assert_eq!(
        received_ranges(&server.received_requests().await.unwrap()),
        vec![None]
    );
    assert_file_content(summary.output(), &content);
    assert!(!temp_dir.path().join("data.bin.part1").exists());
}

#[tokio::test]
async fn test_parts_are_kept_unless_removal_is_requested() {
    let content = create_test_content(3_000);
    let server = serve(&content).await;
    let client = create_test_client();

    let kept = create_temp_dir();
    let summary = DownloaderBuilder::new()
        .directory(kept.path().to_path_buf())
        .connections(3)
        .build()
        .download(&client, &target(&server, Some(3_000)))
        .await
        .unwrap();
    assert!(!summary.parts_removed());
    for i in 1..=3 {
        assert!(kept.path().join(format!("data.bin.part{}", i)).exists());
    }

    let removed = create_temp_dir();
    let summary = DownloaderBuilder::new()
        .directory(removed.path().to_path_buf())
        .connections(3)
        .remove_parts(true)
        .build()
        .download(&client, &target(&server, Some(3_000)))
        .await
        .unwrap();
    assert!(summary.parts_removed());
    for i in 1..=3 {
        assert!(!removed.path().join(format!("data.bin.part{}", i)).exists());
    }
    assert_file_content(summary.output(), &content);
}

#[tokio::test]
async fn test_error_status_fails_the_download() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FILE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("storage offline"))
        .mount(&server)
        .await;
    let temp_dir = create_temp_dir();
    let downloader = DownloaderBuilder::new()
        .directory(temp_dir.path().to_path_buf())
        .connections(2)
        .build();

    let err = downloader
        .download(&create_test_client(), &target(&server, Some(100)))
        .await
        .unwrap_err();

    match err {
        Error::Protocol { status, body } => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body, "storage offline");
        }
        e => panic!("unexpected error: {:?}", e),
    }
    assert!(!temp_dir.path().join("data.bin").exists());
}

#[tokio::test]
async fn test_one_failed_segment_prevents_the_merge() {
    let content = create_test_content(1_000);
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FILE_PATH))
        .and(header("range", "bytes=250-499"))
        .respond_with(ResponseTemplate::new(404))
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(FILE_PATH))
        .respond_with(RangeResponder::new(content))
        .mount(&server)
        .await;
    let temp_dir = create_temp_dir();
    let downloader = DownloaderBuilder::new()
        .directory(temp_dir.path().to_path_buf())
        .connections(4)
        .build();

    let err = downloader
        .download(&create_test_client(), &target(&server, Some(1_000)))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Protocol { status, .. } if status == StatusCode::NOT_FOUND));
    assert!(!temp_dir.path().join("data.bin").exists());
}

#[tokio::test]
async fn test_short_resource_is_reported() {
    // The server has fewer bytes than announced.
    let content = create_test_content(800);
    let server = serve(&content).await;
    let temp_dir = create_temp_dir();
    let downloader = DownloaderBuilder::new()
        .directory(temp_dir.path().to_path_buf())
        .connections(1)
        .build();

    let err = downloader
        .download(&create_test_client(), &target(&server, Some(1_000)))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::SizeMismatch { expected: 1_000, actual: 800, .. }
    ));
}

#[tokio::test]
async fn test_ignored_range_fails_the_download() {
    // The server answers every request with the whole resource.
    let content = create_test_content(1_000);
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FILE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(content))
        .mount(&server)
        .await;
    let temp_dir = create_temp_dir();
    let downloader = DownloaderBuilder::new()
        .directory(temp_dir.path().to_path_buf())
        .connections(4)
        .build();

    let err = downloader
        .download(&create_test_client(), &target(&server, Some(1_000)))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Protocol { status, .. } if status == StatusCode::OK));
    assert!(!temp_dir.path().join("data.bin").exists());
}

#[tokio::test]
async fn test_resource_larger_than_announced_fails() {
    // 1200 bytes served, 1000 announced: the open last range gets 450 bytes.
    let content = create_test_content(1_200);
    let server = serve(&content).await;
    let temp_dir = create_temp_dir();
    let downloader = DownloaderBuilder::new()
        .directory(temp_dir.path().to_path_buf())
        .connections(4)
        .build();

    let err = downloader
        .download(&create_test_client(), &target(&server, Some(1_000)))
        .await
        .unwrap_err();

    match err {
        Error::SizeMismatch {
            path,
            expected,
            actual,
        } => {
            assert_eq!(path, temp_dir.path().join("data.bin.part4"));
            assert_eq!(expected, 250);
            assert_eq!(actual, 450);
        }
        e => panic!("unexpected error: {:?}", e),
    }
    assert!(!temp_dir.path().join("data.bin").exists());
}

#[test]
fn test_plan_of_a_million_bytes() {
    let downloader = DownloaderBuilder::new().connections(4).build();
    let target = DownloadTarget::new(Url::parse("https://example.com/data.bin").unwrap())
        .with_size(Some(1_000_000));

    let ranges: Vec<_> = downloader
        .plan(&target)
        .segments()
        .iter()
        .map(|s| s.range)
        .collect();

    assert_eq!(
        ranges,
        vec![
            SegmentRange::Bounded { start: 0, end: 249_999 },
            SegmentRange::Bounded { start: 250_000, end: 499_999 },
            SegmentRange::Bounded { start: 500_000, end: 749_999 },
            SegmentRange::From(750_000),
        ]
    );
}
