//! The resource a download reads from.

use crate::http::RequestHeaders;

use reqwest::Url;
use std::path::Path;

/// Fallback file name when neither the server nor the URL provides one.
const FALLBACK_FILENAME: &str = "download";

/// A byte-range addressable resource.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadTarget {
    /// URL of the resource.
    pub url: Url,
    /// Total size in bytes. `None` forces a single stream download.
    pub size: Option<u64>,
    /// Suggested output file name.
    pub filename: Option<String>,
    /// Headers sent with every request for this resource.
    pub headers: RequestHeaders,
    /// Whether the URL points straight at the backing store.
    pub direct: bool,
}

impl DownloadTarget {
    /// Creates a target of unknown size, with no header.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            size: None,
            filename: None,
            headers: RequestHeaders::new(),
            direct: false,
        }
    }

    pub fn with_size(mut self, size: Option<u64>) -> Self {
        self.size = size;
        self
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn with_headers(mut self, headers: RequestHeaders) -> Self {
        self.headers = headers;
        self
    }

    /// Whether the size is known and non-zero, so the resource can be split.
    pub fn is_segmentable(&self) -> bool {
        self.size.is_some_and(|size| size > 0)
    }

    /// Name of the output file.
    ///
    /// The suggested name is reduced to its last path component. Without one,
    /// the last segment of the URL path is used, percent-decoded.
    pub fn output_name(&self) -> String {
        if let Some(name) = self
            .filename
            .as_deref()
            .and_then(|f| Path::new(f).file_name())
            .and_then(|f| f.to_str())
        {
            return name.to_string();
        }

        self.url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .filter(|s| !s.is_empty())
            .map(|s| {
                form_urlencoded::parse(s.as_bytes())
                    .map(|(key, val)| [key, val].concat())
                    .collect::<String>()
            })
            .filter(|s| !s.is_empty() && s != "." && s != "..")
            .unwrap_or_else(|| FALLBACK_FILENAME.to_string())
    }
}
