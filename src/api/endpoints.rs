//! Endpoint URL templating over a configurable base URL.

use crate::error::{Error, Result};

use reqwest::Url;

/// Production base URL of the extraction API.
pub const DEFAULT_BASE_URL: &str = "https://selectapi.datascope.refinitiv.com/RestApi/v1/";

/// Builds the URLs of the extraction API from a base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    /// Creates the endpoint set. A missing trailing slash is added so that
    /// relative joins keep the last path segment of the base.
    pub fn new(base: &str) -> Result<Self> {
        let normalized = if base.ends_with('/') {
            base.to_string()
        } else {
            format!("{}/", base)
        };
        let base = Url::parse(&normalized).map_err(|e| {
            Error::InvalidUrl(format!("The base url \"{}\" cannot be parsed: {}", base, e))
        })?;
        Ok(Self { base })
    }

    /// The base URL.
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// `Authentication/RequestToken`
    pub fn request_token(&self) -> Result<Url> {
        self.join("Authentication/RequestToken")
    }

    /// `Extractions/ExtractRaw`
    pub fn extract_raw(&self) -> Result<Url> {
        self.join("Extractions/ExtractRaw")
    }

    /// `Extractions/ReportExtractions('{extraction_id}')/FullFile`
    pub fn report_extraction_full_file(&self, extraction_id: &str) -> Result<Url> {
        self.join(&format!(
            "Extractions/ReportExtractions('{}')/FullFile",
            extraction_id
        ))
    }

    /// `Extractions/RawExtractionResults('{job_id}')/$value`
    pub fn raw_extraction_result(&self, job_id: &str) -> Result<Url> {
        self.join(&format!("Extractions/RawExtractionResults('{}')/$value", job_id))
    }

    fn join(&self, path: &str) -> Result<Url> {
        self.base.join(path).map_err(|e| {
            Error::InvalidUrl(format!("Cannot join \"{}\" onto {}: {}", path, self.base, e))
        })
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            base: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
        }
    }
}
