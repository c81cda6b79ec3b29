//! Request and response documents of the extraction API.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EXTRACTION_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Extraction ID: ([0-9]+)").expect("valid extraction id pattern"));

/// Account credentials.
#[derive(Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of `Authentication/RequestToken`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct TokenRequest<'a> {
    pub credentials: &'a Credentials,
}

/// Response of `Authentication/RequestToken`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    #[serde(rename = "@odata.context", default)]
    pub metadata: Option<String>,
    #[serde(alias = "Value")]
    pub value: String,
}

/// Body of `Extractions/ExtractRaw`: any request document, wrapped.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ExtractionEnvelope<'a, T: Serialize> {
    pub extraction_request: &'a T,
}

/// An instrument as echoed back in validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InstrumentIdentifier {
    pub identifier: String,
    #[serde(default)]
    pub identifier_type: Option<String>,
}

/// An identifier the server refused.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IdentifierValidationError {
    pub identifier: InstrumentIdentifier,
    pub message: String,
}

/// Terminal body of a completed raw extraction.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawExtractionResult {
    #[serde(rename = "@odata.context", default)]
    pub metadata: Option<String>,
    #[serde(rename = "JobId")]
    pub job_id: String,
    #[serde(default)]
    pub notes: Vec<String>,
    #[serde(default)]
    pub identifier_validation_errors: Vec<IdentifierValidationError>,
}

impl RawExtractionResult {
    /// The report extraction id announced in the first note, if any.
    pub fn extraction_id(&self) -> Option<String> {
        self.notes.first().and_then(|note| extraction_id_from_note(note))
    }

    /// Output file name used when the server does not supply one.
    pub fn default_filename(&self) -> String {
        format!("output_{}.csv.gz", self.job_id)
    }
}

/// Extracts the digits following `Extraction ID: ` in a processing note.
pub fn extraction_id_from_note(note: &str) -> Option<String> {
    EXTRACTION_ID
        .captures(note)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Metadata of an extracted file, from
/// `Extractions/ReportExtractions('{id}')/FullFile`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExtractedFile {
    #[serde(rename = "@odata.context", default)]
    pub metadata: Option<String>,
    #[serde(default)]
    pub extracted_file_id: Option<String>,
    #[serde(default)]
    pub report_extraction_id: Option<String>,
    #[serde(default)]
    pub schedule_id: Option<String>,
    #[serde(default)]
    pub file_type: Option<String>,
    pub extracted_file_name: String,
    #[serde(default)]
    pub last_write_time_utc: Option<String>,
    #[serde(default)]
    pub contents_exists: bool,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub received_date_utc: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_id_from_note() {
        let note = "Extraction Services Version 16.0.43633 (806c08a4ae8f), Built May  9 2022\n\
                    Processing started at 05/23/2022 08:32:01.\n\
                    User ID: 9008895\nExtraction ID: 2000000384964327\nCorrelation ID: CiD/9008895";
        assert_eq!(
            extraction_id_from_note(note).as_deref(),
            Some("2000000384964327")
        );
        assert_eq!(extraction_id_from_note("Processing completed."), None);
        assert_eq!(extraction_id_from_note("Extraction ID: "), None);
    }

    #[test]
    fn test_decode_raw_extraction_result() {
        let body = r#"{
            "@odata.context": "https://host/RestApi/v1/$metadata#RawExtractionResults/$entity",
            "JobId": "0x0812a5bc2a9d1234",
            "Notes": ["User ID: 1\nExtraction ID: 2000000001\nDone"],
            "IdentifierValidationErrors": [
                {"Identifier": {"Identifier": "BAD.X", "IdentifierType": "Ric"}, "Message": "Not found"}
            ]
        }"#;
        let result: RawExtractionResult = serde_json::from_str(body).unwrap();
        assert_eq!(result.job_id, "0x0812a5bc2a9d1234");
        assert_eq!(result.extraction_id().as_deref(), Some("2000000001"));
        assert_eq!(result.identifier_validation_errors[0].identifier.identifier, "BAD.X");
        assert_eq!(result.default_filename(), "output_0x0812a5bc2a9d1234.csv.gz");
    }

    #[test]
    fn test_result_without_notes_has_no_extraction_id() {
        let result: RawExtractionResult = serde_json::from_str(r#"{"JobId":"j1"}"#).unwrap();
        assert!(result.notes.is_empty());
        assert_eq!(result.extraction_id(), None);
    }

    #[test]
    fn test_decode_extracted_file() {
        let body = r#"{
            "ExtractedFileId": "VjF8MHgwNjZ",
            "ReportExtractionId": "2000000001",
            "FileType": "Full",
            "ExtractedFileName": "_OnD_0x0812.csv.gz",
            "LastWriteTimeUtc": "2022-05-23T08:33:14.000Z",
            "ContentsExists": true,
            "Size": 1048576
        }"#;
        let file: ExtractedFile = serde_json::from_str(body).unwrap();
        assert_eq!(file.extracted_file_name, "_OnD_0x0812.csv.gz");
        assert_eq!(file.size, 1_048_576);
        assert!(file.contents_exists);
    }

    #[test]
    fn test_token_request_shape() {
        let credentials = Credentials::new("user", "secret");
        let body = serde_json::to_value(TokenRequest {
            credentials: &credentials,
        })
        .unwrap();
        assert_eq!(body["Credentials"]["Username"], "user");
        assert_eq!(body["Credentials"]["Password"], "secret");
        assert!(!format!("{:?}", credentials).contains("secret"));
    }

    #[test]
    fn test_token_response_accepts_either_case() {
        let lower: TokenResponse = serde_json::from_str(r#"{"value":"abc"}"#).unwrap();
        let upper: TokenResponse = serde_json::from_str(r#"{"Value":"abc"}"#).unwrap();
        assert_eq!(lower.value, "abc");
        assert_eq!(upper.value, "abc");
    }
}
