//! The extraction API: endpoints, documents and the authenticated client.
//!
//! - [`endpoints`] - URL templates over a configurable base URL
//! - [`models`] - request and response documents
//! - [`client`] - [`ApiClient`], token request, submission, status checks and
//!   file metadata lookups

pub mod client;
pub mod endpoints;
pub mod models;

pub use client::ApiClient;
pub use endpoints::{Endpoints, DEFAULT_BASE_URL};
pub use models::{
    extraction_id_from_note, Credentials, ExtractedFile, IdentifierValidationError,
    InstrumentIdentifier, RawExtractionResult, TokenResponse,
};
