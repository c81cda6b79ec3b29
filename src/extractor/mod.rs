//! End-to-end extraction runs.
//!
//! - `extractor` - [`Extractor`], authenticates, submits, polls, locates and
//!   downloads
//! - `builder` - [`ExtractorBuilder`]
//! - `config` - [`ExtractionConfig`] and [`Authentication`]

pub mod builder;
pub mod config;
pub mod extractor;

pub use builder::ExtractorBuilder;
pub use config::{Authentication, ExtractionConfig};
pub use extractor::{ExtractionOutcome, Extractor};
