//! Custom error types for rustjair.
//!
//! Every failure in the harvester is local to one issue or one article, so
//! each variant carries enough context to be logged and skipped.
//! All library functions return `Result<T, ScraperError>` instead of using `unwrap()`.

use thiserror::Error;

/// Main error type for rustjair operations.
#[derive(Debug, Error)]
pub enum ScraperError {
    /// Network/HTTP transport error
    #[error("Fetch error: {0}")]
    Fetch(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Fetch error: {url} returned HTTP {status}")]
    HttpStatus {
        /// Requested URL
        url: String,
        /// Status code returned by the server
        status: u16,
    },

    /// HTML parsing error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Expected pattern missing from a viewer page
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed percent-encoding
    #[error("Decode error: {0}")]
    Decode(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Manifest writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl ScraperError {
    /// Short taxonomy name, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            ScraperError::Fetch(_) | ScraperError::HttpStatus { .. } => "fetch",
            ScraperError::Parse(_) => "parse",
            ScraperError::Extraction(_) => "extraction",
            ScraperError::Io(_) => "io",
            ScraperError::Decode(_) => "decode",
            ScraperError::Config(_) => "config",
            ScraperError::Csv(_) => "csv",
        }
    }
}

/// Result type alias using `ScraperError`
pub type Result<T> = std::result::Result<T, ScraperError>;
