//! # rustjair
//!
//! Journal issue PDF harvester: scrapes issue listing pages, resolves viewer
//! pages to direct file URLs and streams every article PDF to disk.
//!
//! ## Modules
//!
//! - [`issue`] - Issue ids and listing URLs
//! - [`http`] - Shared HTTP client
//! - [`listing`] - Listing page scraping
//! - [`resolver`] - Viewer page resolution strategies
//! - [`download`] - Streaming downloads and file naming
//! - [`report`] - Progress reporting
//! - [`manifest`] - CSV run manifest
//! - [`pipeline`] - The harvest driver
//! - [`error`] - Custom error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use rustjair::http::{build_http_client, HttpOptions};
//! use rustjair::pipeline::{Pipeline, PipelineConfig};
//! use rustjair::report::TracingReporter;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = build_http_client(&HttpOptions::default())?;
//!     let pipeline = Pipeline::new(PipelineConfig::default(), client, Arc::new(TracingReporter))?;
//!     let summary = pipeline.run().await?;
//!     println!("Saved {} PDFs", summary.saved);
//!     Ok(())
//! }
//! ```

pub mod download;
pub mod error;
pub mod http;
pub mod issue;
pub mod listing;
pub mod manifest;
pub mod pipeline;
pub mod report;
pub mod resolver;

pub use error::{Result, ScraperError};
