//! CSV manifest of a harvest run.

use crate::download::{DownloadOutcome, DownloadResult, FailureStage};
use crate::error::Result;
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// One manifest row
#[derive(Debug, Serialize)]
struct ManifestRow<'a> {
    issue: u32,
    title: &'a str,
    source_link: &'a str,
    direct_url: &'a str,
    path: String,
    status: &'static str,
    bytes: Option<u64>,
    error: &'a str,
}

impl<'a> From<&'a DownloadResult> for ManifestRow<'a> {
    fn from(result: &'a DownloadResult) -> Self {
        let (status, bytes, error) = match &result.outcome {
            DownloadOutcome::Saved { bytes } => ("saved", Some(*bytes), ""),
            DownloadOutcome::SkippedExisting => ("skipped", None, ""),
            DownloadOutcome::Failed {
                stage: FailureStage::Resolve,
                error,
            } => ("resolve_failed", None, error.as_str()),
            DownloadOutcome::Failed {
                stage: FailureStage::Download,
                error,
            } => ("download_failed", None, error.as_str()),
        };

        Self {
            issue: result.issue.id(),
            title: &result.title,
            source_link: &result.source_link,
            direct_url: result.direct_url.as_deref().unwrap_or(""),
            path: result.path.display().to_string(),
            status,
            bytes,
            error,
        }
    }
}

/// Write one CSV row per article outcome. The header is written even when
/// there are no results.
pub fn write_manifest(path: &Path, results: &[DownloadResult]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    wtr.write_record([
        "issue",
        "title",
        "source_link",
        "direct_url",
        "path",
        "status",
        "bytes",
        "error",
    ])?;

    for result in results {
        wtr.serialize(ManifestRow::from(result))?;
    }

    wtr.flush()?;
    info!(path = %path.display(), rows = results.len(), "Saved manifest");
    Ok(())
}
