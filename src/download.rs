//! Streaming file downloads and filename sanitization.

use crate::error::{Result, ScraperError};
use crate::http::get_checked;
use crate::issue::IssueReference;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// Longest file stem kept, in UTF-8 bytes. Leaves room for `.pdf` and a
/// collision suffix under the usual 255-byte name limit.
pub const MAX_STEM_BYTES: usize = 200;

/// Characters that cannot appear in a file name on common filesystems
const RESERVED_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// How article titles become file names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilenamePolicy {
    /// Collapse whitespace runs into a single `_`
    pub underscore_whitespace: bool,
}

impl Default for FilenamePolicy {
    fn default() -> Self {
        Self {
            underscore_whitespace: true,
        }
    }
}

/// Build a safe `<stem>.pdf` file name from an article title.
///
/// Path separators, reserved characters and control characters become `_`.
/// Leading/trailing dots, underscores and whitespace are trimmed and the stem is capped
/// at 200 bytes, cut on a character boundary. When nothing usable remains,
/// `fallback` is used.
pub fn sanitize_filename(title: &str, policy: FilenamePolicy, fallback: &str) -> String {
    let mut stem = String::with_capacity(title.len());
    let mut in_whitespace = false;

    for c in title.chars() {
        if c.is_whitespace() {
            if policy.underscore_whitespace {
                if !in_whitespace {
                    stem.push('_');
                }
            } else {
                stem.push(if c == ' ' { ' ' } else { '_' });
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;

        if RESERVED_CHARS.contains(&c) || c.is_control() {
            stem.push('_');
        } else {
            stem.push(c);
        }
    }

    let trimmed = stem.trim_matches(|c: char| c == '.' || c == '_' || c.is_whitespace());
    let trimmed = truncate_bytes(trimmed, MAX_STEM_BYTES)
        .trim_end_matches(|c: char| c == '.' || c.is_whitespace());

    if trimmed.is_empty() {
        format!("{}.pdf", fallback)
    } else {
        format!("{}.pdf", trimmed)
    }
}

/// Longest prefix of `s` that fits in `max` bytes without splitting a char
fn truncate_bytes(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Stage of the per-article pipeline at which a failure happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureStage {
    Resolve,
    Download,
}

/// What happened to one article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DownloadOutcome {
    Saved { bytes: u64 },
    SkippedExisting,
    Failed { stage: FailureStage, error: String },
}

/// Outcome of processing one article, with its destination path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadResult {
    pub issue: IssueReference,
    pub title: String,
    pub source_link: String,
    pub direct_url: Option<String>,
    pub path: PathBuf,
    pub outcome: DownloadOutcome,
}

/// Stream `url` into `dest`, returning the number of bytes written.
///
/// The destination is only created once the server has answered with a
/// success status. If the transfer breaks off midway the partial file is
/// removed before the error is returned.
///
/// # Errors
///
/// `Fetch`/`HttpStatus` for network failures, `Io` when the file cannot be
/// created or written.
pub async fn download_file(client: &reqwest::Client, url: &str, dest: &Path) -> Result<u64> {
    let response = get_checked(client, url).await?;

    let mut file = File::create(dest).await?;

    match write_body(response, &mut file).await {
        Ok(bytes) => {
            debug!(url = url, path = %dest.display(), bytes = bytes, "Download complete");
            Ok(bytes)
        }
        Err(e) => {
            drop(file);
            if let Err(remove_err) = tokio::fs::remove_file(dest).await {
                warn!(path = %dest.display(), error = %remove_err, "Failed to remove partial file");
            }
            Err(e)
        }
    }
}

async fn write_body(response: reqwest::Response, file: &mut File) -> Result<u64> {
    let mut stream = response.bytes_stream();
    let mut total_bytes = 0u64;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(ScraperError::Fetch)?;
        file.write_all(&chunk).await?;
        total_bytes += chunk.len() as u64;
    }

    file.flush().await?;
    Ok(total_bytes)
}
