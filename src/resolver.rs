//! Viewer page resolution.
//!
//! Listing pages usually link to an HTML viewer rather than to the PDF. The
//! viewer embeds the real file location in a script assignment such as
//! `var pdfUrl = "https:\/\/host\/file.pdf"`. That scraping is coupled to the
//! host's current markup, so it lives behind [`PdfLinkResolver`] and callers
//! only ever see a [`ResolvedDownload`].

use crate::error::{Result, ScraperError};
use crate::http::fetch_text;
use crate::listing::ArticleEntry;
use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::debug;

/// Script assignment carrying the direct file URL
const PDF_URL_PATTERN: &str = r#"var\s+pdfUrl\s*=\s*"([^"]+)""#;

/// An article whose file URL is known
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDownload {
    pub title: String,
    pub direct_url: String,
}

/// Strategy for turning a listing link into a downloadable URL.
#[async_trait]
pub trait PdfLinkResolver: Send + Sync {
    async fn resolve(
        &self,
        client: &reqwest::Client,
        entry: &ArticleEntry,
    ) -> Result<ResolvedDownload>;
}

/// Fetches the viewer page and reads the embedded `pdfUrl` assignment
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewerPageResolver;

#[async_trait]
impl PdfLinkResolver for ViewerPageResolver {
    async fn resolve(
        &self,
        client: &reqwest::Client,
        entry: &ArticleEntry,
    ) -> Result<ResolvedDownload> {
        let body = fetch_text(client, &entry.source_link).await?;
        let direct_url = extract_pdf_url(&body)?;
        debug!(viewer = %entry.source_link, url = %direct_url, "Resolved viewer page");
        Ok(ResolvedDownload {
            title: entry.title.clone(),
            direct_url,
        })
    }
}

/// Listing links already point at the file
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectLinkResolver;

#[async_trait]
impl PdfLinkResolver for DirectLinkResolver {
    async fn resolve(
        &self,
        _client: &reqwest::Client,
        entry: &ArticleEntry,
    ) -> Result<ResolvedDownload> {
        Ok(ResolvedDownload {
            title: entry.title.clone(),
            direct_url: entry.source_link.clone(),
        })
    }
}

/// Resolver selection for configuration and the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolverKind {
    #[default]
    Viewer,
    Direct,
}

impl ResolverKind {
    pub fn build(self) -> Box<dyn PdfLinkResolver> {
        match self {
            ResolverKind::Viewer => Box::new(ViewerPageResolver),
            ResolverKind::Direct => Box::new(DirectLinkResolver),
        }
    }
}

impl fmt::Display for ResolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolverKind::Viewer => f.write_str("viewer"),
            ResolverKind::Direct => f.write_str("direct"),
        }
    }
}

impl FromStr for ResolverKind {
    type Err = ScraperError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "viewer" => Ok(ResolverKind::Viewer),
            "direct" => Ok(ResolverKind::Direct),
            other => Err(ScraperError::Config(format!(
                "Unknown resolver '{}', expected 'viewer' or 'direct'",
                other
            ))),
        }
    }
}

fn pdf_url_regex() -> Result<&'static Regex> {
    static RE: OnceLock<Regex> = OnceLock::new();
    if let Some(re) = RE.get() {
        return Ok(re);
    }
    let re = Regex::new(PDF_URL_PATTERN).map_err(|e| ScraperError::Parse(e.to_string()))?;
    Ok(RE.get_or_init(|| re))
}

/// Pull the direct file URL out of viewer page text.
///
/// The captured literal is percent-decoded, then `\/` escapes are replaced
/// with `/`.
///
/// # Errors
///
/// `Extraction` when no assignment is present, `Decode` when the literal
/// holds malformed percent-encoding.
pub fn extract_pdf_url(page: &str) -> Result<String> {
    let encoded = pdf_url_regex()?
        .captures(page)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| ScraperError::Extraction("no direct URL found".to_string()))?;

    let decoded = percent_decode(encoded)?;
    Ok(decoded.replace(r"\/", "/"))
}

/// Percent-decoding that rejects malformed escapes: every `%` must start a
/// two-digit hex escape. Well-formed escapes that do not decode to UTF-8
/// leave the input as it was, since the server may still accept it.
pub fn percent_decode(input: &str) -> Result<String> {
    let bytes = input.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes
                .get(i + 1..i + 3)
                .is_some_and(|pair| pair.iter().all(u8::is_ascii_hexdigit));
            if !valid {
                return Err(ScraperError::Decode(format!(
                    "invalid escape at byte {} in '{}'",
                    i, input
                )));
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    match String::from_utf8(urlencoding::decode_binary(input.as_bytes()).into_owned()) {
        Ok(decoded) => Ok(decoded),
        Err(e) => {
            debug!(url = %input, error = %e, "Escapes are not UTF-8, keeping URL encoded");
            Ok(input.to_string())
        }
    }
}
