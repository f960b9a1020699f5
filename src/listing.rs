//! Issue listing scraper.
//!
//! Turns an issue's listing page into the ordered list of articles it
//! advertises. Each article summary block contributes one [`ArticleEntry`]
//! pairing the heading text with the PDF button link, so titles and links
//! can never drift out of step when a block is skipped.

use crate::error::{Result, ScraperError};
use crate::http::fetch_text;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

/// Article summary body: one per listed article
const BLOCK_SELECTOR: &str = ".article-summary .media-body";
const TITLE_SELECTOR: &str = "h3.media-heading a";
const PDF_LINK_SELECTOR: &str = ".btn-group a.pdf";

/// A single article advertised on a listing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleEntry {
    /// Article title, surrounding whitespace trimmed
    pub title: String,
    /// Absolute URL of the viewer page (or the file itself)
    pub source_link: String,
}

/// Fetch a listing page and extract its articles.
///
/// # Errors
///
/// Returns `Fetch`/`HttpStatus` when the page cannot be retrieved, and
/// `Parse`/`Config` from [`parse_listing`].
pub async fn fetch_listing(
    client: &reqwest::Client,
    listing_url: &str,
    origin: &Url,
) -> Result<Vec<ArticleEntry>> {
    let html = fetch_text(client, listing_url).await?;
    let entries = parse_listing(&html, origin)?;
    info!(url = listing_url, count = entries.len(), "Parsed listing");
    Ok(entries)
}

/// Parse listing HTML into article entries in document order.
///
/// Blocks without a PDF button href are skipped. Relative hrefs are
/// resolved against `origin`.
pub fn parse_listing(html: &str, origin: &Url) -> Result<Vec<ArticleEntry>> {
    let document = Html::parse_document(html);

    let block_selector = compile(BLOCK_SELECTOR)?;
    let title_selector = compile(TITLE_SELECTOR)?;
    let pdf_selector = compile(PDF_LINK_SELECTOR)?;

    let mut entries = Vec::new();

    for block in document.select(&block_selector) {
        let Some(href) = block
            .select(&pdf_selector)
            .next()
            .and_then(|a| a.value().attr("href"))
        else {
            debug!("Skipping article block without PDF link");
            continue;
        };

        let title = block
            .select(&title_selector)
            .flat_map(|a| a.text())
            .collect::<String>()
            .trim()
            .to_string();

        entries.push(ArticleEntry {
            title,
            source_link: resolve_href(href.trim(), origin)?,
        });
    }

    Ok(entries)
}

/// Make an href absolute.
///
/// Anything that already carries a scheme passes through unchanged;
/// everything else is joined onto the site origin.
pub fn resolve_href(href: &str, origin: &Url) -> Result<String> {
    if Url::parse(href).is_ok() {
        return Ok(href.to_string());
    }

    origin
        .join(href)
        .map(String::from)
        .map_err(|e| ScraperError::Parse(format!("Cannot resolve href '{}': {}", href, e)))
}

/// Parse the site origin used for relative links
pub fn parse_origin(origin: &str) -> Result<Url> {
    let url = Url::parse(origin)
        .map_err(|e| ScraperError::Config(format!("Invalid origin '{}': {}", origin, e)))?;
    if url.host_str().is_none() {
        return Err(ScraperError::Config(format!("Origin '{}' has no host", origin)));
    }
    Ok(url)
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ScraperError::Parse(e.to_string()))
}
