//! Progress reporting for the harvest pipeline.
//!
//! The pipeline never logs through a global handle directly; it is handed a
//! [`Reporter`] and describes what happened as [`Event`]s. [`TracingReporter`]
//! turns those into structured `tracing` events.

use crate::error::ScraperError;
use crate::issue::IssueReference;
use std::path::Path;
use tracing::{error, info};

/// Milestones and failure contexts emitted while harvesting
#[derive(Debug, Clone, Copy)]
pub enum Event<'a> {
    RunStarted {
        first: u32,
        count: u32,
        output: &'a Path,
    },
    IssueStarted {
        issue: IssueReference,
        url: &'a str,
    },
    IssueListed {
        issue: IssueReference,
        articles: usize,
    },
    IssueFailed {
        issue: IssueReference,
        url: &'a str,
    },
    ArticleFound {
        issue: IssueReference,
        title: &'a str,
        link: &'a str,
    },
    ArticleResolved {
        title: &'a str,
        url: &'a str,
    },
    ArticleSaved {
        title: &'a str,
        path: &'a Path,
        bytes: u64,
    },
    ArticleSkipped {
        title: &'a str,
        path: &'a Path,
    },
    ArticleFailed {
        issue: IssueReference,
        title: &'a str,
        url: &'a str,
    },
    RunFinished {
        saved: usize,
        skipped: usize,
        failed: usize,
        issues_failed: usize,
    },
}

/// Logging collaborator passed to the pipeline
pub trait Reporter: Send + Sync {
    fn info(&self, event: &Event<'_>);
    fn error(&self, event: &Event<'_>, err: &ScraperError);
}

/// Reporter backed by `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn info(&self, event: &Event<'_>) {
        match *event {
            Event::RunStarted {
                first,
                count,
                output,
            } => {
                info!(first, count, output = %output.display(), "Starting harvest")
            }
            Event::IssueStarted { issue, url } => {
                info!(issue = issue.id(), url, "Processing issue")
            }
            Event::IssueListed { issue, articles } => {
                info!(issue = issue.id(), articles, "Found articles")
            }
            Event::ArticleFound { issue, title, link } => {
                info!(issue = issue.id(), title, link, "Found PDF viewer link")
            }
            Event::ArticleResolved { title, url } => {
                info!(title, url, "Resolved PDF link")
            }
            Event::ArticleSaved { title, path, bytes } => {
                info!(title, path = %path.display(), bytes, "PDF downloaded successfully")
            }
            Event::ArticleSkipped { title, path } => {
                info!(title, path = %path.display(), "File exists, skipping")
            }
            Event::RunFinished {
                saved,
                skipped,
                failed,
                issues_failed,
            } => {
                info!(saved, skipped, failed, issues_failed, "Harvest complete")
            }
            Event::IssueFailed { issue, url } => {
                info!(issue = issue.id(), url, "Issue failed")
            }
            Event::ArticleFailed { issue, title, url } => {
                info!(issue = issue.id(), title, url, "Article failed")
            }
        }
    }

    fn error(&self, event: &Event<'_>, err: &ScraperError) {
        let kind = err.kind();
        match *event {
            Event::IssueFailed { issue, url } => {
                error!(issue = issue.id(), url, kind, error = %err, "Failed to list issue")
            }
            Event::ArticleFailed { issue, title, url } => {
                error!(issue = issue.id(), title, url, kind, error = %err, "Failed to fetch article")
            }
            ref other => error!(event = ?other, kind, error = %err, "Pipeline error"),
        }
    }
}
