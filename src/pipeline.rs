//! Issue harvesting pipeline.
//!
//! For every issue in the configured range the pipeline fetches the listing
//! page, resolves each article to a direct file URL and streams the file
//! into the output directory. Failures are local: a broken issue or article
//! is reported and skipped, and the run carries on. Only setup problems
//! (invalid configuration, an output directory that cannot be created)
//! abort the run, and they do so before any request is sent.

use crate::download::{
    download_file, sanitize_filename, DownloadOutcome, DownloadResult, FailureStage,
    FilenamePolicy,
};
use crate::error::{Result, ScraperError};
use crate::issue::{IssueRange, IssueReference, DEFAULT_BASE_URL, DEFAULT_ORIGIN};
use crate::listing::{fetch_listing, parse_origin, ArticleEntry};
use crate::manifest::write_manifest;
use crate::report::{Event, Reporter};
use crate::resolver::{PdfLinkResolver, ResolverKind};
use futures::future::join_all;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use url::Url;

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory receiving the downloaded files
    pub output_dir: PathBuf,
    pub issues: IssueRange,
    /// Listing URL prefix, the issue id is appended
    pub base_url: String,
    /// Origin used to absolutize relative links
    pub origin: String,
    pub resolver: ResolverKind,
    /// Articles of one issue processed at the same time
    pub concurrency: usize,
    pub filename_policy: FilenamePolicy,
    /// Leave existing files alone instead of downloading again
    pub skip_existing: bool,
    /// Optional CSV manifest written at the end of the run
    pub manifest: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            issues: IssueRange::default(),
            base_url: DEFAULT_BASE_URL.to_string(),
            origin: DEFAULT_ORIGIN.to_string(),
            resolver: ResolverKind::default(),
            concurrency: 1,
            filename_policy: FilenamePolicy::default(),
            skip_existing: false,
            manifest: None,
        }
    }
}

impl PipelineConfig {
    /// Check the configuration, returning the parsed origin.
    pub fn validate(&self) -> Result<Url> {
        if self.concurrency == 0 {
            return Err(ScraperError::Config(
                "concurrency must be at least 1".to_string(),
            ));
        }
        Url::parse(&self.base_url).map_err(|e| {
            ScraperError::Config(format!("Invalid base URL '{}': {}", self.base_url, e))
        })?;
        parse_origin(&self.origin)
    }
}

/// Totals of a finished run
#[derive(Debug, Default)]
pub struct RunSummary {
    pub issues_processed: usize,
    pub issues_failed: usize,
    pub saved: usize,
    pub skipped: usize,
    pub failed: usize,
    pub results: Vec<DownloadResult>,
}

impl RunSummary {
    fn record(&mut self, result: DownloadResult) {
        match result.outcome {
            DownloadOutcome::Saved { .. } => self.saved += 1,
            DownloadOutcome::SkippedExisting => self.skipped += 1,
            DownloadOutcome::Failed { .. } => self.failed += 1,
        }
        self.results.push(result);
    }
}

/// Harvest pipeline wired to its collaborators
pub struct Pipeline {
    config: PipelineConfig,
    origin: Url,
    client: reqwest::Client,
    resolver: Box<dyn PdfLinkResolver>,
    reporter: Arc<dyn Reporter>,
    semaphore: Arc<Semaphore>,
}

impl Pipeline {
    /// Create a pipeline using the resolver named in the configuration.
    pub fn new(
        config: PipelineConfig,
        client: reqwest::Client,
        reporter: Arc<dyn Reporter>,
    ) -> Result<Self> {
        let resolver = config.resolver.build();
        Self::with_resolver(config, client, resolver, reporter)
    }

    /// Create a pipeline with a caller-supplied resolution strategy.
    pub fn with_resolver(
        config: PipelineConfig,
        client: reqwest::Client,
        resolver: Box<dyn PdfLinkResolver>,
        reporter: Arc<dyn Reporter>,
    ) -> Result<Self> {
        let origin = config.validate()?;
        let semaphore = Arc::new(Semaphore::new(config.concurrency));
        Ok(Self {
            config,
            origin,
            client,
            resolver,
            reporter,
            semaphore,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Harvest every issue in the range.
    ///
    /// # Errors
    ///
    /// Only setup failures are returned: the output directory cannot be
    /// created, or the manifest cannot be written. Per-issue and per-article
    /// failures are reported and recorded in the summary instead.
    pub async fn run(&self) -> Result<RunSummary> {
        tokio::fs::create_dir_all(&self.config.output_dir).await?;

        let range = self.config.issues;
        self.reporter.info(&Event::RunStarted {
            first: range.start,
            count: range.count,
            output: &self.config.output_dir,
        });

        let mut summary = RunSummary::default();
        let mut claimed = HashSet::new();

        for issue in range.iter() {
            summary.issues_processed += 1;
            let listing_url = issue.listing_url(&self.config.base_url);
            self.reporter.info(&Event::IssueStarted {
                issue,
                url: &listing_url,
            });

            let entries = match fetch_listing(&self.client, &listing_url, &self.origin).await {
                Ok(entries) => entries,
                Err(e) => {
                    self.reporter.error(
                        &Event::IssueFailed {
                            issue,
                            url: &listing_url,
                        },
                        &e,
                    );
                    summary.issues_failed += 1;
                    continue;
                }
            };

            self.reporter.info(&Event::IssueListed {
                issue,
                articles: entries.len(),
            });

            for result in self.process_issue(issue, entries, &mut claimed).await {
                summary.record(result);
            }
        }

        if let Some(manifest) = &self.config.manifest {
            write_manifest(manifest, &summary.results)?;
        }

        self.reporter.info(&Event::RunFinished {
            saved: summary.saved,
            skipped: summary.skipped,
            failed: summary.failed,
            issues_failed: summary.issues_failed,
        });

        Ok(summary)
    }

    /// Fetch and parse one issue's listing without downloading anything.
    pub async fn list_issue(&self, issue: IssueReference) -> Result<Vec<ArticleEntry>> {
        let listing_url = issue.listing_url(&self.config.base_url);
        fetch_listing(&self.client, &listing_url, &self.origin).await
    }

    /// Process the articles of one issue; results keep listing order.
    ///
    /// Destination paths are assigned in listing order before any download
    /// starts, so the outcome of a name collision does not depend on timing.
    async fn process_issue(
        &self,
        issue: IssueReference,
        entries: Vec<ArticleEntry>,
        claimed: &mut HashSet<PathBuf>,
    ) -> Vec<DownloadResult> {
        let futures: Vec<_> = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                let position = index + 1;
                let fallback = format!("issue-{}-article-{}", issue, position);
                let file_name =
                    sanitize_filename(&entry.title, self.config.filename_policy, &fallback);
                let path = claim_path(
                    claimed,
                    &self.config.output_dir,
                    &file_name,
                    issue,
                    position,
                );
                self.process_article(issue, entry, path)
            })
            .collect();

        join_all(futures).await
    }

    async fn process_article(
        &self,
        issue: IssueReference,
        entry: ArticleEntry,
        path: PathBuf,
    ) -> DownloadResult {
        let (direct_url, outcome) = if self.config.skip_existing && path.exists() {
            self.reporter.info(&Event::ArticleSkipped {
                title: &entry.title,
                path: &path,
            });
            (None, DownloadOutcome::SkippedExisting)
        } else {
            self.fetch_article(issue, &entry, &path).await
        };

        DownloadResult {
            issue,
            title: entry.title,
            source_link: entry.source_link,
            direct_url,
            path,
            outcome,
        }
    }

    /// Resolve and download one article, holding a worker permit throughout.
    async fn fetch_article(
        &self,
        issue: IssueReference,
        entry: &ArticleEntry,
        path: &Path,
    ) -> (Option<String>, DownloadOutcome) {
        // The semaphore is never closed.
        let _permit = self.semaphore.acquire().await.ok();

        self.reporter.info(&Event::ArticleFound {
            issue,
            title: &entry.title,
            link: &entry.source_link,
        });

        let resolved = match self.resolver.resolve(&self.client, entry).await {
            Ok(resolved) => resolved,
            Err(e) => {
                self.report_article_error(issue, &entry.title, &entry.source_link, &e);
                let outcome = DownloadOutcome::Failed {
                    stage: FailureStage::Resolve,
                    error: e.to_string(),
                };
                return (None, outcome);
            }
        };

        self.reporter.info(&Event::ArticleResolved {
            title: &resolved.title,
            url: &resolved.direct_url,
        });

        let outcome = match download_file(&self.client, &resolved.direct_url, path).await {
            Ok(bytes) => {
                self.reporter.info(&Event::ArticleSaved {
                    title: &entry.title,
                    path,
                    bytes,
                });
                DownloadOutcome::Saved { bytes }
            }
            Err(e) => {
                self.report_article_error(issue, &entry.title, &resolved.direct_url, &e);
                DownloadOutcome::Failed {
                    stage: FailureStage::Download,
                    error: e.to_string(),
                }
            }
        };

        (Some(resolved.direct_url), outcome)
    }

    fn report_article_error(
        &self,
        issue: IssueReference,
        title: &str,
        url: &str,
        err: &ScraperError,
    ) {
        self.reporter
            .error(&Event::ArticleFailed { issue, title, url }, err);
    }
}

/// Reserve a destination for one article.
///
/// The first article of the run with a given name keeps it. Later ones get
/// `<stem>-<issue>-<position>.pdf`, plus a counter if even that is taken.
fn claim_path(
    claimed: &mut HashSet<PathBuf>,
    dir: &Path,
    file_name: &str,
    issue: IssueReference,
    position: usize,
) -> PathBuf {
    let path = dir.join(file_name);
    if claimed.insert(path.clone()) {
        return path;
    }

    let stem = file_name.strip_suffix(".pdf").unwrap_or(file_name);
    let base = format!("{}-{}-{}", stem, issue, position);
    let mut candidate = dir.join(format!("{}.pdf", base));
    let mut attempt = 2;
    while !claimed.insert(candidate.clone()) {
        candidate = dir.join(format!("{}-{}.pdf", base, attempt));
        attempt += 1;
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{build_http_client, HttpOptions};
    use crate::report::testing::RecordingReporter;
    use crate::resolver::DirectLinkResolver;
    use tempfile::TempDir;
    use wiremock::matchers::{any, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ISSUE_PATH: &str = "/index.php/jair/issue/view/";

    fn listing_html(articles: &[(&str, &str)]) -> String {
        let blocks: String = articles
            .iter()
            .map(|(title, href)| {
                format!(
                    r#"<div class="article-summary media"><div class="media-body">
<h3 class="media-heading"><a href="/a">  {} </a></h3>
<div class="btn-group"><a class="pdf" href="{}">PDF</a></div>
</div></div>"#,
                    title, href
                )
            })
            .collect();
        format!("<html><body>{}</body></html>", blocks)
    }

    fn viewer_html(server: &MockServer, file: &str) -> String {
        let escaped = server.uri().replace('/', r"\/");
        format!(
            r#"<html><script>var pdfUrl = "{}\/files\/{}";</script></html>"#,
            escaped, file
        )
    }

    fn config_for(server: &MockServer, output: PathBuf, count: u32) -> PipelineConfig {
        PipelineConfig {
            output_dir: output,
            issues: IssueRange::new(1085, count),
            base_url: format!("{}{}", server.uri(), ISSUE_PATH),
            origin: server.uri(),
            ..Default::default()
        }
    }

    fn client() -> Result<reqwest::Client> {
        build_http_client(&HttpOptions::default())
    }

    async fn mount_get(server: &MockServer, route: &str, template: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(template)
            .mount(server)
            .await;
    }

    #[test]
    fn test_validate_rejects_bad_config() {
        let config = PipelineConfig {
            concurrency: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = PipelineConfig {
            base_url: "no scheme".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        assert!(PipelineConfig::default().validate().is_ok());
    }

    #[tokio::test]
    async fn test_end_to_end_single_issue() -> Result<()> {
        let server = MockServer::start().await;
        let pdf_one = b"%PDF-1.4 first article".to_vec();
        let pdf_two = b"%PDF-1.7 second article".to_vec();

        Mock::given(method("GET"))
            .and(path(format!("{}1085", ISSUE_PATH)))
            .respond_with(ResponseTemplate::new(200).set_body_string(listing_html(&[
                ("Learning to Plan", "/article/view/1/10"),
                ("Belief Revision", "/article/view/2/20"),
            ])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("{}1086", ISSUE_PATH)))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        mount_get(
            &server,
            "/article/view/1/10",
            ResponseTemplate::new(200).set_body_string(viewer_html(&server, "one.pdf")),
        )
        .await;
        mount_get(
            &server,
            "/article/view/2/20",
            ResponseTemplate::new(200).set_body_string(viewer_html(&server, "two.pdf")),
        )
        .await;
        mount_get(
            &server,
            "/files/one.pdf",
            ResponseTemplate::new(200).set_body_bytes(pdf_one.clone()),
        )
        .await;
        mount_get(
            &server,
            "/files/two.pdf",
            ResponseTemplate::new(200).set_body_bytes(pdf_two.clone()),
        )
        .await;

        let dir = TempDir::new()?;
        let reporter = Arc::new(RecordingReporter::default());
        let pipeline = Pipeline::new(
            config_for(&server, dir.path().to_path_buf(), 1),
            client()?,
            reporter.clone(),
        )?;

        let summary = pipeline.run().await?;

        assert_eq!(summary.issues_processed, 1);
        assert_eq!(summary.issues_failed, 0);
        assert_eq!(summary.saved, 2);
        assert_eq!(summary.failed, 0);
        assert_eq!(
            std::fs::read(dir.path().join("Learning_to_Plan.pdf"))?,
            pdf_one
        );
        assert_eq!(
            std::fs::read(dir.path().join("Belief_Revision.pdf"))?,
            pdf_two
        );
        assert_eq!(summary.results[0].title, "Learning to Plan");
        assert_eq!(
            summary.results[1].direct_url.as_deref(),
            Some(format!("{}/files/two.pdf", server.uri()).as_str())
        );

        let lines = reporter.lines();
        assert!(lines.iter().any(|l| l.starts_with("info RunFinished")));
        assert!(!lines.iter().any(|l| l.starts_with("error")));
        Ok(())
    }

    #[tokio::test]
    async fn test_failures_are_skipped_not_fatal() -> Result<()> {
        let server = MockServer::start().await;

        // Issue 1085 lists one good and two bad articles; 1086 is missing.
        mount_get(
            &server,
            &format!("{}1085", ISSUE_PATH),
            ResponseTemplate::new(200).set_body_string(listing_html(&[
                ("No Script", "/article/view/3/30"),
                ("Gone File", "/article/view/4/40"),
                ("Fine", "/article/view/5/50"),
            ])),
        )
        .await;
        mount_get(
            &server,
            &format!("{}1086", ISSUE_PATH),
            ResponseTemplate::new(500),
        )
        .await;
        mount_get(
            &server,
            "/article/view/3/30",
            ResponseTemplate::new(200).set_body_string("<html>nothing here</html>"),
        )
        .await;
        mount_get(
            &server,
            "/article/view/4/40",
            ResponseTemplate::new(200).set_body_string(viewer_html(&server, "gone.pdf")),
        )
        .await;
        mount_get(
            &server,
            "/article/view/5/50",
            ResponseTemplate::new(200).set_body_string(viewer_html(&server, "fine.pdf")),
        )
        .await;
        mount_get(&server, "/files/gone.pdf", ResponseTemplate::new(404)).await;
        mount_get(
            &server,
            "/files/fine.pdf",
            ResponseTemplate::new(200).set_body_bytes(b"%PDF fine".to_vec()),
        )
        .await;

        let dir = TempDir::new()?;
        let reporter = Arc::new(RecordingReporter::default());
        let pipeline = Pipeline::new(
            config_for(&server, dir.path().to_path_buf(), 2),
            client()?,
            reporter.clone(),
        )?;

        let summary = pipeline.run().await?;

        assert_eq!(summary.issues_processed, 2);
        assert_eq!(summary.issues_failed, 1);
        assert_eq!(summary.saved, 1);
        assert_eq!(summary.failed, 2);
        assert!(matches!(
            summary.results[0].outcome,
            DownloadOutcome::Failed {
                stage: FailureStage::Resolve,
                ..
            }
        ));
        assert!(matches!(
            summary.results[1].outcome,
            DownloadOutcome::Failed {
                stage: FailureStage::Download,
                ..
            }
        ));
        assert!(!dir.path().join("Gone_File.pdf").exists());
        assert!(dir.path().join("Fine.pdf").exists());

        let lines = reporter.lines();
        assert!(lines
            .iter()
            .any(|l| l.starts_with("error[extraction] ArticleFailed")));
        assert!(lines.iter().any(|l| l.starts_with("error[fetch] IssueFailed")));
        Ok(())
    }

    #[tokio::test]
    async fn test_unwritable_output_dir_aborts_before_requests() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let dir = TempDir::new()?;
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"file in the way")?;

        let pipeline = Pipeline::new(
            config_for(&server, blocker.join("out"), 1),
            client()?,
            Arc::new(RecordingReporter::default()),
        )?;

        let result = pipeline.run().await;
        assert!(matches!(result, Err(ScraperError::Io(_))));
        Ok(())
    }

    #[tokio::test]
    async fn test_direct_resolver_skip_existing_and_manifest() -> Result<()> {
        let server = MockServer::start().await;
        mount_get(
            &server,
            &format!("{}1085", ISSUE_PATH),
            ResponseTemplate::new(200).set_body_string(listing_html(&[
                ("Already Here", "/files/here.pdf"),
                ("New One", "/files/new.pdf"),
            ])),
        )
        .await;
        Mock::given(method("GET"))
            .and(path("/files/here.pdf"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"remote".to_vec()))
            .expect(0)
            .mount(&server)
            .await;
        mount_get(
            &server,
            "/files/new.pdf",
            ResponseTemplate::new(200).set_body_bytes(b"%PDF new".to_vec()),
        )
        .await;

        let dir = TempDir::new()?;
        std::fs::write(dir.path().join("Already_Here.pdf"), b"local")?;
        let manifest = dir.path().join("manifest.csv");

        let config = PipelineConfig {
            skip_existing: true,
            concurrency: 2,
            manifest: Some(manifest.clone()),
            ..config_for(&server, dir.path().to_path_buf(), 1)
        };
        let pipeline = Pipeline::with_resolver(
            config,
            client()?,
            Box::new(DirectLinkResolver),
            Arc::new(RecordingReporter::default()),
        )?;

        let summary = pipeline.run().await?;

        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.saved, 1);
        assert_eq!(std::fs::read(dir.path().join("Already_Here.pdf"))?, b"local");
        assert_eq!(std::fs::read(dir.path().join("New_One.pdf"))?, b"%PDF new");

        let content = std::fs::read_to_string(&manifest)?;
        assert_eq!(content.lines().count(), 3);
        assert!(content.contains(",skipped,"));
        assert!(content.contains(",saved,8,"));
        Ok(())
    }

    #[tokio::test]
    async fn test_list_issue() -> Result<()> {
        let server = MockServer::start().await;
        mount_get(
            &server,
            &format!("{}1090", ISSUE_PATH),
            ResponseTemplate::new(200)
                .set_body_string(listing_html(&[("Only", "/article/view/9/90")])),
        )
        .await;

        let dir = TempDir::new()?;
        let pipeline = Pipeline::new(
            config_for(&server, dir.path().to_path_buf(), 1),
            client()?,
            Arc::new(RecordingReporter::default()),
        )?;

        let entries = pipeline.list_issue(IssueReference(1090)).await?;
        assert_eq!(
            entries,
            vec![ArticleEntry {
                title: "Only".to_string(),
                source_link: format!("{}/article/view/9/90", server.uri()),
            }]
        );
        Ok(())
    }

    #[test]
    fn test_claim_path_suffixes_repeated_names() {
        let dir = Path::new("out");
        let mut claimed = HashSet::new();
        let issue = IssueReference(1085);

        assert_eq!(
            claim_path(&mut claimed, dir, "Editorial.pdf", issue, 1),
            dir.join("Editorial.pdf")
        );
        assert_eq!(
            claim_path(&mut claimed, dir, "Editorial.pdf", issue, 2),
            dir.join("Editorial-1085-2.pdf")
        );
        // A title that already looks like a suffixed name.
        assert_eq!(
            claim_path(&mut claimed, dir, "Editorial-1085-2.pdf", issue, 3),
            dir.join("Editorial-1085-2-1085-3.pdf")
        );
        claimed.insert(dir.join("Errata-1085-5.pdf"));
        claim_path(&mut claimed, dir, "Errata.pdf", issue, 4);
        assert_eq!(
            claim_path(&mut claimed, dir, "Errata.pdf", issue, 5),
            dir.join("Errata-1085-5-2.pdf")
        );
    }

    #[tokio::test]
    async fn test_same_titles_get_distinct_files() -> Result<()> {
        let server = MockServer::start().await;
        mount_get(
            &server,
            &format!("{}1085", ISSUE_PATH),
            ResponseTemplate::new(200).set_body_string(listing_html(&[
                ("Editorial", "/files/first.pdf"),
                ("Editorial", "/files/second.pdf"),
            ])),
        )
        .await;
        mount_get(
            &server,
            &format!("{}1086", ISSUE_PATH),
            ResponseTemplate::new(200)
                .set_body_string(listing_html(&[("Editorial", "/files/third.pdf")])),
        )
        .await;
        mount_get(
            &server,
            "/files/first.pdf",
            ResponseTemplate::new(200)
                .set_body_bytes(b"%PDF first".to_vec())
                .set_delay(std::time::Duration::from_millis(200)),
        )
        .await;
        mount_get(
            &server,
            "/files/second.pdf",
            ResponseTemplate::new(200).set_body_bytes(b"%PDF second".to_vec()),
        )
        .await;
        mount_get(
            &server,
            "/files/third.pdf",
            ResponseTemplate::new(200).set_body_bytes(b"%PDF third".to_vec()),
        )
        .await;

        let dir = TempDir::new()?;
        let config = PipelineConfig {
            concurrency: 2,
            ..config_for(&server, dir.path().to_path_buf(), 2)
        };
        let pipeline = Pipeline::with_resolver(
            config,
            client()?,
            Box::new(DirectLinkResolver),
            Arc::new(RecordingReporter::default()),
        )?;

        let summary = pipeline.run().await?;

        assert_eq!(summary.saved, 3);
        assert_eq!(summary.failed, 0);
        assert_eq!(std::fs::read(dir.path().join("Editorial.pdf"))?, b"%PDF first");
        assert_eq!(
            std::fs::read(dir.path().join("Editorial-1085-2.pdf"))?,
            b"%PDF second"
        );
        assert_eq!(
            std::fs::read(dir.path().join("Editorial-1086-1.pdf"))?,
            b"%PDF third"
        );
        assert_eq!(summary.results[1].path, dir.path().join("Editorial-1085-2.pdf"));
        Ok(())
    }

    #[tokio::test]
    async fn test_run_creates_nested_output_dir() -> Result<()> {
        let server = MockServer::start().await;
        mount_get(
            &server,
            &format!("{}1085", ISSUE_PATH),
            ResponseTemplate::new(200).set_body_string(listing_html(&[])),
        )
        .await;

        let dir = TempDir::new()?;
        let output = dir.path().join("a").join("b");
        let pipeline = Pipeline::new(
            config_for(&server, output.clone(), 1),
            client()?,
            Arc::new(RecordingReporter::default()),
        )?;

        let summary = pipeline.run().await?;
        assert!(output.is_dir());
        assert_eq!(summary.issues_processed, 1);
        Ok(())
    }
}
