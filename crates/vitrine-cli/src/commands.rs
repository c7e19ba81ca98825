//! Command handlers.
//!
//! Each handler does its work through [`App`] and returns the text to print,
//! so the same paths are exercised by tests without capturing stdout.

use std::fmt::{self, Write as _};
use std::path::PathBuf;
use std::sync::Arc;

use vitrine_bench::{Aggregator, BenchmarkState};
use vitrine_content::{post_sorts, BlogPost, ContentLibrary};
use vitrine_core::resolver::expand_tilde;
use vitrine_core::{detail_path, Error, Result};
use vitrine_fetch::{create_source, Dataset, DatasetCache, DatasetFetcher, Resource};
use vitrine_listing::sort::{by_count, by_rank};
use vitrine_listing::{
    CategoryFilter, FilterState, Listable, ListingConfig, ListingSnapshot, ListingView, Record,
    SortRegistry,
};

use crate::cli::{ListArgs, PostsArgs};
use crate::config::VitrineConfig;

/// Sort options offered for a dataset.
pub fn dataset_sorts(section: &str) -> SortRegistry<Record> {
    let registry = SortRegistry::standard();
    match section {
        "zkvms" => registry.register("stars", "Most stars", by_count("stars")),
        "programs" => registry.register(
            "complexity",
            "Complexity",
            by_rank("complexity", &["low", "medium", "high"]),
        ),
        _ => registry,
    }
}

/// Resolved configuration plus a fetcher built from it.
#[derive(Debug)]
pub struct App {
    config: VitrineConfig,
    fetcher: DatasetFetcher,
}

impl App {
    /// Build the data source described by `config`.
    pub fn new(config: VitrineConfig) -> Result<Self> {
        config.validate()?;
        let mut fetcher = DatasetFetcher::new(create_source(&config.source)?);
        if config.source.cache {
            fetcher = fetcher.with_cache(Arc::new(DatasetCache::new()));
        }
        log::debug!("Using {} data source", fetcher.source().name());
        Ok(Self { config, fetcher })
    }

    /// Effective configuration.
    pub fn config(&self) -> &VitrineConfig {
        &self.config
    }

    fn resource(section: &str) -> Result<Resource> {
        Resource::well_known(section).ok_or_else(|| {
            Error::not_found(
                "resource",
                format!("{section} (expected one of: {})", Resource::sections().join(", ")),
            )
        })
    }

    /// Fetch a dataset and render one page of it.
    pub async fn listing(&self, args: &ListArgs) -> Result<ListingSnapshot<Record>> {
        let resource = Self::resource(&args.resource)?;
        let dataset: Dataset<Record> = self.fetcher.fetch(&resource).await?;

        let config = ListingConfig {
            page_size: args.page_size.unwrap_or(self.config.listing.page_size),
            ..self.config.listing.clone()
        };
        let mut view = ListingView::new(dataset.records, dataset_sorts(&args.resource), &config)?;

        view.set_filter(FilterState {
            query: args.query.clone().unwrap_or_default(),
            category: args.category.clone().unwrap_or_default(),
        });
        if let Some(key) = &args.sort {
            view.set_sort(key)?;
        }
        view.set_page(args.page);
        Ok(view.snapshot())
    }

    /// Fetch a dataset and find one record.
    pub async fn record(&self, section: &str, id: &str) -> Result<Record> {
        let resource = Self::resource(section)?;
        let dataset: Dataset<Record> = self.fetcher.fetch(&resource).await?;
        let kind = section.strip_suffix('s').unwrap_or(section);
        dataset.find(kind, id).cloned()
    }

    /// Load the telemetry index and count it.
    pub async fn bench(&self, programs: Option<&[String]>) -> (BenchmarkState, Aggregator) {
        let ids = programs.unwrap_or(&self.config.bench.programs);
        let aggregator = Aggregator::new(ids);
        let state =
            BenchmarkState::load(&self.fetcher, &self.config.bench.index_path, &aggregator).await;
        (state, aggregator)
    }

    /// Content directory from the config.
    pub fn content_dir(&self) -> PathBuf {
        expand_tilde(&self.config.content.dir)
    }

    /// Load posts and render one page of them, newest first.
    pub async fn posts(&self, args: &PostsArgs) -> Result<ListingSnapshot<BlogPost>> {
        let library = ContentLibrary::load(&self.content_dir(), &self.config.content).await?;
        let config = ListingConfig {
            default_sort: "newest".to_string(),
            ..self.config.listing.clone()
        };
        let mut view = ListingView::new(library.posts().to_vec(), post_sorts(), &config)?;
        view.set_filter(FilterState {
            query: args.query.clone().unwrap_or_default(),
            category: args
                .tag
                .clone()
                .map(CategoryFilter::Tag)
                .unwrap_or_default(),
        });
        view.set_page(args.page);
        Ok(view.snapshot())
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Table of a listing page followed by its summary line.
pub fn render_listing<R: Listable>(section: &str, snapshot: &ListingSnapshot<R>) -> String {
    render_with(|out| write_listing(out, section, snapshot))
}

/// One record as pretty JSON plus its detail path.
pub fn render_record(section: &str, record: &Record) -> Result<String> {
    let json = serde_json::to_string_pretty(record)?;
    Ok(format!("{json}\n\n{}\n", detail_path(section, &record.id)))
}

/// Per-program counts in match order.
pub fn render_bench(state: &BenchmarkState, aggregator: &Aggregator) -> String {
    render_with(|out| write_bench(out, state, aggregator))
}

/// Blog page: date, title, and path per post.
pub fn render_posts(snapshot: &ListingSnapshot<BlogPost>) -> String {
    render_with(|out| write_posts(out, snapshot))
}

// A formatting error keeps whatever was written before it.
fn render_with<F>(body: F) -> String
where
    F: FnOnce(&mut String) -> fmt::Result,
{
    let mut out = String::new();
    if let Err(e) = body(&mut out) {
        log::warn!("Output formatting failed: {e}");
    }
    out
}

fn write_listing<R: Listable>(
    out: &mut String,
    section: &str,
    snapshot: &ListingSnapshot<R>,
) -> fmt::Result {
    if snapshot.is_empty_result() {
        return writeln!(out, "No results");
    }

    let width = snapshot
        .page
        .items
        .iter()
        .map(|r| r.id().chars().count())
        .max()
        .unwrap_or(0);
    for record in &snapshot.page.items {
        write!(out, "{:<width$}  {}", record.id(), record.name())?;
        if !record.tags().is_empty() {
            write!(out, "  [{}]", record.tags().join(", "))?;
        }
        writeln!(out, "  {}", detail_path(section, record.id()))?;
    }
    writeln!(out, "\n{}  sort: {}", snapshot.summary(), snapshot.sort_key)
}

fn write_bench(out: &mut String, state: &BenchmarkState, aggregator: &Aggregator) -> fmt::Result {
    let width = aggregator.ids().map(str::len).max().unwrap_or(0);
    for id in aggregator.ids() {
        writeln!(out, "{id:<width$}  {}", state.count(id))?;
    }
    writeln!(
        out,
        "\n{} counted, {} unmatched, {} listed",
        state.counts.total(),
        state.counts.unmatched(),
        state.files_listed
    )?;
    match state.last_updated {
        Some(ts) => writeln!(out, "lastUpdated: {}", ts.to_rfc3339())?,
        None => writeln!(out, "lastUpdated: unknown")?,
    }
    for ambiguity in aggregator.ambiguities() {
        writeln!(
            out,
            "warning: files for '{}' may be counted as '{}'",
            ambiguity.shadowed, ambiguity.winner
        )?;
    }
    Ok(())
}

fn write_posts(out: &mut String, snapshot: &ListingSnapshot<BlogPost>) -> fmt::Result {
    if snapshot.is_empty_result() {
        return writeln!(out, "No results");
    }
    for post in &snapshot.page.items {
        match post.date {
            Some(date) => write!(out, "{date}")?,
            None => write!(out, "----------")?,
        }
        writeln!(out, "  {}  {}", post.title, post.path())?;
    }
    writeln!(out, "\n{}", snapshot.summary())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        let path = dir.join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn site() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        let zkvms: Vec<String> = (1..=7)
            .map(|i| {
                format!(
                    r#"{{"id": "vm-{i}", "name": "VM {i}", "tags": ["{}"], "stars": {}}}"#,
                    if i % 2 == 0 { "Rust" } else { "risc-v" },
                    i * 10
                )
            })
            .collect();
        write(
            dir.path(),
            "data/zkvms.json",
            &format!(r#"{{"zkvms": [{}]}}"#, zkvms.join(",")),
        );
        write(
            dir.path(),
            "data/telemetry/index.json",
            r#"{"files": ["telemetry_fibonacci_a.json", "telemetry_ecdsa_a.json", "x.json"],
                "lastUpdated": "2024-06-01T00:00:00Z"}"#,
        );
        write(
            dir.path(),
            "content/blog/one.md",
            "---\ntitle: One\ndate: 2024-01-01\ntags: [zk]\n---\nFirst.",
        );
        write(
            dir.path(),
            "content/blog/two.md",
            "---\ntitle: Two\ndate: 2024-02-01\ntags: [rust]\n---\nSecond.",
        );
        dir
    }

    fn app(dir: &TempDir) -> App {
        let mut config = VitrineConfig::default();
        config.apply_flags(Some(dir.path().join("data").to_str().unwrap()), None);
        config.content.dir = dir.path().join("content").display().to_string();
        config.bench.programs = vec!["fibonacci".into(), "ecdsa".into(), "loop".into()];
        App::new(config).unwrap()
    }

    fn list_args(resource: &str) -> ListArgs {
        ListArgs {
            resource: resource.to_string(),
            query: None,
            category: None,
            sort: None,
            page: 1,
            page_size: None,
            json: false,
        }
    }

    #[tokio::test]
    async fn test_listing_second_page() {
        let dir = site();
        let app = app(&dir);
        let args = ListArgs {
            page: 2,
            ..list_args("zkvms")
        };
        let snapshot = app.listing(&args).await.unwrap();
        assert_eq!(snapshot.page.items.len(), 1);
        assert_eq!(snapshot.page.total_pages, 2);
        assert!(render_listing("zkvms", &snapshot).contains("/zkvms/vm-7"));
    }

    #[tokio::test]
    async fn test_listing_query_matches_tag_case_insensitively() {
        let dir = site();
        let app = app(&dir);
        let args = ListArgs {
            query: Some("rust".into()),
            sort: Some("stars".into()),
            ..list_args("zkvms")
        };
        let snapshot = app.listing(&args).await.unwrap();
        let ids: Vec<&str> = snapshot.page.items.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["vm-6", "vm-4", "vm-2"]);
    }

    #[tokio::test]
    async fn test_listing_empty_result() {
        let dir = site();
        let app = app(&dir);
        let args = ListArgs {
            query: Some("nothing".into()),
            ..list_args("zkvms")
        };
        let snapshot = app.listing(&args).await.unwrap();
        assert_eq!(render_listing("zkvms", &snapshot), "No results\n");
    }

    #[tokio::test]
    async fn test_listing_unknown_sort_and_resource() {
        let dir = site();
        let app = app(&dir);
        let args = ListArgs {
            sort: Some("forks".into()),
            ..list_args("zkvms")
        };
        assert!(app.listing(&args).await.unwrap_err().is_not_found());
        assert!(app.listing(&list_args("posts")).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_listing_missing_dataset_is_fetch_failure() {
        let dir = site();
        let app = app(&dir);
        let err = app.listing(&list_args("spaces")).await.unwrap_err();
        assert!(err.is_fetch_failure());
    }

    #[tokio::test]
    async fn test_record_found_and_missing() {
        let dir = site();
        let app = app(&dir);
        let record = app.record("zkvms", "vm-3").await.unwrap();
        assert!(render_record("zkvms", &record).unwrap().ends_with("/zkvms/vm-3\n"));

        let typed = app.record("zkvms", "VM_3").await.unwrap();
        assert_eq!(typed.id, "vm-3");

        let err = app.record("zkvms", "vm-99").await.unwrap_err();
        assert_eq!(err.to_string(), "zkvm not found: vm-99");
    }

    #[tokio::test]
    async fn test_bench_counts() {
        let dir = site();
        let app = app(&dir);
        let (state, aggregator) = app.bench(None).await;
        assert_eq!(state.count("fibonacci"), 1);
        assert_eq!(state.count("loop"), 0);
        let text = render_bench(&state, &aggregator);
        assert!(text.contains("2 counted, 1 unmatched, 3 listed"));
        assert!(text.contains("lastUpdated: 2024-06-01T00:00:00+00:00"));
    }

    #[test]
    fn test_render_bench_lists_overlapping_ids() {
        let aggregator = Aggregator::new(["ecdsa-verify", "ecdsa"]);
        let text = render_bench(&BenchmarkState::unavailable(), &aggregator);
        assert!(text.starts_with("ecdsa-verify  0\necdsa         0\n"));
        assert!(text.contains("warning: files for 'ecdsa' may be counted as 'ecdsa-verify'"));
    }

    #[tokio::test]
    async fn test_bench_without_index() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(&dir);
        let programs = vec!["fibonacci".to_string()];
        let (state, aggregator) = app.bench(Some(programs.as_slice())).await;
        assert!(!state.loading);
        assert!(render_bench(&state, &aggregator).contains("lastUpdated: unknown"));
    }

    #[tokio::test]
    async fn test_posts_newest_first_and_tag_filter() {
        let dir = site();
        let app = app(&dir);
        let all = PostsArgs {
            query: None,
            tag: None,
            page: 1,
        };
        let snapshot = app.posts(&all).await.unwrap();
        let ids: Vec<&str> = snapshot.page.items.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["two", "one"]);

        let tagged = PostsArgs {
            tag: Some("ZK".into()),
            ..all
        };
        let snapshot = app.posts(&tagged).await.unwrap();
        assert_eq!(snapshot.page.items.len(), 1);
        assert!(render_posts(&snapshot).contains("2024-01-01  One  /blog/one"));
    }
}
