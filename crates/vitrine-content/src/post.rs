//! Blog posts.
//!
//! A post is a markdown file whose stem is its slug. Frontmatter supplies
//! `title`, `date`, `author`, `tags`, and a card summary taken from
//! `summary`, else `excerpt`, else `description`; `slug` and `draft` are
//! honoured too. Slugs are normalized to kebab-case. Missing titles fall
//! back to the first heading, then the slug. Missing summaries fall back to
//! the first paragraph.

use std::cmp::Ordering;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use vitrine_core::{detail_path, normalize_id, Result};
use vitrine_listing::sort::{by_name, compare_text, Comparator};
use vitrine_listing::{Listable, SortRegistry};

use crate::learning::ContentBlock;
use crate::markdown::{first_heading, first_paragraph, markdown_to_blocks, split_frontmatter, word_count};

/// Longest generated excerpt, in characters.
pub const EXCERPT_CHARS: usize = 200;

const WORDS_PER_MINUTE: usize = 200;

#[derive(Debug, Default, Deserialize)]
struct PostMeta {
    slug: Option<String>,
    title: Option<String>,
    date: Option<String>,
    author: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    summary: Option<String>,
    excerpt: Option<String>,
    description: Option<String>,
    #[serde(default)]
    draft: bool,
}

/// A parsed blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlogPost {
    /// Slug.
    pub id: String,
    /// Title.
    pub title: String,
    /// Publication date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// Author.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Tags.
    pub tags: Vec<String>,
    /// Summary shown on cards.
    pub summary: String,
    /// Drafts are not published.
    pub draft: bool,
    /// Markdown body without frontmatter.
    pub body: String,
}

impl BlogPost {
    /// Parse a post from its slug and file contents.
    ///
    /// # Errors
    ///
    /// Returns a parse error when the frontmatter has the wrong shape
    /// (for example `tags` as a number).
    pub fn from_markdown(slug: &str, content: &str) -> Result<Self> {
        let doc = split_frontmatter(content);
        let meta: PostMeta = doc.deserialize()?.unwrap_or_default();
        let body = doc.body();

        let id = normalize_id(meta.slug.as_deref().unwrap_or(slug));
        let title = meta
            .title
            .or_else(|| first_heading(body))
            .unwrap_or_else(|| id.clone());
        let summary = meta
            .summary
            .or(meta.excerpt)
            .or(meta.description)
            .or_else(|| first_paragraph(body, EXCERPT_CHARS))
            .unwrap_or_default();
        let date = meta.date.as_deref().and_then(|raw| parse_date(&id, raw));

        Ok(Self {
            id,
            title,
            date,
            author: meta.author,
            tags: meta.tags,
            summary,
            draft: meta.draft,
            body: body.to_string(),
        })
    }

    /// Body as renderable blocks.
    pub fn blocks(&self) -> Vec<ContentBlock> {
        markdown_to_blocks(&self.body)
    }

    /// Estimated reading time, at least one minute.
    pub fn reading_minutes(&self) -> usize {
        word_count(&self.body).div_ceil(WORDS_PER_MINUTE).max(1)
    }

    /// Route of the post page.
    pub fn path(&self) -> String {
        detail_path("blog", &self.id)
    }
}

fn parse_date(id: &str, raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }
    log::warn!("Post '{id}' has an unreadable date '{raw}'");
    None
}

impl Listable for BlogPost {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.summary
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn category(&self) -> Option<&str> {
        self.author.as_deref()
    }

    fn attribute(&self, key: &str) -> Option<&str> {
        match key {
            "author" => self.author.as_deref(),
            _ => None,
        }
    }
}

/// Newest first; undated posts last, then by title.
pub fn by_date_desc() -> Comparator<BlogPost> {
    Arc::new(|a: &BlogPost, b: &BlogPost| {
        let dates = match (a.date, b.date) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        dates.then_with(|| compare_text(&a.title, &b.title))
    })
}

/// Sort options for the blog index: `newest` (default) and `title`.
pub fn post_sorts() -> SortRegistry<BlogPost> {
    SortRegistry::new()
        .register("newest", "Newest", by_date_desc())
        .register("title", "Title", by_name())
}
