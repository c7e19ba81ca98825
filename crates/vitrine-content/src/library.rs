//! Static site content, loaded once and handed to pages.
//!
//! Layout under the content directory (all parts optional):
//!
//! ```text
//! content/
//! ├── blog/*.md            posts, slug = file stem
//! ├── projects.json        {"projects": [...]} or [...]
//! └── learning/*.json      one learning module per file
//! ```
//!
//! A post or module that fails to parse is logged and skipped; the rest of
//! the library still loads.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use async_walkdir::WalkDir;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use vitrine_core::{Error, Result};
use vitrine_listing::sort::sort;

use crate::learning::LearningModule;
use crate::post::{by_date_desc, BlogPost};
use crate::project::{parse_projects, Project};

/// Content directory layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Content root.
    #[serde(default = "default_dir")]
    pub dir: String,

    /// Posts directory, relative to the root.
    #[serde(default = "default_posts_dir")]
    pub posts_dir: String,

    /// Projects file, relative to the root.
    #[serde(default = "default_projects_file")]
    pub projects_file: String,

    /// Learning modules directory, relative to the root.
    #[serde(default = "default_learning_dir")]
    pub learning_dir: String,

    /// Publish posts marked `draft: true`.
    #[serde(default)]
    pub include_drafts: bool,
}

fn default_dir() -> String {
    "content".to_string()
}

fn default_posts_dir() -> String {
    "blog".to_string()
}

fn default_projects_file() -> String {
    "projects.json".to_string()
}

fn default_learning_dir() -> String {
    "learning".to_string()
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            posts_dir: default_posts_dir(),
            projects_file: default_projects_file(),
            learning_dir: default_learning_dir(),
            include_drafts: false,
        }
    }
}

/// Posts, projects, and learning modules.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContentLibrary {
    posts: Vec<BlogPost>,
    projects: Vec<Project>,
    learning: Vec<LearningModule>,
}

impl ContentLibrary {
    /// Build a library in code. Posts are ordered newest first.
    pub fn from_parts(
        posts: Vec<BlogPost>,
        projects: Vec<Project>,
        learning: Vec<LearningModule>,
    ) -> Self {
        Self {
            posts: sort(&posts, by_date_desc().as_ref()),
            projects,
            learning,
        }
    }

    /// Load everything under `root` using the layout in `config`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if `root` does not exist, or a parse error if the
    /// projects file is present but malformed.
    pub async fn load(root: &Path, config: &ContentConfig) -> Result<Self> {
        tokio::fs::metadata(root)
            .await
            .map_err(|e| Error::io_with_path(e, root))?;

        let posts = load_posts(&root.join(&config.posts_dir), config.include_drafts).await;
        let projects = load_projects(&root.join(&config.projects_file)).await?;
        let learning = load_learning(&root.join(&config.learning_dir)).await;

        log::info!(
            "Loaded content from {}: {} posts, {} projects, {} learning modules",
            root.display(),
            posts.len(),
            projects.len(),
            learning.len()
        );
        Ok(Self::from_parts(posts, projects, learning))
    }

    /// Posts, newest first.
    pub fn posts(&self) -> &[BlogPost] {
        &self.posts
    }

    /// Post by slug.
    pub fn post(&self, id: &str) -> Result<&BlogPost> {
        self.posts
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::not_found("post", id))
    }

    /// Projects in file order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Project by slug.
    pub fn project(&self, id: &str) -> Result<&Project> {
        self.projects
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::not_found("project", id))
    }

    /// Learning modules in file-name order.
    pub fn learning(&self) -> &[LearningModule] {
        &self.learning
    }

    /// Learning module by slug.
    pub fn module(&self, id: &str) -> Result<&LearningModule> {
        self.learning
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| Error::not_found("learning module", id))
    }

    /// Distinct post tags, sorted.
    pub fn post_tags(&self) -> Vec<String> {
        self.posts
            .iter()
            .flat_map(|p| p.tags.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// True when nothing was loaded.
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty() && self.projects.is_empty() && self.learning.is_empty()
    }
}

// ============================================================================
// Loading
// ============================================================================

async fn files_with_extension(dir: &Path, extension: &str) -> Vec<PathBuf> {
    if tokio::fs::metadata(dir).await.is_err() {
        log::debug!("No directory at {}, skipping", dir.display());
        return Vec::new();
    }

    let mut files = Vec::new();
    let mut walker = WalkDir::new(dir);
    while let Some(entry) = walker.next().await {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                log::warn!("Walk error under {}: {e}", dir.display());
                continue;
            }
        };
        let path = entry.path();
        if path.is_dir() {
            continue;
        }
        if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
        {
            files.push(path);
        }
    }
    files.sort();
    files
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

async fn load_posts(dir: &Path, include_drafts: bool) -> Vec<BlogPost> {
    let mut posts: Vec<BlogPost> = Vec::new();
    for path in files_with_extension(dir, "md").await {
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Skipping post {}: {e}", path.display());
                continue;
            }
        };
        let post = match BlogPost::from_markdown(&file_stem(&path), &content) {
            Ok(p) => p,
            Err(e) => {
                log::warn!("Skipping post {}: {e}", path.display());
                continue;
            }
        };
        if post.draft && !include_drafts {
            log::debug!("Skipping draft '{}'", post.id);
            continue;
        }
        if posts.iter().any(|p| p.id == post.id) {
            log::warn!("Duplicate post slug '{}' in {}, ignored", post.id, path.display());
            continue;
        }
        posts.push(post);
    }
    posts
}

async fn load_projects(path: &Path) -> Result<Vec<Project>> {
    match tokio::fs::read(path).await {
        Ok(bytes) => parse_projects(&bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("No projects file at {}", path.display());
            Ok(Vec::new())
        }
        Err(e) => Err(Error::io_with_path(e, path)),
    }
}

async fn load_learning(dir: &Path) -> Vec<LearningModule> {
    let mut modules = Vec::new();
    for path in files_with_extension(dir, "json").await {
        let parsed = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice::<LearningModule>(&bytes).map_err(Error::from),
            Err(e) => Err(Error::io_with_path(e, &path)),
        };
        match parsed {
            Ok(module) => modules.push(module),
            Err(e) => log::warn!("Skipping learning module {}: {e}", path.display()),
        }
    }
    modules
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn site() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "blog/older.md", "---\ntitle: Older\ndate: 2023-01-10\ntags: [zk]\n---\nFirst.");
        write(root, "blog/newer.md", "---\ntitle: Newer\ndate: 2024-01-10\ntags: [rust, zk]\n---\nSecond.");
        write(root, "blog/draft.md", "---\ntitle: WIP\ndraft: true\n---\nSoon.");
        write(root, "blog/broken.md", "---\ntags: 7\n---\nBad.");
        write(root, "blog/notes.txt", "not a post");
        write(root, "projects.json", r#"{"projects": [{"id": "bench", "name": "Bench"}]}"#);
        write(
            root,
            "learning/01-intro.json",
            r#"{"id": "intro", "title": "Intro", "sections": []}"#,
        );
        write(root, "learning/02-bad.json", "{");
        dir
    }

    #[tokio::test]
    async fn test_load_full_site() {
        let dir = site();
        let library = ContentLibrary::load(dir.path(), &ContentConfig::default())
            .await
            .unwrap();

        let ids: Vec<&str> = library.posts().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["newer", "older"]);
        assert_eq!(library.projects().len(), 1);
        assert_eq!(library.learning().len(), 1);
        assert_eq!(library.module("intro").unwrap().title, "Intro");
        assert_eq!(library.post_tags(), vec!["rust", "zk"]);
    }

    #[tokio::test]
    async fn test_drafts_opt_in() {
        let dir = site();
        let config = ContentConfig {
            include_drafts: true,
            ..Default::default()
        };
        let library = ContentLibrary::load(dir.path(), &config).await.unwrap();
        assert!(library.post("draft").is_ok());
    }

    #[tokio::test]
    async fn test_missing_parts_are_empty() {
        let dir = tempfile::tempdir().unwrap();
        let library = ContentLibrary::load(dir.path(), &ContentConfig::default())
            .await
            .unwrap();
        assert!(library.is_empty());
    }

    #[tokio::test]
    async fn test_missing_root_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = ContentLibrary::load(&missing, &ContentConfig::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("nope"));
    }

    #[tokio::test]
    async fn test_malformed_projects_is_error() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "projects.json", "{broken");
        let result = ContentLibrary::load(dir.path(), &ContentConfig::default()).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_lookups_not_found() {
        let library = ContentLibrary::default();
        assert!(library.post("x").unwrap_err().is_not_found());
        assert!(library.project("x").unwrap_err().is_not_found());
        assert!(library.module("x").unwrap_err().is_not_found());
    }

    #[test]
    fn test_from_parts_orders_posts() {
        let older = BlogPost::from_markdown("a", "---\ndate: 2020-01-01\n---\nA").unwrap();
        let newer = BlogPost::from_markdown("b", "---\ndate: 2021-01-01\n---\nB").unwrap();
        let library = ContentLibrary::from_parts(vec![older, newer], Vec::new(), Vec::new());
        assert_eq!(library.posts()[0].id, "b");
    }
}
