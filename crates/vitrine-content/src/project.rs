//! Projects (`projects.json`).

use serde::{Deserialize, Serialize};
use vitrine_core::{Error, Result};
use vitrine_listing::Listable;

use crate::keys::either_key;

/// A research or engineering project. Keys read in order of preference:
/// `id`/`slug`, `name`/`title`, `url`/`link`, `repository`/`repo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawProject")]
pub struct Project {
    /// Slug.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// Tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Lifecycle status (active, archived, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Project homepage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Source repository.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
}

#[derive(Deserialize)]
struct RawProject {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    slug: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    repository: Option<String>,
    #[serde(default)]
    repo: Option<String>,
}

impl TryFrom<RawProject> for Project {
    type Error = String;

    fn try_from(raw: RawProject) -> std::result::Result<Self, Self::Error> {
        Ok(Self {
            id: either_key(raw.id, raw.slug, ("id", "slug"))?,
            name: either_key(raw.name, raw.title, ("name", "title"))?,
            description: raw.description,
            tags: raw.tags,
            status: raw.status,
            url: raw.url.or(raw.link),
            repository: raw.repository.or(raw.repo),
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ProjectsFile {
    Wrapped { projects: Vec<Project> },
    Bare(Vec<Project>),
}

/// Parse `projects.json`: either `{"projects": [...]}` or a bare array.
pub fn parse_projects(bytes: &[u8]) -> Result<Vec<Project>> {
    match serde_json::from_slice::<ProjectsFile>(bytes) {
        Ok(ProjectsFile::Wrapped { projects }) | Ok(ProjectsFile::Bare(projects)) => Ok(projects),
        Err(e) => Err(Error::parse(format!("invalid projects file: {e}"))),
    }
}

impl Listable for Project {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn category(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn attribute(&self, key: &str) -> Option<&str> {
        match key {
            "status" => self.status.as_deref(),
            _ => None,
        }
    }
}
