//! Learning modules.
//!
//! Each module is a JSON file under `learning/` holding ordered sections of
//! typed content blocks:
//!
//! ```json
//! {
//!   "id": "intro-to-zkvms",
//!   "title": "Intro to zkVMs",
//!   "level": "beginner",
//!   "sections": [
//!     { "title": "What is a zkVM?", "blocks": [
//!       { "type": "text", "content": "A zkVM proves execution..." },
//!       { "type": "code", "language": "rust", "code": "fn main() {}" },
//!       { "type": "info", "title": "Key ideas", "items": ["succinct", "zero-knowledge"] }
//!     ]}
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use vitrine_listing::Listable;

use crate::keys::either_key;

/// One renderable unit of learning content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    /// Prose.
    Text {
        /// Paragraph text.
        content: String,
    },
    /// Source listing.
    Code {
        /// Language hint for highlighting.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        language: Option<String>,
        /// The code.
        code: String,
    },
    /// Bulleted call-out.
    #[serde(rename = "info")]
    InfoList {
        /// Optional heading.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        /// Bullet items.
        items: Vec<String>,
    },
}

impl ContentBlock {
    /// Text block.
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    /// Code block.
    pub fn code(language: Option<&str>, code: impl Into<String>) -> Self {
        Self::Code {
            language: language.map(str::to_string),
            code: code.into(),
        }
    }

    /// Info list.
    pub fn info<I, S>(title: Option<&str>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::InfoList {
            title: title.map(str::to_string),
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    /// Wire name of the variant (`text`, `code`, `info`).
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Code { .. } => "code",
            Self::InfoList { .. } => "info",
        }
    }
}

/// A titled run of blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningSection {
    /// Section heading.
    pub title: String,
    /// Blocks in display order.
    #[serde(default, alias = "content")]
    pub blocks: Vec<ContentBlock>,
}

/// A learning module. The slug is read from `id`, else `slug`; the title
/// from `title`, else `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawModule")]
pub struct LearningModule {
    /// Slug.
    pub id: String,
    /// Display title.
    pub title: String,
    /// One-line summary.
    #[serde(default)]
    pub description: String,
    /// Difficulty (beginner, intermediate, advanced).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Topic tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Ordered sections.
    #[serde(default)]
    pub sections: Vec<LearningSection>,
}

#[derive(Deserialize)]
struct RawModule {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    slug: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    level: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    sections: Vec<LearningSection>,
}

impl TryFrom<RawModule> for LearningModule {
    type Error = String;

    fn try_from(raw: RawModule) -> Result<Self, Self::Error> {
        Ok(Self {
            id: either_key(raw.id, raw.slug, ("id", "slug"))?,
            title: either_key(raw.title, raw.name, ("title", "name"))?,
            description: raw.description,
            level: raw.level,
            tags: raw.tags,
            sections: raw.sections,
        })
    }
}

impl LearningModule {
    /// Every block across all sections, in order.
    pub fn blocks(&self) -> impl Iterator<Item = &ContentBlock> {
        self.sections.iter().flat_map(|s| s.blocks.iter())
    }
}

impl Listable for LearningModule {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn category(&self) -> Option<&str> {
        self.level.as_deref()
    }

    fn metric(&self, key: &str) -> Option<f64> {
        match key {
            "sections" => Some(self.sections.len() as f64),
            "tags" => Some(self.tags.len() as f64),
            _ => None,
        }
    }

    fn attribute(&self, key: &str) -> Option<&str> {
        match key {
            "level" => self.level.as_deref(),
            _ => None,
        }
    }
}
