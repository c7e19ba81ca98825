//! Listable records.
//!
//! A listing page only needs a handful of fields from each record: an id
//! for the detail link, a display name, a description and tags for the
//! free-text search, a category for the category filter, and numeric or
//! string fields for sorting. [`Listable`] exposes exactly those; [`Record`]
//! is the generic JSON-backed implementation used for fetched datasets.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Anything that can be filtered, sorted, and paginated on a listing page.
pub trait Listable {
    /// Unique, stable identifier (slug).
    fn id(&self) -> &str;

    /// Display name or title.
    fn name(&self) -> &str;

    /// Short description. Empty when absent.
    fn description(&self) -> &str {
        ""
    }

    /// Ordered tags.
    fn tags(&self) -> &[String] {
        &[]
    }

    /// Category, if the record has one.
    fn category(&self) -> Option<&str> {
        None
    }

    /// Numeric metric used by count comparators.
    fn metric(&self, _key: &str) -> Option<f64> {
        None
    }

    /// String attribute used by rank comparators.
    fn attribute(&self, _key: &str) -> Option<&str> {
        None
    }
}

/// A record from a static JSON dataset.
///
/// Known fields are typed; everything else (metrics, nested tables, links)
/// is preserved in [`Record::extra`]. The id is read from `id`, else `slug`;
/// the name from `name`, else `title`. When both keys are present the
/// secondary one is kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRecord")]
pub struct Record {
    /// Unique identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Short description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Ordered tags.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// All other fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Wire shape of [`Record`] before the id and name keys are resolved.
#[derive(Deserialize)]
struct RawRecord {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    slug: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Picks `primary` over `secondary`; an unused secondary lands in `extra`.
fn pick_key(
    primary: Option<String>,
    secondary: Option<String>,
    secondary_key: &str,
    extra: &mut Map<String, Value>,
) -> Option<String> {
    match (primary, secondary) {
        (Some(value), Some(unused)) => {
            extra.insert(secondary_key.to_string(), Value::String(unused));
            Some(value)
        }
        (Some(value), None) | (None, Some(value)) => Some(value),
        (None, None) => None,
    }
}

impl TryFrom<RawRecord> for Record {
    type Error = String;

    fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
        let mut extra = raw.extra;
        let id = pick_key(raw.id, raw.slug, "slug", &mut extra)
            .ok_or_else(|| "missing field `id` (or `slug`)".to_string())?;
        let name = pick_key(raw.name, raw.title, "title", &mut extra)
            .ok_or_else(|| "missing field `name` (or `title`)".to_string())?;
        Ok(Self {
            id,
            name,
            description: raw.description,
            tags: raw.tags,
            category: raw.category,
            extra,
        })
    }
}

impl Record {
    /// Create a record with just an id and a name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            tags: Vec::new(),
            category: None,
            extra: Map::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the tags.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set an extra field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Look up an extra field.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}

impl Listable for Record {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Numbers are used as-is; arrays and objects count their entries, so
    /// "number of implementations" works whether the dataset stores a count
    /// or the list itself.
    fn metric(&self, key: &str) -> Option<f64> {
        if key == "tags" {
            return Some(self.tags.len() as f64);
        }
        match self.extra.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::Array(items) => Some(items.len() as f64),
            Value::Object(fields) => Some(fields.len() as f64),
            _ => None,
        }
    }

    fn attribute(&self, key: &str) -> Option<&str> {
        match key {
            "id" => Some(&self.id),
            "name" => Some(&self.name),
            "category" => self.category.as_deref(),
            _ => self.extra.get(key)?.as_str(),
        }
    }
}
