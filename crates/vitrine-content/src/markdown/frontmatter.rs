//! YAML frontmatter for blog posts.
//!
//! A post may open with a YAML block fenced by `---` lines:
//!
//! ```markdown
//! ---
//! title: Proving Fibonacci
//! date: 2024-05-01
//! tags: [benchmarks, sp1]
//! ---
//!
//! Body starts here.
//! ```
//!
//! Both fences must sit on their own line. A missing closing fence means the
//! file has no frontmatter; YAML that fails to parse is logged and dropped,
//! and the body after the fence is still used.

use serde::de::DeserializeOwned;
use serde_yaml::Value;
use vitrine_core::{Error, Result};

/// A markdown document split into metadata and body.
#[derive(Debug, Clone)]
pub struct Frontmatter<'a> {
    meta: Option<Value>,
    body: &'a str,
    fenced: bool,
}

impl<'a> Frontmatter<'a> {
    fn plain(body: &'a str) -> Self {
        Self {
            meta: None,
            body,
            fenced: false,
        }
    }

    /// Parsed metadata, if there was a valid, non-empty block.
    pub fn meta(&self) -> Option<&Value> {
        self.meta.as_ref()
    }

    /// Everything after the closing fence (or the whole input).
    pub fn body(&self) -> &'a str {
        self.body
    }

    /// True when a fenced block was present, valid or not.
    pub fn is_fenced(&self) -> bool {
        self.fenced
    }

    /// String field.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.meta.as_ref()?.get(key)?.as_str()
    }

    /// String list field. Accepts a YAML sequence or a comma-separated
    /// string; anything else reads as empty.
    pub fn get_strings(&self, key: &str) -> Vec<String> {
        match self.meta.as_ref().and_then(|m| m.get(key)) {
            Some(Value::Sequence(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            Some(Value::String(list)) => list
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Deserialize the metadata into `T`. `Ok(None)` without metadata.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        self.meta
            .clone()
            .map(|meta| {
                serde_yaml::from_value(meta)
                    .map_err(|e| Error::parse(format!("invalid frontmatter: {e}")))
            })
            .transpose()
    }
}

/// Split `content` into frontmatter and body.
pub fn split_frontmatter(content: &str) -> Frontmatter<'_> {
    let Some(rest) = content.strip_prefix("---") else {
        return Frontmatter::plain(content);
    };
    let Some(rest) = rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n')) else {
        return Frontmatter::plain(content);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            let meta = match serde_yaml::from_str::<Value>(yaml) {
                Ok(Value::Null) => None,
                Ok(value) => Some(value),
                Err(e) => {
                    log::warn!("Ignoring unparseable frontmatter: {e}");
                    None
                }
            };
            return Frontmatter {
                meta,
                body,
                fenced: true,
            };
        }
        offset += line.len();
    }

    log::warn!("Frontmatter fence opened but never closed, treating as body");
    Frontmatter::plain(content)
}
