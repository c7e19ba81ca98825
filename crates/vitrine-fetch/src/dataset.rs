//! Dataset payloads.
//!
//! Every listing resource is a JSON document whose top level is an object
//! holding one array of records under a well-known field, optionally next to
//! a `lastUpdated` timestamp:
//!
//! ```json
//! { "zkvms": [ { "id": "sp1", "name": "SP1" } ], "lastUpdated": "2024-05-01T00:00:00Z" }
//! ```

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use vitrine_core::{normalize_id, Error, Result};
use vitrine_listing::Listable;

/// A resource path and the field holding its records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resource {
    /// Path relative to the data root, e.g. `zkvms.json`.
    pub path: String,
    /// Top-level array field, e.g. `zkvms`.
    pub field: String,
}

impl Resource {
    /// Build a resource descriptor.
    pub fn new(path: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            field: field.into(),
        }
    }

    /// The zkVM catalogue.
    pub fn zkvms() -> Self {
        Self::new("zkvms.json", "zkvms")
    }

    /// The design-space catalogue.
    pub fn spaces() -> Self {
        Self::new("spaces.json", "spaces")
    }

    /// The benchmark program catalogue.
    pub fn programs() -> Self {
        Self::new("programs.json", "programs")
    }

    /// Look up a well-known resource by section name.
    pub fn well_known(section: &str) -> Option<Self> {
        match section {
            "zkvms" => Some(Self::zkvms()),
            "spaces" => Some(Self::spaces()),
            "programs" => Some(Self::programs()),
            _ => None,
        }
    }

    /// Names accepted by [`Resource::well_known`].
    pub fn sections() -> &'static [&'static str] {
        &["zkvms", "spaces", "programs"]
    }
}

/// A loaded dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset<R> {
    /// Records in file order.
    pub records: Vec<R>,
    /// When the publisher last regenerated the file.
    #[serde(rename = "lastUpdated", skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl<R> Default for Dataset<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            last_updated: None,
        }
    }
}

impl<R: DeserializeOwned> Dataset<R> {
    /// Parse a payload, taking records from `field`.
    ///
    /// # Errors
    ///
    /// Returns a parse error when the document is not an object, the field
    /// is missing or not an array, or a record does not deserialize.
    pub fn from_json(bytes: &[u8], field: &str) -> Result<Self> {
        let value: Value = serde_json::from_slice(bytes)?;
        let Value::Object(mut object) = value else {
            return Err(Error::parse("expected a top-level JSON object"));
        };

        let last_updated = object
            .get("lastUpdated")
            .or_else(|| object.get("last_updated"))
            .and_then(parse_timestamp);

        let items = match object.remove(field) {
            Some(Value::Array(items)) => items,
            Some(_) => return Err(Error::parse(format!("field '{field}' is not an array"))),
            None => return Err(Error::parse(format!("missing array field '{field}'"))),
        };

        let records = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_value(item)
                    .map_err(|e| Error::parse(format!("{field}[{index}]: {e}")))
            })
            .collect::<Result<Vec<R>>>()?;

        Ok(Self {
            records,
            last_updated,
        })
    }
}

impl<R> Dataset<R> {
    /// Wrap records without a timestamp.
    pub fn new(records: Vec<R>) -> Self {
        Self {
            records,
            last_updated: None,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<R: Listable> Dataset<R> {
    /// Find a record by id (detail pages). An exact match wins; otherwise
    /// ids are compared in normalized form, so `Risc_Zero` finds `risc-zero`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when no record has this id.
    pub fn find(&self, kind: &str, id: &str) -> Result<&R> {
        if let Some(record) = self.records.iter().find(|record| record.id() == id) {
            return Ok(record);
        }
        let wanted = normalize_id(id);
        self.records
            .iter()
            .find(|record| !wanted.is_empty() && normalize_id(record.id()) == wanted)
            .ok_or_else(|| Error::not_found(kind, id))
    }
}

fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    let text = value.as_str()?;
    match DateTime::parse_from_rfc3339(text) {
        Ok(ts) => Some(ts.with_timezone(&Utc)),
        Err(e) => {
            log::warn!("Ignoring unparseable lastUpdated '{text}': {e}");
            None
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use vitrine_listing::Record;

    const ZKVMS: &str = r#"{
        "zkvms": [
            {"id": "sp1", "name": "SP1", "tags": ["risc-v"], "stars": 900},
            {"slug": "risc0", "title": "RISC Zero"}
        ],
        "lastUpdated": "2024-05-01T12:00:00Z"
    }"#;

    #[test]
    fn test_from_json_reads_records_and_timestamp() {
        let dataset: Dataset<Record> = Dataset::from_json(ZKVMS.as_bytes(), "zkvms").unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records[1].id, "risc0");
        assert_eq!(dataset.records[1].name, "RISC Zero");
        assert_eq!(
            dataset.last_updated.unwrap().to_rfc3339(),
            "2024-05-01T12:00:00+00:00"
        );
    }

    #[test]
    fn test_from_json_missing_field() {
        let err = Dataset::<Record>::from_json(ZKVMS.as_bytes(), "spaces").unwrap_err();
        assert!(err.is_fetch_failure());
        assert!(err.to_string().contains("spaces"));
    }

    #[test]
    fn test_from_json_field_not_array() {
        let err = Dataset::<Record>::from_json(br#"{"zkvms": {}}"#, "zkvms").unwrap_err();
        assert!(err.to_string().contains("not an array"));
    }

    #[test]
    fn test_from_json_top_level_array_rejected() {
        let err = Dataset::<Record>::from_json(b"[]", "zkvms").unwrap_err();
        assert!(err.to_string().contains("object"));
    }

    #[test]
    fn test_from_json_malformed() {
        let err = Dataset::<Record>::from_json(b"{not json", "zkvms").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
        assert!(err.is_fetch_failure());
    }

    #[test]
    fn test_from_json_bad_record_names_index() {
        let err =
            Dataset::<Record>::from_json(br#"{"zkvms": [{"id": "a", "name": "A"}, {"id": 3}]}"#, "zkvms")
                .unwrap_err();
        assert!(err.to_string().contains("zkvms[1]"));
    }

    #[test]
    fn test_bad_timestamp_is_ignored() {
        let dataset: Dataset<Record> =
            Dataset::from_json(br#"{"zkvms": [], "lastUpdated": "yesterday"}"#, "zkvms").unwrap();
        assert!(dataset.is_empty());
        assert!(dataset.last_updated.is_none());
    }

    #[test]
    fn test_find() {
        let dataset: Dataset<Record> = Dataset::from_json(ZKVMS.as_bytes(), "zkvms").unwrap();
        assert_eq!(dataset.find("zkvm", "sp1").unwrap().name, "SP1");
        let err = dataset.find("zkvm", "jolt").unwrap_err();
        assert_eq!(err.to_string(), "zkvm not found: jolt");
    }

    #[test]
    fn test_from_json_record_with_id_and_slug() {
        let dataset: Dataset<Record> = Dataset::from_json(
            br#"{"zkvms": [
                {"id": "sp1", "slug": "sp1", "name": "SP1", "title": "SP1 zkVM"},
                {"id": "jolt", "name": "Jolt"}
            ]}"#,
            "zkvms",
        )
        .unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records[0].name, "SP1");
    }

    #[test]
    fn test_find_normalizes_typed_id() {
        let dataset = Dataset::new(vec![
            Record::new("risc-zero", "RISC Zero"),
            Record::new("Risc_Zero", "Legacy entry"),
        ]);
        assert_eq!(dataset.find("zkvm", "Risc_Zero").unwrap().name, "Legacy entry");
        assert_eq!(dataset.find("zkvm", "RISC Zero").unwrap().name, "RISC Zero");
        assert!(dataset.find("zkvm", "  ").is_err());
    }

    #[test]
    fn test_well_known_resources() {
        for section in Resource::sections() {
            let resource = Resource::well_known(section).unwrap();
            assert_eq!(resource.field, *section);
            assert_eq!(resource.path, format!("{section}.json"));
        }
        assert!(Resource::well_known("posts").is_none());
    }
}
