//! The dataset document.
//!
//! ```json
//! {
//!   "countries": [{ "name": "France", ... }, ...],
//!   "metadata": { "byEntityType": { "countries": 2, "territories": 1 } },
//!   "version": "2.0.0",
//!   "lastUpdated": "2026-10-19T08:30:00.000Z"
//! }
//! ```
//!
//! Top-level keys other than these are carried through unchanged, in their
//! original order.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};

use crate::classify::Annotation;
use crate::error::{DatasetError, Result};
use crate::metadata::{format_timestamp, DatasetMetadata, DatasetVersion, EntityCounts};
use crate::record::CountryRecord;

pub const COUNTRIES_KEY: &str = "countries";
pub const METADATA_KEY: &str = "metadata";
pub const BY_ENTITY_TYPE_KEY: &str = "byEntityType";
pub const VERSION_KEY: &str = "version";
pub const LAST_UPDATED_KEY: &str = "lastUpdated";

/// Parsed dataset file.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Top-level object; the `countries` slot holds a placeholder
    root: Map<String, Value>,
    countries: Vec<CountryRecord>,
    version: Option<DatasetVersion>,
}

impl Dataset {
    /// Dataset with the given records and nothing else.
    pub fn new(countries: Vec<CountryRecord>) -> Self {
        let mut root = Map::new();
        root.insert(COUNTRIES_KEY.to_string(), Value::Null);
        Self {
            root,
            countries,
            version: None,
        }
    }

    /// Validate and wrap a parsed JSON document.
    pub fn from_value(value: Value) -> Result<Self> {
        let mut root = match value {
            Value::Object(map) => map,
            _ => return Err(DatasetError::Schema("top level must be an object".to_string())),
        };

        let countries = match root.get_mut(COUNTRIES_KEY).map(Value::take) {
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(DatasetError::Schema(format!("`{COUNTRIES_KEY}` must be an array")))
            }
            None => return Err(DatasetError::Schema(format!("missing `{COUNTRIES_KEY}`"))),
        };

        let countries = countries
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                CountryRecord::from_value(item).map_err(|e| match e {
                    DatasetError::Schema(msg) => {
                        DatasetError::Schema(format!("{COUNTRIES_KEY}[{i}]: {msg}"))
                    }
                    other => other,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut seen = HashSet::new();
        for record in &countries {
            if !seen.insert(record.name()) {
                tracing::warn!("Duplicate record name in dataset: {}", record.name());
            }
        }

        let version = match root.get(VERSION_KEY) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.parse()?),
            Some(other) => return Err(DatasetError::InvalidVersion(other.to_string())),
        };

        match root.get(METADATA_KEY) {
            None | Some(Value::Object(_)) => {}
            Some(_) => {
                return Err(DatasetError::Schema(format!("`{METADATA_KEY}` must be an object")))
            }
        }

        Ok(Self {
            root,
            countries,
            version,
        })
    }

    pub fn countries(&self) -> &[CountryRecord] {
        &self.countries
    }

    pub fn version(&self) -> Option<DatasetVersion> {
        self.version
    }

    /// Stored `lastUpdated`, as written.
    pub fn last_updated(&self) -> Option<&str> {
        self.root.get(LAST_UPDATED_KEY).and_then(Value::as_str)
    }

    /// Stored `metadata.byEntityType`, if present and well formed.
    pub fn entity_counts(&self) -> Option<EntityCounts> {
        let counts = self.root.get(METADATA_KEY)?.get(BY_ENTITY_TYPE_KEY)?;
        serde_json::from_value(counts.clone()).ok()
    }

    /// Top-level field other than `countries`.
    pub fn field(&self, key: &str) -> Option<&Value> {
        if key == COUNTRIES_KEY {
            return None;
        }
        self.root.get(key)
    }

    /// The full document, `countries` back in its original slot.
    pub fn to_value(&self) -> Value {
        let mut root = self.root.clone();
        root.insert(
            COUNTRIES_KEY.to_string(),
            Value::Array(self.countries.iter().cloned().map(CountryRecord::into_value).collect()),
        );
        Value::Object(root)
    }
}

/// Apply an annotation to a dataset: new records, counts, version and
/// timestamp.
///
/// Keys under `metadata` other than `byEntityType` are kept.
pub fn stamp(
    dataset: &Dataset,
    annotation: Annotation,
    now: DateTime<Utc>,
) -> (Dataset, DatasetMetadata) {
    let version = DatasetVersion::bumped(dataset.version);
    let metadata = DatasetMetadata {
        by_entity_type: annotation.counts,
        version,
        last_updated: now,
    };

    let mut root = dataset.root.clone();

    let mut meta = match root.get_mut(METADATA_KEY).map(Value::take) {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    };
    meta.insert(
        BY_ENTITY_TYPE_KEY.to_string(),
        json!({
            "countries": metadata.by_entity_type.countries,
            "territories": metadata.by_entity_type.territories,
        }),
    );
    root.insert(METADATA_KEY.to_string(), Value::Object(meta));
    root.insert(VERSION_KEY.to_string(), Value::String(version.to_string()));
    root.insert(
        LAST_UPDATED_KEY.to_string(),
        Value::String(format_timestamp(&now)),
    );

    let stamped = Dataset {
        root,
        countries: annotation.records,
        version: Some(version),
    };
    (stamped, metadata)
}
