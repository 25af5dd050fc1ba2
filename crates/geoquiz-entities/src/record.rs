//! Dataset records.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::entity::{EntityType, ENTITY_TYPE_FIELD};
use crate::error::{DatasetError, Result};

/// One entry of the `countries` array.
///
/// Wraps the raw JSON object so every descriptive field (flag, capital,
/// coordinates, translations...) passes through untouched and in order.
/// A record always has a string `name`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CountryRecord {
    fields: Map<String, Value>,
}

impl CountryRecord {
    /// Create a record holding only a name.
    pub fn new(name: &str) -> Self {
        let mut fields = Map::new();
        fields.insert("name".to_string(), Value::String(name.to_string()));
        Self { fields }
    }

    /// Wrap a JSON object, checking it has a string `name`.
    pub fn from_fields(fields: Map<String, Value>) -> Result<Self> {
        match fields.get("name") {
            Some(Value::String(_)) => Ok(Self { fields }),
            Some(other) => Err(DatasetError::Schema(format!(
                "record name must be a string, got {other}"
            ))),
            None => Err(DatasetError::Schema("record without a name".to_string())),
        }
    }

    /// Wrap a JSON value, which must be an object with a string `name`.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Self::from_fields(fields),
            other => Err(DatasetError::Schema(format!(
                "record must be an object, got {other}"
            ))),
        }
    }

    pub fn name(&self) -> &str {
        self.fields
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Stored classification, if the record carries a valid one.
    pub fn entity_type(&self) -> Option<EntityType> {
        self.fields
            .get(ENTITY_TYPE_FIELD)
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
    }

    /// Copy of this record tagged with `entity_type`.
    ///
    /// A fresh tag is appended after the existing fields; an existing tag is
    /// replaced where it stands.
    pub fn with_entity_type(&self, entity_type: EntityType) -> Self {
        let mut fields = self.fields.clone();
        fields.insert(
            ENTITY_TYPE_FIELD.to_string(),
            Value::String(entity_type.as_str().to_string()),
        );
        Self { fields }
    }

    /// Set an arbitrary field.
    pub fn with_field(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}
