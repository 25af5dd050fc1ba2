//! Territory reference list.
//!
//! The list is a data artifact (`data/territories.json`) shared with the quiz
//! app rather than a constant in code, so both sides read the same names:
//!
//! ```json
//! {
//!   "version": 1,
//!   "territories": ["Greenland", "Guadeloupe", "Hong Kong"]
//! }
//! ```
//!
//! The file is embedded at build time; a different file can be supplied at
//! runtime through [`ClassifierConfig::territories_path`](crate::ClassifierConfig).

use std::collections::BTreeSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::{DatasetError, Result};

/// Reference list compiled into the crate.
pub const BUILTIN_TERRITORIES_JSON: &str = include_str!("../data/territories.json");

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ReferenceFile {
    version: u32,
    territories: Vec<String>,
}

/// Fixed set of territory names, matched byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerritoryReferenceSet {
    version: u32,
    names: BTreeSet<String>,
}

impl TerritoryReferenceSet {
    /// The reference list embedded in the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_TERRITORIES_JSON)
    }

    /// Load a reference list from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DatasetError::Reference(format!("{}: {}", path.display(), e)))?;
        let set = Self::from_json_str(&content)?;
        tracing::info!(
            "Loaded {} territory names (v{}) from {:?}",
            set.len(),
            set.version,
            path
        );
        Ok(set)
    }

    /// Parse a reference list document.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let file: ReferenceFile =
            serde_json::from_str(content).map_err(|e| DatasetError::Reference(e.to_string()))?;

        let mut names = BTreeSet::new();
        for name in file.territories {
            if name.is_empty() {
                return Err(DatasetError::Reference("empty territory name".to_string()));
            }
            if !names.insert(name.clone()) {
                tracing::warn!("Duplicate territory name in reference list: {}", name);
            }
        }

        Ok(Self {
            version: file.version,
            names,
        })
    }

    /// Build a set directly from names (version 0).
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            version: 0,
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Exact membership test. No case folding or Unicode normalization.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Revision of the reference list.
    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
