//! Entity type tag.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Field name added to every dataset record.
pub const ENTITY_TYPE_FIELD: &str = "entityType";

/// Classification of a dataset record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    /// Internationally recognized independent state
    Country,
    /// Dependency, autonomous region or special administrative area
    Territory,
}

impl EntityType {
    /// Wire value (`"country"` / `"territory"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Country => "country",
            Self::Territory => "territory",
        }
    }

    /// Display name for UI.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Country => "Country",
            Self::Territory => "Territory",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "country" => Ok(Self::Country),
            "territory" => Ok(Self::Territory),
            other => Err(format!("unknown entity type: {other}")),
        }
    }
}
