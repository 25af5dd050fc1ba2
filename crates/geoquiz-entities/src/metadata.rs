//! Dataset metadata: counts per entity type and versioning.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::EntityType;
use crate::error::DatasetError;

/// Dataset format version that introduced the `entityType` field.
///
/// Stamping raises older datasets to this version and leaves newer ones
/// alone, so re-running on an already classified file changes nothing but
/// `lastUpdated`.
pub const DATASET_FORMAT_VERSION: DatasetVersion = DatasetVersion::new(2, 0, 0);

/// Version assumed for datasets without a `version` field.
pub const UNVERSIONED: DatasetVersion = DatasetVersion::new(1, 0, 0);

/// Record counts per entity type (`metadata.byEntityType`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityCounts {
    pub countries: usize,
    pub territories: usize,
}

impl EntityCounts {
    pub fn record(&mut self, entity_type: EntityType) {
        match entity_type {
            EntityType::Country => self.countries += 1,
            EntityType::Territory => self.territories += 1,
        }
    }

    pub fn get(&self, entity_type: EntityType) -> usize {
        match entity_type {
            EntityType::Country => self.countries,
            EntityType::Territory => self.territories,
        }
    }

    pub fn total(&self) -> usize {
        self.countries + self.territories
    }
}

/// `major.minor.patch` dataset version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DatasetVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl DatasetVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Version to write after classification.
    ///
    /// `current` is the dataset's existing `version` field, if any.
    pub fn bumped(current: Option<Self>) -> Self {
        current.unwrap_or(UNVERSIONED).max(DATASET_FORMAT_VERSION)
    }
}

impl fmt::Display for DatasetVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for DatasetVersion {
    type Err = DatasetError;

    /// Accepts `1`, `1.2` and `1.2.3`; missing parts are zero.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DatasetError::InvalidVersion(s.to_string());

        let parts: Vec<&str> = s.trim().split('.').collect();
        if parts.len() > 3 {
            return Err(invalid());
        }

        let mut numbers = [0u32; 3];
        for (slot, part) in numbers.iter_mut().zip(&parts) {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            *slot = part.parse().map_err(|_| invalid())?;
        }

        Ok(Self::new(numbers[0], numbers[1], numbers[2]))
    }
}

/// Summary written alongside the records.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetMetadata {
    pub by_entity_type: EntityCounts,
    pub version: DatasetVersion,
    pub last_updated: DateTime<Utc>,
}

impl DatasetMetadata {
    /// `lastUpdated` as written to the file (RFC 3339, UTC, milliseconds).
    pub fn last_updated_string(&self) -> String {
        format_timestamp(&self.last_updated)
    }
}

/// Format a timestamp the way the dataset stores it.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}
