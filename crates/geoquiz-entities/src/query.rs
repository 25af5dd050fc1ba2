//! Quiz-pool selection over a classified dataset.
//!
//! This is the data side of the app's `useCountries()` hook: quiz screens ask
//! for sovereign countries only, territories only, or everything.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entity::EntityType;
use crate::record::CountryRecord;

/// Which records a quiz draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityFilter {
    All,
    #[default]
    Countries,
    Territories,
}

impl EntityFilter {
    /// Test whether a record belongs to this pool.
    ///
    /// Records without a stored tag count as countries.
    pub fn matches(&self, record: &CountryRecord) -> bool {
        let entity_type = record.entity_type().unwrap_or(EntityType::Country);
        match self {
            Self::All => true,
            Self::Countries => entity_type == EntityType::Country,
            Self::Territories => entity_type == EntityType::Territory,
        }
    }
}

impl FromStr for EntityFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "countries" | "country" => Ok(Self::Countries),
            "territories" | "territory" => Ok(Self::Territories),
            other => Err(format!("unknown entity filter: {other}")),
        }
    }
}

/// Records matching `filter`, in dataset order.
pub fn select<'a>(records: &'a [CountryRecord], filter: EntityFilter) -> Vec<&'a CountryRecord> {
    records.iter().filter(|r| filter.matches(r)).collect()
}

/// Loading state exposed to screens.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountriesState {
    pub is_loading: bool,
    pub countries: Vec<CountryRecord>,
}

impl CountriesState {
    pub fn loading() -> Self {
        Self {
            is_loading: true,
            countries: Vec::new(),
        }
    }

    pub fn ready(countries: Vec<CountryRecord>) -> Self {
        Self {
            is_loading: false,
            countries,
        }
    }

    /// Ready state holding only the records in `filter`'s pool.
    pub fn ready_filtered(records: &[CountryRecord], filter: EntityFilter) -> Self {
        Self::ready(select(records, filter).into_iter().cloned().collect())
    }
}
