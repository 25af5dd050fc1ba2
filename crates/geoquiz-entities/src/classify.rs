//! Pure classification over dataset records.

use crate::entity::EntityType;
use crate::metadata::EntityCounts;
use crate::record::CountryRecord;
use crate::reference::TerritoryReferenceSet;

/// Classify a record name.
///
/// `Territory` iff `name` is in the reference set byte for byte; everything
/// else, including near misses such as `"greenland"` or `"Reunion"`, is a
/// `Country`.
pub fn classify(name: &str, territories: &TerritoryReferenceSet) -> EntityType {
    if territories.contains(name) {
        EntityType::Territory
    } else {
        EntityType::Country
    }
}

/// Result of [`annotate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// Input records, in input order, each tagged with `entityType`
    pub records: Vec<CountryRecord>,
    pub counts: EntityCounts,
}

impl Annotation {
    /// Names of records classified as territories, sorted.
    pub fn territory_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .records
            .iter()
            .filter(|r| r.entity_type() == Some(EntityType::Territory))
            .map(|r| r.name().to_string())
            .collect();
        names.sort();
        names
    }
}

/// Tag every record and count the result.
///
/// Single pass in input order. Fields other than `entityType` are left as
/// they are.
pub fn annotate(records: &[CountryRecord], territories: &TerritoryReferenceSet) -> Annotation {
    let mut counts = EntityCounts::default();
    let records = records
        .iter()
        .map(|record| {
            let entity_type = classify(record.name(), territories);
            if entity_type == EntityType::Territory {
                tracing::debug!("Classified {} as territory", record.name());
            }
            counts.record(entity_type);
            record.with_entity_type(entity_type)
        })
        .collect();

    Annotation { records, counts }
}
