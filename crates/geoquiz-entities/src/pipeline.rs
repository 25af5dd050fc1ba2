//! Read, classify, stamp and rewrite the dataset.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::classify::annotate;
use crate::config::ClassifierConfig;
use crate::dataset::{stamp, Dataset};
use crate::error::Result;
use crate::metadata::DatasetMetadata;
use crate::reference::TerritoryReferenceSet;
use crate::store::{load_dataset, persist_dataset};

/// Outcome of a classification run, as printed by the command.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationReport {
    pub metadata: DatasetMetadata,
    /// Names classified as territories, sorted
    pub territories: Vec<String>,
}

impl ClassificationReport {
    pub fn total(&self) -> usize {
        self.metadata.by_entity_type.total()
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts = &self.metadata.by_entity_type;
        writeln!(
            f,
            "Classified {} entities: {} countries, {} territories",
            counts.total(),
            counts.countries,
            counts.territories
        )?;
        writeln!(
            f,
            "Dataset version: {} (updated {})",
            self.metadata.version,
            self.metadata.last_updated_string()
        )?;
        if self.territories.is_empty() {
            return Ok(());
        }
        writeln!(f, "Territories:")?;
        for name in &self.territories {
            writeln!(f, "  - {name}")?;
        }
        Ok(())
    }
}

/// Classify a dataset in memory.
pub fn classify_dataset(
    dataset: &Dataset,
    territories: &TerritoryReferenceSet,
    now: DateTime<Utc>,
) -> (Dataset, ClassificationReport) {
    let annotation = annotate(dataset.countries(), territories);
    let territory_names = annotation.territory_names();
    let (stamped, metadata) = stamp(dataset, annotation, now);

    let report = ClassificationReport {
        metadata,
        territories: territory_names,
    };
    (stamped, report)
}

/// Full run against the files named in `config`.
///
/// Every read-stage failure aborts before the dataset file is touched.
pub fn run(config: &ClassifierConfig) -> Result<ClassificationReport> {
    let territories = match &config.territories_path {
        Some(path) => TerritoryReferenceSet::load(path)?,
        None => TerritoryReferenceSet::builtin()?,
    };
    let dataset = load_dataset(&config.dataset_path)?;

    let (stamped, report) = classify_dataset(&dataset, &territories, Utc::now());
    persist_dataset(&config.dataset_path, &stamped)?;

    tracing::info!(
        "Classified {} countries and {} territories",
        report.metadata.by_entity_type.countries,
        report.metadata.by_entity_type.territories
    );
    Ok(report)
}
