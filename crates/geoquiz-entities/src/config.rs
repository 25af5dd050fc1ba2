//! Classifier configuration.
//!
//! Resolved from defaults, then an optional `geoquiz.toml` in the working
//! directory, then environment overrides:
//!
//! ```toml
//! [dataset]
//! path = "assets/data/countries.json"
//!
//! [territories]
//! path = "assets/data/territories.json"
//! ```
//!
//! | Variable | Overrides |
//! |---|---|
//! | `GEOQUIZ_DATASET` | `dataset.path` |
//! | `GEOQUIZ_TERRITORIES` | `territories.path` |

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{DatasetError, Result};

/// Config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "geoquiz.toml";

pub const DATASET_ENV: &str = "GEOQUIZ_DATASET";
pub const TERRITORIES_ENV: &str = "GEOQUIZ_TERRITORIES";

fn default_dataset_path() -> PathBuf {
    PathBuf::from("data/countries.json")
}

/// Where the classifier reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierConfig {
    /// Dataset file, rewritten in place
    pub dataset_path: PathBuf,
    /// Territory reference file; the embedded list when `None`
    pub territories_path: Option<PathBuf>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            dataset_path: default_dataset_path(),
            territories_path: None,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlDataset {
    path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlTerritories {
    path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    #[serde(default)]
    dataset: TomlDataset,
    #[serde(default)]
    territories: TomlTerritories,
}

impl ClassifierConfig {
    /// Resolve from `dir/geoquiz.toml` (if present) and the process
    /// environment.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        let mut config = if path.is_file() {
            let content = std::fs::read_to_string(&path)
                .map_err(|e| DatasetError::Config(format!("{}: {}", path.display(), e)))?;
            tracing::debug!("Using config file {:?}", path);
            Self::from_toml_str(&content)?
        } else {
            Self::default()
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse a config document; omitted keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let toml: TomlConfig =
            toml::from_str(content).map_err(|e| DatasetError::Config(e.to_string()))?;

        Ok(Self {
            dataset_path: toml.dataset.path.unwrap_or_else(default_dataset_path),
            territories_path: toml.territories.path,
        })
    }

    /// Apply `GEOQUIZ_*` overrides from `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(DATASET_ENV) {
            self.dataset_path = non_empty_path(DATASET_ENV, value)?;
        }
        if let Some(value) = lookup(TERRITORIES_ENV) {
            self.territories_path = Some(non_empty_path(TERRITORIES_ENV, value)?);
        }
        Ok(())
    }
}

fn non_empty_path(var: &str, value: String) -> Result<PathBuf> {
    if value.trim().is_empty() {
        return Err(DatasetError::Config(format!("{var} is set but empty")));
    }
    Ok(PathBuf::from(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let config = ClassifierConfig::default();
        assert_eq!(config.dataset_path, PathBuf::from("data/countries.json"));
        assert_eq!(config.territories_path, None);
    }

    #[test]
    fn parse_full_config() {
        let config = ClassifierConfig::from_toml_str(
            r#"
[dataset]
path = "assets/data/countries.json"

[territories]
path = "assets/data/territories.json"
"#,
        )
        .unwrap();

        assert_eq!(config.dataset_path, PathBuf::from("assets/data/countries.json"));
        assert_eq!(
            config.territories_path,
            Some(PathBuf::from("assets/data/territories.json"))
        );
    }

    #[test]
    fn parse_empty_config() {
        let config = ClassifierConfig::from_toml_str("").unwrap();
        assert_eq!(config, ClassifierConfig::default());
    }

    #[test]
    fn reject_unknown_keys() {
        let err = ClassifierConfig::from_toml_str("[dataset]\nfile = \"x.json\"\n").unwrap_err();
        assert!(matches!(err, DatasetError::Config(_)));
    }

    #[test]
    fn env_overrides_file() {
        let mut config =
            ClassifierConfig::from_toml_str("[dataset]\npath = \"from-file.json\"\n").unwrap();
        let env: HashMap<&str, &str> = [
            (DATASET_ENV, "from-env.json"),
            (TERRITORIES_ENV, "territories.json"),
        ]
        .into_iter()
        .collect();

        config
            .apply_env(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.dataset_path, PathBuf::from("from-env.json"));
        assert_eq!(config.territories_path, Some(PathBuf::from("territories.json")));
    }

    #[test]
    fn empty_env_value_rejected() {
        let mut config = ClassifierConfig::default();
        let err = config
            .apply_env(|key| (key == DATASET_ENV).then(|| " ".to_string()))
            .unwrap_err();
        assert!(matches!(err, DatasetError::Config(_)));
    }

    #[test]
    fn file_value_kept_without_env() {
        let mut config =
            ClassifierConfig::from_toml_str("[dataset]\npath = \"quiz/countries.json\"\n")
                .unwrap();
        config.apply_env(|_| None).unwrap();

        assert_eq!(config.dataset_path, PathBuf::from("quiz/countries.json"));
        assert_eq!(config.territories_path, None);
    }

    #[test]
    fn load_rejects_invalid_config_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[dataset\n").unwrap();

        let err = ClassifierConfig::load(dir.path()).unwrap_err();
        assert!(matches!(err, DatasetError::Config(_)));
    }
}
