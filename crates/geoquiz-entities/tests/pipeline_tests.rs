//! End-to-end classification runs against files on disk

use std::fs;
use std::path::{Path, PathBuf};

use geoquiz_entities::{
    load_dataset, run, ClassifierConfig, DatasetError, EntityCounts, EntityType,
};
use rstest::rstest;
use serde_json::{json, Value};
use tempfile::TempDir;

fn write_dataset(dir: &Path, value: &Value) -> PathBuf {
    let path = dir.join("countries.json");
    fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

fn config_for(path: &Path) -> ClassifierConfig {
    ClassifierConfig {
        dataset_path: path.to_path_buf(),
        territories_path: None,
    }
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

// === Scenarios ===

#[test]
fn test_france_guadeloupe_japan() {
    let dir = TempDir::new().unwrap();
    let path = write_dataset(
        dir.path(),
        &json!({"countries": [{"name": "France"}, {"name": "Guadeloupe"}, {"name": "Japan"}]}),
    );

    let report = run(&config_for(&path)).unwrap();
    assert_eq!(report.territories, vec!["Guadeloupe"]);

    let out = read_json(&path);
    let tags: Vec<&str> = out["countries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["entityType"].as_str().unwrap())
        .collect();
    assert_eq!(tags, vec!["country", "territory", "country"]);
    assert_eq!(
        out["metadata"]["byEntityType"],
        json!({"countries": 2, "territories": 1})
    );
    assert_eq!(out["version"], "2.0.0");
    assert!(out["lastUpdated"].as_str().unwrap().ends_with('Z'));
}

#[test]
fn test_empty_dataset() {
    let dir = TempDir::new().unwrap();
    let path = write_dataset(dir.path(), &json!({"countries": []}));

    let report = run(&config_for(&path)).unwrap();
    assert_eq!(report.metadata.by_entity_type, EntityCounts::default());
    assert!(report.territories.is_empty());

    let out = read_json(&path);
    assert_eq!(out["countries"], json!([]));
    assert_eq!(
        out["metadata"]["byEntityType"],
        json!({"countries": 0, "territories": 0})
    );
}

#[test]
fn test_fields_preserved() {
    let dir = TempDir::new().unwrap();
    let input = json!({
        "source": "restcountries",
        "countries": [{
            "name": "New Caledonia",
            "code": "NC",
            "capital": "Nouméa",
            "flag": "🇳🇨",
            "latlng": [-21.5, 165.5],
            "translations": {"fra": "Nouvelle-Calédonie"}
        }],
        "metadata": {"generatedBy": "sync-script"}
    });
    let path = write_dataset(dir.path(), &input);

    run(&config_for(&path)).unwrap();

    let out = read_json(&path);
    let record = out["countries"][0].as_object().unwrap();
    for (key, value) in input["countries"][0].as_object().unwrap() {
        assert_eq!(record.get(key), Some(value), "{key}");
    }
    assert_eq!(record.keys().last().map(String::as_str), Some("entityType"));
    assert_eq!(out["source"], "restcountries");
    assert_eq!(out["metadata"]["generatedBy"], "sync-script");
}

#[test]
fn test_number_fields_written_back_verbatim() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("countries.json");
    fs::write(
        &path,
        r#"{"countries": [{"name": "Guam", "area": 1E3, "population": 12345678901234567890123, "lat": 13.444304000000000001}]}"#,
    )
    .unwrap();

    run(&config_for(&path)).unwrap();

    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"area\": 1E3,"), "{raw}");
    assert!(raw.contains("\"population\": 12345678901234567890123,"), "{raw}");
    assert!(raw.contains("\"lat\": 13.444304000000000001,"), "{raw}");
}

// === Idempotence ===

#[test]
fn test_rerun_changes_only_timestamp() {
    let dir = TempDir::new().unwrap();
    let path = write_dataset(
        dir.path(),
        &json!({
            "countries": [{"name": "Bermuda"}, {"name": "Norway"}, {"name": "Svalbard and Jan Mayen"}],
            "version": "1.4.2"
        }),
    );

    let first_report = run(&config_for(&path)).unwrap();
    let mut first = read_json(&path);
    let second_report = run(&config_for(&path)).unwrap();
    let mut second = read_json(&path);

    assert_eq!(first_report.territories, second_report.territories);
    assert_eq!(
        first_report.metadata.by_entity_type,
        second_report.metadata.by_entity_type
    );

    first.as_object_mut().unwrap().remove("lastUpdated");
    second.as_object_mut().unwrap().remove("lastUpdated");
    assert_eq!(first, second);
}

// === Exact-match semantics ===

#[rstest]
#[case("Greenland", EntityType::Territory)]
#[case("greenland", EntityType::Country)]
#[case("Réunion", EntityType::Territory)]
#[case("Reunion", EntityType::Country)]
fn test_exact_match_on_disk(#[case] name: &str, #[case] expected: EntityType) {
    let dir = TempDir::new().unwrap();
    let path = write_dataset(dir.path(), &json!({"countries": [{"name": name}]}));

    run(&config_for(&path)).unwrap();

    let dataset = load_dataset(&path).unwrap();
    assert_eq!(dataset.countries()[0].entity_type(), Some(expected));
}

// === Reference list override ===

#[test]
fn test_custom_reference_file() {
    let dir = TempDir::new().unwrap();
    let path = write_dataset(
        dir.path(),
        &json!({"countries": [{"name": "Greenland"}, {"name": "Somaliland"}]}),
    );
    let territories = dir.path().join("territories.json");
    fs::write(&territories, r#"{"version": 7, "territories": ["Somaliland"]}"#).unwrap();

    let config = ClassifierConfig {
        dataset_path: path.clone(),
        territories_path: Some(territories),
    };
    let report = run(&config).unwrap();

    assert_eq!(report.territories, vec!["Somaliland"]);
    assert_eq!(read_json(&path)["countries"][0]["entityType"], "country");
}

// === Fail-fast ===

#[rstest]
#[case("{\"countries\": [")]
#[case("[]")]
#[case("{\"countries\": [{\"capital\": \"Paris\"}]}")]
#[case("{\"countries\": [], \"version\": \"next\"}")]
fn test_bad_input_left_untouched(#[case] content: &str) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("countries.json");
    fs::write(&path, content).unwrap();

    let err = run(&config_for(&path)).unwrap_err();
    assert!(!err.is_write_stage());
    assert_eq!(fs::read_to_string(&path).unwrap(), content);
}

#[test]
fn test_bad_reference_file_aborts_before_write() {
    let dir = TempDir::new().unwrap();
    let path = write_dataset(dir.path(), &json!({"countries": [{"name": "Guam"}]}));
    let before = fs::read_to_string(&path).unwrap();

    let config = ClassifierConfig {
        dataset_path: path.clone(),
        territories_path: Some(dir.path().join("missing.json")),
    };
    let err = run(&config).unwrap_err();

    assert!(matches!(err, DatasetError::Reference(_)));
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn test_missing_dataset() {
    let dir = TempDir::new().unwrap();
    let err = run(&config_for(&dir.path().join("countries.json"))).unwrap_err();
    assert!(matches!(err, DatasetError::Read { .. }));
}
