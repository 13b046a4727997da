use std::fs;

use tempfile::TempDir;
use variant_provider::config::{ConfigError, ProviderConfig};
use variant_provider::plugins::{create_default_plugins, fictional_hw, fictional_tech};
use variant_provider::variant::types::VariantProperty;

#[test]
fn load_reads_json_file_and_applies_overrides() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(
        &path,
        r#"{
            "plugins": {
                "fictional_hw": {
                    "capabilities": { "compute_accuracy": { "threshold": 0.75 } },
                    "strategies": {
                        "compute_accuracy": { "strategy": "numericThreshold", "order": "ascending" }
                    }
                },
                "fictional_tech": { "enabled": false }
            }
        }"#,
    )
    .unwrap();

    let config = ProviderConfig::load(&path).unwrap();
    let plugins = config.apply(create_default_plugins()).unwrap();

    assert!(!plugins.contains_key(fictional_tech::NAMESPACE));

    let properties: Vec<VariantProperty> = ["0.7", "0.99", "0.5", "0.75"]
        .into_iter()
        .map(|v| VariantProperty::new(fictional_hw::NAMESPACE, "compute_accuracy", v))
        .collect();
    let resolution = plugins[fictional_hw::NAMESPACE]
        .supported_configs(&properties)
        .unwrap();

    assert_eq!(
        resolution.values("compute_accuracy"),
        Some(&["0.5".to_string(), "0.7".to_string(), "0.75".to_string()][..])
    );
}

#[test]
fn load_or_default_uses_defaults_for_missing_file() {
    let temp_dir = TempDir::new().unwrap();

    let config = ProviderConfig::load_or_default(&temp_dir.path().join("missing.json")).unwrap();

    assert_eq!(config, ProviderConfig::default());
}

#[test]
fn load_reports_malformed_json() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(&path, r#"{ "plugins": { "fictional_hw": { "enabled": "yes" } } }"#).unwrap();

    let err = ProviderConfig::load(&path).unwrap_err();

    assert!(matches!(err, ConfigError::Json { .. }));
}

#[test]
fn load_reports_missing_file() {
    let temp_dir = TempDir::new().unwrap();

    let err = ProviderConfig::load(&temp_dir.path().join("missing.json")).unwrap_err();

    assert!(matches!(err, ConfigError::Io { .. }));
}
