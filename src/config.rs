use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::plugins::VariantPlugin;
use crate::variant::capability::{CapabilityProvider, LayeredCapabilities, SystemCapability};
use crate::variant::error::RangeParseError;
use crate::variant::strategies::{
    FixedPriorityStrategy, NumericOrder, NumericThresholdStrategy, RangeOrder,
    ThresholdComparison, VersionRangeStrategy,
};
use crate::variant::strategy::ResolutionStrategy;

// =============================================================================
// Defaults
// =============================================================================

/// Environment variable overriding the configured log filter
pub const LOG_ENV_VAR: &str = "VARIANT_PROVIDER_LOG";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "warn";

const APP_DIR: &str = "variant-provider";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {path:?}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid capability for '{namespace} :: {feature}': {source}")]
    Capability {
        namespace: String,
        feature: String,
        source: RangeParseError,
    },

    #[error(
        "Strategy '{strategy}' for '{namespace} :: {feature}' needs a {expected} capability, \
         system reports {found}"
    )]
    StrategyMismatch {
        namespace: String,
        feature: String,
        strategy: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}

/// Top-level configuration
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ProviderConfig {
    pub log: LogConfig,
    pub plugins: IndexMap<String, PluginConfig>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct LogConfig {
    /// `tracing` filter directive, e.g. `info` or `variant_provider=debug`
    pub level: String,
    /// Emit JSON lines instead of human readable output
    pub json: bool,
    /// Write logs to this file instead of stderr
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json: false,
            file: None,
        }
    }
}

/// Per-plugin configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct PluginConfig {
    pub enabled: bool,
    /// Capability overrides layered over the plugin's system probe
    pub capabilities: IndexMap<String, CapabilitySetting>,
    /// Strategy overrides per feature
    pub strategies: IndexMap<String, StrategySetting>,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            capabilities: IndexMap::new(),
            strategies: IndexMap::new(),
        }
    }
}

/// A configured system capability
///
/// `{"tokens": [..]}`, `{"version": ".."}`, `{"threshold": n}` or `"notApplicable"`
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum CapabilitySetting {
    Tokens(Vec<String>),
    Version(String),
    Threshold(f64),
    NotApplicable,
}

impl CapabilitySetting {
    pub fn to_capability(&self) -> Result<Option<SystemCapability>, RangeParseError> {
        Ok(match self {
            CapabilitySetting::Tokens(tokens) => Some(SystemCapability::Tokens(tokens.clone())),
            CapabilitySetting::Version(version) => Some(SystemCapability::version(version)?),
            CapabilitySetting::Threshold(threshold) => {
                Some(SystemCapability::Threshold(*threshold))
            }
            CapabilitySetting::NotApplicable => None,
        })
    }
}

/// A configured strategy and its ordering policy
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(tag = "strategy", rename_all = "camelCase")]
pub enum StrategySetting {
    FixedPriority,
    #[serde(rename_all = "camelCase")]
    VersionRange {
        #[serde(default)]
        order: RangeOrder,
    },
    #[serde(rename_all = "camelCase")]
    NumericThreshold {
        #[serde(default)]
        comparison: ThresholdComparison,
        #[serde(default)]
        order: NumericOrder,
    },
}

impl StrategySetting {
    pub fn build(&self) -> Arc<dyn ResolutionStrategy> {
        match *self {
            StrategySetting::FixedPriority => Arc::new(FixedPriorityStrategy),
            StrategySetting::VersionRange { order } => Arc::new(VersionRangeStrategy::new(order)),
            StrategySetting::NumericThreshold { comparison, order } => {
                Arc::new(NumericThresholdStrategy::new(comparison, order))
            }
        }
    }
}

impl ProviderConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the file at `path` if it exists, otherwise use defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Drop disabled plugins and install configured overrides
    pub fn apply(
        &self,
        plugins: IndexMap<String, VariantPlugin>,
    ) -> Result<IndexMap<String, VariantPlugin>, ConfigError> {
        let mut configured = IndexMap::with_capacity(plugins.len());

        for (namespace, plugin) in plugins {
            let Some(settings) = self.plugins.get(&namespace) else {
                configured.insert(namespace, plugin);
                continue;
            };

            if !settings.enabled {
                info!("Plugin '{}' disabled by configuration", namespace);
                continue;
            }

            let plugin = settings.apply(&namespace, plugin)?;
            configured.insert(namespace, plugin);
        }

        for namespace in self.plugins.keys() {
            if !configured.contains_key(namespace) && self.plugins[namespace].enabled {
                warn!("Configuration for unknown plugin '{}' ignored", namespace);
            }
        }

        Ok(configured)
    }
}

impl PluginConfig {
    fn apply(
        &self,
        namespace: &str,
        mut plugin: VariantPlugin,
    ) -> Result<VariantPlugin, ConfigError> {
        if !self.capabilities.is_empty() {
            let mut layered = LayeredCapabilities::new(plugin.system().clone());
            for (feature, setting) in &self.capabilities {
                let capability = setting
                    .to_capability()
                    .map_err(|source| ConfigError::Capability {
                        namespace: namespace.to_string(),
                        feature: feature.clone(),
                        source,
                    })?;
                layered = layered.with_override(feature.clone(), capability);
            }
            plugin = plugin.with_system(Arc::new(layered));
        }

        for (feature, setting) in &self.strategies {
            let strategy = setting.build();

            // Not applicable features are never handed to a strategy
            if let Some(capability) = plugin.system().capability(feature) {
                let kind = strategy.kind();
                if kind.capability_kind() != capability.kind() {
                    return Err(ConfigError::StrategyMismatch {
                        namespace: namespace.to_string(),
                        feature: feature.clone(),
                        strategy: kind.as_str(),
                        expected: kind.capability_kind(),
                        found: capability.kind(),
                    });
                }
            }

            if !plugin.resolver_mut().set_strategy(feature, strategy) {
                warn!(
                    "Strategy override for undeclared feature '{} :: {}' ignored",
                    namespace, feature
                );
            }
        }

        Ok(plugin)
    }
}

/// Returns the path to the data directory for variant-provider.
/// Uses $XDG_DATA_HOME/variant-provider if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/variant-provider,
/// or ./variant-provider if neither is available.
pub fn data_dir() -> PathBuf {
    dir_with_env(
        std::env::var("XDG_DATA_HOME").ok(),
        dirs::home_dir(),
        ".local/share",
    )
}

/// Returns the path to the configuration directory for variant-provider.
/// Uses $XDG_CONFIG_HOME/variant-provider, falling back to ~/.config/variant-provider.
pub fn config_dir() -> PathBuf {
    dir_with_env(
        std::env::var("XDG_CONFIG_HOME").ok(),
        dirs::home_dir(),
        ".config",
    )
}

/// Returns the path to the default configuration file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

/// Returns the path to the default log file.
pub fn log_path() -> PathBuf {
    data_dir().join("variant-provider.log")
}

fn dir_with_env(xdg_dir: Option<String>, home_dir: Option<PathBuf>, home_subdir: &str) -> PathBuf {
    let base = xdg_dir
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(home_subdir)))
        .unwrap_or_else(|| PathBuf::from("."));

    base.join(APP_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::{create_default_plugins, fictional_hw, fictional_tech};
    use crate::variant::types::VariantProperty;
    use serde_json::json;

    #[test]
    fn provider_config_from_partial_object_uses_defaults_for_missing_fields() {
        let result = serde_json::from_value::<ProviderConfig>(json!({
            "log": { "level": "debug" }
        }))
        .unwrap();

        assert_eq!(result.log.level, "debug");
        assert!(!result.log.json);
        assert!(result.plugins.is_empty());
    }

    #[test]
    fn provider_config_from_full_object_parses_all_fields() {
        let result = serde_json::from_value::<ProviderConfig>(json!({
            "log": { "level": "info", "json": true, "file": "/tmp/vp.log" },
            "plugins": {
                "fictional_hw": {
                    "capabilities": {
                        "architecture": { "tokens": ["tars"] },
                        "compute_capability": { "version": "9.0" },
                        "compute_accuracy": { "threshold": 0.5 }
                    },
                    "strategies": {
                        "compute_capability": { "strategy": "versionRange", "order": "mostGeneralFirst" },
                        "compute_accuracy": { "strategy": "numericThreshold", "comparison": "atLeast" }
                    }
                },
                "fictional_tech": {
                    "enabled": false,
                    "capabilities": { "quantum": "notApplicable" }
                }
            }
        }))
        .unwrap();

        assert_eq!(
            result.log,
            LogConfig {
                level: "info".to_string(),
                json: true,
                file: Some(PathBuf::from("/tmp/vp.log")),
            }
        );

        let hw = &result.plugins["fictional_hw"];
        assert!(hw.enabled);
        assert_eq!(
            hw.capabilities["architecture"],
            CapabilitySetting::Tokens(vec!["tars".to_string()])
        );
        assert_eq!(
            hw.capabilities["compute_capability"],
            CapabilitySetting::Version("9.0".to_string())
        );
        assert_eq!(
            hw.capabilities["compute_accuracy"],
            CapabilitySetting::Threshold(0.5)
        );
        assert_eq!(
            hw.strategies["compute_capability"],
            StrategySetting::VersionRange {
                order: RangeOrder::MostGeneralFirst
            }
        );
        assert_eq!(
            hw.strategies["compute_accuracy"],
            StrategySetting::NumericThreshold {
                comparison: ThresholdComparison::AtLeast,
                order: NumericOrder::Descending,
            }
        );

        let tech = &result.plugins["fictional_tech"];
        assert!(!tech.enabled);
        assert_eq!(
            tech.capabilities["quantum"],
            CapabilitySetting::NotApplicable
        );
    }

    #[test]
    fn apply_drops_disabled_plugins() {
        let config = serde_json::from_value::<ProviderConfig>(json!({
            "plugins": { "fictional_tech": { "enabled": false } }
        }))
        .unwrap();

        let plugins = config.apply(create_default_plugins()).unwrap();

        assert!(plugins.contains_key(fictional_hw::NAMESPACE));
        assert!(!plugins.contains_key(fictional_tech::NAMESPACE));
    }

    #[test]
    fn apply_layers_capabilities_and_strategies() {
        let config = serde_json::from_value::<ProviderConfig>(json!({
            "plugins": {
                "fictional_hw": {
                    "capabilities": {
                        "architecture": "notApplicable",
                        "compute_capability": { "version": "9.1" }
                    },
                    "strategies": {
                        "compute_capability": { "strategy": "versionRange", "order": "mostGeneralFirst" }
                    }
                }
            }
        }))
        .unwrap();

        let plugins = config.apply(create_default_plugins()).unwrap();
        let plugin = &plugins[fictional_hw::NAMESPACE];
        let properties: Vec<VariantProperty> = [
            ("architecture", "hal9000"),
            ("compute_capability", ">=8"),
            ("compute_capability", ">=9,<10"),
            ("compute_capability", "<9"),
            ("compute_accuracy", "0.9"),
        ]
        .into_iter()
        .map(|(f, v)| VariantProperty::new(fictional_hw::NAMESPACE, f, v))
        .collect();

        let resolution = plugin.supported_configs(&properties).unwrap();

        assert_eq!(resolution.values("architecture"), None);
        assert_eq!(
            resolution.values("compute_capability"),
            Some(&[">=8".to_string(), ">=9,<10".to_string()][..])
        );
        assert_eq!(
            resolution.values("compute_accuracy"),
            Some(&["0.9".to_string()][..])
        );
    }

    #[test]
    fn apply_rejects_invalid_capability_version() {
        let config = serde_json::from_value::<ProviderConfig>(json!({
            "plugins": {
                "fictional_hw": {
                    "capabilities": { "compute_capability": { "version": "not a version" } }
                }
            }
        }))
        .unwrap();

        let err = config.apply(create_default_plugins()).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::Capability { ref feature, .. } if feature == "compute_capability"
        ));
    }

    #[test]
    fn apply_rejects_strategy_that_does_not_fit_capability() {
        let config = serde_json::from_value::<ProviderConfig>(json!({
            "plugins": {
                "fictional_hw": {
                    "strategies": { "architecture": { "strategy": "versionRange" } }
                }
            }
        }))
        .unwrap();

        let err = config.apply(create_default_plugins()).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::StrategyMismatch {
                ref feature,
                strategy: "version_range",
                expected: "version",
                found: "tokens",
                ..
            } if feature == "architecture"
        ));
    }

    #[test]
    fn apply_checks_strategy_against_overridden_capability() {
        let config = serde_json::from_value::<ProviderConfig>(json!({
            "plugins": {
                "fictional_hw": {
                    "capabilities": {
                        "architecture": { "version": "9.1" },
                        "compute_accuracy": "notApplicable"
                    },
                    "strategies": {
                        "architecture": { "strategy": "versionRange" },
                        "compute_accuracy": { "strategy": "fixedPriority" }
                    }
                }
            }
        }))
        .unwrap();

        let plugins = config.apply(create_default_plugins()).unwrap();
        let properties = vec![
            VariantProperty::new(fictional_hw::NAMESPACE, "architecture", ">=9"),
            VariantProperty::new(fictional_hw::NAMESPACE, "architecture", "<9"),
        ];

        let resolution = plugins[fictional_hw::NAMESPACE]
            .supported_configs(&properties)
            .unwrap();

        assert_eq!(
            resolution.values("architecture"),
            Some(&[">=9".to_string()][..])
        );
    }

    #[test]
    fn dir_with_env_uses_xdg_dir_when_set() {
        let path = dir_with_env(
            Some("/tmp/test-data".to_string()),
            Some(PathBuf::from("/home/user")),
            ".local/share",
        );

        assert_eq!(path, PathBuf::from("/tmp/test-data/variant-provider"));
    }

    #[test]
    fn dir_with_env_falls_back_to_home_subdir() {
        let path = dir_with_env(None, Some(PathBuf::from("/home/user")), ".config");

        assert_eq!(path, PathBuf::from("/home/user/.config/variant-provider"));
    }

    #[test]
    fn dir_with_env_falls_back_to_current_dir_when_no_dirs_available() {
        let path = dir_with_env(None, None, ".local/share");
        assert_eq!(path, PathBuf::from("./variant-provider"));
    }
}
