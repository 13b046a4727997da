//! Fictional hardware provider (`fictional_hw`)
//!
//! Features, highest priority first:
//! - `architecture`: fixed priority, e.g. `hal9000`
//! - `compute_capability`: version ranges against the device version, e.g. `>=8,<9`
//! - `compute_accuracy`: numeric values that must not exceed the device accuracy

use std::sync::Arc;

use tracing::warn;

use crate::plugins::VariantPlugin;
use crate::variant::capability::{StaticCapabilities, SystemCapability};
use crate::variant::resolver::FeatureResolver;
use crate::variant::strategies::{
    FixedPriorityStrategy, NumericThresholdStrategy, VersionRangeStrategy,
};
use crate::variant::types::VariantProperty;

pub const NAMESPACE: &str = "fictional_hw";

pub const ARCHITECTURE: &str = "architecture";
pub const COMPUTE_CAPABILITY: &str = "compute_capability";
pub const COMPUTE_ACCURACY: &str = "compute_accuracy";

/// Architectures supported by the device, in priority order
const SUPPORTED_ARCHITECTURES: [&str; 2] = ["deepthought", "hal9000"];
const DEVICE_COMPUTE_CAPABILITY: &str = "8.3.2";
const DEVICE_COMPUTE_ACCURACY: f64 = 0.995;

pub fn resolver() -> FeatureResolver {
    let even_steps = || (0..=10).step_by(2).map(|n| n.to_string());

    FeatureResolver::new(NAMESPACE)
        .feature(
            ARCHITECTURE,
            ["deepthought", "hal9000", "mother", "tars"],
            Arc::new(FixedPriorityStrategy),
        )
        .feature(
            COMPUTE_CAPABILITY,
            even_steps(),
            Arc::new(VersionRangeStrategy::default()),
        )
        .feature(
            COMPUTE_ACCURACY,
            even_steps(),
            Arc::new(NumericThresholdStrategy::default()),
        )
}

/// Capabilities of the fictional device this plugin probes
pub fn system() -> StaticCapabilities {
    let mut system = StaticCapabilities::new()
        .with(ARCHITECTURE, SystemCapability::tokens(SUPPORTED_ARCHITECTURES))
        .with(COMPUTE_ACCURACY, SystemCapability::Threshold(DEVICE_COMPUTE_ACCURACY));

    match SystemCapability::version(DEVICE_COMPUTE_CAPABILITY) {
        Ok(version) => system.insert(COMPUTE_CAPABILITY, version),
        Err(e) => warn!("Device compute capability unavailable: {}", e),
    }
    system
}

pub fn plugin() -> VariantPlugin {
    VariantPlugin::new(resolver(), Arc::new(system()))
}

/// Sample request mixing values the device supports with ones it does not
pub fn demo_properties() -> Vec<VariantProperty> {
    [
        // Supported
        (ARCHITECTURE, "hal9000"),
        (ARCHITECTURE, "deepthought"),
        (COMPUTE_CAPABILITY, ">=8"),
        (COMPUTE_CAPABILITY, "<9"),
        (COMPUTE_CAPABILITY, ">=5.0,<10.0"),
        (COMPUTE_ACCURACY, "0.7"),
        (COMPUTE_ACCURACY, "0.99"),
        (COMPUTE_ACCURACY, "0.8"),
        // Unsupported
        (ARCHITECTURE, "jarvis"),
        (ARCHITECTURE, "tar"),
        (COMPUTE_CAPABILITY, ">=9"),
        (COMPUTE_CAPABILITY, "<8"),
        (COMPUTE_CAPABILITY, ">=8,<9,!=8.3.2"),
        (COMPUTE_CAPABILITY, "9_0"),
        (COMPUTE_ACCURACY, "0.9999"),
    ]
    .into_iter()
    .map(|(feature, value)| VariantProperty::new(NAMESPACE, feature, value))
    .collect()
}
