//! Fictional technology provider (`fictional_tech`)

use std::sync::Arc;

use crate::plugins::VariantPlugin;
use crate::variant::capability::{StaticCapabilities, SystemCapability};
use crate::variant::resolver::FeatureResolver;
use crate::variant::strategies::FixedPriorityStrategy;

pub const NAMESPACE: &str = "fictional_tech";

pub const TECHNOLOGY: &str = "technology";
pub const QUANTUM: &str = "quantum";
pub const RISK_EXPOSURE: &str = "risk_exposure";

pub fn resolver() -> FeatureResolver {
    FeatureResolver::new(NAMESPACE)
        .feature(
            TECHNOLOGY,
            ["auto_chef", "improb_drive"],
            Arc::new(FixedPriorityStrategy),
        )
        .feature(
            QUANTUM,
            ["foam", "superposition"],
            Arc::new(FixedPriorityStrategy),
        )
        .feature(
            RISK_EXPOSURE,
            ["25", "1000000000"],
            Arc::new(FixedPriorityStrategy),
        )
}

pub fn system() -> StaticCapabilities {
    StaticCapabilities::new()
        .with(TECHNOLOGY, SystemCapability::tokens(["auto_chef"]))
        .with(QUANTUM, SystemCapability::tokens(["foam", "superposition"]))
        .with(RISK_EXPOSURE, SystemCapability::tokens(["25"]))
}

pub fn plugin() -> VariantPlugin {
    VariantPlugin::new(resolver(), Arc::new(system()))
}
