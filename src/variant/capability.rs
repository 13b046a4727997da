//! System capability oracle consulted per feature

use indexmap::IndexMap;
#[cfg(test)]
use mockall::automock;
use pep508_rs::pep440_rs::Version;

use crate::variant::error::RangeParseError;
use crate::variant::range::parse_version;

/// What the current system supports for one feature
#[derive(Debug, Clone, PartialEq)]
pub enum SystemCapability {
    /// Supported tokens in the system's preference order
    Tokens(Vec<String>),
    /// A single concrete version
    Version(Version),
    /// A numeric value requested thresholds are compared against
    Threshold(f64),
}

impl SystemCapability {
    pub fn tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SystemCapability::Tokens(tokens.into_iter().map(Into::into).collect())
    }

    pub fn version(version: &str) -> Result<Self, RangeParseError> {
        parse_version(version).map(SystemCapability::Version)
    }

    /// Name of the capability shape, used in mismatch errors
    pub fn kind(&self) -> &'static str {
        match self {
            SystemCapability::Tokens(_) => "tokens",
            SystemCapability::Version(_) => "version",
            SystemCapability::Threshold(_) => "threshold",
        }
    }
}

/// Trait for looking up system capabilities
///
/// Returns `None` when the feature does not apply to this system; the feature
/// is then left out of the resolution entirely.
#[cfg_attr(test, automock)]
pub trait CapabilityProvider: Send + Sync {
    fn capability(&self, feature: &str) -> Option<SystemCapability>;
}

/// Fixed capability table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticCapabilities {
    entries: IndexMap<String, SystemCapability>,
}

impl StaticCapabilities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, feature: impl Into<String>, capability: SystemCapability) -> Self {
        self.insert(feature, capability);
        self
    }

    pub fn insert(&mut self, feature: impl Into<String>, capability: SystemCapability) {
        self.entries.insert(feature.into(), capability);
    }
}

impl CapabilityProvider for StaticCapabilities {
    fn capability(&self, feature: &str) -> Option<SystemCapability> {
        self.entries.get(feature).cloned()
    }
}

/// Overrides consulted before a fallback provider
///
/// An override of `None` marks the feature as not applicable even if the
/// fallback knows about it.
pub struct LayeredCapabilities<P> {
    overrides: IndexMap<String, Option<SystemCapability>>,
    fallback: P,
}

impl<P: CapabilityProvider> LayeredCapabilities<P> {
    pub fn new(fallback: P) -> Self {
        Self {
            overrides: IndexMap::new(),
            fallback,
        }
    }

    pub fn with_override(
        mut self,
        feature: impl Into<String>,
        capability: Option<SystemCapability>,
    ) -> Self {
        self.overrides.insert(feature.into(), capability);
        self
    }
}

impl<P: CapabilityProvider> CapabilityProvider for LayeredCapabilities<P> {
    fn capability(&self, feature: &str) -> Option<SystemCapability> {
        match self.overrides.get(feature) {
            Some(capability) => capability.clone(),
            None => self.fallback.capability(feature),
        }
    }
}

impl<P: CapabilityProvider + ?Sized> CapabilityProvider for std::sync::Arc<P> {
    fn capability(&self, feature: &str) -> Option<SystemCapability> {
        (**self).capability(feature)
    }
}
