//! Common types for variant resolution

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::variant::error::{Diagnostic, PropertyParseError};

static PROPERTY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([a-z0-9_]+)\s*::\s*([a-z0-9_]+)\s*::\s*(\S(?:.*\S)?)\s*$").unwrap()
});

/// Read access to a `(namespace, feature, value)` triple
///
/// Any record exposing these three accessors can be handed to a resolver.
pub trait VariantPropertyType {
    /// Namespace of the plugin the property belongs to
    fn namespace(&self) -> &str;

    /// Feature name within the namespace
    fn feature(&self) -> &str;

    /// Requested feature value
    fn value(&self) -> &str;
}

/// A single requested variant property
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VariantProperty {
    pub namespace: String,
    pub feature: String,
    pub value: String,
}

impl VariantProperty {
    pub fn new(
        namespace: impl Into<String>,
        feature: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            feature: feature.into(),
            value: value.into(),
        }
    }

    /// Copy any property-like value into an owned record
    pub fn from_property<P: VariantPropertyType + ?Sized>(property: &P) -> Self {
        Self::new(property.namespace(), property.feature(), property.value())
    }
}

impl VariantPropertyType for VariantProperty {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn feature(&self) -> &str {
        &self.feature
    }

    fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for VariantProperty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} :: {} :: {}", self.namespace, self.feature, self.value)
    }
}

impl FromStr for VariantProperty {
    type Err = PropertyParseError;

    /// Parse the `namespace :: feature :: value` form
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = PROPERTY_RE
            .captures(s)
            .ok_or_else(|| PropertyParseError(s.to_string()))?;
        Ok(Self::new(&caps[1], &caps[2], &caps[3]))
    }
}

/// A feature and its values in priority order (first = most preferred)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureConfig {
    pub name: String,
    pub values: Vec<String>,
}

impl FeatureConfig {
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// Outcome of resolving one namespace's requested properties
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Resolution {
    /// Supported features in the plugin's priority order, values ranked
    pub configs: Vec<FeatureConfig>,
    /// Values dropped because they could not be parsed
    pub diagnostics: Vec<Diagnostic>,
}

impl Resolution {
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    /// Ranked values for a feature, if it survived resolution
    pub fn values(&self, feature: &str) -> Option<&[String]> {
        self.configs
            .iter()
            .find(|c| c.name == feature)
            .map(|c| c.values.as_slice())
    }
}
