//! Per-namespace feature resolution
//!
//! Groups requested properties by feature and runs each declared feature,
//! in the plugin's priority order, through its registered strategy.

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use crate::variant::capability::CapabilityProvider;
use crate::variant::error::ResolveError;
use crate::variant::strategy::ResolutionStrategy;
use crate::variant::types::{FeatureConfig, Resolution, VariantProperty, VariantPropertyType};

/// A declared feature: its catalog values and the strategy that ranks requests
pub struct FeatureSpec {
    name: String,
    catalog: Vec<String>,
    strategy: Arc<dyn ResolutionStrategy>,
}

impl FeatureSpec {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn strategy(&self) -> &Arc<dyn ResolutionStrategy> {
        &self.strategy
    }
}

/// Resolves requested properties for a single namespace
///
/// Features are declared in priority order (first = highest priority); that
/// order, not the request order, determines the order of the result.
pub struct FeatureResolver {
    namespace: String,
    features: Vec<FeatureSpec>,
}

impl FeatureResolver {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            features: Vec::new(),
        }
    }

    /// Declare the next feature in priority order
    pub fn feature<I, S>(
        mut self,
        name: impl Into<String>,
        catalog: I,
        strategy: Arc<dyn ResolutionStrategy>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features.push(FeatureSpec {
            name: name.into(),
            catalog: catalog.into_iter().map(Into::into).collect(),
            strategy,
        });
        self
    }

    /// Swap the strategy of a declared feature, keeping its priority
    ///
    /// Returns false if the feature is not declared.
    pub fn set_strategy(&mut self, feature: &str, strategy: Arc<dyn ResolutionStrategy>) -> bool {
        match self.features.iter_mut().find(|f| f.name == feature) {
            Some(spec) => {
                spec.strategy = strategy;
                true
            }
            None => false,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn features(&self) -> &[FeatureSpec] {
        &self.features
    }

    /// Every feature and value this resolver can ever emit
    pub fn catalog(&self) -> Vec<FeatureConfig> {
        self.features
            .iter()
            .map(|f| FeatureConfig::new(f.name.clone(), f.catalog.iter().cloned()))
            .collect()
    }

    /// Reject properties that do not belong to this namespace, listing all of them
    pub fn check_namespace<'a, P, I>(&self, properties: I) -> Result<(), ResolveError>
    where
        P: VariantPropertyType + ?Sized + 'a,
        I: IntoIterator<Item = &'a P>,
    {
        let offending: Vec<VariantProperty> = properties
            .into_iter()
            .filter(|p| p.namespace() != self.namespace)
            .map(VariantProperty::from_property)
            .collect();

        if offending.is_empty() {
            Ok(())
        } else {
            Err(ResolveError::NamespaceMismatch {
                namespace: self.namespace.clone(),
                offending,
            })
        }
    }

    /// Filter and rank requested properties against the system's capabilities
    ///
    /// Features without requested values, without an applicable capability,
    /// or without surviving values are left out of the result.
    pub fn resolve<'a, P, I>(
        &self,
        properties: I,
        capabilities: &dyn CapabilityProvider,
    ) -> Result<Resolution, ResolveError>
    where
        P: VariantPropertyType + ?Sized + 'a,
        I: IntoIterator<Item = &'a P>,
    {
        let properties: Vec<&P> = properties.into_iter().collect();
        self.check_namespace(properties.iter().copied())?;

        let mut requested: IndexMap<&str, Vec<&str>> = IndexMap::new();
        for property in &properties {
            requested
                .entry(property.feature())
                .or_default()
                .push(property.value());
        }

        for feature in requested.keys() {
            if !self.features.iter().any(|f| f.name == *feature) {
                debug!(
                    "Ignoring undeclared feature '{}' in namespace '{}'",
                    feature, self.namespace
                );
            }
        }

        let mut resolution = Resolution::default();

        for spec in &self.features {
            let Some(values) = requested.get(spec.name.as_str()) else {
                continue;
            };

            let Some(capability) = capabilities.capability(&spec.name) else {
                debug!("Feature '{}' is not applicable on this system", spec.name);
                continue;
            };

            let selection = spec.strategy.select(&spec.name, values, &capability)?;
            resolution.diagnostics.extend(selection.diagnostics);

            if selection.values.is_empty() {
                debug!(
                    "No supported values for feature '{}' ({})",
                    spec.name,
                    spec.strategy.kind().as_str()
                );
                continue;
            }

            resolution
                .configs
                .push(FeatureConfig::new(spec.name.clone(), selection.values));
        }

        Ok(resolution)
    }
}
