//! Variant provider plugins
//!
//! A plugin groups the components needed to answer for one namespace:
//! - A feature resolver declaring features, catalogs and strategies
//! - A capability provider probing what this system supports

pub mod fictional_hw;
pub mod fictional_tech;

use std::sync::Arc;

use indexmap::IndexMap;

use crate::variant::capability::CapabilityProvider;
use crate::variant::error::ResolveError;
use crate::variant::resolver::FeatureResolver;
use crate::variant::types::{FeatureConfig, Resolution, VariantPropertyType};

/// A variant provider for a single namespace
pub struct VariantPlugin {
    resolver: FeatureResolver,
    system: Arc<dyn CapabilityProvider>,
    build_plugin: bool,
}

impl VariantPlugin {
    /// Create a new plugin from its resolver and system probe
    pub fn new(resolver: FeatureResolver, system: Arc<dyn CapabilityProvider>) -> Self {
        Self {
            resolver,
            system,
            build_plugin: false,
        }
    }

    /// Replace the system probe, e.g. with configured overrides
    pub fn with_system(mut self, system: Arc<dyn CapabilityProvider>) -> Self {
        self.system = system;
        self
    }

    pub fn namespace(&self) -> &str {
        self.resolver.namespace()
    }

    /// Whether the plugin contributes build variables
    pub fn is_build_plugin(&self) -> bool {
        self.build_plugin
    }

    pub fn resolver(&self) -> &FeatureResolver {
        &self.resolver
    }

    pub fn resolver_mut(&mut self) -> &mut FeatureResolver {
        &mut self.resolver
    }

    pub fn system(&self) -> &Arc<dyn CapabilityProvider> {
        &self.system
    }

    /// All features and values this plugin can emit, independent of the system
    pub fn catalog(&self) -> Vec<FeatureConfig> {
        self.resolver.catalog()
    }

    /// Resolve requested properties against this plugin's own system probe
    pub fn supported_configs<'a, P, I>(&self, properties: I) -> Result<Resolution, ResolveError>
    where
        P: VariantPropertyType + ?Sized + 'a,
        I: IntoIterator<Item = &'a P>,
    {
        self.resolver.resolve(properties, self.system.as_ref())
    }

    /// Resolve requested properties against an explicit capability provider
    pub fn resolve_with<'a, P, I>(
        &self,
        properties: I,
        capabilities: &dyn CapabilityProvider,
    ) -> Result<Resolution, ResolveError>
    where
        P: VariantPropertyType + ?Sized + 'a,
        I: IntoIterator<Item = &'a P>,
    {
        self.resolver.resolve(properties, capabilities)
    }

    /// Build variables for a variant made of the given properties
    ///
    /// Neither sample plugin sets any variables; properties are still checked
    /// against the namespace.
    pub fn build_setup<'a, P, I>(
        &self,
        properties: I,
    ) -> Result<IndexMap<String, Vec<String>>, ResolveError>
    where
        P: VariantPropertyType + ?Sized + 'a,
        I: IntoIterator<Item = &'a P>,
    {
        self.resolver.check_namespace(properties)?;
        Ok(IndexMap::new())
    }
}

impl std::fmt::Debug for VariantPlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let features: Vec<&str> = self
            .resolver
            .features()
            .iter()
            .map(|f| f.name())
            .collect();
        f.debug_struct("VariantPlugin")
            .field("namespace", &self.namespace())
            .field("features", &features)
            .field("build_plugin", &self.build_plugin)
            .finish_non_exhaustive()
    }
}

/// Create the default set of plugins, keyed by namespace
pub fn create_default_plugins() -> IndexMap<String, VariantPlugin> {
    [fictional_hw::plugin(), fictional_tech::plugin()]
        .into_iter()
        .map(|plugin| (plugin.namespace().to_string(), plugin))
        .collect()
}
