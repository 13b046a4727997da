//! Filtering and ordering abstraction for a single feature

use crate::variant::capability::SystemCapability;
use crate::variant::error::{Diagnostic, ResolveError};

/// Kind of ordering a strategy applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    /// Values ranked by their position in the system's token list
    FixedPriority,
    /// Values are version ranges ranked by generality
    VersionRange,
    /// Values are numbers compared against a system threshold
    NumericThreshold,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::FixedPriority => "fixed_priority",
            StrategyKind::VersionRange => "version_range",
            StrategyKind::NumericThreshold => "numeric_threshold",
        }
    }

    /// Shape of [`SystemCapability`] this kind of strategy compares against
    pub fn capability_kind(&self) -> &'static str {
        match self {
            StrategyKind::FixedPriority => "tokens",
            StrategyKind::VersionRange => "version",
            StrategyKind::NumericThreshold => "threshold",
        }
    }
}

/// Values that survived a strategy, plus diagnostics for the ones it could not parse
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub values: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Selection {
    pub fn new(values: Vec<String>) -> Self {
        Self {
            values,
            diagnostics: Vec::new(),
        }
    }
}

/// Trait for feature-specific selection logic
///
/// Each strategy expects a particular capability shape:
/// - Fixed priority: a token list, output follows the system's order
/// - Version range: a concrete version, output ordered by range generality
/// - Numeric threshold: a number, output ordered numerically
pub trait ResolutionStrategy: Send + Sync {
    /// Returns the kind of ordering this strategy applies
    fn kind(&self) -> StrategyKind;

    /// Filter `values` requested for `feature` against `capability` and rank them
    ///
    /// Unparsable values are dropped with a diagnostic. A capability of the
    /// wrong shape is a plugin defect and fails with
    /// [`ResolveError::CapabilityMismatch`].
    fn select(
        &self,
        feature: &str,
        values: &[&str],
        capability: &SystemCapability,
    ) -> Result<Selection, ResolveError>;
}

pub(crate) fn capability_mismatch(
    feature: &str,
    strategy: StrategyKind,
    found: &SystemCapability,
) -> ResolveError {
    ResolveError::CapabilityMismatch {
        feature: feature.to_string(),
        expected: strategy.capability_kind(),
        found: found.kind(),
    }
}
