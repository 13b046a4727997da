//! Fixed-priority strategy
//!
//! The system reports its supported tokens in preference order; requested
//! values are kept in that order, everything else is dropped.

use indexmap::IndexSet;
use tracing::debug;

use crate::variant::capability::SystemCapability;
use crate::variant::error::ResolveError;
use crate::variant::strategy::{ResolutionStrategy, Selection, StrategyKind, capability_mismatch};

pub struct FixedPriorityStrategy;

impl ResolutionStrategy for FixedPriorityStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::FixedPriority
    }

    fn select(
        &self,
        feature: &str,
        values: &[&str],
        capability: &SystemCapability,
    ) -> Result<Selection, ResolveError> {
        let SystemCapability::Tokens(supported) = capability else {
            return Err(capability_mismatch(feature, self.kind(), capability));
        };

        let requested: IndexSet<&str> = values.iter().copied().collect();

        // Duplicate tokens in the system list are emitted once
        let selected: IndexSet<&str> = supported
            .iter()
            .map(String::as_str)
            .filter(|token| requested.contains(token))
            .collect();

        for value in requested.iter().filter(|v| !selected.contains(*v)) {
            debug!("'{}' is not supported for feature '{}'", value, feature);
        }

        Ok(Selection::new(
            selected.into_iter().map(str::to_string).collect(),
        ))
    }
}
