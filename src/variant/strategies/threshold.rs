//! Numeric-threshold strategy
//!
//! Requested values are plain numbers compared against a system threshold,
//! evaluated as `requested <op> system`. With the default `AtMost` comparison
//! and descending order, the most demanding satisfiable value comes first.

use std::str::FromStr;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::variant::capability::SystemCapability;
use crate::variant::error::{Diagnostic, ResolveError, ValueParseError};
use crate::variant::strategy::{ResolutionStrategy, Selection, StrategyKind, capability_mismatch};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ThresholdComparison {
    /// `requested <= system`
    #[default]
    AtMost,
    /// `requested >= system`
    AtLeast,
    /// `requested < system`
    Below,
    /// `requested > system`
    Above,
}

impl ThresholdComparison {
    pub fn holds(&self, requested: f64, system: f64) -> bool {
        match self {
            ThresholdComparison::AtMost => requested <= system,
            ThresholdComparison::AtLeast => requested >= system,
            ThresholdComparison::Below => requested < system,
            ThresholdComparison::Above => requested > system,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NumericOrder {
    #[default]
    Descending,
    Ascending,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NumericThresholdStrategy {
    comparison: ThresholdComparison,
    order: NumericOrder,
}

impl NumericThresholdStrategy {
    pub fn new(comparison: ThresholdComparison, order: NumericOrder) -> Self {
        Self { comparison, order }
    }

    pub fn comparison(&self) -> ThresholdComparison {
        self.comparison
    }

    pub fn order(&self) -> NumericOrder {
        self.order
    }
}

impl ResolutionStrategy for NumericThresholdStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::NumericThreshold
    }

    fn select(
        &self,
        feature: &str,
        values: &[&str],
        capability: &SystemCapability,
    ) -> Result<Selection, ResolveError> {
        let SystemCapability::Threshold(system) = *capability else {
            return Err(capability_mismatch(feature, self.kind(), capability));
        };

        let mut diagnostics = Vec::new();
        let mut numbers: Vec<(f64, &str)> = Vec::with_capacity(values.len());

        for value in values {
            let Ok(number) = parse_number(value).inspect_err(|e| {
                warn!(
                    "Dropping value '{}' for feature '{}': {}",
                    value, feature, e
                );
                diagnostics.push(Diagnostic::new(feature, value, e.clone()));
            }) else {
                continue;
            };

            if self.comparison.holds(number, system) {
                numbers.push((number, *value));
            } else {
                debug!(
                    "'{}' does not satisfy threshold {} for feature '{}'",
                    value, system, feature
                );
            }
        }

        match self.order {
            NumericOrder::Descending => numbers.sort_by(|(a, _), (b, _)| b.total_cmp(a)),
            NumericOrder::Ascending => numbers.sort_by(|(a, _), (b, _)| a.total_cmp(b)),
        }

        Ok(Selection {
            values: numbers
                .into_iter()
                .map(|(_, value)| value.to_string())
                .collect(),
            diagnostics,
        })
    }
}

/// Parse a finite decimal number; `nan` and `inf` are rejected
fn parse_number(value: &str) -> Result<f64, ValueParseError> {
    f64::from_str(value.trim())
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| ValueParseError::InvalidNumber(value.to_string()))
}
