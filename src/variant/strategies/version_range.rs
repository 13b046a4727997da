//! Version-range strategy
//!
//! Requested values are version ranges (e.g. `>=8,<9`). Ranges containing the
//! system version survive and are ordered by generality:
//! - `MostSpecificFirst`: `>=8,<9` before `>=8` before `>=5`
//! - `MostGeneralFirst`: the reverse, preferring forward compatibility

use serde::Deserialize;
use tracing::{debug, warn};

use crate::variant::capability::SystemCapability;
use crate::variant::error::{Diagnostic, ResolveError, ValueParseError};
use crate::variant::range::VersionRange;
use crate::variant::sort::sort_by_generality;
use crate::variant::strategy::{ResolutionStrategy, Selection, StrategyKind, capability_mismatch};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RangeOrder {
    #[default]
    MostSpecificFirst,
    MostGeneralFirst,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct VersionRangeStrategy {
    order: RangeOrder,
}

impl VersionRangeStrategy {
    pub fn new(order: RangeOrder) -> Self {
        Self { order }
    }

    pub fn order(&self) -> RangeOrder {
        self.order
    }
}

impl ResolutionStrategy for VersionRangeStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::VersionRange
    }

    fn select(
        &self,
        feature: &str,
        values: &[&str],
        capability: &SystemCapability,
    ) -> Result<Selection, ResolveError> {
        let SystemCapability::Version(system_version) = capability else {
            return Err(capability_mismatch(feature, self.kind(), capability));
        };

        let mut diagnostics = Vec::new();
        let mut ranges = Vec::with_capacity(values.len());

        for value in values {
            let Ok(range) = VersionRange::parse(value).inspect_err(|e| {
                warn!(
                    "Dropping value '{}' for feature '{}': {}",
                    value, feature, e
                );
                diagnostics.push(Diagnostic::new(
                    feature,
                    value,
                    ValueParseError::from(e.clone()),
                ));
            }) else {
                continue;
            };

            if range.contains(system_version) {
                ranges.push(range);
            } else {
                debug!(
                    "'{}' does not contain {} for feature '{}'",
                    value, system_version, feature
                );
            }
        }

        sort_by_generality(&mut ranges);
        if self.order == RangeOrder::MostSpecificFirst {
            ranges.reverse();
        }

        Ok(Selection {
            values: ranges.iter().map(|r| r.as_str().to_string()).collect(),
            diagnostics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn system_version() -> SystemCapability {
        SystemCapability::version("8.3.2").unwrap()
    }

    #[rstest]
    #[case(RangeOrder::MostSpecificFirst, &[">=8", "<9", ">=5.0,<10.0"], &[">=8", ">=5.0,<10.0", "<9"])]
    #[case(RangeOrder::MostGeneralFirst, &[">=8", "<9", ">=5.0,<10.0"], &["<9", ">=5.0,<10.0", ">=8"])]
    #[case(RangeOrder::MostSpecificFirst, &[">=9", "<8", ">=8,<9,!=8.3.2"], &[])]
    #[case(
        RangeOrder::MostSpecificFirst,
        &[">=9", ">=8", "<8", "<9", ">=8,<9,!=8.3.2", ">=5.0,<10.0"],
        &[">=8", ">=5.0,<10.0", "<9"]
    )]
    #[case(RangeOrder::MostSpecificFirst, &["==8.3.2", "~=8.3", ">=8,<9"], &["==8.3.2", "~=8.3", ">=8,<9"])]
    fn select_filters_and_orders_ranges(
        #[case] order: RangeOrder,
        #[case] requested: &[&str],
        #[case] expected: &[&str],
    ) {
        let selection = VersionRangeStrategy::new(order)
            .select("compute_capability", requested, &system_version())
            .unwrap();

        assert_eq!(selection.values, expected);
        assert!(selection.diagnostics.is_empty());
    }

    #[test]
    fn select_drops_unparsable_values_with_diagnostics() {
        let selection = VersionRangeStrategy::default()
            .select("compute_capability", &["9_0", ">=8", "bogus"], &system_version())
            .unwrap();

        assert_eq!(selection.values, [">=8"]);
        assert_eq!(selection.diagnostics.len(), 2);
        assert_eq!(selection.diagnostics[0].value, "9_0");
        assert_eq!(selection.diagnostics[1].value, "bogus");
        assert!(selection.diagnostics.iter().all(|d| {
            d.feature == "compute_capability"
                && matches!(d.error, ValueParseError::InvalidVersionRange(_))
        }));
    }

    #[test]
    fn select_rejects_non_version_capability() {
        let result = VersionRangeStrategy::default().select(
            "compute_capability",
            &[">=8"],
            &SystemCapability::tokens(["8.3.2"]),
        );

        assert!(matches!(
            result,
            Err(ResolveError::CapabilityMismatch {
                expected: "version",
                found: "tokens",
                ..
            })
        ));
    }

    #[test]
    fn default_order_is_most_specific_first() {
        assert_eq!(
            VersionRangeStrategy::default().order(),
            RangeOrder::MostSpecificFirst
        );
    }
}
