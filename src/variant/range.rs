//! Version ranges built on PEP 440 version specifiers
//!
//! A range is a conjunction of comparisons such as `>=8.3,<9`. Parsing keeps
//! the caller's original text so ranked output reports values verbatim.

use std::cmp::Ordering;
use std::str::FromStr;

use pep508_rs::pep440_rs::{Operator, Version, VersionSpecifiers};

use crate::variant::error::RangeParseError;

/// Which side of a range to extract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundKind {
    Lower,
    Upper,
}

/// A range bound; the infinities order below and above every version
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum BoundValue {
    NegativeInfinity,
    Finite(Version),
    Infinity,
}

/// A parsed version range together with its original text
#[derive(Debug, Clone)]
pub struct VersionRange {
    text: String,
    specifiers: VersionSpecifiers,
}

impl VersionRange {
    pub fn parse(text: &str) -> Result<Self, RangeParseError> {
        if text.trim().is_empty() {
            return Err(RangeParseError::Empty);
        }

        let specifiers =
            VersionSpecifiers::from_str(text).map_err(|e| RangeParseError::InvalidRange {
                text: text.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            text: text.to_string(),
            specifiers,
        })
    }

    /// The text this range was parsed from
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// True if every comparison in the conjunction holds for `version`
    pub fn contains(&self, version: &Version) -> bool {
        self.specifiers.contains(version)
    }

    /// Greatest lower bound (`Lower`) or least upper bound (`Upper`)
    ///
    /// The lower bound is the smallest version among `>`, `>=`, `~=`, `==`
    /// and `===` comparisons; the upper bound is the largest among `<`, `<=`
    /// and `==`. Without such comparisons the bound is infinite.
    pub fn bound(&self, kind: BoundKind) -> BoundValue {
        let versions = self
            .specifiers
            .iter()
            .filter(|s| bounds_side(s.operator(), kind))
            .map(|s| s.version());

        let bound = match kind {
            BoundKind::Lower => versions.min(),
            BoundKind::Upper => versions.max(),
        };

        match (bound, kind) {
            (Some(version), _) => BoundValue::Finite(version.clone()),
            (None, BoundKind::Lower) => BoundValue::NegativeInfinity,
            (None, BoundKind::Upper) => BoundValue::Infinity,
        }
    }

    pub fn lower_bound(&self) -> BoundValue {
        self.bound(BoundKind::Lower)
    }

    pub fn upper_bound(&self) -> BoundValue {
        self.bound(BoundKind::Upper)
    }
}

impl PartialEq for VersionRange {
    fn eq(&self, other: &Self) -> bool {
        self.specifiers == other.specifiers
    }
}

impl FromStr for VersionRange {
    type Err = RangeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for VersionRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

fn bounds_side(operator: &Operator, kind: BoundKind) -> bool {
    match kind {
        BoundKind::Lower => matches!(
            operator,
            Operator::GreaterThan
                | Operator::GreaterThanEqual
                | Operator::TildeEqual
                | Operator::Equal
                | Operator::EqualStar
                | Operator::ExactEqual
        ),
        BoundKind::Upper => matches!(
            operator,
            Operator::LessThan | Operator::LessThanEqual | Operator::Equal | Operator::EqualStar
        ),
    }
}

/// Parse a concrete version
pub fn parse_version(text: &str) -> Result<Version, RangeParseError> {
    Version::from_str(text.trim()).map_err(|e| RangeParseError::InvalidVersion {
        text: text.to_string(),
        message: e.to_string(),
    })
}

/// Compare two versions component-wise; missing trailing components are zero
pub fn compare_versions(a: &str, b: &str) -> Result<Ordering, RangeParseError> {
    Ok(parse_version(a)?.cmp(&parse_version(b)?))
}
