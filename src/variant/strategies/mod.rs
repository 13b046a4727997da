//! Feature selection strategies

pub mod fixed;
pub mod threshold;
pub mod version_range;

pub use fixed::FixedPriorityStrategy;
pub use threshold::{NumericOrder, NumericThresholdStrategy, ThresholdComparison};
pub use version_range::{RangeOrder, VersionRangeStrategy};
