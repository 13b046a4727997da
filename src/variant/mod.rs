//! Variant resolution layer for provider plugins
//!
//! This module filters the variant properties requested by a build against what
//! the current system supports, and ranks the surviving values per feature.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Properties │────▶│   Resolver  │◀────│ Capability  │
//! │  (request)  │     │ (per feature│     │  Provider   │
//! └─────────────┘     │  pipeline)  │     └─────────────┘
//!                     └─────────────┘
//!                            │
//!                            ▼
//!                     ┌─────────────┐     ┌─────────────┐
//!                     │  Strategies │────▶│ Range sort  │
//!                     │(fixed,range,│     │ (generality)│
//!                     │ threshold)  │     └─────────────┘
//!                     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`types`]: Variant properties, feature configs and resolution results
//! - [`error`]: Fatal resolve errors and recoverable per-value diagnostics
//! - [`range`]: PEP 440 version ranges with bound extraction
//! - [`sort`]: Ordering of version ranges by generality
//! - [`capability`]: System capability oracle trait and static implementations
//! - [`strategy`]: Strategy trait for filtering and ordering one feature
//! - [`strategies`]: Fixed-priority, version-range and numeric-threshold strategies
//! - [`resolver`]: Per-namespace feature resolver

pub mod capability;
pub mod error;
pub mod range;
pub mod resolver;
pub mod sort;
pub mod strategies;
pub mod strategy;
pub mod types;
