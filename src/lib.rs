//! Variant provider plugins
//!
//! Reports which requested variant properties (`namespace :: feature :: value`)
//! the current system supports, ranked from most to least preferred.

pub mod config;
pub mod logging;
pub mod plugins;
pub mod variant;
