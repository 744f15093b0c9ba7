//! Layout reconstruction module.
//!
//! This module contains:
//! - Layout types (Word, Cluster, Column)
//! - Layout parameters (LayoutParams, DebugParams)
//! - Clustering, merging and column grouping algorithms

pub mod analysis;
pub mod params;
pub mod types;

// Re-export params
pub use params::*;

// Re-export types
pub use types::*;

// Re-export analysis types and functions
pub use analysis::*;
