//! Layout Analysis Module - grouping and clustering algorithms
//!
//! Contains the layout analysis algorithms for:
//! - Grouping words into clusters by corner-to-corner proximity
//! - Merging clusters whose bounding boxes overlap
//! - Grouping clusters into columns by centroid proximity

mod clustering;
mod columns;
mod distance;
mod merging;
mod spatial;

pub use clustering::{cluster_words, density_components};
pub use columns::cluster_columns;
pub use distance::{CentroidDistance, DistanceMetric, MinCornerDistance};
pub use merging::{merge_intersecting_clusters, merge_pass};
pub use spatial::Plane;
