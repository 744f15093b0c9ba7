//! Distance metrics for density-reachability grouping.
//!
//! A metric measures the distance between two bounding boxes and reports how
//! far a neighbour query has to reach so that the spatial index never misses
//! a pair within `eps`.

use crate::utils::{EPSILON, Rect, centroid, min_box_distance, point_distance};

/// A distance between two boxes, usable with [`super::spatial::Plane`].
pub trait DistanceMetric: Sync {
    fn distance(&self, a: Rect, b: Rect) -> f64;

    /// Margins `(dx, dy)` such that `distance(a, b) <= eps` implies that `b`
    /// intersects `a` grown by `dx` horizontally and `dy` vertically.
    fn reach(&self, eps: f64) -> (f64, f64);
}

/// Minimum weighted distance over the corner pairs of two boxes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinCornerDistance {
    pub weight_x: f64,
    pub weight_y: f64,
}

impl MinCornerDistance {
    pub const fn new(weight_x: f64, weight_y: f64) -> Self {
        Self { weight_x, weight_y }
    }
}

impl Default for MinCornerDistance {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

impl DistanceMetric for MinCornerDistance {
    fn distance(&self, a: Rect, b: Rect) -> f64 {
        min_box_distance(a, b, self.weight_x, self.weight_y)
    }

    // Every corner pair spans at least the gap between the boxes on each axis.
    fn reach(&self, eps: f64) -> (f64, f64) {
        (
            eps / self.weight_x.sqrt() + EPSILON,
            eps / self.weight_y.sqrt() + EPSILON,
        )
    }
}

/// Weighted Euclidean distance between box centroids.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CentroidDistance {
    pub weight_x: f64,
    pub weight_y: f64,
}

impl CentroidDistance {
    pub const fn new(weight_x: f64, weight_y: f64) -> Self {
        Self { weight_x, weight_y }
    }
}

impl Default for CentroidDistance {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

impl DistanceMetric for CentroidDistance {
    fn distance(&self, a: Rect, b: Rect) -> f64 {
        point_distance(centroid(a), centroid(b), self.weight_x, self.weight_y)
    }

    // Each box contains its own centroid.
    fn reach(&self, eps: f64) -> (f64, f64) {
        (
            eps / self.weight_x.sqrt() + EPSILON,
            eps / self.weight_y.sqrt() + EPSILON,
        )
    }
}
