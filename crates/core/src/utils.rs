//! Geometry routines shared by every layout stage.
//!
//! Provides:
//! - Geometric types (Point, Rect) and the `HasBBox` trait
//! - Weighted point and corner-to-corner box distances
//! - Closed-interval intersection tests
//! - Union and padding of bounding boxes

use itertools::iproduct;

use crate::error::{LayoutError, Result};

/// A 2D point (x, y).
pub type Point = (f64, f64);

/// An axis-aligned rectangle (x0, y0, x1, y1) with `x0 <= x1` and `y0 <= y1`.
///
/// Page coordinates use a top-left origin, so `y0` is the top edge.
pub type Rect = (f64, f64, f64, f64);

/// Small epsilon for floating-point comparisons.
pub const EPSILON: f64 = 1e-9;

/// Compares two floats for approximate equality.
#[inline]
pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

/// Trait for objects that have a bounding box.
pub trait HasBBox {
    fn x0(&self) -> f64;
    fn y0(&self) -> f64;
    fn x1(&self) -> f64;
    fn y1(&self) -> f64;

    fn bbox(&self) -> Rect {
        (self.x0(), self.y0(), self.x1(), self.y1())
    }

    fn width(&self) -> f64 {
        self.x1() - self.x0()
    }

    fn height(&self) -> f64 {
        self.y1() - self.y0()
    }

    fn centroid(&self) -> Point {
        centroid(self.bbox())
    }
}

/// Returns the four corners of a box: top-left, top-right, bottom-left, bottom-right.
#[inline]
pub const fn corners(bbox: Rect) -> [Point; 4] {
    let (x0, y0, x1, y1) = bbox;
    [(x0, y0), (x1, y0), (x0, y1), (x1, y1)]
}

/// Geometric centre of a box.
#[inline]
pub fn centroid(bbox: Rect) -> Point {
    ((bbox.0 + bbox.2) / 2.0, (bbox.1 + bbox.3) / 2.0)
}

/// Weighted Euclidean distance `sqrt(wx*dx^2 + wy*dy^2)`.
#[inline]
pub fn point_distance(p: Point, q: Point, weight_x: f64, weight_y: f64) -> f64 {
    let dx = p.0 - q.0;
    let dy = p.1 - q.1;
    (weight_x * dx * dx + weight_y * dy * dy).sqrt()
}

/// Minimum weighted distance over the 16 corner pairs of two boxes.
///
/// Approximates edge-to-edge proximity. Overlapping boxes are not
/// special-cased: their distance is still measured between corners.
pub fn min_box_distance(a: Rect, b: Rect, weight_x: f64, weight_y: f64) -> f64 {
    iproduct!(corners(a), corners(b))
        .map(|(p, q)| point_distance(p, q, weight_x, weight_y))
        .fold(f64::INFINITY, f64::min)
}

/// Closed-interval overlap of the x extents.
#[inline]
pub fn x_overlaps(a: Rect, b: Rect) -> bool {
    !(a.2 < b.0 || a.0 > b.2)
}

/// Closed-interval overlap of the y extents.
#[inline]
pub fn y_overlaps(a: Rect, b: Rect) -> bool {
    !(a.3 < b.1 || a.1 > b.3)
}

/// True unless one box lies entirely left, right, above or below the other.
///
/// Touching edges count as intersecting.
#[inline]
pub fn boxes_intersect(a: Rect, b: Rect) -> bool {
    x_overlaps(a, b) && y_overlaps(a, b)
}

/// Calculate union of two bounding boxes
#[inline]
pub const fn bbox_union(a: Rect, b: Rect) -> Rect {
    (a.0.min(b.0), a.1.min(b.1), a.2.max(b.2), a.3.max(b.3))
}

/// Componentwise min/max over all boxes.
///
/// Fails with [`LayoutError::EmptyUnion`] when `boxes` yields nothing.
pub fn union_box<I>(boxes: I) -> Result<Rect>
where
    I: IntoIterator<Item = Rect>,
{
    boxes
        .into_iter()
        .reduce(bbox_union)
        .ok_or(LayoutError::EmptyUnion)
}

/// Expands a box about its own centre, scaling width by `scale_x` and
/// height by `scale_y`.
pub fn pad_box(bbox: Rect, scale_x: f64, scale_y: f64) -> Rect {
    let (x0, y0, x1, y1) = bbox;
    let dw = (x1 - x0) * (scale_x - 1.0) / 2.0;
    let dh = (y1 - y0) * (scale_y - 1.0) / 2.0;
    (x0 - dw, y0 - dh, x1 + dw, y1 + dh)
}

/// Reorders coordinates so that `x0 <= x1` and `y0 <= y1`.
#[inline]
pub fn normalize_rect(bbox: Rect) -> Rect {
    let (x0, y0, x1, y1) = bbox;
    (x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1))
}
