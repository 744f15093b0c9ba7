//! R-tree backed index over a fixed set of bounding boxes.

use rstar::{AABB, RTree, RTreeObject};

use crate::utils::Rect;

#[derive(Clone, Debug)]
struct PlaneNode {
    id: usize,
    bbox: Rect,
}

impl RTreeObject for PlaneNode {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners([self.bbox.0, self.bbox.1], [self.bbox.2, self.bbox.3])
    }
}

/// A set of boxes placed on a plane, bulk loaded once.
///
/// Ids are stable: id == position in the slice given to [`Plane::new`].
pub struct Plane {
    tree: RTree<PlaneNode>,
}

impl Plane {
    pub fn new(bboxes: &[Rect]) -> Self {
        let nodes: Vec<PlaneNode> = bboxes
            .iter()
            .enumerate()
            .map(|(id, &bbox)| PlaneNode { id, bbox })
            .collect();
        Self {
            tree: RTree::bulk_load(nodes),
        }
    }

    /// Ids of boxes intersecting `bbox` (touching edges included), ascending.
    pub fn find(&self, bbox: Rect) -> Vec<usize> {
        let (x0, y0, x1, y1) = bbox;
        let env = AABB::from_corners([x0, y0], [x1, y1]);
        let mut ids: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&env)
            .map(|node| node.id)
            .collect();
        // Stable order for determinism
        ids.sort_unstable();
        ids
    }

    /// Ids of boxes intersecting `bbox` grown by `dx` and `dy`.
    pub fn find_within(&self, bbox: Rect, dx: f64, dy: f64) -> Vec<usize> {
        self.find((bbox.0 - dx, bbox.1 - dy, bbox.2 + dx, bbox.3 + dy))
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
