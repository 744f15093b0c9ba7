//! Merging of clusters whose bounding boxes overlap.
//!
//! Word-level grouping splits a visual block when no single pair of its words
//! is within `eps`, even though the resulting cluster boxes overlap. The
//! worklist pass below folds such clusters back together.

use std::collections::VecDeque;

use crate::error::Result;
use crate::utils::{HasBBox, boxes_intersect, x_overlaps};

use super::super::params::MergeMode;
use super::super::types::Cluster;

/// One worklist pass. Returns the surviving clusters and the number of merges.
///
/// Each cluster taken from the worklist collects the pending clusters whose
/// boxes intersect its box as it was when taken, and absorbs those whose x
/// extent overlaps its current, growing box. Intersections created by the
/// growth are not rescanned within the pass.
pub fn merge_pass(clusters: Vec<Cluster>) -> Result<(Vec<Cluster>, usize)> {
    let mut pending: VecDeque<Cluster> = clusters.into();
    let mut merged: Vec<Cluster> = Vec::with_capacity(pending.len());
    let mut merges = 0;

    while let Some(mut cluster) = pending.pop_front() {
        let anchor = cluster.bbox();
        let mut i = 0;
        while i < pending.len() {
            let candidate = pending[i].bbox();
            if boxes_intersect(anchor, candidate) && x_overlaps(cluster.bbox(), candidate) {
                if let Some(other) = pending.remove(i) {
                    cluster.absorb(other)?;
                    merges += 1;
                }
            } else {
                i += 1;
            }
        }
        merged.push(cluster);
    }

    Ok((merged, merges))
}

/// Merges intersecting clusters.
///
/// In [`MergeMode::Converge`] the pass is repeated until it merges nothing,
/// so the output is a fixed point: running it again changes nothing.
pub fn merge_intersecting_clusters(clusters: Vec<Cluster>, mode: MergeMode) -> Result<Vec<Cluster>> {
    let (mut current, mut merges) = merge_pass(clusters)?;
    let mut passes = 1;
    if mode == MergeMode::Converge {
        while merges > 0 {
            (current, merges) = merge_pass(current)?;
            passes += 1;
        }
    }
    tracing::trace!(passes, clusters = current.len(), "merge finished");
    Ok(current)
}
