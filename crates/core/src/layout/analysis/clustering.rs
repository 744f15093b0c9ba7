//! Density-reachability grouping of words into clusters.
//!
//! With every point accepted as a seed, density reachability reduces to the
//! connected components of the graph linking boxes within `eps` of each
//! other, so no point is ever discarded as noise.

use std::collections::VecDeque;

use crate::error::Result;
use crate::utils::{HasBBox, Rect};

use super::super::types::{Cluster, Word};
use super::distance::DistanceMetric;
use super::spatial::Plane;

/// Groups box indices into connected components under `metric`.
///
/// Two boxes share a component when a chain of boxes links them with each
/// step at most `eps` apart. Members are listed in ascending index order and
/// components are ordered by their smallest member.
pub fn density_components<M>(boxes: &[Rect], eps: f64, metric: &M) -> Vec<Vec<usize>>
where
    M: DistanceMetric + ?Sized,
{
    if boxes.is_empty() {
        return Vec::new();
    }

    let plane = Plane::new(boxes);
    let (reach_x, reach_y) = metric.reach(eps);
    let mut assigned = vec![false; boxes.len()];
    let mut components: Vec<Vec<usize>> = Vec::new();
    let mut queue: VecDeque<usize> = VecDeque::new();

    for seed in 0..boxes.len() {
        if assigned[seed] {
            continue;
        }
        assigned[seed] = true;
        let mut members = vec![seed];
        queue.push_back(seed);

        while let Some(i) = queue.pop_front() {
            for j in plane.find_within(boxes[i], reach_x, reach_y) {
                if assigned[j] || metric.distance(boxes[i], boxes[j]) > eps {
                    continue;
                }
                assigned[j] = true;
                members.push(j);
                queue.push_back(j);
            }
        }

        members.sort_unstable();
        components.push(members);
    }

    components
}

/// Groups words into clusters, one per connected component.
///
/// Zero words yield zero clusters. Words keep their input order inside
/// each cluster.
pub fn cluster_words<M>(words: Vec<Word>, eps: f64, metric: &M) -> Result<Vec<Cluster>>
where
    M: DistanceMetric + ?Sized,
{
    let boxes: Vec<Rect> = words.iter().map(HasBBox::bbox).collect();
    let components = density_components(&boxes, eps, metric);

    let mut slots: Vec<Option<Word>> = words.into_iter().map(Some).collect();
    components
        .into_iter()
        .map(|members| {
            let members: Vec<Word> = members
                .into_iter()
                .filter_map(|i| slots[i].take())
                .collect();
            Cluster::new(members)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::analysis::distance::{CentroidDistance, MinCornerDistance};

    fn word(text: &str, bbox: Rect) -> Word {
        Word::new(text, bbox).unwrap()
    }

    #[test]
    fn chains_are_transitive() {
        let boxes = [
            (0.0, 0.0, 10.0, 10.0),
            (13.0, 0.0, 23.0, 10.0),
            (26.0, 0.0, 36.0, 10.0),
            (100.0, 0.0, 110.0, 10.0),
        ];
        let components = density_components(&boxes, 3.0, &MinCornerDistance::default());
        assert_eq!(components, vec![vec![0, 1, 2], vec![3]]);
    }

    #[test]
    fn eps_is_inclusive() {
        let boxes = [(0.0, 0.0, 10.0, 10.0), (12.0, 0.0, 22.0, 10.0)];
        let metric = MinCornerDistance::default();
        assert_eq!(density_components(&boxes, 2.0, &metric).len(), 1);
        assert_eq!(density_components(&boxes, 1.999, &metric).len(), 2);
    }

    #[test]
    fn works_with_trait_objects() {
        let metric: &dyn DistanceMetric = &CentroidDistance::default();
        let boxes = [(0.0, 0.0, 2.0, 2.0), (3.0, 0.0, 5.0, 2.0)];
        assert_eq!(density_components(&boxes, 3.0, metric), vec![vec![0, 1]]);
    }

    #[test]
    fn no_words_no_clusters() {
        let clusters = cluster_words(Vec::new(), 5.0, &MinCornerDistance::default()).unwrap();
        assert!(clusters.is_empty());
    }

    #[test]
    fn single_word_is_a_singleton() {
        let clusters = cluster_words(
            vec![word("alone", (0.0, 0.0, 10.0, 10.0))],
            5.0,
            &MinCornerDistance::default(),
        )
        .unwrap();
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].bbox(), (0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn cluster_box_is_union_of_members() {
        let clusters = cluster_words(
            vec![
                word("a", (0.0, 0.0, 10.0, 10.0)),
                word("b", (12.0, 2.0, 22.0, 14.0)),
            ],
            5.0,
            &MinCornerDistance::default(),
        )
        .unwrap();
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].bbox(), (0.0, 0.0, 22.0, 14.0));
        assert_eq!(clusters[0].text(), "a b");
    }
}
