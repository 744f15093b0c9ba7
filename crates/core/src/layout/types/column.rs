//! Columns: top-to-bottom reading lanes of clusters.

use ordered_float::OrderedFloat;

use crate::error::Result;
use crate::utils::{HasBBox, Rect, union_box};

use super::cluster::Cluster;

/// An ordered sequence of clusters forming one reading lane of a page.
///
/// Clusters are kept by ascending top edge; clusters sharing a top edge
/// keep the order they were given in.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    clusters: Vec<Cluster>,
    bbox: Rect,
}

impl Column {
    /// Builds a column, sorting the clusters into reading order.
    ///
    /// Fails when `clusters` is empty.
    pub fn new(mut clusters: Vec<Cluster>) -> Result<Self> {
        // sort_by_key is stable
        clusters.sort_by_key(|c| OrderedFloat(c.y0()));
        let bbox = union_box(clusters.iter().map(HasBBox::bbox))?;
        Ok(Self { clusters, bbox })
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Number of words across all clusters.
    pub fn word_count(&self) -> usize {
        self.clusters.iter().map(Cluster::len).sum()
    }

    /// One line per cluster, words separated by single spaces.
    pub fn collect_text(&self) -> String {
        let mut text = String::new();
        for cluster in &self.clusters {
            text.push_str(&cluster.text());
            text.push('\n');
        }
        text
    }
}

impl HasBBox for Column {
    fn x0(&self) -> f64 {
        self.bbox.0
    }
    fn y0(&self) -> f64 {
        self.bbox.1
    }
    fn x1(&self) -> f64 {
        self.bbox.2
    }
    fn y1(&self) -> f64 {
        self.bbox.3
    }
    fn bbox(&self) -> Rect {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::types::Word;

    fn cluster(text: &str, bbox: Rect) -> Cluster {
        Cluster::new(vec![Word::new(text, bbox).unwrap()]).unwrap()
    }

    #[test]
    fn sorts_by_top_edge_stably() {
        let column = Column::new(vec![
            cluster("third", (0.0, 40.0, 10.0, 50.0)),
            cluster("first", (0.0, 0.0, 10.0, 10.0)),
            cluster("tie-a", (20.0, 20.0, 30.0, 30.0)),
            cluster("tie-b", (0.0, 20.0, 10.0, 30.0)),
        ])
        .unwrap();
        let texts: Vec<String> = column.clusters().iter().map(Cluster::text).collect();
        assert_eq!(texts, ["first", "tie-a", "tie-b", "third"]);
        assert_eq!(column.bbox(), (0.0, 0.0, 30.0, 50.0));
    }

    #[test]
    fn collect_text_breaks_per_cluster() {
        let column = Column::new(vec![
            Cluster::new(vec![
                Word::new("Hello", (0.0, 0.0, 20.0, 10.0)).unwrap(),
                Word::new("world", (22.0, 0.0, 40.0, 10.0)).unwrap(),
            ])
            .unwrap(),
            cluster("again", (0.0, 20.0, 20.0, 30.0)),
        ])
        .unwrap();
        assert_eq!(column.collect_text(), "Hello world\nagain\n");
        assert_eq!(column.word_count(), 3);
    }
}
