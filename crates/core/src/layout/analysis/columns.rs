//! Grouping of merged clusters into columns.

use ordered_float::OrderedFloat;

use crate::error::Result;
use crate::utils::{HasBBox, Rect};

use super::super::types::{Cluster, Column};
use super::clustering::density_components;
use super::distance::DistanceMetric;

/// Groups clusters into columns with a second density-reachability pass.
///
/// Clusters inside a column are in reading order (ascending top edge, stable
/// on ties). Columns are returned left to right by `x0`, then by `y0`; this
/// is a convenience, not a reading-order guarantee across columns.
pub fn cluster_columns<M>(clusters: Vec<Cluster>, eps: f64, metric: &M) -> Result<Vec<Column>>
where
    M: DistanceMetric + ?Sized,
{
    let boxes: Vec<Rect> = clusters.iter().map(HasBBox::bbox).collect();
    let components = density_components(&boxes, eps, metric);

    let mut slots: Vec<Option<Cluster>> = clusters.into_iter().map(Some).collect();
    let mut columns = components
        .into_iter()
        .map(|members| {
            let members: Vec<Cluster> = members
                .into_iter()
                .filter_map(|i| slots[i].take())
                .collect();
            Column::new(members)
        })
        .collect::<Result<Vec<Column>>>()?;

    columns.sort_by_key(|c| (OrderedFloat(c.x0()), OrderedFloat(c.y0())));
    Ok(columns)
}
