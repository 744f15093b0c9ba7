//! JSON Converter - serializes page columns with their clusters and words.

use std::io::Write;

use serde::Serialize;

use crate::api::PageColumns;
use crate::error::Result;
use crate::layout::{Cluster, Column, Word};
use crate::utils::{HasBBox, Rect};

#[derive(Serialize)]
struct PageView<'a> {
    page: usize,
    columns: Vec<ColumnView<'a>>,
}

#[derive(Serialize)]
struct ColumnView<'a> {
    bbox: Rect,
    clusters: Vec<ClusterView<'a>>,
}

#[derive(Serialize)]
struct ClusterView<'a> {
    bbox: Rect,
    label: &'static str,
    text: String,
    words: &'a [Word],
}

impl<'a> From<&'a Cluster> for ClusterView<'a> {
    fn from(cluster: &'a Cluster) -> Self {
        Self {
            bbox: cluster.bbox(),
            label: cluster.label(),
            text: cluster.text(),
            words: cluster.words(),
        }
    }
}

impl<'a> From<&'a Column> for ColumnView<'a> {
    fn from(column: &'a Column) -> Self {
        Self {
            bbox: column.bbox(),
            clusters: column.clusters().iter().map(ClusterView::from).collect(),
        }
    }
}

fn pages_view(pages: &PageColumns) -> Vec<PageView<'_>> {
    pages
        .iter()
        .map(|(&page, columns)| PageView {
            page,
            columns: columns.iter().map(ColumnView::from).collect(),
        })
        .collect()
}

/// Serializes the page map as a JSON array of pages in page order.
pub fn to_json(pages: &PageColumns, pretty: bool) -> Result<String> {
    let view = pages_view(pages);
    let json = if pretty {
        serde_json::to_string_pretty(&view)?
    } else {
        serde_json::to_string(&view)?
    };
    Ok(json)
}

/// Writes the page map as pretty-printed JSON.
pub fn write_json<W: Write>(writer: &mut W, pages: &PageColumns) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, &pages_view(pages))?;
    writer.write_all(b"\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_labels_and_boxes() {
        let column = Column::new(vec![
            Cluster::new(vec![
                Word::new("Total", (0.0, 0.0, 25.0, 10.0)).unwrap(),
                Word::new("42", (27.0, 0.0, 37.0, 10.0)).unwrap(),
            ])
            .unwrap(),
        ])
        .unwrap();
        let mut pages = PageColumns::new();
        pages.insert(1, vec![column]);

        let value: serde_json::Value = serde_json::from_str(&to_json(&pages, false).unwrap()).unwrap();
        let cluster = &value[0]["columns"][0]["clusters"][0];
        assert_eq!(value[0]["page"], 1);
        assert_eq!(cluster["label"], "Alpha and Numeric");
        assert_eq!(cluster["text"], "Total 42");
        assert_eq!(cluster["bbox"], serde_json::json!([0.0, 0.0, 37.0, 10.0]));
        assert_eq!(cluster["words"][1]["text"], "42");
    }
}
