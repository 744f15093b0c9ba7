//! Page pipeline: extraction, padding, clustering, merging, columns, overlay.
//!
//! Provides the main public API:
//! - `layout_words()` - Run the layout stages over one page's words
//! - `process_page()` - Fetch, lay out and optionally render one page
//! - `extract_pages()` - Per-page results for a page selection, in page order
//! - `extract_columns()` - The page → columns map, failing on the first error

use std::collections::BTreeMap;
use std::time::Instant;

use rayon::ThreadPoolBuilder;
use rayon::prelude::*;

use crate::api::source::{PageRasterizer, WordSource};
use crate::error::{LayoutError, Result};
use crate::image::{BlankCanvas, render_overlay};
use crate::layout::{
    CentroidDistance, Cluster, Column, LayoutParams, MinCornerDistance, RawWord, Word,
    cluster_columns, cluster_words, merge_intersecting_clusters,
};

/// Columns of every processed page, keyed by 1-based page number.
pub type PageColumns = BTreeMap<usize, Vec<Column>>;

pub(crate) fn default_thread_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Options selecting which pages to process and how.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractOptions {
    /// 1-based page numbers to process. `None` or an empty list means all pages.
    pub pages: Option<Vec<usize>>,

    /// Maximum number of pages to process. 0 means no limit.
    pub max_pages: usize,

    /// Worker threads for page processing. None uses available parallelism.
    pub threads: Option<usize>,
}

impl ExtractOptions {
    /// The page numbers to process, ascending and without repeats.
    ///
    /// `available` lists the pages the source holds, ascending. Requested
    /// pages missing from it are dropped.
    pub fn selected_pages(&self, available: &[usize]) -> Vec<usize> {
        let mut selected: Vec<usize> = match self.pages.as_deref() {
            None | Some([]) => available.to_vec(),
            Some(pages) => pages
                .iter()
                .copied()
                .filter(|n| available.binary_search(n).is_ok())
                .collect(),
        };
        selected.sort_unstable();
        selected.dedup();
        if self.max_pages > 0 {
            selected.truncate(self.max_pages);
        }
        selected
    }
}

/// The reconstructed layout of one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub page_number: usize,
    pub columns: Vec<Column>,
}

impl PageLayout {
    pub fn clusters(&self) -> impl Iterator<Item = &Cluster> {
        self.columns.iter().flat_map(Column::clusters)
    }

    pub fn words(&self) -> impl Iterator<Item = &Word> {
        self.clusters().flat_map(Cluster::words)
    }

    /// Concatenated column texts, columns separated by a blank line.
    pub fn text(&self) -> String {
        let texts: Vec<String> = self.columns.iter().map(Column::collect_text).collect();
        texts.join("\n")
    }
}

/// Runs padding, word clustering, merging and column grouping over one
/// page's words.
pub fn layout_words(words: Vec<Word>, params: &LayoutParams) -> Result<Vec<Column>> {
    let (scale_x, scale_y) = params.extend_word_coordinates;
    let words: Vec<Word> = words
        .into_iter()
        .map(|w| w.padded(scale_x, scale_y))
        .collect();

    let (wx, wy) = params.word_distance_weights;
    let clusters = cluster_words(
        words,
        params.word_cluster_eps,
        &MinCornerDistance::new(wx, wy),
    )?;
    tracing::debug!(clusters = clusters.len(), "clustered words");

    let mut clusters = merge_intersecting_clusters(clusters, params.merge_mode)?;
    tracing::debug!(clusters = clusters.len(), "merged intersecting clusters");
    for cluster in &mut clusters {
        cluster.remove_duplicate_words();
    }

    let (cx, cy) = params.column_distance_weights;
    let columns = cluster_columns(
        clusters,
        params.column_cluster_eps,
        &CentroidDistance::new(cx, cy),
    )?;
    tracing::debug!(columns = columns.len(), "grouped columns");
    Ok(columns)
}

/// Converts extraction records into words, dropping unusable records.
pub fn ingest_words(page_number: usize, raw: &[RawWord]) -> Vec<Word> {
    raw.iter()
        .filter_map(|r| match Word::from_raw(r) {
            Ok(word) => Some(word),
            Err(e) => {
                tracing::warn!(page = page_number, error = %e, "skipping word");
                None
            }
        })
        .collect()
}

/// Processes one page end to end.
///
/// When `params.debug.images` is set an overlay is written using
/// `rasterizer`, or a blank canvas of the page's size when none is given.
pub fn process_page<S>(
    source: &S,
    page_number: usize,
    params: &LayoutParams,
    rasterizer: Option<&dyn PageRasterizer>,
) -> Result<PageLayout>
where
    S: WordSource + ?Sized,
{
    let _span = tracing::debug_span!("page", page = page_number).entered();

    let raw = source.page_words(page_number)?;
    let words = ingest_words(page_number, &raw);
    tracing::debug!(words = words.len(), "extracted words");

    let columns = layout_words(words, params)?;

    if params.debug.images {
        match rasterizer {
            Some(r) => render_overlay(r, page_number, &columns, &params.debug)?,
            None => {
                let canvas = BlankCanvas::new(source.page_size(page_number));
                render_overlay(&canvas, page_number, &columns, &params.debug)?
            }
        };
    }

    Ok(PageLayout {
        page_number,
        columns,
    })
}

/// Processes the selected pages on a worker pool.
///
/// Each page's result is reported separately, sorted by page number; a
/// failing page does not affect the others. The outer error covers invalid
/// parameters and pool creation only.
pub fn extract_pages<S>(
    source: &S,
    params: &LayoutParams,
    options: &ExtractOptions,
    rasterizer: Option<&dyn PageRasterizer>,
) -> Result<Vec<(usize, Result<PageLayout>)>>
where
    S: WordSource + ?Sized,
{
    params.validate()?;
    let start = Instant::now();

    let mut available = source.page_numbers();
    available.sort_unstable();
    available.dedup();
    let selected = options.selected_pages(&available);
    let thread_count = options
        .threads
        .unwrap_or_else(default_thread_count)
        .max(1);
    let pool = ThreadPoolBuilder::new()
        .num_threads(thread_count)
        .build()
        .map_err(|e| LayoutError::ThreadPool(e.to_string()))?;

    let mut results: Vec<(usize, Result<PageLayout>)> = pool.install(|| {
        selected
            .into_par_iter()
            .map(|page_number| {
                let layout = process_page(source, page_number, params, rasterizer);
                (page_number, layout)
            })
            .collect()
    });
    results.sort_by_key(|(page_number, _)| *page_number);

    tracing::debug!(
        pages = results.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "extraction finished"
    );
    Ok(results)
}

/// Builds the page → columns map for the selected pages.
///
/// Pages outside the source are simply absent. Fails with the error of the
/// lowest-numbered failing page.
pub fn extract_columns<S>(
    source: &S,
    params: &LayoutParams,
    options: &ExtractOptions,
    rasterizer: Option<&dyn PageRasterizer>,
) -> Result<PageColumns>
where
    S: WordSource + ?Sized,
{
    let mut ret = PageColumns::new();
    for (page_number, layout) in extract_pages(source, params, options, rasterizer)? {
        ret.insert(page_number, layout?.columns);
    }
    Ok(ret)
}
