//! Tests for the page pipeline: page selection, collaborator failures,
//! overlay output and the text/JSON converters.

use std::path::PathBuf;
use std::sync::Mutex;

use image::RgbaImage;
use pdfmage_core::api::{
    ExtractOptions, JsonWordSource, PageRasterizer, WordSource, extract_columns, extract_pages,
    process_page,
};
use pdfmage_core::converter::{TextConverter, to_json};
use pdfmage_core::layout::{LayoutParams, RawWord};
use pdfmage_core::utils::HasBBox;
use pdfmage_core::{LayoutError, Result};

/// One line of words per page: "page N words".
fn three_page_source() -> JsonWordSource {
    let pages = (1..=3)
        .map(|n| {
            vec![
                RawWord::new("page", (50.0, 100.0, 80.0, 110.0)),
                RawWord::new(&n.to_string(), (84.0, 100.0, 90.0, 110.0)),
                RawWord::new("words", (94.0, 100.0, 130.0, 110.0)),
            ]
        })
        .collect();
    JsonWordSource::from_pages(pages)
}

fn temp_output_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("pdfmage_{}_{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

/// Fails to extract the given page.
struct FailingSource {
    inner: JsonWordSource,
    broken_page: usize,
}

impl WordSource for FailingSource {
    fn page_count(&self) -> usize {
        self.inner.page_count()
    }

    fn page_words(&self, page_number: usize) -> Result<Vec<RawWord>> {
        if page_number == self.broken_page {
            return Err(LayoutError::Source {
                page: page_number,
                message: "corrupt content stream".to_string(),
            });
        }
        self.inner.page_words(page_number)
    }
}

/// Records every page fetched from the wrapped source.
struct RecordingSource {
    inner: JsonWordSource,
    fetched: Mutex<Vec<usize>>,
}

impl RecordingSource {
    fn new(inner: JsonWordSource) -> Self {
        Self {
            inner,
            fetched: Mutex::new(Vec::new()),
        }
    }

    fn fetched(&self) -> Vec<usize> {
        let mut pages = self.fetched.lock().unwrap().clone();
        pages.sort_unstable();
        pages
    }
}

impl WordSource for RecordingSource {
    fn page_count(&self) -> usize {
        self.inner.page_count()
    }

    fn page_numbers(&self) -> Vec<usize> {
        self.inner.page_numbers()
    }

    fn page_words(&self, page_number: usize) -> Result<Vec<RawWord>> {
        self.fetched.lock().unwrap().push(page_number);
        self.inner.page_words(page_number)
    }
}

struct FailingRasterizer;

impl PageRasterizer for FailingRasterizer {
    fn rasterize(&self, page_number: usize, _dpi: u32) -> Result<RgbaImage> {
        Err(LayoutError::Render {
            page: page_number,
            message: "renderer unavailable".to_string(),
        })
    }
}

// ============================================================================
// Page selection
// ============================================================================

#[test]
fn test_all_pages_in_order() {
    let pages = extract_columns(
        &three_page_source(),
        &LayoutParams::default(),
        &ExtractOptions::default(),
        None,
    )
    .unwrap();

    assert_eq!(pages.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(pages[&2][0].collect_text(), "page 2 words\n");
}

#[test]
fn test_selected_pages_only() {
    let options = ExtractOptions {
        pages: Some(vec![3, 1]),
        ..ExtractOptions::default()
    };
    let pages = extract_columns(
        &three_page_source(),
        &LayoutParams::default(),
        &options,
        None,
    )
    .unwrap();

    assert_eq!(pages.keys().copied().collect::<Vec<_>>(), vec![1, 3]);
}

#[test]
fn test_out_of_range_pages_are_absent() {
    let options = ExtractOptions {
        pages: Some(vec![2, 7]),
        ..ExtractOptions::default()
    };
    let pages = extract_columns(
        &three_page_source(),
        &LayoutParams::default(),
        &options,
        None,
    )
    .unwrap();

    assert_eq!(pages.keys().copied().collect::<Vec<_>>(), vec![2]);
}

#[test]
fn test_unselected_pages_are_never_fetched() {
    let source = RecordingSource::new(three_page_source());
    let options = ExtractOptions {
        pages: Some(vec![2, 9]),
        ..ExtractOptions::default()
    };
    let pages = extract_columns(&source, &LayoutParams::default(), &options, None).unwrap();

    assert_eq!(pages.keys().copied().collect::<Vec<_>>(), vec![2]);
    assert_eq!(source.fetched(), vec![2]);
}

#[test]
fn test_max_pages_limits_fetches() {
    let source = RecordingSource::new(three_page_source());
    let options = ExtractOptions {
        max_pages: 2,
        ..ExtractOptions::default()
    };
    extract_columns(&source, &LayoutParams::default(), &options, None).unwrap();

    assert_eq!(source.fetched(), vec![1, 2]);
}

#[test]
fn test_sparse_page_numbers_add_no_pages() {
    let source = RecordingSource::new(
        JsonWordSource::from_json(
            r#"{"pages": [{"number": 200000, "words": [
                {"text": "last", "x0": 10, "y0": 10, "x1": 40, "y1": 20}
            ]}]}"#,
        )
        .unwrap(),
    );
    let pages = extract_columns(
        &source,
        &LayoutParams::default(),
        &ExtractOptions::default(),
        None,
    )
    .unwrap();

    assert_eq!(pages.keys().copied().collect::<Vec<_>>(), vec![200000]);
    assert_eq!(pages[&200000][0].collect_text(), "last\n");
    assert_eq!(source.fetched(), vec![200000]);
}

#[test]
fn test_duplicate_page_numbers_are_an_error() {
    let result = JsonWordSource::from_json(
        r#"{"pages": [
            {"number": 2, "words": [{"text": "early", "x0": 0, "y0": 0, "x1": 30, "y1": 10}]},
            {"words": [{"text": "late", "x0": 0, "y0": 0, "x1": 30, "y1": 10}]}
        ]}"#,
    );

    assert!(matches!(result, Err(LayoutError::DuplicatePage(2))));
}

#[test]
fn test_single_thread_matches_parallel() {
    let params = LayoutParams::default();
    let parallel = extract_columns(
        &three_page_source(),
        &params,
        &ExtractOptions {
            threads: Some(4),
            ..ExtractOptions::default()
        },
        None,
    )
    .unwrap();
    let serial = extract_columns(
        &three_page_source(),
        &params,
        &ExtractOptions {
            threads: Some(1),
            ..ExtractOptions::default()
        },
        None,
    )
    .unwrap();

    assert_eq!(parallel, serial);
}

#[test]
fn test_invalid_params_rejected_before_work() {
    let params = LayoutParams {
        column_cluster_eps: -1.0,
        ..LayoutParams::default()
    };
    let result = extract_pages(
        &three_page_source(),
        &params,
        &ExtractOptions::default(),
        None,
    );

    assert!(matches!(result, Err(LayoutError::InvalidParams(_))));
}

// ============================================================================
// Collaborator failures
// ============================================================================

#[test]
fn test_failing_page_does_not_affect_others() {
    let source = FailingSource {
        inner: three_page_source(),
        broken_page: 2,
    };
    let results = extract_pages(
        &source,
        &LayoutParams::default(),
        &ExtractOptions::default(),
        None,
    )
    .unwrap();

    assert_eq!(results.len(), 3);
    assert!(results[0].1.is_ok());
    assert!(matches!(
        results[1],
        (2, Err(LayoutError::Source { page: 2, .. }))
    ));
    assert_eq!(results[2].0, 3);
    assert!(results[2].1.is_ok());
}

#[test]
fn test_extract_columns_reports_failure() {
    let source = FailingSource {
        inner: three_page_source(),
        broken_page: 3,
    };
    let result = extract_columns(
        &source,
        &LayoutParams::default(),
        &ExtractOptions::default(),
        None,
    );

    assert!(matches!(result, Err(LayoutError::Source { page: 3, .. })));
}

#[test]
fn test_unusable_words_are_skipped() {
    let source = JsonWordSource::from_json(
        r#"{"pages": [{"words": [
            {"text": "  ", "x0": 0, "y0": 0, "x1": 10, "y1": 10},
            {"text": "kept", "x0": 40, "y0": 10, "x1": 10, "y1": 0}
        ]}]}"#,
    )
    .unwrap();
    let layout = process_page(&source, 1, &LayoutParams::default(), None).unwrap();

    let words: Vec<_> = layout.words().collect();
    assert_eq!(words.len(), 1);
    assert_eq!(words[0].text(), "kept");
    assert_eq!(layout.columns[0].clusters()[0].label(), "Alpha");
}

#[test]
fn test_non_finite_words_are_skipped() {
    let source = JsonWordSource::from_pages(vec![vec![
        RawWord::new("broken", (f64::NAN, 0.0, 10.0, 10.0)),
        RawWord::new("fine", (0.0, 0.0, 30.0, 10.0)),
    ]]);
    let layout = process_page(&source, 1, &LayoutParams::default(), None).unwrap();

    assert_eq!(layout.text(), "fine\n");
    assert_eq!(layout.columns[0].bbox(), (0.0, 0.0, 30.0, 10.0));
}

#[test]
fn test_empty_page_has_no_columns() {
    let source = JsonWordSource::from_pages(vec![Vec::new()]);
    let layout = process_page(&source, 1, &LayoutParams::default(), None).unwrap();

    assert!(layout.columns.is_empty());
    assert_eq!(layout.text(), "");
}

// ============================================================================
// Overlays
// ============================================================================

#[test]
fn test_overlay_written_per_page() {
    let dir = temp_output_dir("overlay");
    let mut params = LayoutParams::default();
    params.debug.images = true;
    params.debug.columns = true;
    params.debug.output_dir = dir.clone();

    let source = JsonWordSource::from_json(
        r#"{"pages": [{"number": 1, "width": 200, "height": 100, "words": [
            {"text": "hello", "x0": 10, "y0": 10, "x1": 40, "y1": 20}
        ]}]}"#,
    )
    .unwrap();
    process_page(&source, 1, &params, None).unwrap();

    let path = dir.join("page_1.png");
    assert!(path.exists());
    let image = image::open(&path).unwrap();
    assert_eq!((image.width(), image.height()), (200, 100));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_no_overlay_unless_enabled() {
    let dir = temp_output_dir("no_overlay");
    let mut params = LayoutParams::default();
    params.debug.output_dir = dir.clone();

    process_page(&three_page_source(), 1, &params, None).unwrap();

    assert!(!dir.exists());
}

#[test]
fn test_rasterizer_failure_fails_page() {
    let dir = temp_output_dir("raster_failure");
    let mut params = LayoutParams::default();
    params.debug.images = true;
    params.debug.output_dir = dir;

    let result = process_page(&three_page_source(), 1, &params, Some(&FailingRasterizer));

    assert!(matches!(result, Err(LayoutError::Render { page: 1, .. })));
}

// ============================================================================
// Converters
// ============================================================================

#[test]
fn test_text_output_separates_columns() {
    let source = JsonWordSource::from_pages(vec![vec![
        RawWord::new("left", (50.0, 100.0, 80.0, 110.0)),
        RawWord::new("right", (400.0, 100.0, 430.0, 110.0)),
        RawWord::new("below", (50.0, 130.0, 80.0, 140.0)),
    ]]);
    let pages = extract_columns(
        &source,
        &LayoutParams::default(),
        &ExtractOptions::default(),
        None,
    )
    .unwrap();

    let mut out = Vec::new();
    let mut converter = TextConverter::new(&mut out, false);
    for (&page_number, columns) in &pages {
        converter.receive_columns(page_number, columns).unwrap();
    }

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "left\nbelow\n\nright\n\n\x0c"
    );
}

#[test]
fn test_json_output_lists_pages() {
    let pages = extract_columns(
        &three_page_source(),
        &LayoutParams::default(),
        &ExtractOptions::default(),
        None,
    )
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&to_json(&pages, true).unwrap()).unwrap();

    assert_eq!(value.as_array().map(Vec::len), Some(3));
    assert_eq!(value[2]["page"], 3);
    assert_eq!(
        value[0]["columns"][0]["clusters"][0]["label"],
        "Alpha and Numeric"
    );
}
