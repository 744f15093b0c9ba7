//! Collaborator seams: where words and page rasters come from.
//!
//! Text extraction and rasterization live outside this crate. The pipeline
//! talks to them through [`WordSource`] and [`PageRasterizer`];
//! [`JsonWordSource`] reads a word dump produced by any extractor.

use std::collections::BTreeMap;
use std::path::Path;

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::layout::RawWord;

/// Supplies the words of each page, in the extractor's native order.
///
/// Page numbers are 1-based.
pub trait WordSource: Sync {
    fn page_count(&self) -> usize;

    /// Pages that can be fetched, ascending. Defaults to `1..=page_count()`.
    fn page_numbers(&self) -> Vec<usize> {
        (1..=self.page_count()).collect()
    }

    fn page_words(&self, page_number: usize) -> Result<Vec<RawWord>>;

    /// Page width and height in points, when known.
    fn page_size(&self, _page_number: usize) -> Option<(f64, f64)> {
        None
    }
}

/// Produces a raster image of a page at the given resolution.
///
/// Only used for debug overlays, never for layout decisions.
pub trait PageRasterizer: Sync {
    fn rasterize(&self, page_number: usize, dpi: u32) -> Result<RgbaImage>;
}

/// One page of a word dump.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageWords {
    /// 1-based page number. Defaults to the page's position in the dump.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default)]
    pub words: Vec<RawWord>,
}

/// A word dump: `{"pages": [{"number": 1, "width": 612, "height": 792, "words": [...]}]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordDump {
    pub pages: Vec<PageWords>,
}

/// Word source backed by an in-memory word dump.
///
/// Only the pages present in the dump exist; numbering may be sparse.
#[derive(Debug, Clone, Default)]
pub struct JsonWordSource {
    pages: BTreeMap<usize, PageWords>,
}

impl JsonWordSource {
    /// Fails on page number 0 and on a number used by two pages.
    pub fn from_dump(dump: WordDump) -> Result<Self> {
        let mut pages = BTreeMap::new();
        for (idx, mut page) in dump.pages.into_iter().enumerate() {
            let number = page.number.unwrap_or(idx + 1);
            if number == 0 {
                return Err(LayoutError::PageOutOfRange(0));
            }
            page.number = Some(number);
            if pages.insert(number, page).is_some() {
                return Err(LayoutError::DuplicatePage(number));
            }
        }
        Ok(Self { pages })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_dump(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    /// One entry per page, page 1 first.
    pub fn from_pages(pages: Vec<Vec<RawWord>>) -> Self {
        let pages = pages
            .into_iter()
            .enumerate()
            .map(|(idx, words)| {
                (
                    idx + 1,
                    PageWords {
                        number: Some(idx + 1),
                        width: None,
                        height: None,
                        words,
                    },
                )
            })
            .collect::<BTreeMap<_, _>>();
        Self { pages }
    }
}

impl WordSource for JsonWordSource {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_numbers(&self) -> Vec<usize> {
        self.pages.keys().copied().collect()
    }

    fn page_words(&self, page_number: usize) -> Result<Vec<RawWord>> {
        self.pages
            .get(&page_number)
            .map(|page| page.words.clone())
            .ok_or(LayoutError::PageOutOfRange(page_number))
    }

    fn page_size(&self, page_number: usize) -> Option<(f64, f64)> {
        let page = self.pages.get(&page_number)?;
        Some((page.width?, page.height?))
    }
}
