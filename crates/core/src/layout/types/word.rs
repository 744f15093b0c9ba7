//! Word types: RawWord (as extracted) and Word (validated, paddable).

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::utils::{HasBBox, Rect, normalize_rect, pad_box};

/// One `(text, x0, y0, x1, y1)` record as returned by a text extractor,
/// in the extractor's native order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawWord {
    pub text: String,
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl RawWord {
    pub fn new(text: &str, bbox: Rect) -> Self {
        Self {
            text: text.to_string(),
            x0: bbox.0,
            y0: bbox.1,
            x1: bbox.2,
            y1: bbox.3,
        }
    }
}

/// One lexical token on a page.
///
/// Two words are the same word when their text and bounding box are equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    text: String,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
}

impl Word {
    /// Creates a word, rejecting empty or whitespace-only text and
    /// non-finite coordinates.
    pub fn new(text: &str, bbox: Rect) -> Result<Self> {
        if text.trim().is_empty() {
            return Err(LayoutError::InvalidWord(format!(
                "empty text at {bbox:?}"
            )));
        }
        let (x0, y0, x1, y1) = bbox;
        if ![x0, y0, x1, y1].iter().all(|v| v.is_finite()) {
            return Err(LayoutError::InvalidWord(format!(
                "non-finite coordinates for {text:?}: {bbox:?}"
            )));
        }
        let (x0, y0, x1, y1) = normalize_rect(bbox);
        Ok(Self {
            text: text.to_string(),
            x0,
            y0,
            x1,
            y1,
        })
    }

    /// Converts an extraction record, reordering inverted coordinates.
    pub fn from_raw(raw: &RawWord) -> Result<Self> {
        Self::new(&raw.text, (raw.x0, raw.y0, raw.x1, raw.y1))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Horizontal extent of the word.
    pub fn size(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Returns the word with its box scaled about its centre.
    pub fn padded(self, scale_x: f64, scale_y: f64) -> Self {
        let (x0, y0, x1, y1) = pad_box(self.bbox(), scale_x, scale_y);
        Self {
            x0,
            y0,
            x1,
            y1,
            ..self
        }
    }
}

impl HasBBox for Word {
    fn x0(&self) -> f64 {
        self.x0
    }
    fn y0(&self) -> f64 {
        self.y0
    }
    fn x1(&self) -> f64 {
        self.x1
    }
    fn y1(&self) -> f64 {
        self.y1
    }
}
