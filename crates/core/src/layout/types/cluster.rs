//! Word clusters and their content classification.

use std::fmt;

use crate::error::{LayoutError, Result};
use crate::utils::{HasBBox, Rect, union_box};

use super::word::Word;

/// Three-bit summary of which character classes a cluster's words use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ContentSignature(u8);

impl ContentSignature {
    pub const NUMERIC: Self = Self(0b001);
    pub const ALPHA: Self = Self(0b010);
    pub const SPECIAL: Self = Self(0b100);
    pub const EMPTY: Self = Self(0);

    /// Signature contributed by a single token.
    ///
    /// Purely numeric text sets the numeric bit and purely alphabetic text the
    /// alphabetic bit. Text mixing letters and digits sets both. Anything
    /// containing another character sets the special bit.
    pub fn of_text(text: &str) -> Self {
        if text.is_empty() {
            Self::EMPTY
        } else if text.chars().all(char::is_numeric) {
            Self::NUMERIC
        } else if text.chars().all(char::is_alphabetic) {
            Self::ALPHA
        } else if text.chars().all(char::is_alphanumeric) {
            Self::NUMERIC | Self::ALPHA
        } else {
            Self::SPECIAL
        }
    }

    pub fn of_words<'a>(words: impl IntoIterator<Item = &'a Word>) -> Self {
        words
            .into_iter()
            .fold(Self::EMPTY, |acc, w| acc | Self::of_text(w.text()))
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn label(self) -> &'static str {
        match self.0 {
            1 => "Numeric",
            2 => "Alpha",
            3 => "Alpha and Numeric",
            4 => "Special Characters",
            5 => "Numeric and Special Characters",
            6 => "Alpha and Special Characters",
            7 => "Alpha, Numeric and Special Characters",
            _ => "Unknown",
        }
    }
}

impl std::ops::BitOr for ContentSignature {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for ContentSignature {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for ContentSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A group of words judged to form one visual unit (a line or short phrase).
///
/// The bounding box is always the tight union of the member boxes and the
/// signature always reflects the current members.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    words: Vec<Word>,
    bbox: Rect,
    signature: ContentSignature,
}

impl Cluster {
    /// Builds a cluster, dropping repeated words.
    ///
    /// Fails when `words` is empty.
    pub fn new(words: Vec<Word>) -> Result<Self> {
        let mut cluster = Self {
            words,
            bbox: (0.0, 0.0, 0.0, 0.0),
            signature: ContentSignature::EMPTY,
        };
        cluster.remove_duplicate_words();
        cluster.refresh()?;
        Ok(cluster)
    }

    /// Takes over the members of `other`, skipping words already present.
    pub fn absorb(&mut self, other: Cluster) -> Result<()> {
        for word in other.words {
            if !self.words.contains(&word) {
                self.words.push(word);
            }
        }
        self.refresh()
    }

    /// Drops repeated words, keeping the first occurrence.
    pub fn remove_duplicate_words(&mut self) {
        let mut unique: Vec<Word> = Vec::with_capacity(self.words.len());
        for word in self.words.drain(..) {
            if !unique.contains(&word) {
                unique.push(word);
            }
        }
        self.words = unique;
    }

    fn refresh(&mut self) -> Result<()> {
        self.bbox = union_box(self.words.iter().map(HasBBox::bbox))?;
        self.signature = ContentSignature::of_words(&self.words);
        if self.signature.is_empty() {
            return Err(LayoutError::UnknownSignature {
                words: self.words.len(),
            });
        }
        Ok(())
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn signature(&self) -> ContentSignature {
        self.signature
    }

    pub fn label(&self) -> &'static str {
        self.signature.label()
    }

    /// Member texts joined with single spaces.
    pub fn text(&self) -> String {
        let texts: Vec<&str> = self.words.iter().map(Word::text).collect();
        texts.join(" ")
    }
}

impl HasBBox for Cluster {
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
