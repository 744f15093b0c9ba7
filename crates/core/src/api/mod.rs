//! High-level API module for layout reconstruction.
//!
//! # Example
//!
//! ```ignore
//! use pdfmage_core::api::{ExtractOptions, JsonWordSource, extract_columns};
//! use pdfmage_core::layout::LayoutParams;
//!
//! let source = JsonWordSource::from_path("words.json")?;
//! let pages = extract_columns(&source, &LayoutParams::default(), &ExtractOptions::default(), None)?;
//! for columns in pages.values() {
//!     for column in columns {
//!         println!("{}", column.collect_text());
//!     }
//! }
//! ```

pub mod pipeline;
pub mod source;

// Re-export for convenience
pub use pipeline::{
    ExtractOptions, PageColumns, PageLayout, extract_columns, extract_pages, ingest_words,
    layout_words, process_page,
};
pub use source::{JsonWordSource, PageRasterizer, PageWords, WordDump, WordSource};
