//! pdfmage - reconstructs word clusters and reading columns from extracted PDF words.

pub mod api;
pub mod converter;
pub mod error;
pub mod image;
pub mod layout;
pub mod utils;

pub use api::{ExtractOptions, PageColumns, PageLayout, extract_columns, extract_pages};
pub use error::{LayoutError, Result};
