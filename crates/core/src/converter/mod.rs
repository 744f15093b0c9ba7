//! Output Converters for reconstructed layouts
//!
//! Provides converters for transforming page columns into output formats:
//! - TextConverter: Plain text in column reading order
//! - to_json / write_json: Structured JSON with boxes, labels and words

mod json;
mod text;

pub use json::{to_json, write_json};
pub use text::TextConverter;
