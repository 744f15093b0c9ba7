//! Text Converter - outputs plain text in column reading order.

use std::io::Write;

use crate::api::PageLayout;
use crate::error::Result;
use crate::layout::Column;

/// Text Converter - writes each column's clusters one per line, columns
/// separated by a blank line.
pub struct TextConverter<'a, W: Write> {
    /// Output writer
    outfp: &'a mut W,
    /// Whether to write a page header before each page
    showpageno: bool,
}

impl<'a, W: Write> TextConverter<'a, W> {
    pub fn new(outfp: &'a mut W, showpageno: bool) -> Self {
        Self { outfp, showpageno }
    }

    /// Receive and render one page's columns.
    pub fn receive_columns(&mut self, page_number: usize, columns: &[Column]) -> Result<()> {
        if self.showpageno {
            writeln!(self.outfp, "Page {page_number}")?;
        }
        for column in columns {
            self.outfp.write_all(column.collect_text().as_bytes())?;
            self.outfp.write_all(b"\n")?;
        }
        // Form feed ends each page
        self.outfp.write_all(b"\x0c")?;
        Ok(())
    }

    /// Receive and render a page layout.
    pub fn receive_layout(&mut self, layout: &PageLayout) -> Result<()> {
        self.receive_columns(layout.page_number, &layout.columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Cluster, Word};

    #[test]
    fn writes_columns_then_form_feed() {
        let column = Column::new(vec![
            Cluster::new(vec![Word::new("Title", (0.0, 0.0, 30.0, 10.0)).unwrap()]).unwrap(),
        ])
        .unwrap();
        let mut out = Vec::new();
        let mut converter = TextConverter::new(&mut out, true);
        converter.receive_columns(2, &[column]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Page 2\nTitle\n\n\x0c");
    }
}
