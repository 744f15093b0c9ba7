//! Debug overlays: page rasters with word, cluster and column boxes drawn on top.

use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect as PixelRect;

use crate::api::source::PageRasterizer;
use crate::error::Result;
use crate::layout::{Column, DebugParams};
use crate::utils::{HasBBox, Rect};

/// US Letter in points, used when a page size is unknown.
pub const LETTER_SIZE: (f64, f64) = (612.0, 792.0);

/// Page coordinates are in points; rasters are `dpi` pixels per inch.
#[inline]
pub fn points_to_pixels(dpi: u32) -> f64 {
    f64::from(dpi) / 72.0
}

/// Rasterizer that produces a blank white page of the page's size.
///
/// Lets overlays be drawn when no renderer for the source document exists.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlankCanvas {
    size: (f64, f64),
}

impl BlankCanvas {
    pub fn new(size: Option<(f64, f64)>) -> Self {
        Self {
            size: size.unwrap_or(LETTER_SIZE),
        }
    }
}

impl Default for BlankCanvas {
    fn default() -> Self {
        Self::new(None)
    }
}

impl PageRasterizer for BlankCanvas {
    fn rasterize(&self, _page_number: usize, dpi: u32) -> Result<RgbaImage> {
        let scale = points_to_pixels(dpi);
        let width = ((self.size.0 * scale).ceil() as u32).max(1);
        let height = ((self.size.1 * scale).ceil() as u32).max(1);
        Ok(RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255])))
    }
}

fn draw_box(image: &mut RgbaImage, bbox: Rect, scale: f64, color: [u8; 4]) {
    let x = (bbox.0 * scale).round() as i32;
    let y = (bbox.1 * scale).round() as i32;
    // of_size panics on zero extents
    let w = (((bbox.2 - bbox.0) * scale).round() as u32).max(1);
    let h = (((bbox.3 - bbox.1) * scale).round() as u32).max(1);
    draw_hollow_rect_mut(image, PixelRect::at(x, y).of_size(w, h), Rgba(color));
}

/// Draws the boxes enabled in `debug` onto a raster of the page.
///
/// Words first, then clusters, then columns, so lanes stay visible.
pub fn draw_overlay(image: &mut RgbaImage, columns: &[Column], debug: &DebugParams) {
    let scale = points_to_pixels(debug.dpi);
    let clusters = columns.iter().flat_map(Column::clusters);

    if debug.words {
        for word in clusters.clone().flat_map(|c| c.words()) {
            draw_box(image, word.bbox(), scale, debug.word_color);
        }
    }
    if debug.clusters {
        for cluster in clusters {
            draw_box(image, cluster.bbox(), scale, debug.cluster_color);
        }
    }
    if debug.columns {
        for column in columns {
            draw_box(image, column.bbox(), scale, debug.column_color);
        }
    }
}

/// Saves `image` as `<dir>/page_<n>.png`, creating `dir` if needed.
pub fn write_overlay(image: &RgbaImage, dir: &Path, page_number: usize) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("page_{page_number}.png"));
    image.save(&path)?;
    Ok(path)
}

/// Rasterizes a page, draws the overlay and writes it out.
pub fn render_overlay<R>(
    rasterizer: &R,
    page_number: usize,
    columns: &[Column],
    debug: &DebugParams,
) -> Result<PathBuf>
where
    R: PageRasterizer + ?Sized,
{
    let mut image = rasterizer.rasterize(page_number, debug.dpi)?;
    draw_overlay(&mut image, columns, debug);
    let path = write_overlay(&image, &debug.output_dir, page_number)?;
    tracing::info!(page = page_number, path = %path.display(), "wrote overlay");
    Ok(path)
}
