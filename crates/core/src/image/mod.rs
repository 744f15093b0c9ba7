//! Raster output for debugging layouts.

mod overlay;

pub use overlay::{
    BlankCanvas, LETTER_SIZE, draw_overlay, points_to_pixels, render_overlay, write_overlay,
};
