//! Layout reconstruction parameters.
//!
//! Contains LayoutParams for controlling how words are grouped into
//! clusters and clusters into columns, and DebugParams for the optional
//! overlay images.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};

pub(crate) const DEFAULT_WORD_CLUSTER_EPS: f64 = 12.0;
pub(crate) const DEFAULT_COLUMN_CLUSTER_EPS: f64 = 200.0;
pub(crate) const DEFAULT_DPI: u32 = 72;

/// How the cluster-merge pass treats chains of overlapping clusters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeMode {
    /// Repeat the worklist pass until no pair of clusters qualifies.
    #[default]
    Converge,
    /// One worklist pass. Chains of three or more clusters may leave
    /// unmerged fragments.
    SinglePass,
}

/// Parameters for layout reconstruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParams {
    /// Neighbourhood radius for grouping words into clusters, measured with
    /// the weighted corner-to-corner distance.
    pub word_cluster_eps: f64,

    /// Neighbourhood radius for grouping clusters into columns, measured
    /// between cluster centroids.
    pub column_cluster_eps: f64,

    /// Scale factors (width, height) applied to every word box about its
    /// centre before clustering. `(1.0, 1.0)` leaves boxes untouched.
    pub extend_word_coordinates: (f64, f64),

    /// Weights (x, y) of the word-level distance.
    pub word_distance_weights: (f64, f64),

    /// Weights (x, y) of the column-level centroid distance.
    pub column_distance_weights: (f64, f64),

    pub merge_mode: MergeMode,

    pub debug: DebugParams,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            word_cluster_eps: DEFAULT_WORD_CLUSTER_EPS,
            column_cluster_eps: DEFAULT_COLUMN_CLUSTER_EPS,
            extend_word_coordinates: (1.0, 1.0),
            word_distance_weights: (1.0, 1.0),
            column_distance_weights: (1.0, 1.0),
            merge_mode: MergeMode::Converge,
            debug: DebugParams::default(),
        }
    }
}

impl LayoutParams {
    /// Checks that radii, weights and scale factors are usable.
    pub fn validate(&self) -> Result<()> {
        positive("word_cluster_eps", self.word_cluster_eps)?;
        positive("column_cluster_eps", self.column_cluster_eps)?;
        positive("extend_word_coordinates.x", self.extend_word_coordinates.0)?;
        positive("extend_word_coordinates.y", self.extend_word_coordinates.1)?;
        positive("word_distance_weights.x", self.word_distance_weights.0)?;
        positive("word_distance_weights.y", self.word_distance_weights.1)?;
        positive("column_distance_weights.x", self.column_distance_weights.0)?;
        positive("column_distance_weights.y", self.column_distance_weights.1)?;
        if self.debug.dpi == 0 {
            return Err(LayoutError::InvalidParams(
                "debug.dpi must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Loads parameters from a JSON document. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }
}

fn positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LayoutError::InvalidParams(format!(
            "{name} must be a positive finite number, got {value}"
        )))
    }
}

/// Switches for the debug overlay images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugParams {
    /// Write one overlay image per processed page.
    pub images: bool,
    pub words: bool,
    pub clusters: bool,
    pub columns: bool,
    /// Directory receiving `page_<n>.png`.
    pub output_dir: PathBuf,
    /// Raster resolution. Page coordinates are in points (1/72 in).
    pub dpi: u32,
    pub word_color: [u8; 4],
    pub cluster_color: [u8; 4],
    pub column_color: [u8; 4],
}

impl Default for DebugParams {
    fn default() -> Self {
        Self {
            images: false,
            words: false,
            clusters: true,
            columns: false,
            output_dir: PathBuf::from("output"),
            dpi: DEFAULT_DPI,
            word_color: [255, 165, 0, 255],
            cluster_color: [0, 128, 0, 255],
            column_color: [0, 0, 255, 255],
        }
    }
}
