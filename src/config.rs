use std::path::PathBuf;

use crate::data::model::Feature;

// ---------------------------------------------------------------------------
// Report configuration
// ---------------------------------------------------------------------------

/// Where the report binaries write and what they summarize.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    /// Directory receiving `correlations.csv` and `statistics.csv`.
    pub output_dir: PathBuf,
    /// Column summarized per species by the statistics report.
    pub feature: Feature,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("dist"),
            feature: Feature::SepalWidth,
        }
    }
}

impl ReportConfig {
    pub fn correlations_path(&self) -> PathBuf {
        self.output_dir.join("correlations.csv")
    }

    pub fn statistics_path(&self) -> PathBuf {
        self.output_dir.join("statistics.csv")
    }
}

// ---------------------------------------------------------------------------
// Viewer configuration
// ---------------------------------------------------------------------------

/// Camera angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewAngle {
    pub elev: f64,
    pub azim: f64,
}

/// Fixed layout and sampling constants of the chart viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    /// Bin count of the 1D histograms.
    pub histogram_bins: usize,
    /// Bins per axis of the 3D histogram.
    pub histogram_3d_bins: usize,
    /// Fixed (x, y) ranges of the 3D histogram: petal length, sepal length.
    pub histogram_3d_range: [(f64, f64); 2],
    pub histogram_3d_view: ViewAngle,
    /// Points on each density curve.
    pub density_grid: usize,
    pub scatter_3d_views: [ViewAngle; 2],
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window_size: [1200.0, 800.0],
            min_window_size: [600.0, 400.0],
            histogram_bins: 35,
            histogram_3d_bins: 35,
            histogram_3d_range: [(0.0, 7.0), (4.0, 8.0)],
            histogram_3d_view: ViewAngle {
                elev: 45.0,
                azim: -60.0,
            },
            density_grid: 200,
            scatter_3d_views: [
                ViewAngle {
                    elev: 15.0,
                    azim: 40.0,
                },
                ViewAngle {
                    elev: 70.0,
                    azim: 40.0,
                },
            ],
        }
    }
}
