use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ReportError;

/// Accepted DPI range, matching the `--dpi` flag.
pub const DPI_RANGE: std::ops::RangeInclusive<u32> = 1..=1200;
/// Largest accepted edge of a rendered PNG, in pixels.
pub const MAX_PIXELS: u32 = 20_000;

/// Figure size in inches. Pixel size is `inches * dpi`.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct FigureSize {
    pub width: f64,
    pub height: f64,
}

impl FigureSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn pixels(&self, dpi: u32) -> (u32, u32) {
        let dpi = f64::from(dpi);
        (
            (self.width * dpi).round().max(1.0) as u32,
            (self.height * dpi).round().max(1.0) as u32,
        )
    }
}

/// Output settings for the PNG charts.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Directory receiving `<array_type>_times.png` and `<array_type>_threshold.png`.
    pub output_dir: PathBuf,
    pub dpi: u32,
    pub times_figure: FigureSize,
    pub threshold_figure: FigureSize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("plots"),
            dpi: 200,
            times_figure: FigureSize::new(10.0, 6.0),
            threshold_figure: FigureSize::new(8.0, 5.0),
        }
    }
}

impl RenderConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Reject settings that would produce degenerate or oversized images.
    pub fn validate(&self) -> Result<(), ReportError> {
        if !DPI_RANGE.contains(&self.dpi) {
            return Err(ReportError::InvalidConfig(format!(
                "dpi {} is outside {}..={}",
                self.dpi,
                DPI_RANGE.start(),
                DPI_RANGE.end()
            )));
        }
        for (name, figure) in [
            ("times_figure", &self.times_figure),
            ("threshold_figure", &self.threshold_figure),
        ] {
            if !(figure.width.is_finite() && figure.width > 0.0)
                || !(figure.height.is_finite() && figure.height > 0.0)
            {
                return Err(ReportError::InvalidConfig(format!(
                    "{} must have a positive width and height, got {}x{}",
                    name, figure.width, figure.height
                )));
            }
            let dpi = f64::from(self.dpi);
            let max = f64::from(MAX_PIXELS);
            if figure.width * dpi > max || figure.height * dpi > max {
                return Err(ReportError::InvalidConfig(format!(
                    "{} at {} dpi exceeds {} pixels per side",
                    name, self.dpi, MAX_PIXELS
                )));
            }
        }
        Ok(())
    }

    /// Scale applied to fonts and stroke widths, relative to 100 DPI.
    pub fn scale(&self) -> f64 {
        f64::from(self.dpi.max(1)) / 100.0
    }
}
