//! Decide which charts a table produces before anything is drawn.
use crate::data_handling::{display_title, BenchmarkTable, SizeSeries, ThresholdMean};
use crate::stats::{log_padded_range, min_max, padded_range};

/// Fraction of the data span added around linear axes.
const AXIS_PAD: f64 = 0.05;
/// Decades added around the log threshold axis.
const LOG_AXIS_PAD: f64 = 0.1;

/// Everything needed to draw the charts of one array type.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayTypePlan {
    pub array_type: String,
    pub title: String,
    pub rows: usize,
    pub times: SizeSeries,
    /// Per-threshold means, `None` when the threshold chart is skipped.
    pub thresholds: Option<Vec<ThresholdMean>>,
}

pub type AxisRanges = ((f64, f64), (f64, f64));

impl ArrayTypePlan {
    pub fn times_file_name(&self) -> String {
        format!("{}_times.png", file_stem(&self.array_type))
    }

    pub fn threshold_file_name(&self) -> String {
        format!("{}_threshold.png", file_stem(&self.array_type))
    }

    pub fn times_title(&self) -> String {
        format!("{} — time vs array size n", self.title)
    }

    pub fn threshold_title(&self) -> String {
        format!("{} — threshold impact", self.title)
    }

    /// Axis ranges of the time-vs-size chart: `(x, y)`.
    pub fn times_ranges(&self) -> Option<AxisRanges> {
        let (x_min, x_max) = min_max(self.times.points().map(|&(n, _)| n as f64))?;
        let (y_min, y_max) = min_max(self.times.points().map(|&(_, t)| t))?;
        Some((
            padded_range(x_min, x_max, AXIS_PAD),
            padded_range(y_min, y_max, AXIS_PAD),
        ))
    }

    /// Axis ranges of the threshold chart; the x range is log10 scaled.
    ///
    /// The x range covers the positive thresholds only. Without any, it spans
    /// the decade `1..=10`.
    pub fn threshold_ranges(&self) -> Option<AxisRanges> {
        let means = self.thresholds.as_ref()?;
        let (y_min, y_max) = min_max(means.iter().map(|m| m.mean_time))?;
        let (x_min, x_max) = min_max(
            means
                .iter()
                .filter(|m| m.threshold > 0)
                .map(|m| m.threshold as f64),
        )
        .unwrap_or((1.0, 10.0));
        Some((
            log_padded_range(x_min, x_max, LOG_AXIS_PAD),
            padded_range(y_min, y_max, AXIS_PAD),
        ))
    }

    /// Points `(threshold, mean)` of the threshold chart.
    ///
    /// Thresholds that cannot sit on a log axis are clipped to its lower edge.
    pub fn threshold_points(&self) -> Option<Vec<(f64, f64)>> {
        let means = self.thresholds.as_ref()?;
        let ((x_floor, _), _) = self.threshold_ranges()?;
        Some(
            means
                .iter()
                .map(|m| {
                    let x = if m.threshold > 0 { m.threshold as f64 } else { x_floor };
                    (x, m.mean_time)
                })
                .collect(),
        )
    }
}

/// Plan the charts for every array type present in `table`.
///
/// Array types without rows never appear. The threshold chart is planned iff
/// the array type has at least one hybrid row.
pub fn plan_report(table: &BenchmarkTable) -> Vec<ArrayTypePlan> {
    table
        .array_types()
        .into_iter()
        .filter_map(|array_type| {
            let times = table.size_series(&array_type);
            if times.is_empty() {
                return None;
            }

            let means = table.threshold_means(&array_type);
            let clipped = means.iter().filter(|m| m.threshold <= 0).count();
            if clipped > 0 {
                log::warn!(
                    "[sortbench::plan] {}: {} non-positive thresholds clipped to the log axis edge",
                    array_type,
                    clipped
                );
            }
            let thresholds = if means.is_empty() { None } else { Some(means) };

            Some(ArrayTypePlan {
                title: display_title(&array_type),
                rows: table.row_count(&array_type),
                array_type,
                times,
                thresholds,
            })
        })
        .collect()
}

/// File name stem for an array type label; anything outside `[A-Za-z0-9_-]` becomes `_`.
pub fn file_stem(array_type: &str) -> String {
    array_type
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
