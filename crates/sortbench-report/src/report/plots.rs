use std::path::Path;

use anyhow::{anyhow, Result};
use plotters::prelude::*;

use crate::config::RenderConfig;
use crate::report::plan::ArrayTypePlan;

// Font sizes at 100 DPI, scaled by `RenderConfig::scale`.
const TITLE_FONT_SIZE: u32 = 16;
const AXIS_LABEL_FONT_SIZE: u32 = 12;
const TICK_LABEL_FONT_SIZE: u32 = 10;
const LEGEND_FONT_SIZE: u32 = 10;

const MERGE_COLOR: RGBColor = RGBColor(31, 119, 180);

/// Colors for the hybrid lines, cycled by threshold rank.
const HYBRID_COLORS: &[RGBColor] = &[
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

/// Pixel size and axis ranges of a drawn chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartGeometry {
    pub pixels: (u32, u32),
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub log_x: bool,
}

fn scaled(value: u32, scale: f64) -> u32 {
    ((f64::from(value) * scale).round() as u32).max(1)
}

fn format_tick(value: f64) -> String {
    if value.abs() >= 1000.0 || value.fract().abs() < 1e-9 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

/// Draw the time-vs-size chart of `plan` into a PNG at `path`.
pub fn draw_times_chart(
    plan: &ArrayTypePlan,
    path: &Path,
    config: &RenderConfig,
) -> Result<ChartGeometry> {
    let (x_range, y_range) = plan
        .times_ranges()
        .ok_or_else(|| anyhow!("No points to plot for '{}'", plan.array_type))?;
    let pixels = config.times_figure.pixels(config.dpi);
    let scale = config.scale();

    let root = BitMapBackend::new(path, pixels).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            plan.times_title(),
            ("sans-serif", scaled(TITLE_FONT_SIZE, scale)),
        )
        .margin(scaled(10, scale))
        .x_label_area_size(scaled(40, scale))
        .y_label_area_size(scaled(60, scale))
        .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)?;

    chart
        .configure_mesh()
        .max_light_lines(0)
        .bold_line_style(BLACK.mix(0.15))
        .x_desc("Array size, n")
        .y_desc("Time, µs")
        .x_label_formatter(&|x| format_tick(*x))
        .y_label_formatter(&|y| format_tick(*y))
        .label_style(("sans-serif", scaled(TICK_LABEL_FONT_SIZE, scale)))
        .axis_desc_style(("sans-serif", scaled(AXIS_LABEL_FONT_SIZE, scale)))
        .draw()?;

    let marker = scaled(2, scale);

    if !plan.times.merge.is_empty() {
        let width = scaled(2, scale);
        let data: Vec<(f64, f64)> = plan.times.merge.iter().map(|&(n, t)| (n as f64, t)).collect();
        chart
            .draw_series(LineSeries::new(data.clone(), MERGE_COLOR.stroke_width(width)))?
            .label("merge")
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], MERGE_COLOR.stroke_width(width))
            });
        if data.len() == 1 {
            chart.draw_series(data.into_iter().map(|p| Circle::new(p, marker, MERGE_COLOR.filled())))?;
        }
    }

    for (rank, (threshold, points)) in plan.times.hybrid.iter().enumerate() {
        let color = HYBRID_COLORS[rank % HYBRID_COLORS.len()].mix(0.8);
        let width = scaled(1, scale);
        let data: Vec<(f64, f64)> = points.iter().map(|&(n, t)| (n as f64, t)).collect();
        chart
            .draw_series(LineSeries::new(data.clone(), color.stroke_width(width)))?
            .label(format!("hybrid (t={})", threshold))
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(width))
            });
        if data.len() == 1 {
            chart.draw_series(data.into_iter().map(|p| Circle::new(p, marker, color.filled())))?;
        }
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK.mix(0.3))
        .label_font(("sans-serif", scaled(LEGEND_FONT_SIZE, scale)))
        .draw()?;

    root.present()?;
    log::debug!("[sortbench::plots] Wrote {}", path.display());

    Ok(ChartGeometry {
        pixels,
        x_range,
        y_range,
        log_x: false,
    })
}

/// Draw the mean-time-vs-threshold chart of `plan` into a PNG at `path`.
///
/// The threshold axis is log10 scaled.
pub fn draw_threshold_chart(
    plan: &ArrayTypePlan,
    path: &Path,
    config: &RenderConfig,
) -> Result<ChartGeometry> {
    let data = plan
        .threshold_points()
        .ok_or_else(|| anyhow!("No hybrid rows to plot for '{}'", plan.array_type))?;
    let (x_range, y_range) = plan
        .threshold_ranges()
        .ok_or_else(|| anyhow!("No hybrid rows to plot for '{}'", plan.array_type))?;
    let pixels = config.threshold_figure.pixels(config.dpi);
    let scale = config.scale();

    let root = BitMapBackend::new(path, pixels).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            plan.threshold_title(),
            ("sans-serif", scaled(TITLE_FONT_SIZE, scale)),
        )
        .margin(scaled(10, scale))
        .x_label_area_size(scaled(40, scale))
        .y_label_area_size(scaled(60, scale))
        .build_cartesian_2d((x_range.0..x_range.1).log_scale(), y_range.0..y_range.1)?;

    chart
        .configure_mesh()
        .max_light_lines(0)
        .bold_line_style(BLACK.mix(0.15))
        .x_desc("Insertion threshold")
        .y_desc("Mean time, µs")
        .x_label_formatter(&|x| format_tick(*x))
        .y_label_formatter(&|y| format_tick(*y))
        .label_style(("sans-serif", scaled(TICK_LABEL_FONT_SIZE, scale)))
        .axis_desc_style(("sans-serif", scaled(AXIS_LABEL_FONT_SIZE, scale)))
        .draw()?;

    let width = scaled(1, scale);
    chart.draw_series(LineSeries::new(data.clone(), MERGE_COLOR.stroke_width(width)))?;
    chart.draw_series(
        data.into_iter()
            .map(|p| Circle::new(p, scaled(3, scale), MERGE_COLOR.filled())),
    )?;

    root.present()?;
    log::debug!("[sortbench::plots] Wrote {}", path.display());

    Ok(ChartGeometry {
        pixels,
        x_range,
        y_range,
        log_x: true,
    })
}
