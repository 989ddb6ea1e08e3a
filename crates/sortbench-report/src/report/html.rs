//! Interactive HTML report with the same charts as the PNG output.
use std::path::Path;

use anyhow::{Context, Result};
use maud::{html, Markup, PreEscaped, DOCTYPE};
use plotly::common::{Line, Mode};
use plotly::layout::{Axis, AxisType, Layout};
use plotly::{Plot, Scatter};

use crate::report::plan::{file_stem, ArrayTypePlan};

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.12.1.min.js";

/// Plotly version of the time-vs-size chart.
pub fn times_plot(plan: &ArrayTypePlan) -> Plot {
    let mut plot = Plot::new();

    if !plan.times.merge.is_empty() {
        let (x, y): (Vec<u64>, Vec<f64>) = plan.times.merge.iter().copied().unzip();
        plot.add_trace(
            Scatter::new(x, y)
                .name("merge")
                .mode(Mode::LinesMarkers)
                .line(Line::new().width(2.0)),
        );
    }

    for (threshold, points) in &plan.times.hybrid {
        let (x, y): (Vec<u64>, Vec<f64>) = points.iter().copied().unzip();
        plot.add_trace(
            Scatter::new(x, y)
                .name(format!("hybrid (t={})", threshold).as_str())
                .mode(Mode::LinesMarkers)
                .opacity(0.8)
                .line(Line::new().width(1.0)),
        );
    }

    plot.set_layout(
        Layout::new()
            .title(plan.times_title().as_str())
            .x_axis(Axis::new().title("Array size, n"))
            .y_axis(Axis::new().title("Time, µs")),
    );
    plot
}

/// Plotly version of the threshold chart, `None` when the chart is skipped.
pub fn threshold_plot(plan: &ArrayTypePlan) -> Option<Plot> {
    let means = plan.thresholds.as_ref()?;
    let x: Vec<i64> = means.iter().map(|m| m.threshold).collect();
    let y: Vec<f64> = means.iter().map(|m| m.mean_time).collect();

    let mut plot = Plot::new();
    plot.add_trace(
        Scatter::new(x, y)
            .name("hybrid mean")
            .mode(Mode::LinesMarkers),
    );
    plot.set_layout(
        Layout::new()
            .title(plan.threshold_title().as_str())
            .x_axis(Axis::new().title("Insertion threshold").type_(AxisType::Log))
            .y_axis(Axis::new().title("Mean time, µs")),
    );
    Some(plot)
}

fn summary_table(plans: &[ArrayTypePlan]) -> Markup {
    html! {
        table {
            thead {
                tr {
                    th { "Array type" }
                    th { "Rows" }
                    th { "Merge points" }
                    th { "Hybrid thresholds" }
                }
            }
            tbody {
                @for plan in plans {
                    tr {
                        td { (plan.title) }
                        td { (plan.rows) }
                        td { (plan.times.merge.len()) }
                        td {
                            (plan.times.hybrid.keys().map(|t| t.to_string()).collect::<Vec<_>>().join(", "))
                        }
                    }
                }
            }
        }
    }
}

/// Build the full report page.
pub fn build_html_report(plans: &[ArrayTypePlan], generated_at: &str) -> String {
    let markup = html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { "Merge vs hybrid sort benchmark" }
                script src=(PLOTLY_CDN) {}
            }
            body {
                h1 { "Merge vs hybrid sort benchmark" }
                p { "Generated " (generated_at) }
                @if plans.is_empty() {
                    p { "No benchmark rows found." }
                } @else {
                    (summary_table(plans))
                }
                @for plan in plans {
                    h2 { (plan.title) }
                    (PreEscaped(times_plot(plan).to_inline_html(Some(
                        format!("{}-times", file_stem(&plan.array_type)).as_str(),
                    ))))
                    @if let Some(plot) = threshold_plot(plan) {
                        (PreEscaped(plot.to_inline_html(Some(
                            format!("{}-threshold", file_stem(&plan.array_type)).as_str(),
                        ))))
                    }
                }
            }
        }
    };
    markup.into_string()
}

/// Write the HTML report to `path`, creating its parent directory if needed.
pub fn write_html_report(plans: &[ArrayTypePlan], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create report directory: {}", parent.display()))?;
    }
    let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let page = build_html_report(plans, &generated_at);
    std::fs::write(path, page)
        .with_context(|| format!("Failed to write HTML report: {}", path.display()))?;
    log::info!("[sortbench::report] HTML report written to {}", path.display());
    Ok(())
}
