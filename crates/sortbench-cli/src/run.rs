use anyhow::Result;

use sortbench_report::io::read_results_csv;
use sortbench_report::report::html::write_html_report;
use sortbench_report::report::{plan_report, RenderSummary, ReportRenderer};

use crate::input::RunConfig;

/// Load the results table, draw every chart and, if configured, the HTML report.
pub fn run_report(config: &RunConfig) -> Result<RenderSummary> {
    log::info!(
        "[sortbench::run] Reading benchmark results from {}",
        config.input.display()
    );
    let table = read_results_csv(&config.input)?;
    table.log_input_data_summary();

    let plans = plan_report(&table);
    let summary = ReportRenderer::new(config.render.clone()).render_plans(&plans)?;

    if let Some(report_path) = &config.html_report {
        write_html_report(&plans, report_path)?;
    }

    log::info!(
        "[sortbench::run] {} charts written to {}",
        summary.charts.len(),
        summary.output_dir.display()
    );
    Ok(summary)
}
