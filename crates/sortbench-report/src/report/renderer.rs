use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::RenderConfig;
use crate::data_handling::BenchmarkTable;
use crate::error::ReportError;
use crate::report::plan::{plan_report, ArrayTypePlan};
use crate::report::plots::{draw_threshold_chart, draw_times_chart, ChartGeometry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// `<array_type>_times.png`
    Times,
    /// `<array_type>_threshold.png`
    Threshold,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedChart {
    pub array_type: String,
    pub kind: ChartKind,
    pub path: PathBuf,
    pub geometry: ChartGeometry,
}

/// Files written by one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderSummary {
    pub output_dir: PathBuf,
    pub array_types: Vec<String>,
    pub charts: Vec<RenderedChart>,
}

impl RenderSummary {
    pub fn count(&self, kind: ChartKind) -> usize {
        self.charts.iter().filter(|c| c.kind == kind).count()
    }

    pub fn paths(&self) -> Vec<&Path> {
        self.charts.iter().map(|c| c.path.as_path()).collect()
    }

    /// One-line message printed when the run finishes.
    pub fn completion_message(&self) -> String {
        let types = if self.array_types.is_empty() {
            "none".to_string()
        } else {
            self.array_types.join("/")
        };
        format!(
            "Done: saved *_times.png and *_threshold.png for {} into {}",
            types,
            self.output_dir.display()
        )
    }
}

/// Renders the PNG charts of a benchmark table into one output directory.
#[derive(Debug, Clone, Default)]
pub struct ReportRenderer {
    config: RenderConfig,
}

impl ReportRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Plan and draw every chart of `table`.
    pub fn render(&self, table: &BenchmarkTable) -> Result<RenderSummary> {
        let plans = plan_report(table);
        self.render_plans(&plans)
    }

    /// Draw already planned charts. Nothing is written when `plans` is empty.
    pub fn render_plans(&self, plans: &[ArrayTypePlan]) -> Result<RenderSummary> {
        self.config.validate()?;
        let mut summary = RenderSummary {
            output_dir: self.config.output_dir.clone(),
            ..RenderSummary::default()
        };
        if plans.is_empty() {
            log::info!("[sortbench::render] No benchmark rows, nothing to draw");
            return Ok(summary);
        }

        self.ensure_output_dir()?;

        for plan in plans {
            let path = self.config.output_dir.join(plan.times_file_name());
            let geometry = draw_times_chart(plan, &path, &self.config)
                .with_context(|| format!("Failed to render {}", path.display()))?;
            log::info!(
                "[sortbench::render] {}: {} lines -> {}",
                plan.array_type,
                plan.times.line_count(),
                path.display()
            );
            summary.charts.push(RenderedChart {
                array_type: plan.array_type.clone(),
                kind: ChartKind::Times,
                path,
                geometry,
            });

            if plan.thresholds.is_some() {
                let path = self.config.output_dir.join(plan.threshold_file_name());
                let geometry = draw_threshold_chart(plan, &path, &self.config)
                    .with_context(|| format!("Failed to render {}", path.display()))?;
                log::info!(
                    "[sortbench::render] {}: threshold chart -> {}",
                    plan.array_type,
                    path.display()
                );
                summary.charts.push(RenderedChart {
                    array_type: plan.array_type.clone(),
                    kind: ChartKind::Threshold,
                    path,
                    geometry,
                });
            } else {
                log::info!(
                    "[sortbench::render] {}: no hybrid rows, threshold chart skipped",
                    plan.array_type
                );
            }

            summary.array_types.push(plan.array_type.clone());
        }

        Ok(summary)
    }

    fn ensure_output_dir(&self) -> Result<()> {
        let dir = &self.config.output_dir;
        std::fs::create_dir_all(dir)
            .map_err(|e| {
                log::error!("[sortbench::render] Cannot create {}: {}", dir.display(), e);
                ReportError::OutputUnwritable(dir.clone())
            })?;
        let readonly = std::fs::metadata(dir)
            .map(|m| m.permissions().readonly())
            .unwrap_or(true);
        if readonly {
            return Err(ReportError::OutputUnwritable(dir.clone()).into());
        }
        Ok(())
    }
}
