//! Chart planning and rendering.
//!
//! `plan` turns a `BenchmarkTable` into per-array-type chart plans, `plots`
//! draws the PNG charts with plotters, `html` builds the optional Plotly
//! report, and `renderer` drives the whole run.
pub mod html;
pub mod plan;
pub mod plots;
pub mod renderer;

pub use plan::{plan_report, ArrayTypePlan};
pub use renderer::{ChartKind, RenderSummary, RenderedChart, ReportRenderer};
