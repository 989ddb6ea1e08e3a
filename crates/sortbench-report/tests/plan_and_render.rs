//! Integration tests for chart planning and PNG rendering.

use sortbench_report::config::{FigureSize, RenderConfig};
use sortbench_report::data_handling::{BenchmarkRecord, BenchmarkTable};
use sortbench_report::error::ReportError;
use sortbench_report::report::plan::file_stem;
use sortbench_report::report::{plan_report, ChartKind, ReportRenderer};

fn scenario_table() -> BenchmarkTable {
    BenchmarkTable::new(vec![
        BenchmarkRecord::merge("random", 100, 10.0),
        BenchmarkRecord::merge("random", 200, 22.0),
        BenchmarkRecord::hybrid("random", 16, 100, 8.0),
        BenchmarkRecord::hybrid("random", 32, 100, 9.0),
    ])
}

fn small_config(dir: &std::path::Path) -> RenderConfig {
    RenderConfig::new(dir).with_dpi(50)
}

// ---------------------------------------------------------------------------
// Planning
// ---------------------------------------------------------------------------

#[test]
fn plan_for_scenario() {
    let plans = plan_report(&scenario_table());
    assert_eq!(plans.len(), 1);

    let plan = &plans[0];
    assert_eq!(plan.array_type, "random");
    assert_eq!(plan.title, "Random");
    assert_eq!(plan.rows, 4);
    assert_eq!(plan.times_file_name(), "random_times.png");
    assert_eq!(plan.threshold_file_name(), "random_threshold.png");
    assert_eq!(plan.times.merge.len(), 2);
    assert_eq!(plan.times.hybrid.len(), 2);

    let thresholds = plan.thresholds.as_ref().unwrap();
    let xs: Vec<i64> = thresholds.iter().map(|m| m.threshold).collect();
    assert_eq!(xs, vec![16, 32]);
    assert!((thresholds[0].mean_time - 8.0).abs() < 1e-12);
    assert!((thresholds[1].mean_time - 9.0).abs() < 1e-12);
}

#[test]
fn plan_merge_only_skips_threshold_chart() {
    let table = BenchmarkTable::new(vec![
        BenchmarkRecord::merge("reversed", 100, 5.0),
        BenchmarkRecord::merge("reversed", 200, 11.0),
    ]);
    let plans = plan_report(&table);
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0].times.line_count(), 1);
    assert!(plans[0].thresholds.is_none());
}

#[test]
fn plan_hybrid_only_has_no_merge_line() {
    let table = BenchmarkTable::new(vec![BenchmarkRecord::hybrid("almost", 10, 100, 3.0)]);
    let plans = plan_report(&table);
    assert!(plans[0].times.merge.is_empty());
    assert_eq!(plans[0].times.line_count(), 1);
    assert!(plans[0].thresholds.is_some());
}

#[test]
fn plan_clips_non_positive_thresholds_to_axis_edge() {
    let table = BenchmarkTable::new(vec![
        BenchmarkRecord::hybrid("random", 0, 100, 3.0),
        BenchmarkRecord::hybrid("random", 8, 100, 2.0),
        BenchmarkRecord::hybrid("reversed", 0, 100, 3.0),
        BenchmarkRecord::hybrid("reversed", -4, 100, 5.0),
    ]);
    let plans = plan_report(&table);
    assert_eq!(plans.len(), 2);

    let random = plans.iter().find(|p| p.array_type == "random").unwrap();
    assert_eq!(random.thresholds.as_ref().unwrap().len(), 2);
    let (x, _) = random.threshold_ranges().unwrap();
    assert!(x.0 > 0.0 && x.0 < 8.0 && x.1 > 8.0);
    let points = random.threshold_points().unwrap();
    assert_eq!(points, vec![(x.0, 3.0), (8.0, 2.0)]);

    let reversed = plans.iter().find(|p| p.array_type == "reversed").unwrap();
    assert_eq!(reversed.thresholds.as_ref().unwrap().len(), 2);
    let (x, _) = reversed.threshold_ranges().unwrap();
    assert!(x.0 > 0.0 && x.0 < 1.0 && x.1 > 10.0);
    let points = reversed.threshold_points().unwrap();
    assert!(points.iter().all(|&(px, _)| px == x.0));
}

#[test]
fn plan_counts_match_distinct_types() {
    let table = BenchmarkTable::new(vec![
        BenchmarkRecord::merge("random", 100, 1.0),
        BenchmarkRecord::merge("reversed", 100, 1.0),
        BenchmarkRecord::hybrid("reversed", 5, 100, 1.0),
        BenchmarkRecord::merge("almost", 100, 1.0),
    ]);
    let plans = plan_report(&table);
    assert_eq!(plans.len(), table.array_types().len());
    assert_eq!(plans.iter().filter(|p| p.thresholds.is_some()).count(), 1);
}

#[test]
fn plan_of_empty_table_is_empty() {
    assert!(plan_report(&BenchmarkTable::default()).is_empty());
}

#[test]
fn axis_ranges_are_stable_and_cover_data() {
    let first = plan_report(&scenario_table());
    let second = plan_report(&scenario_table());

    let (x, y) = first[0].times_ranges().unwrap();
    assert_eq!(Some((x, y)), second[0].times_ranges());
    assert!(x.0 < 100.0 && x.1 > 200.0);
    assert!(y.0 < 8.0 && y.1 > 22.0);

    let (tx, ty) = first[0].threshold_ranges().unwrap();
    assert_eq!(Some((tx, ty)), second[0].threshold_ranges());
    assert!(tx.0 > 0.0 && tx.0 < 16.0 && tx.1 > 32.0);
    assert!(ty.0 < 8.0 && ty.1 > 9.0);
}

#[test]
fn figure_pixels_follow_dpi() {
    let config = RenderConfig::default();
    assert_eq!(config.times_figure.pixels(config.dpi), (2000, 1200));
    assert_eq!(config.threshold_figure.pixels(config.dpi), (1600, 1000));
    assert_eq!(FigureSize::new(1.0, 0.001).pixels(100), (100, 1));
}

#[test]
fn file_stem_replaces_path_characters() {
    assert_eq!(file_stem("random"), "random");
    assert_eq!(file_stem("../etc"), "___etc");
    assert_eq!(file_stem("almost sorted"), "almost_sorted");
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

#[test]
fn render_scenario_writes_both_charts() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("plots");
    let renderer = ReportRenderer::new(small_config(&out));

    let summary = renderer.render(&scenario_table()).unwrap();
    assert_eq!(summary.count(ChartKind::Times), 1);
    assert_eq!(summary.count(ChartKind::Threshold), 1);
    assert!(out.join("random_times.png").is_file());
    assert!(out.join("random_threshold.png").is_file());
    assert_eq!(summary.array_types, vec!["random"]);

    let times = &summary.charts[0];
    assert_eq!(times.kind, ChartKind::Times);
    assert_eq!(times.geometry.pixels, (500, 300));
    assert!(!times.geometry.log_x);
    let threshold = &summary.charts[1];
    assert_eq!(threshold.geometry.pixels, (400, 250));
    assert!(threshold.geometry.log_x);
}

#[test]
fn render_merge_only_skips_threshold_file() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = ReportRenderer::new(small_config(dir.path()));
    let table = BenchmarkTable::new(vec![
        BenchmarkRecord::merge("reversed", 100, 5.0),
        BenchmarkRecord::merge("reversed", 200, 11.0),
    ]);

    let summary = renderer.render(&table).unwrap();
    assert_eq!(summary.charts.len(), 1);
    assert!(dir.path().join("reversed_times.png").is_file());
    assert!(!dir.path().join("reversed_threshold.png").exists());
}

#[test]
fn render_twice_overwrites_with_same_geometry() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = ReportRenderer::new(small_config(dir.path()));

    let first = renderer.render(&scenario_table()).unwrap();
    let second = renderer.render(&scenario_table()).unwrap();
    assert_eq!(first.paths(), second.paths());
    for (a, b) in first.charts.iter().zip(&second.charts) {
        assert_eq!(a.geometry, b.geometry);
    }
    let pngs = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(pngs, 2);
}

#[test]
fn render_empty_table_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("plots");
    let renderer = ReportRenderer::new(small_config(&out));

    let summary = renderer.render(&BenchmarkTable::default()).unwrap();
    assert!(summary.charts.is_empty());
    assert!(!out.exists());
    assert!(summary.completion_message().contains("none"));
}

#[test]
fn render_zero_threshold_writes_threshold_chart() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = ReportRenderer::new(small_config(dir.path()));
    let table = BenchmarkTable::new(vec![
        BenchmarkRecord::merge("random", 100, 10.0),
        BenchmarkRecord::hybrid("random", 0, 100, 8.0),
    ]);

    let summary = renderer.render(&table).unwrap();
    assert_eq!(summary.count(ChartKind::Threshold), 1);
    assert!(dir.path().join("random_times.png").is_file());
    assert!(dir.path().join("random_threshold.png").is_file());
}

#[test]
fn render_rejects_out_of_range_settings() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("plots");

    let zero_dpi = ReportRenderer::new(RenderConfig::new(&out).with_dpi(0));
    let err = zero_dpi.render(&scenario_table()).unwrap_err();
    let kind = err.chain().find_map(|e| e.downcast_ref::<ReportError>());
    assert!(matches!(kind, Some(ReportError::InvalidConfig(_))));

    let huge_dpi = ReportRenderer::new(RenderConfig::new(&out).with_dpi(u32::MAX));
    assert!(huge_dpi.render(&scenario_table()).is_err());

    let mut flat = RenderConfig::new(&out).with_dpi(50);
    flat.threshold_figure = FigureSize::new(8.0, 0.0);
    assert!(ReportRenderer::new(flat).render(&scenario_table()).is_err());

    assert!(!out.exists());
}

#[test]
fn default_settings_validate() {
    assert!(RenderConfig::default().validate().is_ok());
    assert!(RenderConfig::default().with_dpi(1200).validate().is_ok());
    assert!(RenderConfig::default().with_dpi(1201).validate().is_err());
}

#[test]
fn render_into_file_path_is_output_unwritable() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not_a_dir");
    std::fs::write(&blocker, b"x").unwrap();
    let renderer = ReportRenderer::new(small_config(&blocker));

    let err = renderer.render(&scenario_table()).unwrap_err();
    let kind = err.chain().find_map(|e| e.downcast_ref::<ReportError>());
    assert!(matches!(kind, Some(ReportError::OutputUnwritable(_))));
}

#[test]
fn completion_message_lists_types() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = ReportRenderer::new(small_config(dir.path()));
    let table = BenchmarkTable::new(vec![
        BenchmarkRecord::merge("almost", 100, 1.0),
        BenchmarkRecord::merge("random", 100, 1.0),
    ]);
    let summary = renderer.render(&table).unwrap();
    let message = summary.completion_message();
    assert!(message.starts_with("Done:"));
    assert!(message.contains("random/almost"));
}
