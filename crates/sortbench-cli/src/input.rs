use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ArgMatches;
use serde::{Deserialize, Serialize};

use sortbench_report::config::RenderConfig;

/// Settings of one `sortbench` run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Benchmark results table.
    pub input: PathBuf,
    /// Optional interactive HTML report.
    pub html_report: Option<PathBuf>,
    pub render: RenderConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            input: PathBuf::from("results_a2.csv"),
            html_report: None,
            render: RenderConfig::default(),
        }
    }
}

impl RunConfig {
    /// Start from the JSON config given with `--config` (or the defaults) and
    /// apply the command line overrides.
    pub fn from_arguments(matches: &ArgMatches) -> Result<Self> {
        let mut config = match matches.get_one::<PathBuf>("config") {
            Some(config_path) => {
                log::info!("[sortbench::config] Using config: {:?}", config_path);
                load_run_config(config_path)?
            }
            None => RunConfig::default(),
        };

        if let Some(input) = matches.get_one::<PathBuf>("input") {
            config.input = input.clone();
        }

        if let Some(output_dir) = matches.get_one::<PathBuf>("output_dir") {
            config.render.output_dir = output_dir.clone();
        }

        if let Some(dpi) = matches.get_one::<u32>("dpi") {
            config.render.dpi = *dpi;
        }

        if let Some(report) = matches.get_one::<PathBuf>("report") {
            config.html_report = Some(report.clone());
        }

        validate_tsv_or_csv_file(&config.input)?;
        config.render.validate()?;
        Ok(config)
    }
}

/// Load a run configuration from a JSON file. Missing fields take their defaults.
pub fn load_run_config<P: AsRef<Path>>(path: P) -> Result<RunConfig> {
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let config: RunConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    Ok(config)
}

/// Reject result files that are neither CSV nor TSV.
///
/// Existence is checked by the reader so that a missing file reports as such.
pub fn validate_tsv_or_csv_file(path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase());
    match ext.as_deref() {
        Some("tsv") | Some("csv") => Ok(()),
        _ => anyhow::bail!("File must have a .tsv or .csv extension: {}", path.display()),
    }
}
