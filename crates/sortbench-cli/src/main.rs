use anyhow::Result;
use clap::{Arg, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;

use sortbench_cli::input::RunConfig;
use sortbench_cli::run::run_report;

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("SORTBENCH_LOG", "error,sortbench=info"))
        .init();

    let matches = Command::new("sortbench")
        .version(clap::crate_version!())
        .about("Charts comparing merge sort and hybrid merge/insertion sort benchmark results")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to a JSON configuration file. Command line options override it.")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .help("Benchmark results table (*.csv or *.tsv). Defaults to results_a2.csv.")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("output_dir")
                .short('o')
                .long("output-dir")
                .help("Directory receiving the PNG charts. Defaults to plots.")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::DirPath),
        )
        .arg(
            Arg::new("dpi")
                .long("dpi")
                .help("Raster resolution of the PNG charts. Defaults to 200.")
                .value_parser(clap::value_parser!(u32).range(1..=1200)),
        )
        .arg(
            Arg::new("report")
                .long("report")
                .help("Also write an interactive HTML report to this path.")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Version {version}\n\n\
             {all-args}{after-help}",
        )
        .get_matches();

    let config = RunConfig::from_arguments(&matches)?;

    match run_report(&config) {
        Ok(summary) => {
            println!("{}", summary.completion_message());
            Ok(())
        }
        Err(e) => {
            log::error!("Report failed: {:#}", e);
            std::process::exit(1)
        }
    }
}
