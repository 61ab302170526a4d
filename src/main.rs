// src/main.rs

use std::error::Error;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueHint};
use tracing::info;
use tracing_subscriber::EnvFilter;

use battery_discharge_fit::config::AnalysisConfig;
use battery_discharge_fit::crate_version;
use battery_discharge_fit::pipeline::run_analysis;

#[derive(Parser, Debug)]
#[command(
    name = "battery-discharge-fit",
    about = "Fit voltage vs remaining-runtime polynomials to a battery discharge log",
    long_about = None
)]
struct Cli {
    /// Discharge log: space-delimited rows whose first field is `time,voltage`
    #[arg(short = 'f', long = "ifile", value_hint = ValueHint::FilePath)]
    ifile: PathBuf,

    /// Robot identifier; fits are appended to `fits_<robot>.jsonl`
    #[arg(short = 'r', long = "irobot", default_value = "")]
    irobot: String,

    /// TOML file overriding the calibration constants
    #[arg(short = 'c', long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Usage errors exit with status 2, `-h` with 0.
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    info!("battery-discharge-fit {}", crate_version());

    let config = match &cli.config {
        Some(path) => {
            info!("Loading calibration from '{}'", path.display());
            AnalysisConfig::from_toml_file(path)?
        }
        None => AnalysisConfig::default(),
    };

    let summary = run_analysis(&cli.ifile, &cli.irobot, &config, Path::new("."))?;
    info!(
        "{} samples used ({} dropped), fits archived in '{}', {} charts written",
        summary.sample_count,
        summary.dropped_rows,
        summary.archive_path.display(),
        summary.figures.all().len()
    );
    Ok(())
}


// src/main.rs
