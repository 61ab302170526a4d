// src/pipeline.rs
//
// One run: load, fit raw voltage, archive, smooth, refit, render. Strictly
// sequential; the first failure ends the run.

use std::error::Error;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::info;

use crate::config::{AnalysisConfig, ImageFormat};
use crate::constants::{COLOR_FILTERED, COLOR_MEASURED};
use crate::data_analysis::discharge_fit::{analyze_raw, analyze_smoothed, voltage_grid, RawAnalysis};
use crate::data_input::log_parser::parse_discharge_log;
use crate::fit_archive::{append_records, archive_path, FitRecord, FitSeries};
use crate::plot_functions::plot_filtered_comparison::plot_filtered_comparison;
use crate::plot_functions::plot_fit_overlay::plot_fit_overlay;
use crate::plot_functions::plot_reference_curve::{plot_corrected_reference, plot_reference_curve};
use crate::plot_functions::plot_residuals::plot_residuals;

/// Chart files written for one input log, all next to the input.
#[derive(Debug, Clone, PartialEq)]
pub struct FigurePaths {
    pub fit_overlay: PathBuf,
    pub residuals: PathBuf,
    pub filtered_comparison: PathBuf,
    pub filtered_fit_overlay: PathBuf,
    pub filtered_residuals: PathBuf,
    pub reference_curve: PathBuf,
    pub corrected_reference: PathBuf,
}

impl FigurePaths {
    pub fn for_input(input_path: &Path, image_format: ImageFormat) -> Self {
        let root_name = root_name(input_path);
        let ext = image_format.extension();
        let path = |suffix: &str| input_path.with_file_name(format!("{root_name}{suffix}.{ext}"));
        Self {
            fit_overlay: path(""),
            residuals: path("_res"),
            filtered_comparison: path("_filtered"),
            filtered_fit_overlay: path("_filtered_fit"),
            filtered_residuals: path("_filtered_res"),
            reference_curve: path("_reference"),
            corrected_reference: path("_corrected"),
        }
    }

    pub fn all(&self) -> [&Path; 7] {
        [
            self.fit_overlay.as_path(),
            self.residuals.as_path(),
            self.filtered_comparison.as_path(),
            self.filtered_fit_overlay.as_path(),
            self.filtered_residuals.as_path(),
            self.reference_curve.as_path(),
            self.corrected_reference.as_path(),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub sample_count: usize,
    pub dropped_rows: usize,
    pub archive_path: PathBuf,
    pub figures: FigurePaths,
}

fn root_name(input_path: &Path) -> String {
    input_path
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned()
}

/// Archive records for the raw-voltage fits of one run.
pub fn raw_fit_records(raw: &RawAnalysis, robot: &str, source: &str) -> Vec<FitRecord> {
    let created_at = Utc::now();
    raw.fits
        .iter()
        .map(|fit| FitRecord::from_fit(robot, source, FitSeries::Raw, fit, created_at))
        .collect()
}

/// Runs the whole analysis for `input_path`, appending raw fits to
/// `fits_<robot>.jsonl` in `archive_dir`.
pub fn run_analysis(
    input_path: &Path,
    robot: &str,
    config: &AnalysisConfig,
    archive_dir: &Path,
) -> Result<RunSummary, Box<dyn Error>> {
    let root_name = root_name(input_path);
    let image_format = config.output.image_format;
    let figures = FigurePaths::for_input(input_path, image_format);
    let grid = voltage_grid(&config.fit);

    let log = parse_discharge_log(input_path, config.loader.max_voltage_mv)?;
    let raw = analyze_raw(&log, config)?;

    let archive = archive_path(archive_dir, robot);
    append_records(&archive, &raw_fit_records(&raw, robot, &input_path.to_string_lossy()))?;

    plot_fit_overlay(
        &raw.voltage_mv,
        &raw.time_remaining,
        &raw.fits,
        &grid,
        *COLOR_MEASURED,
        &root_name,
        &figures.fit_overlay,
        image_format,
    )?;
    plot_residuals(
        &raw.time_remaining,
        &raw.fits,
        &root_name,
        &figures.residuals,
        image_format,
    )?;

    let smoothed = analyze_smoothed(&raw, config)?;

    plot_filtered_comparison(
        &raw.voltage_mv,
        &smoothed.filtered_mv,
        &raw.time_remaining,
        &root_name,
        &figures.filtered_comparison,
        image_format,
    )?;
    plot_fit_overlay(
        &smoothed.filtered_mv,
        &raw.time_remaining,
        &smoothed.fits,
        &grid,
        *COLOR_FILTERED,
        &root_name,
        &figures.filtered_fit_overlay,
        image_format,
    )?;
    plot_residuals(
        &raw.time_remaining,
        &smoothed.fits,
        &root_name,
        &figures.filtered_residuals,
        image_format,
    )?;
    plot_reference_curve(
        &smoothed.filtered_mv,
        &raw.time_remaining,
        &smoothed.corrected_reference,
        &root_name,
        &figures.reference_curve,
        image_format,
    )?;
    plot_corrected_reference(
        &smoothed.filtered_mv,
        &raw.time_remaining,
        &smoothed.corrected_reference,
        &root_name,
        &figures.corrected_reference,
        image_format,
    )?;

    info!("Analysis of '{}' complete", input_path.display());
    Ok(RunSummary {
        sample_count: log.len(),
        dropped_rows: log.dropped_rows,
        archive_path: archive,
        figures,
    })
}


// src/pipeline.rs
