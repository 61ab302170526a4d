// src/plot_functions/plot_residuals.rs

use std::error::Error;
use std::path::Path;

use ndarray::Array1;

use crate::config::ImageFormat;
use crate::constants::{COLOR_FIT_DEGREE, LINE_WIDTH_PLOT};
use crate::data_analysis::polyfit::PolynomialFit;
use crate::plot_framework::{render_figure, PlotConfig, PlotSeries};

/// "1st", "2nd", "3rd", "4th", ...
pub fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// Residuals of each fit, plotted against the time-remaining axis.
pub fn residuals_config(
    time_remaining: &Array1<f64>,
    fits: &[PolynomialFit],
    title: &str,
) -> Option<PlotConfig> {
    let series = fits
        .iter()
        .enumerate()
        .map(|(i, fit)| {
            PlotSeries::from_arrays(
                time_remaining,
                &fit.residuals,
                format!("Residuals {} order", ordinal(fit.degree)),
                *COLOR_FIT_DEGREE[i % COLOR_FIT_DEGREE.len()],
                LINE_WIDTH_PLOT,
            )
        })
        .collect();

    PlotConfig::fitted_to_data(title, series, "Time remaining (s)", "Residuals (s)")
}

pub fn plot_residuals(
    time_remaining: &Array1<f64>,
    fits: &[PolynomialFit],
    root_name: &str,
    output_path: &Path,
    image_format: ImageFormat,
) -> Result<(), Box<dyn Error>> {
    let title = format!("Residuals x Time, file={root_name}");
    let panel = residuals_config(time_remaining, fits, &title);
    render_figure(output_path, image_format, root_name, "Residuals", &[panel])
}


// src/plot_functions/plot_residuals.rs
