// src/plot_functions/plot_reference_curve.rs

use std::error::Error;
use std::path::Path;

use ndarray::Array1;

use crate::config::ImageFormat;
use crate::constants::{COLOR_MEASURED, COLOR_REFERENCE, COLOR_REFERENCE_SHIFTED, LINE_WIDTH_PLOT};
use crate::data_analysis::geometric_correction::CorrectedReference;
use crate::plot_framework::{render_figure, PlotConfig, PlotSeries};

/// Stationary-robot reference polynomial against the measured runtime.
pub fn reference_curve_config(
    filtered_mv: &Array1<f64>,
    time_remaining: &Array1<f64>,
    corrected: &CorrectedReference,
    title: &str,
) -> Option<PlotConfig> {
    PlotConfig::fitted_to_data(
        title,
        vec![
            PlotSeries::from_arrays(
                filtered_mv,
                &corrected.reference,
                "Polynomial",
                *COLOR_REFERENCE,
                LINE_WIDTH_PLOT,
            ),
            PlotSeries::from_arrays(filtered_mv, time_remaining, "Real", *COLOR_MEASURED, LINE_WIDTH_PLOT),
        ],
        "Voltage (mV)",
        "Time remaining (s)",
    )
}

/// Same as [`reference_curve_config`] with the rotated/offset reference added.
pub fn corrected_reference_config(
    filtered_mv: &Array1<f64>,
    time_remaining: &Array1<f64>,
    corrected: &CorrectedReference,
    title: &str,
) -> Option<PlotConfig> {
    PlotConfig::fitted_to_data(
        title,
        vec![
            PlotSeries::from_arrays(
                filtered_mv,
                &corrected.reference,
                "Poly not moving",
                *COLOR_REFERENCE,
                LINE_WIDTH_PLOT,
            ),
            PlotSeries::from_arrays(filtered_mv, time_remaining, "Real", *COLOR_MEASURED, LINE_WIDTH_PLOT),
            PlotSeries::from_arrays(
                &corrected.shifted_x,
                &corrected.shifted_y,
                "Shifted fit",
                *COLOR_REFERENCE_SHIFTED,
                LINE_WIDTH_PLOT,
            ),
        ],
        "Voltage (mV)",
        "Time available (s)",
    )
}

pub fn plot_reference_curve(
    filtered_mv: &Array1<f64>,
    time_remaining: &Array1<f64>,
    corrected: &CorrectedReference,
    root_name: &str,
    output_path: &Path,
    image_format: ImageFormat,
) -> Result<(), Box<dyn Error>> {
    let title = format!("Reference polynomial, file={root_name}");
    let panel = reference_curve_config(filtered_mv, time_remaining, corrected, &title);
    render_figure(output_path, image_format, root_name, "Reference curve", &[panel])
}

pub fn plot_corrected_reference(
    filtered_mv: &Array1<f64>,
    time_remaining: &Array1<f64>,
    corrected: &CorrectedReference,
    root_name: &str,
    output_path: &Path,
    image_format: ImageFormat,
) -> Result<(), Box<dyn Error>> {
    let title = format!("Time x Volt, file={root_name}");
    let panel = corrected_reference_config(filtered_mv, time_remaining, corrected, &title);
    render_figure(output_path, image_format, root_name, "Corrected reference", &[panel])
}


// src/plot_functions/plot_reference_curve.rs
