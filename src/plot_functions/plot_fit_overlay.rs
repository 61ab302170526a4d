// src/plot_functions/plot_fit_overlay.rs

use std::error::Error;
use std::path::Path;

use ndarray::Array1;
use plotters::style::RGBColor;

use crate::config::ImageFormat;
use crate::constants::{COLOR_FIT_DEGREE, LINE_WIDTH_FIT, LINE_WIDTH_PLOT};
use crate::data_analysis::polyfit::PolynomialFit;
use crate::plot_framework::{render_figure, PlotConfig, PlotSeries};

/// Measured discharge curve plus every fitted polynomial drawn over `voltage_grid`.
/// Each fit's legend entry carries the polynomial itself.
pub fn fit_overlay_config(
    voltage_mv: &Array1<f64>,
    time_remaining: &Array1<f64>,
    fits: &[PolynomialFit],
    voltage_grid: &Array1<f64>,
    measured_color: RGBColor,
    title: &str,
) -> Option<PlotConfig> {
    let mut series = vec![PlotSeries::from_arrays(
        voltage_mv,
        time_remaining,
        "Measured",
        measured_color,
        LINE_WIDTH_PLOT,
    )];
    for (i, fit) in fits.iter().enumerate() {
        series.push(PlotSeries::from_arrays(
            voltage_grid,
            &fit.polynomial.eval_all(voltage_grid),
            format!("p{} = {}", fit.degree, fit.polynomial),
            *COLOR_FIT_DEGREE[i % COLOR_FIT_DEGREE.len()],
            LINE_WIDTH_FIT,
        ));
    }

    PlotConfig::fitted_to_data(title, series, "Voltage (mV)", "Time remaining (s)")
}

#[allow(clippy::too_many_arguments)]
pub fn plot_fit_overlay(
    voltage_mv: &Array1<f64>,
    time_remaining: &Array1<f64>,
    fits: &[PolynomialFit],
    voltage_grid: &Array1<f64>,
    measured_color: RGBColor,
    root_name: &str,
    output_path: &Path,
    image_format: ImageFormat,
) -> Result<(), Box<dyn Error>> {
    let title = format!("Time x Volt, file={root_name}");
    let panel = fit_overlay_config(
        voltage_mv,
        time_remaining,
        fits,
        voltage_grid,
        measured_color,
        &title,
    );
    render_figure(output_path, image_format, root_name, "Fit overlay", &[panel])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_analysis::polyfit::fit_degrees;
    use approx::assert_abs_diff_eq;

    fn discharge() -> (Array1<f64>, Array1<f64>) {
        let voltage = Array1::from_iter((0..20).map(|i| 47_000.0 - i as f64 * 50.0));
        let remaining = Array1::from_iter((0..20).rev().map(|i| i as f64 * 30.0 + (i % 3) as f64));
        (voltage, remaining)
    }

    #[test]
    fn measured_series_then_one_curve_per_fit() {
        let (voltage, remaining) = discharge();
        let fits = fit_degrees(&voltage, &remaining, &[1, 2, 3]).unwrap();
        let grid = Array1::linspace(49_000.0, 43_000.0, 100);

        let cfg = fit_overlay_config(&voltage, &remaining, &fits, &grid, RGBColor(0, 0, 255), "t")
            .unwrap();
        assert_eq!(cfg.series.len(), 4);
        assert_eq!(cfg.series[0].label, "Measured");
        assert_eq!(cfg.series[0].data.len(), voltage.len());
        assert_eq!(cfg.series[0].data[3], (voltage[3], remaining[3]));

        for (series, fit) in cfg.series[1..].iter().zip(&fits) {
            assert!(series.label.starts_with(&format!("p{} = ", fit.degree)));
            assert_eq!(series.data.len(), grid.len());
            let (x, y) = series.data[0];
            assert_eq!(x, 49_000.0);
            assert_abs_diff_eq!(y, fit.polynomial.eval(49_000.0), epsilon = 1e-9);
        }
        assert_eq!(cfg.x_label, "Voltage (mV)");
        assert_eq!(cfg.y_label, "Time remaining (s)");
    }

    #[test]
    fn no_samples_and_no_fits_gives_no_chart() {
        let empty = Array1::<f64>::zeros(0);
        assert!(fit_overlay_config(&empty, &empty, &[], &empty, RGBColor(0, 0, 0), "t").is_none());
    }
}

// src/plot_functions/plot_fit_overlay.rs
