// src/plot_functions/plot_filtered_comparison.rs

use std::error::Error;
use std::path::Path;

use ndarray::Array1;

use crate::config::ImageFormat;
use crate::constants::{COLOR_FILTERED, COLOR_MEASURED, LINE_WIDTH_PLOT};
use crate::plot_framework::{render_figure, PlotConfig, PlotSeries};

/// Two stacked panels: raw voltage on top, Savitzky-Golay output below, both
/// against the same time-remaining axis.
pub fn filtered_comparison_configs(
    voltage_mv: &Array1<f64>,
    filtered_mv: &Array1<f64>,
    time_remaining: &Array1<f64>,
) -> [Option<PlotConfig>; 2] {
    let raw = PlotConfig::fitted_to_data(
        "Comparison between real and filtered data",
        vec![PlotSeries::from_arrays(
            voltage_mv,
            time_remaining,
            "Real values",
            *COLOR_MEASURED,
            LINE_WIDTH_PLOT,
        )],
        "Real values (mV)",
        "Time remaining (s)",
    );
    let filtered = PlotConfig::fitted_to_data(
        "",
        vec![PlotSeries::from_arrays(
            filtered_mv,
            time_remaining,
            "Filtered values",
            *COLOR_FILTERED,
            LINE_WIDTH_PLOT,
        )],
        "Filtered values (mV)",
        "Time remaining (s)",
    );
    [raw, filtered]
}

pub fn plot_filtered_comparison(
    voltage_mv: &Array1<f64>,
    filtered_mv: &Array1<f64>,
    time_remaining: &Array1<f64>,
    root_name: &str,
    output_path: &Path,
    image_format: ImageFormat,
) -> Result<(), Box<dyn Error>> {
    let panels = filtered_comparison_configs(voltage_mv, filtered_mv, time_remaining);
    render_figure(output_path, image_format, root_name, "Real/Filtered", &panels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn raw_panel_above_filtered_panel() {
        let voltage = array![47_000.0, 46_960.0, 46_930.0];
        let filtered = array![46_990.0, 46_962.0, 46_935.0];
        let remaining = array![20.0, 10.0, 0.0];

        let [raw, smooth] = filtered_comparison_configs(&voltage, &filtered, &remaining);
        let raw = raw.unwrap();
        let smooth = smooth.unwrap();

        assert_eq!(raw.series.len(), 1);
        assert_eq!(raw.series[0].label, "Real values");
        assert_eq!(raw.series[0].data, vec![(47_000.0, 20.0), (46_960.0, 10.0), (46_930.0, 0.0)]);
        assert_eq!(raw.x_label, "Real values (mV)");

        assert_eq!(smooth.series.len(), 1);
        assert_eq!(smooth.series[0].label, "Filtered values");
        assert_eq!(smooth.series[0].data[1], (46_962.0, 10.0));
        assert_eq!(smooth.x_label, "Filtered values (mV)");
    }
}

// src/plot_functions/plot_filtered_comparison.rs
