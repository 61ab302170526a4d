// src/data_analysis/discharge_fit.rs

use ndarray::Array1;
use tracing::{debug, info};

use crate::config::{AnalysisConfig, FitCfg};
use crate::constants::FIT_DEGREES;
use crate::data_analysis::geometric_correction::{correct_reference_curve, CorrectedReference};
use crate::data_analysis::polyfit::{fit_degrees, Polynomial, PolynomialFit};
use crate::data_analysis::savitzky_golay::SavitzkyGolayFilter;
use crate::data_analysis::time_remaining::reconstruct_time_remaining;
use crate::data_input::discharge_log::DischargeLog;
use crate::error::Result;

/// Fits computed directly on the logged voltage.
#[derive(Debug, Clone)]
pub struct RawAnalysis {
    pub voltage_mv: Array1<f64>,
    pub time_remaining: Array1<f64>,
    pub fits: Vec<PolynomialFit>,
}

/// Fits computed on the Savitzky-Golay smoothed voltage, plus the reference curve
/// evaluated on it.
#[derive(Debug, Clone)]
pub struct SmoothedAnalysis {
    pub filtered_mv: Array1<f64>,
    pub fits: Vec<PolynomialFit>,
    pub corrected_reference: CorrectedReference,
}

pub fn analyze_raw(log: &DischargeLog, config: &AnalysisConfig) -> Result<RawAnalysis> {
    let time_remaining = Array1::from(reconstruct_time_remaining(&log.time, config.time.time_axis)?);
    let voltage_mv = Array1::from(log.voltage_mv.clone());
    let fits = fit_degrees(&voltage_mv, &time_remaining, &FIT_DEGREES)?;
    log_fits("raw", &fits);

    Ok(RawAnalysis {
        voltage_mv,
        time_remaining,
        fits,
    })
}

pub fn analyze_smoothed(raw: &RawAnalysis, config: &AnalysisConfig) -> Result<SmoothedAnalysis> {
    let filter = SavitzkyGolayFilter::new(config.smoothing.window_size, config.smoothing.poly_order)?;
    debug!(
        "Savitzky-Golay window {} order {}",
        filter.window_size(),
        filter.poly_order()
    );
    let filtered_mv = Array1::from(filter.apply(&raw.voltage_mv.to_vec())?);

    let fits = fit_degrees(&filtered_mv, &raw.time_remaining, &FIT_DEGREES)?;
    log_fits("filtered", &fits);

    let reference = Polynomial::new(config.reference.coefficients.clone());
    let corrected_reference = correct_reference_curve(
        &filtered_mv,
        &reference,
        config.reference.rotation_rad,
        config.reference.offset_y,
    );

    Ok(SmoothedAnalysis {
        filtered_mv,
        fits,
        corrected_reference,
    })
}

/// Evenly spaced voltages the fitted curves are drawn over.
pub fn voltage_grid(fit: &FitCfg) -> Array1<f64> {
    Array1::linspace(fit.grid_start_mv, fit.grid_end_mv, fit.grid_points)
}

fn log_fits(series: &str, fits: &[PolynomialFit]) {
    for fit in fits {
        info!(
            "{series} p{} = {} (residual sum of squares {:.3e})",
            fit.degree,
            fit.polynomial,
            fit.residual_sum_of_squares()
        );
    }
}


// src/data_analysis/discharge_fit.rs
