// src/data_analysis/geometric_correction.rs

use ndarray::Array1;

use crate::data_analysis::polyfit::Polynomial;

/// Reference curve evaluated on a voltage series, plus its hand-calibrated
/// rotated/offset copy.
#[derive(Debug, Clone)]
pub struct CorrectedReference {
    /// Reference polynomial evaluated at each voltage sample.
    pub reference: Array1<f64>,
    pub shifted_x: Array1<f64>,
    pub shifted_y: Array1<f64>,
}

/// Rotates every point (x, y) by `theta` radians about the origin, then moves it
/// up by `offset_y`.
pub fn rotate_and_offset(
    x: &Array1<f64>,
    y: &Array1<f64>,
    theta: f64,
    offset_y: f64,
) -> (Array1<f64>, Array1<f64>) {
    let (sin, cos) = theta.sin_cos();
    let new_x = x * cos - y * sin;
    let new_y = x * sin + y * cos + offset_y;
    (new_x, new_y)
}

pub fn correct_reference_curve(
    voltage: &Array1<f64>,
    reference: &Polynomial,
    theta: f64,
    offset_y: f64,
) -> CorrectedReference {
    let reference_values = reference.eval_all(voltage);
    let (shifted_x, shifted_y) = rotate_and_offset(voltage, &reference_values, theta, offset_y);
    CorrectedReference {
        reference: reference_values,
        shifted_x,
        shifted_y,
    }
}


// src/data_analysis/geometric_correction.rs
