// src/data_analysis/savitzky_golay.rs
//
// Savitzky-Golay smoothing: a least-squares polynomial is fitted over a sliding
// window and its value at the window centre replaces the sample.

use nalgebra::{DMatrix, DVector};

use crate::error::{AnalysisError, Result};

/// Computes the smoothing (zeroth-derivative) convolution weights.
///
/// Window offsets are scaled to [-1, 1] before building the normal equations; the
/// centre value of the fitted polynomial does not depend on that scaling, and it
/// keeps the system well conditioned for windows of several hundred samples.
pub fn compute_smoothing_coefficients(window_size: usize, poly_order: usize) -> Result<Vec<f64>> {
    if window_size == 0 || window_size % 2 == 0 {
        return Err(AnalysisError::InvalidWindowSize(window_size));
    }
    if poly_order >= window_size {
        return Err(AnalysisError::InvalidPolynomialOrder {
            order: poly_order,
            window: window_size,
        });
    }

    let half_window = (window_size - 1) / 2;
    let scale = half_window.max(1) as f64;
    let offset = |i: usize| (i as f64 - half_window as f64) / scale;

    let vandermonde =
        DMatrix::<f64>::from_fn(window_size, poly_order + 1, |i, j| offset(i).powi(j as i32));
    let ata = vandermonde.transpose() * &vandermonde;
    let mut rhs = DVector::<f64>::zeros(poly_order + 1);
    rhs[0] = 1.0;

    let poly = ata.lu().solve(&rhs).ok_or_else(|| AnalysisError::FitFailed {
        degree: poly_order,
        reason: "singular Savitzky-Golay normal equations".to_string(),
    })?;

    Ok((0..window_size)
        .map(|i| {
            let x = offset(i);
            (0..=poly_order).map(|j| poly[j] * x.powi(j as i32)).sum()
        })
        .collect())
}

#[derive(Debug, Clone)]
pub struct SavitzkyGolayFilter {
    window_size: usize,
    poly_order: usize,
    coefficients: Vec<f64>,
}

impl SavitzkyGolayFilter {
    pub fn new(window_size: usize, poly_order: usize) -> Result<Self> {
        let coefficients = compute_smoothing_coefficients(window_size, poly_order)?;
        Ok(Self {
            window_size,
            poly_order,
            coefficients,
        })
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn poly_order(&self) -> usize {
        self.poly_order
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Smooths `data`; the output has the same length as the input.
    ///
    /// Both ends are padded with half a window of samples reflected through the
    /// end point (`y0 - |y[k] - y0|` on the left, `yn + |y[n-k] - yn|` on the
    /// right) before a valid convolution.
    pub fn apply(&self, data: &[f64]) -> Result<Vec<f64>> {
        let n = data.len();
        if n < self.window_size {
            return Err(AnalysisError::InsufficientSamples {
                required: self.window_size,
                actual: n,
            });
        }

        let half_window = self.window_size / 2;
        let first = data[0];
        let last = data[n - 1];

        let mut padded = Vec::with_capacity(n + 2 * half_window);
        padded.extend((1..=half_window).rev().map(|k| first - (data[k] - first).abs()));
        padded.extend_from_slice(data);
        padded.extend((1..=half_window).map(|k| last + (data[n - 1 - k] - last).abs()));

        Ok(padded
            .windows(self.window_size)
            .map(|window| {
                window
                    .iter()
                    .zip(&self.coefficients)
                    .map(|(value, coeff)| value * coeff)
                    .sum()
            })
            .collect())
    }
}


// src/data_analysis/savitzky_golay.rs
