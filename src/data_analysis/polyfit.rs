// src/data_analysis/polyfit.rs

use std::fmt;

use nalgebra::{DMatrix, DVector};
use ndarray::Array1;

use crate::error::{AnalysisError, Result};

// Relative cutoff below which a singular value counts as zero.
const RANK_TOLERANCE: f64 = 1e-12;

/// Polynomial with coefficients stored highest power first:
/// `[a, b, c]` is `a*x^2 + b*x + c`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coefficients: Vec<f64>,
}

impl Polynomial {
    pub fn new(coefficients: Vec<f64>) -> Self {
        Self { coefficients }
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Horner evaluation.
    pub fn eval(&self, x: f64) -> f64 {
        self.coefficients
            .iter()
            .fold(0.0, |acc, &coef| acc.mul_add(x, coef))
    }

    pub fn eval_all(&self, x: &Array1<f64>) -> Array1<f64> {
        x.mapv(|v| self.eval(v))
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.coefficients.is_empty() {
            return write!(f, "0");
        }
        let degree = self.degree();
        for (i, &coef) in self.coefficients.iter().enumerate() {
            let power = degree - i;
            let magnitude = coef.abs();
            if i == 0 {
                if coef < 0.0 {
                    write!(f, "-")?;
                }
            } else if coef < 0.0 {
                write!(f, " - ")?;
            } else {
                write!(f, " + ")?;
            }
            match power {
                0 => write!(f, "{magnitude:.4e}")?,
                1 => write!(f, "{magnitude:.4e} x")?,
                _ => write!(f, "{magnitude:.4e} x^{power}")?,
            }
        }
        Ok(())
    }
}

/// One least-squares fit together with its per-sample evaluation.
#[derive(Debug, Clone)]
pub struct PolynomialFit {
    pub degree: usize,
    pub polynomial: Polynomial,
    pub predicted: Array1<f64>,
    /// Observed minus predicted, sample by sample.
    pub residuals: Array1<f64>,
}

impl PolynomialFit {
    pub fn residual_sum_of_squares(&self) -> f64 {
        self.residuals.mapv(|r| r * r).sum()
    }
}

/// Least-squares polynomial of `degree` through `(x[i], y[i])`.
///
/// x is centred and scaled to [-1, 1] before the SVD solve; the result is
/// expanded back into plain coefficients of x. Voltages sit around 4.7e4, so a
/// raw cubic Vandermonde matrix would be hopelessly ill-conditioned.
pub fn fit_polynomial(x: &[f64], y: &[f64], degree: usize) -> Result<Polynomial> {
    if x.len() != y.len() {
        return Err(AnalysisError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }
    let n = x.len();
    let n_coeffs = degree + 1;
    if n < n_coeffs {
        return Err(AnalysisError::FitFailed {
            degree,
            reason: format!("need at least {n_coeffs} points, got {n}"),
        });
    }
    if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
        return Err(AnalysisError::FitFailed {
            degree,
            reason: "input contains non-finite values".to_string(),
        });
    }

    let mean = x.iter().sum::<f64>() / n as f64;
    let spread = x.iter().map(|&v| (v - mean).abs()).fold(0.0, f64::max);
    let scale = if spread > 0.0 { spread } else { 1.0 };

    let vandermonde = DMatrix::<f64>::from_fn(n, n_coeffs, |row, col| {
        ((x[row] - mean) / scale).powi(col as i32)
    });
    let rhs = DVector::<f64>::from_column_slice(y);

    let svd = vandermonde.svd(true, true);
    let max_singular = svd.singular_values.max();
    let rank = svd
        .singular_values
        .iter()
        .filter(|&&s| s > max_singular * RANK_TOLERANCE)
        .count();
    if rank < n_coeffs {
        return Err(AnalysisError::FitFailed {
            degree,
            reason: format!("only {rank} independent voltage values for {n_coeffs} coefficients"),
        });
    }
    let scaled = svd
        .solve(&rhs, max_singular * RANK_TOLERANCE)
        .map_err(|e| AnalysisError::FitFailed {
            degree,
            reason: e.to_string(),
        })?;

    // sum_k a_k ((x - m)/s)^k  ->  sum_j b_j x^j
    let mut ascending = vec![0.0; n_coeffs];
    for k in 0..n_coeffs {
        let a_k = scaled[k] / scale.powi(k as i32);
        let mut binom = 1.0;
        for (j, b_j) in ascending.iter_mut().enumerate().take(k + 1) {
            *b_j += a_k * binom * (-mean).powi((k - j) as i32);
            binom = binom * (k - j) as f64 / (j + 1) as f64;
        }
    }
    ascending.reverse();

    Ok(Polynomial::new(ascending))
}

/// Fits `degree` and evaluates it back on every observed x.
pub fn fit_with_residuals(x: &Array1<f64>, y: &Array1<f64>, degree: usize) -> Result<PolynomialFit> {
    let x_values = x.to_vec();
    let y_values = y.to_vec();
    let polynomial = fit_polynomial(&x_values, &y_values, degree)?;
    let predicted = polynomial.eval_all(x);
    let residuals = y - &predicted;
    Ok(PolynomialFit {
        degree,
        polynomial,
        predicted,
        residuals,
    })
}

/// Runs [`fit_with_residuals`] once per requested degree, in order.
pub fn fit_degrees(x: &Array1<f64>, y: &Array1<f64>, degrees: &[usize]) -> Result<Vec<PolynomialFit>> {
    degrees
        .iter()
        .map(|&degree| fit_with_residuals(x, y, degree))
        .collect()
}


// src/data_analysis/polyfit.rs
