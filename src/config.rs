// src/config.rs
//
// Calibration constants for one robot/battery pairing. Every field defaults to the
// values in `constants.rs`; a TOML file only needs the keys it overrides:
//
//   [smoothing]
//   window_size = 501
//
//   [reference]
//   rotation_rad = -0.05

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::constants::{
    FIT_GRID_END_MV, FIT_GRID_POINTS, FIT_GRID_START_MV, MAX_VOLTAGE_MV,
    REFERENCE_CURVE_COEFFICIENTS, REFERENCE_OFFSET_Y, REFERENCE_ROTATION_RAD,
    SMOOTHING_POLY_ORDER, SMOOTHING_WINDOW_SIZE,
};
use crate::error::{AnalysisError, Result};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub loader: LoaderCfg,
    pub time: TimeCfg,
    pub smoothing: SmoothingCfg,
    pub fit: FitCfg,
    pub reference: ReferenceCfg,
    pub output: OutputCfg,
}

impl AnalysisConfig {
    pub fn from_toml_str(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| AnalysisError::io(path, e))?;
        Self::from_toml_str(&text).map_err(|source| AnalysisError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoaderCfg {
    /// Rows with a voltage above this value (mV) are discarded.
    pub max_voltage_mv: f64,
}

impl Default for LoaderCfg {
    fn default() -> Self {
        Self {
            max_voltage_mv: MAX_VOLTAGE_MV,
        }
    }
}

/// How the time-remaining axis is derived from raw logger timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeAxis {
    /// Shifted-difference transform matching the logger's historical output.
    #[default]
    Logger,
    /// Plain countdown to the last sample: `t_last - t_i`.
    Countdown,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TimeCfg {
    pub time_axis: TimeAxis,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SmoothingCfg {
    pub window_size: usize,
    pub poly_order: usize,
}

impl Default for SmoothingCfg {
    fn default() -> Self {
        Self {
            window_size: SMOOTHING_WINDOW_SIZE,
            poly_order: SMOOTHING_POLY_ORDER,
        }
    }
}

/// Plotting grid for the fitted curves. The fitted degrees themselves are fixed
/// at `FIT_DEGREES`, so a `degrees` key is rejected like any other unknown key.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FitCfg {
    pub grid_start_mv: f64,
    pub grid_end_mv: f64,
    pub grid_points: usize,
}

impl Default for FitCfg {
    fn default() -> Self {
        Self {
            grid_start_mv: FIT_GRID_START_MV,
            grid_end_mv: FIT_GRID_END_MV,
            grid_points: FIT_GRID_POINTS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReferenceCfg {
    /// Highest power first.
    pub coefficients: Vec<f64>,
    pub rotation_rad: f64,
    pub offset_y: f64,
}

impl Default for ReferenceCfg {
    fn default() -> Self {
        Self {
            coefficients: REFERENCE_CURVE_COEFFICIENTS.to_vec(),
            rotation_rad: REFERENCE_ROTATION_RAD,
            offset_y: REFERENCE_OFFSET_Y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Svg,
    Png,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Svg => "svg",
            ImageFormat::Png => "png",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputCfg {
    pub image_format: ImageFormat,
}


// src/config.rs
