// src/constants.rs

use plotters::style::colors::full_palette::{BLUE_700, GREEN_700, GREY_600, ORANGE, RED};
use plotters::style::colors::MAGENTA;
use plotters::style::RGBColor;

// --- Loader ---
// Voltage readings above this are logger glitches and get dropped.
pub const MAX_VOLTAGE_MV: f64 = 48_000.0;

// --- Savitzky-Golay smoothing ---
pub const SMOOTHING_WINDOW_SIZE: usize = 901; // Must be odd.
pub const SMOOTHING_POLY_ORDER: usize = 3;

// --- Polynomial fits ---
pub const FIT_DEGREES: [usize; 3] = [1, 2, 3];

// Voltage grid used to draw the fitted curves, swept from high to low voltage.
pub const FIT_GRID_START_MV: f64 = 49_000.0;
pub const FIT_GRID_END_MV: f64 = 43_000.0;
pub const FIT_GRID_POINTS: usize = 100;

// --- Reference ("non-moving") discharge curve ---
// Measured on a stationary robot; highest power first.
pub const REFERENCE_CURVE_COEFFICIENTS: [f64; 4] = [4.202e-8, -0.005494, 241.7, -3.579e6];
pub const REFERENCE_ROTATION_RAD: f64 = -0.07;
pub const REFERENCE_OFFSET_Y: f64 = 4000.0;

// --- Fit archive ---
pub const FIT_ARCHIVE_PREFIX: &str = "fits_";
pub const FIT_ARCHIVE_EXTENSION: &str = "jsonl";
pub const FIT_ARCHIVE_FORMAT_VERSION: u32 = 1;

// Plot dimensions.
pub const PLOT_WIDTH: u32 = 1600;
pub const PLOT_HEIGHT: u32 = 1000;

// Font sizes
pub const FONT_SIZE_MAIN_TITLE: i32 = 24;
pub const FONT_SIZE_CHART_TITLE: i32 = 20;
pub const FONT_SIZE_AXIS_LABEL: i32 = 14;
pub const FONT_SIZE_LEGEND: i32 = 14;
pub const FONT_SIZE_MESSAGE: i32 = 20;

// --- Plot Color Assignments ---
pub const COLOR_MEASURED: &RGBColor = &BLUE_700;
pub const COLOR_FILTERED: &RGBColor = &GREEN_700;
// Fit curves follow degree order: 1st, 2nd, 3rd.
pub const COLOR_FIT_DEGREE: [&RGBColor; 3] = [&RED, &GREEN_700, &MAGENTA];
pub const COLOR_REFERENCE: &RGBColor = &ORANGE;
pub const COLOR_REFERENCE_SHIFTED: &RGBColor = &GREY_600;

// Stroke widths for lines
pub const LINE_WIDTH_PLOT: u32 = 1;
pub const LINE_WIDTH_FIT: u32 = 2;
pub const LINE_WIDTH_LEGEND: u32 = 2;

// src/constants.rs
