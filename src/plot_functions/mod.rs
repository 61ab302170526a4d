// src/plot_functions/mod.rs

pub mod plot_filtered_comparison;
pub mod plot_fit_overlay;
pub mod plot_reference_curve;
pub mod plot_residuals;

// src/plot_functions/mod.rs
