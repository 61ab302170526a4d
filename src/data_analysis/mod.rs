// src/data_analysis/mod.rs

pub mod discharge_fit;
pub mod geometric_correction;
pub mod polyfit;
pub mod savitzky_golay;
pub mod time_remaining;

// src/data_analysis/mod.rs
