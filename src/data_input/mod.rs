// src/data_input/mod.rs

pub mod discharge_log;
pub mod log_parser;

// src/data_input/mod.rs
