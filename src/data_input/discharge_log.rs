// src/data_input/discharge_log.rs

/// Voltage samples from one discharge run, in logger order.
/// `time` and `voltage_mv` always have the same length.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DischargeLog {
    pub time: Vec<f64>,       // Raw logger timestamp (seconds).
    pub voltage_mv: Vec<f64>, // Pack voltage (mV).
    pub dropped_rows: usize,  // Rows rejected by the voltage sanity filter.
}

impl DischargeLog {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub(crate) fn push(&mut self, time: f64, voltage_mv: f64) {
        self.time.push(time);
        self.voltage_mv.push(voltage_mv);
    }
}

// src/data_input/discharge_log.rs
