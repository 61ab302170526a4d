// tests/axis_formatting_test.rs

use battery_discharge_fit::plot_framework::format_axis_value;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voltage_axis_formatting() {
        // Voltage ticks sit between 43 and 49 kmV; half-volt steps must stay distinct
        assert_eq!(format_axis_value(43_000.0), "43.0k");
        assert_eq!(format_axis_value(45_500.0), "45.5k");
        assert_eq!(format_axis_value(46_000.0), "46.0k");
        assert_eq!(format_axis_value(49_000.0), "49.0k");
    }

    #[test]
    fn test_time_axis_formatting() {
        assert_eq!(format_axis_value(0.0), "0");
        assert_eq!(format_axis_value(250.0), "250");
        assert_eq!(format_axis_value(12_000.0), "12.0k");
        assert_eq!(format_axis_value(-1_500.0), "-1.5k");
    }

    #[test]
    fn test_residual_axis_formatting() {
        // Small fractional residuals keep one decimal
        assert_eq!(format_axis_value(0.5), "0.5");
        assert_eq!(format_axis_value(-2.5), "-2.5");
        assert_eq!(format_axis_value(5.0), "5");

        // Very large values use M notation
        assert_eq!(format_axis_value(3_579_000.0), "3.6M");
    }
}
