// src/data_analysis/time_remaining.rs

use crate::config::TimeAxis;
use crate::error::{AnalysisError, Result};

/// Derives the time-remaining axis from raw timestamps.
///
/// The result has one entry per sample, is aligned with the voltage sequence and
/// ends at zero (the last logged sample is treated as the moment the pack ran out).
pub fn reconstruct_time_remaining(time: &[f64], axis: TimeAxis) -> Result<Vec<f64>> {
    if time.len() < 2 {
        return Err(AnalysisError::InsufficientSamples {
            required: 2,
            actual: time.len(),
        });
    }

    Ok(match axis {
        TimeAxis::Logger => logger_time_remaining(time),
        TimeAxis::Countdown => countdown_time_remaining(time),
    })
}

// Each timestamp after the first is pushed forward by its own step, the series is
// anchored with a leading zero and then reversed so the tail becomes t = 0.
fn logger_time_remaining(time: &[f64]) -> Vec<f64> {
    let mut shifted = Vec::with_capacity(time.len());
    shifted.push(0.0);
    shifted.extend(time.windows(2).map(|w| w[1] + (w[1] - w[0])));
    shifted.reverse();
    shifted
}

fn countdown_time_remaining(time: &[f64]) -> Vec<f64> {
    let last = time[time.len() - 1];
    time.iter().map(|&t| last - t).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logger_transform_matches_logger_convention() {
        let remaining = reconstruct_time_remaining(&[0.0, 1.0, 2.0], TimeAxis::Logger).unwrap();
        // shifted = [0, 1 + 1, 2 + 1], reversed
        assert_eq!(remaining, vec![3.0, 2.0, 0.0]);
    }

    #[test]
    fn logger_transform_with_uneven_steps() {
        let remaining =
            reconstruct_time_remaining(&[100.0, 110.0, 130.0, 135.0], TimeAxis::Logger).unwrap();
        assert_eq!(remaining, vec![140.0, 150.0, 120.0, 0.0]);
    }

    #[test]
    fn countdown_counts_to_last_sample() {
        let remaining =
            reconstruct_time_remaining(&[0.0, 1.0, 2.0], TimeAxis::Countdown).unwrap();
        assert_eq!(remaining, vec![2.0, 1.0, 0.0]);
    }

    #[test]
    fn output_is_aligned_and_ends_at_zero() {
        let time: Vec<f64> = (0..50).map(|i| i as f64 * 2.5).collect();
        for axis in [TimeAxis::Logger, TimeAxis::Countdown] {
            let remaining = reconstruct_time_remaining(&time, axis).unwrap();
            assert_eq!(remaining.len(), time.len());
            assert_eq!(*remaining.last().unwrap(), 0.0);
            assert!(remaining.iter().all(|&t| t >= 0.0));
        }
    }

    #[test]
    fn rerun_gives_identical_output() {
        let time = [3.0, 4.5, 7.0, 7.25, 9.0];
        let first = reconstruct_time_remaining(&time, TimeAxis::Logger).unwrap();
        let second = reconstruct_time_remaining(&time, TimeAxis::Logger).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn single_sample_is_rejected() {
        assert!(matches!(
            reconstruct_time_remaining(&[1.0], TimeAxis::Logger),
            Err(AnalysisError::InsufficientSamples { required: 2, actual: 1 })
        ));
    }
}

// src/data_analysis/time_remaining.rs
