// src/data_input/log_parser.rs

use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::data_input::discharge_log::DischargeLog;
use crate::error::{AnalysisError, Result};

/// Parses a discharge log file.
///
/// The logger writes space-delimited rows whose first field packs the sample as
/// `time,voltage`; any further fields on the row are ignored. Rows with a voltage
/// above `max_voltage_mv` are dropped. A malformed row aborts the whole parse.
pub fn parse_discharge_log(input_file_path: &Path, max_voltage_mv: f64) -> Result<DischargeLog> {
    let file = File::open(input_file_path).map_err(|e| AnalysisError::io(input_file_path, e))?;
    let log = parse_discharge_reader(file, max_voltage_mv)?;
    info!(
        "Loaded {} samples from '{}' ({} rows above {} mV dropped)",
        log.len(),
        input_file_path.display(),
        log.dropped_rows,
        max_voltage_mv
    );
    Ok(log)
}

/// Same as [`parse_discharge_log`] but reads from any byte source.
pub fn parse_discharge_reader<R: Read>(reader: R, max_voltage_mv: f64) -> Result<DischargeLog> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(b' ')
        .quote(b'|')
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut log = DischargeLog::default();
    for (index, result) in rdr.records().enumerate() {
        let record = result?;
        let row = record
            .position()
            .map(|p| p.line())
            .unwrap_or(index as u64 + 1);
        let (time_str, voltage_str) = split_sample(&record, row)?;

        // Threshold first: a dropped row's time field is never looked at.
        let voltage_mv = parse_number(voltage_str, "voltage", row)?;
        if voltage_mv > max_voltage_mv {
            debug!("row {row}: dropping voltage {voltage_mv} mV");
            log.dropped_rows += 1;
            continue;
        }
        let time = parse_number(time_str, "time", row)?;
        log.push(time, voltage_mv);
    }

    Ok(log)
}

fn split_sample(record: &StringRecord, row: u64) -> Result<(&str, &str)> {
    let packed = record.get(0).unwrap_or("");
    let mut parts = packed.split(',');

    let time_str = parts.next().unwrap_or("");
    let voltage_str = parts.next().ok_or_else(|| AnalysisError::MalformedRow {
        row,
        reason: format!("expected 'time,voltage', found '{packed}'"),
    })?;
    Ok((time_str, voltage_str))
}

fn parse_number(field: &str, name: &str, row: u64) -> Result<f64> {
    field
        .trim()
        .parse::<f64>()
        .map_err(|e| AnalysisError::MalformedRow {
            row,
            reason: format!("invalid {name} '{field}': {e}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_packed_first_field() {
        let data = "0,47000\n1,46500 trailing\n2,46000\n";
        let log = parse_discharge_reader(data.as_bytes(), 48_000.0).unwrap();
        assert_eq!(log.time, vec![0.0, 1.0, 2.0]);
        assert_eq!(log.voltage_mv, vec![47000.0, 46500.0, 46000.0]);
        assert_eq!(log.dropped_rows, 0);
    }

    #[test]
    fn drops_rows_above_threshold_keeping_order() {
        let data = "10,47900\n11,48001\n12,48000\n13,65535\n14,46000\n";
        let log = parse_discharge_reader(data.as_bytes(), 48_000.0).unwrap();
        assert_eq!(log.time, vec![10.0, 12.0, 14.0]);
        assert_eq!(log.voltage_mv, vec![47900.0, 48000.0, 46000.0]);
        assert_eq!(log.dropped_rows, 2);
        assert_eq!(log.time.len(), log.voltage_mv.len());
    }

    #[test]
    fn missing_voltage_reports_row_number() {
        let data = "0,47000\n1\n";
        match parse_discharge_reader(data.as_bytes(), 48_000.0) {
            Err(AnalysisError::MalformedRow { row, .. }) => assert_eq!(row, 2),
            other => panic!("expected MalformedRow, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_voltage_is_fatal() {
        let data = "0,47000\n1,abc\n2,46000\n";
        assert!(matches!(
            parse_discharge_reader(data.as_bytes(), 48_000.0),
            Err(AnalysisError::MalformedRow { row: 2, .. })
        ));
    }

    #[test]
    fn bad_time_on_dropped_row_is_ignored() {
        let data = "0,47000\ngarbage,65535\n2,46900\n";
        let log = parse_discharge_reader(data.as_bytes(), 48_000.0).unwrap();
        assert_eq!(log.time, vec![0.0, 2.0]);
        assert_eq!(log.dropped_rows, 1);
    }

    #[test]
    fn bad_time_on_kept_row_is_fatal() {
        let data = "0,47000\ngarbage,46950\n";
        assert!(matches!(
            parse_discharge_reader(data.as_bytes(), 48_000.0),
            Err(AnalysisError::MalformedRow { row: 2, .. })
        ));
    }

    #[test]
    fn blank_lines_are_skipped() {
        let data = "0,47000\n\n1,46900\n";
        let log = parse_discharge_reader(data.as_bytes(), 48_000.0).unwrap();
        assert_eq!(log.len(), 2);
    }
}

// src/data_input/log_parser.rs
