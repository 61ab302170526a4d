// tests/pipeline_test.rs

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use battery_discharge_fit::config::{AnalysisConfig, ImageFormat};
use battery_discharge_fit::error::AnalysisError;
use battery_discharge_fit::fit_archive::{archive_path, read_records, FitSeries};
use battery_discharge_fit::pipeline::{run_analysis, FigurePaths};

const ROWS: usize = 1200;

/// Synthetic discharge: 10 s sampling, slow linear sag with sensor ripple, and
/// every 97th reading replaced by a logger glitch above the sanity threshold.
fn write_discharge_log(dir: &Path, name: &str) -> PathBuf {
    let mut text = String::new();
    for i in 0..ROWS {
        let t = i as f64 * 10.0;
        let v = if i % 97 == 50 {
            65_535.0
        } else {
            47_800.0 - i as f64 * 3.0 + 6.0 * (i as f64 * 0.9).sin()
        };
        writeln!(text, "{t},{v} 1").unwrap();
    }
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path
}

#[test]
fn full_run_writes_charts_and_three_archive_records() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_discharge_log(dir.path(), "discharge_01.csv");
    let config = AnalysisConfig::default();

    let summary = run_analysis(&input, "cob3-6", &config, dir.path()).unwrap();

    let glitches = (0..ROWS).filter(|i| i % 97 == 50).count();
    assert_eq!(summary.dropped_rows, glitches);
    assert_eq!(summary.sample_count, ROWS - glitches);

    assert_eq!(summary.figures, FigurePaths::for_input(&input, ImageFormat::Svg));
    for figure in summary.figures.all() {
        let svg = fs::read_to_string(figure).unwrap();
        assert!(svg.contains("<svg"), "{} is not an SVG", figure.display());
    }

    assert_eq!(summary.archive_path, archive_path(dir.path(), "cob3-6"));
    let records = read_records(&summary.archive_path).unwrap();
    assert_eq!(records.len(), 3);
    for (record, degree) in records.iter().zip([1, 2, 3]) {
        assert_eq!(record.degree, degree);
        assert_eq!(record.series, FitSeries::Raw);
        assert_eq!(record.robot, "cob3-6");
        assert_eq!(record.sample_count, summary.sample_count);
    }
}

#[test]
fn every_run_appends_exactly_three_records() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_discharge_log(dir.path(), "discharge_02.csv");
    let config = AnalysisConfig::default();
    let archive = archive_path(dir.path(), "cob3-1");

    run_analysis(&input, "cob3-1", &config, dir.path()).unwrap();
    let first = read_records(&archive).unwrap();
    run_analysis(&input, "cob3-1", &config, dir.path()).unwrap();
    let second = read_records(&archive).unwrap();

    assert_eq!(second.len(), first.len() + 3);
    assert_eq!(&second[..3], &first[..]);
    // Same input, same fits
    for (a, b) in first.iter().zip(&second[3..]) {
        assert_eq!(a.coefficients, b.coefficients);
    }
}

#[test]
fn malformed_row_aborts_before_archiving() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.csv");
    fs::write(&input, "0,47000\n10,46990\n20;46980\n").unwrap();

    let err = run_analysis(&input, "r", &AnalysisConfig::default(), dir.path()).unwrap_err();
    assert!(err.to_string().contains("row 3"), "unexpected error: {err}");
    assert!(!archive_path(dir.path(), "r").exists());
}

#[test]
fn short_log_fails_at_smoothing_after_raw_fits_are_archived() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("short.csv");
    let text: String = (0..100)
        .map(|i| format!("{},{}\n", i * 10, 47_500 - i * 4))
        .collect();
    fs::write(&input, text).unwrap();

    let result = run_analysis(&input, "r", &AnalysisConfig::default(), dir.path());
    assert!(result.is_err());
    assert_eq!(read_records(&archive_path(dir.path(), "r")).unwrap().len(), 3);

    let figures = FigurePaths::for_input(&input, ImageFormat::Svg);
    assert!(figures.fit_overlay.exists());
    assert!(figures.residuals.exists());
    assert!(!figures.filtered_comparison.exists());
}

#[test]
fn config_file_overrides_smoothing_window() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("short.csv");
    let text: String = (0..100)
        .map(|i| format!("{},{}\n", i * 10, 47_500 - i * 4))
        .collect();
    fs::write(&input, text).unwrap();

    let cfg_path = dir.path().join("cal.toml");
    fs::write(&cfg_path, "[smoothing]\nwindow_size = 21\n\n[time]\ntime_axis = \"countdown\"\n").unwrap();
    let config = AnalysisConfig::from_toml_file(&cfg_path).unwrap();

    let summary = run_analysis(&input, "r", &config, dir.path()).unwrap();
    assert_eq!(summary.sample_count, 100);

    // Countdown axis on an exactly linear log: remaining = 2.5 v - 117760
    let records = read_records(&summary.archive_path).unwrap();
    let slope = records[0].coefficients[0];
    assert!((slope - 2.5).abs() < 1e-6, "slope {slope}");
}

#[test]
fn config_overriding_fit_degrees_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("cal.toml");
    fs::write(&cfg_path, "[fit]\ndegrees = [1, 2]\n").unwrap();

    match AnalysisConfig::from_toml_file(&cfg_path) {
        Err(AnalysisError::Config { path, .. }) => assert_eq!(path, cfg_path),
        other => panic!("expected a config error, got {other:?}"),
    }
}
