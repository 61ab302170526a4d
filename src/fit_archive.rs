// src/fit_archive.rs
//
// Append-only archive of fitted coefficients, consumed later by the on-robot
// voltage-to-runtime estimator. One JSON object per line, one line per fit; a run
// only ever appends, so the file doubles as a history of calibrations.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::constants::{FIT_ARCHIVE_EXTENSION, FIT_ARCHIVE_FORMAT_VERSION, FIT_ARCHIVE_PREFIX};
use crate::data_analysis::polyfit::PolynomialFit;
use crate::error::{AnalysisError, Result};

/// Which voltage series a fit was computed on. Only fits on the logged voltage
/// are archived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitSeries {
    Raw,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitRecord {
    pub format_version: u32,
    pub robot: String,
    pub source: String,
    pub series: FitSeries,
    pub degree: usize,
    /// Highest power first.
    pub coefficients: Vec<f64>,
    pub sample_count: usize,
    pub created_at: DateTime<Utc>,
}

impl FitRecord {
    pub fn from_fit(
        robot: &str,
        source: &str,
        series: FitSeries,
        fit: &PolynomialFit,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            format_version: FIT_ARCHIVE_FORMAT_VERSION,
            robot: robot.to_string(),
            source: source.to_string(),
            series,
            degree: fit.degree,
            coefficients: fit.polynomial.coefficients().to_vec(),
            sample_count: fit.residuals.len(),
            created_at,
        }
    }
}

/// `fits_<robot>.jsonl` inside `dir`.
pub fn archive_path(dir: &Path, robot: &str) -> PathBuf {
    dir.join(format!("{FIT_ARCHIVE_PREFIX}{robot}.{FIT_ARCHIVE_EXTENSION}"))
}

/// Appends `records` to the archive, creating it if needed. Existing lines are
/// never rewritten.
pub fn append_records(path: &Path, records: &[FitRecord]) -> Result<()> {
    let mut buffer = Vec::new();
    for record in records {
        serde_json::to_writer(&mut buffer, record)?;
        buffer.push(b'\n');
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| AnalysisError::io(path, e))?;
    file.write_all(&buffer)
        .and_then(|_| file.flush())
        .map_err(|e| AnalysisError::io(path, e))?;

    info!("Appended {} fit records to '{}'", records.len(), path.display());
    Ok(())
}

/// Reads every record in the archive. A missing archive reads as empty.
pub fn read_records(path: &Path) -> Result<Vec<FitRecord>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(AnalysisError::io(path, e)),
    };

    let mut records = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|e| AnalysisError::io(path, e))?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(serde_json::from_str(&line)?);
    }
    Ok(records)
}


// src/fit_archive.rs
