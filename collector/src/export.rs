//! Export of the collected history as tabular rows.

use chrono::{DateTime, Local};
use log::info;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use common::buffers::RollingBuffer;
use common::SensorSnapshot;

use crate::errors::ExportError;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";
const FILENAME_FORMAT: &str = "sensor_data_%Y%m%d_%H%M%S.csv";

/// One exported snapshot. Field order is the column order of the export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    pub timestamp: String,
    pub gravity_x: f64,
    pub gravity_y: f64,
    pub gravity_z: f64,
    pub gravity_time: f64,
    pub lin_acc_x: f64,
    pub lin_acc_y: f64,
    pub lin_acc_z: f64,
    pub lin_acc_time: f64,
    pub acc_x: f64,
    pub acc_y: f64,
    pub acc_z: f64,
    pub acc_time: f64,
    pub gyro_x: f64,
    pub gyro_y: f64,
    pub gyro_z: f64,
    pub gyro_time: f64,
}

impl From<&SensorSnapshot> for ExportRow {
    fn from(snapshot: &SensorSnapshot) -> Self {
        let [gravity_x, gravity_y, gravity_z] = snapshot.gravity().vector().inner();
        let [lin_acc_x, lin_acc_y, lin_acc_z] = snapshot.linear_acceleration().vector().inner();
        let [acc_x, acc_y, acc_z] = snapshot.acceleration().vector().inner();
        let [gyro_x, gyro_y, gyro_z] = snapshot.gyroscope().vector().inner();
        Self {
            timestamp: snapshot.captured_at().format(TIMESTAMP_FORMAT).to_string(),
            gravity_x,
            gravity_y,
            gravity_z,
            gravity_time: snapshot.gravity().device_time(),
            lin_acc_x,
            lin_acc_y,
            lin_acc_z,
            lin_acc_time: snapshot.linear_acceleration().device_time(),
            acc_x,
            acc_y,
            acc_z,
            acc_time: snapshot.acceleration().device_time(),
            gyro_x,
            gyro_y,
            gyro_z,
            gyro_time: snapshot.gyroscope().device_time(),
        }
    }
}

/// Flattens `history` into rows, preserving its order.
pub fn rows_from_history(history: &[Arc<SensorSnapshot>]) -> Vec<ExportRow> {
    history.iter().map(|snapshot| ExportRow::from(snapshot.as_ref())).collect()
}

/// Name of the export file for a run ending at `now`.
pub fn export_filename(now: DateTime<Local>) -> String {
    now.format(FILENAME_FORMAT).to_string()
}

/// Destination of exported rows.
pub trait Persistence {
    /// Writes `rows` under `filename` and returns where they ended up.
    fn write(&self, rows: &[ExportRow], filename: &str) -> Result<PathBuf, ExportError>;
}

/// Writes a CSV file with a header row into a directory, creating the directory if needed.
pub struct CsvPersistence {
    output_dir: PathBuf,
}

impl CsvPersistence {
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }
}

impl Persistence for CsvPersistence {
    fn write(&self, rows: &[ExportRow], filename: &str) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(filename);

        let mut writer = csv::Writer::from_path(&path)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(path)
    }
}

/// Outcome of a successful export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    pub path: PathBuf,
    pub rows: usize,
}

/// Exports the whole content of `buffer`. Nothing is written when the buffer is empty.
pub fn export(
    buffer: &RollingBuffer<SensorSnapshot>,
    persistence: &dyn Persistence,
    now: DateTime<Local>,
) -> Result<Option<ExportReport>, ExportError> {
    let history = buffer.history(None);
    if history.is_empty() {
        info!("No data collected, nothing to export");
        return Ok(None);
    }

    let rows = rows_from_history(&history);
    let path = persistence.write(&rows, &export_filename(now))?;
    info!("Data exported to {}", path.display());
    info!("Total samples collected: {}", rows.len());
    Ok(Some(ExportReport {
        path,
        rows: rows.len(),
    }))
}
