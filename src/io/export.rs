//! CSV and JSON export for simulation outputs.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::sim::params::ParameterRecord;
use crate::sim::types::{TRAJECTORY_COLUMNS, Trajectory};

/// Exports a trajectory to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_trajectory_csv(trajectory: &Trajectory, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_trajectory_csv(trajectory, io::BufWriter::new(file))
}

/// Writes a trajectory as CSV to any writer.
///
/// One header row (`Day` plus the five compartments) followed by one row
/// per sampled day, compartment values to two decimals.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_trajectory_csv(trajectory: &Trajectory, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(TRAJECTORY_COLUMNS)?;
    for r in trajectory.rows() {
        let mut record = vec![r.day.to_string()];
        record.extend(r.values().iter().map(|v| format!("{v:.2}")));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports a parameter record to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_params_csv(params: &ParameterRecord, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_params_csv(params, io::BufWriter::new(file))
}

/// Writes a parameter record as `parameter,value` CSV.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_params_csv(params: &ParameterRecord, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(["parameter", "value"])?;
    for e in params.entries() {
        wtr.write_record([e.label.as_str(), e.value.to_string().as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes any serializable output (chart, parameters, full run) as pretty JSON.
///
/// # Errors
///
/// Returns an `io::Error` if file creation, serialization, or writing fails.
pub fn export_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let mut buf = io::BufWriter::new(file);
    serde_json::to_writer_pretty(&mut buf, value).map_err(io::Error::other)?;
    buf.flush()
}
