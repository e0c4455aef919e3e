// src/io/reporting.rs

use crate::simulation::engine::ActionRecord;
use log::info;
use serde::Serialize;
use std::error::Error;
use std::path::{Path, PathBuf};

/// One line of the per-run summary file.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub algorithm: &'static str,
    pub score: f64,
    pub completed_orders: usize,
    pub total_orders: usize,
    pub turns: u32,
    pub iterations: usize,
}

/// Writes a drone-by-drone action log to a CSV file.
///
/// # Arguments
/// * `file_path` - The path to save the file (e.g., "results/sa_actions.csv").
/// * `data` - Action records, already in drone then time order.
pub fn write_simulation_log<P: AsRef<Path>>(
    file_path: P,
    data: &[ActionRecord],
) -> Result<(), Box<dyn Error>> {
    write_rows(file_path.as_ref(), data)
}

/// Writes run summaries (score, completed orders, ...) to a CSV file.
pub fn write_run_summary<P: AsRef<Path>>(
    file_path: P,
    summaries: &[RunSummary],
) -> Result<(), Box<dyn Error>> {
    write_rows(file_path.as_ref(), summaries)
}

/// `results/sa.csv` -> `results/sa_summary.csv`
pub fn summary_path_for(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "run".to_string());
    path.with_file_name(format!("{}_summary.csv", stem))
}

fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut wtr = csv::Writer::from_path(path)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    // Flush the buffer to ensure all data is written
    wtr.flush()?;

    info!("Exported {} rows to '{}'", rows.len(), path.display());
    Ok(())
}
