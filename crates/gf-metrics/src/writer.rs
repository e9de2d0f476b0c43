//! Artifact writers: `metrics.json` plus the three heatmap CSVs.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::heatmap::HeatGrid;
use crate::metrics::MetricsReport;
use crate::MetricsResult;

pub const METRICS_FILE: &str = "metrics.json";
pub const HEATMAP_VISITS_FILE: &str = "heatmap_visits.csv";
pub const HEATMAP_WAITS_FILE: &str = "heatmap_waits.csv";
pub const HEATMAP_RATIO_FILE: &str = "heatmap_ratio.csv";

/// Write the report and all heatmap arrays into `dir`.
///
/// Output is deterministic: fixed JSON field order, row-major CSV, shortest
/// float formatting.
pub fn write_artifacts(
    dir: &Path,
    report: &MetricsReport,
    visits: &HeatGrid,
    waits: &HeatGrid,
) -> MetricsResult<()> {
    write_report(&dir.join(METRICS_FILE), report)?;
    write_counts(&dir.join(HEATMAP_VISITS_FILE), visits)?;
    write_counts(&dir.join(HEATMAP_WAITS_FILE), waits)?;
    write_ratio(&dir.join(HEATMAP_RATIO_FILE), waits, visits)?;
    Ok(())
}

fn write_report(path: &Path, report: &MetricsReport) -> MetricsResult<()> {
    let mut file = File::create(path)?;
    serde_json::to_writer_pretty(&mut file, report)?;
    file.write_all(b"\n")?;
    Ok(())
}

fn write_counts(path: &Path, grid: &HeatGrid) -> MetricsResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in 0..grid.height() {
        write_float_row(&mut writer, &grid.row_f64(row))?;
    }
    writer.flush()?;
    Ok(())
}

fn write_ratio(path: &Path, waits: &HeatGrid, visits: &HeatGrid) -> MetricsResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in 0..waits.height() {
        write_float_row(&mut writer, &waits.ratio_row_f64(visits, row))?;
    }
    writer.flush()?;
    Ok(())
}

fn write_float_row(writer: &mut csv::Writer<File>, row: &[f64]) -> MetricsResult<()> {
    let fields: Vec<String> = row.iter().map(|v| v.to_string()).collect();
    writer.write_record(&fields)?;
    Ok(())
}
