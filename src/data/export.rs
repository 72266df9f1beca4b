use std::io::Write;
use std::path::Path;
use crate::state::power_series::PowerSeries;

pub const CSV_HEADER: [&str; 5] = ["timestamp", "ac_kw", "dc_kw", "derived_kw", "smoothed_kw"];

/// Write the series as CSV rows, one per sample.
pub fn write_csv<W: Write>(series: &PowerSeries, out: W) -> Result<(), String> {
    let mut writer = csv::Writer::from_writer(out);
    writer
        .write_record(CSV_HEADER)
        .map_err(|e| format!("Cannot write CSV header: {e}"))?;

    for i in 0..series.len() {
        writer
            .write_record([
                series.timestamps[i].clone(),
                series.ac_kw[i].to_string(),
                series.dc_kw[i].to_string(),
                series.derived_kw[i].to_string(),
                series.smoothed_kw[i].to_string(),
            ])
            .map_err(|e| format!("Cannot write CSV row {i}: {e}"))?;
    }

    writer.flush().map_err(|e| format!("Cannot flush CSV: {e}"))
}

pub fn export_csv(series: &PowerSeries, path: &Path) -> Result<(), String> {
    let file = std::fs::File::create(path)
        .map_err(|e| format!("Cannot create {}: {e}", path.display()))?;
    write_csv(series, file)?;
    tracing::info!("Exported {} rows to {:?}", series.len(), path);
    Ok(())
}

/// Write the series as one JSON object of five arrays.
pub fn write_json<W: Write>(series: &PowerSeries, out: W) -> Result<(), String> {
    serde_json::to_writer_pretty(out, series).map_err(|e| format!("Failed to serialize series: {e}"))
}

pub fn export_json(series: &PowerSeries, path: &Path) -> Result<(), String> {
    let file = std::fs::File::create(path)
        .map_err(|e| format!("Cannot create {}: {e}", path.display()))?;
    write_json(series, file)?;
    tracing::info!("Exported {} points as JSON to {:?}", series.len(), path);
    Ok(())
}
