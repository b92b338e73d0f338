use std::io::Write;
use std::path::Path;

use anyhow::Context;

use crate::models::ForecastRow;

pub fn write_forecast_csv<W: Write>(output: W, rows: &[ForecastRow]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(output);

    for row in rows {
        writer.serialize(row)?;
    }

    writer.flush()?;
    Ok(())
}

pub fn export_forecast(path: &Path, rows: &[ForecastRow]) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    write_forecast_csv(file, rows).with_context(|| format!("failed to export {}", path.display()))
}
