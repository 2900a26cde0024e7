use crate::models::{ChartDescriptor, Observation};
use crate::plotly::figures_json;
use anyhow::Result;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Prefix cells that a spreadsheet would evaluate as a formula.
fn guard_cell(s: &str) -> String {
    if s.starts_with(['=', '+', '-', '@']) {
        format!("'{s}")
    } else {
        s.to_string()
    }
}

/// Save observations as CSV with header `country,year,<metric>`.
pub fn save_csv<P: AsRef<Path>>(points: &[Observation], metric: &str, path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.write_record(["country", "year", metric])?;
    for p in points {
        wtr.serialize((guard_cell(&p.country), p.year, p.value))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save observations as pretty JSON array.
pub fn save_json<P: AsRef<Path>>(points: &[Observation], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(points)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Save chart descriptors as Plotly figure JSON.
pub fn save_figures_json<P: AsRef<Path>>(
    charts: &[ChartDescriptor],
    path: P,
    pretty: bool,
) -> Result<()> {
    let mut f = File::create(path)?;
    let v = figures_json(charts);
    let s = if pretty {
        serde_json::to_string_pretty(&v)?
    } else {
        serde_json::to_string(&v)?
    };
    f.write_all(s.as_bytes())?;
    Ok(())
}
