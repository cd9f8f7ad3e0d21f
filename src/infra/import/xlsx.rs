use std::io::{Cursor, Read, Seek};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Reader, Sheets};

use crate::usecase::ports::source::TabularData;

pub fn read_first_sheet_from_path(path: &Path) -> Result<TabularData> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("failed to open workbook: {}", path.display()))?;
    read_first_sheet(&mut workbook, &path.display().to_string())
}

pub fn read_first_sheet_from_bytes(bytes: Vec<u8>, label: &str) -> Result<TabularData> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .with_context(|| format!("failed to open workbook: {label}"))?;
    read_first_sheet(&mut workbook, label)
}

fn read_first_sheet<RS>(workbook: &mut Sheets<RS>, label: &str) -> Result<TabularData>
where
    RS: Read + Seek,
{
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| anyhow!("workbook has no sheets: {label}"))?
        .with_context(|| format!("failed to read first sheet: {label}"))?;

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect::<Vec<String>>());
    let columns = rows.next().unwrap_or_default();
    Ok(TabularData {
        columns,
        rows: rows.collect(),
    })
}

pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(v) => v.to_string(),
        Data::Float(v) => format_f64(*v),
        Data::Int(v) => v.to_string(),
        Data::Bool(v) => v.to_string(),
        // as_datetime honours the workbook's 1900/1904 date system
        Data::DateTime(v) => v
            .as_datetime()
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| format_f64(v.as_f64())),
        Data::DateTimeIso(v) => v.to_string(),
        Data::DurationIso(v) => v.to_string(),
        Data::Error(v) => format!("{v:?}"),
        Data::Empty => String::new(),
    }
}

/// Whole floats print without a fraction so numeric ids match their text
/// form in other sheets.
pub fn format_f64(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
