use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use crate::usecase::ports::source::TabularData;

const UTF8_BOM: char = '\u{feff}';

pub fn read_csv_from_path(csv_path: &Path) -> Result<TabularData> {
    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("failed to open csv: {}", csv_path.display()))?;
    read_csv(file, &csv_path.display().to_string())
}

pub fn read_csv_from_bytes(bytes: &[u8], label: &str) -> Result<TabularData> {
    read_csv(bytes, label)
}

fn read_csv<R: Read>(source: R, label: &str) -> Result<TabularData> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(source);
    let headers = reader
        .headers()
        .with_context(|| format!("failed to read headers from csv: {label}"))?
        .clone();

    if headers.is_empty() {
        anyhow::bail!("csv header is required: {label}")
    }

    let columns: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            if idx == 0 {
                header.trim_start_matches(UTF8_BOM).to_string()
            } else {
                header.to_string()
            }
        })
        .collect();

    let header_len = columns.len();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("failed to parse csv record: {label}"))?;
        let row = (0..header_len)
            .map(|col_idx| record.get(col_idx).unwrap_or("").to_string())
            .collect();
        rows.push(row);
    }

    Ok(TabularData { columns, rows })
}
