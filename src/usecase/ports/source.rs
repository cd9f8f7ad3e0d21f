use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to fetch {location}: {message}")]
    Fetch { location: String, message: String },
    #[error("failed to decode {location}: {message}")]
    Decode { location: String, message: String },
    #[error("unsupported source format: {location}")]
    UnsupportedFormat { location: String },
}

/// Where a tabular source lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    Path(PathBuf),
    Url(String),
}

impl SourceLocation {
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            SourceLocation::Url(trimmed.to_string())
        } else {
            SourceLocation::Path(PathBuf::from(trimmed))
        }
    }

    /// Lowercased file extension, ignoring any URL query or fragment.
    pub fn extension(&self) -> Option<String> {
        let name = match self {
            SourceLocation::Path(path) => path.file_name()?.to_str()?.to_string(),
            SourceLocation::Url(url) => {
                let without_suffix = url.split(['?', '#']).next().unwrap_or(url);
                without_suffix.rsplit('/').next()?.to_string()
            }
        };
        Path::new(&name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
    }

    pub fn format(&self) -> Result<SourceFormat, SourceError> {
        match self.extension().as_deref() {
            Some("xlsx" | "xlsm" | "xlsb" | "xls" | "ods") => Ok(SourceFormat::Spreadsheet),
            Some("csv") => Ok(SourceFormat::Csv),
            _ => Err(SourceError::UnsupportedFormat {
                location: self.to_string(),
            }),
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLocation::Path(path) => write!(f, "{}", path.display()),
            SourceLocation::Url(url) => f.write_str(url),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Spreadsheet,
    Csv,
}

/// A decoded sheet: the first row as column names, every later row as data.
/// Rows are padded to the column count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabularData {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TabularData {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.trim() == name)
    }

    pub fn cell<'a>(&self, row: &'a [String], idx: usize) -> &'a str {
        row.get(idx).map(String::as_str).unwrap_or("")
    }
}

pub trait SourceReader: Send + Sync {
    fn read_table(&self, location: &SourceLocation) -> Result<TabularData, SourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_detects_urls_case_insensitively() {
        assert_eq!(
            SourceLocation::parse(" HTTPS://example.com/vendas.xlsx "),
            SourceLocation::Url("HTTPS://example.com/vendas.xlsx".to_string())
        );
        assert_eq!(
            SourceLocation::parse("dados/vendas.xlsx"),
            SourceLocation::Path(PathBuf::from("dados/vendas.xlsx"))
        );
    }

    #[test]
    fn extension_ignores_url_query_and_fragment() {
        let location = SourceLocation::parse("https://host/files/Lojas.CSV?raw=true#top");
        assert_eq!(location.extension().as_deref(), Some("csv"));
        assert_eq!(location.format().ok(), Some(SourceFormat::Csv));
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let location = SourceLocation::parse("vendas.json");
        assert!(matches!(
            location.format(),
            Err(SourceError::UnsupportedFormat { .. })
        ));
        assert!(SourceLocation::parse("https://host/").format().is_err());
    }

    #[test]
    fn column_index_matches_trimmed_headers() {
        let data = TabularData {
            columns: vec!["SKU".to_string(), " Marca ".to_string()],
            rows: vec![vec!["1".to_string()]],
        };
        assert_eq!(data.column_index("Marca"), Some(1));
        assert_eq!(data.column_index("Produto"), None);
        assert_eq!(data.cell(&data.rows[0], 0), "1");
        assert_eq!(data.cell(&data.rows[0], 1), "");
    }
}
