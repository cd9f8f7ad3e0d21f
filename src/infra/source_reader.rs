use std::time::Duration;

use reqwest::blocking::Client;

use crate::infra::fetch::{fetch_bytes, http_client};
use crate::infra::import::csv::{read_csv_from_bytes, read_csv_from_path};
use crate::infra::import::xlsx::{read_first_sheet_from_bytes, read_first_sheet_from_path};
use crate::usecase::ports::source::{
    SourceError, SourceFormat, SourceLocation, SourceReader, TabularData,
};

/// Reads spreadsheets and CSV files from disk or over HTTP(S).
/// One HTTP client is shared by every remote source.
#[derive(Debug, Clone)]
pub struct LocalOrRemoteReader {
    client: Client,
}

impl LocalOrRemoteReader {
    pub fn new(http_timeout: Option<Duration>) -> anyhow::Result<Self> {
        Ok(Self::with_client(http_client(http_timeout)?))
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl SourceReader for LocalOrRemoteReader {
    fn read_table(&self, location: &SourceLocation) -> Result<TabularData, SourceError> {
        let format = location.format()?;
        let label = location.to_string();
        let decode_err = |err: anyhow::Error| SourceError::Decode {
            location: label.clone(),
            message: format!("{err:#}"),
        };

        match location {
            SourceLocation::Path(path) => {
                if !path.exists() {
                    return Err(SourceError::Io {
                        location: label.clone(),
                        source: std::io::Error::new(
                            std::io::ErrorKind::NotFound,
                            "file does not exist",
                        ),
                    });
                }
                let decoded = match format {
                    SourceFormat::Spreadsheet => read_first_sheet_from_path(path),
                    SourceFormat::Csv => read_csv_from_path(path),
                };
                decoded.map_err(decode_err)
            }
            SourceLocation::Url(url) => {
                let bytes = fetch_bytes(&self.client, url).map_err(|err| {
                    SourceError::Fetch {
                        location: label.clone(),
                        message: format!("{err:#}"),
                    }
                })?;
                let decoded = match format {
                    SourceFormat::Spreadsheet => read_first_sheet_from_bytes(bytes, &label),
                    SourceFormat::Csv => read_csv_from_bytes(&bytes, &label),
                };
                decoded.map_err(decode_err)
            }
        }
    }
}
