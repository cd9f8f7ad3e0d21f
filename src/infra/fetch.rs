use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;

pub fn http_client(timeout: Option<Duration>) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .context("failed to build http client")
}

/// Downloads a whole source file into memory.
pub fn fetch_bytes(client: &Client, url: &str) -> Result<Vec<u8>> {
    let response = client
        .get(url)
        .send()
        .with_context(|| format!("request failed: {url}"))?
        .error_for_status()
        .with_context(|| format!("unexpected response status: {url}"))?;

    let bytes = response
        .bytes()
        .with_context(|| format!("failed to read response body: {url}"))?;
    tracing::debug!(url, bytes = bytes.len(), "fetched source");
    Ok(bytes.to_vec())
}
