use anyhow::{Context, Result};
use tracing::debug;

pub fn fetch_bytes(url: &str) -> Result<Vec<u8>> {
    let resp = reqwest::blocking::get(url)?.error_for_status()?;
    Ok(resp.bytes()?.to_vec())
}

/// Loads sales data from a local file path or fetches it over HTTP.
#[tracing::instrument]
pub fn load_source(source: &str) -> Result<Vec<u8>> {
    let bytes = if source.starts_with("http://") || source.starts_with("https://") {
        fetch_bytes(source).with_context(|| format!("failed to fetch {}", source))?
    } else {
        std::fs::read(source).with_context(|| format!("failed to read {}", source))?
    };
    debug!(bytes = bytes.len(), "Source loaded");
    Ok(bytes)
}
