//! Raw dataset retrieval.
//!
//! A [`DataSource`] is either an `http(s)` URL, fetched with `reqwest`, or a
//! path to a local `GeoJSON` file.

use std::path::PathBuf;

use crate::DatasetError;

/// Where the dataset is loaded from.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DataSource {
    /// Remote `GeoJSON` URL.
    Url(String),
    /// Local `GeoJSON` file.
    Path(PathBuf),
}

impl DataSource {
    /// Parses a location string. Anything starting with `http://` or
    /// `https://` is a URL; everything else is a filesystem path.
    #[must_use]
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        if location.starts_with("http://") || location.starts_with("https://") {
            Self::Url(location.to_string())
        } else {
            Self::Path(PathBuf::from(location))
        }
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Url(url) => f.write_str(url),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Fetches the raw `GeoJSON` body from `source`.
///
/// Performs exactly one request (or one file read). No retries.
///
/// # Errors
///
/// Returns [`DatasetError`] if the request fails, the server answers with
/// a non-success status, or the file cannot be read.
pub async fn fetch_geojson(
    client: &reqwest::Client,
    source: &DataSource,
) -> Result<String, DatasetError> {
    match source {
        DataSource::Url(url) => {
            log::info!("Downloading dataset from {url}");
            let resp = client.get(url).send().await?;
            if !resp.status().is_success() {
                return Err(DatasetError::Conversion {
                    message: format!("GeoJSON request failed with status {}", resp.status()),
                });
            }
            Ok(resp.text().await?)
        }
        DataSource::Path(path) => {
            log::info!("Reading dataset from {}", path.display());
            Ok(tokio::fs::read_to_string(path).await?)
        }
    }
}
