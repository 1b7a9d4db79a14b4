#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Reference-rent dataset acquisition.
//!
//! Downloads the Paris `logement-encadrement-des-loyers` `GeoJSON` export
//! (or reads a local copy), parses every feature into a
//! [`rent_map_dataset_models::GeoRecord`], and memoizes the parsed table
//! per source location for the lifetime of the process.

pub mod cache;
pub mod fetch;
pub mod parse;

use thiserror::Error;

pub use cache::DatasetCache;
pub use fetch::DataSource;

/// Default dataset location: the Paris open data `GeoJSON` export.
pub const DEFAULT_SOURCE: &str = "https://opendata.paris.fr/explore/dataset/logement-encadrement-des-loyers/download/?format=geojson&timezone=Europe/Berlin&lang=fr";

/// Errors that can occur while fetching or parsing the dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Reading a local file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The payload is not valid `GeoJSON`.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// Data conversion error.
    #[error("Conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },
}
