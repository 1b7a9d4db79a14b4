//! Process-wide memoization of parsed datasets.
//!
//! Each source location gets its own one-time-init cell. The first caller
//! for a location performs the fetch and parse; concurrent callers wait on
//! the same cell, and every later caller receives the same shared table.
//! A failed load leaves the cell empty.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use rent_map_dataset_models::RentTable;
use tokio::sync::OnceCell;

use crate::fetch::{DataSource, fetch_geojson};
use crate::parse::parse_table;
use crate::DatasetError;

/// Memoized tables keyed by source location.
#[derive(Default)]
pub struct DatasetCache {
    tables: Mutex<BTreeMap<String, Arc<OnceCell<Arc<RentTable>>>>>,
}

impl DatasetCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the table for `source`, fetching and parsing it on first
    /// access.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if the first load fails to fetch or parse.
    pub async fn get_or_load(
        &self,
        client: &reqwest::Client,
        source: &DataSource,
    ) -> Result<Arc<RentTable>, DatasetError> {
        let location = source.to_string();
        let key = location.clone();
        self.get_or_try_init(&key, move || async move {
            let body = fetch_geojson(client, source).await?;
            parse_table(&location, &body)
        })
        .await
    }

    /// Returns the table stored under `location`, running `load` if no
    /// table has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `load`.
    pub async fn get_or_try_init<F, Fut>(
        &self,
        location: &str,
        load: F,
    ) -> Result<Arc<RentTable>, DatasetError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<RentTable, DatasetError>>,
    {
        let cell = self.cell(location);

        if let Some(table) = cell.get() {
            log::debug!("Dataset cache hit for {location}");
            return Ok(Arc::clone(table));
        }

        let table = cell
            .get_or_try_init(|| async move { load().await.map(Arc::new) })
            .await?;

        Ok(Arc::clone(table))
    }

    /// Returns the table stored under `location` without loading it.
    #[must_use]
    pub fn get(&self, location: &str) -> Option<Arc<RentTable>> {
        self.tables
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(location)
            .and_then(|cell| cell.get().cloned())
    }

    fn cell(&self, location: &str) -> Arc<OnceCell<Arc<RentTable>>> {
        let mut tables = self.tables.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(tables.entry(location.to_string()).or_default())
    }
}
