#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web dashboard server for the rent map.
//!
//! Serves the dashboard page at `/` and a small JSON API under `/api`.
//! Every request is one pass of the pipeline: resolve the filter selection
//! from the query string, fetch the memoized dataset (downloading it on
//! first use), aggregate per zone, and render the description and
//! choropleth figure.

mod handlers;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use rent_map_analytics::aggregate;
use rent_map_analytics_models::ZoneAggregation;
use rent_map_dataset::{DataSource, DatasetCache, DatasetError, DEFAULT_SOURCE};
use rent_map_presentation::{ChoroplethFigure, Description, PresentationError, describe};
use rent_map_rent_models::FilterSelection;
use thiserror::Error;

/// Errors that can occur while serving a dashboard interaction.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The dataset could not be fetched or parsed.
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// The page could not be rendered.
    #[error("Presentation error: {0}")]
    Presentation(#[from] PresentationError),
}

/// Server configuration, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind (`BIND_ADDR`, default `127.0.0.1`).
    pub bind_addr: String,
    /// Port to listen on (`PORT`, default `8080`).
    pub port: u16,
    /// Dataset location (`RENT_MAP_SOURCE`, default the Paris open data
    /// export).
    pub source: DataSource,
}

impl ServerConfig {
    /// Reads the configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            bind_addr: var("BIND_ADDR").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: var("PORT").and_then(|p| p.parse().ok()).unwrap_or(8080),
            source: DataSource::parse(
                &var("RENT_MAP_SOURCE").unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
            ),
        }
    }
}

/// Shared application state.
pub struct AppState {
    /// HTTP client used to download the dataset.
    pub client: reqwest::Client,
    /// Process-wide memoized datasets.
    pub cache: Arc<DatasetCache>,
    /// Dataset location.
    pub source: DataSource,
}

impl AppState {
    /// Creates state with an empty cache for `source`.
    #[must_use]
    pub fn new(source: DataSource) -> Self {
        Self {
            client: reqwest::Client::new(),
            cache: Arc::new(DatasetCache::new()),
            source,
        }
    }
}

/// Everything one interaction produces.
#[derive(Debug, Clone)]
pub struct RenderedView {
    /// Resolved selection.
    pub selection: FilterSelection,
    /// Per-zone result.
    pub aggregation: ZoneAggregation,
    /// Descriptive text.
    pub description: Description,
    /// Choropleth figure.
    pub figure: ChoroplethFigure,
}

/// Runs the pipeline for one interaction.
///
/// # Errors
///
/// Returns [`ServerError::Dataset`] if the dataset has not been loaded yet
/// and fetching or parsing it fails.
pub async fn render_view(
    state: &AppState,
    selection: FilterSelection,
) -> Result<RenderedView, ServerError> {
    let table = state
        .cache
        .get_or_load(&state.client, &state.source)
        .await?;

    let aggregation = aggregate(&table, &selection);
    let description = describe(&aggregation);
    let figure = ChoroplethFigure::new(&aggregation);

    Ok(RenderedView {
        selection,
        aggregation,
        description,
        figure,
    })
}

/// Registers the dashboard and API routes.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/options", web::get().to(handlers::options))
            .route("/zones", web::get().to(handlers::zones)),
    )
    .route("/", web::get().to(handlers::index));
}

/// Starts the rent map server.
///
/// Reads [`ServerConfig`] from the environment and starts the Actix-Web
/// HTTP server. The dataset is downloaded lazily by the first request.
/// This is a regular async function; the caller provides the runtime
/// (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let config = ServerConfig::from_env();
    log::info!("Dataset source: {}", config.source);

    let state = web::Data::new(AppState::new(config.source.clone()));

    log::info!("Starting server on {}:{}", config.bind_addr, config.port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(routes)
    })
    .bind((config.bind_addr, config.port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn config(vars: &[(&str, &str)]) -> ServerConfig {
        let vars: BTreeMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ServerConfig::from_vars(|name| vars.get(name).cloned())
    }

    #[test]
    fn config_defaults() {
        let config = config(&[]);
        assert_eq!(config.bind_addr, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.source, DataSource::Url(DEFAULT_SOURCE.to_string()));
    }

    #[test]
    fn config_overrides() {
        let config = config(&[
            ("BIND_ADDR", "0.0.0.0"),
            ("PORT", "9000"),
            ("RENT_MAP_SOURCE", "data/loyers.geojson"),
        ]);
        assert_eq!(config.bind_addr, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(
            config.source,
            DataSource::Path(std::path::PathBuf::from("data/loyers.geojson"))
        );
    }

    #[test]
    fn invalid_port_falls_back() {
        assert_eq!(config(&[("PORT", "http")]).port, 8080);
    }
}
