#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Presentation of an aggregated selection.
//!
//! Turns a [`rent_map_analytics_models::ZoneAggregation`] into the three
//! things the dashboard shows: a short French description of the value
//! range, a Plotly `choroplethmapbox` figure, and the HTML page embedding
//! both next to the filter controls. Rendering itself is left to Plotly in
//! the browser.

pub mod describe;
pub mod figure;
pub mod page;

use thiserror::Error;

pub use describe::{Description, describe};
pub use figure::ChoroplethFigure;
pub use page::{render_error_page, render_page};

/// Errors that can occur while rendering.
#[derive(Debug, Error)]
pub enum PresentationError {
    /// Figure serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
