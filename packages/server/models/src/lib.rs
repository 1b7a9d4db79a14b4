#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the rent map server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the aggregation types to allow independent evolution of the API
//! contract.

use rent_map_analytics_models::ValueRange;
use rent_map_rent_models::{
    ConstructionPeriod, FilterSelection, Furnishing, RentVariable, RoomCount, SelectOption,
    parse_keys,
};
use serde::{Deserialize, Serialize};

/// Query parameters carrying a filter selection.
///
/// Each category parameter is a comma-separated list of option keys. When
/// no parameter is given at all the dashboard defaults apply; a parameter
/// that is present but empty selects nothing in that dimension.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionQueryParams {
    /// Room count keys (`1`..`4`).
    pub rooms: Option<String>,
    /// Construction period keys.
    pub periods: Option<String>,
    /// Furnishing keys.
    pub furnishings: Option<String>,
    /// Rent variable key (`ref`, `max`, `min`).
    pub variable: Option<String>,
}

impl SelectionQueryParams {
    /// Resolves the parameters into a [`FilterSelection`].
    ///
    /// Missing dimensions keep their default subset, and an unknown
    /// variable key falls back to the default variable.
    #[must_use]
    pub fn to_selection(&self) -> FilterSelection {
        let defaults = FilterSelection::default();
        FilterSelection {
            rooms: self
                .rooms
                .as_deref()
                .map_or(defaults.rooms, parse_keys::<RoomCount>),
            periods: self
                .periods
                .as_deref()
                .map_or(defaults.periods, parse_keys::<ConstructionPeriod>),
            furnishings: self
                .furnishings
                .as_deref()
                .map_or(defaults.furnishings, parse_keys::<Furnishing>),
            variable: self
                .variable
                .as_deref()
                .and_then(|v| v.trim().parse::<RentVariable>().ok())
                .unwrap_or(defaults.variable),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// One entry of an option table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiOption {
    /// Key accepted in query strings.
    pub key: String,
    /// Human-readable label.
    pub label: String,
}

/// One filter control: its query parameter, title and options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiControl {
    /// Query parameter name.
    pub field: String,
    /// Control title.
    pub title: String,
    /// Whether more than one option may be selected.
    pub multiple: bool,
    /// Available options, in display order.
    pub options: Vec<ApiOption>,
}

impl ApiControl {
    /// Builds the control description for option table `T`.
    #[must_use]
    pub fn of<T: SelectOption>(multiple: bool) -> Self {
        Self {
            field: T::FIELD.to_string(),
            title: T::TITLE.to_string(),
            multiple,
            options: T::all()
                .iter()
                .map(|o| ApiOption {
                    key: o.key().to_string(),
                    label: o.label().to_string(),
                })
                .collect(),
        }
    }

    /// All four dashboard controls, in display order.
    #[must_use]
    pub fn all() -> Vec<Self> {
        vec![
            Self::of::<RoomCount>(true),
            Self::of::<ConstructionPeriod>(true),
            Self::of::<Furnishing>(true),
            Self::of::<RentVariable>(false),
        ]
    }
}

/// Aggregated zones for one selection.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiZones {
    /// The resolved selection.
    pub selection: FilterSelection,
    /// Descriptive text (Markdown).
    pub description: String,
    /// Bounds of the zone means, `null` when no zone has a value.
    pub range: Option<ValueRange>,
    /// Color-scale domain `[floor(min), ceil(max)]`.
    pub color_domain: Option<[f64; 2]>,
    /// Zones as a `GeoJSON` `FeatureCollection`.
    pub zones: geojson::FeatureCollection,
}
