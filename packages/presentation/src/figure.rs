//! Plotly `choroplethmapbox` figure description.
//!
//! The figure is serialized to JSON and handed to Plotly.js as-is, so the
//! field names below follow Plotly's attribute names rather than Rust
//! conventions.

use geojson::FeatureCollection;
use rent_map_analytics::to_feature_collection;
use rent_map_analytics_models::{ZoneAggregation, round2};
use rent_map_rent_models::SelectOption as _;
use serde::Serialize;

/// Three-step sequential color ramp, light to dark orange.
pub const COLOR_SCALE: [&str; 3] = ["#fee6ce", "#fdae6b", "#e6550d"];

/// Base-map tile style.
pub const MAP_STYLE: &str = "open-street-map";

/// Map center, on central Paris.
pub const MAP_CENTER: MapCenter = MapCenter {
    lat: 48.86,
    lon: 2.33,
};

/// Initial zoom level.
pub const MAP_ZOOM: f64 = 11.0;

/// Zone fill opacity.
pub const FILL_OPACITY: f64 = 0.5;

/// Figure height in pixels.
pub const FIGURE_HEIGHT: u32 = 600;

/// Figure width in pixels.
pub const FIGURE_WIDTH: u32 = 900;

/// A complete Plotly figure: one choropleth trace over a tile map.
#[derive(Debug, Clone, Serialize)]
pub struct ChoroplethFigure {
    /// Traces (always exactly one).
    pub data: Vec<ChoroplethTrace>,
    /// Layout.
    pub layout: Layout,
}

/// The choropleth trace.
#[derive(Debug, Clone, Serialize)]
pub struct ChoroplethTrace {
    /// Plotly trace type.
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Zone shapes, matched to `locations` by feature id.
    pub geojson: FeatureCollection,
    /// Zone ids.
    pub locations: Vec<String>,
    /// Zone values, rounded to two decimals.
    pub z: Vec<Option<f64>>,
    /// `[position, color]` stops.
    pub colorscale: Vec<(f64, &'static str)>,
    /// Lower color bound. Omitted when there is no data, letting Plotly
    /// pick its own.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zmin: Option<f64>,
    /// Upper color bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zmax: Option<f64>,
    /// Fill style.
    pub marker: Marker,
    /// Color bar legend.
    pub colorbar: ColorBar,
}

/// Fill style of the zones.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Marker {
    /// Fill opacity.
    pub opacity: f64,
}

/// Color bar legend.
#[derive(Debug, Clone, Serialize)]
pub struct ColorBar {
    /// Legend title.
    pub title: ColorBarTitle,
}

/// Color bar title.
#[derive(Debug, Clone, Serialize)]
pub struct ColorBarTitle {
    /// Title text.
    pub text: String,
}

/// Figure layout.
#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    /// Tile map settings.
    pub mapbox: Mapbox,
    /// Height in pixels.
    pub height: u32,
    /// Width in pixels.
    pub width: u32,
    /// Outer margins.
    pub margin: Margin,
}

/// Tile map settings.
#[derive(Debug, Clone, Serialize)]
pub struct Mapbox {
    /// Base-map style.
    pub style: &'static str,
    /// Initial center.
    pub center: MapCenter,
    /// Initial zoom.
    pub zoom: f64,
}

/// A geographic coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapCenter {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lon: f64,
}

/// Outer margins in pixels.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Margin {
    /// Left.
    pub l: u32,
    /// Right.
    pub r: u32,
    /// Top.
    pub t: u32,
    /// Bottom.
    pub b: u32,
}

impl ChoroplethFigure {
    /// Builds the figure for `aggregation`.
    ///
    /// The color domain is `[floor(min), ceil(max)]` of the zone means.
    #[must_use]
    pub fn new(aggregation: &ZoneAggregation) -> Self {
        let domain = aggregation.value_range().map(|r| r.color_domain());

        #[allow(clippy::cast_precision_loss)]
        let last = (COLOR_SCALE.len() - 1) as f64;
        let colorscale = COLOR_SCALE
            .iter()
            .enumerate()
            .map(|(i, color)| {
                #[allow(clippy::cast_precision_loss)]
                let position = i as f64 / last;
                (position, *color)
            })
            .collect();

        let trace = ChoroplethTrace {
            kind: "choroplethmapbox",
            geojson: to_feature_collection(aggregation),
            locations: aggregation
                .zones
                .iter()
                .map(|z| z.zone.to_string())
                .collect(),
            z: aggregation.zones.iter().map(|z| z.value.map(round2)).collect(),
            colorscale,
            zmin: domain.map(|[lo, _]| lo),
            zmax: domain.map(|[_, hi]| hi),
            marker: Marker {
                opacity: FILL_OPACITY,
            },
            colorbar: ColorBar {
                title: ColorBarTitle {
                    text: format!("{} (€/m²)", aggregation.variable.label()),
                },
            },
        };

        Self {
            data: vec![trace],
            layout: Layout {
                mapbox: Mapbox {
                    style: MAP_STYLE,
                    center: MAP_CENTER,
                    zoom: MAP_ZOOM,
                },
                height: FIGURE_HEIGHT,
                width: FIGURE_WIDTH,
                margin: Margin {
                    l: 0,
                    r: 0,
                    t: 0,
                    b: 0,
                },
            },
        }
    }

    /// The choropleth trace.
    #[must_use]
    pub fn trace(&self) -> &ChoroplethTrace {
        &self.data[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rent_map_analytics_models::AggregatedZone;
    use rent_map_dataset_models::ZoneId;
    use rent_map_rent_models::RentVariable;

    fn aggregation(values: &[Option<f64>]) -> ZoneAggregation {
        ZoneAggregation {
            variable: RentVariable::Reference,
            zones: values
                .iter()
                .enumerate()
                .map(|(i, value)| AggregatedZone {
                    zone: ZoneId(format!("75101{i:02}")),
                    value: *value,
                    shape: geo::Point::new(2.33, 48.86).into(),
                    records: 2,
                })
                .collect(),
        }
    }

    #[test]
    fn color_domain_is_floor_min_ceil_max() {
        let figure = ChoroplethFigure::new(&aggregation(&[Some(22.4), Some(31.2), None]));
        let trace = figure.trace();
        assert_eq!(trace.zmin, Some(22.0));
        assert_eq!(trace.zmax, Some(32.0));
        assert_eq!(trace.z, vec![Some(22.4), Some(31.2), None]);
        assert_eq!(trace.locations, vec!["7510100", "7510101", "7510102"]);
    }

    #[test]
    fn empty_aggregation_has_no_color_domain() {
        let figure = ChoroplethFigure::new(&aggregation(&[]));
        let json = serde_json::to_value(&figure).unwrap();
        let trace = &json["data"][0];
        assert!(trace.get("zmin").is_none());
        assert!(trace.get("zmax").is_none());
        assert_eq!(trace["locations"], serde_json::json!([]));
        assert_eq!(trace["geojson"]["features"], serde_json::json!([]));
    }

    #[test]
    fn serializes_fixed_map_settings() {
        let figure = ChoroplethFigure::new(&aggregation(&[Some(25.0)]));
        let json = serde_json::to_value(&figure).unwrap();

        assert_eq!(json["data"][0]["type"], "choroplethmapbox");
        assert_eq!(
            json["data"][0]["colorscale"],
            serde_json::json!([[0.0, "#fee6ce"], [0.5, "#fdae6b"], [1.0, "#e6550d"]])
        );
        assert_eq!(json["data"][0]["marker"]["opacity"], 0.5);
        assert_eq!(
            json["data"][0]["colorbar"]["title"]["text"],
            "Loyer de référence (€/m²)"
        );
        assert_eq!(json["layout"]["mapbox"]["style"], "open-street-map");
        assert_eq!(
            json["layout"]["mapbox"]["center"],
            serde_json::json!({"lat": 48.86, "lon": 2.33})
        );
        assert_eq!(json["layout"]["mapbox"]["zoom"], 11.0);
        assert_eq!(json["layout"]["height"], 600);
        assert_eq!(json["layout"]["width"], 900);
        assert_eq!(json["data"][0]["geojson"]["features"][0]["id"], "7510100");
    }
}
