//! Converts a `GeoJSON` `FeatureCollection` into a [`RentTable`].
//!
//! Category properties are resolved against the fixed option tables;
//! values outside those tables are kept as `None` rather than rejected.
//! Numbers may arrive either as JSON numbers or as numeric strings.

use geojson::{Feature, GeoJson};
use rent_map_dataset_models::{GeoRecord, RentTable, ZoneId};
use rent_map_rent_models::{ConstructionPeriod, Furnishing, RoomCount};
use serde_json::Value;

use crate::DatasetError;

/// Property holding the zone-grouping identifier.
pub const ZONE_FIELD: &str = "code_grand_quartier";

/// Parses a `GeoJSON` body into a table of records.
///
/// # Errors
///
/// Returns [`DatasetError`] if the body is not valid `GeoJSON`, is not a
/// `FeatureCollection`, or contains a feature without a usable geometry or
/// zone identifier.
pub fn parse_table(source: &str, body: &str) -> Result<RentTable, DatasetError> {
    let geojson: GeoJson = body.parse()?;

    let GeoJson::FeatureCollection(collection) = geojson else {
        return Err(DatasetError::Conversion {
            message: "Expected a GeoJSON FeatureCollection".to_string(),
        });
    };

    let records = collection
        .features
        .into_iter()
        .enumerate()
        .map(|(index, feature)| parse_feature(index, feature))
        .collect::<Result<Vec<_>, _>>()?;

    log::info!("Parsed {} rent records from {source}", records.len());

    Ok(RentTable::new(source.to_string(), records))
}

fn parse_feature(index: usize, feature: Feature) -> Result<GeoRecord, DatasetError> {
    let geometry = feature.geometry.ok_or_else(|| DatasetError::Conversion {
        message: format!("Feature {index} has no geometry"),
    })?;
    let shape: geo::Geometry<f64> = geometry.try_into()?;

    let properties = feature.properties.unwrap_or_default();

    let zone = properties
        .get(ZONE_FIELD)
        .and_then(as_zone_id)
        .ok_or_else(|| DatasetError::Conversion {
            message: format!("Feature {index} has no {ZONE_FIELD}"),
        })?;

    let rooms = properties
        .get("piece")
        .and_then(as_i64)
        .and_then(|v| RoomCount::from_value(v).ok());
    let period = properties
        .get("epoque")
        .and_then(Value::as_str)
        .and_then(ConstructionPeriod::from_value);
    let furnishing = properties
        .get("meuble_txt")
        .and_then(Value::as_str)
        .and_then(Furnishing::from_value);

    Ok(GeoRecord {
        zone,
        shape,
        rooms,
        period,
        furnishing,
        reference: properties.get("ref").and_then(as_f64),
        increased: properties.get("max").and_then(as_f64),
        decreased: properties.get("min").and_then(as_f64),
        properties,
    })
}

fn as_zone_id(value: &Value) -> Option<ZoneId> {
    match value {
        Value::Number(_) => as_i64(value).map(|v| ZoneId(v.to_string())),
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| ZoneId::from(s))
        }
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
