//! Group-by-zone mean of the selected rent value.

use std::collections::BTreeMap;

use geojson::{Feature, FeatureCollection, feature::Id};
use rent_map_analytics_models::{AggregatedZone, ZoneAggregation, round2};
use rent_map_dataset_models::{RentTable, ZoneId};
use rent_map_rent_models::FilterSelection;

use crate::filter::matches;

/// Running totals for one zone.
struct ZoneAccumulator<'a> {
    shape: &'a geo::Geometry<f64>,
    sum: f64,
    values: usize,
    records: usize,
}

impl<'a> ZoneAccumulator<'a> {
    const fn new(shape: &'a geo::Geometry<f64>) -> Self {
        Self {
            shape,
            sum: 0.0,
            values: 0,
            records: 0,
        }
    }

    fn push(&mut self, value: Option<f64>) {
        self.records += 1;
        if let Some(v) = value.filter(|v| !v.is_nan()) {
            self.sum += v;
            self.values += 1;
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn mean(&self) -> Option<f64> {
        (self.values > 0).then(|| self.sum / self.values as f64)
    }
}

/// Filters `table` by `selection` and averages the selected variable per
/// zone.
///
/// Zones are returned in ascending id order. Each zone keeps the shape of
/// its first matching record in table order. Records missing the selected
/// value still count toward the zone but not toward its mean.
#[must_use]
pub fn aggregate(table: &RentTable, selection: &FilterSelection) -> ZoneAggregation {
    let mut groups: BTreeMap<&ZoneId, ZoneAccumulator<'_>> = BTreeMap::new();

    for record in table.records().iter().filter(|r| matches(r, selection)) {
        groups
            .entry(&record.zone)
            .or_insert_with(|| ZoneAccumulator::new(&record.shape))
            .push(record.value(selection.variable));
    }

    let zones: Vec<AggregatedZone> = groups
        .into_iter()
        .map(|(zone, acc)| AggregatedZone {
            zone: zone.clone(),
            value: acc.mean(),
            shape: acc.shape.clone(),
            records: acc.records,
        })
        .collect();

    log::debug!(
        "Aggregated {} of {} records into {} zones ({})",
        zones.iter().map(|z| z.records).sum::<usize>(),
        table.len(),
        zones.len(),
        selection.variable,
    );

    ZoneAggregation {
        variable: selection.variable,
        zones,
    }
}

/// Converts an aggregation into a `GeoJSON` `FeatureCollection`.
///
/// Each feature's `id` is the zone id; properties carry the mean rounded to
/// two decimals (`value`, `null` when undefined) and the record count.
#[must_use]
pub fn to_feature_collection(aggregation: &ZoneAggregation) -> FeatureCollection {
    let features = aggregation
        .zones
        .iter()
        .map(|zone| {
            let mut properties = serde_json::Map::new();
            properties.insert(
                "value".to_string(),
                zone.value.map(round2).map_or(serde_json::Value::Null, Into::into),
            );
            properties.insert("records".to_string(), zone.records.into());

            Feature {
                bbox: None,
                geometry: Some(geojson::Geometry::new(geojson::Value::from(&zone.shape))),
                id: Some(Id::String(zone.zone.to_string())),
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}
