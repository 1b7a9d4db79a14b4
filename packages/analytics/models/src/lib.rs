#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Per-zone aggregation result types.
//!
//! A [`ZoneAggregation`] is what one dashboard interaction produces: the
//! mean of the selected rent value for every zone that has at least one
//! record matching the current filters.

use rent_map_dataset_models::ZoneId;
use rent_map_rent_models::RentVariable;
use serde::{Deserialize, Serialize};

/// Rounds to two decimal places (cents per square metre).
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// One zone surviving the filters.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedZone {
    /// Zone identifier.
    pub zone: ZoneId,
    /// Mean of the selected value over the matching records. `None` when
    /// none of them carries the value.
    pub value: Option<f64>,
    /// Shape of the first matching record, in table order.
    pub shape: geo::Geometry<f64>,
    /// Number of matching records.
    pub records: usize,
}

/// The aggregated result of one filter selection, ordered by zone id.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneAggregation {
    /// Variable that was averaged.
    pub variable: RentVariable,
    /// One entry per zone with at least one matching record.
    pub zones: Vec<AggregatedZone>,
}

impl ZoneAggregation {
    /// Returns `true` if no zone survived the filters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Number of zones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// Minimum and maximum of the defined zone means, or `None` if there
    /// are none.
    #[must_use]
    pub fn value_range(&self) -> Option<ValueRange> {
        self.zones
            .iter()
            .filter_map(|z| z.value)
            .fold(None, |range, v| {
                Some(match range {
                    None => ValueRange { min: v, max: v },
                    Some(ValueRange { min, max }) => ValueRange {
                        min: min.min(v),
                        max: max.max(v),
                    },
                })
            })
    }
}

/// Observed bounds of the aggregated values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    /// Smallest zone mean.
    pub min: f64,
    /// Largest zone mean.
    pub max: f64,
}

impl ValueRange {
    /// Color-scale domain: `[floor(min), ceil(max)]`.
    #[must_use]
    pub fn color_domain(self) -> [f64; 2] {
        [self.min.floor(), self.max.ceil()]
    }

    /// Bounds rounded to two decimals, for display.
    #[must_use]
    pub fn rounded(self) -> Self {
        Self {
            min: round2(self.min),
            max: round2(self.max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(id: &str, value: Option<f64>) -> AggregatedZone {
        AggregatedZone {
            zone: ZoneId::from(id),
            value,
            shape: geo::Point::new(2.33, 48.86).into(),
            records: 1,
        }
    }

    #[test]
    fn value_range_ignores_undefined_means() {
        let aggregation = ZoneAggregation {
            variable: RentVariable::Reference,
            zones: vec![
                zone("1", Some(25.4)),
                zone("2", None),
                zone("3", Some(31.06)),
                zone("4", Some(27.0)),
            ],
        };
        assert_eq!(
            aggregation.value_range(),
            Some(ValueRange {
                min: 25.4,
                max: 31.06
            })
        );
    }

    #[test]
    fn empty_aggregation_has_no_range() {
        let aggregation = ZoneAggregation {
            variable: RentVariable::Increased,
            zones: vec![zone("1", None)],
        };
        assert_eq!(aggregation.value_range(), None);

        let aggregation = ZoneAggregation {
            variable: RentVariable::Increased,
            zones: Vec::new(),
        };
        assert!(aggregation.is_empty());
        assert_eq!(aggregation.value_range(), None);
    }

    #[test]
    fn color_domain_is_floor_and_ceil() {
        let range = ValueRange {
            min: 22.75,
            max: 34.01,
        };
        assert_eq!(range.color_domain(), [22.0, 35.0]);

        let whole = ValueRange {
            min: 20.0,
            max: 30.0,
        };
        assert_eq!(whole.color_domain(), [20.0, 30.0]);
    }

    #[test]
    fn rounds_to_cents() {
        assert!((round2(27.456) - 27.46).abs() < 1e-9);
        assert!((round2(18.004) - 18.0).abs() < 1e-9);
    }
}
