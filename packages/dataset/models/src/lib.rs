#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! In-memory reference-rent table types.
//!
//! A [`RentTable`] is the parsed form of the downloaded dataset: one
//! [`GeoRecord`] per feature, in the order the features appear in the
//! source file. The table is built once and shared read-only afterwards.

use rent_map_rent_models::{ConstructionPeriod, Furnishing, RentVariable, RoomCount};
use serde::{Deserialize, Serialize};

/// Identifier of a neighbourhood reporting unit (`code_grand_quartier`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(pub String);

impl ZoneId {
    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ZoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ZoneId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// One rent-control record: a rent profile for a single zone.
///
/// Category fields are `None` when the source value is outside the known
/// set. Such records never match a filter.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoRecord {
    /// Zone this record belongs to.
    pub zone: ZoneId,
    /// Zone outline (or point) as given by the source.
    pub shape: geo::Geometry<f64>,
    /// Number of main rooms.
    pub rooms: Option<RoomCount>,
    /// Construction period.
    pub period: Option<ConstructionPeriod>,
    /// Furnishing status.
    pub furnishing: Option<Furnishing>,
    /// Reference rent in €/m².
    pub reference: Option<f64>,
    /// Increased reference rent in €/m².
    pub increased: Option<f64>,
    /// Decreased reference rent in €/m².
    pub decreased: Option<f64>,
    /// Every property of the source feature, verbatim.
    pub properties: serde_json::Map<String, serde_json::Value>,
}

impl GeoRecord {
    /// Returns the rent value for `variable`, if present.
    #[must_use]
    pub const fn value(&self, variable: RentVariable) -> Option<f64> {
        match variable {
            RentVariable::Reference => self.reference,
            RentVariable::Increased => self.increased,
            RentVariable::Decreased => self.decreased,
        }
    }
}

/// The parsed dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct RentTable {
    source: String,
    records: Vec<GeoRecord>,
}

impl RentTable {
    /// Creates a table from records parsed out of `source`.
    #[must_use]
    pub const fn new(source: String, records: Vec<GeoRecord>) -> Self {
        Self { source, records }
    }

    /// Location the table was loaded from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// All records, in source order.
    #[must_use]
    pub fn records(&self) -> &[GeoRecord] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the table has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
