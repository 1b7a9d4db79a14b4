#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Rent-control category tables and filter selection types.
//!
//! The reference-rent dataset describes every record by three categorical
//! dimensions (room count, construction period, furnishing) and carries
//! three rent values. The set of valid values for each dimension is fixed,
//! so each one is an enum here with an explicit label table mapping the
//! human-readable label shown in the dashboard to the raw value stored in
//! the dataset and the short key used in query strings.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString, IntoStaticStr};

/// A fixed, enumerated dashboard option.
///
/// Implemented by every category table so that option lists, query-string
/// parsing and form controls can be handled generically.
pub trait SelectOption: Copy + Ord + std::str::FromStr + 'static {
    /// Query-string parameter carrying this dimension.
    const FIELD: &'static str;
    /// Title of the dashboard control for this dimension.
    const TITLE: &'static str;

    /// Returns all variants, in display order.
    fn all() -> &'static [Self];

    /// Human-readable label shown in the dashboard.
    fn label(self) -> &'static str;

    /// Short stable key used in query strings.
    fn key(self) -> &'static str;
}

/// Number of main rooms (`piece` in the dataset).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
pub enum RoomCount {
    /// One room
    #[serde(rename = "1")]
    #[strum(serialize = "1")]
    One = 1,
    /// Two rooms
    #[serde(rename = "2")]
    #[strum(serialize = "2")]
    Two = 2,
    /// Three rooms
    #[serde(rename = "3")]
    #[strum(serialize = "3")]
    Three = 3,
    /// Four rooms and more
    #[serde(rename = "4")]
    #[strum(serialize = "4")]
    FourOrMore = 4,
}

impl RoomCount {
    /// Returns the raw `piece` value used in the dataset.
    #[must_use]
    pub const fn value(self) -> i64 {
        self as i64
    }

    /// Creates a room count from the raw `piece` value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not in the range 1-4.
    pub const fn from_value(value: i64) -> Result<Self, InvalidRoomCountError> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            4 => Ok(Self::FourOrMore),
            _ => Err(InvalidRoomCountError { value }),
        }
    }
}

impl SelectOption for RoomCount {
    const FIELD: &'static str = "rooms";
    const TITLE: &'static str = "Taille du logement";

    fn all() -> &'static [Self] {
        &[Self::One, Self::Two, Self::Three, Self::FourOrMore]
    }

    fn label(self) -> &'static str {
        match self {
            Self::One => "1 pièce",
            Self::Two => "2 pièces",
            Self::Three => "3 pièces",
            Self::FourOrMore => "4 pièces et plus",
        }
    }

    fn key(self) -> &'static str {
        self.into()
    }
}

/// Error returned when a raw `piece` value is outside the known room counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidRoomCountError {
    /// The invalid room count that was provided.
    pub value: i64,
}

impl std::fmt::Display for InvalidRoomCountError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid room count {}: expected 1-4", self.value)
    }
}

impl std::error::Error for InvalidRoomCountError {}

/// Construction period of the building (`epoque` in the dataset).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
pub enum ConstructionPeriod {
    /// Built before 1946
    #[serde(rename = "before_1946")]
    #[strum(serialize = "before_1946")]
    Before1946,
    /// Built between 1946 and 1970
    #[serde(rename = "1946_1970")]
    #[strum(serialize = "1946_1970")]
    From1946To1970,
    /// Built between 1971 and 1990
    #[serde(rename = "1971_1990")]
    #[strum(serialize = "1971_1990")]
    From1971To1990,
    /// Built after 1990
    #[serde(rename = "after_1990")]
    #[strum(serialize = "after_1990")]
    After1990,
}

impl ConstructionPeriod {
    /// Returns the raw `epoque` value used in the dataset.
    #[must_use]
    pub const fn value(self) -> &'static str {
        match self {
            Self::Before1946 => "Avant 1946",
            Self::From1946To1970 => "1946-1970",
            Self::From1971To1990 => "1971-1990",
            Self::After1990 => "Apres 1990",
        }
    }

    /// Looks up a period by its raw `epoque` value.
    #[must_use]
    pub fn from_value(value: &str) -> Option<Self> {
        Self::all().iter().copied().find(|p| p.value() == value)
    }
}

impl SelectOption for ConstructionPeriod {
    const FIELD: &'static str = "periods";
    const TITLE: &'static str = "Année de construction";

    fn all() -> &'static [Self] {
        &[
            Self::Before1946,
            Self::From1946To1970,
            Self::From1971To1990,
            Self::After1990,
        ]
    }

    fn label(self) -> &'static str {
        match self {
            Self::Before1946 => "Avant 1946",
            Self::From1946To1970 => "Entre 1946 et 1970",
            Self::From1971To1990 => "Entre 1971 et 1990",
            Self::After1990 => "Après 1990",
        }
    }

    fn key(self) -> &'static str {
        self.into()
    }
}

/// Furnishing status (`meuble_txt` in the dataset).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Furnishing {
    /// Rented furnished
    Furnished,
    /// Rented unfurnished
    Unfurnished,
}

impl Furnishing {
    /// Returns the raw `meuble_txt` value used in the dataset.
    #[must_use]
    pub const fn value(self) -> &'static str {
        match self {
            Self::Furnished => "meublé",
            Self::Unfurnished => "non meublé",
        }
    }

    /// Looks up a furnishing status by its raw `meuble_txt` value.
    #[must_use]
    pub fn from_value(value: &str) -> Option<Self> {
        Self::all().iter().copied().find(|f| f.value() == value)
    }
}

impl SelectOption for Furnishing {
    const FIELD: &'static str = "furnishings";
    const TITLE: &'static str = "Type de logement";

    fn all() -> &'static [Self] {
        &[Self::Furnished, Self::Unfurnished]
    }

    fn label(self) -> &'static str {
        match self {
            Self::Furnished => "Meublé",
            Self::Unfurnished => "Non meublé",
        }
    }

    fn key(self) -> &'static str {
        self.into()
    }
}

/// Which rent value to visualize.
///
/// The key of each variant is also the name of the dataset column holding
/// the value.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
pub enum RentVariable {
    /// Reference rent (`ref`)
    #[serde(rename = "ref")]
    #[strum(serialize = "ref")]
    Reference,
    /// Increased reference rent, the legal cap (`max`)
    #[serde(rename = "max")]
    #[strum(serialize = "max")]
    Increased,
    /// Decreased reference rent, the floor (`min`)
    #[serde(rename = "min")]
    #[strum(serialize = "min")]
    Decreased,
}

impl RentVariable {
    /// Returns the dataset column holding this value.
    #[must_use]
    pub fn column(self) -> &'static str {
        self.key()
    }
}

impl SelectOption for RentVariable {
    const FIELD: &'static str = "variable";
    const TITLE: &'static str = "Variable";

    fn all() -> &'static [Self] {
        &[Self::Reference, Self::Increased, Self::Decreased]
    }

    fn label(self) -> &'static str {
        match self {
            Self::Reference => "Loyer de référence",
            Self::Increased => "Loyer de référence majoré",
            Self::Decreased => "Loyer de référence minoré",
        }
    }

    fn key(self) -> &'static str {
        self.into()
    }
}

/// Parses a comma-separated list of option keys.
///
/// Unknown keys are skipped. An empty string yields an empty set.
#[must_use]
pub fn parse_keys<T: SelectOption>(s: &str) -> BTreeSet<T> {
    s.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .filter_map(|k| k.parse().ok())
        .collect()
}

/// The user's current choice of category subsets and rent variable.
///
/// Rebuilt on every interaction. An empty subset in any dimension matches
/// no records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSelection {
    /// Room counts to keep.
    pub rooms: BTreeSet<RoomCount>,
    /// Construction periods to keep.
    pub periods: BTreeSet<ConstructionPeriod>,
    /// Furnishing statuses to keep.
    pub furnishings: BTreeSet<Furnishing>,
    /// Rent value to average and map.
    pub variable: RentVariable,
}

impl FilterSelection {
    /// Selects every category in every dimension.
    #[must_use]
    pub fn everything(variable: RentVariable) -> Self {
        Self {
            rooms: RoomCount::all().iter().copied().collect(),
            periods: ConstructionPeriod::all().iter().copied().collect(),
            furnishings: Furnishing::all().iter().copied().collect(),
            variable,
        }
    }

    /// Returns `true` if at least one dimension has an empty subset, in
    /// which case no record can match.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty() || self.periods.is_empty() || self.furnishings.is_empty()
    }
}

impl Default for FilterSelection {
    /// The dashboard's initial state: two-room unfurnished flats built
    /// after 1990, showing the increased reference rent.
    fn default() -> Self {
        Self {
            rooms: BTreeSet::from([RoomCount::Two]),
            periods: BTreeSet::from([ConstructionPeriod::After1990]),
            furnishings: BTreeSet::from([Furnishing::Unfurnished]),
            variable: RentVariable::Increased,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_table_consistent<T: SelectOption + std::fmt::Debug>() {
        let mut keys = BTreeSet::new();
        for option in T::all() {
            assert!(
                keys.insert(option.key()),
                "Duplicate key {} for {option:?}",
                option.key()
            );
            let parsed: BTreeSet<T> = parse_keys(option.key());
            assert_eq!(parsed.into_iter().collect::<Vec<_>>(), vec![*option]);
            assert!(!option.label().is_empty(), "{option:?} has empty label");
        }
    }

    #[test]
    fn option_tables_are_consistent() {
        assert_table_consistent::<RoomCount>();
        assert_table_consistent::<ConstructionPeriod>();
        assert_table_consistent::<Furnishing>();
        assert_table_consistent::<RentVariable>();
    }

    #[test]
    fn room_count_from_value() {
        for v in 1..=4 {
            assert_eq!(RoomCount::from_value(v).unwrap().value(), v);
        }
        assert!(RoomCount::from_value(0).is_err());
        assert!(RoomCount::from_value(5).is_err());
    }

    #[test]
    fn raw_dataset_values_resolve() {
        assert_eq!(
            ConstructionPeriod::from_value("Apres 1990"),
            Some(ConstructionPeriod::After1990)
        );
        assert_eq!(
            ConstructionPeriod::from_value("1971-1990"),
            Some(ConstructionPeriod::From1971To1990)
        );
        assert_eq!(ConstructionPeriod::from_value("Après 1990"), None);
        assert_eq!(
            Furnishing::from_value("non meublé"),
            Some(Furnishing::Unfurnished)
        );
        assert_eq!(Furnishing::from_value("meuble"), None);
    }

    #[test]
    fn variable_keys_are_dataset_columns() {
        assert_eq!(RentVariable::Reference.column(), "ref");
        assert_eq!(RentVariable::Increased.column(), "max");
        assert_eq!(RentVariable::Decreased.column(), "min");
    }

    #[test]
    fn parse_keys_skips_unknown_and_blank() {
        let rooms: BTreeSet<RoomCount> = parse_keys(" 2, 9,,4 ");
        assert_eq!(rooms, BTreeSet::from([RoomCount::Two, RoomCount::FourOrMore]));

        let empty: BTreeSet<Furnishing> = parse_keys("");
        assert!(empty.is_empty());
    }

    #[test]
    fn default_selection_matches_dashboard_initial_state() {
        let selection = FilterSelection::default();
        assert_eq!(selection.rooms, BTreeSet::from([RoomCount::Two]));
        assert_eq!(
            selection.periods,
            BTreeSet::from([ConstructionPeriod::After1990])
        );
        assert_eq!(
            selection.furnishings,
            BTreeSet::from([Furnishing::Unfurnished])
        );
        assert_eq!(selection.variable, RentVariable::Increased);
        assert!(!selection.is_empty());
    }

    #[test]
    fn everything_selects_all_categories() {
        let selection = FilterSelection::everything(RentVariable::Reference);
        assert_eq!(selection.rooms.len(), 4);
        assert_eq!(selection.periods.len(), 4);
        assert_eq!(selection.furnishings.len(), 2);
    }
}
