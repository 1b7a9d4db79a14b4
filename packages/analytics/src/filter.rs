//! Record filtering by category subsets.

use rent_map_dataset_models::GeoRecord;
use rent_map_rent_models::FilterSelection;

/// Returns `true` if the record's period, furnishing and room count are all
/// in the selected subsets.
///
/// An empty subset matches nothing, and a record whose category could not
/// be recognized never matches that dimension.
#[must_use]
pub fn matches(record: &GeoRecord, selection: &FilterSelection) -> bool {
    record
        .period
        .is_some_and(|p| selection.periods.contains(&p))
        && record
            .furnishing
            .is_some_and(|f| selection.furnishings.contains(&f))
        && record.rooms.is_some_and(|r| selection.rooms.contains(&r))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rent_map_dataset_models::ZoneId;
    use rent_map_rent_models::{ConstructionPeriod, Furnishing, RentVariable, RoomCount};
    use std::collections::BTreeSet;

    fn record() -> GeoRecord {
        GeoRecord {
            zone: ZoneId::from("7510101"),
            shape: geo::Point::new(2.33, 48.86).into(),
            rooms: Some(RoomCount::Two),
            period: Some(ConstructionPeriod::From1971To1990),
            furnishing: Some(Furnishing::Unfurnished),
            reference: Some(25.0),
            increased: Some(30.0),
            decreased: Some(17.5),
            properties: serde_json::Map::new(),
        }
    }

    fn selection() -> FilterSelection {
        FilterSelection {
            rooms: BTreeSet::from([RoomCount::Two]),
            periods: BTreeSet::from([ConstructionPeriod::From1971To1990]),
            furnishings: BTreeSet::from([Furnishing::Unfurnished]),
            variable: RentVariable::Increased,
        }
    }

    #[test]
    fn matches_when_every_dimension_is_selected() {
        assert!(matches(&record(), &selection()));
    }

    #[test]
    fn each_dimension_must_match() {
        let mut s = selection();
        s.rooms = BTreeSet::from([RoomCount::Three]);
        assert!(!matches(&record(), &s));

        let mut s = selection();
        s.periods = BTreeSet::from([ConstructionPeriod::Before1946]);
        assert!(!matches(&record(), &s));

        let mut s = selection();
        s.furnishings = BTreeSet::from([Furnishing::Furnished]);
        assert!(!matches(&record(), &s));
    }

    #[test]
    fn empty_subset_matches_nothing() {
        let mut s = selection();
        s.furnishings.clear();
        assert!(!matches(&record(), &s));
    }

    #[test]
    fn unrecognized_category_never_matches() {
        let mut r = record();
        r.period = None;
        assert!(!matches(
            &r,
            &FilterSelection::everything(RentVariable::Reference)
        ));
    }
}
