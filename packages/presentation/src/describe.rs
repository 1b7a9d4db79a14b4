//! Descriptive text for the selected value range.

use rent_map_analytics_models::{ValueRange, ZoneAggregation};
use rent_map_rent_models::{RentVariable, SelectOption as _};
use serde::Serialize;

/// Summary sentence pair shown above the map.
///
/// With no data the bounds are printed as `nan`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Description {
    /// Variable the bounds refer to.
    pub variable: RentVariable,
    /// Bounds of the zone means, rounded to two decimals.
    pub range: Option<ValueRange>,
    /// Number of zones shown.
    pub zones: usize,
}

/// Builds the description of `aggregation`.
#[must_use]
pub fn describe(aggregation: &ZoneAggregation) -> Description {
    Description {
        variable: aggregation.variable,
        range: aggregation.value_range().map(ValueRange::rounded),
        zones: aggregation.len(),
    }
}

impl Description {
    /// Renders the description as HTML, with the bounds in bold.
    #[must_use]
    pub fn to_html(&self) -> String {
        let (min, max) = self.bounds();
        format!(
            "Pour votre sélection, le {} est compris entre <strong>{min}</strong> €/m² \
             et <strong>{max}</strong> €/m². {}",
            self.variable.label().to_lowercase(),
            self.coverage(),
        )
    }

    fn bounds(&self) -> (String, String) {
        self.range.map_or_else(
            || ("nan".to_string(), "nan".to_string()),
            |r| (format_amount(r.min), format_amount(r.max)),
        )
    }

    fn coverage(&self) -> String {
        match self.zones {
            0 => "Aucun quartier ne correspond à ces critères.".to_string(),
            1 => "Cette valeur porte sur 1 quartier.".to_string(),
            n => format!("Ces valeurs portent sur {n} quartiers."),
        }
    }
}

impl std::fmt::Display for Description {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (min, max) = self.bounds();
        write!(
            f,
            "Pour votre sélection, le {} est compris entre **{min}** €/m² et **{max}** €/m². {}",
            self.variable.label().to_lowercase(),
            self.coverage(),
        )
    }
}

/// Formats an amount the way the dashboard always has: shortest
/// representation, but whole numbers keep a trailing `.0`.
fn format_amount(value: f64) -> String {
    format!("{value:?}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rent_map_analytics_models::AggregatedZone;
    use rent_map_dataset_models::ZoneId;

    fn aggregation(values: &[Option<f64>]) -> ZoneAggregation {
        ZoneAggregation {
            variable: RentVariable::Increased,
            zones: values
                .iter()
                .enumerate()
                .map(|(i, value)| AggregatedZone {
                    zone: ZoneId(format!("75101{i:02}")),
                    value: *value,
                    shape: geo::Point::new(2.33, 48.86).into(),
                    records: 1,
                })
                .collect(),
        }
    }

    #[test]
    fn reports_rounded_bounds() {
        let d = describe(&aggregation(&[Some(31.234), Some(28.0), Some(35.678)]));
        assert_eq!(
            d.to_string(),
            "Pour votre sélection, le loyer de référence majoré est compris entre \
             **28.0** €/m² et **35.68** €/m². Ces valeurs portent sur 3 quartiers."
        );
    }

    #[test]
    fn single_zone_is_singular() {
        let d = describe(&aggregation(&[Some(30.0)]));
        assert!(d.to_string().ends_with("Cette valeur porte sur 1 quartier."));
    }

    #[test]
    fn empty_selection_prints_nan_without_failing() {
        let d = describe(&aggregation(&[]));
        assert_eq!(d.range, None);
        assert_eq!(d.zones, 0);
        let text = d.to_string();
        assert!(text.contains("**nan** €/m² et **nan** €/m²"));
        assert!(text.ends_with("Aucun quartier ne correspond à ces critères."));
    }

    #[test]
    fn html_uses_strong_tags() {
        let d = describe(&aggregation(&[Some(20.5), Some(22.25)]));
        let html = d.to_html();
        assert!(html.contains("<strong>20.5</strong>"));
        assert!(html.contains("<strong>22.25</strong>"));
        assert!(!html.contains("**"));
    }
}
