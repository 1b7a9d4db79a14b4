//! HTML page rendering.
//!
//! The page skeleton is embedded at compile time; the filter controls, the
//! description and the figure JSON are spliced into it on every request.

use std::fmt::Write as _;

use rent_map_rent_models::{
    ConstructionPeriod, FilterSelection, Furnishing, RentVariable, RoomCount, SelectOption,
};

use crate::{ChoroplethFigure, Description, PresentationError};

const PAGE_TEMPLATE: &str = include_str!("../templates/page.html");

/// Renders the dashboard page for one interaction.
///
/// # Errors
///
/// Returns [`PresentationError`] if the figure cannot be serialized.
pub fn render_page(
    selection: &FilterSelection,
    description: &Description,
    figure: &ChoroplethFigure,
) -> Result<String, PresentationError> {
    let mut controls = String::new();
    push_checkboxes::<RoomCount>(&mut controls, &selection.rooms);
    push_checkboxes::<ConstructionPeriod>(&mut controls, &selection.periods);
    push_checkboxes::<Furnishing>(&mut controls, &selection.furnishings);
    push_radios(&mut controls, selection.variable);

    let figure_json = script_safe(&serde_json::to_string(figure)?);

    Ok(PAGE_TEMPLATE
        .replace("{{controls}}", &controls)
        .replace("{{description}}", &description.to_html())
        .replace("{{figure}}", &figure_json))
}

/// Renders a page reporting a fatal error in place of the map.
#[must_use]
pub fn render_error_page(message: &str) -> String {
    PAGE_TEMPLATE
        .replace("{{controls}}", "")
        .replace(
            "{{description}}",
            &format!("<strong>Erreur :</strong> {}", escape_html(message)),
        )
        .replace("{{figure}}", r#"{"data": [], "layout": {}}"#)
}

fn push_checkboxes<T: SelectOption>(out: &mut String, selected: &std::collections::BTreeSet<T>) {
    push_fieldset::<T>(out, "checkbox", |option| selected.contains(&option));
}

fn push_radios(out: &mut String, selected: RentVariable) {
    push_fieldset::<RentVariable>(out, "radio", |option| option == selected);
}

fn push_fieldset<T: SelectOption>(out: &mut String, input: &str, checked: impl Fn(T) -> bool) {
    let _ = writeln!(
        out,
        r#"<fieldset data-field="{}"><legend>{}</legend>"#,
        T::FIELD,
        escape_html(T::TITLE)
    );
    for option in T::all() {
        let _ = writeln!(
            out,
            r#"<label><input type="{input}" name="{}" value="{}"{}> {}</label>"#,
            T::FIELD,
            escape_html(option.key()),
            if checked(*option) { " checked" } else { "" },
            escape_html(option.label()),
        );
    }
    out.push_str("</fieldset>\n");
}

/// Escapes text for use in HTML element content and attribute values.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Makes serialized JSON safe to embed inside a `<script>` element.
fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::describe;
    use rent_map_analytics_models::ZoneAggregation;

    fn empty_page(selection: &FilterSelection) -> String {
        let aggregation = ZoneAggregation {
            variable: selection.variable,
            zones: Vec::new(),
        };
        render_page(
            selection,
            &describe(&aggregation),
            &ChoroplethFigure::new(&aggregation),
        )
        .unwrap()
    }

    #[test]
    fn controls_reflect_the_selection() {
        let page = empty_page(&FilterSelection::default());

        assert!(page.contains(r#"<input type="checkbox" name="rooms" value="2" checked> 2 pièces"#));
        assert!(page.contains(r#"<input type="checkbox" name="rooms" value="1"> 1 pièce"#));
        assert!(page.contains(
            r#"<input type="checkbox" name="periods" value="after_1990" checked> Après 1990"#
        ));
        assert!(page.contains(
            r#"<input type="checkbox" name="furnishings" value="unfurnished" checked> Non meublé"#
        ));
        assert!(page.contains(
            r#"<input type="radio" name="variable" value="max" checked> Loyer de référence majoré"#
        ));
        assert!(page.contains(r#"<input type="radio" name="variable" value="ref"> "#));
    }

    #[test]
    fn empty_selection_still_renders() {
        let selection = FilterSelection {
            rooms: std::collections::BTreeSet::new(),
            ..FilterSelection::default()
        };
        let page = empty_page(&selection);
        assert!(page.contains("<strong>nan</strong>"));
        assert!(page.contains(r#""type":"choroplethmapbox""#));
        assert!(!page.contains("{{"));
    }

    #[test]
    fn error_page_escapes_the_message() {
        let page = render_error_page("HTTP error: <timeout>");
        assert!(page.contains("HTTP error: &lt;timeout&gt;"));
        assert!(!page.contains("{{"));
    }

    #[test]
    fn script_safe_breaks_closing_tags() {
        assert_eq!(script_safe(r#"{"a":"</script>"}"#), r#"{"a":"<\/script>"}"#);
    }
}
