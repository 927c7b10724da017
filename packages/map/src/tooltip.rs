//! Hover tooltip content.

use serde::Serialize;
use wri_color::{Rgb, format_percent};
use wri_geography_models::{LocationInfo, fips};

use crate::state::MapFeature;

/// Vertical distance, in pixels, between the pointer and the tooltip.
pub const TOOLTIP_OFFSET_Y: f64 = 12.0;

/// Value text shown for features without a joined metric value.
pub const NO_DATA_TEXT: &str = "No data";

/// Content and placement of the hover tooltip.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tooltip {
    /// `"COUNTY, ST"` heading.
    pub title: String,
    /// The feature's own name, or its geo ID.
    pub label: String,
    /// Same color as the feature's fill.
    pub swatch: Rgb,
    /// Formatted value, e.g. `"82.0%"`, or [`NO_DATA_TEXT`].
    pub value_text: String,
    /// Screen x position.
    pub x: f64,
    /// Screen y position, above the pointer.
    pub y: f64,
}

impl Tooltip {
    /// Builds the tooltip for `feature` at pointer position `(x, y)`.
    #[must_use]
    pub fn new(
        feature: &MapFeature,
        location: Option<&LocationInfo>,
        value: Option<f64>,
        swatch: Rgb,
        (x, y): (f64, f64),
    ) -> Self {
        Self {
            title: title(feature, location),
            label: feature.label().to_owned(),
            swatch,
            value_text: value.map_or_else(|| NO_DATA_TEXT.to_owned(), format_percent),
            x,
            y: y - TOOLTIP_OFFSET_Y,
        }
    }

    /// Plain-text rendering, one line per field.
    #[must_use]
    pub fn text(&self) -> String {
        format!(
            "{}\n{}\n{} {}",
            self.title,
            self.label,
            self.swatch.to_hex(),
            self.value_text
        )
    }
}

/// Without a location row the state is still recoverable from the geo ID's
/// FIPS prefix.
fn title(feature: &MapFeature, location: Option<&LocationInfo>) -> String {
    if let Some(location) = location {
        return location.display_label();
    }

    let name = feature.label().to_uppercase();
    match fips::state_fips_of(&feature.geo_id).map(fips::state_abbr) {
        Some(abbr) if abbr != "??" => format!("{name}, {abbr}"),
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FeatureId;

    fn feature(name: Option<&str>) -> MapFeature {
        MapFeature {
            id: FeatureId(7),
            geo_id: "06037101100".to_owned(),
            name: name.map(ToOwned::to_owned),
        }
    }

    #[test]
    fn shows_location_and_value() {
        let location = LocationInfo {
            county_name: "Los Angeles".to_owned(),
            state_name: "California".to_owned(),
        };
        let tooltip = Tooltip::new(
            &feature(Some("Census Tract 1011")),
            Some(&location),
            Some(0.82),
            Rgb::new(1, 2, 3),
            (100.0, 50.0),
        );

        assert_eq!(tooltip.title, "LOS ANGELES, CA");
        assert_eq!(tooltip.label, "Census Tract 1011");
        assert_eq!(tooltip.value_text, "82.0%");
        assert!((tooltip.y - (50.0 - TOOLTIP_OFFSET_Y)).abs() < f64::EPSILON);
        assert!(tooltip.text().contains("LOS ANGELES, CA"));
        assert!(tooltip.text().contains("#010203 82.0%"));
    }

    #[test]
    fn falls_back_to_geo_id_and_fips_state() {
        let tooltip = Tooltip::new(&feature(None), None, None, Rgb::new(0, 0, 0), (0.0, 0.0));
        assert_eq!(tooltip.label, "06037101100");
        assert_eq!(tooltip.title, "06037101100, CA");
        assert_eq!(tooltip.value_text, NO_DATA_TEXT);
    }

    #[test]
    fn unknown_state_prefix_omits_state() {
        let mut f = feature(Some("Somewhere"));
        f.geo_id = "99000".to_owned();
        let tooltip = Tooltip::new(&f, None, Some(50.0), Rgb::new(0, 0, 0), (0.0, 0.0));
        assert_eq!(tooltip.title, "SOMEWHERE");
        assert_eq!(tooltip.value_text, "50.0%");
    }
}
