#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geographic identifiers and region metadata.
//!
//! Regions are keyed by their census geo ID (state FIPS + county FIPS +
//! tract code, e.g. `"06037101100"`). Location names come from a separate
//! table and are joined by the same key.

pub mod fips;

use serde::{Deserialize, Serialize};

/// County and state names for one geo ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationInfo {
    /// County name (e.g. "Los Angeles").
    pub county_name: String,
    /// Full state name (e.g. "California").
    pub state_name: String,
}

impl LocationInfo {
    /// The state's two-letter abbreviation, falling back to the name as
    /// given when it is not a recognized US state.
    #[must_use]
    pub fn state_abbr(&self) -> &str {
        fips::abbreviate_state(&self.state_name).unwrap_or(&self.state_name)
    }

    /// Display label such as `"LOS ANGELES, CA"`.
    #[must_use]
    pub fn display_label(&self) -> String {
        format!(
            "{}, {}",
            self.county_name.to_uppercase(),
            self.state_abbr().to_uppercase()
        )
    }
}

/// The region the user clicked, published to the surrounding panels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionSelection {
    /// Geo ID of the selected feature.
    pub geo_id: String,
    /// County (or feature) name.
    pub location_name: String,
    /// Full state name, if known.
    pub state_name: Option<String>,
    /// Value of the selected metric, if the region has one.
    pub metric_value: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn los_angeles() -> LocationInfo {
        LocationInfo {
            county_name: "Los Angeles".to_owned(),
            state_name: "California".to_owned(),
        }
    }

    #[test]
    fn display_label_uppercases_and_abbreviates() {
        assert_eq!(los_angeles().display_label(), "LOS ANGELES, CA");
    }

    #[test]
    fn unrecognized_state_is_kept_verbatim() {
        let location = LocationInfo {
            county_name: "San Juan".to_owned(),
            state_name: "Puerto Rico".to_owned(),
        };
        assert_eq!(location.state_abbr(), "Puerto Rico");
        assert_eq!(location.display_label(), "SAN JUAN, PUERTO RICO");
    }

    #[test]
    fn selection_serializes_camel_case() {
        let selection = RegionSelection {
            geo_id: "06037101100".to_owned(),
            location_name: "Los Angeles".to_owned(),
            state_name: Some("California".to_owned()),
            metric_value: Some(0.82),
        };
        let value = serde_json::to_value(&selection).unwrap();
        assert_eq!(value["geoId"], "06037101100");
        assert_eq!(value["locationName"], "Los Angeles");
        assert_eq!(value["stateName"], "California");
        assert_eq!(value["metricValue"], 0.82);
    }
}
