//! CSV metric and location tables keyed by geo ID.

use std::collections::BTreeMap;

use csv::StringRecord;
use wri_geography_models::LocationInfo;

use crate::MapError;

/// Geo ID to metric value.
pub type MetricTable = BTreeMap<String, f64>;

/// Geo ID to county/state names.
pub type LocationTable = BTreeMap<String, LocationInfo>;

/// Column holding the county name in the location table.
pub const COUNTY_NAME_COLUMN: &str = "county_name";
/// Column holding the state name in the location table.
pub const STATE_NAME_COLUMN: &str = "state_name";

/// Both tables of one fetch cycle. Replaced wholesale on every refetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JoinTables {
    /// Values of the selected metric.
    pub metrics: MetricTable,
    /// Location names.
    pub locations: LocationTable,
}

impl JoinTables {
    /// The metric value joined to `geo_id`, if any.
    #[must_use]
    pub fn value(&self, geo_id: &str) -> Option<f64> {
        self.metrics.get(geo_id).copied()
    }

    /// The location joined to `geo_id`, if any.
    #[must_use]
    pub fn location(&self, geo_id: &str) -> Option<&LocationInfo> {
        self.locations.get(geo_id)
    }
}

/// Parses a metric table with a `geo_id_field` column and a column named
/// `metric_id`.
///
/// Rows without a geo ID or with a non-numeric value are skipped.
///
/// # Errors
///
/// Returns [`MapError::MissingColumn`] if either column is absent from the
/// header row, or [`MapError::Csv`] if the header row cannot be read.
pub fn parse_metric_table(
    csv_text: &str,
    geo_id_field: &str,
    metric_id: &str,
) -> Result<MetricTable, MapError> {
    let mut reader = reader(csv_text);
    let headers = reader.headers()?.clone();
    let geo_idx = column(&headers, geo_id_field)?;
    let value_idx = column(&headers, metric_id)?;

    let mut table = MetricTable::new();
    let mut skipped = 0_usize;

    for (row, result) in reader.records().enumerate() {
        let parsed = result.ok().and_then(|record| {
            let geo_id = non_empty(&record, geo_idx)?;
            let value = non_empty(&record, value_idx)?
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())?;
            Some((geo_id.to_owned(), value))
        });

        if let Some((geo_id, value)) = parsed {
            table.insert(geo_id, value);
        } else {
            log::debug!("Skipping metric row {row}: missing geo ID or '{metric_id}' value");
            skipped += 1;
        }
    }

    log::debug!(
        "Parsed {} '{metric_id}' values ({skipped} rows skipped)",
        table.len()
    );
    Ok(table)
}

/// Parses a location table with `geo_id_field`, `county_name` and
/// `state_name` columns.
///
/// Rows without a geo ID are skipped; missing names become empty strings.
///
/// # Errors
///
/// Returns [`MapError::MissingColumn`] if a required column is absent from
/// the header row, or [`MapError::Csv`] if the header row cannot be read.
pub fn parse_location_table(csv_text: &str, geo_id_field: &str) -> Result<LocationTable, MapError> {
    let mut reader = reader(csv_text);
    let headers = reader.headers()?.clone();
    let geo_idx = column(&headers, geo_id_field)?;
    let county_idx = column(&headers, COUNTY_NAME_COLUMN)?;
    let state_idx = column(&headers, STATE_NAME_COLUMN)?;

    let mut table = LocationTable::new();

    for (row, result) in reader.records().enumerate() {
        let Some(record) = result.ok() else {
            log::debug!("Skipping unreadable location row {row}");
            continue;
        };
        let Some(geo_id) = non_empty(&record, geo_idx) else {
            log::debug!("Skipping location row {row}: missing geo ID");
            continue;
        };

        table.insert(
            geo_id.to_owned(),
            LocationInfo {
                county_name: record.get(county_idx).unwrap_or_default().to_owned(),
                state_name: record.get(state_idx).unwrap_or_default().to_owned(),
            },
        );
    }

    log::debug!("Parsed {} locations", table.len());
    Ok(table)
}

fn reader(csv_text: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(csv_text.as_bytes())
}

fn column(headers: &StringRecord, name: &str) -> Result<usize, MapError> {
    headers
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}').eq_ignore_ascii_case(name))
        .ok_or_else(|| MapError::MissingColumn(name.to_owned()))
}

fn non_empty(record: &StringRecord, idx: usize) -> Option<&str> {
    record.get(idx).filter(|s| !s.is_empty())
}
