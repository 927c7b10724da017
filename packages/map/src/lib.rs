#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Map feature coloring.
//!
//! Keeps map polygon fill colors, tooltips and the selected region in sync
//! with the currently selected metric:
//!
//! - [`fetch`] downloads the metric and location CSV tables concurrently,
//! - [`table`] parses them into geo-ID keyed lookups,
//! - [`state`] is a pure reducer turning UI and fetch events into paint,
//!   tooltip and selection effects,
//! - [`controller`] runs the reducer against a [`fetch::TableSource`] and a
//!   [`controller::MapSurface`].

pub mod config;
pub mod controller;
pub mod fetch;
pub mod state;
pub mod table;
pub mod tooltip;

pub use config::ApiConfig;
pub use controller::{HeadlessSurface, MapController, MapSurface};
pub use fetch::{HttpTableSource, MetricSelection, TableSource, fetch_tables};
pub use state::{FeatureId, FeatureState, MapEffect, MapEvent, MapFeature, MapState, RequestToken};
pub use table::{JoinTables, LocationTable, MetricTable, parse_location_table, parse_metric_table};
pub use tooltip::Tooltip;

/// Errors that can occur while fetching or parsing map tables.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    /// An HTTP request failed or returned a non-success status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The CSV could not be read at all.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the CSV header row.
    #[error("CSV is missing required column '{0}'")]
    MissingColumn(String),

    /// A table source could not provide data.
    #[error("Table source unavailable: {0}")]
    Unavailable(String),
}
