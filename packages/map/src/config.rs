//! API endpoint configuration.

use crate::fetch::MetricSelection;

/// Where the metric and location tables are served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL of the data API, without a trailing slash.
    pub base_url: String,
    /// Name of the geo ID column shared by both tables and the tile layer.
    pub geo_id_field: String,
    /// Path template for metric tables. `{domain}` and `{metric}` are
    /// substituted.
    pub metric_path: String,
    /// Path of the location table.
    pub location_path: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_owned(),
            geo_id_field: "geoid".to_owned(),
            metric_path: "/api/metrics/{domain}/{metric}.csv".to_owned(),
            location_path: "/api/locations.csv".to_owned(),
        }
    }
}

impl ApiConfig {
    /// Reads the configuration from `WRI_API_BASE_URL`, `WRI_GEO_ID_FIELD`,
    /// `WRI_METRIC_PATH` and `WRI_LOCATION_PATH`, using defaults for any
    /// that are unset.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("WRI_API_BASE_URL").unwrap_or(defaults.base_url),
            geo_id_field: std::env::var("WRI_GEO_ID_FIELD").unwrap_or(defaults.geo_id_field),
            metric_path: std::env::var("WRI_METRIC_PATH").unwrap_or(defaults.metric_path),
            location_path: std::env::var("WRI_LOCATION_PATH").unwrap_or(defaults.location_path),
        }
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        base_url.clone_into(&mut self.base_url);
        self
    }

    /// Sets the geo ID column name.
    #[must_use]
    pub fn with_geo_id_field(mut self, field: &str) -> Self {
        field.clone_into(&mut self.geo_id_field);
        self
    }

    /// Sets the metric path template.
    #[must_use]
    pub fn with_metric_path(mut self, path: &str) -> Self {
        path.clone_into(&mut self.metric_path);
        self
    }

    /// Sets the location table path.
    #[must_use]
    pub fn with_location_path(mut self, path: &str) -> Self {
        path.clone_into(&mut self.location_path);
        self
    }

    /// Full URL of the metric table for `selection`.
    #[must_use]
    pub fn metric_url(&self, selection: &MetricSelection) -> String {
        let path = self
            .metric_path
            .replace("{domain}", &selection.domain.to_string())
            .replace("{metric}", &selection.metric_id);
        self.join(&path)
    }

    /// Full URL of the location table.
    #[must_use]
    pub fn location_url(&self) -> String {
        self.join(&self.location_path)
    }

    fn join(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
