//! Fetching the metric and location tables.

use std::future::Future;

use wri_domain_models::GradientKey;

use crate::{ApiConfig, JoinTables, MapError, parse_location_table, parse_metric_table};

/// The metric being displayed on the map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSelection {
    /// Gradient the metric's values are colored with.
    pub domain: GradientKey,
    /// Metric identifier, also the value column of the metric table.
    pub metric_id: String,
}

impl MetricSelection {
    /// Creates a selection.
    #[must_use]
    pub fn new(domain: GradientKey, metric_id: &str) -> Self {
        Self {
            domain,
            metric_id: metric_id.to_owned(),
        }
    }
}

/// Something that can provide the raw CSV text of both tables.
pub trait TableSource: Send + Sync {
    /// Fetches the metric table for `selection`.
    ///
    /// # Errors
    ///
    /// Returns [`MapError`] if the table cannot be retrieved.
    fn metric_csv(
        &self,
        selection: &MetricSelection,
    ) -> impl Future<Output = Result<String, MapError>> + Send;

    /// Fetches the location table.
    ///
    /// # Errors
    ///
    /// Returns [`MapError`] if the table cannot be retrieved.
    fn location_csv(&self) -> impl Future<Output = Result<String, MapError>> + Send;
}

/// [`TableSource`] backed by the data API over HTTP.
///
/// Requests are issued once; there is no retry or timeout.
#[derive(Debug, Clone)]
pub struct HttpTableSource {
    client: reqwest::Client,
    config: ApiConfig,
}

impl HttpTableSource {
    /// Creates a source for the endpoints in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Http`] if the HTTP client cannot be built.
    pub fn new(config: ApiConfig) -> Result<Self, MapError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client, config })
    }

    /// The endpoint configuration.
    #[must_use]
    pub const fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn get_text(&self, url: &str) -> Result<String, MapError> {
        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        log::debug!("Downloaded {} bytes from {url}", body.len());
        Ok(body)
    }
}

impl TableSource for HttpTableSource {
    async fn metric_csv(&self, selection: &MetricSelection) -> Result<String, MapError> {
        self.get_text(&self.config.metric_url(selection)).await
    }

    async fn location_csv(&self) -> Result<String, MapError> {
        self.get_text(&self.config.location_url()).await
    }
}

/// Fetches both tables concurrently and joins them.
///
/// The two requests complete in any order; both must succeed.
///
/// # Errors
///
/// Returns the first [`MapError`] from either fetch or from parsing.
pub async fn fetch_tables<S: TableSource>(
    source: &S,
    selection: &MetricSelection,
    geo_id_field: &str,
) -> Result<JoinTables, MapError> {
    let (metric_csv, location_csv) =
        futures::future::try_join(source.metric_csv(selection), source.location_csv()).await?;

    let tables = JoinTables {
        metrics: parse_metric_table(&metric_csv, geo_id_field, &selection.metric_id)?,
        locations: parse_location_table(&location_csv, geo_id_field)?,
    };

    log::info!(
        "Loaded {} values for {}/{} and {} locations",
        tables.metrics.len(),
        selection.domain,
        selection.metric_id,
        tables.locations.len()
    );
    Ok(tables)
}
