//! Headless single-region view: fetch, paint, hover and click one feature.

use std::fmt::Write as _;

use wri_domain::ColorScheme;
use wri_domain_models::GradientKey;
use wri_map::{
    ApiConfig, FeatureId, HeadlessSurface, HttpTableSource, MapController, MapEvent, MapFeature,
    MapState, MetricSelection,
};

const FEATURE: FeatureId = FeatureId(0);

/// Runs one fetch cycle for `metric` and returns the tooltip text and the
/// published selection for `geo_id`.
pub async fn show(
    scheme: ColorScheme<'_>,
    key: GradientKey,
    metric: &str,
    geo_id: &str,
    base_url: Option<&str>,
) -> Result<String, Box<dyn std::error::Error>> {
    let mut api = ApiConfig::from_env();
    if let Some(base_url) = base_url {
        api = api.with_base_url(base_url);
    }
    let geo_id_field = api.geo_id_field.clone();
    log::debug!("Fetching {metric} for {geo_id} from {}", api.base_url);

    let state = MapState::new(scheme.registry(), scheme.resolved_config());
    let mut controller = MapController::new(
        HttpTableSource::new(api)?,
        HeadlessSurface::default(),
        state,
    )
    .with_geo_id_field(&geo_id_field);

    controller
        .dispatch_all([
            MapEvent::FeaturesRendered(vec![MapFeature {
                id: FEATURE,
                geo_id: geo_id.to_owned(),
                name: None,
            }]),
            MapEvent::SelectMetric(MetricSelection::new(key, metric)),
        ])
        .await;

    if controller.state().tables().is_none() {
        return Err(format!("Could not load '{metric}' from the data API").into());
    }

    controller
        .dispatch_all([
            MapEvent::Click(FEATURE),
            MapEvent::PointerMove {
                feature: FEATURE,
                x: 0.0,
                y: 0.0,
            },
        ])
        .await;

    let surface = controller.into_surface();

    let mut report = String::new();
    if let Some(tooltip) = &surface.tooltip {
        writeln!(report, "{}", tooltip.text())?;
    }
    if let Some(selection) = &surface.selection {
        write!(report, "{}", serde_json::to_string_pretty(selection)?)?;
    }
    Ok(report)
}
