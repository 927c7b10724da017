//! Drives [`MapState`] against real collaborators.

use std::collections::{BTreeMap, VecDeque};

use futures::StreamExt as _;
use futures::stream::FuturesUnordered;
use wri_geography_models::RegionSelection;

use crate::{
    FeatureId, FeatureState, MapEffect, MapEvent, MapState, TableSource, Tooltip, fetch_tables,
};

/// The mapping library side of the map: per-feature state, tooltip,
/// selection listeners and the error banner.
pub trait MapSurface {
    /// Applies paint state to one feature.
    fn set_feature_state(&mut self, feature: FeatureId, state: FeatureState);

    /// Shows or moves the tooltip.
    fn show_tooltip(&mut self, tooltip: &Tooltip);

    /// Hides the tooltip.
    fn hide_tooltip(&mut self);

    /// Notifies the surrounding panels of a new selection.
    fn publish_selection(&mut self, selection: &RegionSelection);

    /// Shows the persistent-failure banner.
    fn show_banner(&mut self, message: &str);

    /// Hides the banner.
    fn hide_banner(&mut self);
}

/// A [`MapSurface`] that just remembers what it was told. Used for headless
/// rendering from the CLI.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeadlessSurface {
    /// Current state of every painted feature.
    pub features: BTreeMap<FeatureId, FeatureState>,
    /// Visible tooltip.
    pub tooltip: Option<Tooltip>,
    /// Last published selection.
    pub selection: Option<RegionSelection>,
    /// Visible banner message.
    pub banner: Option<String>,
    /// Number of feature-state updates received.
    pub paint_count: usize,
}

impl MapSurface for HeadlessSurface {
    fn set_feature_state(&mut self, feature: FeatureId, state: FeatureState) {
        self.features.insert(feature, state);
        self.paint_count += 1;
    }

    fn show_tooltip(&mut self, tooltip: &Tooltip) {
        self.tooltip = Some(tooltip.clone());
    }

    fn hide_tooltip(&mut self) {
        self.tooltip = None;
    }

    fn publish_selection(&mut self, selection: &RegionSelection) {
        self.selection = Some(selection.clone());
    }

    fn show_banner(&mut self, message: &str) {
        self.banner = Some(message.to_owned());
    }

    fn hide_banner(&mut self) {
        self.banner = None;
    }
}

/// Owns the map state, a table source and a surface, and carries out the
/// reducer's effects.
pub struct MapController<'a, S, V> {
    source: S,
    surface: V,
    geo_id_field: String,
    state: MapState<'a>,
}

impl<'a, S: TableSource, V: MapSurface> MapController<'a, S, V> {
    /// Creates a controller. The geo ID column defaults to `geoid`.
    #[must_use]
    pub fn new(source: S, surface: V, state: MapState<'a>) -> Self {
        Self {
            source,
            surface,
            geo_id_field: "geoid".to_owned(),
            state,
        }
    }

    /// Sets the geo ID column name used when parsing tables.
    #[must_use]
    pub fn with_geo_id_field(mut self, field: &str) -> Self {
        field.clone_into(&mut self.geo_id_field);
        self
    }

    /// Current map state.
    #[must_use]
    pub const fn state(&self) -> &MapState<'a> {
        &self.state
    }

    /// The surface effects are applied to.
    #[must_use]
    pub const fn surface(&self) -> &V {
        &self.surface
    }

    /// Consumes the controller, returning its surface.
    #[must_use]
    pub fn into_surface(self) -> V {
        self.surface
    }

    /// Handles one event, including any fetch cycle it starts.
    pub async fn dispatch(&mut self, event: MapEvent) {
        self.dispatch_all([event]).await;
    }

    /// Handles `events` in order. Fetches they start run concurrently and
    /// their results are fed back as they complete, so a slow response to an
    /// older selection may arrive after a newer one; the reducer discards it.
    pub async fn dispatch_all(&mut self, events: impl IntoIterator<Item = MapEvent>) {
        let Self {
            source,
            surface,
            geo_id_field,
            state,
        } = self;
        let source: &S = source;
        let geo_id_field: &str = geo_id_field;

        let mut queue: VecDeque<MapEvent> = events.into_iter().collect();
        let mut in_flight = FuturesUnordered::new();

        loop {
            while let Some(event) = queue.pop_front() {
                for effect in state.apply(event) {
                    match effect {
                        MapEffect::FetchTables { token, selection } => {
                            in_flight.push(async move {
                                let result = fetch_tables(source, &selection, geo_id_field).await;
                                MapEvent::TablesLoaded { token, result }
                            });
                        }
                        MapEffect::SetFeatureState {
                            feature,
                            state: paint,
                        } => surface.set_feature_state(feature, paint),
                        MapEffect::ShowTooltip(tooltip) => surface.show_tooltip(&tooltip),
                        MapEffect::HideTooltip => surface.hide_tooltip(),
                        MapEffect::PublishSelection(selection) => {
                            surface.publish_selection(&selection);
                        }
                        MapEffect::ShowBanner(message) => surface.show_banner(&message),
                        MapEffect::HideBanner => surface.hide_banner(),
                    }
                }
            }

            let Some(event) = in_flight.next().await else {
                break;
            };
            queue.push_back(event);
        }
    }
}
