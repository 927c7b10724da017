//! Map state reducer.
//!
//! All map behavior is expressed as [`MapState::apply`]: an event goes in,
//! the state is updated and a list of [`MapEffect`]s comes out for the
//! surrounding UI to carry out. Nothing here performs I/O.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use wri_color::{NEUTRAL_GRAY, Rgb};
use wri_domain::{ColorScheme, DomainRegistry};
use wri_domain_models::GradientConfig;
use wri_geography_models::{RegionSelection, fips};

use crate::{JoinTables, MapError, MetricSelection, Tooltip};

/// Consecutive fetch failures after which the error banner is shown.
pub const FAILURE_BANNER_THRESHOLD: u32 = 3;

/// Identifies one fetch cycle. Tokens only ever increase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(pub u64);

impl RequestToken {
    const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Stable key of a rendered map feature, used for per-feature paint state.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct FeatureId(pub u64);

/// A feature currently rendered by the tile layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapFeature {
    /// Feature-state key.
    pub id: FeatureId,
    /// Value of the geo ID property.
    pub geo_id: String,
    /// Value of the name property, if the layer has one.
    pub name: Option<String>,
}

impl MapFeature {
    /// The feature's name, or its geo ID when unnamed.
    #[must_use]
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.geo_id)
    }
}

/// Paint state of one feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureState {
    /// Fill color.
    pub color: Rgb,
    /// Whether the feature is outlined as selected.
    pub selected: bool,
}

/// Inputs to the reducer.
#[derive(Debug)]
pub enum MapEvent {
    /// The user chose a metric to display.
    SelectMetric(MetricSelection),
    /// A fetch cycle finished.
    TablesLoaded {
        /// Token the fetch was issued with.
        token: RequestToken,
        /// Joined tables, or why the cycle failed.
        result: Result<JoinTables, MapError>,
    },
    /// The set of rendered features changed (tiles loaded, pan/zoom settled).
    FeaturesRendered(Vec<MapFeature>),
    /// The gradient configuration was edited.
    GradientChanged(GradientConfig),
    /// The pointer moved over a feature.
    PointerMove {
        /// Feature under the pointer.
        feature: FeatureId,
        /// Pointer x.
        x: f64,
        /// Pointer y.
        y: f64,
    },
    /// The pointer left the hoverable layer.
    PointerLeave,
    /// A feature was clicked.
    Click(FeatureId),
    /// The user closed the error banner.
    DismissBanner,
}

/// Outputs of the reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum MapEffect {
    /// Fetch both tables for `selection` and report back with
    /// [`MapEvent::TablesLoaded`] carrying `token`.
    FetchTables {
        /// Token to report back with.
        token: RequestToken,
        /// What to fetch.
        selection: MetricSelection,
    },
    /// Apply per-feature paint state.
    SetFeatureState {
        /// Feature to update.
        feature: FeatureId,
        /// New state.
        state: FeatureState,
    },
    /// Show or move the tooltip.
    ShowTooltip(Tooltip),
    /// Hide the tooltip.
    HideTooltip,
    /// Publish the selected region to the rest of the UI.
    PublishSelection(RegionSelection),
    /// Show the persistent-failure banner.
    ShowBanner(String),
    /// Hide the banner.
    HideBanner,
}

#[derive(Debug, Clone)]
struct Loaded {
    selection: MetricSelection,
    tables: JoinTables,
}

/// State of the map colorer.
#[derive(Debug, Clone)]
pub struct MapState<'a> {
    registry: &'a DomainRegistry,
    config: GradientConfig,
    latest_token: RequestToken,
    pending: Option<MetricSelection>,
    loaded: Option<Loaded>,
    features: BTreeMap<FeatureId, MapFeature>,
    painted: BTreeMap<FeatureId, FeatureState>,
    selected: Option<FeatureId>,
    consecutive_failures: u32,
    banner_visible: bool,
}

impl<'a> MapState<'a> {
    /// Creates an empty map with no metric selected.
    #[must_use]
    pub const fn new(registry: &'a DomainRegistry, config: GradientConfig) -> Self {
        Self {
            registry,
            config,
            latest_token: RequestToken(0),
            pending: None,
            loaded: None,
            features: BTreeMap::new(),
            painted: BTreeMap::new(),
            selected: None,
            consecutive_failures: 0,
            banner_visible: false,
        }
    }

    /// Pure form of [`Self::apply`].
    #[must_use]
    pub fn reduce(mut self, event: MapEvent) -> (Self, Vec<MapEffect>) {
        let effects = self.apply(event);
        (self, effects)
    }

    /// Applies `event` and returns the effects to carry out, in order.
    pub fn apply(&mut self, event: MapEvent) -> Vec<MapEffect> {
        match event {
            MapEvent::SelectMetric(selection) => self.select_metric(selection),
            MapEvent::TablesLoaded { token, result } => self.tables_loaded(token, result),
            MapEvent::FeaturesRendered(features) => {
                self.features = features.into_iter().map(|f| (f.id, f)).collect();
                self.painted.retain(|id, _| self.features.contains_key(id));
                self.repaint()
            }
            MapEvent::GradientChanged(config) => {
                self.config = config;
                self.repaint()
            }
            MapEvent::PointerMove { feature, x, y } => self.hover(feature, (x, y)),
            MapEvent::PointerLeave => vec![MapEffect::HideTooltip],
            MapEvent::Click(feature) => self.click(feature),
            MapEvent::DismissBanner => {
                if self.banner_visible {
                    self.banner_visible = false;
                    vec![MapEffect::HideBanner]
                } else {
                    Vec::new()
                }
            }
        }
    }

    /// The latest issued request token.
    #[must_use]
    pub const fn latest_token(&self) -> RequestToken {
        self.latest_token
    }

    /// The selection whose data is currently painted.
    #[must_use]
    pub fn loaded_selection(&self) -> Option<&MetricSelection> {
        self.loaded.as_ref().map(|l| &l.selection)
    }

    /// The currently joined tables.
    #[must_use]
    pub fn tables(&self) -> Option<&JoinTables> {
        self.loaded.as_ref().map(|l| &l.tables)
    }

    /// The selected feature.
    #[must_use]
    pub const fn selected(&self) -> Option<FeatureId> {
        self.selected
    }

    /// Last paint state sent for `feature`.
    #[must_use]
    pub fn painted(&self, feature: FeatureId) -> Option<FeatureState> {
        self.painted.get(&feature).copied()
    }

    /// Number of fetch failures since the last success.
    #[must_use]
    pub const fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    /// Whether the failure banner is showing.
    #[must_use]
    pub const fn banner_visible(&self) -> bool {
        self.banner_visible
    }

    fn select_metric(&mut self, selection: MetricSelection) -> Vec<MapEffect> {
        self.latest_token = self.latest_token.next();
        self.pending = Some(selection.clone());
        log::debug!(
            "Requesting {}/{} as {:?}",
            selection.domain,
            selection.metric_id,
            self.latest_token
        );
        vec![MapEffect::FetchTables {
            token: self.latest_token,
            selection,
        }]
    }

    fn tables_loaded(
        &mut self,
        token: RequestToken,
        result: Result<JoinTables, MapError>,
    ) -> Vec<MapEffect> {
        if token != self.latest_token {
            log::debug!(
                "Discarding stale response {token:?} (latest is {:?})",
                self.latest_token
            );
            return Vec::new();
        }

        match result {
            Ok(tables) => {
                let Some(selection) = self.pending.take() else {
                    log::debug!("Discarding response {token:?} with no pending selection");
                    return Vec::new();
                };

                self.loaded = Some(Loaded { selection, tables });
                self.consecutive_failures = 0;

                let mut effects = Vec::new();
                if self.banner_visible {
                    self.banner_visible = false;
                    effects.push(MapEffect::HideBanner);
                }
                effects.extend(self.repaint());
                effects
            }
            Err(e) => {
                self.pending = None;
                self.consecutive_failures += 1;
                log::error!(
                    "Failed to load map data ({} consecutive failures): {e}",
                    self.consecutive_failures
                );

                if self.consecutive_failures == FAILURE_BANNER_THRESHOLD {
                    self.banner_visible = true;
                    vec![MapEffect::ShowBanner(format!(
                        "Map data could not be loaded: {e}"
                    ))]
                } else {
                    Vec::new()
                }
            }
        }
    }

    fn hover(&self, feature: FeatureId, position: (f64, f64)) -> Vec<MapEffect> {
        let Some(feature) = self.feature(feature) else {
            return vec![MapEffect::HideTooltip];
        };

        let tables = self.tables();
        let tooltip = Tooltip::new(
            feature,
            tables.and_then(|t| t.location(&feature.geo_id)),
            tables.and_then(|t| t.value(&feature.geo_id)),
            self.fill_color(feature),
            position,
        );
        vec![MapEffect::ShowTooltip(tooltip)]
    }

    fn click(&mut self, id: FeatureId) -> Vec<MapEffect> {
        let Some(feature) = self.feature(id).cloned() else {
            log::debug!("Ignoring click on unrendered feature {id:?}");
            return Vec::new();
        };

        let previous = self.selected.replace(id);
        let mut effects = Vec::new();
        if let Some(previous) = previous.filter(|p| *p != id) {
            effects.extend(self.paint(previous));
        }
        effects.extend(self.paint(id));

        let tables = self.tables();
        let location = tables.and_then(|t| t.location(&feature.geo_id));
        let state_name = location.map(|l| l.state_name.clone()).or_else(|| {
            fips::state_fips_of(&feature.geo_id)
                .map(fips::state_name)
                .filter(|name| *name != "Unknown")
                .map(ToOwned::to_owned)
        });

        effects.push(MapEffect::PublishSelection(RegionSelection {
            location_name: location.map_or_else(
                || feature.label().to_owned(),
                |l| l.county_name.clone(),
            ),
            state_name,
            metric_value: tables.and_then(|t| t.value(&feature.geo_id)),
            geo_id: feature.geo_id,
        }));
        effects
    }

    fn feature(&self, id: FeatureId) -> Option<&MapFeature> {
        self.features.get(&id)
    }

    fn fill_color(&self, feature: &MapFeature) -> Rgb {
        let Some(loaded) = &self.loaded else {
            return NEUTRAL_GRAY;
        };
        ColorScheme::new(self.registry, &self.config).score_color(
            loaded.selection.domain,
            loaded.tables.value(&feature.geo_id),
        )
    }

    fn desired_state(&self, feature: &MapFeature) -> FeatureState {
        FeatureState {
            color: self.fill_color(feature),
            selected: self.selected == Some(feature.id),
        }
    }

    /// Emits a state update for `id` only if it differs from what was last
    /// painted.
    fn paint(&mut self, id: FeatureId) -> Option<MapEffect> {
        let state = self.desired_state(self.feature(id)?);
        if self.painted.get(&id) == Some(&state) {
            return None;
        }
        self.painted.insert(id, state);
        Some(MapEffect::SetFeatureState { feature: id, state })
    }

    fn repaint(&mut self) -> Vec<MapEffect> {
        let ids: Vec<FeatureId> = self.features.keys().copied().collect();
        ids.into_iter().filter_map(|id| self.paint(id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wri_domain_models::{DomainId, GradientEntry, GradientKey};

    use crate::fetch::tests::{LOCATION_CSV, METRIC_CSV, selection};
    use crate::{parse_location_table, parse_metric_table};

    const TRACT: FeatureId = FeatureId(1);
    const OTHER: FeatureId = FeatureId(2);

    fn state() -> MapState<'static> {
        MapState::new(DomainRegistry::builtin(), GradientConfig::new())
    }

    fn features() -> Vec<MapFeature> {
        vec![
            MapFeature {
                id: TRACT,
                geo_id: "06037101100".to_owned(),
                name: Some("Census Tract 1011".to_owned()),
            },
            MapFeature {
                id: OTHER,
                geo_id: "06037999999".to_owned(),
                name: None,
            },
        ]
    }

    fn tables() -> JoinTables {
        JoinTables {
            metrics: parse_metric_table(METRIC_CSV, "geoid", "status_metric_1").unwrap(),
            locations: parse_location_table(LOCATION_CSV, "geoid").unwrap(),
        }
    }

    fn token_of(effects: &[MapEffect]) -> RequestToken {
        match effects {
            [MapEffect::FetchTables { token, .. }] => *token,
            other => panic!("expected a single fetch, got {other:?}"),
        }
    }

    /// State with features rendered and the scenario tables loaded.
    fn loaded() -> MapState<'static> {
        let mut state = state();
        state.apply(MapEvent::FeaturesRendered(features()));
        let token = token_of(&state.apply(MapEvent::SelectMetric(selection())));
        state.apply(MapEvent::TablesLoaded {
            token,
            result: Ok(tables()),
        });
        state
    }

    fn failure() -> Result<JoinTables, MapError> {
        Err(MapError::Unavailable("offline".to_owned()))
    }

    #[test]
    fn selecting_a_metric_issues_increasing_tokens() {
        let mut state = state();
        let first = token_of(&state.apply(MapEvent::SelectMetric(selection())));
        let second = token_of(&state.apply(MapEvent::SelectMetric(selection())));
        assert!(second > first);
        assert_eq!(state.latest_token(), second);
    }

    #[test]
    fn features_render_gray_before_data_arrives() {
        let mut state = state();
        let effects = state.apply(MapEvent::FeaturesRendered(features()));
        assert_eq!(effects.len(), 2);
        for effect in effects {
            let MapEffect::SetFeatureState { state, .. } = effect else {
                panic!("unexpected effect {effect:?}");
            };
            assert_eq!(state.color, NEUTRAL_GRAY);
            assert!(!state.selected);
        }
    }

    #[test]
    fn loaded_tables_color_joined_features() {
        let state = loaded();
        let expected = ColorScheme::new(DomainRegistry::builtin(), &GradientConfig::new())
            .score_color(GradientKey::Domain(DomainId::Water), Some(0.82));

        assert_eq!(state.painted(TRACT).unwrap().color, expected);
        assert_ne!(expected, NEUTRAL_GRAY);
        assert_eq!(state.painted(OTHER).unwrap().color, NEUTRAL_GRAY);
    }

    #[test]
    fn stale_responses_are_discarded() {
        let mut state = state();
        state.apply(MapEvent::FeaturesRendered(features()));
        let stale = token_of(&state.apply(MapEvent::SelectMetric(selection())));
        let fresh = token_of(&state.apply(MapEvent::SelectMetric(MetricSelection::new(
            GradientKey::Overall,
            "overall_score",
        ))));

        let effects = state.apply(MapEvent::TablesLoaded {
            token: stale,
            result: Ok(tables()),
        });
        assert!(effects.is_empty());
        assert!(state.tables().is_none());

        let stale_failure = state.apply(MapEvent::TablesLoaded {
            token: stale,
            result: failure(),
        });
        assert!(stale_failure.is_empty());
        assert_eq!(state.consecutive_failures(), 0);

        state.apply(MapEvent::TablesLoaded {
            token: fresh,
            result: Ok(tables()),
        });
        assert_eq!(
            state.loaded_selection().unwrap().domain,
            GradientKey::Overall
        );
    }

    #[test]
    fn repaint_is_idempotent_and_order_independent() {
        let a = loaded();

        let mut b = state();
        let token = token_of(&b.apply(MapEvent::SelectMetric(selection())));
        b.apply(MapEvent::TablesLoaded {
            token,
            result: Ok(tables()),
        });
        b.apply(MapEvent::FeaturesRendered(features()));

        for feature in [TRACT, OTHER] {
            assert_eq!(a.painted(feature), b.painted(feature));
        }

        let mut a = a;
        assert!(a.apply(MapEvent::FeaturesRendered(features())).is_empty());
        assert!(
            a.apply(MapEvent::GradientChanged(GradientConfig::new()))
                .is_empty()
        );
    }

    #[test]
    fn gradient_change_repaints_only_affected_features() {
        let mut state = loaded();
        let config = GradientConfig::new().with(
            GradientKey::Domain(DomainId::Water),
            GradientEntry::new(0.0, Rgb::new(0, 0, 0), 100.0, Rgb::new(0, 0, 255)),
        );
        let effects = state.apply(MapEvent::GradientChanged(config));

        assert_eq!(
            effects,
            [MapEffect::SetFeatureState {
                feature: TRACT,
                state: FeatureState {
                    color: Rgb::new(0, 0, 209),
                    selected: false,
                },
            }]
        );
    }

    #[test]
    fn failures_keep_previous_tables() {
        let mut state = loaded();
        let before = state.painted(TRACT);
        let token = token_of(&state.apply(MapEvent::SelectMetric(selection())));
        let effects = state.apply(MapEvent::TablesLoaded {
            token,
            result: failure(),
        });

        assert!(effects.is_empty());
        assert_eq!(state.tables(), Some(&tables()));
        assert_eq!(state.painted(TRACT), before);
    }

    #[test]
    fn banner_after_three_consecutive_failures() {
        let mut state = loaded();
        let fail = |state: &mut MapState<'_>| {
            let token = token_of(&state.apply(MapEvent::SelectMetric(selection())));
            state.apply(MapEvent::TablesLoaded {
                token,
                result: failure(),
            })
        };

        assert!(fail(&mut state).is_empty());
        assert!(fail(&mut state).is_empty());
        let third = fail(&mut state);
        assert!(matches!(third.as_slice(), [MapEffect::ShowBanner(_)]));
        assert!(state.banner_visible());
        assert!(fail(&mut state).is_empty());

        assert_eq!(state.apply(MapEvent::DismissBanner), [MapEffect::HideBanner]);
        assert!(state.apply(MapEvent::DismissBanner).is_empty());
        assert_eq!(state.consecutive_failures(), 4);
    }

    #[test]
    fn success_resets_failures_and_hides_banner() {
        let mut state = loaded();
        for _ in 0..FAILURE_BANNER_THRESHOLD {
            let token = token_of(&state.apply(MapEvent::SelectMetric(selection())));
            state.apply(MapEvent::TablesLoaded {
                token,
                result: failure(),
            });
        }
        assert!(state.banner_visible());

        let token = token_of(&state.apply(MapEvent::SelectMetric(selection())));
        let effects = state.apply(MapEvent::TablesLoaded {
            token,
            result: Ok(tables()),
        });
        assert_eq!(effects.first(), Some(&MapEffect::HideBanner));
        assert_eq!(state.consecutive_failures(), 0);
        assert!(!state.banner_visible());
    }

    #[test]
    fn hover_shows_scenario_tooltip() {
        let state = loaded();
        let effects = state.clone().reduce(MapEvent::PointerMove {
            feature: TRACT,
            x: 10.0,
            y: 40.0,
        });

        let [MapEffect::ShowTooltip(tooltip)] = effects.1.as_slice() else {
            panic!("expected tooltip, got {:?}", effects.1);
        };
        assert!(tooltip.title.contains("LOS ANGELES, CA"));
        assert_eq!(tooltip.value_text, "82.0%");
        assert_eq!(tooltip.swatch, state.painted(TRACT).unwrap().color);

        let (_, leave) = state.reduce(MapEvent::PointerLeave);
        assert_eq!(leave, [MapEffect::HideTooltip]);
    }

    #[test]
    fn click_publishes_selection() {
        let mut state = loaded();
        let effects = state.apply(MapEvent::Click(TRACT));

        assert_eq!(
            effects.last(),
            Some(&MapEffect::PublishSelection(RegionSelection {
                geo_id: "06037101100".to_owned(),
                location_name: "Los Angeles".to_owned(),
                state_name: Some("California".to_owned()),
                metric_value: Some(0.82),
            }))
        );
        assert!(state.painted(TRACT).unwrap().selected);
    }

    #[test]
    fn new_selection_clears_previous_first() {
        let mut state = loaded();
        state.apply(MapEvent::Click(TRACT));
        let effects = state.apply(MapEvent::Click(OTHER));

        let painted: Vec<(FeatureId, bool)> = effects
            .iter()
            .filter_map(|e| match e {
                MapEffect::SetFeatureState { feature, state } => Some((*feature, state.selected)),
                _ => None,
            })
            .collect();
        assert_eq!(painted, [(TRACT, false), (OTHER, true)]);
        assert_eq!(state.selected(), Some(OTHER));

        let selected = [TRACT, OTHER]
            .into_iter()
            .filter(|id| state.painted(*id).is_some_and(|s| s.selected))
            .count();
        assert_eq!(selected, 1);
    }

    #[test]
    fn unjoined_click_falls_back_to_geo_id() {
        let mut state = loaded();
        let effects = state.apply(MapEvent::Click(OTHER));
        let Some(MapEffect::PublishSelection(selection)) = effects.last() else {
            panic!("expected selection, got {effects:?}");
        };
        assert_eq!(selection.location_name, "06037999999");
        assert_eq!(selection.state_name.as_deref(), Some("California"));
        assert_eq!(selection.metric_value, None);
    }

    #[test]
    fn large_renders_paint_each_feature_once() {
        let features: Vec<MapFeature> = (0..20_000_u32)
            .map(|i| MapFeature {
                id: FeatureId(u64::from(i)),
                geo_id: format!("06{i:09}"),
                name: None,
            })
            .collect();
        let metrics = (0..20_000_u32)
            .map(|i| (format!("06{i:09}"), f64::from(i % 100)))
            .collect();

        let mut state = state();
        let token = token_of(&state.apply(MapEvent::SelectMetric(selection())));
        state.apply(MapEvent::TablesLoaded {
            token,
            result: Ok(JoinTables {
                metrics,
                locations: BTreeMap::new(),
            }),
        });

        let effects = state.apply(MapEvent::FeaturesRendered(features.clone()));
        assert_eq!(effects.len(), features.len());
        assert!(
            state
                .apply(MapEvent::FeaturesRendered(features.clone()))
                .is_empty()
        );

        assert!(
            state
                .apply(MapEvent::FeaturesRendered(features[..10_000].to_vec()))
                .is_empty()
        );
        assert!(state.painted(FeatureId(5_000)).is_some());
        assert!(state.painted(FeatureId(15_000)).is_none());
    }

    #[test]
    fn duplicate_features_in_a_render_paint_once() {
        let mut state = state();
        let mut doubled = features();
        doubled.extend(features());
        assert_eq!(state.apply(MapEvent::FeaturesRendered(doubled)).len(), 2);
    }

    #[test]
    fn clicks_on_unknown_features_are_ignored() {
        let mut state = loaded();
        assert!(state.apply(MapEvent::Click(FeatureId(99))).is_empty());
        assert_eq!(state.selected(), None);
    }
}
