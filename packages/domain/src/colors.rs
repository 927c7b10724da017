//! Score-to-color resolution.
//!
//! Map fills, the legend, progress rings and the flower chart all resolve
//! colors through [`ColorScheme`], so the same `(domain, score)` pair always
//! yields the same color on every surface.

use serde::Serialize;
use wri_color::{NEUTRAL_GRAY, Rgb, WHITE, interpolate};
use wri_domain_models::{GradientConfig, GradientEntry, GradientKey};

use crate::DomainRegistry;

/// Lower bound of the default score window for every domain (percentage
/// scale).
pub const DOMAIN_WINDOW_MIN: f64 = 55.0;
/// Upper bound of the default domain window.
pub const DOMAIN_WINDOW_MAX: f64 = 90.0;

/// Default gradient for the aggregate "Overall Resilience" score.
pub const OVERALL_GRADIENT: GradientEntry =
    GradientEntry::new(0.0, Rgb::new(255, 245, 235), 100.0, Rgb::new(127, 39, 4));

/// Registry plus the active gradient configuration.
#[derive(Debug, Clone, Copy)]
pub struct ColorScheme<'a> {
    registry: &'a DomainRegistry,
    config: &'a GradientConfig,
}

impl<'a> ColorScheme<'a> {
    /// Creates a scheme over `registry` and the user's `config`.
    #[must_use]
    pub const fn new(registry: &'a DomainRegistry, config: &'a GradientConfig) -> Self {
        Self { registry, config }
    }

    /// The registry this scheme resolves domains against.
    #[must_use]
    pub const fn registry(&self) -> &'a DomainRegistry {
        self.registry
    }

    /// The static default gradient for `key`: white to the brand color over
    /// the default domain window, or [`OVERALL_GRADIENT`] for the aggregate.
    #[must_use]
    pub fn default_entry(&self, key: GradientKey) -> Option<GradientEntry> {
        match key {
            GradientKey::Overall => Some(OVERALL_GRADIENT),
            GradientKey::Domain(id) => self.registry.brand_color(id).map(|brand| {
                GradientEntry::new(DOMAIN_WINDOW_MIN, WHITE, DOMAIN_WINDOW_MAX, brand)
            }),
        }
    }

    /// The effective gradient for `key`: the configured override if any,
    /// otherwise the default. Domains missing from the registry have no
    /// gradient, even when the configuration names them.
    #[must_use]
    pub fn entry(&self, key: GradientKey) -> Option<GradientEntry> {
        if let GradientKey::Domain(id) = key {
            self.registry.get(id)?;
        }
        self.config
            .get(key)
            .copied()
            .or_else(|| self.default_entry(key))
    }

    /// Display color for `score` in `key`'s gradient.
    ///
    /// Absent (or `NaN`) scores are always [`NEUTRAL_GRAY`], whatever the
    /// configuration says.
    #[must_use]
    pub fn score_color(&self, key: GradientKey, score: Option<f64>) -> Rgb {
        let Some(score) = score.filter(|s| !s.is_nan()) else {
            return NEUTRAL_GRAY;
        };

        if let Some(entry) = self.entry(key) {
            entry.color_at(score)
        } else {
            log::warn!("No registry entry for domain '{key}', rendering as no data");
            NEUTRAL_GRAY
        }
    }

    /// Like [`Self::score_color`] but takes a string identifier, as found in
    /// URLs and CSV headers. Unknown identifiers log a warning and render
    /// gray.
    #[must_use]
    pub fn score_color_for(&self, domain_id: &str, score: Option<f64>) -> Rgb {
        match domain_id.parse::<GradientKey>() {
            Ok(key) => self.score_color(key, score),
            Err(e) => {
                log::warn!("{e}, rendering as no data");
                NEUTRAL_GRAY
            }
        }
    }

    /// Brand color used for labels and highlights; the aggregate uses the top
    /// of its gradient.
    #[must_use]
    pub fn brand_color(&self, key: GradientKey) -> Rgb {
        match key {
            GradientKey::Overall => self.entry(key).map_or(NEUTRAL_GRAY, |e| e.max_color),
            GradientKey::Domain(id) => self.registry.brand_color(id).unwrap_or(NEUTRAL_GRAY),
        }
    }

    /// Builds a map legend for `key` with `steps` evenly spaced stops.
    #[must_use]
    pub fn legend(&self, key: GradientKey, steps: usize) -> Option<Legend> {
        let entry = self.entry(key)?;
        Some(Legend::from_entry(key, &entry, steps))
    }

    /// Returns a copy of the full configuration with defaults filled in for
    /// every key.
    #[must_use]
    pub fn resolved_config(&self) -> GradientConfig {
        GradientKey::all()
            .into_iter()
            .filter_map(|key| self.entry(key).map(|entry| (key, entry)))
            .fold(GradientConfig::new(), |config, (key, entry)| {
                config.with(key, entry)
            })
    }
}

/// The built-in gradient configuration: every key set to its default.
#[must_use]
pub fn builtin_config(registry: &DomainRegistry) -> GradientConfig {
    ColorScheme::new(registry, &GradientConfig::new()).resolved_config()
}

/// One color stop of a [`Legend`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendStop {
    /// Score at this stop, on the gradient's own scale.
    pub value: f64,
    /// Color rendered for that score.
    pub color: Rgb,
}

/// A map legend: evenly spaced stops across a gradient window plus the
/// no-data swatch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Legend {
    /// Gradient the legend describes.
    pub key: GradientKey,
    /// Stops from the window minimum to the maximum.
    pub stops: Vec<LegendStop>,
    /// Swatch shown for regions without data.
    pub no_data: Rgb,
}

impl Legend {
    /// Builds a legend for `entry`. At least two stops are always produced.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_entry(key: GradientKey, entry: &GradientEntry, steps: usize) -> Self {
        let steps = steps.max(2);
        let last = (steps - 1) as f64;

        let stops = (0..steps)
            .map(|i| {
                let ratio = i as f64 / last;
                LegendStop {
                    value: (entry.max_value - entry.min_value).mul_add(ratio, entry.min_value),
                    color: interpolate(entry.min_color, entry.max_color, ratio),
                }
            })
            .collect();

        Self {
            key,
            stops,
            no_data: NEUTRAL_GRAY,
        }
    }
}
