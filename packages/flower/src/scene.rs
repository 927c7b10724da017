//! Arc geometry for the flower chart.
//!
//! Angles are radians measured clockwise from 12 o'clock. Points use screen
//! coordinates (y grows downward) relative to the chart center.

use std::collections::BTreeMap;
use std::f64::consts::TAU;

use serde::Serialize;
use wri_color::{NEUTRAL_GRAY, Rgb, normalize};
use wri_domain::ColorScheme;
use wri_domain_models::{DomainId, GradientKey};

/// Radii and spacing of the chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowerGeometry {
    /// Radius of the empty center.
    pub inner_radius: f64,
    /// Outer radius of a zero or missing score, so such petals stay visible.
    pub min_outer_radius: f64,
    /// Outer radius of a perfect score, and of the outline arcs.
    pub max_outer_radius: f64,
    /// Gap between neighbouring petals, in radians.
    pub pad_angle: f64,
}

impl Default for FlowerGeometry {
    fn default() -> Self {
        Self {
            inner_radius: 24.0,
            min_outer_radius: 36.0,
            max_outer_radius: 120.0,
            pad_angle: 0.02,
        }
    }
}

impl FlowerGeometry {
    /// Sets the inner radius.
    #[must_use]
    pub const fn with_inner_radius(mut self, radius: f64) -> Self {
        self.inner_radius = radius;
        self
    }

    /// Sets the outer radius range.
    #[must_use]
    pub const fn with_outer_radii(mut self, min: f64, max: f64) -> Self {
        self.min_outer_radius = min;
        self.max_outer_radius = max;
        self
    }

    /// Sets the gap between petals.
    #[must_use]
    pub const fn with_pad_angle(mut self, pad_angle: f64) -> Self {
        self.pad_angle = pad_angle;
        self
    }

    /// Outer radius for a normalized ratio in `[0, 1]`.
    #[must_use]
    pub fn outer_radius(&self, ratio: f64) -> f64 {
        (self.max_outer_radius - self.min_outer_radius).mul_add(ratio, self.min_outer_radius)
    }
}

/// How an arc is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArcStyle {
    /// Stroked outline only.
    Outline,
    /// Filled sector.
    Fill,
}

/// One annular sector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Arc {
    /// Start angle.
    pub start_angle: f64,
    /// End angle, greater than `start_angle`.
    pub end_angle: f64,
    /// Inner radius.
    pub inner_radius: f64,
    /// Outer radius.
    pub outer_radius: f64,
    /// Fill or stroke color.
    pub color: Rgb,
    /// Fill or outline.
    pub style: ArcStyle,
}

impl Arc {
    /// Angle halfway between start and end.
    #[must_use]
    pub fn mid_angle(&self) -> f64 {
        f64::midpoint(self.start_angle, self.end_angle)
    }

    /// Angular extent.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Screen point at `angle` and `radius` from the center.
    #[must_use]
    pub fn point(angle: f64, radius: f64) -> (f64, f64) {
        let (sin, cos) = angle.sin_cos();
        (radius * sin, -radius * cos)
    }
}

/// One domain's outline and wedge.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Petal {
    /// Domain shown by this petal.
    pub domain: DomainId,
    /// Domain display label.
    pub label: String,
    /// Raw score, if any.
    pub score: Option<f64>,
    /// Domain brand color.
    pub brand_color: Rgb,
    /// Full-range outline, drawn beneath the wedge.
    pub outline: Arc,
    /// Score wedge.
    pub wedge: Arc,
}

/// Declarative description of the whole chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowerScene {
    /// Geometry the scene was built with.
    pub geometry: FlowerGeometry,
    /// One petal per registered domain, clockwise from 12 o'clock.
    pub petals: Vec<Petal>,
}

impl FlowerScene {
    /// Arcs in drawing order: each petal's outline, then its wedge.
    pub fn arcs(&self) -> impl Iterator<Item = &Arc> {
        self.petals.iter().flat_map(|p| [&p.outline, &p.wedge])
    }

    /// The petal for `domain`.
    #[must_use]
    pub fn petal(&self, domain: DomainId) -> Option<&Petal> {
        self.petals.iter().find(|p| p.domain == domain)
    }
}

/// Lays out one petal per domain of `scheme`'s registry.
///
/// Each wedge's outer radius is `min + (max - min) * ratio`, where `ratio`
/// is the score normalized on the 0–1 / 0–100 convention, and its color
/// comes from `scheme`, so it matches the map and legend. Domains without a
/// score get a gray wedge at the minimum radius.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn build_scene(
    scores: &BTreeMap<DomainId, f64>,
    scheme: ColorScheme<'_>,
    geometry: FlowerGeometry,
) -> FlowerScene {
    let domains = scheme.registry().domains();
    let step = TAU / domains.len().max(1) as f64;
    let pad = geometry.pad_angle.clamp(0.0, step);

    let petals = domains
        .iter()
        .enumerate()
        .map(|(i, domain)| {
            let start_angle = (i as f64).mul_add(step, pad / 2.0);
            let end_angle = start_angle + step - pad;
            let score = scores.get(&domain.id).copied().filter(|s| !s.is_nan());

            let (outer_radius, color) = match score {
                Some(score) => (
                    geometry.outer_radius(normalize(Some(score), None)),
                    scheme.score_color(GradientKey::Domain(domain.id), Some(score)),
                ),
                None => (geometry.min_outer_radius, NEUTRAL_GRAY),
            };

            Petal {
                domain: domain.id,
                label: domain.label.clone(),
                score,
                brand_color: domain.color,
                outline: Arc {
                    start_angle,
                    end_angle,
                    inner_radius: geometry.inner_radius,
                    outer_radius: geometry.max_outer_radius,
                    color: domain.color,
                    style: ArcStyle::Outline,
                },
                wedge: Arc {
                    start_angle,
                    end_angle,
                    inner_radius: geometry.inner_radius,
                    outer_radius,
                    color,
                    style: ArcStyle::Fill,
                },
            }
        })
        .collect::<Vec<_>>();

    log::trace!(
        "Built flower scene with {} petals ({} scored)",
        petals.len(),
        petals.iter().filter(|p| p.score.is_some()).count()
    );

    FlowerScene { geometry, petals }
}
