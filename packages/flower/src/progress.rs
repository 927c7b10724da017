//! Circular progress indicators for single scores.

use std::f64::consts::TAU;

use serde::Serialize;
use wri_color::{NEUTRAL_GRAY, Rgb, format_percent, normalize};
use wri_domain::ColorScheme;
use wri_domain_models::GradientKey;

/// Track color behind the progress stroke.
pub const TRACK_COLOR: Rgb = Rgb::new(0xee, 0xee, 0xee);

/// A ring whose stroke covers the score's share of the circumference.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRing {
    /// Radius of the stroke's centerline.
    pub radius: f64,
    /// Stroke width.
    pub stroke_width: f64,
    /// Filled share, in `[0, 1]`.
    pub ratio: f64,
    /// Stroke color.
    pub color: Rgb,
    /// Centered label, e.g. `"82.0%"`.
    pub label: String,
}

impl ProgressRing {
    /// Creates a ring for `score` drawn in `color`. Missing scores draw an
    /// empty gray ring labelled "No data".
    #[must_use]
    pub fn new(score: Option<f64>, color: Rgb, radius: f64, stroke_width: f64) -> Self {
        let score = score.filter(|s| !s.is_nan());
        Self {
            radius,
            stroke_width,
            ratio: normalize(score, None),
            color: if score.is_some() { color } else { NEUTRAL_GRAY },
            label: score.map_or_else(|| "No data".to_owned(), format_percent),
        }
    }

    /// Creates a ring colored like the map and flower chart color `score`
    /// for `key`.
    #[must_use]
    pub fn for_key(
        scheme: ColorScheme<'_>,
        key: GradientKey,
        score: Option<f64>,
        radius: f64,
        stroke_width: f64,
    ) -> Self {
        Self::new(score, scheme.score_color(key, score), radius, stroke_width)
    }

    /// Length of the full ring.
    #[must_use]
    pub fn circumference(&self) -> f64 {
        TAU * self.radius
    }

    /// `stroke-dashoffset` that leaves exactly `ratio` of the ring drawn.
    #[must_use]
    pub fn dash_offset(&self) -> f64 {
        self.circumference() * (1.0 - self.ratio)
    }

    /// Width and height of the ring's bounding box.
    #[must_use]
    pub fn size(&self) -> f64 {
        self.radius.mul_add(2.0, self.stroke_width)
    }

    /// Standalone SVG, starting at 12 o'clock and filling clockwise.
    #[must_use]
    pub fn to_svg(&self) -> String {
        let size = self.size();
        let c = size / 2.0;
        let r = self.radius;
        let w = self.stroke_width;
        let circumference = self.circumference();
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size:.1}" height="{size:.1}">
  <circle cx="{c:.1}" cy="{c:.1}" r="{r:.1}" fill="none" stroke="{track}" stroke-width="{w:.1}"/>
  <circle cx="{c:.1}" cy="{c:.1}" r="{r:.1}" fill="none" stroke="{color}" stroke-width="{w:.1}" stroke-dasharray="{circumference:.3}" stroke-dashoffset="{offset:.3}" transform="rotate(-90 {c:.1} {c:.1})"/>
  <text x="{c:.1}" y="{c:.1}" text-anchor="middle" dominant-baseline="middle">{label}</text>
</svg>
"#,
            track = TRACK_COLOR.to_hex(),
            color = self.color.to_hex(),
            offset = self.dash_offset(),
            label = self.label,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wri_domain::DomainRegistry;
    use wri_domain_models::{DomainId, GradientConfig};

    const EPS: f64 = 1e-9;

    #[test]
    fn dash_offset_tracks_score() {
        let ring = ProgressRing::new(Some(0.25), Rgb::new(0, 0, 0), 10.0, 2.0);
        assert!((ring.circumference() - TAU * 10.0).abs() < EPS);
        assert!((ring.dash_offset() - ring.circumference() * 0.75).abs() < EPS);
        assert_eq!(ring.label, "25.0%");
        assert!((ring.size() - 22.0).abs() < EPS);
    }

    #[test]
    fn percentage_scores_fill_the_same() {
        let a = ProgressRing::new(Some(0.6), Rgb::new(0, 0, 0), 10.0, 2.0);
        let b = ProgressRing::new(Some(60.0), Rgb::new(0, 0, 0), 10.0, 2.0);
        assert!((a.ratio - b.ratio).abs() < EPS);
        assert_eq!(a.label, b.label);
    }

    #[test]
    fn missing_score_is_empty_and_gray() {
        let ring = ProgressRing::new(None, Rgb::new(255, 0, 0), 10.0, 2.0);
        assert!(ring.ratio.abs() < EPS);
        assert!((ring.dash_offset() - ring.circumference()).abs() < EPS);
        assert_eq!(ring.color, NEUTRAL_GRAY);
        assert_eq!(ring.label, "No data");
    }

    #[test]
    fn ring_color_matches_scheme() {
        let config = GradientConfig::new();
        let scheme = ColorScheme::new(DomainRegistry::builtin(), &config);
        let key = GradientKey::Domain(DomainId::Livelihoods);
        let ring = ProgressRing::for_key(scheme, key, Some(70.0), 20.0, 4.0);
        assert_eq!(ring.color, scheme.score_color(key, Some(70.0)));
    }

    #[test]
    fn svg_contains_stroke_and_label() {
        let ring = ProgressRing::new(Some(82.0), Rgb::new(0xab, 0x10, 0x4e), 20.0, 4.0);
        let svg = ring.to_svg();
        assert!(svg.contains("stroke=\"#ab104e\""));
        assert!(svg.contains(">82.0%</text>"));
    }
}
