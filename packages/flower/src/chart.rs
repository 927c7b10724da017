//! Hover interaction for the flower chart.

use serde::Serialize;
use wri_color::{Rgb, to_percent};
use wri_domain_models::DomainId;

use crate::FlowerScene;

/// Color every non-hovered wedge fades to while one petal is hovered.
pub const DIM_GRAY: Rgb = Rgb::new(0xe6, 0xe6, 0xe6);

/// Center text shown when nothing is hovered.
pub const PLACEHOLDER_TEXT: &str = "Hover a petal";

/// Color of the placeholder text.
pub const PLACEHOLDER_COLOR: Rgb = Rgb::new(0x66, 0x66, 0x66);

/// Center text of a hovered petal without a score.
pub const NO_SCORE_TEXT: &str = "No data";

/// Hover events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowerEvent {
    /// The pointer entered a petal.
    Hover(DomainId),
    /// The pointer left the petal.
    Leave,
}

/// Text in the middle of the chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CenterText {
    /// Text content.
    pub text: String,
    /// Text color.
    pub color: Rgb,
}

/// A scene plus its transient hover state.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowerChart {
    scene: FlowerScene,
    hovered: Option<DomainId>,
}

impl FlowerChart {
    /// Wraps `scene` with nothing hovered.
    #[must_use]
    pub const fn new(scene: FlowerScene) -> Self {
        Self {
            scene,
            hovered: None,
        }
    }

    /// Pure form of [`Self::apply`].
    #[must_use]
    pub fn reduce(mut self, event: FlowerEvent) -> Self {
        self.apply(event);
        self
    }

    /// Updates the hover state.
    pub fn apply(&mut self, event: FlowerEvent) {
        self.hovered = match event {
            FlowerEvent::Hover(domain) if self.scene.petal(domain).is_some() => Some(domain),
            FlowerEvent::Hover(domain) => {
                log::debug!("Ignoring hover on '{domain}', which has no petal");
                self.hovered
            }
            FlowerEvent::Leave => None,
        };
    }

    /// The underlying scene, with its undimmed colors.
    #[must_use]
    pub const fn scene(&self) -> &FlowerScene {
        &self.scene
    }

    /// The hovered domain.
    #[must_use]
    pub const fn hovered(&self) -> Option<DomainId> {
        self.hovered
    }

    /// Current wedge color of `domain`.
    #[must_use]
    pub fn wedge_color(&self, domain: DomainId) -> Option<Rgb> {
        let petal = self.scene.petal(domain)?;
        Some(match self.hovered {
            Some(hovered) if hovered != domain => DIM_GRAY,
            _ => petal.wedge.color,
        })
    }

    /// Current center text: the hovered domain's rounded percentage in its
    /// brand color, or the placeholder.
    #[must_use]
    pub fn center_text(&self) -> CenterText {
        let Some(petal) = self.hovered.and_then(|d| self.scene.petal(d)) else {
            return CenterText {
                text: PLACEHOLDER_TEXT.to_owned(),
                color: PLACEHOLDER_COLOR,
            };
        };

        CenterText {
            text: petal.score.map_or_else(
                || NO_SCORE_TEXT.to_owned(),
                |score| format!("{}%", to_percent(score).round()),
            ),
            color: petal.brand_color,
        }
    }

    /// The scene as currently displayed, with dimming applied.
    #[must_use]
    pub fn displayed_scene(&self) -> FlowerScene {
        let mut scene = self.scene.clone();
        for petal in &mut scene.petals {
            if let Some(color) = self.wedge_color(petal.domain) {
                petal.wedge.color = color;
            }
        }
        scene
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::{FlowerGeometry, build_scene};
    use wri_domain::{ColorScheme, DomainRegistry};
    use wri_domain_models::GradientConfig;

    fn chart() -> FlowerChart {
        let config = GradientConfig::new();
        let scores = BTreeMap::from([(DomainId::Water, 0.824), (DomainId::Species, 61.5)]);
        FlowerChart::new(build_scene(
            &scores,
            ColorScheme::new(DomainRegistry::builtin(), &config),
            FlowerGeometry::default(),
        ))
    }

    #[test]
    fn hover_dims_other_petals() {
        let chart = chart().reduce(FlowerEvent::Hover(DomainId::Water));
        let water = chart.scene().petal(DomainId::Water).unwrap();

        assert_eq!(chart.wedge_color(DomainId::Water), Some(water.wedge.color));
        for domain in DomainId::all().iter().filter(|d| **d != DomainId::Water) {
            assert_eq!(chart.wedge_color(*domain), Some(DIM_GRAY));
        }
        assert_eq!(
            chart.center_text(),
            CenterText {
                text: "82%".to_owned(),
                color: water.brand_color,
            }
        );
    }

    #[test]
    fn percentage_scale_scores_round() {
        let chart = chart().reduce(FlowerEvent::Hover(DomainId::Species));
        assert_eq!(chart.center_text().text, "62%");
    }

    #[test]
    fn leave_restores_everything() {
        let initial = chart();
        let chart = initial
            .clone()
            .reduce(FlowerEvent::Hover(DomainId::Water))
            .reduce(FlowerEvent::Leave);

        assert_eq!(chart, initial);
        assert_eq!(chart.displayed_scene(), *initial.scene());
        assert_eq!(chart.center_text().text, PLACEHOLDER_TEXT);
    }

    #[test]
    fn hovering_unscored_petal_shows_no_data() {
        let chart = chart().reduce(FlowerEvent::Hover(DomainId::Habitats));
        let text = chart.center_text();
        assert_eq!(text.text, NO_SCORE_TEXT);
        assert_eq!(
            text.color,
            chart.scene().petal(DomainId::Habitats).unwrap().brand_color
        );
    }

    #[test]
    fn displayed_scene_applies_dimming() {
        let chart = chart().reduce(FlowerEvent::Hover(DomainId::Species));
        let displayed = chart.displayed_scene();
        let dimmed = displayed
            .petals
            .iter()
            .filter(|p| p.wedge.color == DIM_GRAY)
            .count();
        assert_eq!(dimmed, DomainId::all().len() - 1);
        assert_eq!(displayed.petals.len(), chart.scene().petals.len());
    }
}
