//! Gradient configuration types.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use wri_color::{Rgb, ScoreWindow, interpolate, normalize_windowed, scale_to_window};

use crate::GradientKey;

/// Normalization window and color pair for one domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientEntry {
    /// Score that maps to `min_color`.
    pub min_value: f64,
    /// Color at (and below) `min_value`.
    #[serde(with = "wri_color::lenient_hex")]
    pub min_color: Rgb,
    /// Score that maps to `max_color`.
    pub max_value: f64,
    /// Color at (and above) `max_value`.
    #[serde(with = "wri_color::lenient_hex")]
    pub max_color: Rgb,
}

impl GradientEntry {
    /// Creates an entry.
    #[must_use]
    pub const fn new(min_value: f64, min_color: Rgb, max_value: f64, max_color: Rgb) -> Self {
        Self {
            min_value,
            min_color,
            max_value,
            max_color,
        }
    }

    /// The entry's score window.
    #[must_use]
    pub const fn window(&self) -> ScoreWindow {
        ScoreWindow::new(self.min_value, self.max_value)
    }

    /// Ratio of `score` within the window, after bringing the score onto the
    /// window's scale.
    #[must_use]
    pub fn ratio(&self, score: f64) -> f64 {
        let window = self.window();
        normalize_windowed(scale_to_window(score, window), window.min, window.max)
    }

    /// Color for a present score.
    #[must_use]
    pub fn color_at(&self, score: f64) -> Rgb {
        interpolate(self.min_color, self.max_color, self.ratio(score))
    }
}

/// The active set of gradient entries, keyed by domain (plus the aggregate).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GradientConfig {
    entries: BTreeMap<GradientKey, GradientEntry>,
}

impl GradientConfig {
    /// Creates an empty configuration; every key then uses its default.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Returns the entry for `key`, if one is configured.
    #[must_use]
    pub fn get(&self, key: GradientKey) -> Option<&GradientEntry> {
        self.entries.get(&key)
    }

    /// Sets the entry for `key`, returning the previous one.
    pub fn set(&mut self, key: GradientKey, entry: GradientEntry) -> Option<GradientEntry> {
        self.entries.insert(key, entry)
    }

    /// Removes the entry for `key` so it falls back to its default.
    pub fn remove(&mut self, key: GradientKey) -> Option<GradientEntry> {
        self.entries.remove(&key)
    }

    /// Builder form of [`Self::set`].
    #[must_use]
    pub fn with(mut self, key: GradientKey, entry: GradientEntry) -> Self {
        self.entries.insert(key, entry);
        self
    }

    /// Iterates over configured entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (GradientKey, &GradientEntry)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    /// Number of configured entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The exported/imported JSON form of a [`GradientConfig`].
///
/// Keys are kept as strings here so that a document naming a domain this
/// build does not know about still parses; the importer decides what to do
/// with unknown keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientConfigDocument {
    /// User-chosen configuration name.
    pub config_name: String,
    /// When the document was exported.
    pub timestamp: DateTime<Utc>,
    /// Entries by domain key.
    pub gradients: BTreeMap<String, GradientEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DomainId;

    const BRAND: Rgb = Rgb::new(171, 16, 78);

    #[test]
    fn entry_colors_fractional_and_percentage_scores_alike() {
        let entry = GradientEntry::new(55.0, Rgb::new(255, 255, 255), 90.0, BRAND);
        assert_eq!(entry.color_at(80.0), entry.color_at(0.8));
        assert_eq!(entry.color_at(55.0), Rgb::new(255, 255, 255));
        assert_eq!(entry.color_at(90.0), BRAND);
        assert_eq!(entry.color_at(30.0), Rgb::new(255, 255, 255));
    }

    #[test]
    fn entry_json_uses_camel_case_and_hex() {
        let entry = GradientEntry::new(55.0, Rgb::new(255, 255, 255), 90.0, BRAND);
        let json = serde_json::to_value(entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "minValue": 55.0,
                "minColor": "#ffffff",
                "maxValue": 90.0,
                "maxColor": "#ab104e",
            })
        );
    }

    #[test]
    fn malformed_colors_become_gray() {
        let entry: GradientEntry = serde_json::from_str(
            r##"{"minValue":0,"minColor":"white","maxValue":1,"maxColor":"#ab104e"}"##,
        )
        .unwrap();
        assert_eq!(entry.min_color, wri_color::NEUTRAL_GRAY);
        assert_eq!(entry.max_color, BRAND);
    }

    #[test]
    fn config_set_get_remove() {
        let mut config = GradientConfig::new();
        let key = GradientKey::Domain(DomainId::Water);
        let entry = GradientEntry::new(0.0, Rgb::new(0, 0, 0), 100.0, BRAND);

        assert!(config.get(key).is_none());
        assert!(config.set(key, entry).is_none());
        assert_eq!(config.get(key), Some(&entry));
        assert_eq!(config.len(), 1);
        assert_eq!(config.remove(key), Some(entry));
        assert!(config.is_empty());
    }
}
