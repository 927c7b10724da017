//! Score normalization.
//!
//! Scores arrive either as fractions (`0.82`) or as percentages (`82`). The
//! convention used throughout is that any value strictly greater than `1` is
//! on the 0–100 scale, so `1.0` itself reads as 100%.

/// A `[min, max]` score window that a gradient is stretched across.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWindow {
    /// Score mapped to ratio `0`.
    pub min: f64,
    /// Score mapped to ratio `1`.
    pub max: f64,
}

impl ScoreWindow {
    /// Creates a window.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether the window itself is expressed on the 0–1 scale.
    ///
    /// Decided by `max` alone under the same "greater than 1 is a
    /// percentage" rule as scores. A window straddling 1, such as
    /// `0..1.5`, is therefore a percentage window spanning 0% to 1.5%, and
    /// a fractional score of `0.5` (50%) lies above it.
    #[must_use]
    pub fn is_fractional(self) -> bool {
        self.max <= 1.0
    }
}

/// Maps a raw score onto `[0, 1]`.
///
/// Absent and `NaN` scores return `0`; callers that need to distinguish
/// "no data" from a genuinely low score must check for absence first.
#[must_use]
pub fn normalize(raw: Option<f64>, window: Option<ScoreWindow>) -> f64 {
    let Some(raw) = raw.filter(|v| !v.is_nan()) else {
        return 0.0;
    };

    match window {
        Some(window) => normalize_windowed(raw, window.min, window.max),
        None => normalize_default(raw),
    }
}

/// Scale-inferring normalization: values above `1` are divided by `100`.
#[must_use]
pub fn normalize_default(raw: f64) -> f64 {
    if raw.is_nan() {
        return 0.0;
    }
    let ratio = if raw > 1.0 { raw / 100.0 } else { raw };
    ratio.clamp(0.0, 1.0)
}

/// Windowed normalization: `(raw - min) / (max - min)`, clamped.
///
/// A degenerate window (`min == max`) yields `1` for scores at or above the
/// bound and `0` below it.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn normalize_windowed(raw: f64, min: f64, max: f64) -> f64 {
    if raw.is_nan() {
        return 0.0;
    }
    if max == min {
        return if raw >= min { 1.0 } else { 0.0 };
    }
    ((raw - min) / (max - min)).clamp(0.0, 1.0)
}

/// Converts a score to the 0–100 scale.
#[must_use]
pub fn to_percent(raw: f64) -> f64 {
    if raw > 1.0 { raw } else { raw * 100.0 }
}

/// Expresses `raw` on the same scale as `window`.
///
/// Metric tables carry fractions while gradient windows are usually written
/// as percentages (`55..90`); without this a fractional score would always
/// fall below the window.
#[must_use]
pub fn scale_to_window(raw: f64, window: ScoreWindow) -> f64 {
    if window.is_fractional() {
        if raw > 1.0 { raw / 100.0 } else { raw }
    } else {
        to_percent(raw)
    }
}

/// Formats a score as a percentage with one decimal place (`0.82` → `82.0%`).
#[must_use]
pub fn format_percent(raw: f64) -> String {
    format!("{:.1}%", to_percent(raw))
}
