use crate::Rgb;

/// Linearly interpolates between two colors.
///
/// `ratio` is clamped to `[0, 1]` (a `NaN` ratio counts as `0`), so the
/// result never extrapolates past either endpoint. Each channel is computed
/// independently, rounded to the nearest integer and clamped to `[0, 255]`.
#[must_use]
pub fn interpolate(from: Rgb, to: Rgb, ratio: f64) -> Rgb {
    let ratio = if ratio.is_nan() {
        0.0
    } else {
        ratio.clamp(0.0, 1.0)
    };

    Rgb::new(
        lerp_channel(from.r, to.r, ratio),
        lerp_channel(from.g, to.g, ratio),
        lerp_channel(from.b, to.b, ratio),
    )
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lerp_channel(from: u8, to: u8, ratio: f64) -> u8 {
    let from = f64::from(from);
    let value = (f64::from(to) - from).mul_add(ratio, from);
    value.round().clamp(0.0, 255.0) as u8
}
