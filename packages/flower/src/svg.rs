//! SVG output for flower charts.

use std::f64::consts::{PI, TAU};

use crate::{Arc, ArcStyle, FlowerChart};

/// Stroke width of outline arcs.
pub const OUTLINE_STROKE_WIDTH: f64 = 1.5;

/// An SVG arc whose start and end points coincide draws nothing, so a
/// full-circle sector is drawn just short of closing.
const MAX_SPAN: f64 = TAU - 1e-4;

/// Path data for `arc` as an annular sector centered on the origin. An inner
/// radius of zero yields a pie slice.
#[must_use]
pub fn arc_path(arc: &Arc) -> String {
    let span = arc.span().clamp(0.0, MAX_SPAN);
    let start = arc.start_angle;
    let end = start + span;
    let large_arc = u8::from(span > PI);
    let r = arc.outer_radius;
    let ir = arc.inner_radius;

    let (x0, y0) = Arc::point(start, r);
    let (x1, y1) = Arc::point(end, r);

    if ir <= 0.0 {
        return format!("M0,0 L{x0:.3},{y0:.3} A{r:.3},{r:.3} 0 {large_arc} 1 {x1:.3},{y1:.3} Z");
    }

    let (x2, y2) = Arc::point(end, ir);
    let (x3, y3) = Arc::point(start, ir);
    format!(
        "M{x0:.3},{y0:.3} A{r:.3},{r:.3} 0 {large_arc} 1 {x1:.3},{y1:.3} \
         L{x2:.3},{y2:.3} A{ir:.3},{ir:.3} 0 {large_arc} 0 {x3:.3},{y3:.3} Z"
    )
}

fn arc_element(arc: &Arc) -> String {
    let d = arc_path(arc);
    let color = arc.color.to_hex();
    match arc.style {
        ArcStyle::Outline => format!(
            r#"<path d="{d}" fill="none" stroke="{color}" stroke-width="{OUTLINE_STROKE_WIDTH}"/>"#
        ),
        ArcStyle::Fill => format!(r#"<path d="{d}" fill="{color}"/>"#),
    }
}

/// Renders the chart as it is currently displayed (hover dimming and
/// center text included) as a standalone SVG document `size` pixels square.
#[must_use]
pub fn render(chart: &FlowerChart, size: u32) -> String {
    let scene = chart.displayed_scene();
    let extent = scene.geometry.max_outer_radius + OUTLINE_STROKE_WIDTH;
    let center = chart.center_text();

    let mut body = String::new();
    for petal in &scene.petals {
        body.push_str(&format!(
            "  <g data-domain=\"{}\">\n    <title>{}</title>\n    {}\n    {}\n  </g>\n",
            petal.domain,
            escape(&petal.label),
            arc_element(&petal.outline),
            arc_element(&petal.wedge),
        ));
    }

    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="{min:.1} {min:.1} {side:.1} {side:.1}">
{body}  <text x="0" y="0" text-anchor="middle" dominant-baseline="middle" fill="{color}">{text}</text>
</svg>
"#,
        min = -extent,
        side = extent * 2.0,
        color = center.color.to_hex(),
        text = escape(&center.text),
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
