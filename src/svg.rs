//! SVG visualization of a draw placement.
//!
//! Draws the resolved box, the padded content area, where the content lands
//! after its transform, and the clip rect if one applies. Content that
//! overflows the box (crop, oversized center) is drawn in full so the
//! overflow is visible.
//!
//! # Example
//!
//! ```
//! use zenfit::{AxisConstraint, FitPipeline, IntrinsicSize, ScalePolicy, svg::render_placement_svg};
//!
//! let mut fit = FitPipeline::default()
//!     .with_content(IntrinsicSize::new(1600, 900))
//!     .with_scale_policy(ScalePolicy::CenterCrop);
//! let resolved = fit.measure(AxisConstraint::exact(400), AxisConstraint::exact(400));
//! let placement = fit.place(resolved);
//!
//! let svg = render_placement_svg(&resolved, fit.padding(), &placement);
//! assert!(svg.starts_with("<svg"));
//! ```

use crate::constraint::Padding;
use crate::pipeline::ResolvedBox;
use crate::scale::DrawPlacement;
use crate::transform::Rect;

/// Maximum pixel width of the drawing area.
const MAX_PANEL_W: f64 = 300.0;
/// Maximum pixel height of the drawing area.
const MAX_PANEL_H: f64 = 300.0;
/// Margin around the drawing area.
const MARGIN: f64 = 40.0;
/// Height of the label text area above the drawing.
const LABEL_H: f64 = 22.0;

/// Render a complete SVG document for one placement.
pub fn render_placement_svg(
    resolved: &ResolvedBox,
    padding: &Padding,
    placement: &DrawPlacement,
) -> String {
    let outer = Rect::at_origin(resolved.width as f64, resolved.height as f64);
    let content_area = resolved.content_rect(padding);
    let content = placement.content_rect();

    // Everything drawn must fit, including overflowing content.
    let view = union(outer, content);
    let scale = panel_scale(&view);
    let map = |r: &Rect| {
        Rect::new(
            MARGIN + (r.x - view.x) * scale,
            MARGIN + LABEL_H + (r.y - view.y) * scale,
            r.width * scale,
            r.height * scale,
        )
    };

    let total_w = view.width * scale + 2.0 * MARGIN;
    let total_h = view.height * scale + 2.0 * MARGIN + LABEL_H * 2.0;

    let mut svg = String::with_capacity(2048);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {:.1} {:.1}">"#,
        total_w as u32, total_h as u32, total_w, total_h
    ));
    svg.push('\n');

    svg.push_str(
        r##"<style>
  text { font-family: "Consolas", "DejaVu Sans Mono", "Courier New", monospace; }
  .label { font-size: 13px; font-weight: bold; fill: #333; }
  .annotation { font-size: 11px; fill: #666; }
  .outer { fill: #e8e8e8; stroke: #999; stroke-width: 1; }
  .area { fill: none; stroke: #999; stroke-width: 1; stroke-dasharray: 4,2; }
  .content { fill: #6ba3d6; fill-opacity: 0.6; stroke: #2c6faa; stroke-width: 1.5; }
  .clip { fill: none; stroke: #d65b5b; stroke-width: 1.5; stroke-dasharray: 6,3; }
  @media (prefers-color-scheme: dark) {
    .label { fill: #e0e0e0; }
    .annotation { fill: #aaa; }
    .outer { fill: #2d2d2d; stroke: #555; }
    .content { fill: #3a72a4; stroke: #5a9fd4; }
  }
</style>
"##,
    );

    let label = format!(
        "Box  {}×{}{}",
        resolved.width,
        resolved.height,
        if resolved.too_small { "  (too small)" } else { "" }
    );
    svg.push_str(&format!(
        r#"<text x="{:.1}" y="{:.1}" class="label" text-anchor="middle">{}</text>"#,
        total_w / 2.0,
        MARGIN + 14.0 - LABEL_H / 2.0,
        escape_xml(&label)
    ));
    svg.push('\n');

    push_rect(&mut svg, &map(&outer), "outer");
    if content_area != outer {
        push_rect(&mut svg, &map(&content_area), "area");
    }
    push_rect(&mut svg, &map(&content), "content");
    if let Some(clip) = &placement.clip {
        push_rect(&mut svg, &map(clip), "clip");
    }

    let annotation = match &placement.transform {
        Some(t) => {
            let (sx, sy) = t.scale_factors();
            let (tx, ty) = t.translation();
            format!("scale ({sx:.3}, {sy:.3}) translate ({tx}, {ty})")
        }
        None => String::from("no transform"),
    };
    svg.push_str(&format!(
        r#"<text x="{:.1}" y="{:.1}" class="annotation" text-anchor="middle">{}</text>"#,
        total_w / 2.0,
        total_h - MARGIN / 2.0,
        escape_xml(&annotation)
    ));
    svg.push('\n');

    svg.push_str("</svg>\n");
    svg
}

fn push_rect(svg: &mut String, r: &Rect, class: &str) {
    svg.push_str(&format!(
        r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="{class}"/>"#,
        r.x, r.y, r.width, r.height
    ));
    svg.push('\n');
}

fn union(a: Rect, b: Rect) -> Rect {
    let x = a.x.min(b.x);
    let y = a.y.min(b.y);
    Rect::new(x, y, a.right().max(b.right()) - x, a.bottom().max(b.bottom()) - y)
}

/// Scale factor that fits `view` within MAX_PANEL_W × MAX_PANEL_H.
fn panel_scale(view: &Rect) -> f64 {
    if view.is_empty() {
        return 1.0;
    }
    (MAX_PANEL_W / view.width).min(MAX_PANEL_H / view.height)
}

/// Escape special characters for XML text content.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
