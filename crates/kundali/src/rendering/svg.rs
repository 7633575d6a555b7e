//! SVG backend for [`ChartSpec`].

use crate::rendering::primitives::{Color, FontWeight, LabelRole, Shape, Stroke, TextAnchor};
use crate::rendering::spec::ChartSpec;

/// Render a chart spec as a standalone SVG document.
pub fn to_svg(spec: &ChartSpec) -> String {
    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = spec.width,
        h = spec.height
    ));
    svg.push('\n');

    for shape in &spec.shapes {
        svg.push_str("  ");
        svg.push_str(&render_shape(shape));
        svg.push('\n');
    }

    svg.push_str("</svg>\n");
    svg
}

fn render_shape(shape: &Shape) -> String {
    match shape {
        Shape::Rect { rect, fill, stroke } => format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"{}/>"#,
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            fill.map(|c| css(&c)).unwrap_or_else(|| "none".to_string()),
            stroke_attrs(stroke.as_ref())
        ),
        Shape::Line { from, to, stroke } => format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}"{}/>"#,
            from.x,
            from.y,
            to.x,
            to.y,
            stroke_attrs(Some(stroke))
        ),
        Shape::Text {
            position,
            content,
            size,
            color,
            weight,
            anchor,
            house,
            role,
        } => {
            let weight = match weight {
                FontWeight::Normal => "",
                FontWeight::Bold => r#" font-weight="bold""#,
            };
            let anchor = match anchor {
                TextAnchor::Start => "start",
                TextAnchor::Middle => "middle",
                TextAnchor::End => "end",
            };
            let role = match role {
                LabelRole::HouseNumber => "house-number",
                LabelRole::Occupants => "occupants",
            };
            format!(
                r#"<text x="{}" y="{}" font-size="{}" fill="{}"{} text-anchor="{}" dominant-baseline="middle" data-house="{}" class="{}">{}</text>"#,
                position.x,
                position.y,
                size,
                css(color),
                weight,
                anchor,
                house,
                role,
                escape_xml(content)
            )
        }
    }
}

fn stroke_attrs(stroke: Option<&Stroke>) -> String {
    match stroke {
        Some(s) => format!(r#" stroke="{}" stroke-width="{}""#, css(&s.color), s.width),
        None => String::new(),
    }
}

fn css(color: &Color) -> String {
    color.to_css_string()
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
