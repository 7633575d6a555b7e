use crate::chart::HouseNumber;
use crate::rendering::primitives::{LabelRole, Point, Shape};
use serde::{Deserialize, Serialize};

/// Chart specification - declarative description of chart to render.
///
/// Shapes are listed in paint order. Nothing here is tied to a drawing
/// surface; see [`crate::rendering::svg`] for one backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub width: f32,
    pub height: f32,
    pub template: String,
    pub shapes: Vec<Shape>,
}

/// A positioned text pulled out of a [`ChartSpec`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLabel<'a> {
    pub house: HouseNumber,
    pub role: LabelRole,
    pub position: Point,
    pub content: &'a str,
}

impl ChartSpec {
    /// Create a new empty chart spec
    pub fn new(width: f32, height: f32, template: impl Into<String>) -> Self {
        Self {
            width,
            height,
            template: template.into(),
            shapes: Vec::new(),
        }
    }

    pub fn labels(&self) -> impl Iterator<Item = ChartLabel<'_>> {
        self.shapes.iter().filter_map(|shape| match shape {
            Shape::Text {
                position,
                content,
                house,
                role,
                ..
            } => Some(ChartLabel {
                house: *house,
                role: *role,
                position: *position,
                content: content.as_str(),
            }),
            _ => None,
        })
    }

    pub fn label(&self, house: HouseNumber, role: LabelRole) -> Option<ChartLabel<'_>> {
        self.labels().find(|l| l.house == house && l.role == role)
    }

    pub fn line_count(&self) -> usize {
        self.shapes
            .iter()
            .filter(|s| matches!(s, Shape::Line { .. }))
            .count()
    }
}
