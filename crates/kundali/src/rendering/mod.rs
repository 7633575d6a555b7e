pub mod primitives;
pub mod spec;
pub mod svg;
pub mod visual_config;

pub use primitives::{Color, FontWeight, LabelRole, Point, Rect, Shape, Stroke, TextAnchor};
pub use spec::{ChartLabel, ChartSpec};
pub use svg::to_svg;
pub use visual_config::{ChartPalette, LabelStyle};
