use crate::rendering::primitives::{Color, FontWeight, Stroke};

/// Text styling for one label role
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelStyle {
    pub size: f32,
    pub color: Color,
    pub weight: FontWeight,
}

/// Visual styling for a diamond chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPalette {
    pub background: Color,
    pub border: Stroke,
    pub diagonals: Stroke,
    pub diamond: Stroke,
    pub house_number: LabelStyle,
    pub occupants: LabelStyle,
}

impl ChartPalette {
    /// Cream card with purple construction lines
    pub fn card() -> Self {
        Self {
            background: Color::rgb(0xFF, 0xF8, 0xDC),
            border: Stroke {
                color: Color::rgb(0xFF, 0x6F, 0x00),
                width: 4.0,
            },
            diagonals: Stroke {
                color: Color::rgb(0x6A, 0x1B, 0x9A),
                width: 2.0,
            },
            diamond: Stroke {
                color: Color::rgb(0x6A, 0x1B, 0x9A),
                width: 1.5,
            },
            house_number: LabelStyle {
                size: 10.0,
                color: Color::rgb(0x99, 0x99, 0x99),
                weight: FontWeight::Normal,
            },
            occupants: LabelStyle {
                size: 12.0,
                color: Color::rgb(0x8B, 0x00, 0x00),
                weight: FontWeight::Bold,
            },
        }
    }

    /// Pale yellow sheet with saffron lines
    pub fn standalone() -> Self {
        let saffron = Color::rgb(0xFF, 0x6B, 0x35);
        Self {
            background: Color::rgb(0xFF, 0xFA, 0xCD),
            border: Stroke {
                color: saffron,
                width: 4.0,
            },
            diagonals: Stroke {
                color: saffron,
                width: 2.0,
            },
            diamond: Stroke {
                color: saffron,
                width: 2.0,
            },
            house_number: LabelStyle {
                size: 12.0,
                color: Color::rgb(0x99, 0x99, 0x99),
                weight: FontWeight::Normal,
            },
            occupants: LabelStyle {
                size: 14.0,
                color: Color::rgb(0x8B, 0x00, 0x00),
                weight: FontWeight::Bold,
            },
        }
    }
}

impl Default for ChartPalette {
    fn default() -> Self {
        Self::standalone()
    }
}
