//! Fixed geometry of the North-Indian diamond chart.
//!
//! House regions are carved out of a square frame by its two diagonals and
//! the diamond joining the midpoints of its edges. House 1 is the top
//! central diamond; houses then run anticlockwise (2 top-left, 4 left
//! centre, 7 bottom centre, 10 right centre, 12 top-right).
//!
//! Both named templates scale the one [`NORTH_INDIAN_SLOTS`] table. The card
//! template is therefore a smaller standalone chart; it does not reproduce
//! the hand-placed, clockwise-numbered coordinates the service's card view
//! used, which put several labels on region boundaries.

use crate::chart::{HouseNumber, HOUSE_COUNT};
use crate::rendering::primitives::{Point, Rect};
use crate::rendering::visual_config::ChartPalette;

pub const DEFAULT_RETROGRADE_MARKER: &str = "(R)";

/// Label anchors for one house
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometricSlot {
    pub number: Point,
    pub occupants: Point,
}

/// Slot expressed as offsets from the frame centre, in units of the frame's
/// half-width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitSlot {
    pub number: (f32, f32),
    pub occupants: (f32, f32),
}

const fn unit(number: (f32, f32), occupants: (f32, f32)) -> UnitSlot {
    UnitSlot { number, occupants }
}

// Central diamonds label near their centroid with the number towards the
// chart centre; corner triangles the same, numbers towards the inner apex.
pub const NORTH_INDIAN_SLOTS: [UnitSlot; HOUSE_COUNT] = [
    unit((0.0, -0.2), (0.0, -0.5)),
    unit((-0.5, -0.58), (-0.5, -0.83)),
    unit((-0.58, -0.5), (-0.83, -0.5)),
    unit((-0.2, 0.0), (-0.5, 0.0)),
    unit((-0.58, 0.5), (-0.83, 0.5)),
    unit((-0.5, 0.58), (-0.5, 0.83)),
    unit((0.0, 0.2), (0.0, 0.5)),
    unit((0.5, 0.58), (0.5, 0.83)),
    unit((0.58, 0.5), (0.83, 0.5)),
    unit((0.2, 0.0), (0.5, 0.0)),
    unit((0.58, -0.5), (0.83, -0.5)),
    unit((0.5, -0.58), (0.5, -0.83)),
];

/// Everything the layout engine needs that does not come from chart data.
#[derive(Debug, Clone, PartialEq)]
pub struct DiamondTemplate {
    pub name: String,
    pub width: f32,
    pub height: f32,
    /// Square spanned by the border and the construction lines
    pub frame: Rect,
    pub slots: [GeometricSlot; HOUSE_COUNT],
    pub palette: ChartPalette,
    pub retrograde_marker: String,
}

impl DiamondTemplate {
    /// Compact card-style diamond: 300x300, frame inset by 2.
    pub fn card() -> Self {
        Self::square("card", 300.0, 2.0, ChartPalette::card())
    }

    /// Larger standalone diamond: 360x360, frame inset by 5.
    pub fn standalone() -> Self {
        Self::square("standalone", 360.0, 5.0, ChartPalette::standalone())
    }

    /// Square canvas of `size` with the frame inset by `inset` on every side
    /// and the traditional slots scaled to that frame.
    pub fn square(name: impl Into<String>, size: f32, inset: f32, palette: ChartPalette) -> Self {
        let frame = Rect::new(inset, inset, size - 2.0 * inset, size - 2.0 * inset);
        let centre = size / 2.0;
        let half = frame.width / 2.0;
        let place = |(dx, dy): (f32, f32)| Point::new(centre + dx * half, centre + dy * half);
        let slots = NORTH_INDIAN_SLOTS.map(|u| GeometricSlot {
            number: place(u.number),
            occupants: place(u.occupants),
        });

        Self {
            name: name.into(),
            width: size,
            height: size,
            frame,
            slots,
            palette,
            retrograde_marker: DEFAULT_RETROGRADE_MARKER.to_string(),
        }
    }

    pub fn with_palette(mut self, palette: ChartPalette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_retrograde_marker(mut self, marker: impl Into<String>) -> Self {
        self.retrograde_marker = marker.into();
        self
    }

    pub fn slot(&self, house: HouseNumber) -> GeometricSlot {
        self.slots[(house.get() - 1) as usize]
    }

    pub fn background(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// The six construction segments: two frame diagonals, then the
    /// inscribed diamond's edges (top, right, bottom, left midpoints).
    pub fn construction_lines(&self) -> [(Point, Point); 6] {
        let f = self.frame;
        let (tl, tr, bl, br) = (f.top_left(), f.top_right(), f.bottom_left(), f.bottom_right());
        let top = tl.midpoint(tr);
        let right = tr.midpoint(br);
        let bottom = bl.midpoint(br);
        let left = tl.midpoint(bl);
        [
            (tl, br),
            (tr, bl),
            (top, right),
            (right, bottom),
            (bottom, left),
            (left, top),
        ]
    }
}

impl Default for DiamondTemplate {
    fn default() -> Self {
        Self::standalone()
    }
}
