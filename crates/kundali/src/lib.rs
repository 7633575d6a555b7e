//! Presentation core for Vedic kundali reports.
//!
//! Raw service JSON goes in; renderable view models come out:
//! [`chart::normalize`] builds a canonical house map, [`layout::layout`]
//! turns it into drawing instructions for a North-Indian diamond chart, and
//! [`vedic::annotate`] marks the running dasha periods for the timeline.

pub mod chart;
pub mod error;
pub mod layout;
pub mod rendering;
pub mod report;
pub mod vedic;

pub use chart::{normalize, HouseMap, HouseNumber, HouseOccupant, HousesInput};
pub use error::{KundaliError, Result};
pub use layout::{layout, DiamondTemplate};
pub use rendering::{to_svg, ChartSpec};
pub use vedic::{annotate, visible_rows, DashaTimeline, DashaViewState};
