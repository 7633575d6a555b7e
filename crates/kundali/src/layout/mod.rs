pub mod diamond;
pub mod template;

pub use diamond::layout;
pub use template::{DiamondTemplate, GeometricSlot, UnitSlot, DEFAULT_RETROGRADE_MARKER, NORTH_INDIAN_SLOTS};
