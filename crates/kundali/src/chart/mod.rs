pub mod houses;
pub mod occupant;

pub use houses::{normalize, HouseMap, HouseNumber, HousesInput, HOUSE_COUNT};
pub use occupant::{abbreviate, HouseOccupant};
