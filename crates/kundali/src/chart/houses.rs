//! House occupancy: the two accepted input shapes and the canonical map.

use crate::chart::occupant::HouseOccupant;
use crate::error::{KundaliError, Result};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

pub const HOUSE_COUNT: usize = 12;

/// A house number, always within 1..=12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct HouseNumber(u8);

impl HouseNumber {
    /// # Panics
    ///
    /// Panics when `n` is outside 1..=12. Asking for such a house is a caller
    /// bug, not bad data; use [`HouseNumber::try_new`] at data boundaries.
    pub fn new(n: u8) -> Self {
        match Self::try_new(n as i64) {
            Ok(house) => house,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn try_new(n: i64) -> Result<Self> {
        if (1..=HOUSE_COUNT as i64).contains(&n) {
            Ok(Self(n as u8))
        } else {
            Err(KundaliError::HouseOutOfRange(n))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    /// Houses 1 through 12 in order.
    pub fn all() -> impl Iterator<Item = HouseNumber> {
        (1..=HOUSE_COUNT as u8).map(HouseNumber)
    }
}

impl<'de> Deserialize<'de> for HouseNumber {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let n = i64::deserialize(deserializer)?;
        HouseNumber::try_new(n).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for HouseNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw house occupancy as received from the computation service.
///
/// The service sends either a mapping `{"1": [...], "5": [...]}` or a list of
/// per-house records `[{"house_number": 1, "planets": [...]}, ...]`. The shape
/// is decided once, structurally, in [`HousesInput::from_value`].
#[derive(Debug, Clone, PartialEq)]
pub enum HousesInput {
    Keyed(Map<String, Value>),
    Records(Vec<Value>),
}

impl HousesInput {
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Array(records) => HousesInput::Records(records),
            Value::Object(map) => HousesInput::Keyed(map),
            Value::Null => HousesInput::Keyed(Map::new()),
            other => {
                log::warn!("house data is neither a mapping nor a list ({other}); rendering empty chart");
                HousesInput::Keyed(Map::new())
            }
        }
    }
}

impl Default for HousesInput {
    fn default() -> Self {
        HousesInput::Keyed(Map::new())
    }
}

impl<'de> Deserialize<'de> for HousesInput {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(HousesInput::from_value)
    }
}

/// Canonical occupancy: twelve houses, each with occupants in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HouseMap {
    houses: [Vec<HouseOccupant>; HOUSE_COUNT],
}

impl HouseMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn occupants(&self, house: HouseNumber) -> &[HouseOccupant] {
        &self.houses[house.index()]
    }

    pub fn push(&mut self, house: HouseNumber, occupant: HouseOccupant) {
        self.houses[house.index()].push(occupant);
    }

    pub fn iter(&self) -> impl Iterator<Item = (HouseNumber, &[HouseOccupant])> {
        HouseNumber::all().map(move |h| (h, self.occupants(h)))
    }

    pub fn is_empty(&self) -> bool {
        self.houses.iter().all(Vec::is_empty)
    }

    /// Space-separated occupant labels for one house, e.g. `"Su Ma(R)"`.
    pub fn label(&self, house: HouseNumber, retrograde_marker: &str) -> String {
        self.occupants(house)
            .iter()
            .map(|o| o.label(retrograde_marker))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Serialize for HouseMap {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(HOUSE_COUNT))?;
        for (house, occupants) in self.iter() {
            map.serialize_entry(&house.to_string(), occupants)?;
        }
        map.end()
    }
}

/// Normalize either input shape into a [`HouseMap`].
///
/// Never fails: unknown house keys are ignored, absent or malformed occupant
/// lists become empty houses, unusable entries are skipped.
pub fn normalize(raw: &HousesInput) -> HouseMap {
    let mut map = HouseMap::new();

    match raw {
        HousesInput::Keyed(entries) => {
            log::debug!("normalizing keyed house data ({} keys)", entries.len());
            for (key, occupants) in entries {
                let Some(house) = parse_house_key(key) else {
                    log::warn!("ignoring house key '{key}'");
                    continue;
                };
                fill_house(&mut map, house, occupants);
            }
        }
        HousesInput::Records(records) => {
            log::debug!("normalizing house records ({} records)", records.len());
            let mut seen = [false; HOUSE_COUNT];
            for record in records {
                let Some(house) = record
                    .get("house_number")
                    .and_then(Value::as_i64)
                    .and_then(|n| HouseNumber::try_new(n).ok())
                else {
                    log::warn!("ignoring house record without a valid house_number");
                    continue;
                };
                if std::mem::replace(&mut seen[house.index()], true) {
                    log::warn!("ignoring duplicate record for house {house}");
                    continue;
                }
                fill_house(&mut map, house, record.get("planets").unwrap_or(&Value::Null));
            }
        }
    }

    map
}

/// Only the canonical spellings "1".."12" name a house; variants such as
/// " 1" or "01" are ignored so two keys never merge into one house.
fn parse_house_key(key: &str) -> Option<HouseNumber> {
    HouseNumber::all().find(|house| house.to_string() == key)
}

fn fill_house(map: &mut HouseMap, house: HouseNumber, occupants: &Value) {
    match occupants {
        Value::Null => {}
        Value::Array(entries) => {
            for entry in entries {
                match HouseOccupant::from_entry(entry) {
                    Some(occupant) => map.push(house, occupant),
                    None => log::warn!("skipping unusable occupant {entry} in house {house}"),
                }
            }
        }
        other => log::warn!("occupants of house {house} are not a list ({other}); rendering empty"),
    }
}
