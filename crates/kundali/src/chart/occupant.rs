//! Planets and reference points that occupy a house.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// (name, display abbreviation)
pub const ABBREVIATIONS: &[(&str, &str)] = &[
    ("Sun", "Su"),
    ("Moon", "Mo"),
    ("Mars", "Ma"),
    ("Mercury", "Me"),
    ("Jupiter", "Ju"),
    ("Venus", "Ve"),
    ("Saturn", "Sa"),
    ("Rahu", "Ra"),
    ("Ketu", "Ke"),
    ("Ascendant", "As"),
    ("Lagna", "As"),
];

/// Two-letter display code for a body name.
///
/// Unknown names fall back to their first two characters.
pub fn abbreviate(name: &str) -> String {
    ABBREVIATIONS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, abbr)| abbr.to_string())
        .unwrap_or_else(|| name.chars().take(2).collect())
}

/// One planet or reference point placed in a house.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseOccupant {
    pub name: String,
    pub abbreviation: String,
    pub retrograde: bool,
}

impl HouseOccupant {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let abbreviation = abbreviate(&name);
        Self {
            name,
            abbreviation,
            retrograde: false,
        }
    }

    pub fn retrograde(mut self, retrograde: bool) -> Self {
        self.retrograde = retrograde;
        self
    }

    /// Text shown in the chart, e.g. `Ma` or `Ma(R)`.
    pub fn label(&self, retrograde_marker: &str) -> String {
        if self.retrograde {
            format!("{}{}", self.abbreviation, retrograde_marker)
        } else {
            self.abbreviation.clone()
        }
    }

    /// Build an occupant from one raw entry of an occupant list.
    ///
    /// Accepts a bare name (`"Sun"`) or a record such as
    /// `{"planet": "Mars", "abbr": "Ma", "retrograde": true}`. Returns `None`
    /// for entries that carry neither a name nor an abbreviation.
    pub fn from_entry(entry: &Value) -> Option<Self> {
        match entry {
            Value::String(name) if !name.is_empty() => Some(Self::new(name.as_str())),
            Value::Object(record) => {
                let text = |key: &str| {
                    record
                        .get(key)
                        .and_then(Value::as_str)
                        .filter(|s| !s.is_empty())
                };
                let flag = |key: &str| record.get(key).and_then(Value::as_bool).unwrap_or(false);

                let name = text("planet").or_else(|| text("name"));
                let abbr = text("abbr");
                // A record with only an abbreviation still renders.
                let (name, abbreviation) = match (name, abbr) {
                    (Some(name), Some(abbr)) => (name, abbr.to_string()),
                    (Some(name), None) => (name, abbreviate(name)),
                    (None, Some(abbr)) => (abbr, abbr.to_string()),
                    (None, None) => return None,
                };
                let retrograde =
                    flag("isRetrograde") || flag("is_retrograde") || flag("retrograde");

                Some(Self {
                    name: name.to_string(),
                    abbreviation,
                    retrograde,
                })
            }
            _ => None,
        }
    }
}
