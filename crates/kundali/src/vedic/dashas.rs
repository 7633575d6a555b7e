//! Vimshottari dasha periods as delivered by the computation service.
//!
//! Periods arrive already computed; this module only models the tree and
//! reads period boundaries. Child lists are accepted under any of the keys
//! the service has used over time (`antardashas`, `pratyantardashas`,
//! `sookshmas`, `sookshma_dashas`, `children`).

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Planet ruling a period. Mahadasha lords are unique within a cycle, so the
/// lord doubles as the row identifier in the timeline view.
pub type Lord = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashaLevel {
    Mahadasha,
    Antardasha,
    Pratyantardasha,
    Sookshma,
}

impl DashaLevel {
    pub const ALL: [DashaLevel; 4] = [
        DashaLevel::Mahadasha,
        DashaLevel::Antardasha,
        DashaLevel::Pratyantardasha,
        DashaLevel::Sookshma,
    ];

    /// 1 for Mahadasha through 4 for Sookshma.
    pub fn depth(self) -> usize {
        match self {
            DashaLevel::Mahadasha => 1,
            DashaLevel::Antardasha => 2,
            DashaLevel::Pratyantardasha => 3,
            DashaLevel::Sookshma => 4,
        }
    }

    pub fn child(self) -> Option<DashaLevel> {
        match self {
            DashaLevel::Mahadasha => Some(DashaLevel::Antardasha),
            DashaLevel::Antardasha => Some(DashaLevel::Pratyantardasha),
            DashaLevel::Pratyantardasha => Some(DashaLevel::Sookshma),
            DashaLevel::Sookshma => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DashaLevel::Mahadasha => "Mahadasha",
            DashaLevel::Antardasha => "Antardasha",
            DashaLevel::Pratyantardasha => "Pratyantar",
            DashaLevel::Sookshma => "Sookshma",
        }
    }
}

/// One period at one nesting level. Dates are kept as delivered and parsed
/// on demand with [`parse_period_instant`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawDashaNode")]
pub struct DashaNode {
    pub lord: Lord,
    pub start_date: String,
    pub end_date: String,
    pub years: Option<f64>,
    pub children: Vec<DashaNode>,
}

impl DashaNode {
    pub fn new(lord: impl Into<Lord>, start_date: impl Into<String>, end_date: impl Into<String>) -> Self {
        Self {
            lord: lord.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
            years: None,
            children: Vec::new(),
        }
    }

    pub fn with_years(mut self, years: f64) -> Self {
        self.years = Some(years);
        self
    }

    pub fn with_children(mut self, children: Vec<DashaNode>) -> Self {
        self.children = children;
        self
    }

    pub fn start(&self) -> Option<NaiveDateTime> {
        parse_period_instant(&self.start_date)
    }

    pub fn end(&self) -> Option<NaiveDateTime> {
        parse_period_instant(&self.end_date)
    }

    /// Whether `now` falls in `[start, end)`. A boundary that cannot be read
    /// makes the period "not current".
    pub fn contains(&self, now: NaiveDateTime) -> bool {
        match (self.start(), self.end()) {
            (Some(start), Some(end)) => start <= now && now < end,
            _ => {
                log::warn!(
                    "dasha period '{}' has unreadable dates ('{}' .. '{}'); treating as not current",
                    self.lord,
                    self.start_date,
                    self.end_date
                );
                false
            }
        }
    }
}

#[derive(Deserialize)]
struct RawDashaNode {
    // Older payloads spell these `planet`, `start` and `end`; some carry both
    // spellings, so they are separate fields rather than serde aliases.
    #[serde(default)]
    lord: Option<String>,
    #[serde(default)]
    planet: Option<String>,
    #[serde(default)]
    start_date: Option<String>,
    #[serde(default)]
    start: Option<String>,
    #[serde(default)]
    end_date: Option<String>,
    #[serde(default)]
    end: Option<String>,
    #[serde(default)]
    years: Option<f64>,
    #[serde(default)]
    antardashas: Option<Vec<DashaNode>>,
    #[serde(default)]
    pratyantardashas: Option<Vec<DashaNode>>,
    #[serde(default)]
    sookshmas: Option<Vec<DashaNode>>,
    #[serde(default)]
    sookshma_dashas: Option<Vec<DashaNode>>,
    #[serde(default)]
    children: Option<Vec<DashaNode>>,
}

impl From<RawDashaNode> for DashaNode {
    fn from(raw: RawDashaNode) -> Self {
        let children = [
            raw.antardashas,
            raw.pratyantardashas,
            raw.sookshmas,
            raw.sookshma_dashas,
            raw.children,
        ]
        .into_iter()
        .flatten()
        .find(|list| !list.is_empty())
        .unwrap_or_default();

        Self {
            lord: raw.lord.or(raw.planet).unwrap_or_default(),
            start_date: raw.start_date.or(raw.start).unwrap_or_default(),
            end_date: raw.end_date.or(raw.end).unwrap_or_default(),
            years: raw.years,
            children,
        }
    }
}

/// Full dasha response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashaResponse {
    #[serde(default)]
    pub dasha_system: String,
    #[serde(default)]
    pub birth_nakshatra: Option<String>,
    #[serde(default)]
    pub birth_lord: Option<String>,
    /// Free-form; the service has sent both strings and numbers here.
    #[serde(default)]
    pub balance_at_birth: Value,
    #[serde(default)]
    pub mahadashas: Vec<DashaNode>,
}

/// Current-dasha response: the running period at each level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentDashaResponse {
    #[serde(default)]
    pub as_of_date: Option<String>,
    #[serde(default)]
    pub mahadasha: Option<DashaNode>,
    #[serde(default)]
    pub antardasha: Option<DashaNode>,
    #[serde(default)]
    pub pratyantardasha: Option<DashaNode>,
    #[serde(default, alias = "sookshma")]
    pub sookshma_dasha: Option<DashaNode>,
}

impl CurrentDashaResponse {
    /// The instant the service evaluated "current" at, if it said so.
    pub fn now(&self) -> Option<NaiveDateTime> {
        self.as_of_date.as_deref().and_then(parse_period_instant)
    }

    pub fn chain(&self) -> Vec<(DashaLevel, &DashaNode)> {
        [
            &self.mahadasha,
            &self.antardasha,
            &self.pratyantardasha,
            &self.sookshma_dasha,
        ]
        .into_iter()
        .zip(DashaLevel::ALL)
        .filter_map(|(node, level)| node.as_ref().map(|n| (level, n)))
        .collect()
    }
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"];

/// Read a period boundary in any of the formats the service emits.
///
/// Offsets in RFC 3339 input are dropped and the wall-clock time kept, so
/// every boundary compares in the same local frame.
pub fn parse_period_instant(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    // Fractional seconds, e.g. Python's isoformat() with microseconds
    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
    }

    #[test]
    fn test_parse_formats() {
        assert_eq!(parse_period_instant("2020-03-01 10:30:00"), Some(at(2020, 3, 1, 10, 30)));
        assert_eq!(parse_period_instant("2020-03-01 10:30"), Some(at(2020, 3, 1, 10, 30)));
        assert_eq!(parse_period_instant("2020-03-01T10:30:00"), Some(at(2020, 3, 1, 10, 30)));
        assert_eq!(parse_period_instant("2020-03-01T10:30:00+05:30"), Some(at(2020, 3, 1, 10, 30)));
        assert_eq!(parse_period_instant("2020-03-01"), Some(at(2020, 3, 1, 0, 0)));
        assert_eq!(parse_period_instant("01/03/2020"), Some(at(2020, 3, 1, 0, 0)));
        assert_eq!(parse_period_instant("01-03-2020"), Some(at(2020, 3, 1, 0, 0)));
        assert_eq!(parse_period_instant(" 2020-03-01 "), Some(at(2020, 3, 1, 0, 0)));
        let with_millis = at(2024, 5, 1, 12, 0) + chrono::Duration::milliseconds(250);
        assert_eq!(parse_period_instant("2024-05-01T12:00:00.250"), Some(with_millis));
        assert_eq!(parse_period_instant("2024-05-01 12:00:00.250"), Some(with_millis));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_period_instant(""), None);
        assert_eq!(parse_period_instant("soon"), None);
        assert_eq!(parse_period_instant("2020-13-45"), None);
    }

    #[test]
    fn test_contains_is_half_open() {
        let node = DashaNode::new("Venus", "2020-01-01", "2040-01-01");
        assert!(node.contains(at(2020, 1, 1, 0, 0)));
        assert!(node.contains(at(2039, 12, 31, 23, 59)));
        assert!(!node.contains(at(2040, 1, 1, 0, 0)));
    }

    #[test]
    fn test_child_key_aliases() {
        let json = r#"{
            "lord": "Saturn", "start_date": "2000-01-01", "end_date": "2019-01-01", "years": 19,
            "antardashas": [{
                "lord": "Saturn", "start_date": "2000-01-01", "end_date": "2003-01-01",
                "pratyantardashas": [{
                    "planet": "Mercury", "start": "2000-01-01", "end": "2000-06-01",
                    "sookshma_dashas": [{"lord": "Ketu", "start_date": "2000-01-01", "end_date": "2000-01-10"}]
                }]
            }]
        }"#;
        let node: DashaNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.years, Some(19.0));
        let pd = &node.children[0].children[0];
        assert_eq!(pd.lord, "Mercury");
        assert_eq!(pd.start_date, "2000-01-01");
        assert_eq!(pd.children[0].lord, "Ketu");
        assert!(pd.children[0].children.is_empty());
    }

    #[test]
    fn test_both_key_spellings_on_one_node() {
        let json = r#"{"lord": "Mars", "planet": "Mars", "start_date": "2001-01-01",
                       "start": "2001-01-01", "end_date": "2008-01-01", "end": "2008-01-01"}"#;
        let node: DashaNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.lord, "Mars");
        assert_eq!(node.end_date, "2008-01-01");

        let response: DashaResponse =
            serde_json::from_str(&format!(r#"{{"mahadashas": [{json}]}}"#)).unwrap();
        assert_eq!(response.mahadashas.len(), 1);
    }

    #[test]
    fn test_current_response_chain() {
        let json = r#"{
            "as_of_date": "2024-05-01 12:00:00",
            "mahadasha": {"lord": "Rahu", "start_date": "2010-01-01", "end_date": "2028-01-01"},
            "antardasha": {"lord": "Venus", "start_date": "2023-01-01", "end_date": "2026-01-01"}
        }"#;
        let current: CurrentDashaResponse = serde_json::from_str(json).unwrap();
        assert_eq!(current.now(), Some(at(2024, 5, 1, 12, 0)));
        let chain = current.chain();
        assert_eq!(chain.len(), 2);
        assert_eq!(chain[1].0, DashaLevel::Antardasha);
        assert_eq!(chain[1].1.lord, "Venus");
    }

    #[test]
    fn test_level_descent() {
        assert_eq!(DashaLevel::Mahadasha.child(), Some(DashaLevel::Antardasha));
        assert_eq!(DashaLevel::Sookshma.child(), None);
        assert_eq!(DashaLevel::Sookshma.depth(), 4);
    }
}
