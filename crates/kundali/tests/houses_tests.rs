use kundali::chart::{normalize, HouseNumber, HousesInput, HOUSE_COUNT};
use serde_json::json;

fn names(map: &kundali::HouseMap, house: u8) -> Vec<&str> {
    map.occupants(HouseNumber::new(house))
        .iter()
        .map(|o| o.name.as_str())
        .collect()
}

#[test]
fn test_keyed_example() {
    let map = normalize(&HousesInput::from_value(json!({"1": ["Sun", "Moon"], "5": ["Mars"]})));
    assert_eq!(names(&map, 1), ["Sun", "Moon"]);
    assert_eq!(names(&map, 5), ["Mars"]);
    for house in [2, 3, 4, 6, 7, 8, 9, 10, 11, 12] {
        assert!(names(&map, house).is_empty(), "house {house}");
    }
    assert_eq!(map.label(HouseNumber::new(1), "(R)"), "Su Mo");
}

#[test]
fn test_both_shapes_normalize_alike() {
    let keyed = HousesInput::from_value(json!({
        "2": ["Jupiter"],
        "10": [{"planet": "Saturn", "is_retrograde": true}, "Rahu"]
    }));
    let records = HousesInput::from_value(json!([
        {"house_number": 10, "sign": "Capricorn", "planets": [{"planet": "Saturn", "is_retrograde": true}, "Rahu"]},
        {"house_number": 2, "sign": "Taurus", "planets": ["Jupiter"]},
        {"house_number": 4, "planets": []}
    ]));
    assert!(matches!(keyed, HousesInput::Keyed(_)));
    assert!(matches!(records, HousesInput::Records(_)));
    assert_eq!(normalize(&keyed), normalize(&records));
}

#[test]
fn test_always_twelve_houses() {
    for raw in [
        json!({}),
        json!([]),
        json!(null),
        json!("junk"),
        json!({"0": ["Sun"], "13": ["Moon"], "seven": ["Mars"]}),
        json!([{"house_number": 99, "planets": ["Sun"]}, {"planets": ["Moon"]}]),
    ] {
        let map = normalize(&HousesInput::from_value(raw.clone()));
        assert_eq!(map.iter().count(), HOUSE_COUNT, "{raw}");
        assert!(map.is_empty(), "{raw}");
    }
}

#[test]
fn test_malformed_entries_degrade() {
    let map = normalize(&HousesInput::from_value(json!({
        "1": "Sun",
        "2": null,
        "3": ["Moon", 42, {"sign": "Leo"}, {"name": "Venus"}]
    })));
    assert!(names(&map, 1).is_empty());
    assert!(names(&map, 2).is_empty());
    assert_eq!(names(&map, 3), ["Moon", "Venus"]);
}

#[test]
fn test_first_record_wins() {
    let map = normalize(&HousesInput::from_value(json!([
        {"house_number": 6, "planets": ["Mars"]},
        {"house_number": 6, "planets": ["Ketu"]}
    ])));
    assert_eq!(names(&map, 6), ["Mars"]);
}

#[test]
fn test_supplied_abbreviation_and_fallback() {
    let map = normalize(&HousesInput::from_value(json!({
        "4": [{"planet": "Jupiter", "abbr": "Gu"}, "Uranus", {"planet": "Mars", "retrograde": true}]
    })));
    assert_eq!(map.label(HouseNumber::new(4), "(R)"), "Gu Ur Ma(R)");
}

#[test]
fn test_houses_input_embeds_in_response_types() {
    #[derive(serde::Deserialize)]
    struct Chart {
        houses: HousesInput,
    }
    let chart: Chart = serde_json::from_str(r#"{"houses": [{"house_number": 1, "planets": ["Sun"]}]}"#).unwrap();
    assert_eq!(names(&normalize(&chart.houses), 1), ["Sun"]);
}

#[test]
fn test_abbreviation_only_record_is_kept() {
    let map = normalize(&HousesInput::from_value(json!({
        "1": [{"abbr": "Ma", "retrograde": true}, {"retrograde": true}]
    })));
    assert_eq!(map.label(HouseNumber::new(1), "(R)"), "Ma(R)");
    assert_eq!(names(&map, 1), ["Ma"]);
}

#[test]
fn test_only_canonical_house_keys() {
    let map = normalize(&HousesInput::from_value(json!({
        "1": ["Sun"],
        " 1": ["Moon"],
        "01": ["Mars"],
        "+1": ["Venus"]
    })));
    assert_eq!(names(&map, 1), ["Sun"]);
    assert_eq!(map.iter().filter(|(_, o)| !o.is_empty()).count(), 1);
}
