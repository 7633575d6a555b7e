use chrono::NaiveDate;
use kundali::vedic::{
    annotate, visible_rows, DashaAction, DashaLevel, DashaNode, DashaTimeline, DashaViewState, ViewEffect,
};

fn timeline_at(year: i32) -> DashaTimeline {
    let periods = vec![
        DashaNode::new("Jupiter", "1980-01-01", "1996-01-01").with_children(vec![
            DashaNode::new("Jupiter", "1980-01-01", "1982-03-01"),
            DashaNode::new("Saturn", "1982-03-01", "1984-09-01"),
        ]),
        DashaNode::new("Saturn", "1996-01-01", "2015-01-01").with_children(vec![
            DashaNode::new("Saturn", "1996-01-01", "1999-01-01"),
            DashaNode::new("Mercury", "1999-01-01", "2001-09-01"),
            DashaNode::new("Ketu", "2001-09-01", "2002-10-01"),
        ]),
        DashaNode::new("Mercury", "2015-01-01", "2032-01-01"),
    ];
    let now = NaiveDate::from_ymd_opt(year, 6, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
    annotate(&periods, now)
}

#[test]
fn test_initial_state_is_collapsed() {
    let tl = timeline_at(2000);
    let rows = visible_rows(&tl, &DashaViewState::default());
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| !r.expanded && r.level == DashaLevel::Mahadasha));
}

#[test]
fn test_toggle_a_then_b_leaves_only_b() {
    let tl = timeline_at(2000);
    let state = DashaViewState::default()
        .reduce(DashaAction::Toggle("Jupiter".into()), &tl)
        .state
        .reduce(DashaAction::Toggle("Saturn".into()), &tl)
        .state;
    assert_eq!(state.expanded.as_deref(), Some("Saturn"));

    let rows = visible_rows(&tl, &state);
    let expanded: Vec<&str> = rows.iter().filter(|r| r.expanded).map(|r| r.lord.as_str()).collect();
    assert_eq!(expanded, ["Saturn"]);
    // 3 mahadashas + Saturn's 3 antardashas
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[2].lord, "Saturn");
    assert_eq!(rows[2].level, DashaLevel::Antardasha);
}

#[test]
fn test_collapse_all() {
    let tl = timeline_at(2000);
    let t = DashaViewState { expanded: Some("Jupiter".into()) }.reduce(DashaAction::CollapseAll, &tl);
    assert_eq!(t.state, DashaViewState::default());
    assert_eq!(t.effect, None);
}

#[test]
fn test_jump_to_current_expands_and_scrolls() {
    let tl = timeline_at(2000);
    let t = DashaViewState { expanded: Some("Jupiter".into()) }.reduce(DashaAction::JumpToCurrent, &tl);
    assert_eq!(t.state.expanded.as_deref(), Some("Saturn"));
    assert_eq!(t.effect, Some(ViewEffect::ScrollIntoView("Saturn".into())));

    let rows = visible_rows(&tl, &t.state);
    let current: Vec<(DashaLevel, &str)> = rows
        .iter()
        .filter(|r| r.is_current)
        .map(|r| (r.level, r.lord.as_str()))
        .collect();
    assert_eq!(
        current,
        [(DashaLevel::Mahadasha, "Saturn"), (DashaLevel::Antardasha, "Mercury")]
    );
}

#[test]
fn test_jump_to_current_without_current_is_noop() {
    let tl = timeline_at(1970);
    let before = DashaViewState { expanded: Some("Mercury".into()) };
    let t = before.clone().reduce(DashaAction::JumpToCurrent, &tl);
    assert_eq!(t.state, before);
    assert_eq!(t.effect, None);
}
