//! Expand/collapse state of the dasha timeline and the rows it shows.
//!
//! At most one Mahadasha is open at a time. The state is a plain value
//! passed through [`DashaViewState::reduce`]; the caller owns it.

use crate::vedic::dashas::{DashaLevel, Lord};
use crate::vedic::timeline::{AnnotatedPeriod, DashaTimeline};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashaViewState {
    pub expanded: Option<Lord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashaAction {
    /// Open this Mahadasha, closing any other; closes it if already open.
    Toggle(Lord),
    CollapseAll,
    /// Open the running Mahadasha and bring it into view.
    JumpToCurrent,
}

/// Side effect the view should perform after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEffect {
    ScrollIntoView(Lord),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: DashaViewState,
    pub effect: Option<ViewEffect>,
}

impl Transition {
    fn quiet(state: DashaViewState) -> Self {
        Self { state, effect: None }
    }
}

impl DashaViewState {
    pub fn is_expanded(&self, lord: &str) -> bool {
        self.expanded.as_deref() == Some(lord)
    }

    pub fn reduce(self, action: DashaAction, timeline: &DashaTimeline) -> Transition {
        match action {
            DashaAction::Toggle(lord) => {
                let expanded = if self.is_expanded(&lord) { None } else { Some(lord) };
                Transition::quiet(DashaViewState { expanded })
            }
            DashaAction::CollapseAll => Transition::quiet(DashaViewState::default()),
            DashaAction::JumpToCurrent => match timeline.current_mahadasha() {
                Some(current) => Transition {
                    state: DashaViewState {
                        expanded: Some(current.lord.clone()),
                    },
                    effect: Some(ViewEffect::ScrollIntoView(current.lord.clone())),
                },
                None => {
                    log::debug!("jump to current ignored: no running mahadasha at {}", timeline.now);
                    Transition::quiet(self)
                }
            },
        }
    }
}

/// One rendered line of the timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineRow {
    pub level: DashaLevel,
    pub lord: Lord,
    pub start_date: String,
    pub end_date: String,
    pub display_start: String,
    pub display_end: String,
    pub years: Option<f64>,
    pub is_current: bool,
    pub expanded: bool,
}

impl TimelineRow {
    fn from_period(period: &AnnotatedPeriod, expanded: bool) -> Self {
        Self {
            level: period.level,
            lord: period.lord.clone(),
            start_date: period.start_date.clone(),
            end_date: period.end_date.clone(),
            display_start: period.display_start().to_string(),
            display_end: period.display_end().to_string(),
            years: period.years,
            is_current: period.is_current,
            expanded,
        }
    }
}

/// Flatten the timeline: every Mahadasha, and under the open one all of its
/// Antardashas. Deeper levels are not listed.
pub fn visible_rows(timeline: &DashaTimeline, state: &DashaViewState) -> Vec<TimelineRow> {
    let mut rows = Vec::new();
    for md in &timeline.periods {
        let expanded = state.is_expanded(&md.lord);
        rows.push(TimelineRow::from_period(md, expanded));
        if expanded {
            rows.extend(md.children.iter().map(|ad| TimelineRow::from_period(ad, false)));
        }
    }
    rows
}
