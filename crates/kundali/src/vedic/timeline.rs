//! Annotating a dasha tree with the periods running at a given instant.

use crate::vedic::dashas::{DashaLevel, DashaNode, Lord};
use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedPeriod {
    pub lord: Lord,
    pub level: DashaLevel,
    pub start_date: String,
    pub end_date: String,
    pub years: Option<f64>,
    pub is_current: bool,
    pub children: Vec<AnnotatedPeriod>,
}

impl AnnotatedPeriod {
    pub fn display_start(&self) -> &str {
        display_date(&self.start_date)
    }

    pub fn display_end(&self) -> &str {
        display_date(&self.end_date)
    }

    pub fn current_child(&self) -> Option<&AnnotatedPeriod> {
        self.children.iter().find(|c| c.is_current)
    }
}

/// The annotated tree plus the instant it was evaluated at.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashaTimeline {
    pub now: NaiveDateTime,
    pub periods: Vec<AnnotatedPeriod>,
}

impl DashaTimeline {
    pub fn current_mahadasha(&self) -> Option<&AnnotatedPeriod> {
        self.periods.iter().find(|p| p.is_current)
    }

    /// Running period at each level, Mahadasha first. Stops at the first
    /// level with no running period.
    pub fn current_chain(&self) -> Vec<&AnnotatedPeriod> {
        let mut chain = Vec::new();
        let mut next = self.current_mahadasha();
        while let Some(period) = next {
            chain.push(period);
            next = period.current_child();
        }
        chain
    }

    pub fn mahadasha(&self, lord: &str) -> Option<&AnnotatedPeriod> {
        self.periods.iter().find(|p| p.lord == lord)
    }
}

/// Mark the running period at each level.
///
/// Only the first Mahadasha containing `now` is current, and below it only
/// the first child containing `now`, and so on down. Periods outside that
/// branch are never marked, even if their dates would match.
pub fn annotate(periods: &[DashaNode], now: NaiveDateTime) -> DashaTimeline {
    let periods = annotate_level(periods, DashaLevel::Mahadasha, now, true);
    log::debug!(
        "annotated {} mahadashas at {}, current: {:?}",
        periods.len(),
        now,
        periods.iter().find(|p| p.is_current).map(|p| p.lord.as_str())
    );
    DashaTimeline { now, periods }
}

fn annotate_level(
    nodes: &[DashaNode],
    level: DashaLevel,
    now: NaiveDateTime,
    in_current_branch: bool,
) -> Vec<AnnotatedPeriod> {
    let mut found = false;
    nodes
        .iter()
        .map(|node| {
            let is_current = in_current_branch && !found && node.contains(now);
            found |= is_current;
            let children = match level.child() {
                Some(child) => annotate_level(&node.children, child, now, is_current),
                None => Vec::new(),
            };
            AnnotatedPeriod {
                lord: node.lord.clone(),
                level,
                start_date: node.start_date.clone(),
                end_date: node.end_date.clone(),
                years: node.years,
                is_current,
                children,
            }
        })
        .collect()
}

/// Date part of a period boundary ("2024-01-05 10:00:00" -> "2024-01-05").
pub fn display_date(raw: &str) -> &str {
    raw.split_once(' ').map_or(raw, |(date, _)| date)
}
