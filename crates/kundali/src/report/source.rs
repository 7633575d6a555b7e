//! Fetching the four report sections concurrently.

use crate::error::Result;
use crate::report::types::ChartsResponse;
use crate::vedic::DashaResponse;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportSection {
    Kundali,
    Charts,
    Dasha,
    Ascendant,
}

impl ReportSection {
    pub const ALL: [ReportSection; 4] = [
        ReportSection::Kundali,
        ReportSection::Charts,
        ReportSection::Dasha,
        ReportSection::Ascendant,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ReportSection::Kundali => "kundali",
            ReportSection::Charts => "charts",
            ReportSection::Dasha => "dasha",
            ReportSection::Ascendant => "ascendant",
        }
    }
}

impl fmt::Display for ReportSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where report data comes from: the computation service, or anything
/// standing in for it.
#[async_trait]
pub trait ReportSource: Send + Sync {
    async fn kundali(&self) -> Result<Value>;
    async fn charts(&self) -> Result<ChartsResponse>;
    async fn dasha(&self) -> Result<DashaResponse>;
    async fn ascendant(&self) -> Result<Value>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionFailure {
    pub section: ReportSection,
    pub message: String,
}

/// Whatever arrived. Each section is independent of the others.
#[derive(Debug, Clone, Default)]
pub struct ReportSections {
    pub kundali: Option<Value>,
    pub charts: Option<ChartsResponse>,
    pub dasha: Option<DashaResponse>,
    pub ascendant: Option<Value>,
    pub failures: Vec<SectionFailure>,
}

impl ReportSections {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failure(&self, section: ReportSection) -> Option<&SectionFailure> {
        self.failures.iter().find(|f| f.section == section)
    }
}

/// Request all four sections at once and wait for every one of them.
///
/// A failing section is logged and recorded; it never cancels or hides the
/// others.
pub async fn fetch_report<S>(source: &S) -> ReportSections
where
    S: ReportSource + ?Sized,
{
    let (kundali, charts, dasha, ascendant) = tokio::join!(
        source.kundali(),
        source.charts(),
        source.dasha(),
        source.ascendant()
    );

    let mut failures = Vec::new();
    let sections = ReportSections {
        kundali: settle(ReportSection::Kundali, kundali, &mut failures),
        charts: settle(ReportSection::Charts, charts, &mut failures),
        dasha: settle(ReportSection::Dasha, dasha, &mut failures),
        ascendant: settle(ReportSection::Ascendant, ascendant, &mut failures),
        failures,
    };
    log::debug!(
        "report fetched: {} of {} sections",
        ReportSection::ALL.len() - sections.failures.len(),
        ReportSection::ALL.len()
    );
    sections
}

fn settle<T>(section: ReportSection, result: Result<T>, failures: &mut Vec<SectionFailure>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            log::error!("{section} section failed: {e}");
            failures.push(SectionFailure {
                section,
                message: e.to_string(),
            });
            None
        }
    }
}
