//! Plain-terminal rendering of the dasha timeline.

use kundali::vedic::{DashaLevel, DashaResponse, DashaTimeline, TimelineRow};
use serde_json::Value;
use std::fmt::Write;

const GREEN: &str = "\x1b[32m";
const CYAN: &str = "\x1b[36m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.enabled {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

/// Birth nakshatra, lord and balance, when the response carries them.
pub fn render_header(response: &DashaResponse, palette: Palette) -> String {
    let mut out = String::new();
    let system = if response.dasha_system.is_empty() {
        "Vimshottari"
    } else {
        response.dasha_system.as_str()
    };
    let _ = writeln!(out, "{}", palette.paint(BOLD, &format!("{system} Dasha")));
    if let Some(nakshatra) = &response.birth_nakshatra {
        let lord = response.birth_lord.as_deref().unwrap_or("?");
        let _ = writeln!(out, "Birth nakshatra: {nakshatra} (lord {lord})");
    }
    match &response.balance_at_birth {
        Value::Null => {}
        Value::String(s) => {
            let _ = writeln!(out, "Balance at birth: {s}");
        }
        other => {
            let _ = writeln!(out, "Balance at birth: {other}");
        }
    }
    out
}

/// One line per running level, e.g. `Antardasha  Rahu  ends 1997-12-15`.
pub fn render_current(timeline: &DashaTimeline, palette: Palette) -> String {
    let chain = timeline.current_chain();
    if chain.is_empty() {
        return format!("No running dasha at {}\n", timeline.now);
    }
    let mut out = format!("Running at {}:\n", timeline.now);
    for period in chain {
        let _ = writeln!(
            out,
            "  {:<11} {}  ends {}",
            period.level.label(),
            palette.paint(GREEN, &period.lord),
            period.display_end()
        );
    }
    out
}

pub fn render_rows(rows: &[TimelineRow], palette: Palette) -> String {
    let mut out = String::new();
    for row in rows {
        let (indent, marker) = match row.level {
            DashaLevel::Mahadasha if row.expanded => ("", "v "),
            DashaLevel::Mahadasha => ("", "> "),
            _ => ("    ", "  "),
        };
        let lord = format!("{:<8}", row.lord);
        let lord = match row.level {
            DashaLevel::Mahadasha => palette.paint(CYAN, &lord),
            _ => lord,
        };
        let years = row.years.map(|y| format!("{y:>5.1}y")).unwrap_or_default();
        let current = if row.is_current {
            palette.paint(GREEN, "  * current")
        } else {
            String::new()
        };
        let _ = writeln!(
            out,
            "{indent}{marker}{lord} {} - {}{years}{current}",
            row.display_start, row.display_end
        );
    }
    out
}
