use crate::chart::{normalize, HouseMap, HousesInput};
use serde::Deserialize;

/// One divisional chart as sent by the service.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChartData {
    #[serde(default, alias = "chart_type")]
    pub chart_code: String,
    #[serde(default)]
    pub chart_name: String,
    #[serde(default)]
    pub ascendant_sign: Option<String>,
    #[serde(default)]
    pub houses: HousesInput,
}

impl ChartData {
    pub fn house_map(&self) -> HouseMap {
        normalize(&self.houses)
    }

    /// Name to show above the chart, falling back to the code.
    pub fn title(&self) -> &str {
        if self.chart_name.is_empty() {
            &self.chart_code
        } else {
            &self.chart_name
        }
    }

    /// Title plus the ascendant sign when known, e.g. `Lagna Chart (Ascendant: Leo)`.
    pub fn caption(&self) -> String {
        match self.ascendant_sign.as_deref().filter(|s| !s.is_empty()) {
            Some(sign) => format!("{} (Ascendant: {sign})", self.title()),
            None => self.title().to_string(),
        }
    }
}

/// The charts section: Lagna (D1), Moon and Navamsha (D9).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChartsResponse {
    #[serde(default)]
    pub lagna_chart: Option<ChartData>,
    #[serde(default)]
    pub moon_chart: Option<ChartData>,
    #[serde(default)]
    pub navamsha_chart: Option<ChartData>,
}

impl ChartsResponse {
    /// Present charts with a stable key, in display order.
    pub fn charts(&self) -> impl Iterator<Item = (&'static str, &ChartData)> {
        [
            ("lagna", self.lagna_chart.as_ref()),
            ("moon", self.moon_chart.as_ref()),
            ("navamsha", self.navamsha_chart.as_ref()),
        ]
        .into_iter()
        .filter_map(|(key, chart)| chart.map(|c| (key, c)))
    }
}
