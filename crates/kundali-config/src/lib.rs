use chrono::NaiveDateTime;
use kundali::layout::DiamondTemplate;
use kundali::rendering::{ChartPalette, Color};
use kundali::vedic::parse_period_instant;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Relative locations tried when no explicit config path is given, so the
/// binary works from the workspace root and from `apps/kundali`.
pub const CONFIG_PATHS: [&str; 2] = ["configs/kundali.toml", "../../configs/kundali.toml"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartStyle {
    Card,
    #[default]
    Standalone,
}

impl ChartStyle {
    fn parse(raw: &str) -> anyhow::Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "card" => Ok(ChartStyle::Card),
            "standalone" => Ok(ChartStyle::Standalone),
            other => anyhow::bail!("chart.style must be \"card\" or \"standalone\", got \"{other}\""),
        }
    }
}

/// Colour overrides layered over the style's palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorOverrides {
    pub background: Option<Color>,
    pub border: Option<Color>,
    /// Both diagonals and the inner diamond
    pub lines: Option<Color>,
    pub house_number: Option<Color>,
    pub occupants: Option<Color>,
}

impl ColorOverrides {
    pub fn apply(&self, mut palette: ChartPalette) -> ChartPalette {
        if let Some(c) = self.background {
            palette.background = c;
        }
        if let Some(c) = self.border {
            palette.border.color = c;
        }
        if let Some(c) = self.lines {
            palette.diagonals.color = c;
            palette.diamond.color = c;
        }
        if let Some(c) = self.house_number {
            palette.house_number.color = c;
        }
        if let Some(c) = self.occupants {
            palette.occupants.color = c;
        }
        palette
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSettings {
    pub style: ChartStyle,
    pub retrograde_marker: String,
    pub colors: ColorOverrides,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            style: ChartStyle::default(),
            retrograde_marker: kundali::layout::DEFAULT_RETROGRADE_MARKER.to_string(),
            colors: ColorOverrides::default(),
        }
    }
}

impl ChartSettings {
    /// The configured template with marker and colour overrides applied.
    pub fn template(&self) -> DiamondTemplate {
        let base = match self.style {
            ChartStyle::Card => DiamondTemplate::card(),
            ChartStyle::Standalone => DiamondTemplate::standalone(),
        };
        let palette = self.colors.apply(base.palette.clone());
        base.with_palette(palette)
            .with_retrograde_marker(self.retrograde_marker.clone())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashaSettings {
    /// Fixed evaluation instant for the timeline instead of the wall clock
    pub now: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct KundaliConfig {
    pub chart: ChartSettings,
    pub dasha: DashaSettings,
    /// File the settings were read from; `None` when running on defaults
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ChartToml {
    #[serde(default)]
    style: Option<String>,
    #[serde(default)]
    retrograde_marker: Option<String>,
    #[serde(default)]
    background: Option<String>,
    #[serde(default)]
    border: Option<String>,
    #[serde(default)]
    lines: Option<String>,
    #[serde(default)]
    house_number: Option<String>,
    #[serde(default)]
    occupants: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct DashaToml {
    #[serde(default)]
    now: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    chart: ChartToml,
    #[serde(default)]
    dasha: DashaToml,
}

/// Read the config text from `explicit`, or else from the first of
/// [`CONFIG_PATHS`] that exists. An explicit path must exist; the fallbacks
/// may all be absent, which yields `Ok(None)`.
pub fn read_config_toml_text(explicit: Option<&Path>) -> anyhow::Result<Option<(PathBuf, String)>> {
    if let Some(path) = explicit {
        let text = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Could not read config {}: {e}", path.display()))?;
        return Ok(Some((path.to_path_buf(), text)));
    }
    for p in &CONFIG_PATHS {
        if let Ok(text) = fs::read_to_string(p) {
            return Ok(Some((PathBuf::from(p), text)));
        }
    }
    Ok(None)
}

fn parse_color(field: &str, raw: Option<String>) -> anyhow::Result<Option<Color>> {
    raw.map(|value| {
        Color::from_hex(value.trim()).ok_or_else(|| {
            anyhow::anyhow!("chart.{field}: \"{value}\" is not a hex colour (#RRGGBB or #RRGGBBAA)")
        })
    })
    .transpose()
}

/// Parse and validate config text.
pub fn parse_config(text: &str) -> anyhow::Result<KundaliConfig> {
    let root: RootConfigToml =
        toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse kundali.toml: {e}"))?;
    let RootConfigToml { chart, dasha } = root;
    let ChartToml {
        style,
        retrograde_marker,
        background,
        border,
        lines,
        house_number,
        occupants,
    } = chart;

    let style = style.as_deref().map(ChartStyle::parse).transpose()?.unwrap_or_default();
    let colors = ColorOverrides {
        background: parse_color("background", background)?,
        border: parse_color("border", border)?,
        lines: parse_color("lines", lines)?,
        house_number: parse_color("house_number", house_number)?,
        occupants: parse_color("occupants", occupants)?,
    };
    let retrograde_marker =
        retrograde_marker.unwrap_or_else(|| kundali::layout::DEFAULT_RETROGRADE_MARKER.to_string());

    let now = match dasha.now {
        Some(raw) => Some(
            parse_period_instant(&raw)
                .ok_or_else(|| anyhow::anyhow!("dasha.now: \"{raw}\" is not a recognised date"))?,
        ),
        None => None,
    };

    Ok(KundaliConfig {
        chart: ChartSettings {
            style,
            retrograde_marker,
            colors,
        },
        dasha: DashaSettings { now },
        source: None,
    })
}

/// Load settings, falling back to defaults when no config file exists.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<KundaliConfig> {
    match read_config_toml_text(explicit)? {
        Some((path, text)) => {
            let mut config = parse_config(&text)
                .map_err(|e| anyhow::anyhow!("{}: {e}", path.display()))?;
            log::debug!("loaded config from {}", path.display());
            config.source = Some(path);
            Ok(config)
        }
        None => {
            log::debug!("no kundali.toml found in {CONFIG_PATHS:?}; using defaults");
            Ok(KundaliConfig::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_is_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, KundaliConfig::default());
        assert_eq!(config.chart.template(), DiamondTemplate::standalone());
    }

    #[test]
    fn test_style_and_overrides() {
        let config = parse_config(
            r##"
            [chart]
            style = "card"
            retrograde_marker = "*"
            background = "#FFFFFF"
            lines = "#000000"

            [dasha]
            now = "2024-03-15 09:30:00"
            "##,
        )
        .unwrap();
        assert_eq!(config.chart.style, ChartStyle::Card);

        let template = config.chart.template();
        assert_eq!(template.name, "card");
        assert_eq!(template.retrograde_marker, "*");
        assert_eq!(template.palette.background, Color::WHITE);
        assert_eq!(template.palette.diagonals.color, Color::BLACK);
        assert_eq!(template.palette.diamond.color, Color::BLACK);
        assert_eq!(template.palette.border, ChartPalette::card().border);
        assert!(config.dasha.now.is_some());
    }

    #[test]
    fn test_unknown_style_rejected() {
        let err = parse_config("[chart]\nstyle = \"south\"\n").unwrap_err();
        assert!(err.to_string().contains("chart.style"));
    }

    #[test]
    fn test_bad_colour_rejected() {
        let err = parse_config("[chart]\nborder = \"orange\"\n").unwrap_err();
        assert!(err.to_string().contains("chart.border"));
    }

    #[test]
    fn test_bad_now_rejected() {
        assert!(parse_config("[dasha]\nnow = \"yesterday\"\n").is_err());
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(&dir.path().join("missing.toml"))).is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kundali.toml");
        fs::write(&path, "[chart]\nstyle = \"Card\"\noccupants = \"#123456\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.source.as_deref(), Some(path.as_path()));
        assert_eq!(config.chart.style, ChartStyle::Card);
        assert_eq!(config.chart.colors.occupants, Some(Color::rgb(0x12, 0x34, 0x56)));
    }
}
