mod timeline;

use anyhow::Context;
use chrono::{Local, NaiveDateTime};
use clap::{Parser, Subcommand, ValueEnum};
use kundali::chart::{normalize, HousesInput};
use kundali::layout::{layout, DiamondTemplate};
use kundali::rendering::to_svg;
use kundali::report::{fetch_report, JsonDirSource};
use kundali::vedic::{
    annotate, parse_period_instant, visible_rows, CurrentDashaResponse, DashaAction, DashaResponse,
    DashaViewState, ViewEffect,
};
use kundali_config::{load_config, ChartStyle, KundaliConfig};
use serde_json::Value;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use timeline::{render_current, render_header, render_rows, Palette};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Style {
    /// Compact 300x300 card chart.
    Card,
    /// 360x360 standalone chart.
    Standalone,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Render kundali charts and dasha timelines from service JSON")]
struct Args {
    /// Config file (default: configs/kundali.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Disable ANSI colours in terminal output.
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render house occupancy JSON (either shape, or a chart record with `houses`) as SVG.
    Chart {
        input: PathBuf,

        #[arg(long, value_enum)]
        style: Option<Style>,

        /// Write the SVG here instead of stdout.
        #[arg(long, short)]
        out: Option<PathBuf>,

        /// Print the layout as JSON drawing instructions instead of SVG.
        #[arg(long)]
        json: bool,
    },
    /// Print the dasha timeline from a dasha response.
    Dasha {
        input: PathBuf,

        /// Evaluate "current" at this instant (e.g. "2024-05-01 12:00").
        #[arg(long)]
        now: Option<String>,

        /// Current-dasha response whose `as_of_date` supplies the instant.
        #[arg(long)]
        current: Option<PathBuf>,

        /// Mahadasha lord to expand.
        #[arg(long)]
        expand: Option<String>,

        /// Expand the running Mahadasha.
        #[arg(long)]
        jump_current: bool,

        /// Print visible rows as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Render every section found in a directory of saved responses.
    Report {
        dir: PathBuf,

        /// Where chart SVGs are written (default: the input directory).
        #[arg(long)]
        out_dir: Option<PathBuf>,

        #[arg(long)]
        now: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    if let Some(path) = &config.source {
        log::info!("using config {}", path.display());
    }
    let palette = Palette::new(!args.no_color && std::io::stdout().is_terminal());

    match args.command {
        Command::Chart {
            input,
            style,
            out,
            json,
        } => run_chart(&config, &input, style, out.as_deref(), json),
        Command::Dasha {
            input,
            now,
            current,
            expand,
            jump_current,
            json,
        } => {
            let response: DashaResponse = read_json(&input)?;
            let as_of = match &current {
                Some(path) => read_json::<CurrentDashaResponse>(path)?.now(),
                None => None,
            };
            let now = resolve_now(now.as_deref(), as_of, &config)?;
            run_dasha(&response, now, expand, jump_current, json, palette)
        }
        Command::Report { dir, out_dir, now } => {
            let now = resolve_now(now.as_deref(), None, &config)?;
            run_report(&config, &dir, out_dir.as_deref().unwrap_or(&dir), now, palette).await
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

/// `--now` beats the current-dasha `as_of_date`, which beats `[dasha].now`;
/// otherwise the local wall clock.
fn resolve_now(
    flag: Option<&str>,
    as_of: Option<NaiveDateTime>,
    config: &KundaliConfig,
) -> anyhow::Result<NaiveDateTime> {
    if let Some(raw) = flag {
        return parse_period_instant(raw)
            .ok_or_else(|| anyhow::anyhow!("--now: unrecognised date \"{raw}\""));
    }
    Ok(as_of
        .or(config.dasha.now)
        .unwrap_or_else(|| Local::now().naive_local()))
}

fn template_for(config: &KundaliConfig, style: Option<Style>) -> DiamondTemplate {
    let mut chart = config.chart.clone();
    if let Some(style) = style {
        chart.style = match style {
            Style::Card => ChartStyle::Card,
            Style::Standalone => ChartStyle::Standalone,
        };
    }
    chart.template()
}

fn run_chart(
    config: &KundaliConfig,
    input: &Path,
    style: Option<Style>,
    out: Option<&Path>,
    json: bool,
) -> anyhow::Result<()> {
    let mut raw: Value = read_json(input)?;
    if let Some(houses) = raw.get_mut("houses").map(Value::take) {
        raw = houses;
    }
    let map = normalize(&HousesInput::from_value(raw));
    let spec = layout(&map, &template_for(config, style));

    let rendered = if json {
        serde_json::to_string_pretty(&spec)?
    } else {
        to_svg(&spec)
    };
    match out {
        Some(path) => std::fs::write(path, rendered)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => print!("{rendered}"),
    }
    Ok(())
}

fn run_dasha(
    response: &DashaResponse,
    now: NaiveDateTime,
    expand: Option<String>,
    jump_current: bool,
    json: bool,
    palette: Palette,
) -> anyhow::Result<()> {
    let timeline = annotate(&response.mahadashas, now);

    let mut state = DashaViewState::default();
    if let Some(lord) = expand {
        if timeline.mahadasha(&lord).is_none() {
            log::warn!("no mahadasha ruled by {lord}");
        }
        state = state.reduce(DashaAction::Toggle(lord), &timeline).state;
    }
    if jump_current {
        let transition = state.reduce(DashaAction::JumpToCurrent, &timeline);
        if let Some(ViewEffect::ScrollIntoView(lord)) = &transition.effect {
            log::debug!("scrolling to {lord}");
        }
        state = transition.state;
    }

    let rows = visible_rows(&timeline, &state);
    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }
    print!("{}", render_header(response, palette));
    println!();
    print!("{}", render_current(&timeline, palette));
    println!();
    print!("{}", render_rows(&rows, palette));
    Ok(())
}

async fn run_report(
    config: &KundaliConfig,
    dir: &Path,
    out_dir: &Path,
    now: NaiveDateTime,
    palette: Palette,
) -> anyhow::Result<()> {
    let source = JsonDirSource::new(dir);
    let sections = fetch_report(&source).await;

    if sections.kundali.is_none()
        && sections.charts.is_none()
        && sections.dasha.is_none()
        && sections.ascendant.is_none()
    {
        anyhow::bail!("No report sections could be read from {}", dir.display());
    }

    if let Some(charts) = &sections.charts {
        let template = config.chart.template();
        std::fs::create_dir_all(out_dir)
            .with_context(|| format!("Failed to create out dir {}", out_dir.display()))?;
        for (key, chart) in charts.charts() {
            let path = out_dir.join(format!("{key}.svg"));
            let svg = to_svg(&layout(&chart.house_map(), &template));
            std::fs::write(&path, svg).with_context(|| format!("Failed to write {}", path.display()))?;
            println!("{}: {}", chart.caption(), path.display());
        }
    }

    if let Some(dasha) = &sections.dasha {
        let timeline = annotate(&dasha.mahadashas, now);
        let state = DashaViewState::default()
            .reduce(DashaAction::JumpToCurrent, &timeline)
            .state;
        println!();
        print!("{}", render_header(dasha, palette));
        print!("{}", render_current(&timeline, palette));
        println!();
        print!("{}", render_rows(&visible_rows(&timeline, &state), palette));
    }

    for failure in &sections.failures {
        eprintln!("[kundali] {} section unavailable: {}", failure.section, failure.message);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_chart_writes_svg_to_out() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("houses.json");
        fs::write(&input, r#"{"chart_code": "D1", "houses": {"1": ["Sun", "Moon"]}}"#).unwrap();
        let out = dir.path().join("chart.svg");

        run_chart(&KundaliConfig::default(), &input, Some(Style::Card), Some(&out), false).unwrap();

        let svg = fs::read_to_string(&out).unwrap();
        assert!(svg.contains(r#"viewBox="0 0 300 300""#));
        assert!(svg.contains(">Su Mo</text>"));
    }

    #[test]
    fn test_chart_rejects_unreadable_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("houses.json");
        fs::write(&input, "{ not json").unwrap();
        let err = run_chart(&KundaliConfig::default(), &input, None, None, false).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_now_flag_beats_config() {
        let mut config = KundaliConfig::default();
        config.dasha.now = parse_period_instant("2000-01-01");
        let now = resolve_now(Some("2024-05-01 12:00"), None, &config).unwrap();
        assert_eq!(now, parse_period_instant("2024-05-01 12:00").unwrap());
        assert_eq!(resolve_now(None, None, &config).unwrap(), config.dasha.now.unwrap());
        assert!(resolve_now(Some("soon"), None, &config).is_err());
    }

    #[tokio::test]
    async fn test_report_writes_chart_svgs() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("charts.json"),
            r#"{"lagna_chart": {"chart_code": "D1", "ascendant_sign": "Leo", "houses": {"5": ["Mars"]}},
                "moon_chart": {"chart_code": "Moon", "houses": []}}"#,
        )
        .unwrap();
        let out_dir = dir.path().join("out");
        let now = parse_period_instant("2024-05-01").unwrap();

        run_report(&KundaliConfig::default(), dir.path(), &out_dir, now, Palette::new(false))
            .await
            .unwrap();

        assert!(out_dir.join("lagna.svg").exists());
        assert!(out_dir.join("moon.svg").exists());
        assert!(!out_dir.join("navamsha.svg").exists());
    }
}
