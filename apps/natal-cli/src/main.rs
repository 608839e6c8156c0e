use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDateTime;
use clap::Parser;
use natal::birth::{resolve_birth, BirthRequest, Geocoder, OffsetLookup, TimezoneLookup};
use natal::{AnalyticEphemeris, ChartAssembler, ChartDocument, ChartSettings, GeoPosition, HouseSystem};
use natal_config::{chart_settings_from_toml, load_chart_settings, read_config_toml_text};

#[derive(Parser)]
#[command(name = "natal", about = "Compute a tropical natal chart as JSON")]
struct Cli {
    /// Birth date (YYYY-MM-DD or YYYY/MM/DD)
    #[arg(long)]
    date: String,
    /// Local clock time (HH:MM or HH:MM:SS)
    #[arg(long)]
    time: String,
    /// UTC offset in effect at birth, e.g. +09:00
    #[arg(long, allow_hyphen_values = true)]
    offset: String,
    /// Latitude in degrees, north positive
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,
    /// Longitude in degrees, east positive
    #[arg(long, allow_hyphen_values = true)]
    lon: Option<f64>,
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    place: String,
    /// Timezone label recorded in the output (defaults to the offset)
    #[arg(long)]
    timezone: Option<String>,
    /// Overrides the configured house system
    #[arg(long)]
    house_system: Option<String>,
    /// Path to natal.toml (defaults to configs/natal.toml)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write the JSON here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

/// Coordinates given on the command line stand in for a geocoder.
struct FlagGeocoder(Option<GeoPosition>);

impl Geocoder for FlagGeocoder {
    fn geocode(&self, _place: &str) -> Option<GeoPosition> {
        self.0
    }
}

struct FlagTimezone(String);

impl TimezoneLookup for FlagTimezone {
    fn timezone_at(&self, _geo: &GeoPosition) -> Option<String> {
        Some(self.0.clone())
    }
}

struct FlagOffset(i32);

impl OffsetLookup for FlagOffset {
    fn utc_offset_minutes(&self, _timezone: &str, _local: NaiveDateTime) -> Option<i32> {
        Some(self.0)
    }
}

fn chart_settings(cli: &Cli) -> anyhow::Result<ChartSettings> {
    let mut settings = match &cli.config {
        Some(path) => load_chart_settings(Some(path))?,
        None => match read_config_toml_text(None) {
            Ok(text) => chart_settings_from_toml(&text)?,
            Err(e) => {
                log::debug!("{e}; using default chart settings");
                ChartSettings::default()
            }
        },
    };
    if let Some(name) = &cli.house_system {
        settings.house_system = name.parse::<HouseSystem>()?;
    }
    Ok(settings)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let settings = chart_settings(&cli)?;
    let date = natal::time::parse_date(&cli.date)?;
    let offset = natal::time::parse_utc_offset(&cli.offset)?;
    let geo = match (cli.lat, cli.lon) {
        (Some(lat), Some(lon)) => Some(GeoPosition::new(lat, lon)?),
        (None, None) => None,
        _ => anyhow::bail!("--lat and --lon must be given together"),
    };

    let request = BirthRequest {
        name: cli.name.clone(),
        date,
        time: cli.time.clone(),
        place: cli.place.clone(),
    };
    let timezone = cli
        .timezone
        .clone()
        .unwrap_or_else(|| format!("UTC{}", cli.offset.trim()));
    let birth = resolve_birth(
        &request,
        &FlagGeocoder(geo),
        &FlagTimezone(timezone),
        &FlagOffset(offset),
    )?;

    let ephemeris = AnalyticEphemeris::new();
    let chart = ChartAssembler::new(&ephemeris, settings).assemble(&birth.instant, &birth.geo)?;
    let json = ChartDocument::from_chart(&chart, &birth.subject).to_json_pretty()?;

    match &cli.output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("wrote chart to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["natal"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn negative_coordinates_and_offsets_parse() {
        let cli = parse(&[
            "--date", "1990-01-01", "--time", "00:00", "--offset", "-05:00", "--lat", "-33.9",
            "--lon", "-70.6",
        ]);
        assert_eq!(cli.lat, Some(-33.9));
        assert_eq!(cli.lon, Some(-70.6));
        assert_eq!(cli.offset, "-05:00");
    }

    #[test]
    fn house_system_flag_overrides_config() {
        let cli = parse(&[
            "--date", "1990-01-01", "--time", "00:00", "--offset", "+09:00",
            "--house-system", "whole-sign",
        ]);
        let settings = chart_settings(&cli).unwrap();
        assert_eq!(settings.house_system, HouseSystem::WholeSign);
    }

    #[test]
    fn missing_coordinates_fail_geocoding() {
        assert!(FlagGeocoder(None).geocode("Nowhere").is_none());
    }
}
