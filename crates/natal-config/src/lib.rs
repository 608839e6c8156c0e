use natal::aspects::{AspectDefinition, AspectKind, AspectSettings, DEFAULT_ORB};
use natal::houses::HouseSystem;
use natal::points::{Angle, Body, ChartPoint};
use natal::ChartSettings;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
struct AspectToml {
    kind: String,
    #[serde(default)]
    orb: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChartToml {
    #[serde(default = "default_house_system")]
    house_system: String,
    #[serde(default)]
    bodies: Option<Vec<String>>,
    #[serde(default)]
    angles: Option<Vec<String>>,
    #[serde(default = "default_orb")]
    default_orb: f64,
    #[serde(default)]
    exclude: Option<Vec<String>>,
    #[serde(default)]
    aspects: Option<Vec<AspectToml>>,
}

fn default_house_system() -> String {
    HouseSystem::default().id().to_string()
}

fn default_orb() -> f64 {
    DEFAULT_ORB
}

#[derive(Debug, Clone, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    chart: Option<ChartToml>,
}

/// Read `natal.toml`: the explicit path if given, otherwise the usual
/// relative locations of `configs/natal.toml`.
pub fn read_config_toml_text(path: Option<&Path>) -> anyhow::Result<String> {
    if let Some(path) = path {
        return fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()));
    }
    let paths = ["configs/natal.toml", "../../configs/natal.toml"];
    for p in &paths {
        if let Ok(c) = fs::read_to_string(p) {
            return Ok(c);
        }
    }
    anyhow::bail!("Could not load natal.toml from {:?}", paths);
}

/// Parse chart settings from TOML text. A missing `[chart]` table or missing
/// keys fall back to the defaults.
pub fn chart_settings_from_toml(text: &str) -> anyhow::Result<ChartSettings> {
    let root: RootConfigToml = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse natal.toml: {e}"))?;
    let Some(cfg) = root.chart else {
        return Ok(ChartSettings::default());
    };
    let ChartToml {
        house_system,
        bodies,
        angles,
        default_orb,
        exclude,
        aspects,
    } = cfg;

    let house_system: HouseSystem = house_system
        .parse()
        .map_err(|e| anyhow::anyhow!("chart.house_system: {e}"))?;

    let defaults = ChartSettings::default();
    let bodies = match bodies {
        Some(names) => parse_all::<Body>(&names, "chart.bodies")?,
        None => defaults.bodies,
    };
    let angles = match angles {
        Some(names) => parse_all::<Angle>(&names, "chart.angles")?,
        None => defaults.angles,
    };

    if !default_orb.is_finite() || default_orb < 0.0 {
        anyhow::bail!("chart.default_orb must be a non-negative number, got {default_orb}");
    }
    let mut aspect_settings = match aspects {
        Some(rows) => AspectSettings {
            aspects: rows
                .iter()
                .map(aspect_definition)
                .collect::<anyhow::Result<Vec<_>>>()?,
            default_orb,
            exclude: BTreeSet::new(),
        },
        None => AspectSettings {
            default_orb,
            ..AspectSettings::default()
        },
    };
    if let Some(names) = exclude {
        aspect_settings.exclude = parse_all::<ChartPoint>(&names, "chart.exclude")?
            .into_iter()
            .collect();
    }

    Ok(ChartSettings {
        house_system,
        bodies,
        angles,
        aspects: aspect_settings,
    })
}

/// Load chart settings from `path`, or from `configs/natal.toml`.
pub fn load_chart_settings(path: Option<&Path>) -> anyhow::Result<ChartSettings> {
    let text = read_config_toml_text(path)?;
    chart_settings_from_toml(&text)
}

fn aspect_definition(row: &AspectToml) -> anyhow::Result<AspectDefinition> {
    let kind: AspectKind = row
        .kind
        .parse()
        .map_err(|e| anyhow::anyhow!("chart.aspects: {e}"))?;
    if let Some(orb) = row.orb {
        if !orb.is_finite() || orb < 0.0 {
            anyhow::bail!("chart.aspects: orb for {} must be non-negative, got {orb}", row.kind);
        }
    }
    Ok(AspectDefinition { kind, orb: row.orb })
}

fn parse_all<T>(names: &[String], key: &str) -> anyhow::Result<Vec<T>>
where
    T: std::str::FromStr<Err = String>,
{
    names
        .iter()
        .map(|n| n.parse::<T>().map_err(|e| anyhow::anyhow!("{key}: {e}")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(chart_settings_from_toml("").unwrap(), ChartSettings::default());
    }

    #[test]
    fn full_chart_table() {
        let text = r#"
            [chart]
            house_system = "whole-sign"
            bodies = ["sun", "moon", "north node"]
            angles = ["asc", "mc"]
            default_orb = 6.0
            exclude = ["moon"]

            [[chart.aspects]]
            kind = "conjunction"
            orb = 10.0

            [[chart.aspects]]
            kind = "quincunx"
        "#;
        let settings = chart_settings_from_toml(text).unwrap();
        assert_eq!(settings.house_system, HouseSystem::WholeSign);
        assert_eq!(settings.bodies, vec![Body::Sun, Body::Moon, Body::NorthNode]);
        assert_eq!(settings.angles, vec![Angle::Ascendant, Angle::Midheaven]);
        assert_eq!(settings.aspects.default_orb, 6.0);
        assert_eq!(
            settings.aspects.aspects,
            vec![
                AspectDefinition::with_orb(AspectKind::Conjunction, 10.0),
                AspectDefinition::new(AspectKind::Quincunx),
            ]
        );
        assert!(settings.aspects.exclude.contains(&ChartPoint::Body(Body::Moon)));
        assert_eq!(settings.aspects.exclude.len(), 1);
    }

    #[test]
    fn default_aspects_keep_angle_exclusions() {
        let settings = chart_settings_from_toml("[chart]\ndefault_orb = 5.0\n").unwrap();
        assert_eq!(settings.aspects.default_orb, 5.0);
        assert_eq!(settings.aspects.aspects.len(), AspectKind::MAJOR.len());
        assert!(settings
            .aspects
            .exclude
            .contains(&ChartPoint::Angle(Angle::ImumCoeli)));
    }

    #[test]
    fn rejects_unknown_names() {
        for text in [
            "[chart]\nhouse_system = \"koch\"\n",
            "[chart]\nbodies = [\"vulcan\"]\n",
            "[chart]\nangles = [\"vertex\"]\n",
            "[chart]\nexclude = [\"lilith\"]\n",
            "[[chart.aspects]]\nkind = \"septile\"\n",
        ] {
            assert!(chart_settings_from_toml(text).is_err(), "{text}");
        }
    }

    #[test]
    fn rejects_negative_orbs() {
        assert!(chart_settings_from_toml("[chart]\ndefault_orb = -1.0\n").is_err());
        assert!(chart_settings_from_toml("[[chart.aspects]]\nkind = \"trine\"\norb = -2.0\n").is_err());
    }

    #[test]
    fn explicit_path_must_exist() {
        let missing = Path::new("/nonexistent/natal.toml");
        assert!(load_chart_settings(Some(missing)).is_err());
    }

    #[test]
    fn loads_explicit_file() {
        let path = std::env::temp_dir().join(format!("natal-config-{}.toml", std::process::id()));
        fs::write(&path, "[chart]\nhouse_system = \"porphyry\"\n").unwrap();
        let settings = load_chart_settings(Some(&path)).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(settings.house_system, HouseSystem::Porphyry);
    }
}
