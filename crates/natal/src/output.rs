//! The JSON chart document.
//!
//! Values are rounded to two decimals here and only here; the [`Chart`] keeps
//! full precision. Maps are ordered so the same chart always serializes to the
//! same bytes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::aspects::AspectKind;
use crate::chart::Chart;
use crate::math::normalize_deg;
use crate::points::ChartPoint;
use crate::western::Sign;

/// Descriptive data about the chart's subject that the engine does not compute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub name: String,
    pub place: String,
    pub timezone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub place: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub name: String,
    pub datetime_local: String,
    pub datetime_utc: String,
    pub timezone: String,
    pub location: Location,
    pub house_system: String,
    pub zodiac: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetEntry {
    pub sign: Sign,
    pub house: u8,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retrograde: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseEntry {
    pub longitude: f64,
    pub sign: Sign,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectEntry {
    pub body1: ChartPoint,
    pub body2: ChartPoint,
    #[serde(rename = "type")]
    pub kind: AspectKind,
    pub orb: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDocument {
    pub metadata: Metadata,
    pub planets: BTreeMap<ChartPoint, PlanetEntry>,
    pub houses: BTreeMap<u8, HouseEntry>,
    pub aspects: Vec<AspectEntry>,
}

impl ChartDocument {
    pub fn from_chart(chart: &Chart, subject: &Subject) -> Self {
        let instant = chart.instant();
        let metadata = Metadata {
            name: subject.name.clone(),
            datetime_local: instant.local().to_rfc3339(),
            datetime_utc: instant.utc().to_rfc3339(),
            timezone: subject.timezone.clone(),
            location: Location {
                place: subject.place.clone(),
                lat: chart.geo().latitude(),
                lon: chart.geo().longitude(),
            },
            house_system: chart.house_system().name().to_string(),
            zodiac: "tropical".to_string(),
        };

        let planets = chart
            .points()
            .iter()
            .map(|p| {
                let entry = PlanetEntry {
                    sign: p.sign(),
                    house: p.house(),
                    longitude: round_longitude(p.longitude()),
                    latitude: p.latitude().map(round2),
                    retrograde: p.is_retrograde(),
                };
                (p.point(), entry)
            })
            .collect();

        let houses = chart
            .cusps()
            .iter()
            .map(|c| {
                let entry = HouseEntry {
                    longitude: round_longitude(c.longitude),
                    sign: c.sign(),
                };
                (c.number, entry)
            })
            .collect();

        let aspects = chart
            .aspects()
            .iter()
            .map(|a| AspectEntry {
                body1: a.first,
                body2: a.second,
                kind: a.kind,
                orb: round2(a.orb),
            })
            .collect();

        Self {
            metadata,
            planets,
            houses,
            aspects,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// 359.996 rounds to 360.00, which is 0.00
fn round_longitude(value: f64) -> f64 {
    normalize_deg(round2(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_keeps_longitudes_in_range() {
        assert_eq!(round2(12.345_6), 12.35);
        assert_eq!(round2(-0.004), -0.0);
        assert_eq!(round_longitude(359.996), 0.0);
        assert_eq!(round_longitude(180.004), 180.0);
    }

    #[test]
    fn aspect_entry_uses_type_key() {
        let entry = AspectEntry {
            body1: "sun".parse().unwrap(),
            body2: "asc".parse().unwrap(),
            kind: AspectKind::Trine,
            orb: 1.25,
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"body1":"Sun","body2":"Asc","type":"trine","orb":1.25}"#);
    }
}
