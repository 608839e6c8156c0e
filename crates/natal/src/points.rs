//! Identifiers for everything that can appear on a chart: ephemeris bodies and
//! the four angles of the horizon/meridian frame.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A body whose position comes from an ephemeris provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    NorthNode,
    SouthNode,
}

impl Body {
    pub const ALL: [Body; 12] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
        Body::NorthNode,
        Body::SouthNode,
    ];

    /// Sun through Pluto, the default set resolved for a natal chart.
    pub const PLANETS: [Body; 10] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
    ];

    /// Display name used in output documents ("Sun", "North Node").
    pub fn name(self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
            Body::NorthNode => "North Node",
            Body::SouthNode => "South Node",
        }
    }

    /// Configuration id ("sun", "north_node").
    pub fn id(self) -> &'static str {
        match self {
            Body::Sun => "sun",
            Body::Moon => "moon",
            Body::Mercury => "mercury",
            Body::Venus => "venus",
            Body::Mars => "mars",
            Body::Jupiter => "jupiter",
            Body::Saturn => "saturn",
            Body::Uranus => "uranus",
            Body::Neptune => "neptune",
            Body::Pluto => "pluto",
            Body::NorthNode => "north_node",
            Body::SouthNode => "south_node",
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Body {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_key(s);
        Body::ALL
            .iter()
            .copied()
            .find(|b| b.id() == key)
            .ok_or_else(|| format!("Unknown body: {}", s))
    }
}

/// One of the four angles where the ecliptic meets the horizon or meridian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Angle {
    Ascendant,
    Midheaven,
    Descendant,
    ImumCoeli,
}

impl Angle {
    pub const ALL: [Angle; 4] = [
        Angle::Ascendant,
        Angle::Midheaven,
        Angle::Descendant,
        Angle::ImumCoeli,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Angle::Ascendant => "Asc",
            Angle::Midheaven => "MC",
            Angle::Descendant => "Desc",
            Angle::ImumCoeli => "IC",
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Angle::Ascendant => "ascendant",
            Angle::Midheaven => "midheaven",
            Angle::Descendant => "descendant",
            Angle::ImumCoeli => "imum_coeli",
        }
    }

    /// The angular house this point anchors.
    pub fn house(self) -> u8 {
        match self {
            Angle::Ascendant => 1,
            Angle::ImumCoeli => 4,
            Angle::Descendant => 7,
            Angle::Midheaven => 10,
        }
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Angle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_key(s);
        match key.as_str() {
            "asc" | "ascendant" => Ok(Angle::Ascendant),
            "mc" | "midheaven" => Ok(Angle::Midheaven),
            "desc" | "dsc" | "descendant" => Ok(Angle::Descendant),
            "ic" | "imum_coeli" => Ok(Angle::ImumCoeli),
            _ => Err(format!("Unknown angle: {}", s)),
        }
    }
}

/// Any point placed on a chart.
///
/// The derived ordering (bodies in enum order, then Asc, MC, Desc, IC) is the
/// canonical order used for every sorted output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChartPoint {
    Body(Body),
    Angle(Angle),
}

impl ChartPoint {
    pub fn name(self) -> &'static str {
        match self {
            ChartPoint::Body(b) => b.name(),
            ChartPoint::Angle(a) => a.name(),
        }
    }

    pub fn is_angle(self) -> bool {
        matches!(self, ChartPoint::Angle(_))
    }
}

impl From<Body> for ChartPoint {
    fn from(body: Body) -> Self {
        ChartPoint::Body(body)
    }
}

impl From<Angle> for ChartPoint {
    fn from(angle: Angle) -> Self {
        ChartPoint::Angle(angle)
    }
}

impl fmt::Display for ChartPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChartPoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Body>()
            .map(ChartPoint::Body)
            .or_else(|_| s.parse::<Angle>().map(ChartPoint::Angle))
            .map_err(|_| format!("Unknown chart point: {}", s))
    }
}

// Serialized as the display name so it can key JSON maps ("Sun", "MC").
impl Serialize for ChartPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for ChartPoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

fn normalize_key(s: &str) -> String {
    s.trim().to_lowercase().replace([' ', '-'], "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_parses_from_id_and_name() {
        assert_eq!("north_node".parse::<Body>().unwrap(), Body::NorthNode);
        assert_eq!("North Node".parse::<Body>().unwrap(), Body::NorthNode);
        assert_eq!("SUN".parse::<Body>().unwrap(), Body::Sun);
        assert!("vulcan".parse::<Body>().is_err());
    }

    #[test]
    fn chart_point_parses_both_kinds() {
        assert_eq!("MC".parse::<ChartPoint>().unwrap(), ChartPoint::Angle(Angle::Midheaven));
        assert_eq!("imum coeli".parse::<ChartPoint>().unwrap(), ChartPoint::Angle(Angle::ImumCoeli));
        assert_eq!("venus".parse::<ChartPoint>().unwrap(), ChartPoint::Body(Body::Venus));
    }

    #[test]
    fn canonical_order_puts_bodies_before_angles() {
        let mut points = vec![
            ChartPoint::Angle(Angle::Ascendant),
            ChartPoint::Body(Body::Pluto),
            ChartPoint::Body(Body::Sun),
        ];
        points.sort();
        assert_eq!(
            points,
            vec![
                ChartPoint::Body(Body::Sun),
                ChartPoint::Body(Body::Pluto),
                ChartPoint::Angle(Angle::Ascendant),
            ]
        );
    }

    #[test]
    fn angle_houses() {
        assert_eq!(Angle::Ascendant.house(), 1);
        assert_eq!(Angle::ImumCoeli.house(), 4);
        assert_eq!(Angle::Descendant.house(), 7);
        assert_eq!(Angle::Midheaven.house(), 10);
    }

    #[test]
    fn chart_point_json_uses_display_name() {
        let json = serde_json::to_string(&ChartPoint::Body(Body::NorthNode)).unwrap();
        assert_eq!(json, "\"North Node\"");
        let back: ChartPoint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ChartPoint::Body(Body::NorthNode));
    }
}
