use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::points::{Angle, ChartPoint};

/// Orb allowed for any aspect kind without its own orb.
pub const DEFAULT_ORB: f64 = 8.0;

/// An angular relationship between two chart points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectKind {
    Conjunction,
    SemiSextile,
    SemiSquare,
    Sextile,
    Quintile,
    Square,
    Trine,
    Sesquiquadrate,
    Biquintile,
    Quincunx,
    Opposition,
}

impl AspectKind {
    /// All kinds, in ascending order of exact angle.
    pub const ALL: [AspectKind; 11] = [
        AspectKind::Conjunction,
        AspectKind::SemiSextile,
        AspectKind::SemiSquare,
        AspectKind::Sextile,
        AspectKind::Quintile,
        AspectKind::Square,
        AspectKind::Trine,
        AspectKind::Sesquiquadrate,
        AspectKind::Biquintile,
        AspectKind::Quincunx,
        AspectKind::Opposition,
    ];

    pub const MAJOR: [AspectKind; 5] = [
        AspectKind::Conjunction,
        AspectKind::Sextile,
        AspectKind::Square,
        AspectKind::Trine,
        AspectKind::Opposition,
    ];

    /// Exact angle in degrees.
    pub fn angle(self) -> f64 {
        match self {
            AspectKind::Conjunction => 0.0,
            AspectKind::SemiSextile => 30.0,
            AspectKind::SemiSquare => 45.0,
            AspectKind::Sextile => 60.0,
            AspectKind::Quintile => 72.0,
            AspectKind::Square => 90.0,
            AspectKind::Trine => 120.0,
            AspectKind::Sesquiquadrate => 135.0,
            AspectKind::Biquintile => 144.0,
            AspectKind::Quincunx => 150.0,
            AspectKind::Opposition => 180.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AspectKind::Conjunction => "Conjunction",
            AspectKind::SemiSextile => "Semi-Sextile",
            AspectKind::SemiSquare => "Semi-Square",
            AspectKind::Sextile => "Sextile",
            AspectKind::Quintile => "Quintile",
            AspectKind::Square => "Square",
            AspectKind::Trine => "Trine",
            AspectKind::Sesquiquadrate => "Sesquiquadrate",
            AspectKind::Biquintile => "Biquintile",
            AspectKind::Quincunx => "Quincunx",
            AspectKind::Opposition => "Opposition",
        }
    }

    pub fn is_major(self) -> bool {
        Self::MAJOR.contains(&self)
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AspectKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        let kind = match key.as_str() {
            "conjunction" => AspectKind::Conjunction,
            "semisextile" => AspectKind::SemiSextile,
            "semisquare" => AspectKind::SemiSquare,
            "sextile" => AspectKind::Sextile,
            "quintile" => AspectKind::Quintile,
            "square" => AspectKind::Square,
            "trine" => AspectKind::Trine,
            "sesquiquadrate" | "sesquisquare" => AspectKind::Sesquiquadrate,
            "biquintile" => AspectKind::Biquintile,
            "quincunx" | "inconjunct" => AspectKind::Quincunx,
            "opposition" => AspectKind::Opposition,
            _ => return Err(format!("Unknown aspect: {}", s)),
        };
        Ok(kind)
    }
}

/// One row of the aspect table: a kind and its orb, or the default orb.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectDefinition {
    pub kind: AspectKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orb: Option<f64>,
}

impl AspectDefinition {
    pub fn new(kind: AspectKind) -> Self {
        Self { kind, orb: None }
    }

    pub fn with_orb(kind: AspectKind, orb: f64) -> Self {
        Self { kind, orb: Some(orb) }
    }
}

/// Settings for aspect detection
#[derive(Debug, Clone, PartialEq)]
pub struct AspectSettings {
    pub aspects: Vec<AspectDefinition>,
    pub default_orb: f64,
    /// Points that never form aspects
    pub exclude: BTreeSet<ChartPoint>,
}

impl AspectSettings {
    /// The given kinds at the default orb, nothing excluded.
    pub fn with_kinds(kinds: &[AspectKind], default_orb: f64) -> Self {
        Self {
            aspects: kinds.iter().copied().map(AspectDefinition::new).collect(),
            default_orb,
            exclude: BTreeSet::new(),
        }
    }

    pub fn orb_for(&self, definition: &AspectDefinition) -> f64 {
        definition.orb.unwrap_or(self.default_orb)
    }
}

impl Default for AspectSettings {
    /// Major aspects at 8°. Descendant and IC only mirror Asc and MC, so they
    /// are left out.
    fn default() -> Self {
        let mut settings = Self::with_kinds(&AspectKind::MAJOR, DEFAULT_ORB);
        settings.exclude.insert(ChartPoint::Angle(Angle::Descendant));
        settings.exclude.insert(ChartPoint::Angle(Angle::ImumCoeli));
        settings
    }
}

/// A detected aspect. `first` precedes `second` in canonical point order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aspect {
    pub first: ChartPoint,
    pub second: ChartPoint,
    pub kind: AspectKind,
    /// Shortest arc between the two points, in [0, 180]
    pub separation: f64,
    /// Deviation of the separation from the exact angle
    pub orb: f64,
    /// Whether the orb is shrinking; `None` without both speeds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applying: Option<bool>,
}
