use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ChartError;
use crate::math::{forward_arc, normalize_deg};

/// Full-circle tolerance used when checking that cusp arcs close the circle.
const CLOSURE_TOLERANCE: f64 = 1e-6;

/// Supported house division methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseSystem {
    #[default]
    Placidus,
    Alcabitius,
    Regiomontanus,
    Porphyry,
    Morinus,
    Equal,
    WholeSign,
}

impl HouseSystem {
    pub const ALL: [HouseSystem; 7] = [
        HouseSystem::Placidus,
        HouseSystem::Alcabitius,
        HouseSystem::Regiomontanus,
        HouseSystem::Porphyry,
        HouseSystem::Morinus,
        HouseSystem::Equal,
        HouseSystem::WholeSign,
    ];

    pub fn id(self) -> &'static str {
        match self {
            HouseSystem::Placidus => "placidus",
            HouseSystem::Alcabitius => "alcabitius",
            HouseSystem::Regiomontanus => "regiomontanus",
            HouseSystem::Porphyry => "porphyry",
            HouseSystem::Morinus => "morinus",
            HouseSystem::Equal => "equal",
            HouseSystem::WholeSign => "whole_sign",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HouseSystem::Placidus => "Placidus",
            HouseSystem::Alcabitius => "Alcabitius",
            HouseSystem::Regiomontanus => "Regiomontanus",
            HouseSystem::Porphyry => "Porphyry",
            HouseSystem::Morinus => "Morinus",
            HouseSystem::Equal => "Equal",
            HouseSystem::WholeSign => "Whole Sign",
        }
    }

    /// Systems whose first and tenth cusps are the Ascendant and Midheaven.
    pub fn is_quadrant(self) -> bool {
        matches!(
            self,
            HouseSystem::Placidus
                | HouseSystem::Alcabitius
                | HouseSystem::Regiomontanus
                | HouseSystem::Porphyry
        )
    }

    /// Systems built on diurnal/nocturnal semi-arcs, undefined inside the
    /// polar circles.
    pub fn semi_arc_based(self) -> bool {
        matches!(self, HouseSystem::Placidus | HouseSystem::Alcabitius)
    }

    pub fn valid_ids() -> Vec<String> {
        Self::ALL.iter().map(|s| s.id().to_string()).collect()
    }
}

impl fmt::Display for HouseSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HouseSystem {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace([' ', '-'], "_");
        match key.as_str() {
            "placidus" => Ok(HouseSystem::Placidus),
            "alcabitius" => Ok(HouseSystem::Alcabitius),
            "regiomontanus" => Ok(HouseSystem::Regiomontanus),
            "porphyry" => Ok(HouseSystem::Porphyry),
            "morinus" => Ok(HouseSystem::Morinus),
            "equal" => Ok(HouseSystem::Equal),
            "whole_sign" | "wholesign" => Ok(HouseSystem::WholeSign),
            _ => Err(ChartError::HouseSystemUnsupported {
                system: s.to_string(),
                valid: HouseSystem::valid_ids(),
            }),
        }
    }
}

/// Twelve cusp longitudes in cyclic order.
///
/// Construction checks that walking cusp 1 → 12 → 1 advances by a positive
/// arc at every step and closes exactly one revolution, so every longitude
/// falls in exactly one house.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HouseCusps([f64; 12]);

impl HouseCusps {
    pub fn new(longitudes: [f64; 12]) -> Result<Self, ChartError> {
        Self::validated(longitudes, "custom")
    }

    pub(crate) fn validated(longitudes: [f64; 12], system: &str) -> Result<Self, ChartError> {
        if let Some(i) = longitudes.iter().position(|l| !l.is_finite()) {
            return Err(ChartError::HouseSystemDegenerate {
                system: system.to_string(),
                reason: format!("cusp {} is not a finite longitude", i + 1),
            });
        }
        let cusps = longitudes.map(normalize_deg);

        let mut total = 0.0;
        for i in 0..12 {
            let arc = forward_arc(cusps[i], cusps[(i + 1) % 12]);
            if arc <= 0.0 {
                return Err(ChartError::HouseSystemDegenerate {
                    system: system.to_string(),
                    reason: format!("cusps {} and {} coincide", i + 1, (i + 1) % 12 + 1),
                });
            }
            total += arc;
        }
        if (total - 360.0).abs() > CLOSURE_TOLERANCE {
            return Err(ChartError::HouseSystemDegenerate {
                system: system.to_string(),
                reason: format!("cusps are out of order (arcs span {:.3} degrees)", total),
            });
        }
        Ok(Self(cusps))
    }

    /// Longitude of cusp `house` (1-based). `None` outside 1..=12.
    pub fn cusp(&self, house: u8) -> Option<f64> {
        match house {
            1..=12 => Some(self.0[usize::from(house) - 1]),
            _ => None,
        }
    }

    pub fn longitudes(&self) -> &[f64; 12] {
        &self.0
    }

    /// House containing `longitude`: the cusp with the smallest forward arc
    /// to it, i.e. the half-open interval `[cusp i, cusp i+1)`.
    pub fn house_of(&self, longitude: f64) -> u8 {
        let lon = normalize_deg(longitude);
        let mut best = 0;
        let mut best_arc = f64::INFINITY;
        for (i, cusp) in self.0.iter().enumerate() {
            let arc = forward_arc(*cusp, lon);
            if arc < best_arc {
                best_arc = arc;
                best = i;
            }
        }
        best as u8 + 1
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, f64)> + '_ {
        self.0.iter().enumerate().map(|(i, l)| (i as u8 + 1, *l))
    }
}

/// Cusps and the two primary angles for one instant and place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HousePositions {
    pub system: HouseSystem,
    pub cusps: HouseCusps,
    pub ascendant: f64,
    pub midheaven: f64,
}

impl HousePositions {
    pub fn descendant(&self) -> f64 {
        normalize_deg(self.ascendant + 180.0)
    }

    pub fn imum_coeli(&self) -> f64 {
        normalize_deg(self.midheaven + 180.0)
    }
}
