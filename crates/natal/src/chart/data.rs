use serde::{Deserialize, Serialize};

use crate::aspects::Aspect;
use crate::ephemeris::{BodyPosition, GeoPosition};
use crate::houses::{HouseCusps, HousePositions, HouseSystem};
use crate::points::{Angle, Body, ChartPoint};
use crate::time::Instant;
use crate::western::{sign_of, Sign};

/// A point placed on the chart.
///
/// Bodies carry their ephemeris data and the house they fall in. Angles are
/// pure longitudes whose house is fixed by definition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolvedPoint {
    HousedBody {
        body: Body,
        longitude: f64,
        latitude: f64,
        distance: Option<f64>,
        speed: Option<f64>,
        house: u8,
    },
    AnglePoint {
        angle: Angle,
        longitude: f64,
    },
}

impl ResolvedPoint {
    pub(crate) fn housed(body: Body, position: &BodyPosition, house: u8) -> Self {
        ResolvedPoint::HousedBody {
            body,
            longitude: position.longitude,
            latitude: position.latitude,
            distance: position.distance,
            speed: position.speed,
            house,
        }
    }

    pub fn point(&self) -> ChartPoint {
        match self {
            ResolvedPoint::HousedBody { body, .. } => ChartPoint::Body(*body),
            ResolvedPoint::AnglePoint { angle, .. } => ChartPoint::Angle(*angle),
        }
    }

    pub fn longitude(&self) -> f64 {
        match self {
            ResolvedPoint::HousedBody { longitude, .. } | ResolvedPoint::AnglePoint { longitude, .. } => {
                *longitude
            }
        }
    }

    /// Ecliptic latitude; angles lie on the ecliptic.
    pub fn latitude(&self) -> Option<f64> {
        match self {
            ResolvedPoint::HousedBody { latitude, .. } => Some(*latitude),
            ResolvedPoint::AnglePoint { .. } => None,
        }
    }

    pub fn speed(&self) -> Option<f64> {
        match self {
            ResolvedPoint::HousedBody { speed, .. } => *speed,
            ResolvedPoint::AnglePoint { .. } => None,
        }
    }

    pub fn house(&self) -> u8 {
        match self {
            ResolvedPoint::HousedBody { house, .. } => *house,
            ResolvedPoint::AnglePoint { angle, .. } => angle.house(),
        }
    }

    pub fn sign(&self) -> Sign {
        sign_of(self.longitude())
    }

    pub fn is_retrograde(&self) -> Option<bool> {
        self.speed().map(|s| s < 0.0)
    }
}

/// One house cusp with its number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HouseCusp {
    pub number: u8,
    pub longitude: f64,
}

impl HouseCusp {
    pub fn sign(&self) -> Sign {
        sign_of(self.longitude)
    }
}

/// A computed natal chart. Built once by the assembler, read-only after.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    instant: Instant,
    geo: GeoPosition,
    houses: HousePositions,
    points: Vec<ResolvedPoint>,
    aspects: Vec<Aspect>,
}

impl Chart {
    pub(crate) fn new(
        instant: Instant,
        geo: GeoPosition,
        houses: HousePositions,
        points: Vec<ResolvedPoint>,
        aspects: Vec<Aspect>,
    ) -> Self {
        Self {
            instant,
            geo,
            houses,
            points,
            aspects,
        }
    }

    pub fn instant(&self) -> &Instant {
        &self.instant
    }

    pub fn geo(&self) -> &GeoPosition {
        &self.geo
    }

    pub fn house_system(&self) -> HouseSystem {
        self.houses.system
    }

    pub fn houses(&self) -> &HousePositions {
        &self.houses
    }

    pub fn house_cusps(&self) -> &HouseCusps {
        &self.houses.cusps
    }

    pub fn cusps(&self) -> Vec<HouseCusp> {
        self.houses
            .cusps
            .iter()
            .map(|(number, longitude)| HouseCusp { number, longitude })
            .collect()
    }

    /// Every resolved point, bodies first, in canonical order.
    pub fn points(&self) -> &[ResolvedPoint] {
        &self.points
    }

    pub fn point(&self, point: impl Into<ChartPoint>) -> Option<&ResolvedPoint> {
        let wanted = point.into();
        self.points.iter().find(|p| p.point() == wanted)
    }

    pub fn bodies(&self) -> impl Iterator<Item = &ResolvedPoint> {
        self.points
            .iter()
            .filter(|p| matches!(p, ResolvedPoint::HousedBody { .. }))
    }

    pub fn angles(&self) -> impl Iterator<Item = &ResolvedPoint> {
        self.points
            .iter()
            .filter(|p| matches!(p, ResolvedPoint::AnglePoint { .. }))
    }

    pub fn ascendant(&self) -> f64 {
        self.houses.ascendant
    }

    pub fn midheaven(&self) -> f64 {
        self.houses.midheaven
    }

    pub fn descendant(&self) -> f64 {
        self.houses.descendant()
    }

    pub fn imum_coeli(&self) -> f64 {
        self.houses.imum_coeli()
    }

    pub fn aspects(&self) -> &[Aspect] {
        &self.aspects
    }
}
