use rayon::prelude::*;
use std::collections::BTreeSet;

use crate::aspects::{AspectCalculator, AspectPoint};
use crate::chart::data::{Chart, ResolvedPoint};
use crate::chart::settings::ChartSettings;
use crate::ephemeris::{BodyPosition, EphemerisProvider, GeoPosition};
use crate::error::{BodyFailure, ChartError};
use crate::houses::{compute_houses, HousePositions};
use crate::math::{angular_separation, normalize_deg};
use crate::points::{Angle, Body};
use crate::time::Instant;

/// Largest disagreement tolerated between a cusp and the angle it must match.
const ANGLE_TOLERANCE: f64 = 1e-6;

/// Builds a [`Chart`] from an injected ephemeris provider.
pub struct ChartAssembler<'a, P: EphemerisProvider + ?Sized> {
    provider: &'a P,
    settings: ChartSettings,
}

impl<'a, P: EphemerisProvider + ?Sized> ChartAssembler<'a, P> {
    pub fn new(provider: &'a P, settings: ChartSettings) -> Self {
        Self { provider, settings }
    }

    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    /// Compute the full chart for one instant and place.
    ///
    /// Body lookups run in parallel. If any body cannot be resolved the whole
    /// chart fails with [`ChartError::IncompleteChart`] naming every failure.
    pub fn assemble(&self, instant: &Instant, geo: &GeoPosition) -> Result<Chart, ChartError> {
        log::info!(
            "assembling chart: jd={:.6} lat={:.4} lon={:.4} houses={} provider={}",
            instant.julian_day(),
            geo.latitude(),
            geo.longitude(),
            self.settings.house_system.id(),
            self.provider.name()
        );

        let positions = self.resolve_bodies(instant)?;
        let houses = compute_houses(instant, geo, self.settings.house_system)?;
        verify_angles(&houses)?;

        let mut points: Vec<ResolvedPoint> = positions
            .iter()
            .map(|(body, position)| {
                let house = houses.cusps.house_of(position.longitude);
                log::debug!("{} at {:.4} in house {}", body, position.longitude, house);
                ResolvedPoint::housed(*body, position, house)
            })
            .collect();

        let angles: BTreeSet<Angle> = self.settings.angles.iter().copied().collect();
        points.extend(angles.into_iter().map(|angle| ResolvedPoint::AnglePoint {
            angle,
            longitude: angle_longitude(&houses, angle),
        }));

        let aspect_points: Vec<AspectPoint> = points
            .iter()
            .map(|p| AspectPoint {
                point: p.point(),
                longitude: p.longitude(),
                speed: p.speed(),
            })
            .collect();
        let aspects = AspectCalculator::new(self.settings.aspects.clone()).detect(&aspect_points);
        log::debug!("{} aspects among {} points", aspects.len(), aspect_points.len());

        Ok(Chart::new(*instant, *geo, houses, points, aspects))
    }

    /// Look up every requested body, in canonical order, without duplicates.
    fn resolve_bodies(&self, instant: &Instant) -> Result<Vec<(Body, BodyPosition)>, ChartError> {
        let bodies: Vec<Body> = self
            .settings
            .bodies
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let results: Vec<(Body, Result<BodyPosition, String>)> = bodies
            .par_iter()
            .map(|&body| {
                let result = self
                    .provider
                    .position_of(body, instant)
                    .map_err(|e| e.to_string())
                    .and_then(|pos| {
                        if pos.longitude.is_finite() && pos.latitude.is_finite() {
                            Ok(BodyPosition {
                                longitude: normalize_deg(pos.longitude),
                                ..pos
                            })
                        } else {
                            Err(format!("non-finite position ({}, {})", pos.longitude, pos.latitude))
                        }
                    });
                (body, result)
            })
            .collect();

        let mut positions = Vec::with_capacity(results.len());
        let mut failures = Vec::new();
        for (body, result) in results {
            match result {
                Ok(pos) => positions.push((body, pos)),
                Err(message) => {
                    log::error!("failed to resolve {}: {}", body, message);
                    failures.push(BodyFailure { body, message });
                }
            }
        }

        if !failures.is_empty() {
            return Err(ChartError::IncompleteChart { failures });
        }
        Ok(positions)
    }
}

fn angle_longitude(houses: &HousePositions, angle: Angle) -> f64 {
    match angle {
        Angle::Ascendant => houses.ascendant,
        Angle::Midheaven => houses.midheaven,
        Angle::Descendant => houses.descendant(),
        Angle::ImumCoeli => houses.imum_coeli(),
    }
}

/// Check the cusp/angle relationships every chart must satisfy: opposite
/// angular cusps, and for quadrant systems cusp 1 on the Ascendant and cusp 10
/// on the Midheaven.
fn verify_angles(houses: &HousePositions) -> Result<(), ChartError> {
    let cusp = |n: u8| houses.cusps.longitudes()[usize::from(n) - 1];
    let mut checks = vec![
        ("cusp 7 opposite cusp 1", cusp(7), cusp(1) + 180.0),
        ("cusp 4 opposite cusp 10", cusp(4), cusp(10) + 180.0),
    ];
    if houses.system.is_quadrant() {
        checks.push(("cusp 1 on the Ascendant", cusp(1), houses.ascendant));
        checks.push(("cusp 10 on the Midheaven", cusp(10), houses.midheaven));
    }

    for (what, actual, expected) in checks {
        let off = angular_separation(actual, expected);
        if off > ANGLE_TOLERANCE {
            log::error!("{} houses violate {}: off by {:.9}", houses.system, what, off);
            return Err(ChartError::HouseSystemDegenerate {
                system: houses.system.id().to_string(),
                reason: format!("{} is off by {:.9} degrees", what, off),
            });
        }
    }
    Ok(())
}
