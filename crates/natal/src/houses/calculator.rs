use super::geometry::{ascendant_deg, local_sidereal_time_deg, mean_obliquity_deg, midheaven_deg};
use super::systems::{cusps_for, HouseFrame};
use super::types::{HouseCusps, HousePositions, HouseSystem};
use crate::ephemeris::GeoPosition;
use crate::error::ChartError;
use crate::time::Instant;

/// Compute houses for a house system given by name ("placidus", "Whole Sign").
pub fn compute_cusps(
    instant: &Instant,
    geo: &GeoPosition,
    system_name: &str,
) -> Result<HousePositions, ChartError> {
    let system: HouseSystem = system_name.parse()?;
    compute_houses(instant, geo, system)
}

pub fn compute_houses(
    instant: &Instant,
    geo: &GeoPosition,
    system: HouseSystem,
) -> Result<HousePositions, ChartError> {
    let jd = instant.julian_day();
    let obliquity = mean_obliquity_deg(jd);
    let ramc = local_sidereal_time_deg(jd, geo.longitude());
    let latitude = geo.latitude();
    log::debug!(
        "houses: system={} jd={:.6} ramc={:.6} obliquity={:.6} lat={:.4}",
        system.id(),
        jd,
        ramc,
        obliquity,
        latitude
    );

    if system.semi_arc_based() && latitude.abs() >= 90.0 - obliquity {
        let reason = format!(
            "latitude {:.4} lies inside the polar circle (|lat| >= {:.4})",
            latitude,
            90.0 - obliquity
        );
        log::warn!("{} houses unavailable: {}", system, reason);
        return Err(ChartError::HouseSystemDegenerate {
            system: system.id().to_string(),
            reason,
        });
    }

    let frame = HouseFrame {
        ramc,
        obliquity,
        latitude,
        ascendant: ascendant_deg(ramc, latitude, obliquity),
        midheaven: midheaven_deg(ramc, obliquity),
    };

    let raw = cusps_for(system, &frame).map_err(|reason| {
        log::warn!("{} houses unavailable: {}", system, reason);
        ChartError::HouseSystemDegenerate {
            system: system.id().to_string(),
            reason,
        }
    })?;
    let cusps = HouseCusps::validated(raw, system.id()).map_err(|e| {
        log::warn!("{}", e);
        e
    })?;

    log::debug!(
        "houses: asc={:.4} mc={:.4} cusps={:?}",
        frame.ascendant,
        frame.midheaven,
        cusps.longitudes()
    );
    Ok(HousePositions {
        system,
        cusps,
        ascendant: frame.ascendant,
        midheaven: frame.midheaven,
    })
}
