//! Cusp algorithms for each supported house system.
//!
//! Every function fills all twelve cusps; ordering is checked afterwards by
//! [`HouseCusps`](super::HouseCusps) construction, not here.

use super::geometry::{
    cusp_from_pole, declination_deg, diurnal_semi_arc_deg, ecliptic_from_right_ascension,
};
use super::types::HouseSystem;
use crate::math::{forward_arc, normalize_deg, signed_deg};

const PLACIDUS_MAX_ITERATIONS: usize = 100;
const PLACIDUS_TOLERANCE: f64 = 1e-9;

/// Sidereal frame shared by all systems for one instant and place.
#[derive(Debug, Clone, Copy)]
pub struct HouseFrame {
    pub ramc: f64,
    pub obliquity: f64,
    pub latitude: f64,
    pub ascendant: f64,
    pub midheaven: f64,
}

impl HouseFrame {
    fn descendant(&self) -> f64 {
        normalize_deg(self.ascendant + 180.0)
    }

    fn imum_coeli(&self) -> f64 {
        normalize_deg(self.midheaven + 180.0)
    }

    fn ecliptic(&self, ra: f64) -> f64 {
        ecliptic_from_right_ascension(ra, self.obliquity)
    }
}

/// Raw cusps for `system`, or the reason they cannot be computed.
pub fn cusps_for(system: HouseSystem, frame: &HouseFrame) -> Result<[f64; 12], String> {
    match system {
        HouseSystem::Placidus => placidus(frame),
        HouseSystem::Alcabitius => alcabitius(frame),
        HouseSystem::Regiomontanus => Ok(regiomontanus(frame)),
        HouseSystem::Porphyry => Ok(porphyry(frame)),
        HouseSystem::Morinus => Ok(morinus(frame)),
        HouseSystem::Equal => Ok(equal(frame.ascendant)),
        HouseSystem::WholeSign => Ok(whole_sign(frame.ascendant)),
    }
}

/// Build a quadrant-system cusp set from the four intermediate cusps
/// 11, 12, 2 and 3. The rest are the angles and their opposites.
fn from_quadrant(frame: &HouseFrame, c11: f64, c12: f64, c2: f64, c3: f64) -> [f64; 12] {
    [
        frame.ascendant,
        c2,
        c3,
        frame.imum_coeli(),
        normalize_deg(c11 + 180.0),
        normalize_deg(c12 + 180.0),
        frame.descendant(),
        normalize_deg(c2 + 180.0),
        normalize_deg(c3 + 180.0),
        frame.midheaven,
        c11,
        c12,
    ]
}

fn placidus(frame: &HouseFrame) -> Result<[f64; 12], String> {
    let c11 = placidus_cusp(frame, 1.0 / 3.0, true)?;
    let c12 = placidus_cusp(frame, 2.0 / 3.0, true)?;
    let c2 = placidus_cusp(frame, 2.0 / 3.0, false)?;
    let c3 = placidus_cusp(frame, 1.0 / 3.0, false)?;
    Ok(from_quadrant(frame, c11, c12, c2, c3))
}

/// Solve for the ecliptic point whose hour angle is `fraction` of its own
/// semi-arc: diurnal above the horizon (houses 11, 12), nocturnal below
/// (houses 2, 3, measured back from the lower meridian).
fn placidus_cusp(frame: &HouseFrame, fraction: f64, above: bool) -> Result<f64, String> {
    let target = |semi_arc: f64| {
        if above {
            frame.ramc + fraction * semi_arc
        } else {
            frame.ramc + 180.0 - fraction * (180.0 - semi_arc)
        }
    };

    let mut ra = target(90.0);
    for _ in 0..PLACIDUS_MAX_ITERATIONS {
        let lon = frame.ecliptic(ra);
        let dec = declination_deg(lon, frame.obliquity);
        let semi_arc = diurnal_semi_arc_deg(dec, frame.latitude).ok_or_else(|| {
            format!(
                "ecliptic point {:.4} is circumpolar at latitude {:.4}",
                lon, frame.latitude
            )
        })?;
        let next = target(semi_arc);
        if signed_deg(next - ra).abs() < PLACIDUS_TOLERANCE {
            return Ok(frame.ecliptic(next));
        }
        ra = next;
    }
    Err(format!(
        "semi-arc iteration did not converge within {} steps",
        PLACIDUS_MAX_ITERATIONS
    ))
}

fn alcabitius(frame: &HouseFrame) -> Result<[f64; 12], String> {
    let dec = declination_deg(frame.ascendant, frame.obliquity);
    let semi_arc = diurnal_semi_arc_deg(dec, frame.latitude).ok_or_else(|| {
        format!("the Ascendant is circumpolar at latitude {:.4}", frame.latitude)
    })?;
    let nocturnal = 180.0 - semi_arc;
    let ramc = frame.ramc;
    Ok(from_quadrant(
        frame,
        frame.ecliptic(ramc + semi_arc / 3.0),
        frame.ecliptic(ramc + 2.0 * semi_arc / 3.0),
        frame.ecliptic(ramc + 180.0 - 2.0 * nocturnal / 3.0),
        frame.ecliptic(ramc + 180.0 - nocturnal / 3.0),
    ))
}

fn regiomontanus(frame: &HouseFrame) -> [f64; 12] {
    let tan_lat = frame.latitude.to_radians().tan();
    let cusp = |hour: f64| {
        let pole = (tan_lat * hour.to_radians().sin()).atan().to_degrees();
        cusp_from_pole(frame.ramc + hour, pole, frame.obliquity)
    };
    from_quadrant(frame, cusp(30.0), cusp(60.0), cusp(120.0), cusp(150.0))
}

fn porphyry(frame: &HouseFrame) -> [f64; 12] {
    let lower = forward_arc(frame.ascendant, frame.imum_coeli()) / 3.0;
    let upper = forward_arc(frame.imum_coeli(), frame.descendant()) / 3.0;
    from_quadrant(
        frame,
        normalize_deg(frame.midheaven + upper),
        normalize_deg(frame.midheaven + 2.0 * upper),
        normalize_deg(frame.ascendant + lower),
        normalize_deg(frame.ascendant + 2.0 * lower),
    )
}

/// Equal divisions of the equator from the east point, projected onto the
/// ecliptic along circles of ecliptic latitude.
fn morinus(frame: &HouseFrame) -> [f64; 12] {
    let eps = frame.obliquity.to_radians();
    std::array::from_fn(|i| {
        let r = (frame.ramc + 90.0 + 30.0 * i as f64).to_radians();
        normalize_deg((r.sin() * eps.cos()).atan2(r.cos()).to_degrees())
    })
}

fn equal(ascendant: f64) -> [f64; 12] {
    std::array::from_fn(|i| normalize_deg(ascendant + 30.0 * i as f64))
}

fn whole_sign(ascendant: f64) -> [f64; 12] {
    let start = (normalize_deg(ascendant) / 30.0).floor() * 30.0;
    std::array::from_fn(|i| normalize_deg(start + 30.0 * i as f64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::houses::geometry::{ascendant_deg, midheaven_deg};
    use crate::math::angular_separation;

    fn frame(ramc: f64, latitude: f64) -> HouseFrame {
        let obliquity = 23.4406;
        HouseFrame {
            ramc,
            obliquity,
            latitude,
            ascendant: ascendant_deg(ramc, latitude, obliquity),
            midheaven: midheaven_deg(ramc, obliquity),
        }
    }

    fn assert_ordered(cusps: &[f64; 12]) {
        let total: f64 = (0..12).map(|i| forward_arc(cusps[i], cusps[(i + 1) % 12])).sum();
        assert!((total - 360.0).abs() < 1e-6, "cusps out of order: {cusps:?}");
    }

    #[test]
    fn placidus_tokyo() {
        let cusps = placidus(&frame(104.784, 35.68)).unwrap();
        assert_ordered(&cusps);
        assert!((cusps[1] - 219.9).abs() < 0.2, "{cusps:?}");
        assert!((cusps[10] - 136.28).abs() < 0.2, "{cusps:?}");
    }

    #[test]
    fn placidus_equator_matches_pole_free_division() {
        // at the equator every semi-arc is 90 degrees
        let f = frame(40.0, 0.0);
        let cusps = placidus(&f).unwrap();
        assert!(angular_separation(cusps[10], f.ecliptic(70.0)) < 1e-7);
        assert!(angular_separation(cusps[2], f.ecliptic(40.0 + 150.0)) < 1e-7);
    }

    #[test]
    fn placidus_fails_inside_polar_circle() {
        let err = placidus(&frame(0.0, 70.0)).unwrap_err();
        assert!(err.contains("circumpolar"), "{err}");
    }

    #[test]
    fn quadrant_systems_keep_angles() {
        for ramc in [0.0, 77.0, 181.0, 299.0] {
            let f = frame(ramc, 48.85);
            for cusps in [
                placidus(&f).unwrap(),
                alcabitius(&f).unwrap(),
                regiomontanus(&f),
                porphyry(&f),
            ] {
                assert_ordered(&cusps);
                assert_eq!(cusps[0], f.ascendant);
                assert_eq!(cusps[9], f.midheaven);
            }
        }
    }

    #[test]
    fn morinus_is_ordered_with_opposite_cusps() {
        let cusps = morinus(&frame(123.0, 60.0));
        assert_ordered(&cusps);
        assert!(angular_separation(cusps[6], cusps[0] + 180.0) < 1e-9);
    }

    #[test]
    fn whole_sign_starts_at_sign_boundary() {
        let cusps = whole_sign(197.3);
        assert_eq!(cusps[0], 180.0);
        assert_eq!(cusps[6], 0.0);
        assert_eq!(equal(197.3)[3], normalize_deg(197.3 + 90.0));
    }
}
