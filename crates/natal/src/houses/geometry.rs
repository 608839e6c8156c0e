//! Horizon and meridian geometry: obliquity, sidereal time and the two
//! primary angles.
//!
//! Sources: Meeus, "Astronomical Algorithms" (2nd ed), chapters 12, 13 and 22.

use crate::math::normalize_deg;
use crate::time::J2000_JD;

/// Mean obliquity of the ecliptic of date (IAU 1980), degrees.
pub fn mean_obliquity_deg(jd: f64) -> f64 {
    let t = (jd - J2000_JD) / 36_525.0;
    23.439_291_111 - 0.013_004_167 * t - 0.000_000_163_9 * t * t + 0.000_000_503_6 * t * t * t
}

/// Greenwich mean sidereal time, degrees in [0, 360).
pub fn gmst_deg(jd_ut: f64) -> f64 {
    let d = jd_ut - J2000_JD;
    let t = d / 36_525.0;
    normalize_deg(
        280.460_618_37 + 360.985_647_366_29 * d + 0.000_387_933 * t * t - t * t * t / 38_710_000.0,
    )
}

/// Local sidereal time for an east-positive longitude. Equal to the RAMC.
pub fn local_sidereal_time_deg(jd_ut: f64, east_longitude_deg: f64) -> f64 {
    normalize_deg(gmst_deg(jd_ut) + east_longitude_deg)
}

/// Ecliptic longitude culminating on the upper meridian.
///
/// `MC = atan2(sin RAMC, cos RAMC * cos eps)`
pub fn midheaven_deg(ramc_deg: f64, obliquity_deg: f64) -> f64 {
    let ramc = ramc_deg.to_radians();
    let eps = obliquity_deg.to_radians();
    normalize_deg(ramc.sin().atan2(ramc.cos() * eps.cos()).to_degrees())
}

/// Ecliptic longitude rising on the eastern horizon.
///
/// `Asc = atan2(cos RAMC, -(sin RAMC * cos eps + tan phi * sin eps))`
pub fn ascendant_deg(ramc_deg: f64, latitude_deg: f64, obliquity_deg: f64) -> f64 {
    let ramc = ramc_deg.to_radians();
    let eps = obliquity_deg.to_radians();
    let phi = latitude_deg.to_radians();
    let y = ramc.cos();
    let x = -(ramc.sin() * eps.cos() + phi.tan() * eps.sin());
    normalize_deg(y.atan2(x).to_degrees())
}

/// Cusp of a house circle with pole height `pole_deg` crossing the equator at
/// right ascension `ra_deg`.
///
/// With pole 0 this is the ecliptic point of right ascension `ra_deg`; with
/// pole = latitude and `ra = RAMC + 90` it is the Ascendant.
pub fn cusp_from_pole(ra_deg: f64, pole_deg: f64, obliquity_deg: f64) -> f64 {
    let ra = ra_deg.to_radians();
    let eps = obliquity_deg.to_radians();
    let pole = pole_deg.to_radians();
    normalize_deg(
        ra.sin()
            .atan2(ra.cos() * eps.cos() - pole.tan() * eps.sin())
            .to_degrees(),
    )
}

/// Ecliptic longitude of the ecliptic point with right ascension `ra_deg`.
pub fn ecliptic_from_right_ascension(ra_deg: f64, obliquity_deg: f64) -> f64 {
    cusp_from_pole(ra_deg, 0.0, obliquity_deg)
}

/// Declination of the ecliptic point at `longitude_deg`.
pub fn declination_deg(longitude_deg: f64, obliquity_deg: f64) -> f64 {
    (obliquity_deg.to_radians().sin() * longitude_deg.to_radians().sin())
        .asin()
        .to_degrees()
}

/// Diurnal semi-arc of a declination at a latitude, degrees of hour angle.
///
/// `None` when the point is circumpolar (never rises or never sets).
pub fn diurnal_semi_arc_deg(declination_deg: f64, latitude_deg: f64) -> Option<f64> {
    let x = -latitude_deg.to_radians().tan() * declination_deg.to_radians().tan();
    if !(-1.0..=1.0).contains(&x) {
        return None;
    }
    Some(x.acos().to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::angular_separation;

    const EPS: f64 = 23.44;

    #[test]
    fn obliquity_at_j2000() {
        assert!((mean_obliquity_deg(J2000_JD) - 23.439_291).abs() < 1e-6);
    }

    #[test]
    fn gmst_at_j2000() {
        assert!((gmst_deg(J2000_JD) - 280.460_618_37).abs() < 1e-9);
    }

    #[test]
    fn mc_at_ramc_zero_is_aries() {
        assert!(midheaven_deg(0.0, EPS) < 1e-10);
        assert!((midheaven_deg(90.0, EPS) - 90.0).abs() < 1e-10);
    }

    #[test]
    fn ascendant_at_equator() {
        // 0 Aries culminating: 0 Cancer rises at the equator
        assert!((ascendant_deg(0.0, 0.0, EPS) - 90.0).abs() < 1e-10);
        assert!((ascendant_deg(90.0, 0.0, EPS) - 180.0).abs() < 1e-10);
    }

    #[test]
    fn ascendant_in_london_at_sidereal_zero() {
        // roughly 26 Cancer
        let asc = ascendant_deg(0.0, 51.5, EPS);
        assert!((asc - 116.57).abs() < 0.1, "asc = {asc}");
    }

    #[test]
    fn ascendant_leads_midheaven_by_a_quadrant_or_so() {
        for i in 0..36 {
            let ramc = i as f64 * 10.0;
            let asc = ascendant_deg(ramc, 40.0, EPS);
            let mc = midheaven_deg(ramc, EPS);
            let lead = crate::math::forward_arc(mc, asc);
            assert!(lead > 0.0 && lead < 180.0, "ramc {ramc}: lead {lead}");
        }
    }

    #[test]
    fn cusp_from_pole_reduces_to_angles() {
        for ramc in [0.0, 33.0, 170.0, 300.0] {
            let asc = ascendant_deg(ramc, 35.0, EPS);
            assert!(angular_separation(cusp_from_pole(ramc + 90.0, 35.0, EPS), asc) < 1e-9);
            let mc = midheaven_deg(ramc, EPS);
            assert!(angular_separation(ecliptic_from_right_ascension(ramc, EPS), mc) < 1e-9);
        }
    }

    #[test]
    fn semi_arc_is_a_quadrant_on_the_equator() {
        assert!((diurnal_semi_arc_deg(20.0, 0.0).unwrap() - 90.0).abs() < 1e-10);
        assert!(diurnal_semi_arc_deg(23.0, 70.0).is_none());
        assert!(diurnal_semi_arc_deg(10.0, 45.0).unwrap() > 90.0);
    }
}
