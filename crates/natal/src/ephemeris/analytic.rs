//! Closed-form low-precision ephemeris.
//!
//! Planets use the JPL approximate Keplerian elements (Standish, valid
//! 1800-2050, J2000 ecliptic) reduced to geocentric coordinates and precessed
//! to the equinox of date. The Moon uses the truncated low-precision lunar
//! series of the Astronomical Almanac, the node its mean longitude.
//! Typical errors are below a few arcminutes for the planets and a few tenths
//! of a degree for the Moon, which is enough for sign, house and aspect work.

use crate::ephemeris::types::{BodyPosition, EphemerisError};
use crate::ephemeris::EphemerisProvider;
use crate::math::{normalize_deg, signed_deg};
use crate::points::Body;
use crate::time::{Instant, J2000_JD};

const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Half-width of the central difference used for speeds, in days.
const SPEED_STEP_DAYS: f64 = 0.5;

const KEPLER_MAX_ITERATIONS: usize = 50;
const KEPLER_TOLERANCE: f64 = 1e-12;

/// Mean orbital elements at J2000 and their rates per Julian century.
#[derive(Debug, Clone, Copy)]
struct Elements {
    /// Semi-major axis (AU)
    a: [f64; 2],
    /// Eccentricity
    e: [f64; 2],
    /// Inclination (deg)
    i: [f64; 2],
    /// Mean longitude (deg)
    l: [f64; 2],
    /// Longitude of perihelion (deg)
    peri: [f64; 2],
    /// Longitude of the ascending node (deg)
    node: [f64; 2],
}

const EARTH_MOON_BARYCENTER: Elements = Elements {
    a: [1.000_002_61, 0.000_005_62],
    e: [0.016_711_23, -0.000_043_92],
    i: [-0.000_015_31, -0.012_946_68],
    l: [100.464_571_66, 35_999.372_449_81],
    peri: [102.937_681_93, 0.323_273_64],
    node: [0.0, 0.0],
};

const PLANET_ELEMENTS: &[(Body, Elements)] = &[
    (
        Body::Mercury,
        Elements {
            a: [0.387_099_27, 0.000_000_37],
            e: [0.205_635_93, 0.000_019_06],
            i: [7.004_979_02, -0.005_947_49],
            l: [252.250_323_50, 149_472.674_111_75],
            peri: [77.457_796_28, 0.160_476_89],
            node: [48.330_765_93, -0.125_340_81],
        },
    ),
    (
        Body::Venus,
        Elements {
            a: [0.723_335_66, 0.000_003_90],
            e: [0.006_776_72, -0.000_041_07],
            i: [3.394_676_05, -0.000_788_90],
            l: [181.979_099_50, 58_517.815_387_29],
            peri: [131.602_467_18, 0.002_683_29],
            node: [76.679_842_55, -0.277_694_18],
        },
    ),
    (
        Body::Mars,
        Elements {
            a: [1.523_710_34, 0.000_018_47],
            e: [0.093_394_10, 0.000_078_82],
            i: [1.849_691_42, -0.008_131_31],
            l: [-4.553_432_05, 19_140.302_684_99],
            peri: [-23.943_629_59, 0.444_410_88],
            node: [49.559_538_91, -0.292_573_43],
        },
    ),
    (
        Body::Jupiter,
        Elements {
            a: [5.202_887_00, -0.000_116_07],
            e: [0.048_386_24, -0.000_132_53],
            i: [1.304_396_95, -0.001_837_14],
            l: [34.396_440_51, 3_034.746_127_75],
            peri: [14.728_479_83, 0.212_526_68],
            node: [100.473_909_09, 0.204_691_06],
        },
    ),
    (
        Body::Saturn,
        Elements {
            a: [9.536_675_94, -0.001_250_60],
            e: [0.053_861_79, -0.000_509_91],
            i: [2.485_991_87, 0.001_936_09],
            l: [49.954_244_23, 1_222.493_622_01],
            peri: [92.598_878_31, -0.418_972_16],
            node: [113.662_424_48, -0.288_677_94],
        },
    ),
    (
        Body::Uranus,
        Elements {
            a: [19.189_164_64, -0.001_961_76],
            e: [0.047_257_44, -0.000_043_97],
            i: [0.772_637_83, -0.002_429_39],
            l: [313.238_104_51, 428.482_027_85],
            peri: [170.954_276_30, 0.408_052_81],
            node: [74.016_925_03, 0.042_405_89],
        },
    ),
    (
        Body::Neptune,
        Elements {
            a: [30.069_922_76, 0.000_262_91],
            e: [0.008_590_48, 0.000_051_05],
            i: [1.770_043_47, 0.000_353_72],
            l: [-55.120_029_69, 218.459_453_25],
            peri: [44.964_762_27, -0.322_414_64],
            node: [131.784_225_74, -0.005_086_64],
        },
    ),
    (
        Body::Pluto,
        Elements {
            a: [39.482_116_75, -0.000_315_96],
            e: [0.248_827_30, 0.000_051_70],
            i: [17.140_012_06, 0.000_048_18],
            l: [238.929_038_33, 145.207_805_15],
            peri: [224.068_916_29, -0.040_629_42],
            node: [110.303_936_84, -0.011_834_82],
        },
    ),
];

/// Kilometres per AU, for the lunar distance.
const AU_KM: f64 = 149_597_870.7;
const EARTH_RADIUS_KM: f64 = 6_378.14;

/// Dependency-free analytic ephemeris covering Sun through Pluto and the
/// mean lunar nodes.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticEphemeris;

impl AnalyticEphemeris {
    pub fn new() -> Self {
        Self
    }

    /// Longitude, latitude and distance of a body at a Julian Day.
    pub fn ecliptic_at(&self, body: Body, jd: f64) -> Result<(f64, f64, f64), EphemerisError> {
        let t = (jd - J2000_JD) / DAYS_PER_CENTURY;
        match body {
            Body::Moon => Ok(moon_position(t)),
            Body::NorthNode => Ok((mean_node_longitude(t), 0.0, 0.0)),
            Body::SouthNode => Ok((normalize_deg(mean_node_longitude(t) + 180.0), 0.0, 0.0)),
            Body::Sun => {
                let earth = heliocentric(Body::Sun, &EARTH_MOON_BARYCENTER, t)?;
                Ok(to_ecliptic_of_date([-earth[0], -earth[1], -earth[2]], t))
            }
            planet => {
                let elements = PLANET_ELEMENTS
                    .iter()
                    .find(|(b, _)| *b == planet)
                    .map(|(_, el)| el)
                    .ok_or_else(|| EphemerisError::UnsupportedBody {
                        body: planet,
                        provider: "analytic".to_string(),
                    })?;
                let earth = heliocentric(Body::Sun, &EARTH_MOON_BARYCENTER, t)?;
                let p = heliocentric(planet, elements, t)?;
                Ok(to_ecliptic_of_date(
                    [p[0] - earth[0], p[1] - earth[1], p[2] - earth[2]],
                    t,
                ))
            }
        }
    }
}

impl EphemerisProvider for AnalyticEphemeris {
    fn name(&self) -> &str {
        "analytic"
    }

    fn position_of(&self, body: Body, instant: &Instant) -> Result<BodyPosition, EphemerisError> {
        let jd = instant.julian_day();
        let (longitude, latitude, distance) = self.ecliptic_at(body, jd)?;
        let (before, _, _) = self.ecliptic_at(body, jd - SPEED_STEP_DAYS)?;
        let (after, _, _) = self.ecliptic_at(body, jd + SPEED_STEP_DAYS)?;
        let speed = signed_deg(after - before) / (2.0 * SPEED_STEP_DAYS);

        Ok(BodyPosition {
            longitude,
            latitude,
            distance: (distance > 0.0).then_some(distance),
            speed: Some(speed),
        })
    }
}

/// Heliocentric J2000 ecliptic rectangular coordinates (AU).
fn heliocentric(body: Body, el: &Elements, t: f64) -> Result<[f64; 3], EphemerisError> {
    let at = |v: [f64; 2]| v[0] + v[1] * t;
    let a = at(el.a);
    let e = at(el.e);
    let i = at(el.i).to_radians();
    let l = at(el.l);
    let peri = at(el.peri);
    let node = at(el.node);

    let mean_anomaly = signed_deg(l - peri).to_radians();
    let arg_peri = (peri - node).to_radians();
    let node = node.to_radians();

    let ecc_anomaly = solve_kepler(mean_anomaly, e).ok_or(EphemerisError::KeplerDidNotConverge {
        body,
        eccentricity: e,
    })?;

    let xp = a * (ecc_anomaly.cos() - e);
    let yp = a * (1.0 - e * e).sqrt() * ecc_anomaly.sin();

    let (sw, cw) = arg_peri.sin_cos();
    let (so, co) = node.sin_cos();
    let (si, ci) = i.sin_cos();

    Ok([
        (cw * co - sw * so * ci) * xp + (-sw * co - cw * so * ci) * yp,
        (cw * so + sw * co * ci) * xp + (-sw * so + cw * co * ci) * yp,
        (sw * si) * xp + (cw * si) * yp,
    ])
}

/// Newton iteration for E - e sin E = M (radians).
fn solve_kepler(mean_anomaly: f64, e: f64) -> Option<f64> {
    let mut ecc = mean_anomaly + e * mean_anomaly.sin();
    for _ in 0..KEPLER_MAX_ITERATIONS {
        let delta = (mean_anomaly - (ecc - e * ecc.sin())) / (1.0 - e * ecc.cos());
        ecc += delta;
        if delta.abs() < KEPLER_TOLERANCE {
            return Some(ecc);
        }
    }
    None
}

/// Geocentric J2000 vector -> (longitude of date, latitude, distance).
fn to_ecliptic_of_date(v: [f64; 3], t: f64) -> (f64, f64, f64) {
    let [x, y, z] = v;
    let lon_j2000 = y.atan2(x).to_degrees();
    let lat = z.atan2(x.hypot(y)).to_degrees();
    let dist = (x * x + y * y + z * z).sqrt();
    (normalize_deg(lon_j2000 + general_precession_deg(t)), lat, dist)
}

/// Accumulated general precession in longitude since J2000.
fn general_precession_deg(t: f64) -> f64 {
    1.396_971 * t + 0.000_308_6 * t * t
}

fn moon_position(t: f64) -> (f64, f64, f64) {
    let s = |deg: f64| deg.to_radians().sin();
    let c = |deg: f64| deg.to_radians().cos();

    let lon = 218.32 + 481_267.881 * t
        + 6.29 * s(135.0 + 477_198.87 * t)
        - 1.27 * s(259.3 - 413_335.36 * t)
        + 0.66 * s(235.7 + 890_534.22 * t)
        + 0.21 * s(269.9 + 954_397.74 * t)
        - 0.19 * s(357.5 + 35_999.05 * t)
        - 0.11 * s(186.5 + 966_404.03 * t);

    let lat = 5.13 * s(93.3 + 483_202.02 * t)
        + 0.28 * s(228.2 + 960_400.89 * t)
        - 0.28 * s(318.3 + 6_003.15 * t)
        - 0.17 * s(217.6 - 407_332.21 * t);

    let parallax = 0.9508
        + 0.0518 * c(135.0 + 477_198.87 * t)
        + 0.0095 * c(259.3 - 413_335.36 * t)
        + 0.0078 * c(235.7 + 890_534.22 * t)
        + 0.0028 * c(269.9 + 954_397.74 * t);
    let distance_au = EARTH_RADIUS_KM / parallax.to_radians().sin() / AU_KM;

    (normalize_deg(lon), lat, distance_au)
}

fn mean_node_longitude(t: f64) -> f64 {
    normalize_deg(
        125.044_547_9 - 1_934.136_289_1 * t + 0.002_075_4 * t * t + t * t * t / 467_441.0
            - t * t * t * t / 60_616_000.0,
    )
}
