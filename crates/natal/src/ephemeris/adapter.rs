use crate::ephemeris::types::{BodyPosition, EphemerisError};
use crate::ephemeris::EphemerisProvider;
use crate::math::normalize_deg;
use crate::points::Body;
use crate::time::Instant;
use std::env;
use std::path::PathBuf;
use swisseph::swe::calc_ut;

// Swiss Ephemeris planet codes: SUN=0 .. PLUTO=9, MEAN_NODE=10
const PLANET_IDS: &[(Body, u32)] = &[
    (Body::Sun, 0),
    (Body::Moon, 1),
    (Body::Mercury, 2),
    (Body::Venus, 3),
    (Body::Mars, 4),
    (Body::Jupiter, 5),
    (Body::Saturn, 6),
    (Body::Uranus, 7),
    (Body::Neptune, 8),
    (Body::Pluto, 9),
    (Body::NorthNode, 10),
];

// FLG_SWIEPH (2) | FLG_SPEED (256)
const CALC_FLAGS: u32 = 2 | 256;

/// Ephemeris provider backed by the Swiss Ephemeris data files
pub struct SwissEphemerisAdapter {
    ephemeris_path: PathBuf,
}

impl SwissEphemerisAdapter {
    /// Create a new adapter with optional ephemeris path
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self, EphemerisError> {
        let path = ephemeris_path.unwrap_or_else(|| {
            env::var("SWISS_EPHEMERIS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/usr/local/share/swisseph"))
        });

        if !path.exists() {
            return Err(EphemerisError::FileNotFound {
                path: path.display().to_string(),
                message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
            });
        }

        log::info!("Swiss Ephemeris data at {}", path.display());
        Ok(Self { ephemeris_path: path })
    }

    pub fn ephemeris_path(&self) -> &PathBuf {
        &self.ephemeris_path
    }

    fn calc(&self, body: Body, jd: f64) -> Result<BodyPosition, EphemerisError> {
        let code = PLANET_IDS
            .iter()
            .find(|(b, _)| *b == body)
            .map(|(_, code)| *code)
            .ok_or_else(|| EphemerisError::UnsupportedBody {
                body,
                provider: self.name().to_string(),
            })?;

        let result = calc_ut(jd, code, CALC_FLAGS).map_err(|e| EphemerisError::CalculationFailed {
            body,
            julian_day: jd,
            message: format!("Swiss Ephemeris error: {}", e),
        })?;

        let out = result.out;
        Ok(BodyPosition {
            longitude: normalize_deg(out[0]),
            latitude: out[1],
            distance: Some(out[2]),
            speed: Some(out[3]),
        })
    }
}

impl EphemerisProvider for SwissEphemerisAdapter {
    fn name(&self) -> &str {
        "swisseph"
    }

    fn position_of(&self, body: Body, instant: &Instant) -> Result<BodyPosition, EphemerisError> {
        let jd = instant.julian_day();
        if body == Body::SouthNode {
            let north = self.calc(Body::NorthNode, jd)?;
            return Ok(BodyPosition {
                longitude: normalize_deg(north.longitude + 180.0),
                latitude: -north.latitude,
                distance: north.distance,
                speed: north.speed,
            });
        }
        self.calc(body, jd)
    }
}
