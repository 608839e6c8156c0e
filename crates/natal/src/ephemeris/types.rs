use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ChartError;
use crate::points::Body;

/// Geographic position of the observer.
///
/// Latitude is north-positive in [-90, 90], longitude east-positive in
/// [-180, 180]. Construction validates both.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GeoLocation", into = "GeoLocation")]
pub struct GeoPosition {
    latitude: f64,
    longitude: f64,
}

impl GeoPosition {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ChartError> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        if !valid {
            return Err(ChartError::InvalidGeoPosition { latitude, longitude });
        }
        Ok(Self { latitude, longitude })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Plain wire shape of a [`GeoPosition`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
}

impl TryFrom<GeoLocation> for GeoPosition {
    type Error = ChartError;

    fn try_from(loc: GeoLocation) -> Result<Self, Self::Error> {
        GeoPosition::new(loc.lat, loc.lon)
    }
}

impl From<GeoPosition> for GeoLocation {
    fn from(pos: GeoPosition) -> Self {
        GeoLocation { lat: pos.latitude, lon: pos.longitude }
    }
}

/// Geocentric ecliptic position of a body, equinox of date
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    /// Longitude in degrees (0-360)
    pub longitude: f64,
    /// Latitude in degrees
    pub latitude: f64,
    /// Distance from Earth in AU, when the provider knows it
    pub distance: Option<f64>,
    /// Speed in longitude (degrees per day)
    pub speed: Option<f64>,
}

impl BodyPosition {
    /// Negative speed in longitude; unknown when the provider gives no speed.
    pub fn is_retrograde(&self) -> Option<bool> {
        self.speed.map(|s| s < 0.0)
    }
}

/// Errors an ephemeris provider can report for a single body
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("{body} is not supported by the {provider} ephemeris")]
    UnsupportedBody { body: Body, provider: String },
    #[error("Failed to calculate position for {body} at JD {julian_day}: {message}")]
    CalculationFailed {
        body: Body,
        julian_day: f64,
        message: String,
    },
    #[error("Kepler's equation did not converge for {body} (e = {eccentricity})")]
    KeplerDidNotConverge { body: Body, eccentricity: f64 },
}
