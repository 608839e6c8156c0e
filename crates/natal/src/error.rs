use crate::points::Body;
use thiserror::Error;

/// A body the ephemeris provider could not resolve, with the provider's reason.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyFailure {
    pub body: Body,
    pub message: String,
}

/// Errors that terminate a chart computation request
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("Invalid time input: {0}")]
    InvalidTimeInput(String),
    #[error("Invalid geographic position: latitude {latitude}, longitude {longitude}")]
    InvalidGeoPosition { latitude: f64, longitude: f64 },
    #[error("Could not resolve coordinates for place: {place}")]
    GeoResolutionFailed { place: String },
    #[error("Could not resolve timezone: {message}")]
    TimezoneResolutionFailed { message: String },
    #[error("Unsupported house system: {system}. Valid systems: {valid:?}")]
    HouseSystemUnsupported { system: String, valid: Vec<String> },
    #[error("{system} house cusps are degenerate: {reason}")]
    HouseSystemDegenerate { system: String, reason: String },
    #[error("Chart is incomplete, failed to resolve {}", describe_failures(.failures))]
    IncompleteChart { failures: Vec<BodyFailure> },
}

fn describe_failures(failures: &[BodyFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("{} ({})", f.body.name(), f.message))
        .collect::<Vec<_>>()
        .join(", ")
}
