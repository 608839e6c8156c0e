//! Turning a birth record (name, civil date and time, place name) into the
//! instant and position a chart is computed for.
//!
//! Place and timezone lookups are external services; callers pass in their
//! own implementations.

use chrono::{NaiveDate, NaiveDateTime};

use crate::ephemeris::GeoPosition;
use crate::error::ChartError;
use crate::output::Subject;
use crate::time::{self, Instant};

/// Resolves a place name to coordinates.
pub trait Geocoder {
    fn geocode(&self, place: &str) -> Option<GeoPosition>;
}

/// Resolves coordinates to an IANA timezone name.
pub trait TimezoneLookup {
    fn timezone_at(&self, geo: &GeoPosition) -> Option<String>;
}

/// Resolves the UTC offset in effect in a timezone at a local civil time.
pub trait OffsetLookup {
    fn utc_offset_minutes(&self, timezone: &str, local: NaiveDateTime) -> Option<i32>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct BirthRequest {
    pub name: String,
    pub date: NaiveDate,
    /// Clock time, `HH:MM` or `HH:MM:SS`
    pub time: String,
    pub place: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedBirth {
    pub subject: Subject,
    pub instant: Instant,
    pub geo: GeoPosition,
}

/// Geocode the place, find its timezone and the offset at the birth time,
/// then resolve the instant. Every failure ends the request.
pub fn resolve_birth(
    request: &BirthRequest,
    geocoder: &dyn Geocoder,
    timezones: &dyn TimezoneLookup,
    offsets: &dyn OffsetLookup,
) -> Result<ResolvedBirth, ChartError> {
    let geo = geocoder
        .geocode(&request.place)
        .ok_or_else(|| ChartError::GeoResolutionFailed {
            place: request.place.clone(),
        })?;
    log::debug!(
        "{} -> ({:.4}, {:.4})",
        request.place,
        geo.latitude(),
        geo.longitude()
    );

    let timezone = timezones
        .timezone_at(&geo)
        .ok_or_else(|| ChartError::TimezoneResolutionFailed {
            message: format!(
                "no timezone at ({}, {})",
                geo.latitude(),
                geo.longitude()
            ),
        })?;

    let clock = time::parse_clock_time(&request.time)?;
    let local = request.date.and_time(clock);
    let offset = offsets
        .utc_offset_minutes(&timezone, local)
        .ok_or_else(|| ChartError::TimezoneResolutionFailed {
            message: format!("no UTC offset for {} at {}", timezone, local),
        })?;
    log::debug!("{} at {} is UTC{:+} min", timezone, local, offset);

    let instant = time::resolve_naive(local, offset)?;
    Ok(ResolvedBirth {
        subject: Subject {
            name: request.name.clone(),
            place: request.place.clone(),
            timezone,
        },
        instant,
        geo,
    })
}
