//! Time context resolution.
//!
//! Turns a civil (date, clock time, UTC offset) triple into a single
//! [`Instant`] carrying the local civil view, the UTC view and the continuous
//! Julian Day used by ephemeris and house computations. The Julian Day follows
//! the proleptic Gregorian, leap-second-free day count: seconds since the Unix
//! epoch divided by 86400, shifted by the epoch's Julian Day.

use chrono::{
    DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Timelike, Utc,
};
use regex::Regex;

use crate::error::ChartError;

/// Largest accepted UTC offset magnitude, in minutes (18:00).
pub const MAX_OFFSET_MINUTES: i32 = 18 * 60;

/// Julian Day of the J2000.0 epoch (2000-01-01 12:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// Julian Day of 1970-01-01 00:00 UTC.
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

const SECONDS_PER_DAY: f64 = 86_400.0;
const DAYS_PER_CENTURY: f64 = 36_525.0;

lazy_static::lazy_static! {
    static ref OFFSET_RE: Regex = Regex::new(r"^([+-])(\d{1,2}):?(\d{2})$").unwrap();
}

/// An unambiguous moment, with the civil offset it was given in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Instant {
    local: DateTime<FixedOffset>,
    julian_day: f64,
}

impl Instant {
    fn from_local(local: DateTime<FixedOffset>) -> Self {
        let utc = local.with_timezone(&Utc);
        let seconds =
            utc.timestamp() as f64 + f64::from(utc.timestamp_subsec_nanos()) * 1e-9;
        Self {
            local,
            julian_day: UNIX_EPOCH_JD + seconds / SECONDS_PER_DAY,
        }
    }

    /// Local civil date and time, with its offset.
    pub fn local(&self) -> DateTime<FixedOffset> {
        self.local
    }

    pub fn utc(&self) -> DateTime<Utc> {
        self.local.with_timezone(&Utc)
    }

    /// Offset of the local view east of UTC, in minutes.
    pub fn offset_minutes(&self) -> i32 {
        self.local.offset().local_minus_utc() / 60
    }

    /// Julian Day (UT) of this instant.
    pub fn julian_day(&self) -> f64 {
        self.julian_day
    }

    /// Julian centuries elapsed since J2000.0.
    pub fn julian_centuries(&self) -> f64 {
        (self.julian_day - J2000_JD) / DAYS_PER_CENTURY
    }

    /// The same moment viewed from another UTC offset.
    pub fn with_offset(&self, offset_minutes: i32) -> Result<Instant, ChartError> {
        let offset = fixed_offset(offset_minutes)?;
        Ok(Self::from_local(self.local.with_timezone(&offset)))
    }

    /// The same moment viewed at offset 00:00.
    pub fn to_utc(&self) -> Instant {
        Self::from_local(self.local.with_timezone(&Utc.fix()))
    }
}

/// Resolve a civil date, clock time (`HH:MM` or `HH:MM:SS`) and UTC offset
/// into an [`Instant`].
pub fn resolve(date: NaiveDate, time: &str, utc_offset_minutes: i32) -> Result<Instant, ChartError> {
    let clock = parse_clock_time(time)?;
    resolve_naive(date.and_time(clock), utc_offset_minutes)
}

/// Resolve an already-parsed local date-time with a UTC offset.
pub fn resolve_naive(local: NaiveDateTime, utc_offset_minutes: i32) -> Result<Instant, ChartError> {
    let offset = fixed_offset(utc_offset_minutes)?;
    let local = offset.from_local_datetime(&local).single().ok_or_else(|| {
        ChartError::InvalidTimeInput(format!("{} is not representable at offset {}", local, offset))
    })?;
    Ok(Instant::from_local(local))
}

/// Express an instant in UTC.
pub fn to_utc(instant: &Instant) -> Instant {
    instant.to_utc()
}

/// Parse a 24-hour clock time.
pub fn parse_clock_time(time: &str) -> Result<NaiveTime, ChartError> {
    let trimmed = time.trim();
    let invalid =
        || ChartError::InvalidTimeInput(format!("time must be HH:MM or HH:MM:SS, got '{}'", time));
    let clock = NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| invalid())?;
    // chrono encodes a :60 leap second as nanoseconds past 1e9
    if clock.nanosecond() >= 1_000_000_000 {
        return Err(invalid());
    }
    Ok(clock)
}

/// Parse a calendar date written `YYYY-MM-DD` or `YYYY/MM/DD`.
pub fn parse_date(date: &str) -> Result<NaiveDate, ChartError> {
    let trimmed = date.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y/%m/%d"))
        .map_err(|_| {
            ChartError::InvalidTimeInput(format!("date must be YYYY-MM-DD, got '{}'", date))
        })
}

/// Parse a UTC offset such as `+09:00`, `-0530`, `Z` or `UTC` into minutes.
pub fn parse_utc_offset(offset: &str) -> Result<i32, ChartError> {
    let trimmed = offset.trim();
    if trimmed.eq_ignore_ascii_case("z") || trimmed.eq_ignore_ascii_case("utc") {
        return Ok(0);
    }
    let caps = OFFSET_RE.captures(trimmed).ok_or_else(|| {
        ChartError::InvalidTimeInput(format!("offset must look like +09:00, got '{}'", offset))
    })?;
    let hours: i32 = caps[2].parse().map_err(|_| invalid_offset(offset))?;
    let minutes: i32 = caps[3].parse().map_err(|_| invalid_offset(offset))?;
    if minutes >= 60 {
        return Err(invalid_offset(offset));
    }
    let total = hours * 60 + minutes;
    let signed = if &caps[1] == "-" { -total } else { total };
    fixed_offset(signed)?;
    Ok(signed)
}

fn invalid_offset(offset: &str) -> ChartError {
    ChartError::InvalidTimeInput(format!("invalid UTC offset '{}'", offset))
}

fn fixed_offset(minutes: i32) -> Result<FixedOffset, ChartError> {
    if minutes.abs() > MAX_OFFSET_MINUTES {
        return Err(ChartError::InvalidTimeInput(format!(
            "UTC offset of {} minutes is outside ±18:00",
            minutes
        )));
    }
    FixedOffset::east_opt(minutes * 60)
        .ok_or_else(|| ChartError::InvalidTimeInput(format!("invalid UTC offset of {} minutes", minutes)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn j2000_noon_utc() {
        let instant = resolve(date(2000, 1, 1), "12:00", 0).unwrap();
        assert_eq!(instant.julian_day(), J2000_JD);
        assert_eq!(instant.julian_centuries(), 0.0);
    }

    #[test]
    fn tokyo_midnight_is_previous_day_in_utc() {
        let instant = resolve(date(1990, 1, 1), "00:00", 9 * 60).unwrap();
        assert_eq!(instant.julian_day(), 2_447_892.125);
        let utc = instant.utc();
        assert_eq!(utc.naive_utc().date(), date(1989, 12, 31));
        assert_eq!(utc.hour(), 15);
        assert_eq!(instant.offset_minutes(), 540);
    }

    #[test]
    fn resolve_is_deterministic() {
        let a = resolve(date(1985, 7, 13), "18:42:07", -300).unwrap();
        let b = resolve(date(1985, 7, 13), "18:42:07", -300).unwrap();
        assert_eq!(a.julian_day().to_bits(), b.julian_day().to_bits());
        assert_eq!(a, b);
    }

    #[test]
    fn same_moment_from_different_offsets() {
        let tokyo = resolve(date(1990, 1, 1), "00:00", 540).unwrap();
        let london = resolve(date(1989, 12, 31), "15:00", 0).unwrap();
        assert_eq!(tokyo.julian_day(), london.julian_day());
        assert_eq!(tokyo.to_utc().local(), london.local());
        assert_eq!(to_utc(&tokyo).offset_minutes(), 0);
    }

    #[test]
    fn with_offset_keeps_the_moment() {
        let instant = resolve(date(2001, 3, 4), "05:06", 60).unwrap();
        let shifted = instant.with_offset(-480).unwrap();
        assert_eq!(shifted.julian_day(), instant.julian_day());
        assert_eq!(shifted.offset_minutes(), -480);
        assert!(instant.with_offset(19 * 60).is_err());
    }

    #[test]
    fn rejects_malformed_time() {
        for bad in ["", "25:00", "12", "12:60", "noon", "24:00", "23:59:60", "12:30:60"] {
            let err = resolve(date(2000, 1, 1), bad, 0).unwrap_err();
            assert!(matches!(err, ChartError::InvalidTimeInput(_)), "{bad}");
        }
    }

    #[test]
    fn rejects_out_of_range_offset() {
        assert!(matches!(
            resolve(date(2000, 1, 1), "10:00", 18 * 60 + 1),
            Err(ChartError::InvalidTimeInput(_))
        ));
        assert!(resolve(date(2000, 1, 1), "10:00", -18 * 60).is_ok());
    }

    #[test]
    fn parses_offsets() {
        assert_eq!(parse_utc_offset("+09:00").unwrap(), 540);
        assert_eq!(parse_utc_offset("-0530").unwrap(), -330);
        assert_eq!(parse_utc_offset("+5:45").unwrap(), 345);
        assert_eq!(parse_utc_offset("Z").unwrap(), 0);
        assert_eq!(parse_utc_offset("UTC").unwrap(), 0);
        assert!(parse_utc_offset("+19:00").is_err());
        assert!(parse_utc_offset("+09:75").is_err());
        assert!(parse_utc_offset("nine").is_err());
    }

    #[test]
    fn parses_dates_in_both_layouts() {
        assert_eq!(parse_date("1990-01-01").unwrap(), date(1990, 1, 1));
        assert_eq!(parse_date("1990/01/01").unwrap(), date(1990, 1, 1));
        assert!(parse_date("1990-02-30").is_err());
    }
}
