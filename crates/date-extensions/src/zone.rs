//! Timezones and wall-clock projection.
//!
//! A [`Zone`] turns an [`Instant`] into the wall-clock fields a person in
//! that zone would read, and back. Offsets are reported in minutes using the
//! platform convention `UTC − local`: zones ahead of UTC are **negative**,
//! zones behind UTC are **positive**. [`iso_offset_string`] flips the sign
//! back for `±HH:MM` display.
//!
//! Projection reads structured fields from `chrono-tz` instead of rendering
//! and re-parsing a locale string, so it is locale-independent and keeps
//! sub-second precision.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::{debug, warn};

use crate::error::{DateError, Result};
use crate::instant::Instant;

/// The zone used to project an instant onto wall-clock fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Zone {
    /// Coordinated Universal Time.
    #[default]
    Utc,
    /// A fixed offset with no DST rules (e.g., a mocked host offset).
    Fixed(FixedOffset),
    /// An IANA timezone (e.g., `America/New_York`), DST-aware.
    Named(Tz),
}

impl Zone {
    /// Look up an IANA timezone by name.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::InvalidTimezone`] if the name is not in the IANA database.
    pub fn named(name: &str) -> Result<Self> {
        parse_timezone(name).map(Zone::Named)
    }

    /// Build a fixed zone from a raw offset in minutes (`UTC − local`).
    ///
    /// `Zone::from_raw_offset_minutes(360)` is UTC-06:00.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::OutOfRange`] if the offset is a day or more.
    pub fn from_raw_offset_minutes(minutes: i32) -> Result<Self> {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::west_opt)
            .map(Zone::Fixed)
            .ok_or_else(|| DateError::OutOfRange(format!("offset of {minutes} minutes")))
    }

    /// The host's configured zone, or UTC if it cannot be determined.
    pub fn system() -> Self {
        match iana_time_zone::get_timezone() {
            Ok(name) => match parse_timezone(&name) {
                Ok(tz) => {
                    debug!(zone = %name, "resolved system timezone");
                    Zone::Named(tz)
                }
                Err(_) => {
                    warn!(zone = %name, "system timezone not in IANA database, using UTC");
                    Zone::Utc
                }
            },
            Err(e) => {
                warn!(error = %e, "cannot determine system timezone, using UTC");
                Zone::Utc
            }
        }
    }

    /// Wall-clock fields of `instant` as read in this zone.
    pub fn project(&self, instant: &Instant) -> NaiveDateTime {
        let utc = instant.as_datetime();
        match self {
            Zone::Utc => utc.naive_utc(),
            Zone::Fixed(offset) => utc.with_timezone(offset).naive_local(),
            Zone::Named(tz) => utc.with_timezone(tz).naive_local(),
        }
    }

    /// Offset in minutes between UTC and this zone at `instant` (`UTC − local`).
    ///
    /// Computed fresh for every instant: DST makes the answer date-dependent.
    pub fn raw_offset_minutes(&self, instant: &Instant) -> i32 {
        let utc_wall = instant.as_datetime().naive_utc();
        let zone_wall = self.project(instant);
        ((utc_wall - zone_wall).num_seconds() / 60) as i32
    }

    /// ISO-style `±HH:MM` offset of this zone at `instant`.
    pub fn iso_offset(&self, instant: &Instant) -> String {
        iso_offset_string(self.raw_offset_minutes(instant))
    }

    /// Interpret wall-clock fields in this zone.
    ///
    /// An ambiguous local time (DST fall-back) resolves to the earlier instant.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::InvalidDatetime`] for a local time skipped by a DST gap.
    pub fn from_local(&self, wall: &NaiveDateTime) -> Result<DateTime<Utc>> {
        let resolved = match self {
            Zone::Utc => Some(Utc.from_utc_datetime(wall)),
            Zone::Fixed(offset) => offset
                .from_local_datetime(wall)
                .single()
                .map(|dt| dt.with_timezone(&Utc)),
            Zone::Named(tz) => tz
                .from_local_datetime(wall)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
        };
        resolved.ok_or_else(|| {
            DateError::InvalidDatetime(format!("'{wall}' does not exist in {self}"))
        })
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::Utc => f.write_str("UTC"),
            Zone::Fixed(offset) => write!(f, "{offset}"),
            Zone::Named(tz) => f.write_str(tz.name()),
        }
    }
}

impl FromStr for Zone {
    type Err = DateError;

    /// Accepts an IANA name or an ISO offset such as `+05:30`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.starts_with('+') || s.starts_with('-') {
            return s
                .parse::<FixedOffset>()
                .map(Zone::Fixed)
                .map_err(|_| DateError::InvalidTimezone(format!("'{s}'")));
        }
        Zone::named(s)
    }
}

/// Render a raw offset (`UTC − local`, minutes) as `±HH:MM`.
///
/// Non-positive raw minutes render `+`, positive render `-`.
pub fn iso_offset_string(raw_minutes: i32) -> String {
    let sign = if raw_minutes <= 0 { '+' } else { '-' };
    let abs = raw_minutes.unsigned_abs();
    format!("{sign}{:02}:{:02}", abs / 60, abs % 60)
}

/// Parse an IANA timezone string into `Tz`.
pub(crate) fn parse_timezone(s: &str) -> Result<Tz> {
    s.parse::<Tz>()
        .map_err(|_| DateError::InvalidTimezone(format!("'{}'", s)))
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> Instant {
        Instant::from_datetime(DateTime::parse_from_rfc3339(s).unwrap())
    }

    #[test]
    fn test_raw_offset_behind_utc_is_positive() {
        let ny = Zone::named("America/New_York").unwrap();
        // April 2022 is EDT (UTC-4)
        assert_eq!(ny.raw_offset_minutes(&utc("2022-04-18T14:30:00Z")), 240);
    }

    #[test]
    fn test_raw_offset_ahead_of_utc_is_negative() {
        let tokyo = Zone::named("Asia/Tokyo").unwrap();
        assert_eq!(tokyo.raw_offset_minutes(&utc("2022-04-18T14:30:00Z")), -540);
    }

    #[test]
    fn test_raw_offset_follows_dst() {
        let ny = Zone::named("America/New_York").unwrap();
        assert_eq!(ny.raw_offset_minutes(&utc("2022-01-15T12:00:00Z")), 300);
        assert_eq!(ny.raw_offset_minutes(&utc("2022-07-15T12:00:00Z")), 240);
    }

    #[test]
    fn test_raw_offset_half_hour_zone() {
        let kolkata = Zone::named("Asia/Kolkata").unwrap();
        assert_eq!(kolkata.raw_offset_minutes(&utc("2022-04-18T00:00:00Z")), -330);
    }

    #[test]
    fn test_utc_offset_is_zero() {
        assert_eq!(Zone::Utc.raw_offset_minutes(&utc("2022-04-18T14:30:00Z")), 0);
    }

    #[test]
    fn test_iso_offset_string_inverts_sign() {
        assert_eq!(iso_offset_string(360), "-06:00");
        assert_eq!(iso_offset_string(-600), "+10:00");
        assert_eq!(iso_offset_string(0), "+00:00");
        assert_eq!(iso_offset_string(-330), "+05:30");
    }

    #[test]
    fn test_from_raw_offset_minutes() {
        let zone = Zone::from_raw_offset_minutes(360).unwrap();
        let instant = utc("2022-04-18T20:30:00Z");
        assert_eq!(zone.raw_offset_minutes(&instant), 360);
        assert_eq!(zone.project(&instant).to_string(), "2022-04-18 14:30:00");
    }

    #[test]
    fn test_from_raw_offset_rejects_full_day() {
        assert!(Zone::from_raw_offset_minutes(24 * 60).is_err());
    }

    #[test]
    fn test_project_named_zone() {
        let ny = Zone::named("America/New_York").unwrap();
        let wall = ny.project(&utc("2022-04-18T14:30:00.250Z"));
        assert_eq!(wall.to_string(), "2022-04-18 10:30:00.250");
    }

    #[test]
    fn test_from_local_round_trips_projection() {
        let ny = Zone::named("America/New_York").unwrap();
        let instant = utc("2022-04-18T14:30:00Z");
        let wall = ny.project(&instant);
        assert_eq!(ny.from_local(&wall).unwrap(), instant.as_datetime());
    }

    #[test]
    fn test_from_local_dst_gap_is_error() {
        // March 13 2022: 02:30 does not exist in New York
        let ny = Zone::named("America/New_York").unwrap();
        let wall = chrono::NaiveDate::from_ymd_opt(2022, 3, 13)
            .unwrap()
            .and_hms_opt(2, 30, 0)
            .unwrap();
        let err = ny.from_local(&wall).unwrap_err();
        assert!(matches!(err, DateError::InvalidDatetime(_)));
    }

    #[test]
    fn test_invalid_zone_name() {
        let err = Zone::named("Invalid/Zone").unwrap_err();
        assert!(err.to_string().contains("Invalid timezone"), "got: {err}");
    }

    #[test]
    fn test_zone_from_str() {
        assert_eq!(
            "Europe/Paris".parse::<Zone>().unwrap().to_string(),
            "Europe/Paris"
        );
        let fixed: Zone = "+05:30".parse().unwrap();
        assert_eq!(fixed.raw_offset_minutes(&utc("2022-04-18T00:00:00Z")), -330);
        assert!("+99:99".parse::<Zone>().is_err());
    }
}
