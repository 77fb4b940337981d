//! The [`Instant`] value type.
//!
//! An `Instant` is a point in time with millisecond precision, stored in UTC.
//! Arithmetic on it ([`Instant::diff_from`], [`Instant::add_seconds`]) never
//! consults a timezone; zones only matter when the instant is rendered
//! ([`Instant::format`]) or when an offset is requested
//! ([`Instant::get_timezone_offset_from`]).
//!
//! # Operations
//!
//! - [`Instant::diff_from`] — Signed delta in fractional seconds
//! - [`Instant::text_diff_from`] — English relative-time text ("1 hour, 20 minutes")
//! - [`Instant::add_seconds`] — In-place, chainable shift by fractional seconds
//! - [`Instant::to_unix_timestamp`] — Seconds since the Unix epoch
//! - [`Instant::get_timezone_offset_from`] — Offset in minutes to an IANA zone
//! - [`Instant::format`] — Token-based rendering (see [`crate::format`])

use std::fmt;
use std::str::FromStr;

use chrono::{
    DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, SubsecRound,
    TimeDelta, TimeZone, Utc,
};
use tracing::debug;

use crate::config::DateConfig;
use crate::error::{DateError, Result};
use crate::format::format_instant;
use crate::relative::Breakdown;
use crate::zone::Zone;

/// A point in time with millisecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant {
    utc: DateTime<Utc>,
}

impl Instant {
    /// The current instant, read from the system clock.
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Wrap a chrono datetime, truncating below the millisecond.
    pub fn from_datetime<T: TimeZone>(dt: DateTime<T>) -> Self {
        Self {
            utc: dt.with_timezone(&Utc).trunc_subsecs(3),
        }
    }

    /// The instant `millis` milliseconds after the Unix epoch.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::OutOfRange`] if the value is outside chrono's range.
    pub fn from_unix_millis(millis: i64) -> Result<Self> {
        DateTime::from_timestamp_millis(millis)
            .map(|utc| Self { utc })
            .ok_or_else(|| DateError::OutOfRange(format!("{millis} ms since epoch")))
    }

    /// Milliseconds since the Unix epoch.
    pub fn unix_millis(&self) -> i64 {
        self.utc.timestamp_millis()
    }

    /// The instant as a chrono UTC datetime.
    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.utc
    }

    /// Parse a datetime string, reading offset-less input as wall-clock time in `zone`.
    ///
    /// Accepted shapes:
    ///
    /// - RFC 3339 (`2022-04-18T14:30:00.000Z`, `2022-04-18T14:30:00+02:00`)
    /// - `YYYY-MM-DD HH:MM[:SS[.fff]]` (space or `T` separator)
    /// - `MM-DD-YYYY HH:MM[:SS[.fff]]` and `MM/DD/YYYY HH:MM[:SS[.fff]]`
    /// - a bare date in any of the orders above (midnight)
    ///
    /// Any non-RFC 3339 shape may end with ` GMT`, ` UTC`, ` Z`, ` ±HH:MM` or
    /// ` ±HHMM`. Single-digit month, day and hour fields are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::InvalidDatetime`] if no shape matches, or if the
    /// wall-clock time does not exist in `zone`.
    pub fn parse_in(s: &str, zone: &Zone) -> Result<Self> {
        let trimmed = s.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Self::from_datetime(dt));
        }

        let (body, offset) = split_offset_suffix(trimmed);
        let wall = parse_naive(body)
            .ok_or_else(|| DateError::InvalidDatetime(format!("cannot parse '{}'", s)))?;

        let utc = match offset {
            Some(offset) => offset
                .from_local_datetime(&wall)
                .single()
                .map(|dt| dt.with_timezone(&Utc))
                .ok_or_else(|| DateError::InvalidDatetime(format!("'{}': out of range", s)))?,
            None => zone.from_local(&wall)?,
        };
        Ok(Self::from_datetime(utc))
    }

    /// `self - reference`, in seconds.
    ///
    /// Antisymmetric: `a.diff_from(&b) == -b.diff_from(&a)`.
    pub fn diff_from(&self, reference: &Instant) -> f64 {
        (self.unix_millis() - reference.unix_millis()) as f64 / 1e3
    }

    /// `self - now`, in seconds.
    pub fn diff_from_now(&self) -> f64 {
        self.diff_from(&Instant::now())
    }

    /// `self - reference`, in seconds, where `reference` is a datetime string.
    ///
    /// Offset-less strings are read in the configured zone.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::InvalidDatetime`] if `reference` cannot be parsed.
    pub fn diff_from_str(&self, reference: &str, config: &DateConfig) -> Result<f64> {
        let reference = Instant::parse_in(reference, &config.zone)?;
        Ok(self.diff_from(&reference))
    }

    /// The distance to `reference` as English text, e.g. `"1 hour, 40 minutes, 5 seconds"`.
    ///
    /// Renders the magnitude only; identical instants render `"now"`.
    pub fn text_diff_from(&self, reference: &Instant) -> String {
        Breakdown::from_delta(self.diff_from(reference)).render()
    }

    /// Shift this instant by `seconds` (fractional, signed) and return it for chaining.
    ///
    /// The shift is rounded to whole milliseconds.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::OutOfRange`] if `seconds` is not finite or the
    /// result leaves chrono's representable range. The instant is left
    /// unchanged on error.
    ///
    /// # Examples
    ///
    /// ```
    /// use date_extensions::Instant;
    ///
    /// let mut instant = Instant::from_unix_millis(0).unwrap();
    /// instant.add_seconds(3600.0).unwrap().add_seconds(1.5).unwrap();
    /// assert_eq!(instant.to_string(), "1970-01-01T01:00:01.500Z");
    /// ```
    pub fn add_seconds(&mut self, seconds: f64) -> Result<&mut Self> {
        let millis = (seconds * 1e3).round();
        if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
            return Err(DateError::OutOfRange(format!("cannot add {seconds} seconds")));
        }
        let utc = TimeDelta::try_milliseconds(millis as i64)
            .and_then(|delta| self.utc.checked_add_signed(delta))
            .ok_or_else(|| {
                DateError::OutOfRange(format!("{} + {seconds} seconds", self))
            })?;
        self.utc = utc;
        Ok(self)
    }

    /// Seconds since the Unix epoch, with millisecond precision.
    pub fn to_unix_timestamp(&self) -> f64 {
        self.unix_millis() as f64 / 1e3
    }

    /// Offset in minutes between UTC and the named IANA zone at this instant.
    ///
    /// Uses the platform convention `UTC − local`: zones ahead of UTC give a
    /// negative number.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::InvalidTimezone`] for a name outside the IANA database.
    ///
    /// # Examples
    ///
    /// ```
    /// use date_extensions::Instant;
    ///
    /// let instant: Instant = "2022-04-18T14:30:00Z".parse().unwrap();
    /// assert_eq!(instant.get_timezone_offset_from("America/New_York").unwrap(), 240);
    /// assert_eq!(instant.get_timezone_offset_from("Asia/Tokyo").unwrap(), -540);
    /// ```
    pub fn get_timezone_offset_from(&self, zone_name: &str) -> Result<i32> {
        Ok(Zone::named(zone_name)?.raw_offset_minutes(self))
    }

    /// Render this instant through a token pattern.
    ///
    /// Fields are read in `config.zone`; month names come from `config.locales`.
    /// See [`crate::format`] for the token table.
    pub fn format(&self, pattern: &str, config: &DateConfig) -> String {
        format_instant(self, pattern, config)
    }
}

impl fmt::Display for Instant {
    /// RFC 3339 in UTC with milliseconds, e.g. `2022-04-18T12:30:00.000Z`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.utc.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

impl FromStr for Instant {
    type Err = DateError;

    /// Parse with [`Instant::parse_in`], reading offset-less input as UTC.
    fn from_str(s: &str) -> Result<Self> {
        Instant::parse_in(s, &Zone::Utc)
    }
}

impl<T: TimeZone> From<DateTime<T>> for Instant {
    fn from(dt: DateTime<T>) -> Self {
        Instant::from_datetime(dt)
    }
}

// ── Parsing helpers ─────────────────────────────────────────────────────────

const YEAR_FIRST_DATETIME: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
];

const YEAR_FIRST_DATE: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

const MONTH_FIRST_DATETIME: &[&str] = &[
    "%m-%d-%Y %H:%M:%S%.f",
    "%m-%d-%Y %H:%M",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
];

const MONTH_FIRST_DATE: &[&str] = &["%m-%d-%Y", "%m/%d/%Y"];

/// Split a trailing ` GMT` / ` UTC` / ` Z` / ` ±HH:MM` / ` ±HHMM` designator.
fn split_offset_suffix(s: &str) -> (&str, Option<FixedOffset>) {
    if let Some((body, last)) = s.rsplit_once(char::is_whitespace) {
        if let Some(offset) = parse_offset_token(last) {
            return (body.trim_end(), Some(offset));
        }
    }
    (s, None)
}

fn parse_offset_token(token: &str) -> Option<FixedOffset> {
    if matches!(token.to_ascii_uppercase().as_str(), "GMT" | "UTC" | "Z") {
        return FixedOffset::east_opt(0);
    }

    let (sign, rest) = match token.as_bytes().first()? {
        b'+' => (1, &token[1..]),
        b'-' => (-1, &token[1..]),
        _ => return None,
    };
    let digits: String = match rest.split_once(':') {
        Some((h, m)) if h.len() == 2 && m.len() == 2 => format!("{h}{m}"),
        Some(_) => return None,
        None => rest.to_string(),
    };
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    if minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Parse wall-clock fields, choosing year-first or month-first layouts by the
/// width of the leading number.
fn parse_naive(s: &str) -> Option<NaiveDateTime> {
    let leading_digits = s.bytes().take_while(u8::is_ascii_digit).count();
    let (datetime_formats, date_formats) = if leading_digits > 2 {
        (YEAR_FIRST_DATETIME, YEAR_FIRST_DATE)
    } else {
        (MONTH_FIRST_DATETIME, MONTH_FIRST_DATE)
    };

    for fmt in datetime_formats {
        if let Ok(wall) = NaiveDateTime::parse_from_str(s, fmt) {
            debug!(input = s, layout = *fmt, "parsed datetime");
            return Some(wall);
        }
    }
    for fmt in date_formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            debug!(input = s, layout = *fmt, "parsed date");
            return Some(date.and_time(NaiveTime::MIN));
        }
    }
    None
}

// ── Tests ───────────────────────────────────────────────────────────────────
