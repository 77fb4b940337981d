//! Token-based date formatting.
//!
//! A pattern is scanned left to right. Every run of ASCII letters is cut into
//! tokens of at most two letters (`"MMMM"` is `MM` + `MM`, `"DDD"` is `DD` +
//! `D`); every other character is copied through unchanged. Tokens are
//! rendered from the instant's wall-clock fields in the configured zone.
//!
//! | Token | Output |
//! |-------|--------|
//! | `Y` / `YY` | last two digits of the year / full year |
//! | `M` / `MM` | month 1-12 / zero-padded |
//! | `b` / `B` | abbreviated / wide month name (locale) |
//! | `D` / `DD` | day of month / zero-padded |
//! | `w` | day of week, 0 (Sunday) to 6 |
//! | `W` | ISO-8601 week number |
//! | `H` / `HH` | hour 0-23 / zero-padded |
//! | `h` / `hh` | hour 1-12 / zero-padded |
//! | `a` / `A` | `am`/`pm` / `AM`/`PM` |
//! | `m` / `mm` | minute / zero-padded |
//! | `s` / `ss` | second / zero-padded |
//! | `S` | millisecond, unpadded |
//! | `SS` | **second**, zero-padded to three digits |
//! | `z` | raw offset in minutes (`UTC − local`) |
//! | `Z` | `±HH:MM` offset |
//! | `X` | Unix timestamp in whole seconds |
//!
//! Any other one- or two-letter token renders as the empty string.

use std::fmt::Write;

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta, Timelike};
use tracing::trace;

use crate::config::DateConfig;
use crate::instant::Instant;
use crate::locale::{self, MonthNames};
use crate::zone::iso_offset_string;

/// Wall-clock view of an instant in one zone, shared by every token.
struct Fields {
    wall: NaiveDateTime,
    raw_offset: i32,
    unix_seconds: i64,
    months: &'static MonthNames,
}

/// Render `instant` through `pattern` using the zone and locales of `config`.
///
/// # Examples
///
/// ```
/// use date_extensions::{DateConfig, Instant};
///
/// let instant: Instant = "2022-04-18T14:30:00Z".parse().unwrap();
/// let config = DateConfig::utc().with_zone_name("America/New_York").unwrap();
/// assert_eq!(instant.format("YY-MM-DD hh:mm A Z", &config), "2022-04-18 10:30 AM -04:00");
/// ```
pub fn format_instant(instant: &Instant, pattern: &str, config: &DateConfig) -> String {
    let fields = Fields {
        wall: config.zone.project(instant),
        raw_offset: config.zone.raw_offset_minutes(instant),
        unix_seconds: instant.unix_millis().div_euclid(1000),
        months: locale::resolve(&config.locales),
    };

    let mut out = String::with_capacity(pattern.len() * 2);
    let mut rest = pattern;
    while let Some(c) = rest.chars().next() {
        if c.is_ascii_alphabetic() {
            let len = rest
                .bytes()
                .take(2)
                .take_while(u8::is_ascii_alphabetic)
                .count();
            let (token, tail) = rest.split_at(len);
            render_token(token, &fields, &mut out);
            rest = tail;
        } else {
            out.push(c);
            rest = &rest[c.len_utf8()..];
        }
    }
    out
}

fn render_token(token: &str, f: &Fields, out: &mut String) {
    let wall = &f.wall;
    // Writing to a String cannot fail.
    let _ = match token {
        "Y" => {
            let year = wall.year().to_string();
            out.write_str(&year[year.len().saturating_sub(2)..])
        }
        "YY" => write!(out, "{}", wall.year()),
        "M" => write!(out, "{}", wall.month()),
        "MM" => write!(out, "{:02}", wall.month()),
        "b" => out.write_str(f.months.short(wall.month())),
        "B" => out.write_str(f.months.long(wall.month())),
        "D" => write!(out, "{}", wall.day()),
        "DD" => write!(out, "{:02}", wall.day()),
        "w" => write!(out, "{}", wall.weekday().num_days_from_sunday()),
        "W" => write!(out, "{}", iso_week_number(wall.date())),
        "H" => write!(out, "{}", wall.hour()),
        "HH" => write!(out, "{:02}", wall.hour()),
        "h" => write!(out, "{}", hour12(wall.hour())),
        "hh" => write!(out, "{:02}", hour12(wall.hour())),
        "a" => out.write_str(if wall.hour() < 12 { "am" } else { "pm" }),
        "A" => out.write_str(if wall.hour() < 12 { "AM" } else { "PM" }),
        "m" => write!(out, "{}", wall.minute()),
        "mm" => write!(out, "{:02}", wall.minute()),
        "s" => write!(out, "{}", wall.second()),
        "ss" => write!(out, "{:02}", wall.second()),
        "S" => write!(out, "{}", wall.nanosecond() / 1_000_000),
        // Reads seconds, not milliseconds.
        "SS" => write!(out, "{:03}", wall.second()),
        "z" => write!(out, "{}", f.raw_offset),
        "Z" => out.write_str(&iso_offset_string(f.raw_offset)),
        "X" => write!(out, "{}", f.unix_seconds),
        _ => {
            trace!(token, "dropping unknown format token");
            Ok(())
        }
    };
}

fn hour12(hour: u32) -> u32 {
    match hour % 12 {
        0 => 12,
        h => h,
    }
}

/// ISO-8601 week number (1-53) of a calendar date.
///
/// The date is moved to the Thursday of its Monday-based week; the week
/// number is that Thursday's day-of-year divided by seven, rounded up.
pub fn iso_week_number(date: NaiveDate) -> u32 {
    // Sunday counts as day 7.
    let iso_weekday = i64::from(date.weekday().number_from_monday());
    match date.checked_add_signed(TimeDelta::days(4 - iso_weekday)) {
        Some(thursday) => thursday.ordinal().div_ceil(7),
        None => date.iso_week().week(),
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zone::Zone;

    /// Instant whose wall clock in a fixed zone of `raw_offset` minutes reads `wall`.
    fn local(wall: &str, raw_offset: i32) -> (Instant, DateConfig) {
        let zone = Zone::from_raw_offset_minutes(raw_offset).unwrap();
        let instant = Instant::parse_in(wall, &zone).unwrap();
        (instant, DateConfig::utc().with_zone(zone))
    }

    fn fmt(wall: &str, pattern: &str) -> String {
        let (instant, config) = local(wall, 0);
        instant.format(pattern, &config)
    }

    #[test]
    fn test_full_padded_pattern() {
        assert_eq!(
            fmt("04-18-2022 14:30:00", "YY-MM-DD HH:mm:ss"),
            "2022-04-18 14:30:00"
        );
    }

    #[test]
    fn test_unpadded_pattern() {
        assert_eq!(fmt("04-18-2022 04:03:00", "Y-M-D H:m:s"), "22-4-18 4:3:0");
    }

    #[test]
    fn test_milliseconds_token() {
        assert_eq!(
            fmt("04-08-2022 14:30:00", "YY-MM-D HH:mm:ss.S"),
            "2022-04-8 14:30:00.0"
        );
        assert_eq!(fmt("2022-04-08 14:30:00.042", "S"), "42");
    }

    #[test]
    fn test_double_s_reads_seconds() {
        assert_eq!(
            fmt("04-08-2022 14:30:00", "YY-MM-D HH:mm:ss.SS"),
            "2022-04-8 14:30:00.000"
        );
        assert_eq!(fmt("2022-04-08 14:30:07.042", "SS"), "007");
    }

    #[test]
    fn test_compact_pattern() {
        assert_eq!(fmt("04-18-2022 14:30:00", "YYMMDDHHmmss"), "20220418143000");
    }

    #[test]
    fn test_long_runs_split_into_pairs() {
        assert_eq!(
            fmt("04-8-2022 14:30:00", "YY-MMMM-DDD HH:mm:ss"),
            "2022-0404-088 14:30:00"
        );
    }

    #[test]
    fn test_raw_offset_token() {
        let (instant, config) = local("04-18-2022 14:30:00", 360);
        assert_eq!(
            instant.format("YY-MM-DD HH:mm:ss z", &config),
            "2022-04-18 14:30:00 360"
        );
    }

    #[test]
    fn test_iso_offset_behind_utc() {
        let (instant, config) = local("04-18-2022 14:30:00", 360);
        assert_eq!(
            instant.format("YY-MM-DD HH:mm:ss Z", &config),
            "2022-04-18 14:30:00 -06:00"
        );
        let (instant, config) = local("2022-04-18 14:30:00", 600);
        assert_eq!(
            instant.format("YY-MM-DD HH:mm:ss Z", &config),
            "2022-04-18 14:30:00 -10:00"
        );
    }

    #[test]
    fn test_iso_offset_ahead_of_utc() {
        let (instant, config) = local("2022-04-18 14:30:00", -600);
        assert_eq!(
            instant.format("YY-MM-DD HH:mm:ss Z", &config),
            "2022-04-18 14:30:00 +10:00"
        );
    }

    #[test]
    fn test_unknown_tokens_are_dropped() {
        let (instant, config) = local("2022-04-18 14:30:00", 240);
        assert_eq!(
            instant.format("YY-MM-DD aaHH:mm:ss Z", &config),
            "2022-04-18 14:30:00 -04:00"
        );
        assert_eq!(fmt("2022-04-18 14:30:00", "Qq"), "");
        assert_eq!(fmt("2022-04-18 14:30:00", "[Qq]"), "[]");
    }

    #[test]
    fn test_twelve_hour_clock_pm() {
        assert_eq!(
            fmt("2022-04-18 14:30:00", "YY-MM-DD h:mm:ss a"),
            "2022-04-18 2:30:00 pm"
        );
        assert_eq!(
            fmt("2022-04-18 14:30:00", "YY-MM-DD hh:mm:ss A"),
            "2022-04-18 02:30:00 PM"
        );
    }

    #[test]
    fn test_twelve_hour_clock_am() {
        assert_eq!(
            fmt("2022-04-18 03:10:00", "YY-MM-DD h:mm:ss a"),
            "2022-04-18 3:10:00 am"
        );
        assert_eq!(
            fmt("2022-04-18 03:10:00", "YY-MM-DD hh:mm:ss A"),
            "2022-04-18 03:10:00 AM"
        );
    }

    #[test]
    fn test_midnight_and_noon_on_twelve_hour_clock() {
        assert_eq!(fmt("2022-04-18 00:05:00", "h:mm a"), "12:05 am");
        assert_eq!(fmt("2022-04-18 12:05:00", "hh:mm A"), "12:05 PM");
    }

    #[test]
    fn test_month_names_en_us() {
        let (instant, config) = local("2022-04-18 18:30:00", 0);
        let config = config.with_locale("en-US");
        assert_eq!(instant.format("b", &config), "Apr");
        assert_eq!(instant.format("B", &config), "April");
    }

    #[test]
    fn test_month_names_follow_locale_list() {
        let (instant, config) = local("2022-03-18 18:30:00", 0);
        let config = config.with_locales(["xx-XX", "de-DE"]);
        assert_eq!(instant.format("D. B YY", &config), "18. März 2022");
    }

    #[test]
    fn test_iso_week_token() {
        assert_eq!(fmt("2022-07-31 18:30:00", "W"), "30");
        assert_eq!(fmt("2022-08-1 18:30:00", "W"), "31");
    }

    #[test]
    fn test_day_of_week_token() {
        // July 31 2022 is a Sunday
        assert_eq!(fmt("2022-07-31 18:30:00", "w"), "0");
        assert_eq!(fmt("2022-08-06 18:30:00", "w"), "6");
    }

    #[test]
    fn test_unix_timestamp_token() {
        let instant: Instant = "2022-04-18 14:30:00.999 +02:00".parse().unwrap();
        assert_eq!(instant.format("X", &DateConfig::utc()), "1650285000");
        let before_epoch: Instant = "1969-12-31T23:59:59.500Z".parse().unwrap();
        assert_eq!(before_epoch.format("X", &DateConfig::utc()), "-1");
    }

    #[test]
    fn test_two_digit_year_keeps_leading_zero() {
        assert_eq!(fmt("2005-01-02 00:00:00", "Y"), "05");
    }

    #[test]
    fn test_named_zone_projection() {
        let instant: Instant = "2022-04-18T14:30:00Z".parse().unwrap();
        let config = DateConfig::utc().with_zone_name("Asia/Tokyo").unwrap();
        assert_eq!(
            instant.format("YY-MM-DD HH:mm Z z", &config),
            "2022-04-18 23:30 +09:00 -540"
        );
    }

    #[test]
    fn test_non_letters_pass_through() {
        assert_eq!(fmt("2022-04-18 14:30:00", "[DD] é 12/H"), "[18] é 12/14");
    }

    #[test]
    fn test_iso_week_year_boundaries() {
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
        // Jan 1 2021 (Friday) belongs to week 53 of 2020
        assert_eq!(iso_week_number(d(2021, 1, 1)), 53);
        // Dec 29 2025 (Monday) starts week 1 of 2026
        assert_eq!(iso_week_number(d(2025, 12, 29)), 1);
        assert_eq!(iso_week_number(d(2022, 1, 3)), 1);
    }
}
