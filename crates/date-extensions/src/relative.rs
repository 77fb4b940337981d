//! Relative-time text: "2 days, 3 hours, 15 minutes".
//!
//! A delta in seconds is broken into days, hours and minutes by successive
//! flooring, and the leftover seconds are rounded half-up. Only the magnitude
//! is rendered; callers that want "ago" / "in" phrasing add it from the sign.

use std::fmt;

use serde::Serialize;

const SECONDS_PER_DAY: f64 = 86_400.0;
const SECONDS_PER_HOUR: f64 = 3_600.0;
const SECONDS_PER_MINUTE: f64 = 60.0;

/// A delta's magnitude split into day/hour/minute/second buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Breakdown {
    /// Whole days.
    pub days: u64,
    /// Whole hours after days are removed (0-23).
    pub hours: u64,
    /// Whole minutes after hours are removed (0-59).
    pub minutes: u64,
    /// Remaining seconds, rounded half-up. May be 60 when the remainder is at least 59.5.
    pub seconds: u64,
}

impl Breakdown {
    /// Break down `|delta_seconds|`. Non-finite deltas yield an all-zero breakdown.
    pub fn from_delta(delta_seconds: f64) -> Self {
        if !delta_seconds.is_finite() {
            return Self::default();
        }

        let mut remaining = delta_seconds.abs();
        let days = (remaining / SECONDS_PER_DAY).floor();
        remaining = (remaining - days * SECONDS_PER_DAY).max(0.0);
        let hours = (remaining / SECONDS_PER_HOUR).floor();
        remaining = (remaining - hours * SECONDS_PER_HOUR).max(0.0);
        let minutes = (remaining / SECONDS_PER_MINUTE).floor();
        remaining = (remaining - minutes * SECONDS_PER_MINUTE).max(0.0);

        Self {
            days: days as u64,
            hours: hours as u64,
            minutes: minutes as u64,
            seconds: remaining.round() as u64,
        }
    }

    /// True when every bucket is zero.
    pub fn is_now(&self) -> bool {
        *self == Self::default()
    }

    /// English text for this breakdown, e.g. `"1 hour, 20 minutes"`, or `"now"`.
    ///
    /// Zero buckets are skipped; a value of 1 takes the singular unit.
    pub fn render(&self) -> String {
        if self.is_now() {
            return "now".to_string();
        }

        let mut parts = Vec::new();
        if self.days > 0 {
            parts.push(unit(self.days, "day"));
        }
        if self.hours > 0 {
            parts.push(unit(self.hours, "hour"));
        }
        if self.minutes > 0 {
            parts.push(unit(self.minutes, "minute"));
        }
        if self.seconds > 0 {
            parts.push(unit(self.seconds, "second"));
        }
        parts.join(", ")
    }
}

impl fmt::Display for Breakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Render a delta in seconds as relative-time text.
pub fn text_diff(delta_seconds: f64) -> String {
    Breakdown::from_delta(delta_seconds).render()
}

fn unit(value: u64, name: &str) -> String {
    format!("{} {}{}", value, name, if value == 1 { "" } else { "s" })
}

// ── Tests ───────────────────────────────────────────────────────────────────
