//! Default zone and locale for formatting and string parsing.
//!
//! Nothing in this crate reads the host timezone or locale implicitly. A
//! [`DateConfig`] is built once (from the host with [`DateConfig::system`], or
//! pinned with [`DateConfig::utc`]) and passed to the operations that need it.

use crate::error::Result;
use crate::locale::{self, DEFAULT_LOCALE};
use crate::zone::Zone;

/// Environment variables consulted for the host locale, in priority order.
const LOCALE_ENV_VARS: [&str; 3] = ["LC_ALL", "LC_TIME", "LANG"];

/// The zone and locale preferences used when rendering or parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct DateConfig {
    /// Zone whose wall clock is rendered and in which offset-less strings are read.
    pub zone: Zone,
    /// Locale tags in preference order (e.g., `["fr-CA", "en-US"]`).
    pub locales: Vec<String>,
}

impl DateConfig {
    /// UTC with `en-US` month names.
    pub fn utc() -> Self {
        Self {
            zone: Zone::Utc,
            locales: vec![DEFAULT_LOCALE.to_string()],
        }
    }

    /// The host's timezone and locale.
    ///
    /// The zone comes from the OS (falling back to UTC); the locale from the
    /// first set of `LC_ALL`, `LC_TIME`, `LANG` (falling back to `en-US`).
    pub fn system() -> Self {
        Self {
            zone: Zone::system(),
            locales: vec![system_locale()],
        }
    }

    pub fn with_zone(mut self, zone: Zone) -> Self {
        self.zone = zone;
        self
    }

    /// Replace the zone with an IANA zone looked up by name.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DateError::InvalidTimezone`] for an unknown name.
    pub fn with_zone_name(self, name: &str) -> Result<Self> {
        Ok(self.with_zone(Zone::named(name)?))
    }

    /// Replace the locale list with a single tag.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locales = vec![locale.into()];
        self
    }

    /// Replace the locale list.
    pub fn with_locales<I, S>(mut self, locales: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.locales = locales.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for DateConfig {
    fn default() -> Self {
        Self::utc()
    }
}

fn system_locale() -> String {
    LOCALE_ENV_VARS
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|value| locale::from_posix(&value))
        .unwrap_or_else(|| DEFAULT_LOCALE.to_string())
}

// ── Tests ───────────────────────────────────────────────────────────────────
