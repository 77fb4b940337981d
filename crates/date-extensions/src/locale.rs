//! Month names for common locales.
//!
//! Names follow the CLDR stand-alone forms (the form used when a month is
//! rendered on its own). Only the language subtag selects a table: `en-US`,
//! `en-GB` and `en` all resolve to English. Unknown languages fall back to
//! English.

use tracing::debug;

/// Locale used when nothing else matches.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Wide and abbreviated month names, January first.
#[derive(Debug)]
pub struct MonthNames {
    /// Language subtag this table serves.
    pub language: &'static str,
    pub long: [&'static str; 12],
    pub short: [&'static str; 12],
}

impl MonthNames {
    /// Wide name for a 1-based month.
    pub fn long(&self, month: u32) -> &'static str {
        self.long[month_index(month)]
    }

    /// Abbreviated name for a 1-based month.
    pub fn short(&self, month: u32) -> &'static str {
        self.short[month_index(month)]
    }
}

fn month_index(month: u32) -> usize {
    (month.clamp(1, 12) - 1) as usize
}

static ENGLISH: MonthNames = MonthNames {
    language: "en",
    long: [
        "January", "February", "March", "April", "May", "June", "July", "August",
        "September", "October", "November", "December",
    ],
    short: [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ],
};

static GERMAN: MonthNames = MonthNames {
    language: "de",
    long: [
        "Januar", "Februar", "März", "April", "Mai", "Juni", "Juli", "August",
        "September", "Oktober", "November", "Dezember",
    ],
    short: [
        "Jan", "Feb", "Mär", "Apr", "Mai", "Jun", "Jul", "Aug", "Sep", "Okt", "Nov", "Dez",
    ],
};

static FRENCH: MonthNames = MonthNames {
    language: "fr",
    long: [
        "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août",
        "septembre", "octobre", "novembre", "décembre",
    ],
    short: [
        "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.",
        "nov.", "déc.",
    ],
};

static SPANISH: MonthNames = MonthNames {
    language: "es",
    long: [
        "enero", "febrero", "marzo", "abril", "mayo", "junio", "julio", "agosto",
        "septiembre", "octubre", "noviembre", "diciembre",
    ],
    short: [
        "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
    ],
};

static ITALIAN: MonthNames = MonthNames {
    language: "it",
    long: [
        "gennaio", "febbraio", "marzo", "aprile", "maggio", "giugno", "luglio", "agosto",
        "settembre", "ottobre", "novembre", "dicembre",
    ],
    short: [
        "gen", "feb", "mar", "apr", "mag", "giu", "lug", "ago", "set", "ott", "nov", "dic",
    ],
};

static PORTUGUESE: MonthNames = MonthNames {
    language: "pt",
    long: [
        "janeiro", "fevereiro", "março", "abril", "maio", "junho", "julho", "agosto",
        "setembro", "outubro", "novembro", "dezembro",
    ],
    short: [
        "jan.", "fev.", "mar.", "abr.", "mai.", "jun.", "jul.", "ago.", "set.", "out.",
        "nov.", "dez.",
    ],
};

static DUTCH: MonthNames = MonthNames {
    language: "nl",
    long: [
        "januari", "februari", "maart", "april", "mei", "juni", "juli", "augustus",
        "september", "oktober", "november", "december",
    ],
    short: [
        "jan", "feb", "mrt", "apr", "mei", "jun", "jul", "aug", "sep", "okt", "nov", "dec",
    ],
};

static JAPANESE: MonthNames = MonthNames {
    language: "ja",
    long: [
        "1月", "2月", "3月", "4月", "5月", "6月", "7月", "8月", "9月", "10月", "11月", "12月",
    ],
    short: [
        "1月", "2月", "3月", "4月", "5月", "6月", "7月", "8月", "9月", "10月", "11月", "12月",
    ],
};

static TABLES: &[&MonthNames] = &[
    &ENGLISH,
    &GERMAN,
    &FRENCH,
    &SPANISH,
    &ITALIAN,
    &PORTUGUESE,
    &DUTCH,
    &JAPANESE,
];

/// Month names for a single locale tag, if its language is known.
pub fn month_names(locale: &str) -> Option<&'static MonthNames> {
    let language = locale
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    TABLES.iter().copied().find(|t| t.language == language)
}

/// Month names for the first supported tag in `locales`, else English.
pub fn resolve<S: AsRef<str>>(locales: &[S]) -> &'static MonthNames {
    locales
        .iter()
        .find_map(|l| month_names(l.as_ref()))
        .unwrap_or_else(|| {
            debug!("no supported locale requested, using {}", DEFAULT_LOCALE);
            &ENGLISH
        })
}

/// Turn a POSIX locale value (`en_US.UTF-8`, `de_DE@euro`) into a BCP 47 tag.
///
/// Returns `None` for empty values and the `C` / `POSIX` locales.
pub fn from_posix(value: &str) -> Option<String> {
    let name = value
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .trim();
    if name.is_empty() || name == "C" || name == "POSIX" {
        return None;
    }
    Some(name.replace('_', "-"))
}

// ── Tests ───────────────────────────────────────────────────────────────────
