//! # date-extensions
//!
//! Small, deterministic date/time operations on a millisecond-precision
//! [`Instant`].
//!
//! Every operation takes its inputs explicitly: the default timezone and
//! locale live in a [`DateConfig`] value rather than in process-wide state,
//! so results are reproducible in tests regardless of the host settings.
//!
//! ## Modules
//!
//! - [`instant`] — The `Instant` value type: deltas, `add_seconds`, Unix timestamps, parsing
//! - [`relative`] — Day/hour/minute/second breakdown and English relative-time text
//! - [`zone`] — UTC, fixed-offset and IANA zones; wall-clock projection and offsets
//! - [`format`] — Token-based formatter and ISO-8601 week numbers
//! - [`locale`] — Month names for common locales
//! - [`config`] — Explicit default zone and locale
//! - [`error`] — Error types

pub mod config;
pub mod error;
pub mod format;
pub mod instant;
pub mod locale;
pub mod relative;
pub mod zone;

pub use config::DateConfig;
pub use error::{DateError, Result};
pub use format::iso_week_number;
pub use instant::Instant;
pub use relative::Breakdown;
pub use zone::Zone;
