//! Date and time conversions.
//!
//! Everything here is a pure function of its arguments, with one exception:
//! [`timezone_offset`] remembers each zone pair it has computed.
//!
//! Zone-aware functions take any [`chrono::TimeZone`]: pass `&Utc`, a
//! `FixedOffset`, a `chrono_tz::Tz`, or `&Local` for the host zone.
//!
//! # Example
//!
//! ```
//! use request_hygiene::date::{from_dos_timestamp, timespan_string, to_dos_timestamp, TimeUnit};
//! use chrono_tz::Europe::Skopje;
//!
//! let t = 1_700_000_000;
//! let dos = to_dos_timestamp(t, &Skopje);
//! assert_eq!(from_dos_timestamp(dos, &Skopje), t);
//!
//! let text = timespan_string(0, 3_725, &[TimeUnit::Hours, TimeUnit::Minutes, TimeUnit::Seconds]);
//! assert_eq!(text, "1 hour, 2 minutes and 5 seconds");
//! ```

use chrono::{DateTime, TimeZone};

mod convert;
mod dos;
mod format;
mod offset;
mod relative;
mod select;
mod timespan;

pub use convert::{
    atom_to_unix, is_mysql_date, mysql_exact_relative_description, mysql_to_unix, mysql_to_utc,
    unix_to_atom, unix_to_mysql, unix_to_utc, MysqlKind,
};
pub use dos::{from_dos_timestamp, to_dos_timestamp, DOS_EPOCH, DOS_MAX};
pub use format::format;
pub use offset::{format_offset, offset_at, parse_timezone, timezone_labels, timezone_offset};
pub use relative::{
    apple_relative_description, exact_relative_description, relative_description,
    DEFAULT_EXACT_FORMAT,
};
pub use select::{adjust, ampm, days, hours, minutes, months, seconds, years, years_around};
pub use timespan::{parse_units, timespan, timespan_string, TimeUnit, Timespan, UnknownUnit};

/// The instant `unix` seen from `tz`, if chrono can represent it.
pub(crate) fn zoned<Tz: TimeZone>(unix: i64, tz: &Tz) -> Option<DateTime<Tz>> {
    DateTime::from_timestamp(unix, 0).map(|utc| utc.with_timezone(tz))
}
