//! Conversions between UNIX timestamps and textual date formats.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use super::dos::resolve_local;
use super::{exact_relative_description, format, zoned};
use crate::Error;

static MYSQL_DATETIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2}")
        .expect("valid mysql datetime pattern")
});

const MYSQL_ZERO: &str = "0000-00-00 00:00:00";

/// Which part of a MySQL `DATETIME` to render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MysqlKind {
    /// `Y-m-d`
    Date,
    /// `H:i:s`
    Time,
    /// `Y-m-d H:i:s`
    #[default]
    DateTime,
}

impl MysqlKind {
    fn pattern(self) -> &'static str {
        match self {
            MysqlKind::Date => "Y-m-d",
            MysqlKind::Time => "H:i:s",
            MysqlKind::DateTime => "Y-m-d H:i:s",
        }
    }
}

fn invalid(input: impl ToString) -> Error {
    Error::InvalidDate {
        input: input.to_string(),
    }
}

fn utc(unix: i64) -> Result<DateTime<Utc>, Error> {
    zoned(unix, &Utc).ok_or_else(|| invalid(unix))
}

/// Renders a UNIX timestamp as MySQL text in the wall clock of `tz`.
///
/// # Errors
///
/// Returns [`Error::InvalidDate`] if chrono cannot represent the instant.
///
/// ```
/// use request_hygiene::date::{unix_to_mysql, MysqlKind};
/// use chrono::Utc;
///
/// assert_eq!(unix_to_mysql(0, MysqlKind::DateTime, &Utc).unwrap(), "1970-01-01 00:00:00");
/// assert_eq!(unix_to_mysql(3_661, MysqlKind::Time, &Utc).unwrap(), "01:01:01");
/// ```
pub fn unix_to_mysql<Tz: TimeZone>(unix: i64, kind: MysqlKind, tz: &Tz) -> Result<String, Error> {
    let dt = zoned(unix, tz).ok_or_else(|| invalid(unix))?;
    Ok(format(&dt, kind.pattern()))
}

/// Parses `Y-m-d H:i:s` or `Y-m-d` MySQL text as wall-clock time in `tz`.
///
/// # Errors
///
/// Returns [`Error::InvalidDate`] for anything else, including the MySQL
/// zero date.
pub fn mysql_to_unix<Tz: TimeZone>(text: &str, tz: &Tz) -> Result<i64, Error> {
    let text = text.trim();
    let naive = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d").map(|d| d.and_time(chrono::NaiveTime::MIN))
        })
        .map_err(|_| invalid(text))?;

    Ok(resolve_local(tz, &naive).timestamp())
}

/// True if `text` contains a MySQL `DATETIME` and is not the zero date.
///
/// ```
/// use request_hygiene::date::is_mysql_date;
///
/// assert!(is_mysql_date("2024-02-29 13:00:00"));
/// assert!(!is_mysql_date("0000-00-00 00:00:00"));
/// assert!(!is_mysql_date("2024-02-29"));
/// ```
pub fn is_mysql_date(text: &str) -> bool {
    text != MYSQL_ZERO && MYSQL_DATETIME.is_match(text)
}

/// Renders a UNIX timestamp as an ATOM (RFC 3339) string in UTC.
///
/// ```
/// use request_hygiene::date::unix_to_atom;
///
/// assert_eq!(unix_to_atom(1_124_121_121).unwrap(), "2005-08-15T15:52:01+00:00");
/// ```
pub fn unix_to_atom(unix: i64) -> Result<String, Error> {
    Ok(utc(unix)?.to_rfc3339_opts(SecondsFormat::Secs, false))
}

/// Parses an ATOM (RFC 3339) string.
pub fn atom_to_unix(text: &str) -> Result<i64, Error> {
    DateTime::parse_from_rfc3339(text.trim())
        .map(|dt| dt.timestamp())
        .map_err(|_| invalid(text))
}

/// Renders a UNIX timestamp as `Y-m-d\TH:i:s\Z`.
///
/// ```
/// use request_hygiene::date::unix_to_utc;
///
/// assert_eq!(unix_to_utc(86_399).unwrap(), "1970-01-01T23:59:59Z");
/// ```
pub fn unix_to_utc(unix: i64) -> Result<String, Error> {
    Ok(format(&utc(unix)?, "Y-m-d\\TH:i:s\\Z"))
}

/// Reads MySQL text in `tz` and renders it as a UTC `Y-m-d\TH:i:s\Z` string.
pub fn mysql_to_utc<Tz: TimeZone>(text: &str, tz: &Tz) -> Result<String, Error> {
    unix_to_utc(mysql_to_unix(text, tz)?)
}

/// [`exact_relative_description`] for MySQL text read in `now`'s zone.
pub fn mysql_exact_relative_description<Tz: TimeZone>(
    text: &str,
    now: &DateTime<Tz>,
    show_weeks: bool,
    fmt: Option<&str>,
) -> Result<String, Error> {
    let time = mysql_to_unix(text, &now.timezone())?;
    Ok(exact_relative_description(time, now, show_weeks, fmt))
}
