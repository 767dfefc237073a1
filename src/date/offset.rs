//! Timezone offsets between named zones.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use once_cell::sync::Lazy;

use crate::Error;

static OFFSETS: Lazy<RwLock<HashMap<(String, String), i32>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Parses an IANA zone name.
pub fn parse_timezone(name: &str) -> Result<Tz, Error> {
    name.parse::<Tz>().map_err(|_| Error::UnknownTimezone {
        name: name.to_string(),
    })
}

/// Returns how many seconds `remote` is ahead of `local`.
///
/// The first call for a pair computes the offset at the current instant;
/// later calls return the remembered value for the rest of the process.
///
/// # Errors
///
/// Returns [`Error::UnknownTimezone`] if either name is not an IANA zone.
///
/// # Examples
///
/// ```
/// use request_hygiene::date::timezone_offset;
///
/// assert_eq!(timezone_offset("Asia/Kolkata", "UTC").unwrap(), 19_800);
/// assert!(timezone_offset("Mars/Olympus", "UTC").is_err());
/// ```
pub fn timezone_offset(remote: &str, local: &str) -> Result<i32, Error> {
    let key = (remote.to_string(), local.to_string());
    if let Some(offset) = OFFSETS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&key)
    {
        return Ok(*offset);
    }

    let offset = offset_at(&parse_timezone(remote)?, &parse_timezone(local)?, Utc::now());
    tracing::debug!(remote, local, offset, "computed timezone offset");

    Ok(*OFFSETS
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .entry(key)
        .or_insert(offset))
}

/// Seconds `remote` is ahead of `local` at instant `at`.
pub fn offset_at<R: TimeZone, L: TimeZone>(remote: &R, local: &L, at: DateTime<Utc>) -> i32 {
    utc_offset(remote, at) - utc_offset(local, at)
}

fn utc_offset<Z: TimeZone>(tz: &Z, at: DateTime<Utc>) -> i32 {
    at.with_timezone(tz).offset().fix().local_minus_utc()
}

/// Renders an offset in seconds as `+H:MM` / `-H:MM`, or `0:00` for zero.
///
/// ```
/// use request_hygiene::date::format_offset;
///
/// assert_eq!(format_offset(10_800), "+3:00");
/// assert_eq!(format_offset(-16_200), "-4:30");
/// assert_eq!(format_offset(0), "0:00");
/// ```
pub fn format_offset(seconds: i32) -> String {
    let minutes = seconds / 60;
    let sign = match minutes.signum() {
        1 => "+",
        -1 => "-",
        _ => "",
    };
    let abs = minutes.unsigned_abs();
    format!("{sign}{}:{:02}", abs / 60, abs % 60)
}

/// Builds select-list labels for the given zones: `(zone, "(GMT-5:00) America/New York")`.
///
/// Offsets are taken against UTC at the current instant.
///
/// # Errors
///
/// Returns [`Error::UnknownTimezone`] for the first unknown name.
pub fn timezone_labels<S: AsRef<str>>(zones: &[S]) -> Result<Vec<(String, String)>, Error> {
    let now = Utc::now();
    zones
        .iter()
        .map(|zone| {
            let zone = zone.as_ref();
            let offset = offset_at(&parse_timezone(zone)?, &Utc, now);
            Ok((
                zone.to_string(),
                format!("(GMT{}) {}", format_offset(offset), zone.replace('_', " ")),
            ))
        })
        .collect()
}
