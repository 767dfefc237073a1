//! Packed 32-bit DOS timestamps.
//!
//! Bit layout, most significant first:
//!
//! | bits  | field          |
//! |-------|----------------|
//! | 31-25 | year - 1980    |
//! | 24-21 | month (1-12)   |
//! | 20-16 | day (1-31)     |
//! | 15-11 | hour           |
//! | 10-5  | minute         |
//! | 4-0   | second / 2     |

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone, Timelike};

/// 1980-01-01 00:00:00, returned for every instant before 1980.
pub const DOS_EPOCH: u32 = 1 << 21 | 1 << 16;

/// 2107-12-31 23:59:58, returned for every instant after 2107.
pub const DOS_MAX: u32 = 127 << 25 | 12 << 21 | 31 << 16 | 23 << 11 | 59 << 5 | 29;

/// Packs a UNIX timestamp into a DOS timestamp using the wall clock of `tz`.
///
/// Seconds are truncated to an even value. Years before 1980 saturate to
/// [`DOS_EPOCH`], years after 2107 to [`DOS_MAX`].
///
/// # Examples
///
/// ```
/// use request_hygiene::date::{to_dos_timestamp, DOS_EPOCH};
/// use chrono::Utc;
///
/// // 2000-06-15 12:30:45 UTC
/// assert_eq!(to_dos_timestamp(961_072_245, &Utc), 0x28CF_63D6);
/// assert_eq!(to_dos_timestamp(0, &Utc), DOS_EPOCH);
/// ```
pub fn to_dos_timestamp<Tz: TimeZone>(unix: i64, tz: &Tz) -> u32 {
    let Some(utc) = DateTime::from_timestamp(unix, 0) else {
        return if unix < 0 { DOS_EPOCH } else { DOS_MAX };
    };
    let local = utc.with_timezone(tz);

    let year = local.year();
    if year < 1980 {
        return DOS_EPOCH;
    }
    if year > 2107 {
        return DOS_MAX;
    }

    ((year - 1980) as u32) << 25
        | local.month() << 21
        | local.day() << 16
        | local.hour() << 11
        | local.minute() << 5
        | local.second() >> 1
}

/// Unpacks a DOS timestamp into a UNIX timestamp, reading the fields as
/// wall-clock time in `tz`.
///
/// Out-of-range fields are normalized the way `mktime` does: month 0 is
/// December of the previous year, day 0 is the last day of the previous
/// month, and overflowing hours, minutes and seconds carry over. A wall time
/// that falls into a DST gap is moved forward past the gap; an ambiguous one
/// resolves to the earlier instant.
///
/// # Examples
///
/// ```
/// use request_hygiene::date::{from_dos_timestamp, DOS_EPOCH};
/// use chrono::Utc;
///
/// assert_eq!(from_dos_timestamp(0x28CF_63D6, &Utc), 961_072_244);
/// assert_eq!(from_dos_timestamp(DOS_EPOCH, &Utc), 315_532_800);
/// ```
pub fn from_dos_timestamp<Tz: TimeZone>(dos: u32, tz: &Tz) -> i64 {
    let year = 1980 + (dos >> 25) as i32;
    let month = ((dos >> 21) & 0x0f) as i32;
    let day = ((dos >> 16) & 0x1f) as i64;
    let hour = ((dos >> 11) & 0x1f) as i64;
    let minute = ((dos >> 5) & 0x3f) as i64;
    let second = ((dos << 1) & 0x3e) as i64;

    let naive = normalize(year, month, day, hour * 3600 + minute * 60 + second);
    resolve_local(tz, &naive).timestamp()
}

/// Builds a wall-clock time from possibly out-of-range fields.
pub(crate) fn normalize(year: i32, month: i32, day: i64, seconds: i64) -> NaiveDateTime {
    let months = year * 12 + month - 1;
    let first = NaiveDate::from_ymd_opt(months.div_euclid(12), months.rem_euclid(12) as u32 + 1, 1)
        .unwrap_or(NaiveDate::MIN);

    first.and_time(chrono::NaiveTime::MIN) + Duration::days(day - 1) + Duration::seconds(seconds)
}

/// Maps a wall-clock time in `tz` to an instant.
pub(crate) fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: &NaiveDateTime) -> DateTime<Tz> {
    if let Some(dt) = tz.from_local_datetime(naive).earliest() {
        return dt;
    }
    // Inside a DST gap: shift forward by the usual one-hour gap.
    let shifted = *naive + Duration::hours(1);
    tz.from_local_datetime(&shifted)
        .earliest()
        .unwrap_or_else(|| tz.from_utc_datetime(naive))
}
