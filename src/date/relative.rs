//! Human-oriented descriptions of past instants.

use chrono::{DateTime, TimeZone};

use super::{format, zoned};

/// Default format for [`exact_relative_description`] past four weeks.
pub const DEFAULT_EXACT_FORMAT: &str = "\\o\\n F j, Y";

/// Describes `time` relative to `now`, comparing calendar days in `now`'s zone.
///
/// Returns `Today, hh:mm am`, `Yesterday, hh:mm pm`, or `time` rendered with
/// `fmt` (see [`format`]). A timestamp chrono cannot represent is returned
/// as its decimal value.
///
/// # Examples
///
/// ```
/// use request_hygiene::date::relative_description;
/// use chrono::{TimeZone, Utc};
///
/// let now = Utc.with_ymd_and_hms(2024, 5, 10, 18, 0, 0).unwrap();
/// let morning = Utc.with_ymd_and_hms(2024, 5, 10, 9, 5, 0).unwrap().timestamp();
///
/// assert_eq!(relative_description(morning, &now, "Y-m-d"), "Today, 09:05 am");
/// ```
pub fn relative_description<Tz: TimeZone>(time: i64, now: &DateTime<Tz>, fmt: &str) -> String {
    let Some(dt) = zoned(time, &now.timezone()) else {
        return time.to_string();
    };

    match day_distance(&dt, now) {
        Some(0) => format!("Today, {}", format(&dt, "h:i a")),
        Some(1) => format!("Yesterday, {}", format(&dt, "h:i a")),
        _ => format(&dt, fmt),
    }
}

/// Describes `time` the way mail clients label messages.
///
/// Today gives the clock time (`g:i a`), yesterday gives `Yesterday`, the
/// last seven days give the weekday name, anything older gives `M j`.
///
/// ```
/// use request_hygiene::date::apple_relative_description;
/// use chrono::{TimeZone, Utc};
///
/// let now = Utc.with_ymd_and_hms(2024, 5, 10, 18, 0, 0).unwrap();
/// let tuesday = Utc.with_ymd_and_hms(2024, 5, 7, 9, 0, 0).unwrap().timestamp();
///
/// assert_eq!(apple_relative_description(tuesday, &now), "Tuesday");
/// ```
pub fn apple_relative_description<Tz: TimeZone>(time: i64, now: &DateTime<Tz>) -> String {
    let Some(dt) = zoned(time, &now.timezone()) else {
        return time.to_string();
    };

    match day_distance(&dt, now) {
        Some(0) => format(&dt, "g:i a"),
        Some(1) => "Yesterday".to_string(),
        _ if now.timestamp() - time <= 604_800 => format(&dt, "l"),
        _ => format(&dt, "M j"),
    }
}

/// Describes how long ago `time` was, in the largest fitting unit.
///
/// The difference is rounded half away from zero at each step: seconds under
/// a minute, then minutes, hours (under 24), days (under 7) and, when
/// `show_weeks` is set, weeks (under 4). Anything older is rendered with
/// `fmt`, defaulting to [`DEFAULT_EXACT_FORMAT`].
///
/// ```
/// use request_hygiene::date::exact_relative_description;
/// use chrono::{TimeZone, Utc};
///
/// let now = Utc.with_ymd_and_hms(2024, 5, 10, 18, 0, 0).unwrap();
/// let t = now.timestamp();
///
/// assert_eq!(exact_relative_description(t - 1, &now, true, None), "1 second ago");
/// assert_eq!(exact_relative_description(t - 90, &now, true, None), "2 minutes ago");
/// assert_eq!(exact_relative_description(t - 86_400 * 40, &now, true, None), "on March 31, 2024");
/// ```
pub fn exact_relative_description<Tz: TimeZone>(
    time: i64,
    now: &DateTime<Tz>,
    show_weeks: bool,
    fmt: Option<&str>,
) -> String {
    let Some(diff) = now.timestamp().checked_sub(time) else {
        return time.to_string();
    };
    if diff < 60 {
        return ago(diff, "second");
    }

    let minutes = (diff as f64 / 60.0).round();
    if minutes < 60.0 {
        return ago(minutes as i64, "minute");
    }

    let hours = (minutes / 60.0).round();
    if hours < 24.0 {
        return ago(hours as i64, "hour");
    }

    let days = (hours / 24.0).round();
    if days < 7.0 {
        return ago(days as i64, "day");
    }

    let weeks = (days / 7.0).round();
    if weeks < 4.0 && show_weeks {
        return ago(weeks as i64, "week");
    }

    let fmt = fmt.unwrap_or(DEFAULT_EXACT_FORMAT);
    match zoned(time, &now.timezone()) {
        Some(dt) => format(&dt, fmt),
        None => time.to_string(),
    }
}

fn ago(amount: i64, unit: &str) -> String {
    if amount == 1 {
        format!("{amount} {unit} ago")
    } else {
        format!("{amount} {unit}s ago")
    }
}

/// Calendar days from `dt` to `now`, when `dt` is today or yesterday.
fn day_distance<Tz: TimeZone>(dt: &DateTime<Tz>, now: &DateTime<Tz>) -> Option<u8> {
    let day = dt.date_naive();
    let today = now.date_naive();
    if day == today {
        Some(0)
    } else if today.pred_opt() == Some(day) {
        Some(1)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 18, 0, 0).unwrap()
    }

    fn at(d: u32, h: u32, m: u32) -> i64 {
        Utc.with_ymd_and_hms(2024, 5, d, h, m, 0).unwrap().timestamp()
    }

    #[test]
    fn yesterday_and_older() {
        assert_eq!(relative_description(at(9, 23, 59), &now(), "M j"), "Yesterday, 11:59 pm");
        assert_eq!(relative_description(at(8, 12, 0), &now(), "M j"), "May 8");
    }

    #[test]
    fn calendar_day_is_taken_in_now_zone() {
        let tz = FixedOffset::west_opt(8 * 3600).unwrap();
        let now = now().with_timezone(&tz); // 10:00 local on May 10
        // 02:00 UTC May 10 is 18:00 May 9 local.
        assert_eq!(relative_description(at(10, 2, 0), &now, "M j"), "Yesterday, 06:00 pm");
    }

    #[test]
    fn apple_labels() {
        assert_eq!(apple_relative_description(at(10, 14, 7), &now()), "2:07 pm");
        assert_eq!(apple_relative_description(at(9, 1, 0), &now()), "Yesterday");
        assert_eq!(apple_relative_description(at(3, 18, 0), &now()), "Friday");
        assert_eq!(apple_relative_description(at(3, 17, 59), &now()), "May 3");
    }

    #[test]
    fn exact_units_round_at_each_step() {
        let t = now().timestamp();

        assert_eq!(exact_relative_description(t, &now(), true, None), "0 seconds ago");
        assert_eq!(exact_relative_description(t - 59, &now(), true, None), "59 seconds ago");
        assert_eq!(exact_relative_description(t - 3_569, &now(), true, None), "59 minutes ago");
        // 59.5 minutes rounds up to 60, which is one hour.
        assert_eq!(exact_relative_description(t - 3_570, &now(), true, None), "1 hour ago");
        assert_eq!(exact_relative_description(t - 86_400 * 3, &now(), true, None), "3 days ago");
        assert_eq!(exact_relative_description(t - 86_400 * 14, &now(), true, None), "2 weeks ago");
    }

    #[test]
    fn weeks_can_be_disabled() {
        let t = now().timestamp() - 86_400 * 14;
        assert_eq!(exact_relative_description(t, &now(), false, None), "on April 26, 2024");
        assert_eq!(exact_relative_description(t, &now(), false, Some("Y-m-d")), "2024-04-26");
    }

    #[test]
    fn distance_beyond_i64_is_rendered_as_number() {
        let t = i64::MIN + 1;
        assert_eq!(exact_relative_description(t, &now(), true, None), t.to_string());
    }

    #[test]
    fn future_times_stay_in_seconds() {
        let t = now().timestamp() + 120;
        assert_eq!(exact_relative_description(t, &now(), true, None), "-120 seconds ago");
    }
}
