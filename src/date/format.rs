//! PHP-style date formatting.

use chrono::{DateTime, Datelike, TimeZone, Timelike, Weekday};

/// Formats a zoned datetime using PHP `date()` format codes.
///
/// Supported codes:
/// - `Y` 4-digit year, `y` 2-digit year
/// - `m` month with leading zero, `n` month without, `F` full month name,
///   `M` abbreviated month name
/// - `d` day with leading zero, `j` day without, `l` full weekday name,
///   `D` abbreviated weekday name
/// - `H` 24-hour with leading zero, `G` 24-hour without, `h` 12-hour with
///   leading zero, `g` 12-hour without
/// - `i` minutes, `s` seconds
/// - `A` `AM`/`PM`, `a` `am`/`pm`
///
/// A backslash outputs the following character literally. Any other
/// character is copied through.
///
/// # Examples
///
/// ```
/// use request_hygiene::date::format;
/// use chrono::{TimeZone, Utc};
///
/// let dt = Utc.with_ymd_and_hms(2025, 1, 15, 14, 30, 45).unwrap();
/// assert_eq!(format(&dt, "Y-m-d H:i:s"), "2025-01-15 14:30:45");
/// assert_eq!(format(&dt, "l, F j, Y"), "Wednesday, January 15, 2025");
/// assert_eq!(format(&dt, "\\o\\n M j"), "on Jan 15");
/// ```
pub fn format<Tz: TimeZone>(dt: &DateTime<Tz>, format_str: &str) -> String {
    let mut result = String::with_capacity(format_str.len() * 2);
    let mut chars = format_str.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                result.push(next);
            }
            continue;
        }

        match c {
            'Y' => result.push_str(&format!("{:04}", dt.year())),
            'y' => result.push_str(&format!("{:02}", dt.year().rem_euclid(100))),

            'm' => result.push_str(&format!("{:02}", dt.month())),
            'n' => result.push_str(&dt.month().to_string()),
            'F' => result.push_str(month_name(dt.month())),
            'M' => result.push_str(&month_name(dt.month())[..3]),

            'd' => result.push_str(&format!("{:02}", dt.day())),
            'j' => result.push_str(&dt.day().to_string()),
            'l' => result.push_str(weekday_name(dt.weekday())),
            'D' => result.push_str(&weekday_name(dt.weekday())[..3]),

            'H' => result.push_str(&format!("{:02}", dt.hour())),
            'G' => result.push_str(&dt.hour().to_string()),
            'h' => result.push_str(&format!("{:02}", hour12(dt.hour()))),
            'g' => result.push_str(&hour12(dt.hour()).to_string()),

            'i' => result.push_str(&format!("{:02}", dt.minute())),
            's' => result.push_str(&format!("{:02}", dt.second())),

            'A' => result.push_str(if dt.hour() < 12 { "AM" } else { "PM" }),
            'a' => result.push_str(if dt.hour() < 12 { "am" } else { "pm" }),

            _ => result.push(c),
        }
    }

    result
}

fn hour12(hour: u32) -> u32 {
    match hour % 12 {
        0 => 12,
        h => h,
    }
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        _ => "December",
    }
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn twelve_hour_clock_wraps_midnight_and_noon() {
        let midnight = Utc.with_ymd_and_hms(2024, 3, 9, 0, 5, 0).unwrap();
        let noon = Utc.with_ymd_and_hms(2024, 3, 9, 12, 5, 0).unwrap();

        assert_eq!(format(&midnight, "h:i a"), "12:05 am");
        assert_eq!(format(&noon, "g:i A"), "12:05 PM");
    }

    #[test]
    fn abbreviations() {
        let dt = Utc.with_ymd_and_hms(2024, 9, 1, 7, 0, 0).unwrap();
        assert_eq!(format(&dt, "D, M j y"), "Sun, Sep 1 24");
    }

    #[test]
    fn renders_in_the_datetime_zone() {
        let tz = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let dt = Utc.with_ymd_and_hms(2024, 1, 1, 22, 0, 0).unwrap().with_timezone(&tz);

        assert_eq!(format(&dt, "Y-m-d H:i"), "2024-01-02 03:30");
    }

    #[test]
    fn escapes_and_unknown_codes_pass_through() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(format(&dt, "\\Y Y-Q"), "Y 2024-Q");
        assert_eq!(format(&dt, "Q\\"), "Q");
    }
}
