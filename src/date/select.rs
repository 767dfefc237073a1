//! Value lists for date and time form controls.

use chrono::{Months, NaiveDate};

/// Values from `start` up to (excluding) `end`, stepping by `step`, each
/// with a two-digit label.
///
/// A zero step is treated as one.
///
/// ```
/// use request_hygiene::date::seconds;
///
/// let values = seconds(15, 0, 60);
/// assert_eq!(values[0], (0, "00".to_string()));
/// assert_eq!(values.len(), 4);
/// ```
pub fn seconds(step: u32, start: u32, end: u32) -> Vec<(u32, String)> {
    (start..end)
        .step_by(step.max(1) as usize)
        .map(|i| (i, format!("{i:02}")))
        .collect()
}

/// Minutes of an hour, stepping by `step`.
pub fn minutes(step: u32) -> Vec<(u32, String)> {
    seconds(step, 0, 60)
}

/// Hours of a day.
///
/// The list ends at 12 for a 12-hour clock and at 23 when `long` is set.
/// `start` defaults to 1 for the 12-hour clock and 0 otherwise.
pub fn hours(step: u32, long: bool, start: Option<u32>) -> Vec<u32> {
    let start = start.unwrap_or(if long { 0 } else { 1 });
    let last = if long { 23 } else { 12 };
    (start..=last).step_by(step.max(1) as usize).collect()
}

/// Months of a year, `1..=12`.
pub fn months() -> Vec<u32> {
    hours(1, false, None)
}

/// Day numbers of `month` in `year`.
///
/// Months outside `1..=12` roll over into adjacent years. Dates chrono cannot
/// represent give an empty list.
///
/// ```
/// use request_hygiene::date::days;
///
/// assert_eq!(days(2, 2024).len(), 29);
/// assert_eq!(days(2, 2023).len(), 28);
/// assert_eq!(days(13, 2023).len(), 31);
/// ```
pub fn days(month: i32, year: i32) -> Vec<u32> {
    (1..=days_in_month(month, year)).collect()
}

fn days_in_month(month: i32, year: i32) -> u32 {
    let index = i64::from(year) * 12 + i64::from(month) - 1;
    let (y, m) = (index.div_euclid(12), index.rem_euclid(12) as u32 + 1);
    let Ok(y) = i32::try_from(y) else {
        return 0;
    };
    let first = NaiveDate::from_ymd_opt(y, m, 1);
    let next = first.and_then(|first| first.checked_add_months(Months::new(1)));
    match (first, next) {
        (Some(first), Some(next)) => next.signed_duration_since(first).num_days() as u32,
        _ => 0,
    }
}

/// Years from `start` to `end`, inclusive.
pub fn years(start: i32, end: i32) -> Vec<i32> {
    (start..=end).collect()
}

/// Five years either side of `center`, cut short at the ends of `i32`.
pub fn years_around(center: i32) -> Vec<i32> {
    years(center.saturating_sub(5), center.saturating_add(5))
}

/// `"PM"` for hours after 11, `"AM"` otherwise.
pub fn ampm(hour: u32) -> &'static str {
    if hour > 11 {
        "PM"
    } else {
        "AM"
    }
}

/// Converts a 12-hour clock value into a two-digit 24-hour value.
///
/// The marker is matched case-insensitively; anything other than `am` or
/// `pm` leaves the hour unchanged.
///
/// ```
/// use request_hygiene::date::adjust;
///
/// assert_eq!(adjust(12, "AM"), "00");
/// assert_eq!(adjust(3, "pm"), "15");
/// assert_eq!(adjust(7, "?"), "07");
/// ```
pub fn adjust(hour: u32, ampm: &str) -> String {
    let hour = match ampm.to_ascii_lowercase().as_str() {
        "am" if hour == 12 => 0,
        "pm" if hour < 12 => hour + 12,
        _ => hour,
    };
    format!("{hour:02}")
}
