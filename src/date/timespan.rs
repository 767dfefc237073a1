//! Approximate decomposition of a duration into calendar-ish units.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A unit a [`Timespan`] can be expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    /// 31 556 926 seconds
    Years,
    /// 2 629 744 seconds
    Months,
    /// 7 days
    Weeks,
    /// 24 hours
    Days,
    /// 60 minutes
    Hours,
    /// 60 seconds
    Minutes,
    /// Whatever remains
    Seconds,
}

impl TimeUnit {
    /// Every unit, largest first.
    pub const ALL: [TimeUnit; 7] = [
        TimeUnit::Years,
        TimeUnit::Months,
        TimeUnit::Weeks,
        TimeUnit::Days,
        TimeUnit::Hours,
        TimeUnit::Minutes,
        TimeUnit::Seconds,
    ];

    /// Plural lowercase name, e.g. `"minutes"`.
    pub fn as_str(self) -> &'static str {
        match self {
            TimeUnit::Years => "years",
            TimeUnit::Months => "months",
            TimeUnit::Weeks => "weeks",
            TimeUnit::Days => "days",
            TimeUnit::Hours => "hours",
            TimeUnit::Minutes => "minutes",
            TimeUnit::Seconds => "seconds",
        }
    }

    /// Singular lowercase name, e.g. `"minute"`.
    pub fn singular(self) -> &'static str {
        let plural = self.as_str();
        &plural[..plural.len() - 1]
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a unit name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownUnit(pub String);

impl fmt::Display for UnknownUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown time unit '{}'", self.0)
    }
}

impl std::error::Error for UnknownUnit {}

impl FromStr for TimeUnit {
    type Err = UnknownUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        TimeUnit::ALL
            .into_iter()
            .find(|unit| unit.as_str() == lower || unit.singular() == lower)
            .ok_or_else(|| UnknownUnit(s.to_string()))
    }
}

/// Parses a unit list such as `"years,months"`.
///
/// Any run of non-letters separates names. Unknown names are ignored.
///
/// ```
/// use request_hygiene::date::{parse_units, TimeUnit};
///
/// assert_eq!(
///     parse_units("Hours, minutes;bogus"),
///     vec![TimeUnit::Hours, TimeUnit::Minutes],
/// );
/// ```
pub fn parse_units(list: &str) -> Vec<TimeUnit> {
    list.split(|c: char| !c.is_ascii_alphabetic())
        .filter(|name| !name.is_empty())
        .filter_map(|name| name.parse().ok())
        .collect()
}

const YEAR: i64 = 31_556_926;
const MONTH_DIVISOR: f64 = 2_629_743.83;
const MONTH: i64 = 2_629_744;
const WEEK: i64 = 604_800;
const DAY: i64 = 86_400;
const HOUR: i64 = 3_600;
const MINUTE: i64 = 60;

/// A duration broken down into the units that were asked for.
///
/// Entries keep the requested order. Its `Display` form reads like
/// `"2 hours, 5 minutes and 0 seconds"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timespan {
    parts: Vec<(TimeUnit, u64)>,
}

impl Timespan {
    /// Amount for `unit`, if it was requested.
    pub fn get(&self, unit: TimeUnit) -> Option<u64> {
        self.parts.iter().find(|(u, _)| *u == unit).map(|(_, n)| *n)
    }

    /// Iterates `(unit, amount)` pairs in requested order.
    pub fn iter(&self) -> impl Iterator<Item = (TimeUnit, u64)> + '_ {
        self.parts.iter().copied()
    }

    /// Number of units in the breakdown.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// True when no units were requested.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl fmt::Display for Timespan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(((last_unit, last_amount), rest)) = self.parts.split_last() else {
            return Ok(());
        };

        let mut first = true;
        for (unit, amount) in rest.iter().filter(|(_, amount)| *amount != 0) {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write_amount(f, *unit, *amount)?;
        }
        if !first {
            f.write_str(" and ")?;
        }
        write_amount(f, *last_unit, *last_amount)
    }
}

fn write_amount(f: &mut fmt::Formatter<'_>, unit: TimeUnit, amount: u64) -> fmt::Result {
    if amount == 1 {
        write!(f, "{amount} {}", unit.singular())
    } else {
        write!(f, "{amount} {unit}")
    }
}

/// Splits the distance between two UNIX timestamps into `units`.
///
/// Both timestamps are clamped at zero. Units are filled greedily from years
/// down to seconds, but only the requested ones take a share. Years and
/// months use fixed average lengths, so the result is an approximation.
/// Duplicate units are dropped.
///
/// ```
/// use request_hygiene::date::{timespan, TimeUnit};
///
/// let span = timespan(100, 0, &[TimeUnit::Minutes, TimeUnit::Seconds]);
/// assert_eq!(span.get(TimeUnit::Minutes), Some(1));
/// assert_eq!(span.get(TimeUnit::Seconds), Some(40));
/// assert_eq!(span.to_string(), "1 minute and 40 seconds");
/// ```
pub fn timespan(t1: i64, t2: i64, units: &[TimeUnit]) -> Timespan {
    let mut remaining = (t1.max(0) - t2.max(0)).abs();
    let wanted = |unit: TimeUnit| units.contains(&unit);

    let mut amounts = [0u64; 7];
    for (slot, unit) in TimeUnit::ALL.into_iter().enumerate() {
        if !wanted(unit) {
            continue;
        }
        let (count, size) = match unit {
            TimeUnit::Years => (remaining / YEAR, YEAR),
            TimeUnit::Months => ((remaining as f64 / MONTH_DIVISOR).floor() as i64, MONTH),
            TimeUnit::Weeks => (remaining / WEEK, WEEK),
            TimeUnit::Days => (remaining / DAY, DAY),
            TimeUnit::Hours => (remaining / HOUR, HOUR),
            TimeUnit::Minutes => (remaining / MINUTE, MINUTE),
            TimeUnit::Seconds => (remaining, 1),
        };
        // Average month lengths can overshoot by a few seconds.
        remaining = (remaining - count * size).max(0);
        amounts[slot] = count as u64;
    }

    let mut parts: Vec<(TimeUnit, u64)> = Vec::with_capacity(units.len());
    for &unit in units {
        if parts.iter().all(|(u, _)| *u != unit) {
            parts.push((unit, amounts[unit as usize]));
        }
    }
    Timespan { parts }
}

/// [`timespan`] rendered as text, e.g. `"1 minute and 40 seconds"`.
///
/// Zero amounts are skipped except for the last unit.
pub fn timespan_string(t1: i64, t2: i64, units: &[TimeUnit]) -> String {
    timespan(t1, t2, units).to_string()
}
