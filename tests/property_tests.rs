//! Integration property tests for request-hygiene.
//!
//! These tests validate cross-module invariants using property-based
//! testing.

use chrono::Utc;
use chrono_tz::Tz;
use proptest::prelude::*;
use request_hygiene::date::{from_dos_timestamp, timespan, to_dos_timestamp, TimeUnit};
use request_hygiene::{clean, xss_clean, InputValue, XssMode};

// Strategy: arbitrary leaf text, including control characters and markup
fn arb_leaf() -> impl Strategy<Value = String> {
    prop::string::string_regex("[\\x00-\\x1f a-zA-Z0-9<>\"'=/&;:\u{00e9}\u{0436}\u{fffd}]{0,24}")
        .unwrap()
}

// Strategy: nested request data up to three levels deep
fn arb_input_value() -> impl Strategy<Value = InputValue> {
    let leaf = arb_leaf().prop_map(InputValue::from);
    leaf.prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(InputValue::List),
            prop::collection::vec(("[a-z_]{1,6}", inner), 0..4)
                .prop_map(|entries| entries.into_iter().collect::<InputValue>()),
        ]
    })
}

fn same_shape(a: &InputValue, b: &InputValue) -> bool {
    match (a, b) {
        (InputValue::Text(_), InputValue::Text(_)) => true,
        (InputValue::List(x), InputValue::List(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(p, q)| same_shape(p, q))
        }
        (InputValue::Map(x), InputValue::Map(y)) => {
            x.len() == y.len()
                && x.iter()
                    .zip(y)
                    .all(|((k1, v1), (k2, v2))| k1 == k2 && same_shape(v1, v2))
        }
        _ => false,
    }
}

fn leaves(value: &InputValue, out: &mut Vec<String>) {
    match value {
        InputValue::Text(s) => out.push(s.clone()),
        InputValue::List(items) => items.iter().for_each(|v| leaves(v, out)),
        InputValue::Map(map) => map.values().for_each(|v| leaves(v, out)),
    }
}

// Strategy: instants inside the DOS range, 1980-01-01 .. 2107-12-31
fn arb_dos_instant() -> impl Strategy<Value = i64> {
    315_532_800i64..4_354_819_199i64
}

fn arb_zone() -> impl Strategy<Value = Tz> {
    prop_oneof![
        Just(chrono_tz::UTC),
        Just(chrono_tz::Asia::Kolkata),
        Just(chrono_tz::Asia::Tokyo),
        Just(chrono_tz::Asia::Dubai),
    ]
}

proptest! {
    /// Property: clean keeps every key and position and reaches every leaf
    #[test]
    fn proptest_clean_preserves_shape(value in arb_input_value()) {
        let cleaned = clean(value.clone());
        prop_assert!(same_shape(&value, &cleaned));

        let mut out = Vec::new();
        leaves(&cleaned, &mut out);
        for leaf in out {
            prop_assert!(!leaf.chars().any(|c| c.is_ascii_control() && !matches!(c, '\t' | '\n' | '\r')));
        }
    }

    /// Property: clean only removes control characters
    #[test]
    fn proptest_clean_keeps_other_characters(text in arb_leaf()) {
        let cleaned = clean(InputValue::from(text.as_str()));
        let expected: String = text
            .chars()
            .filter(|c| !c.is_ascii_control() || matches!(c, '\t' | '\n' | '\r'))
            .collect();
        prop_assert_eq!(cleaned.as_str(), Some(expected.as_str()));
    }

    /// Property: clean is idempotent
    #[test]
    fn proptest_clean_is_idempotent(value in arb_input_value()) {
        let once = clean(value);
        let twice = clean(once.clone());
        prop_assert_eq!(once, twice);
    }

    /// Property: the built-in XSS filter keeps shape as well
    #[test]
    fn proptest_xss_clean_preserves_shape(value in arb_input_value()) {
        let cleaned = xss_clean(value.clone(), XssMode::BuiltIn);
        prop_assert!(same_shape(&value, &cleaned));
    }

    /// Property: in zones without DST, DOS round trips lose only the odd second
    #[test]
    fn proptest_dos_round_trip(t in arb_dos_instant(), tz in arb_zone()) {
        let dos = to_dos_timestamp(t, &tz);
        let back = from_dos_timestamp(dos, &tz);

        // Local wall clock may cross the 1980/2107 boundary near the edges.
        if dos != request_hygiene::date::DOS_EPOCH && dos != request_hygiene::date::DOS_MAX {
            prop_assert_eq!(back, t - t.rem_euclid(2));
        }
    }

    /// Property: DOS packing in UTC is monotonic
    #[test]
    fn proptest_dos_is_monotonic(a in arb_dos_instant(), b in arb_dos_instant()) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(to_dos_timestamp(lo, &Utc) <= to_dos_timestamp(hi, &Utc));
    }

    /// Property: days, hours, minutes and seconds add back up to the distance
    #[test]
    fn proptest_timespan_small_units_are_exact(t1 in 0i64..10_000_000, t2 in 0i64..10_000_000) {
        let span = timespan(t1, t2, &[TimeUnit::Days, TimeUnit::Hours, TimeUnit::Minutes, TimeUnit::Seconds]);
        let total = span.get(TimeUnit::Days).unwrap_or(0) * 86_400
            + span.get(TimeUnit::Hours).unwrap_or(0) * 3_600
            + span.get(TimeUnit::Minutes).unwrap_or(0) * 60
            + span.get(TimeUnit::Seconds).unwrap_or(0);

        prop_assert_eq!(total, (t1 - t2).unsigned_abs());
        prop_assert!(span.get(TimeUnit::Hours).unwrap_or(0) < 24);
    }
}
