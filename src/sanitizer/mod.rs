//! Sanitizers that turn tainted request data into verified data.
//!
//! Cleaning never fails: malformed input degrades to a best-effort cleaned
//! value. The only fallible helper here is [`clean_input_key`], which rejects
//! request keys outright instead of rewriting them.

pub(crate) mod encoding;
mod purifier;
mod xss;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{Error, InputValue, Tainted, Verified};

pub use encoding::{clean_bytes, discard_invalid_utf8, strip_ascii_ctrl};
pub use purifier::{AmmoniaPurifier, MarkupPurifier};
pub use xss::{builtin_clean, xss_clean, XssFilter, XssMode};

/// Trait for turning tainted values into verified values.
///
/// # Invariants
///
/// Implementations MUST:
/// - Clean the input according to their rules
/// - Only call `Verified::new_unchecked` on the cleaned value
/// - Never fail; malformed input yields best-effort output
///
/// # Examples
///
/// ```
/// use request_hygiene::{EncodingSanitizer, Sanitizer, Tainted};
///
/// let tainted = Tainted::new("caf\u{0}é".to_string());
/// let verified = EncodingSanitizer.sanitize(tainted);
///
/// assert_eq!(verified.as_ref(), "café");
/// ```
pub trait Sanitizer<T> {
    /// Cleans a tainted value.
    fn sanitize(&self, input: Tainted<T>) -> Verified<T>;
}

/// Sanitizer that normalizes encoding: see [`clean`].
///
/// It does not neutralize markup; pair it with [`XssFilter`] for that.
#[derive(Debug, Clone, Copy, Default)]
pub struct EncodingSanitizer;

impl Sanitizer<InputValue> for EncodingSanitizer {
    fn sanitize(&self, input: Tainted<InputValue>) -> Verified<InputValue> {
        Verified::new_unchecked(clean(input.into_inner()))
    }
}

impl Sanitizer<String> for EncodingSanitizer {
    fn sanitize(&self, input: Tainted<String>) -> Verified<String> {
        Verified::new_unchecked(encoding::clean_str(input.into_inner()))
    }
}

/// Recursively normalizes a request value.
///
/// - Maps and lists: every key is cleaned as a string and every element is
///   cleaned recursively. The shape is preserved; if two keys become equal
///   after cleaning, the later value wins.
/// - Non-empty text: ASCII control characters (except tab, newline and
///   carriage return) are removed. Every other character is kept; invalid
///   UTF-8 only exists in byte input, see [`clean_bytes`].
/// - Empty text passes through unchanged.
///
/// # Examples
///
/// ```
/// use request_hygiene::{clean, InputValue};
///
/// let value: InputValue = [("na\u{7}me", "bob\u{0}by")].into_iter().collect();
/// let cleaned = clean(value);
///
/// assert_eq!(cleaned.get("name").and_then(InputValue::as_str), Some("bobby"));
/// ```
pub fn clean(value: InputValue) -> InputValue {
    match value {
        InputValue::Text(s) => InputValue::Text(encoding::clean_str(s)),
        InputValue::List(items) => InputValue::List(items.into_iter().map(clean).collect()),
        InputValue::Map(map) => {
            let mut cleaned = IndexMap::with_capacity(map.len());
            for (key, val) in map {
                cleaned.insert(encoding::clean_str(key), clean(val));
            }
            InputValue::Map(cleaned)
        }
    }
}

static ALLOWED_KEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\p{L}0-9:_.\-()]+$").expect("Invalid request key regex pattern")
});

/// Checks a request key against the allowed character set.
///
/// Keys may contain letters, digits, `:`, `_`, `.`, `-`, `(` and `)`.
///
/// # Errors
///
/// Returns [`Error::DisallowedKey`] for any other key, including the empty key.
///
/// # Examples
///
/// ```
/// use request_hygiene::clean_input_key;
///
/// assert_eq!(clean_input_key("user.name").unwrap(), "user.name");
/// assert!(clean_input_key("name<script>").is_err());
/// ```
pub fn clean_input_key(key: &str) -> Result<&str, Error> {
    if ALLOWED_KEY.is_match(key) {
        Ok(key)
    } else {
        Err(Error::DisallowedKey { len: key.len() })
    }
}

/// Validates every map key in `value`, recursively.
pub(crate) fn validate_keys(value: &InputValue) -> Result<(), Error> {
    match value {
        InputValue::Text(_) => Ok(()),
        InputValue::List(items) => items.iter().try_for_each(validate_keys),
        InputValue::Map(map) => map.iter().try_for_each(|(key, val)| {
            clean_input_key(key)?;
            validate_keys(val)
        }),
    }
}

/// Converts `\r\n` and lone `\r` to `\n`.
pub fn normalize_newlines(s: String) -> String {
    if s.contains('\r') {
        s.replace("\r\n", "\n").replace('\r', "\n")
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nested() -> InputValue {
        [
            ("a\u{0}", InputValue::from("x\u{1}y")),
            (
                "list",
                InputValue::from(vec![
                    InputValue::from("\u{7f}one"),
                    [("inner", "t\u{b}wo")].into_iter().collect(),
                ]),
            ),
            ("empty", InputValue::from("")),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn clean_recurses_into_every_leaf() {
        let cleaned = clean(nested());

        assert_eq!(cleaned.get("a").and_then(InputValue::as_str), Some("xy"));
        let list = cleaned.get("list").expect("list survives");
        assert_eq!(list.get("0").and_then(InputValue::as_str), Some("one"));
        assert_eq!(
            list.get("1").and_then(|m| m.get("inner")).and_then(InputValue::as_str),
            Some("two")
        );
        assert_eq!(cleaned.get("empty").and_then(InputValue::as_str), Some(""));
    }

    #[test]
    fn clean_preserves_shape() {
        let cleaned = clean(nested());

        assert_eq!(cleaned.len(), 3);
        assert_eq!(cleaned.get("list").map(InputValue::len), Some(2));
    }

    #[test]
    fn clean_key_collision_keeps_later_value() {
        let value: InputValue = [("k\u{0}", "first"), ("k", "second")].into_iter().collect();

        let cleaned = clean(value);
        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned.get("k").and_then(InputValue::as_str), Some("second"));
    }

    #[test]
    fn encoding_sanitizer_on_strings() {
        let verified = EncodingSanitizer.sanitize(Tainted::new("a\u{0}b\tc".to_string()));

        assert_eq!(verified.as_ref(), "ab\tc");
    }

    #[test]
    fn input_key_accepts_unicode_letters() {
        assert!(clean_input_key("име_1").is_ok());
        assert!(clean_input_key("fn(x):y-z").is_ok());
    }

    #[test]
    fn input_key_rejects_bad_characters() {
        for key in ["", "a b", "a[b]", "a/b", "<x>", "a\u{0}"] {
            assert!(
                matches!(clean_input_key(key), Err(Error::DisallowedKey { .. })),
                "key {:?} should be rejected",
                key
            );
        }
    }

    #[test]
    fn validate_keys_walks_nested_maps() {
        let bad: InputValue = [(
            "outer",
            InputValue::from(vec![[("in ner", "v")].into_iter().collect::<InputValue>()]),
        )]
        .into_iter()
        .collect();

        assert!(validate_keys(&bad).is_err());
        assert!(validate_keys(&clean(nested())).is_ok());
    }

    #[test]
    fn newlines_are_normalized() {
        assert_eq!(normalize_newlines("a\r\nb\rc\nd".to_string()), "a\nb\nc\nd");
        assert_eq!(normalize_newlines("plain".to_string()), "plain");
    }
}
