//! Shared proptest strategies for unit tests.

use proptest::prelude::*;

/// Printable ASCII strings of up to `max_len` characters.
///
/// Nothing in this alphabet is touched by the encoding cleaner.
pub(crate) fn arb_printable_string(max_len: usize) -> impl Strategy<Value = String> {
    prop::string::string_regex(&format!("[ -~]{{0,{max_len}}}")).expect("valid strategy regex")
}
