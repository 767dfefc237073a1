use std::fmt;

/// A wrapper for untrusted request data that must pass a sanitizer before use.
///
/// `Tainted<T>` marks data that crossed the request boundary (query string,
/// body fields, cookies, server variables) and has not been cleaned. The value
/// cannot be read without going through a [`Sanitizer`](crate::Sanitizer).
///
/// # Security Properties
///
/// - Does NOT implement `Deref` or any implicit conversion traits
/// - Inner value is inaccessible outside this crate, including through
///   equality comparisons
/// - `sanitize` is the only way out, and it always yields a `Verified<T>`
///
/// # Examples
///
/// ```
/// use request_hygiene::{EncodingSanitizer, InputValue, Sanitizer, Tainted};
///
/// let raw = Tainted::new(InputValue::from("hello\u{0}world"));
///
/// // Debug output shows it's tainted (for development)
/// println!("{:?}", raw);
///
/// let cleaned = EncodingSanitizer.sanitize(raw);
/// assert_eq!(cleaned.as_ref().as_str(), Some("helloworld"));
/// ```
///
/// Tainted values cannot be compared against a guess:
///
/// ```compile_fail
/// use request_hygiene::{InputValue, Tainted};
///
/// let secret = Tainted::new(InputValue::from("session-token"));
/// assert!(secret == Tainted::new(InputValue::from("session-token")));
/// ```
// Clone is required: the same tainted field may be looked up and cleaned more than once.
#[derive(Clone)]
pub struct Tainted<T> {
    // Must stay private. A public field bypasses sanitization entirely.
    inner: T,
}

impl<T> Tainted<T> {
    /// Wraps an untrusted value in `Tainted`.
    pub fn new(value: T) -> Self {
        Self { inner: value }
    }

    /// Extracts the inner value for sanitization.
    ///
    /// Restricted to this crate: only sanitizer implementations may call it,
    /// and they must wrap their output in `Verified<T>`.
    pub(crate) fn into_inner(self) -> T {
        self.inner
    }

    /// Borrows the inner value for crate-internal lookups.
    pub(crate) fn peek(&self) -> &T {
        &self.inner
    }

    /// Applies a transformation while keeping the result tainted.
    ///
    /// Used by ingestion code that normalizes data without vouching for it.
    pub(crate) fn map<U>(self, f: impl FnOnce(T) -> U) -> Tainted<U> {
        Tainted::new(f(self.inner))
    }
}

// Do NOT add Deref, AsRef, Borrow, Into<T> or similar impls to Tainted<T>.

impl<T: fmt::Debug> fmt::Debug for Tainted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tainted")
            .field("inner", &self.inner)
            .finish()
    }
}
