/// A wrapper for request data that has passed through a sanitizer.
///
/// `Verified<T>` is the output of every [`Sanitizer`](crate::Sanitizer). It
/// records that the value went through a controlled cleaning path, which is
/// what downstream code (templates, storage) should accept.
///
/// # Construction Invariants
///
/// `Verified<T>` cannot be constructed by external code. There are no public
/// constructors and no `From<T>` implementations.
///
/// ```compile_fail
/// use request_hygiene::Verified;
///
/// let verified = Verified::new("data".to_string());
/// ```
///
/// # Access
///
/// - [`AsRef::as_ref`]: borrow the cleaned value
/// - [`into_inner`](Self::into_inner): consume and extract the value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verified<T> {
    inner: T,
}

impl<T> Verified<T> {
    /// Creates a `Verified<T>` without performing any cleaning.
    ///
    /// Restricted to this crate; callers must have sanitized `value`.
    pub(crate) fn new_unchecked(value: T) -> Self {
        Self { inner: value }
    }

    /// Consumes the `Verified<T>` and returns the inner value.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T> AsRef<T> for Verified<T> {
    fn as_ref(&self) -> &T {
        &self.inner
    }
}
