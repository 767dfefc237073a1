//! Delegation to a maintained HTML sanitization library.

/// An external HTML sanitizer used by [`XssMode::Purifier`](super::XssMode::Purifier).
///
/// Implementations strip untrusted markup and attributes while keeping safe
/// structure, and return the cleaned fragment.
pub trait MarkupPurifier: Send + Sync {
    /// Returns a cleaned copy of `html`.
    fn purify(&self, html: &str) -> String;
}

/// [`MarkupPurifier`] backed by `ammonia`.
///
/// The default policy keeps ammonia's whitelist of safe tags and attributes.
/// [`text_only`](Self::text_only) removes every tag and keeps only text.
///
/// # Examples
///
/// ```
/// use request_hygiene::{AmmoniaPurifier, MarkupPurifier};
///
/// let purifier = AmmoniaPurifier::default();
/// let cleaned = purifier.purify("<b onclick=\"steal()\">bold</b><script>x()</script>");
///
/// assert_eq!(cleaned, "<b>bold</b>");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AmmoniaPurifier {
    text_only: bool,
}

impl AmmoniaPurifier {
    /// Creates a purifier that keeps no markup at all.
    pub fn text_only() -> Self {
        Self { text_only: true }
    }
}

impl MarkupPurifier for AmmoniaPurifier {
    fn purify(&self, html: &str) -> String {
        if self.text_only {
            ammonia::Builder::empty().clean(html).to_string()
        } else {
            ammonia::clean(html)
        }
    }
}
