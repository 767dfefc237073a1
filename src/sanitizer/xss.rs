//! Script-injection filtering for string leaves.
//!
//! Two strategies are available. [`XssMode::Purifier`] hands each leaf to a
//! maintained HTML sanitizer and should be the primary control.
//! [`XssMode::BuiltIn`] is a fixed chain of regex substitutions. It is
//! best-effort and known to be incomplete against a determined attacker, so
//! treat it as a secondary layer.
//!
//! The built-in chain runs in this order:
//!
//! 1. double-escape literal `&amp;`, `&lt;`, `&gt;`
//! 2. repair malformed entity references
//! 3. decode all entities, exposing obfuscated payloads
//! 4. drop `on*` and `xmlns*` attributes
//! 5. neutralize `javascript:`, `vbscript:` and `-moz-binding:` schemes
//! 6. drop `style` attributes carrying `expression(`, `behaviour(` or `script:`
//! 7. drop namespaced tags
//! 8. strip deny-listed tags until nothing changes
//!
//! Decoding (3) must precede the attribute and scheme passes, otherwise an
//! entity-encoded payload would only become visible after they ran.

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use super::purifier::{AmmoniaPurifier, MarkupPurifier};
use super::Sanitizer;
use crate::{InputValue, Tainted, Verified};

/// Which XSS filtering strategy to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum XssMode {
    /// The regex substitution chain.
    #[default]
    #[serde(alias = "default")]
    BuiltIn,
    /// Delegate to a [`MarkupPurifier`].
    #[serde(alias = "htmlpurifier")]
    Purifier,
}

impl fmt::Display for XssMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BuiltIn => write!(f, "builtin"),
            Self::Purifier => write!(f, "purifier"),
        }
    }
}

/// Matches a character optionally followed by control/space padding.
const PAD: &str = r"[\x00-\x20]*";

/// Builds a pattern matching `word` with padding allowed between its characters.
fn spaced(word: &str) -> String {
    let mut out = String::new();
    for (i, c) in word.chars().enumerate() {
        if i > 0 {
            out.push_str(PAD);
        }
        out.push_str(&regex::escape(&c.to_string()));
    }
    out
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("Invalid XSS filter regex pattern")
}

static ENTITY_PADDING: Lazy<Regex> = Lazy::new(|| compile(r"(&#*\w+)[\x00-\x20]+;"));

static NUMERIC_ENTITY: Lazy<Regex> = Lazy::new(|| compile(r"(?i)(&#x?[0-9a-f]+);*"));

static EVENT_ATTRIBUTE: Lazy<Regex> =
    Lazy::new(|| compile(r#"(?i)(<[^>]+?[\x00-\x20"'])(?:on|xmlns)[^>]*>"#));

static JAVASCRIPT_SCHEME: Lazy<Regex> = Lazy::new(|| {
    compile(&format!(
        r#"(?i)([a-z]*){PAD}={PAD}([`'"]*){PAD}{}{PAD}:"#,
        spaced("javascript")
    ))
});

static VBSCRIPT_SCHEME: Lazy<Regex> = Lazy::new(|| {
    compile(&format!(
        r#"(?i)([a-z]*){PAD}=(['"]*){PAD}{}{PAD}:"#,
        spaced("vbscript")
    ))
});

static MOZ_BINDING: Lazy<Regex> =
    Lazy::new(|| compile(&format!(r#"([a-z]*){PAD}=(['"]*){PAD}-moz-binding{PAD}:"#)));

static STYLE_EXPRESSION: Lazy<Regex> = Lazy::new(|| {
    compile(&format!(
        r#"(?i)(<[^>]+?)style{PAD}={PAD}[`'"]*.*?expression{PAD}\([^>]*>"#
    ))
});

static STYLE_BEHAVIOUR: Lazy<Regex> = Lazy::new(|| {
    compile(&format!(
        r#"(?i)(<[^>]+?)style{PAD}={PAD}[`'"]*.*?behaviour{PAD}\([^>]*>"#
    ))
});

static STYLE_SCRIPT: Lazy<Regex> = Lazy::new(|| {
    compile(&format!(
        r#"(?i)(<[^>]+?)style{PAD}={PAD}[`'"]*.*?{}:*[^>]*>"#,
        spaced("script")
    ))
});

static NAMESPACED_TAG: Lazy<Regex> = Lazy::new(|| compile(r"(?i)</*\w+:\w[^>]*>"));

static DENIED_TAG: Lazy<Regex> = Lazy::new(|| {
    compile(
        r"(?i)</*(?:applet|b(?:ase|gsound|link)|embed|frame(?:set)?|i(?:frame|layer)|l(?:ayer|ink)|meta|object|s(?:cript|tyle)|title|xml)[^>]*>",
    )
});

/// Runs the built-in substitution chain over one string.
pub fn builtin_clean(data: &str) -> String {
    let data = data
        .replace("&amp;", "&amp;amp;")
        .replace("&lt;", "&amp;lt;")
        .replace("&gt;", "&amp;gt;");
    let data = ENTITY_PADDING.replace_all(&data, "${1};");
    let data = NUMERIC_ENTITY.replace_all(&data, "${1};");
    let data = html_escape::decode_html_entities(&data).into_owned();

    let data = EVENT_ATTRIBUTE.replace_all(&data, "${1}>");

    let data = JAVASCRIPT_SCHEME.replace_all(&data, "${1}=${2}nojavascript...");
    let data = VBSCRIPT_SCHEME.replace_all(&data, "${1}=${2}novbscript...");
    let data = MOZ_BINDING.replace_all(&data, "${1}=${2}nomozbinding...");

    let data = STYLE_EXPRESSION.replace_all(&data, "${1}>");
    let data = STYLE_BEHAVIOUR.replace_all(&data, "${1}>");
    let data = STYLE_SCRIPT.replace_all(&data, "${1}>");

    let mut data = NAMESPACED_TAG.replace_all(&data, "").into_owned();

    // Removing one tag can splice the halves of another back together.
    loop {
        let next = DENIED_TAG.replace_all(&data, "").into_owned();
        if next == data {
            return data;
        }
        data = next;
    }
}

/// Sanitizer that neutralizes script-injection vectors in every string leaf.
///
/// Blank leaves (empty after trimming) are returned unchanged. Map keys are
/// not filtered; use [`clean`](crate::clean) and key validation for those.
///
/// # Examples
///
/// ```
/// use request_hygiene::{InputValue, Sanitizer, Tainted, XssFilter, XssMode};
///
/// let filter = XssFilter::new(XssMode::BuiltIn);
/// let raw = Tainted::new(InputValue::from("<img src=x onerror=alert(1)>"));
///
/// let cleaned = filter.sanitize(raw);
/// assert_eq!(cleaned.as_ref().as_str(), Some("<img src=x >"));
/// ```
#[derive(Clone)]
pub struct XssFilter {
    mode: XssMode,
    purifier: Arc<dyn MarkupPurifier>,
}

impl XssFilter {
    /// Creates a filter using `mode` and the default [`AmmoniaPurifier`].
    pub fn new(mode: XssMode) -> Self {
        Self {
            mode,
            purifier: Arc::new(AmmoniaPurifier::default()),
        }
    }

    /// Replaces the purifier used in [`XssMode::Purifier`].
    pub fn with_purifier(mut self, purifier: impl MarkupPurifier + 'static) -> Self {
        self.purifier = Arc::new(purifier);
        self
    }

    /// Returns the configured mode.
    pub fn mode(&self) -> XssMode {
        self.mode
    }

    /// Filters a single string.
    pub fn clean_str(&self, data: String) -> String {
        if data.trim().is_empty() {
            return data;
        }

        tracing::trace!(mode = %self.mode, len = data.len(), "xss filter applied");

        match self.mode {
            XssMode::BuiltIn => builtin_clean(&data),
            XssMode::Purifier => self.purifier.purify(&data),
        }
    }

    /// Filters every string leaf of `value`, keeping its shape.
    pub fn clean_value(&self, value: InputValue) -> InputValue {
        value.map_leaves(&mut |s| self.clean_str(s))
    }
}

impl fmt::Debug for XssFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XssFilter")
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

impl Default for XssFilter {
    fn default() -> Self {
        Self::new(XssMode::default())
    }
}

impl Sanitizer<InputValue> for XssFilter {
    fn sanitize(&self, input: Tainted<InputValue>) -> Verified<InputValue> {
        Verified::new_unchecked(self.clean_value(input.into_inner()))
    }
}

impl Sanitizer<String> for XssFilter {
    fn sanitize(&self, input: Tainted<String>) -> Verified<String> {
        Verified::new_unchecked(self.clean_str(input.into_inner()))
    }
}

/// Filters `value` with the given strategy and the default purifier.
///
/// # Examples
///
/// ```
/// use request_hygiene::{xss_clean, InputValue, XssMode};
///
/// let nested = InputValue::from(vec!["<scr<script>ipt>alert(1)</scr</script>ipt>"]);
/// let cleaned = xss_clean(nested, XssMode::BuiltIn);
///
/// assert_eq!(cleaned, InputValue::from(vec!["alert(1)"]));
/// ```
pub fn xss_clean(value: InputValue, mode: XssMode) -> InputValue {
    XssFilter::new(mode).clean_value(value)
}
