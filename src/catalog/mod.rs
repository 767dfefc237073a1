//! Localized, parameterized validation messages.
//!
//! A [`MessageCatalog`] maps `locale → key → template`. It is assembled once
//! with a [`CatalogBuilder`] and is read-only afterwards, so one catalog can
//! be shared by every request.
//!
//! Templates use printf-style directives: `%s`, `%d`, positional `%1$s` /
//! `%2$d`, and `%%`.
//!
//! # Examples
//!
//! ```
//! use request_hygiene::catalog::MessageCatalog;
//!
//! let catalog = MessageCatalog::builder()
//!     .add("en_US", "too_short", "%s needs at least %d characters")
//!     .build();
//!
//! assert_eq!(
//!     catalog.lookup("en_US", "too_short", &["Password", "12"]).unwrap(),
//!     "Password needs at least 12 characters",
//! );
//! assert!(catalog.lookup("de_DE", "too_short", &["Password", "12"]).is_err());
//! ```

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;

use crate::Error;

mod builtin;
mod template;

static DEFAULT: Lazy<MessageCatalog> = Lazy::new(MessageCatalog::with_builtin);

/// The bundled `en_US` and `mk_MK` validation catalog, built on first use.
pub fn default_catalog() -> &'static MessageCatalog {
    &DEFAULT
}

/// Immutable message tables keyed by locale.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    tables: HashMap<String, HashMap<String, String>>,
}

impl MessageCatalog {
    /// Starts an empty builder.
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// A catalog holding only the bundled validation tables.
    pub fn with_builtin() -> Self {
        Self::builder().builtin().build()
    }

    /// Formats the template for `key` in `locale` with `args`.
    ///
    /// There is no fallback locale; choosing one is up to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingKey`] if `locale` has no entry for `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use request_hygiene::catalog::default_catalog;
    ///
    /// let text = default_catalog().lookup("mk_MK", "required", &["email"]).unwrap();
    /// assert_eq!(text, "Полето email е задолжително.");
    /// ```
    pub fn lookup<A: fmt::Display>(&self, locale: &str, key: &str, args: &[A]) -> Result<String, Error> {
        let Some(template) = self.template(locale, key) else {
            tracing::debug!(locale, key, "message key not found");
            return Err(Error::missing_key(locale, key));
        };
        Ok(template::render(template, args))
    }

    /// The raw template for `key` in `locale`.
    pub fn template(&self, locale: &str, key: &str) -> Option<&str> {
        self.tables.get(locale)?.get(key).map(String::as_str)
    }

    /// True if at least one message is defined for `locale`.
    pub fn has_locale(&self, locale: &str) -> bool {
        self.tables.contains_key(locale)
    }

    /// Defined locales, sorted.
    pub fn locales(&self) -> Vec<&str> {
        let mut locales: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        locales.sort_unstable();
        locales
    }
}

/// Accumulates message tables for a [`MessageCatalog`].
///
/// Later additions for the same locale and key replace earlier ones.
#[derive(Debug, Clone, Default)]
pub struct CatalogBuilder {
    tables: HashMap<String, HashMap<String, String>>,
}

impl CatalogBuilder {
    /// Adds or replaces one template.
    pub fn add(
        mut self,
        locale: impl Into<String>,
        key: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        self.tables
            .entry(locale.into())
            .or_default()
            .insert(key.into(), template.into());
        self
    }

    /// Adds the bundled `en_US` and `mk_MK` validation tables.
    pub fn builtin(mut self) -> Self {
        for (locale, entries) in builtin::tables() {
            let table = self.tables.entry(locale.to_string()).or_default();
            for (key, template) in entries {
                table.insert((*key).to_string(), (*template).to_string());
            }
        }
        self
    }

    /// Adds every entry of a JSON object `{ "key": "template", ... }` under `locale`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CatalogFormat`] if `json` is not an object of strings.
    ///
    /// # Examples
    ///
    /// ```
    /// use request_hygiene::catalog::MessageCatalog;
    ///
    /// let catalog = MessageCatalog::builder()
    ///     .load_json("fr_FR", r#"{"required": "Le champ %s est obligatoire."}"#)?
    ///     .build();
    ///
    /// assert!(catalog.has_locale("fr_FR"));
    /// # Ok::<(), request_hygiene::Error>(())
    /// ```
    pub fn load_json(mut self, locale: impl Into<String>, json: &str) -> Result<Self, Error> {
        let entries: HashMap<String, String> = serde_json::from_str(json)?;
        let locale = locale.into();
        tracing::debug!(locale = %locale, entries = entries.len(), "loaded message table");
        self.tables.entry(locale).or_default().extend(entries);
        Ok(self)
    }

    /// Freezes the tables.
    pub fn build(self) -> MessageCatalog {
        MessageCatalog {
            tables: self.tables,
        }
    }
}
