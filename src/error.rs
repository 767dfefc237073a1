use thiserror::Error;

/// Errors that can occur in the request-hygiene crate.
///
/// Sanitization and DOS timestamp conversion never fail; errors only arise
/// from message lookups, request-key validation and timezone or date
/// parsing.
#[derive(Debug, Error)]
pub enum Error {
    /// The message key is not defined for the requested locale.
    #[error("message '{key}' is not defined for locale '{locale}'")]
    MissingKey {
        /// Locale that was searched
        locale: String,
        /// Key that was not found
        key: String,
    },

    /// A request key contains characters outside the allowed set.
    ///
    /// The rejected key is not echoed back to avoid reflecting attacker input
    /// into logs.
    #[error("disallowed key characters in request data ({len} bytes)")]
    DisallowedKey {
        /// Length of the rejected key in bytes
        len: usize,
    },

    /// The timezone name is not a known IANA zone.
    #[error("unknown timezone '{name}'")]
    UnknownTimezone {
        /// Zone name as supplied by the caller
        name: String,
    },

    /// A date string could not be parsed.
    #[error("invalid date '{input}'")]
    InvalidDate {
        /// The unparseable input
        input: String,
    },

    /// A message table could not be decoded.
    #[error("malformed message table: {0}")]
    CatalogFormat(#[from] serde_json::Error),
}

impl Error {
    /// Creates a `MissingKey` error.
    pub(crate) fn missing_key(locale: &str, key: &str) -> Self {
        Error::MissingKey {
            locale: locale.to_string(),
            key: key.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_display_names_locale_and_key() {
        let err = Error::missing_key("mk_MK", "required");
        let output = format!("{}", err);

        assert!(output.contains("mk_MK"));
        assert!(output.contains("required"));
    }

    #[test]
    fn disallowed_key_does_not_leak_input() {
        let err = Error::DisallowedKey { len: 12 };
        let output = format!("{}", err);

        assert!(output.contains("12 bytes"));
        assert!(!output.contains('<'));
    }

    #[test]
    fn catalog_format_wraps_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();

        assert!(matches!(err, Error::CatalogFormat(_)));
        assert!(format!("{}", err).starts_with("malformed message table"));
    }
}
