//! Request input hygiene, date conversion and localized validation messages.
//!
//! This crate provides:
//! - **Taint tracking**: request values arrive as [`Tainted<T>`] and only a
//!   [`Sanitizer`] can turn them into [`Verified<T>`]
//! - **Encoding cleanup**: [`clean`] strips ASCII control characters and
//!   invalid UTF-8 from arbitrarily nested [`InputValue`] trees
//! - **XSS filtering**: [`XssFilter`] with a built-in regex filter or an
//!   HTML purifier
//! - **Request ingestion**: [`input::RequestAdapter`] cleans a request once
//!   and hands out an immutable [`input::RequestInput`]
//! - **Dates**: DOS timestamps, zone offsets, relative descriptions and
//!   timespans in [`date`]
//! - **Messages**: the [`catalog::MessageCatalog`] of validation templates
//!
//! # Core Types
//!
//! - [`Tainted<T>`]: untrusted data that cannot be read directly
//! - [`Verified<T>`]: data that went through a sanitizer
//! - [`InputValue`]: a string, list or ordered map of request data
//! - [`Error`]: every fallible operation in the crate
//!
//! # Examples
//!
//! ```
//! use request_hygiene::{clean, InputValue, Sanitizer, Tainted, XssFilter};
//!
//! let raw = Tainted::new(clean(InputValue::from("<a href=\"javascript:go()\">x</a>\u{7}")));
//! let safe = XssFilter::default().sanitize(raw);
//!
//! assert_eq!(safe.as_ref().as_str(), Some("<a href=\"nojavascript...go()\">x</a>"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
mod config;
pub mod date;
mod error;
pub mod input;
mod logging;
mod request;
mod sanitizer;
mod tainted;
mod value;
mod verified;

#[cfg(test)]
mod test_utils;

pub use catalog::{default_catalog, CatalogBuilder, MessageCatalog};
pub use config::InputConfig;
pub use error::Error;
pub use logging::RequestLog;
pub use request::RequestMeta;
pub use sanitizer::{
    builtin_clean, clean, clean_bytes, clean_input_key, discard_invalid_utf8, normalize_newlines,
    strip_ascii_ctrl, xss_clean, AmmoniaPurifier, EncodingSanitizer, MarkupPurifier, Sanitizer,
    XssFilter, XssMode,
};
pub use tainted::Tainted;
pub use value::InputValue;
pub use verified::Verified;
