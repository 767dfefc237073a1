//! Request ingestion surface.
//!
//! This module is the boundary between an HTTP framework and the sanitizers.
//! It handles:
//! - Collecting query, body, cookie and server data as [`InputValue`](crate::InputValue) trees
//! - Cleaning encoding and validating keys once per request
//! - Keeping values [`Tainted`](crate::Tainted) until a sanitizer runs
//! - Resolving the client IP under an explicit trusted-proxy policy
//!
//! # Design Principles
//!
//! 1. **No Framework Dependencies**: integrations implement [`ExtractInput`].
//! 2. **No Global State**: every request gets its own immutable
//!    [`RequestInput`], passed explicitly to application code.
//! 3. **Forwarding headers are untrusted** unless the peer is a configured
//!    proxy.
//!
//! # Example Flow
//!
//! ```
//! use request_hygiene::input::{RequestAdapter, Source};
//! use request_hygiene::{InputConfig, InputValue};
//!
//! let mut adapter = RequestAdapter::new("req-1");
//! adapter.set_remote_addr(Some("203.0.113.7".parse().unwrap()));
//! adapter.add_body_field("bio", "<b onmouseover=\"x()\">hi</b>");
//!
//! let input = adapter.into_input(&InputConfig::default()).unwrap();
//!
//! let bio = input.fetch_xss_clean(Source::Post, "bio").unwrap();
//! assert_eq!(bio.as_ref(), &InputValue::from("<b >hi</b>"));
//! assert_eq!(input.ip_address().to_string(), "203.0.113.7");
//! ```

mod adapter;
mod extract;

pub use adapter::{RequestAdapter, RequestInput, Source, CLIENT_IP, FORWARDED_FOR, REAL_IP, REMOTE_ADDR};
pub use extract::ExtractInput;
