//! Ingestion settings.
//!
//! The caller builds an [`InputConfig`] (directly or by deserializing its own
//! settings source) and passes it to [`RequestAdapter::into_input`](crate::input::RequestAdapter::into_input).
//! Nothing here reads files or the environment.

use std::net::IpAddr;

use serde::Deserialize;

use crate::XssMode;

/// Settings applied when request data is ingested.
///
/// # Examples
///
/// ```
/// use request_hygiene::{InputConfig, XssMode};
///
/// let config: InputConfig = serde_json::from_str(r#"{
///     "global_xss_filtering": "purifier",
///     "trusted_proxies": ["10.0.0.1"]
/// }"#).unwrap();
///
/// assert_eq!(config.global_xss_filtering, Some(XssMode::Purifier));
/// assert!(config.is_trusted_proxy("10.0.0.1".parse().unwrap()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Filter every ingested value with this strategy. `None` leaves XSS
    /// filtering to individual lookups.
    pub global_xss_filtering: Option<XssMode>,
    /// Peers whose forwarding headers are believed when resolving the client IP
    pub trusted_proxies: Vec<IpAddr>,
}

impl InputConfig {
    /// Enables global XSS filtering with `mode`.
    pub fn with_global_xss_filtering(mut self, mode: XssMode) -> Self {
        self.global_xss_filtering = Some(mode);
        self
    }

    /// Adds a trusted proxy address.
    pub fn trust_proxy(mut self, addr: IpAddr) -> Self {
        self.trusted_proxies.push(addr);
        self
    }

    /// Returns `true` if `addr` is a trusted proxy.
    pub fn is_trusted_proxy(&self, addr: IpAddr) -> bool {
        self.trusted_proxies.contains(&addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_no_filtering_and_no_proxies() {
        let config = InputConfig::default();

        assert_eq!(config.global_xss_filtering, None);
        assert!(config.trusted_proxies.is_empty());
    }

    #[test]
    fn empty_object_deserializes_to_default() {
        let config: InputConfig = serde_json::from_str("{}").unwrap();

        assert_eq!(config, InputConfig::default());
    }

    #[test]
    fn builder_methods_compose() {
        let proxy: IpAddr = "192.168.1.1".parse().unwrap();
        let config = InputConfig::default()
            .with_global_xss_filtering(XssMode::BuiltIn)
            .trust_proxy(proxy);

        assert_eq!(config.global_xss_filtering, Some(XssMode::BuiltIn));
        assert!(config.is_trusted_proxy(proxy));
        assert!(!config.is_trusted_proxy("192.168.1.2".parse().unwrap()));
    }
}
