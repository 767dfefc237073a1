//! Request adapter and the per-request input container.

use std::net::{IpAddr, Ipv4Addr};

use indexmap::IndexMap;
use once_cell::sync::{Lazy, OnceCell};
use regex::Regex;

use crate::logging::RequestLog;
use crate::request::RequestMeta;
use crate::sanitizer::{self, normalize_newlines, validate_keys};
use crate::{Error, InputConfig, InputValue, Sanitizer, Tainted, Verified, XssFilter, XssMode};

/// Server variable carrying the `X-Forwarded-For` header.
pub const FORWARDED_FOR: &str = "HTTP_X_FORWARDED_FOR";
/// Server variable carrying the `X-Real-IP` header.
pub const REAL_IP: &str = "HTTP_X_REAL_IP";
/// Server variable carrying the `Client-IP` header.
pub const CLIENT_IP: &str = "HTTP_CLIENT_IP";
/// Server variable carrying the peer address.
pub const REMOTE_ADDR: &str = "REMOTE_ADDR";

/// Where a request value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// URL query string
    Get,
    /// Form or JSON body
    Post,
    /// Cookies
    Cookie,
    /// Server and header variables
    Server,
}

impl Source {
    fn index(self) -> usize {
        match self {
            Source::Get => 0,
            Source::Post => 1,
            Source::Cookie => 2,
            Source::Server => 3,
        }
    }
}

/// Builder collecting raw request data before ingestion.
///
/// Integrations fill an adapter from their framework's request type (see
/// [`ExtractInput`](super::ExtractInput)) and then call
/// [`into_input`](Self::into_input) once per request.
///
/// # Examples
///
/// ```
/// use request_hygiene::input::RequestAdapter;
/// use request_hygiene::InputConfig;
///
/// let mut adapter = RequestAdapter::new("req-12345");
/// adapter.add_query_param("search", "user input");
///
/// let input = adapter.into_input(&InputConfig::default()).unwrap();
/// assert_eq!(input.request_id(), "req-12345");
/// assert!(input.get("search").is_some());
/// ```
#[derive(Debug, Clone)]
pub struct RequestAdapter {
    meta: RequestMeta,
    sources: [IndexMap<String, InputValue>; 4],
}

impl RequestAdapter {
    /// Creates an empty adapter for the given request id.
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            meta: RequestMeta::new(request_id),
            sources: Default::default(),
        }
    }

    /// Sets the address of the directly connected peer.
    pub fn set_remote_addr(&mut self, addr: Option<IpAddr>) {
        self.meta.remote_addr = addr;
    }

    /// Adds a query parameter.
    pub fn add_query_param(&mut self, key: impl Into<String>, value: impl Into<InputValue>) {
        self.add(Source::Get, key.into(), value.into());
    }

    /// Adds a body field.
    pub fn add_body_field(&mut self, key: impl Into<String>, value: impl Into<InputValue>) {
        self.add(Source::Post, key.into(), value.into());
    }

    /// Adds a cookie.
    pub fn add_cookie(&mut self, key: impl Into<String>, value: impl Into<InputValue>) {
        self.add(Source::Cookie, key.into(), value.into());
    }

    /// Adds a server variable, e.g. `HTTP_X_FORWARDED_FOR`.
    pub fn add_server_var(&mut self, key: impl Into<String>, value: impl Into<InputValue>) {
        self.add(Source::Server, key.into(), value.into());
    }

    /// Replaces a whole source with a decoded tree, such as a JSON body.
    ///
    /// Anything other than a map is replaced by an empty map.
    pub fn set_source(&mut self, source: Source, value: InputValue) {
        self.sources[source.index()] = match value {
            InputValue::Map(map) => map,
            _ => IndexMap::new(),
        };
    }

    fn add(&mut self, source: Source, key: String, value: InputValue) {
        self.sources[source.index()].insert(key, value);
    }

    /// Returns the request metadata collected so far.
    pub fn meta(&self) -> &RequestMeta {
        &self.meta
    }

    /// Cleans every source and freezes the result.
    ///
    /// Every source gets encoding cleanup ([`clean`](crate::clean)). Query,
    /// body and cookie data then go through key validation, global XSS
    /// filtering when configured, and newline normalization. Server
    /// variables are set by the web server and only get the encoding cleanup.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DisallowedKey`] if any query, body or cookie key, at
    /// any depth, contains characters outside the allowed set.
    pub fn into_input(self, config: &InputConfig) -> Result<RequestInput, Error> {
        let log = RequestLog::new(&self.meta.request_id);
        let filter = config.global_xss_filtering.map(XssFilter::new);

        let ingest = |source: Source, raw: IndexMap<String, InputValue>| {
            let value = Tainted::new(InputValue::Map(raw)).map(sanitizer::clean);
            if matches!(source, Source::Server) {
                return Ok(value);
            }

            if let Err(err) = validate_keys(value.peek()) {
                log.warn(format_args!("rejected {:?} data: {}", source, err));
                return Err(err);
            }

            let value = match &filter {
                Some(filter) => value.map(|v| filter.clean_value(v)),
                None => value,
            };
            Ok(value.map(|v| v.map_leaves(&mut normalize_newlines)))
        };

        let [get, post, cookie, server] = self.sources;
        let sources = [
            ingest(Source::Get, get)?,
            ingest(Source::Post, post)?,
            ingest(Source::Cookie, cookie)?,
            ingest(Source::Server, server)?,
        ];

        log.debug(format_args!(
            "request input sanitized (get={}, post={}, cookie={}, server={})",
            sources[0].peek().len(),
            sources[1].peek().len(),
            sources[2].peek().len(),
            sources[3].peek().len(),
        ));

        Ok(RequestInput {
            global_xss_filtering: config.global_xss_filtering,
            trusted_proxies: config.trusted_proxies.clone(),
            sources,
            ip_address: OnceCell::new(),
            meta: self.meta,
        })
    }
}

static KEY_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]").expect("Invalid key path regex pattern"));

/// Splits `user[address][city]` into `["user", "address", "city"]`.
fn split_key_path(path: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    match path.find('[') {
        Some(open) if KEY_SEGMENT.is_match(path) => {
            parts.push(path[..open].trim());
            parts.extend(
                KEY_SEGMENT
                    .captures_iter(path)
                    .filter_map(|c| c.get(1).map(|m| m.as_str())),
            );
        }
        _ => parts.push(path),
    }
    parts
}

/// Immutable, cleaned request data for one request.
///
/// Values stay [`Tainted`]: encoding cleanup and key validation have run,
/// but markup has only been neutralized if global XSS filtering was
/// configured. Use the `*_xss_clean` accessors, or run your own
/// [`Sanitizer`](crate::Sanitizer), to obtain [`Verified`] values.
#[derive(Debug)]
pub struct RequestInput {
    meta: RequestMeta,
    global_xss_filtering: Option<XssMode>,
    trusted_proxies: Vec<IpAddr>,
    sources: [Tainted<InputValue>; 4],
    ip_address: OnceCell<IpAddr>,
}

impl RequestInput {
    /// Returns the request id.
    pub fn request_id(&self) -> &str {
        &self.meta.request_id
    }

    /// Returns the request metadata.
    pub fn meta(&self) -> &RequestMeta {
        &self.meta
    }

    /// Returns a logger tagged with this request's id.
    pub fn log(&self) -> RequestLog<'_> {
        RequestLog::new(&self.meta.request_id)
    }

    /// Returns a whole source tree.
    pub fn all(&self, source: Source) -> Tainted<InputValue> {
        self.sources[source.index()].clone()
    }

    /// Looks up `key_path` in `source`.
    ///
    /// `key_path` is either a plain key or a bracketed path such as
    /// `user[address][city]`; list elements are addressed by index.
    pub fn fetch(&self, source: Source, key_path: &str) -> Option<Tainted<InputValue>> {
        let mut node = self.sources[source.index()].peek();
        for segment in split_key_path(key_path) {
            node = node.get(segment)?;
        }
        Some(Tainted::new(node.clone()))
    }

    /// Looks up `key_path` and neutralizes script-injection vectors.
    ///
    /// With global filtering configured, query, body and cookie values have
    /// already been filtered and are returned as is; otherwise the built-in
    /// filter runs.
    pub fn fetch_xss_clean(&self, source: Source, key_path: &str) -> Option<Verified<InputValue>> {
        let value = self.fetch(source, key_path)?;
        Some(match self.global_xss_filtering {
            Some(_) if source != Source::Server => Verified::new_unchecked(value.into_inner()),
            _ => XssFilter::new(XssMode::BuiltIn).sanitize(value),
        })
    }

    /// Looks up a query parameter.
    pub fn get(&self, key_path: &str) -> Option<Tainted<InputValue>> {
        self.fetch(Source::Get, key_path)
    }

    /// Looks up a body field.
    pub fn post(&self, key_path: &str) -> Option<Tainted<InputValue>> {
        self.fetch(Source::Post, key_path)
    }

    /// Looks up a cookie.
    pub fn cookie(&self, key_path: &str) -> Option<Tainted<InputValue>> {
        self.fetch(Source::Cookie, key_path)
    }

    /// Looks up a server variable.
    pub fn server(&self, key_path: &str) -> Option<Tainted<InputValue>> {
        self.fetch(Source::Server, key_path)
    }

    /// Looks up a query parameter with XSS filtering.
    pub fn get_xss_clean(&self, key_path: &str) -> Option<Verified<InputValue>> {
        self.fetch_xss_clean(Source::Get, key_path)
    }

    /// Looks up a body field with XSS filtering.
    pub fn post_xss_clean(&self, key_path: &str) -> Option<Verified<InputValue>> {
        self.fetch_xss_clean(Source::Post, key_path)
    }

    /// Looks up a cookie with XSS filtering.
    pub fn cookie_xss_clean(&self, key_path: &str) -> Option<Verified<InputValue>> {
        self.fetch_xss_clean(Source::Cookie, key_path)
    }

    /// Reads a server variable as an IP address.
    fn server_ip(&self, key: &str, rightmost: bool) -> Option<IpAddr> {
        let value = self.sources[Source::Server.index()].peek().get(key)?;
        let text = value.as_str()?;
        let candidate = if rightmost {
            text.rsplit(',').map(str::trim).find(|s| !s.is_empty())?
        } else {
            text.trim()
        };
        candidate.parse().ok()
    }

    /// Resolves the client IP address.
    ///
    /// Forwarding headers (`X-Forwarded-For`, then `X-Real-IP`, then
    /// `Client-IP`) are only believed when the directly connected peer is a
    /// configured trusted proxy; `X-Forwarded-For` contributes its right-most
    /// entry. Otherwise the peer address is used, falling back to the
    /// `REMOTE_ADDR` server variable. Missing or invalid addresses resolve to
    /// `0.0.0.0`. The result is computed once per request.
    pub fn ip_address(&self) -> IpAddr {
        *self.ip_address.get_or_init(|| {
            let peer = self
                .meta
                .remote_addr
                .or_else(|| self.server_ip(REMOTE_ADDR, false));

            let forwarded = match peer {
                Some(addr) if self.trusted_proxies.contains(&addr) => self
                    .server_ip(FORWARDED_FOR, true)
                    .or_else(|| self.server_ip(REAL_IP, false))
                    .or_else(|| self.server_ip(CLIENT_IP, false)),
                _ => None,
            };

            let resolved = forwarded.or(peer);
            if resolved.is_none() {
                self.log()
                    .debug(format_args!("no valid client address, using 0.0.0.0"));
            }
            resolved.unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    #[test]
    fn split_plain_and_bracketed_paths() {
        assert_eq!(split_key_path("name"), vec!["name"]);
        assert_eq!(split_key_path("user[address][city]"), vec!["user", "address", "city"]);
        assert_eq!(split_key_path(" tags [0]"), vec!["tags", "0"]);
        assert_eq!(split_key_path("odd[]"), vec!["odd[]"]);
    }

    #[test]
    fn nested_lookup_walks_maps_and_lists() {
        let mut adapter = RequestAdapter::new("req-1");
        let user: InputValue = [
            ("name", InputValue::from("alice")),
            ("tags", InputValue::from(vec!["a", "b"])),
        ]
        .into_iter()
        .collect();
        adapter.add_body_field("user", user);

        let input = adapter.into_input(&InputConfig::default()).unwrap();

        let name = input.post("user[name]").expect("present");
        assert_eq!(name.peek().as_str(), Some("alice"));
        let tag = input.post("user[tags][1]").expect("present");
        assert_eq!(tag.peek().as_str(), Some("b"));
        assert!(input.post("user[missing]").is_none());
        assert!(input.get("user").is_none());
    }

    #[test]
    fn ingestion_cleans_and_normalizes() {
        let mut adapter = RequestAdapter::new("req-2");
        adapter.add_body_field("comment", "line1\r\nline2\u{0}\rline3");

        let input = adapter.into_input(&InputConfig::default()).unwrap();

        let comment = input.post("comment").unwrap();
        assert_eq!(comment.peek().as_str(), Some("line1\nline2\nline3"));
    }

    #[test]
    fn ingestion_rejects_disallowed_keys() {
        let mut adapter = RequestAdapter::new("req-3");
        adapter.add_cookie("bad key", "v");

        let err = adapter.into_input(&InputConfig::default()).unwrap_err();
        assert!(matches!(err, Error::DisallowedKey { len: 7 }));
    }

    #[test]
    fn server_variables_only_get_encoding_cleanup() {
        let mut adapter = RequestAdapter::new("req-3b");
        adapter.add_server_var("HTTP ODD<KEY>", "a\r\nb\u{0}");
        let config = InputConfig::default().with_global_xss_filtering(XssMode::BuiltIn);

        let input = adapter.into_input(&config).unwrap();

        let value = input.server("HTTP ODD<KEY>").expect("kept");
        assert_eq!(value.peek().as_str(), Some("a\r\nb"));
    }

    #[test]
    fn server_values_are_filtered_on_lookup_even_with_global_filtering() {
        let mut adapter = RequestAdapter::new("req-3c");
        adapter.add_server_var("HTTP_REFERER", "<script>x</script>home");
        let config = InputConfig::default().with_global_xss_filtering(XssMode::BuiltIn);

        let input = adapter.into_input(&config).unwrap();

        let referer = input.fetch_xss_clean(Source::Server, "HTTP_REFERER").unwrap();
        assert_eq!(referer.as_ref().as_str(), Some("xhome"));
    }

    #[test]
    fn control_characters_in_keys_are_stripped_before_validation() {
        let mut adapter = RequestAdapter::new("req-4");
        adapter.add_query_param("pa\u{0}ge", "2");

        let input = adapter.into_input(&InputConfig::default()).unwrap();
        assert!(input.get("page").is_some());
    }

    #[test]
    fn global_filtering_applies_at_ingestion() {
        let mut adapter = RequestAdapter::new("req-5");
        adapter.add_query_param("q", "<script>alert(1)</script>hi");
        let config = InputConfig::default().with_global_xss_filtering(XssMode::BuiltIn);

        let input = adapter.into_input(&config).unwrap();

        assert_eq!(input.get("q").unwrap().peek().as_str(), Some("alert(1)hi"));
        assert_eq!(
            input.get_xss_clean("q").unwrap().as_ref().as_str(),
            Some("alert(1)hi")
        );
    }

    #[test]
    fn lookup_filtering_applies_when_global_is_off() {
        let mut adapter = RequestAdapter::new("req-6");
        adapter.add_query_param("q", "<img src=x onerror=alert(1)>");

        let input = adapter.into_input(&InputConfig::default()).unwrap();

        assert_eq!(
            input.get("q").unwrap().peek().as_str(),
            Some("<img src=x onerror=alert(1)>")
        );
        assert_eq!(
            input.get_xss_clean("q").unwrap().as_ref().as_str(),
            Some("<img src=x >")
        );
    }

    #[test]
    fn non_map_source_becomes_empty() {
        let mut adapter = RequestAdapter::new("req-7");
        adapter.set_source(Source::Post, InputValue::from("raw body"));

        let input = adapter.into_input(&InputConfig::default()).unwrap();
        assert!(input.all(Source::Post).peek().is_empty());
    }

    #[test]
    fn ip_ignores_forwarded_headers_from_untrusted_peer() {
        let mut adapter = RequestAdapter::new("req-8");
        adapter.set_remote_addr(Some(ip("203.0.113.9")));
        adapter.add_server_var(FORWARDED_FOR, "1.2.3.4");
        adapter.add_server_var(CLIENT_IP, "5.6.7.8");

        let input = adapter.into_input(&InputConfig::default()).unwrap();
        assert_eq!(input.ip_address(), ip("203.0.113.9"));
    }

    #[test]
    fn ip_uses_rightmost_forwarded_entry_from_trusted_proxy() {
        let mut adapter = RequestAdapter::new("req-9");
        adapter.set_remote_addr(Some(ip("10.0.0.1")));
        adapter.add_server_var(FORWARDED_FOR, "9.9.9.9, 198.51.100.7");
        let config = InputConfig::default().trust_proxy(ip("10.0.0.1"));

        let input = adapter.into_input(&config).unwrap();
        assert_eq!(input.ip_address(), ip("198.51.100.7"));
    }

    #[test]
    fn ip_falls_back_through_headers_then_peer() {
        let mut adapter = RequestAdapter::new("req-10");
        adapter.set_remote_addr(Some(ip("10.0.0.1")));
        adapter.add_server_var(FORWARDED_FOR, "not-an-ip");
        adapter.add_server_var(REAL_IP, "2001:db8::1");
        let config = InputConfig::default().trust_proxy(ip("10.0.0.1"));

        let input = adapter.into_input(&config).unwrap();
        assert_eq!(input.ip_address(), ip("2001:db8::1"));
    }

    #[test]
    fn ip_uses_remote_addr_variable_without_peer() {
        let mut adapter = RequestAdapter::new("req-11");
        adapter.add_server_var(REMOTE_ADDR, "192.0.2.5");

        let input = adapter.into_input(&InputConfig::default()).unwrap();
        assert_eq!(input.ip_address(), ip("192.0.2.5"));
    }

    #[test]
    fn ip_defaults_to_unspecified() {
        let mut adapter = RequestAdapter::new("req-12");
        adapter.add_server_var(REMOTE_ADDR, "garbage");

        let input = adapter.into_input(&InputConfig::default()).unwrap();
        assert_eq!(input.ip_address(), ip("0.0.0.0"));
        // memoized
        assert_eq!(input.ip_address(), ip("0.0.0.0"));
    }
}
