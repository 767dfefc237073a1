use std::net::IpAddr;

/// Metadata about an incoming request.
///
/// Contains the request identifier used to correlate log events and the
/// address of the directly connected peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestMeta {
    /// Unique identifier for this request
    pub request_id: String,
    /// Socket address of the peer, if known
    pub remote_addr: Option<IpAddr>,
}

impl RequestMeta {
    /// Creates metadata with no known peer address.
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            remote_addr: None,
        }
    }
}
