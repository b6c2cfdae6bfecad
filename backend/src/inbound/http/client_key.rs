//! Client bucketing key for rate limiting.
//!
//! The key is the client's network address as seen through the proxy chain:
//! the first `X-Forwarded-For` hop, then `X-Real-IP`, then the transport
//! peer address. Requests exposing none of these share one fallback bucket,
//! which fails closed: a misconfigured proxy tier cannot grant unlimited
//! quota.

use std::fmt;

use actix_web::HttpRequest;

/// Proxy header listing the forwarding chain, client first.
pub const FORWARDED_FOR_HEADER: &str = "X-Forwarded-For";
/// Proxy header carrying the original client address.
pub const REAL_IP_HEADER: &str = "X-Real-IP";

const FALLBACK_KEY: &str = "unknown";

/// Identifier used to bucket rate-limit counts for one client.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientKey(String);

impl ClientKey {
    /// Derive the key for `req` following the header precedence above.
    pub fn from_request(req: &HttpRequest) -> Self {
        if let Some(forwarded) = header_value(req, FORWARDED_FOR_HEADER) {
            if let Some(first_hop) = forwarded
                .split(',')
                .map(str::trim)
                .find(|hop| !hop.is_empty())
            {
                return Self(first_hop.to_owned());
            }
        }

        if let Some(real_ip) = header_value(req, REAL_IP_HEADER) {
            let trimmed = real_ip.trim();
            if !trimmed.is_empty() {
                return Self(trimmed.to_owned());
            }
        }

        match req.peer_addr() {
            Some(addr) => Self(addr.ip().to_string()),
            None => Self(FALLBACK_KEY.to_owned()),
        }
    }

    /// The key value.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ClientKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn header_value<'r>(req: &'r HttpRequest, name: &str) -> Option<&'r str> {
    req.headers().get(name).and_then(|value| value.to_str().ok())
}
