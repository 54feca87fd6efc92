//! Request metadata recorded on sessions and page views.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::header::USER_AGENT;
use axum::http::request::Parts;

use crate::state::AppState;

/// Longest user agent stored.
const MAX_USER_AGENT_LEN: usize = 512;
/// Matches `ip_address VARCHAR(64)`.
const MAX_IP_LEN: usize = 64;

/// Caller's user agent and IP address, both best-effort.
///
/// The IP is the peer address (requires
/// `into_make_service_with_connect_info::<SocketAddr>`). The first
/// `x-forwarded-for` hop is used instead only when `TRUST_PROXY` is enabled.
#[derive(Debug, Clone, Default)]
pub struct ClientMeta {
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}

impl ClientMeta {
    fn from_parts(parts: &Parts, trust_proxy: bool) -> Self {
        let user_agent = parts
            .headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| clip(v, MAX_USER_AGENT_LEN));

        let forwarded = trust_proxy
            .then(|| parts.headers.get("x-forwarded-for"))
            .flatten()
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .and_then(|v| clip(v, MAX_IP_LEN));

        let ip_address = forwarded.or_else(|| {
            parts
                .extensions
                .get::<ConnectInfo<SocketAddr>>()
                .and_then(|ConnectInfo(addr)| clip(&addr.ip().to_string(), MAX_IP_LEN))
        });

        ClientMeta {
            user_agent,
            ip_address,
        }
    }
}

impl FromRequestParts<AppState> for ClientMeta {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts, state.config.trust_proxy))
    }
}

/// Trim, drop blanks, and cut at `max` characters.
pub(crate) fn clip(value: &str, max: usize) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    Some(value.chars().take(max).collect())
}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;

    fn request_via_proxy() -> Request<()> {
        let mut request = Request::builder()
            .header(USER_AGENT, "test-agent")
            .header("x-forwarded-for", "203.0.113.9, 10.0.0.1")
            .body(())
            .unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([198, 51, 100, 7], 4000))));
        request
    }

    fn extract(request: Request<()>, trust_proxy: bool) -> ClientMeta {
        let (parts, _) = request.into_parts();
        ClientMeta::from_parts(&parts, trust_proxy)
    }

    #[test]
    fn forwarded_for_is_ignored_by_default() {
        let meta = extract(request_via_proxy(), false);
        assert_eq!(meta.user_agent.as_deref(), Some("test-agent"));
        assert_eq!(meta.ip_address.as_deref(), Some("198.51.100.7"));
    }

    #[test]
    fn forwarded_for_wins_when_proxy_is_trusted() {
        let meta = extract(request_via_proxy(), true);
        assert_eq!(meta.ip_address.as_deref(), Some("203.0.113.9"));
    }

    #[test]
    fn peer_address_is_the_fallback() {
        let mut request = Request::builder().body(()).unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([192, 168, 1, 2], 50000))));

        let meta = extract(request, true);
        assert_eq!(meta.user_agent, None);
        assert_eq!(meta.ip_address.as_deref(), Some("192.168.1.2"));
    }

    #[test]
    fn clip_trims_and_truncates() {
        assert_eq!(clip("   ", 10), None);
        assert_eq!(clip(" abcdef ", 3).as_deref(), Some("abc"));
    }
}
