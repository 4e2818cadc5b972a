//! Client address resolution for request logs.
//!
//! Behind a local reverse proxy every peer is loopback, so the proxy's
//! forwarding headers are trusted only when the peer is loopback and the
//! request looks proxied (a websocket upgrade or `X-Forwarded-Proto: https`).

use std::net::{IpAddr, SocketAddr};

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{HeaderMap, Request};
use tracing::Span;

/// Best-effort client address for logging.
pub fn request_address(peer: Option<IpAddr>, headers: &HeaderMap) -> String {
    let Some(peer) = peer else {
        return "unknown".to_string();
    };

    if peer.is_loopback() && looks_proxied(headers) {
        if let Some(forwarded) = header_str(headers, "x-client-ip")
            .or_else(|| header_str(headers, "x-real-ip"))
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
        {
            return forwarded.to_string();
        }
    }

    peer.to_string()
}

fn looks_proxied(headers: &HeaderMap) -> bool {
    let upgrade = header_str(headers, "connection")
        .is_some_and(|v| v.eq_ignore_ascii_case("upgrade"));
    let https = header_str(headers, "x-forwarded-proto") == Some("https");
    upgrade || https
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Span factory for the router's `TraceLayer`.
pub fn request_span(req: &Request<Body>) -> Span {
    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());
    tracing::info_span!(
        "request",
        method = %req.method(),
        uri = %req.uri(),
        ip = %request_address(peer, req.headers()),
        ua = req
            .headers()
            .get("user-agent")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-")
    )
}
