use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{HeaderMap, HeaderValue, Request, Response},
    middleware::Next,
};
use tokio::time::Instant;
use tracing::{Level, warn};

use crate::init::state::ServerState;

const BUILD_TIME: &str = env!("BUILD_TIME");
const AXUM_VERSION: &str = env!("AXUM_VERSION");
const RUSTC_VERSION: &str = env!("RUSTC_VERSION");

const ERROR_HEADERS: [&str; 5] = [
    "x-error-log-level",
    "x-error-status-code",
    "x-error-code",
    "x-error-message",
    "x-error-detail",
];

// by default, debug and below not logged at all; hence why
macro_rules! log_codeerror {
    ($level:expr, $($field:tt)*) => {
        match $level {
            Level::ERROR => tracing::error!($($field)*),
            Level::WARN => tracing::warn!($($field)*),
            Level::INFO => tracing::info!($($field)*),
            Level::DEBUG => tracing::debug!($($field)*),
            Level::TRACE => tracing::trace!($($field)*),
        }
    };
}

/// The first `x-forwarded-for` hop when a proxy sent one, else the peer address.
fn client_ip(headers: &HeaderMap, peer: SocketAddr) -> Option<IpAddr> {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim);

    match forwarded {
        Some(raw) => match raw.parse() {
            Ok(ip) => Some(ip),
            Err(e) => {
                warn!(error = ?e, client_ip = raw, "Could not parse forwarded IP address");
                None
            }
        },
        None => Some(peer.ip()),
    }
}

fn header_value_to_str(value: Option<&HeaderValue>) -> Option<&str> {
    value.and_then(|v| v.to_str().ok())
}

pub async fn log_middleware(
    State(state): State<Arc<ServerState>>,
    ConnectInfo(info): ConnectInfo<SocketAddr>,
    request: Request<Body>,
    next: Next,
) -> Response<Body> {
    let start = Instant::now();

    state.add_responses_handled();

    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let client_ip = client_ip(request.headers(), info);

    tracing::info!(kind = %"RECV", method = %method, path = %path, client_ip = ?client_ip);

    let mut response = next.run(request).await;
    let duration = start.elapsed();
    let headers = response.headers_mut();

    if headers.contains_key("x-error-code") {
        let log_level = header_value_to_str(headers.get("x-error-log-level"))
            .and_then(|level| level.parse::<Level>().ok())
            .unwrap_or(Level::ERROR);
        let status_code = header_value_to_str(headers.get("x-error-status-code")).unwrap_or("");
        let error_code = header_value_to_str(headers.get("x-error-code")).unwrap_or("");
        let message = header_value_to_str(headers.get("x-error-message")).unwrap_or("");
        let detail = header_value_to_str(headers.get("x-error-detail")).unwrap_or("");

        log_codeerror!(
            log_level,
            kind = %"ERSP",
            method = %method,
            path = %path,
            client_ip = ?client_ip,
            status_code = %status_code,
            duration = ?duration,
            error_code = %error_code,
            message = %message,
            detail = %detail
        );

        for header in ERROR_HEADERS {
            headers.remove(header);
        }
    } else {
        tracing::info!(
            kind = %"RESP",
            method = %method,
            path = %path,
            client_ip = ?client_ip,
            status_code = %response.status().as_u16(),
            duration = ?duration
        );
    }

    let headers = response.headers_mut();
    headers.insert("x-server-built-time", HeaderValue::from_static(BUILD_TIME));
    headers.insert("x-server-name", HeaderValue::from_static(AXUM_VERSION));
    headers.insert(
        "x-server-rust-version",
        HeaderValue::from_static(RUSTC_VERSION),
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peer() -> SocketAddr {
        "10.0.0.7:51234".parse().unwrap()
    }

    #[test]
    fn forwarded_header_wins_over_peer() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.9, 10.0.0.1"));

        assert_eq!(client_ip(&headers, peer()), Some("203.0.113.9".parse().unwrap()));
    }

    #[test]
    fn peer_is_used_without_a_proxy_and_garbage_is_dropped() {
        assert_eq!(client_ip(&HeaderMap::new(), peer()), Some("10.0.0.7".parse().unwrap()));

        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("not-an-ip"));
        assert_eq!(client_ip(&headers, peer()), None);
    }
}
