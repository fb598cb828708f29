//! Client identification utilities
//!
//! Common functions for attributing requests to clients via HTTP
//! headers. The attribution feeds the anti-fraud fingerprint and is
//! stored with each vote.

use axum::http::{HeaderMap, header};
use std::net::IpAddr;

/// Request attribution recorded with a vote
///
/// Both fields may be empty when the client sent nothing usable; such
/// clients are then rate-limited as one population per polling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoteOrigin {
    pub source_ip: String,
    pub user_agent: String,
}

/// Extract vote attribution from request headers
pub fn extract_origin(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> VoteOrigin {
    let source_ip = extract_client_ip(headers, direct_ip)
        .map(|ip| ip.to_string())
        .unwrap_or_default();

    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    VoteOrigin {
        source_ip,
        user_agent,
    }
}

/// Extract client IP address from headers
///
/// Checks X-Forwarded-For header first (for reverse proxy setups),
/// then falls back to direct connection IP.
pub fn extract_client_ip(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Option<IpAddr> {
    // Check X-Forwarded-For header (first IP in the list)
    if let Some(xff) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first_ip) = xff.split(',').next() {
            if let Ok(ip) = first_ip.trim().parse::<IpAddr>() {
                return Some(ip);
            }
        }
    }
    direct_ip
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_client_ip_xff() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("192.168.1.1, 10.0.0.1"),
        );

        let ip = extract_client_ip(&headers, None);
        assert_eq!(ip, Some("192.168.1.1".parse().unwrap()));
    }

    #[test]
    fn test_extract_client_ip_direct() {
        let headers = HeaderMap::new();
        let direct: IpAddr = "127.0.0.1".parse().unwrap();

        let ip = extract_client_ip(&headers, Some(direct));
        assert_eq!(ip, Some(direct));
    }

    #[test]
    fn test_extract_origin() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            HeaderValue::from_static("Mozilla/5.0 Test Browser"),
        );

        let origin = extract_origin(&headers, Some("10.1.2.3".parse().unwrap()));
        assert_eq!(origin.source_ip, "10.1.2.3");
        assert_eq!(origin.user_agent, "Mozilla/5.0 Test Browser");
    }

    #[test]
    fn test_extract_origin_tolerates_missing_headers() {
        let origin = extract_origin(&HeaderMap::new(), None);
        assert_eq!(origin, VoteOrigin::default());
    }
}
