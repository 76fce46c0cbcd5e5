use std::net::IpAddr;

use axum::http::HeaderMap;
use ipnet::IpNet;

/// Who sent a submission. Logged only, never written to a sheet.
#[derive(Debug, Clone)]
pub struct ClientInfo {
    pub ip: String,
    pub user_agent: String,
    pub referer: String,
}

/// Extract client metadata from request headers.
pub fn extract(
    headers: &HeaderMap,
    peer_addr: Option<IpAddr>,
    trusted_proxies: &[IpNet],
) -> ClientInfo {
    ClientInfo {
        ip: extract_ip(headers, peer_addr, trusted_proxies),
        user_agent: header_str(headers, "user-agent"),
        referer: header_str(headers, "referer"),
    }
}

fn header_str(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string()
}

pub fn extract_ip(
    headers: &HeaderMap,
    peer_addr: Option<IpAddr>,
    trusted_proxies: &[IpNet],
) -> String {
    let peer = peer_addr.unwrap_or(IpAddr::from([127, 0, 0, 1]));

    // Only trust X-Forwarded-For if the direct connection is from a trusted proxy
    if trusted_proxies.iter().any(|net| net.contains(&peer)) {
        if let Some(xff) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
            // Rightmost hop that is not one of our proxies
            for ip_str in xff.rsplit(',').map(str::trim) {
                if let Ok(ip) = ip_str.parse::<IpAddr>() {
                    if !trusted_proxies.iter().any(|net| net.contains(&ip)) {
                        return ip.to_string();
                    }
                }
            }
        }
    }

    peer.to_string()
}
