use std::net::{IpAddr, Ipv4Addr};

use tracing::debug;

/// Interfaces checked first when picking an address to advertise.
/// Conceptually "primary LAN interfaces".
const PREFERRED_IFACES: &[&str] = &["eth0", "en0"];

/// Best-guess IPv4 address for the URL clients browse to.
///
/// Addresses on preferred interfaces win, then any other non-loopback
/// IPv4 address, then loopback.
pub fn advertised_ip() -> IpAddr {
    match if_addrs::get_if_addrs() {
        Ok(ifaces) => {
            let candidates: Vec<(String, IpAddr)> = ifaces
                .into_iter()
                .map(|i| {
                    let ip = i.ip();
                    (i.name, ip)
                })
                .collect();
            pick_address(&candidates)
        }
        Err(e) => {
            debug!("Interface lookup failed ({}), advertising loopback", e);
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        }
    }
}

fn pick_address(candidates: &[(String, IpAddr)]) -> IpAddr {
    let mut preferred = Vec::new();
    let mut other = Vec::new();

    for (iface, ip) in candidates {
        if !ip.is_ipv4() || ip.is_loopback() {
            continue;
        }
        if PREFERRED_IFACES.contains(&iface.as_str()) {
            preferred.push(*ip);
        } else {
            other.push(*ip);
        }
    }

    preferred
        .into_iter()
        .chain(other)
        .next()
        .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST))
}
