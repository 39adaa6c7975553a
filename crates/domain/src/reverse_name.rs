//! Conversion between IP addresses and their `in-addr.arpa` / `ip6.arpa` names.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

const IPV4_ARPA: &str = ".in-addr.arpa";
const IPV6_ARPA: &str = ".ip6.arpa";

/// Extracts the address encoded in a reverse lookup name.
///
/// `4.3.2.1.in-addr.arpa.` yields `1.2.3.4`; the 32-nibble `ip6.arpa` form
/// yields the full IPv6 address. The trailing root label is optional and the
/// suffix is matched case-insensitively. Partial names (e.g. a /24 zone apex)
/// return `None`.
pub fn extract_address(name: &str) -> Option<IpAddr> {
    let name = name.strip_suffix('.').unwrap_or(name);
    let lower = name.to_ascii_lowercase();

    if let Some(labels) = lower.strip_suffix(IPV4_ARPA) {
        return extract_ipv4(labels).map(IpAddr::V4);
    }
    if let Some(labels) = lower.strip_suffix(IPV6_ARPA) {
        return extract_ipv6(labels).map(IpAddr::V6);
    }
    None
}

fn extract_ipv4(labels: &str) -> Option<Ipv4Addr> {
    let octets: Vec<&str> = labels.split('.').rev().collect();
    if octets.len() != 4 {
        return None;
    }
    octets.join(".").parse().ok()
}

fn extract_ipv6(labels: &str) -> Option<Ipv6Addr> {
    let nibbles: Vec<&str> = labels.split('.').collect();
    if nibbles.len() != 32 {
        return None;
    }

    let mut value: u128 = 0;
    for nibble in nibbles.iter().rev() {
        if nibble.len() != 1 {
            return None;
        }
        let digit = u8::from_str_radix(nibble, 16).ok()?;
        value = (value << 4) | u128::from(digit);
    }
    Some(Ipv6Addr::from(value))
}

/// Builds the reverse lookup name for `ip`, without the trailing root label.
pub fn ip_to_reverse_domain(ip: &IpAddr) -> String {
    match ip {
        IpAddr::V4(ipv4) => {
            let octets = ipv4.octets();
            format!(
                "{}.{}.{}.{}.in-addr.arpa",
                octets[3], octets[2], octets[1], octets[0]
            )
        }
        IpAddr::V6(ipv6) => {
            let mut nibbles = Vec::with_capacity(32);
            for byte in ipv6.octets().iter().rev() {
                nibbles.push(format!("{:x}", byte & 0x0f));
                nibbles.push(format!("{:x}", (byte >> 4) & 0x0f));
            }
            format!("{}.ip6.arpa", nibbles.join("."))
        }
    }
}
