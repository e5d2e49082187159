//! Address and URL validators.

use std::net::{Ipv4Addr, Ipv6Addr};

pub fn is_ipv4(candidate: &str) -> bool {
    candidate.parse::<Ipv4Addr>().is_ok()
}

pub fn is_ipv6(candidate: &str) -> bool {
    candidate.parse::<Ipv6Addr>().is_ok()
}

pub fn is_ip(candidate: &str) -> bool {
    is_ipv4(candidate) || is_ipv6(candidate)
}

pub fn is_valid_url(candidate: &str) -> bool {
    url::Url::parse(candidate).is_ok()
}
