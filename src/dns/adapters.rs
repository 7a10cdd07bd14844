//! Name servers taken from adapter DNS server lists.

use std::net::{IpAddr, Ipv6Addr, SocketAddr};

use super::{DEFAULT_SEARCH_DOMAIN, DNS_PORT, NameServers};
use crate::network::AdapterRecord;

/// Collects the DNS servers of every adapter that is up into the default domain.
///
/// IPv4 servers are always kept. IPv6 servers are kept unless they are
/// site-local (`fec0::/10`), which Windows reports as well-known placeholders
/// on adapters without a real IPv6 resolver. Every server is reported on
/// [`DNS_PORT`], whatever port the OS block carried.
#[must_use]
pub fn name_servers_from_adapters(adapters: &[AdapterRecord]) -> NameServers {
    let mut servers = NameServers::new();

    for adapter in adapters.iter().filter(|a| a.oper_status.is_up()) {
        for server in &adapter.dns_servers {
            let ip = server.ip();
            match ip {
                IpAddr::V6(v6) if is_site_local(&v6) => {
                    tracing::trace!(
                        "Skipped site-local IPv6 server address {v6} on adapter index {}",
                        adapter.if_index
                    );
                }
                _ => {
                    servers.insert(DEFAULT_SEARCH_DOMAIN, SocketAddr::new(ip, DNS_PORT));
                }
            }
        }
    }

    servers
}

/// Returns true for addresses in the deprecated site-local range `fec0::/10`.
#[must_use]
pub const fn is_site_local(ip: &Ipv6Addr) -> bool {
    ip.segments()[0] & 0xffc0 == 0xfec0
}
