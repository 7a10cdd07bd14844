//! In-memory adapter blocks for decode and source tests.
//!
//! Nodes are leaked so that the raw links between them stay valid for the
//! whole test; lists are built back to front so no node is written after a
//! pointer to it has been handed out.

use std::ffi::{CString, c_char};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::ptr;

use crate::layout::{
    AF_INET, AF_INET6, IpAdapterAddresses, IpAdapterDnsServerAddress, IpAdapterDnsSuffix,
    IpAdapterGatewayAddress, IpAdapterPrefix, IpAdapterUnicastAddress, IpAdapterWinsServerAddress,
    MAX_DNS_SUFFIX_STRING_LENGTH, SockAddr, SockAddrIn, SockAddrIn6, SocketAddress,
};

fn leak<T>(value: T) -> *const T {
    Box::leak(Box::new(value))
}

/// A `SOCKET_ADDRESS` pointing at a leaked `SOCKADDR_IN`.
pub fn v4(addr: Ipv4Addr, port: u16) -> SocketAddress {
    let sin = leak(SockAddrIn {
        sin_family: AF_INET,
        sin_port: port.to_be(),
        sin_addr: addr.octets(),
        sin_zero: [0; 8],
    });
    SocketAddress {
        sockaddr: sin.cast::<SockAddr>(),
        sockaddr_length: 16,
    }
}

/// A `SOCKET_ADDRESS` pointing at a leaked `SOCKADDR_IN6`.
pub fn v6(addr: Ipv6Addr, port: u16, scope_id: u32) -> SocketAddress {
    let sin6 = leak(SockAddrIn6 {
        sin6_family: AF_INET6,
        sin6_port: port.to_be(),
        sin6_flowinfo: 0,
        sin6_addr: addr.octets(),
        sin6_scope_id: scope_id,
    });
    SocketAddress {
        sockaddr: sin6.cast::<SockAddr>(),
        sockaddr_length: 28,
    }
}

/// A leaked, NUL-terminated UTF-16 copy of `s`.
pub fn wide(s: &str) -> *const u16 {
    let units: Vec<u16> = s.encode_utf16().chain(std::iter::once(0)).collect();
    Box::leak(units.into_boxed_slice()).as_ptr()
}

/// A leaked, NUL-terminated ANSI copy of `s`.
pub fn narrow(s: &str) -> *const c_char {
    CString::new(s).map_or(ptr::null(), |c| c.into_raw().cast_const())
}

/// A unicast node carrying `address` with typical lifetimes.
pub fn unicast_node(address: SocketAddress) -> IpAdapterUnicastAddress {
    IpAdapterUnicastAddress {
        length: 64,
        address,
        dad_state: 4,
        valid_lifetime: u32::MAX,
        preferred_lifetime: u32::MAX,
        lease_lifetime: u32::MAX,
        on_link_prefix_length: 24,
        ..IpAdapterUnicastAddress::default()
    }
}

/// Links `nodes` in order and returns the head.
pub fn unicast_list(nodes: Vec<IpAdapterUnicastAddress>) -> *const IpAdapterUnicastAddress {
    let mut next = ptr::null();
    for mut node in nodes.into_iter().rev() {
        node.next = next;
        next = leak(node);
    }
    next
}

/// Links one DNS server node per address and returns the head.
pub fn dns_server_list(addresses: Vec<SocketAddress>) -> *const IpAdapterDnsServerAddress {
    let mut next = ptr::null();
    for address in addresses.into_iter().rev() {
        next = leak(IpAdapterDnsServerAddress {
            length: 32,
            next,
            address,
            ..IpAdapterDnsServerAddress::default()
        });
    }
    next
}

/// Links one prefix node per `(address, prefix_length)` and returns the head.
pub fn prefix_list(prefixes: Vec<(SocketAddress, u32)>) -> *const IpAdapterPrefix {
    let mut next = ptr::null();
    for (address, prefix_length) in prefixes.into_iter().rev() {
        next = leak(IpAdapterPrefix {
            length: 48,
            next,
            address,
            prefix_length,
            ..IpAdapterPrefix::default()
        });
    }
    next
}

/// Links one gateway node per address and returns the head.
pub fn gateway_list(addresses: Vec<SocketAddress>) -> *const IpAdapterGatewayAddress {
    let mut next = ptr::null();
    for address in addresses.into_iter().rev() {
        next = leak(IpAdapterGatewayAddress {
            length: 32,
            next,
            address,
            ..IpAdapterGatewayAddress::default()
        });
    }
    next
}

/// Links one WINS server node per address and returns the head.
pub fn wins_server_list(addresses: Vec<SocketAddress>) -> *const IpAdapterWinsServerAddress {
    let mut next = ptr::null();
    for address in addresses.into_iter().rev() {
        next = leak(IpAdapterWinsServerAddress {
            length: 32,
            next,
            address,
            ..IpAdapterWinsServerAddress::default()
        });
    }
    next
}

/// A DNS suffix node whose buffer holds `units` verbatim (no terminator added).
pub fn suffix_node_raw(units: &[u16]) -> IpAdapterDnsSuffix {
    let mut node = IpAdapterDnsSuffix::default();
    let len = units.len().min(MAX_DNS_SUFFIX_STRING_LENGTH);
    node.string[..len].copy_from_slice(&units[..len]);
    node
}

/// Links one DNS suffix node per string and returns the head.
pub fn dns_suffix_list(suffixes: &[&str]) -> *const IpAdapterDnsSuffix {
    let nodes: Vec<_> = suffixes
        .iter()
        .map(|s| suffix_node_raw(&s.encode_utf16().collect::<Vec<_>>()))
        .collect();
    suffix_list(nodes)
}

/// Links prebuilt DNS suffix nodes and returns the head.
pub fn suffix_list(nodes: Vec<IpAdapterDnsSuffix>) -> *const IpAdapterDnsSuffix {
    let mut next = ptr::null();
    for mut node in nodes.into_iter().rev() {
        node.next = next;
        next = leak(node);
    }
    next
}

/// An adapter node with names, type and status filled in.
pub fn adapter_node(if_index: u32, friendly_name: &str, if_type: u32) -> IpAdapterAddresses {
    IpAdapterAddresses {
        length: 448,
        if_index,
        adapter_name: narrow(&format!("{{ADAPTER-{if_index}}}")),
        friendly_name: wide(friendly_name),
        description: wide(&format!("{friendly_name} Controller")),
        dns_suffix: wide(""),
        if_type,
        oper_status: 1,
        mtu: 1500,
        ..IpAdapterAddresses::default()
    }
}

/// Links adapter nodes in order and returns the head.
pub fn adapter_chain(nodes: Vec<IpAdapterAddresses>) -> *const IpAdapterAddresses {
    let mut next = ptr::null();
    for mut node in nodes.into_iter().rev() {
        node.next = next;
        next = leak(node);
    }
    next
}
