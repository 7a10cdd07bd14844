//! Per-adapter linked-list node layouts.
//!
//! Nodes whose native definition starts with a `ULONGLONG Alignment` union
//! carry `align(8)` so that the 32-bit layout matches MSVC as well.

use super::{MAX_DNS_SUFFIX_STRING_LENGTH, SocketAddress};

/// Implements `Default` as the all-zero value.
///
/// All-zero is valid for every node type: null pointers and zero integers.
macro_rules! zeroed_default {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Default for $ty {
                fn default() -> Self {
                    // SAFETY: every field is an integer, an integer array, or a raw pointer.
                    unsafe { std::mem::zeroed() }
                }
            }
        )+
    };
}

pub(super) use zeroed_default;

/// `IP_ADAPTER_UNICAST_ADDRESS_LH`.
#[repr(C, align(8))]
#[derive(Debug, Clone, Copy)]
pub struct IpAdapterUnicastAddress {
    pub length: u32,
    pub flags: u32,
    pub next: *const Self,
    pub address: SocketAddress,
    /// `NL_PREFIX_ORIGIN`
    pub prefix_origin: i32,
    /// `NL_SUFFIX_ORIGIN`
    pub suffix_origin: i32,
    /// `NL_DAD_STATE`
    pub dad_state: i32,
    pub valid_lifetime: u32,
    pub preferred_lifetime: u32,
    pub lease_lifetime: u32,
    pub on_link_prefix_length: u8,
}

/// `IP_ADAPTER_ANYCAST_ADDRESS_XP`.
#[repr(C, align(8))]
#[derive(Debug, Clone, Copy)]
pub struct IpAdapterAnycastAddress {
    pub length: u32,
    pub flags: u32,
    pub next: *const Self,
    pub address: SocketAddress,
}

/// `IP_ADAPTER_MULTICAST_ADDRESS_XP`.
#[repr(C, align(8))]
#[derive(Debug, Clone, Copy)]
pub struct IpAdapterMulticastAddress {
    pub length: u32,
    pub flags: u32,
    pub next: *const Self,
    pub address: SocketAddress,
}

/// `IP_ADAPTER_DNS_SERVER_ADDRESS_XP`.
#[repr(C, align(8))]
#[derive(Debug, Clone, Copy)]
pub struct IpAdapterDnsServerAddress {
    pub length: u32,
    pub reserved: u32,
    pub next: *const Self,
    pub address: SocketAddress,
}

/// `IP_ADAPTER_PREFIX_XP`. Present only with `GAA_FLAG_INCLUDE_PREFIX`.
#[repr(C, align(8))]
#[derive(Debug, Clone, Copy)]
pub struct IpAdapterPrefix {
    pub length: u32,
    pub flags: u32,
    pub next: *const Self,
    pub address: SocketAddress,
    pub prefix_length: u32,
}

/// `IP_ADAPTER_WINS_SERVER_ADDRESS_LH`. Present only with `GAA_FLAG_INCLUDE_WINS_INFO`.
#[repr(C, align(8))]
#[derive(Debug, Clone, Copy)]
pub struct IpAdapterWinsServerAddress {
    pub length: u32,
    pub reserved: u32,
    pub next: *const Self,
    pub address: SocketAddress,
}

/// `IP_ADAPTER_GATEWAY_ADDRESS_LH`. Present only with `GAA_FLAG_INCLUDE_GATEWAYS`.
#[repr(C, align(8))]
#[derive(Debug, Clone, Copy)]
pub struct IpAdapterGatewayAddress {
    pub length: u32,
    pub reserved: u32,
    pub next: *const Self,
    pub address: SocketAddress,
}

/// `IP_ADAPTER_DNS_SUFFIX`.
///
/// `string` is a NUL-terminated UTF-16 buffer of fixed capacity.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct IpAdapterDnsSuffix {
    pub next: *const Self,
    pub string: [u16; MAX_DNS_SUFFIX_STRING_LENGTH],
}

zeroed_default!(
    IpAdapterUnicastAddress,
    IpAdapterAnycastAddress,
    IpAdapterMulticastAddress,
    IpAdapterDnsServerAddress,
    IpAdapterPrefix,
    IpAdapterWinsServerAddress,
    IpAdapterGatewayAddress,
    IpAdapterDnsSuffix,
);
