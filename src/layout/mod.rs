//! Native memory layouts produced by `GetAdaptersAddresses`.
//!
//! Every type in this module is `#[repr(C)]` and mirrors a structure from the
//! Windows SDK headers (`iptypes.h`, `ws2def.h`, `ws2ipdef.h`, `ifdef.h`,
//! `guiddef.h`). Field order, widths and padding follow the native ABI and are
//! checked by the offset tests in `layout_tests.rs`.
//!
//! The types are plain data and compile on every platform so the layouts and
//! the traversal code can be exercised without a Windows host. Reading them
//! out of an OS-owned block is done by [`crate::network::decode`].

mod adapter;
mod address;
pub mod chain;
mod sockaddr;


pub use adapter::IpAdapterAddresses;
pub use address::{
    IpAdapterAnycastAddress, IpAdapterDnsServerAddress, IpAdapterDnsSuffix,
    IpAdapterGatewayAddress, IpAdapterMulticastAddress, IpAdapterPrefix,
    IpAdapterUnicastAddress, IpAdapterWinsServerAddress,
};
pub use chain::{Chain, ChainError, Linked, walk};
pub use sockaddr::{Guid, NetLuid, SockAddr, SockAddrIn, SockAddrIn6, SocketAddress};

/// Unspecified address family (both IPv4 and IPv6).
pub const AF_UNSPEC: u16 = 0;
/// IPv4 address family.
pub const AF_INET: u16 = 2;
/// IPv6 address family (Windows value, differs from most Unix systems).
pub const AF_INET6: u16 = 23;

/// Capacity of `IP_ADAPTER_ADDRESSES_LH::PhysicalAddress`.
pub const MAX_ADAPTER_ADDRESS_LENGTH: usize = 8;
/// Capacity of `IP_ADAPTER_ADDRESSES_LH::Dhcpv6ClientDuid`.
pub const MAX_DHCPV6_DUID_LENGTH: usize = 130;
/// Capacity, in UTF-16 units, of `IP_ADAPTER_DNS_SUFFIX::String`.
pub const MAX_DNS_SUFFIX_STRING_LENGTH: usize = 256;

/// `GAA_FLAG_*` bits accepted by `GetAdaptersAddresses`.
pub mod gaa_flag {
    pub const SKIP_UNICAST: u32 = 0x0001;
    pub const SKIP_ANYCAST: u32 = 0x0002;
    pub const SKIP_MULTICAST: u32 = 0x0004;
    pub const SKIP_DNS_SERVER: u32 = 0x0008;
    pub const INCLUDE_PREFIX: u32 = 0x0010;
    pub const SKIP_FRIENDLY_NAME: u32 = 0x0020;
    pub const INCLUDE_WINS_INFO: u32 = 0x0040;
    pub const INCLUDE_GATEWAYS: u32 = 0x0080;
    pub const INCLUDE_ALL_INTERFACES: u32 = 0x0100;
    pub const INCLUDE_ALL_COMPARTMENTS: u32 = 0x0200;
    pub const INCLUDE_TUNNEL_BINDINGORDER: u32 = 0x0400;
}

/// `IF_OPER_STATUS` values stored in `OperStatus`.
pub mod oper_status {
    pub const UP: u32 = 1;
    pub const DOWN: u32 = 2;
    pub const TESTING: u32 = 3;
    pub const UNKNOWN: u32 = 4;
    pub const DORMANT: u32 = 5;
    pub const NOT_PRESENT: u32 = 6;
    pub const LOWER_LAYER_DOWN: u32 = 7;
}
