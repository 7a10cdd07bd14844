//! `IP_ADAPTER_ADDRESSES_LH`, one node per network adapter.

use std::ffi::c_char;

use super::address::{
    IpAdapterAnycastAddress, IpAdapterDnsServerAddress, IpAdapterDnsSuffix,
    IpAdapterGatewayAddress, IpAdapterMulticastAddress, IpAdapterPrefix,
    IpAdapterUnicastAddress, IpAdapterWinsServerAddress, zeroed_default,
};
use super::{Guid, MAX_ADAPTER_ADDRESS_LENGTH, MAX_DHCPV6_DUID_LENGTH, NetLuid, SocketAddress};

/// `IP_ADAPTER_ADDRESSES_LH`.
///
/// The native struct opens with a union of `ULONGLONG Alignment` and
/// `{ ULONG Length; IF_INDEX IfIndex; }`; `align(8)` stands in for the union.
/// Size is 448 bytes on 64-bit targets and 376 bytes on 32-bit Windows.
///
/// The whole chain, including every string and sub-list it points to, lives
/// in the single block handed to `GetAdaptersAddresses`.
#[repr(C, align(8))]
#[derive(Debug, Clone, Copy)]
pub struct IpAdapterAddresses {
    pub length: u32,
    pub if_index: u32,
    pub next: *const Self,
    /// ANSI string, usually the adapter GUID in braces.
    pub adapter_name: *const c_char,
    pub first_unicast_address: *const IpAdapterUnicastAddress,
    pub first_anycast_address: *const IpAdapterAnycastAddress,
    pub first_multicast_address: *const IpAdapterMulticastAddress,
    pub first_dns_server_address: *const IpAdapterDnsServerAddress,
    pub dns_suffix: *const u16,
    pub description: *const u16,
    pub friendly_name: *const u16,
    pub physical_address: [u8; MAX_ADAPTER_ADDRESS_LENGTH],
    pub physical_address_length: u32,
    pub flags: u32,
    pub mtu: u32,
    /// `IFTYPE`
    pub if_type: u32,
    /// `IF_OPER_STATUS`
    pub oper_status: u32,
    pub ipv6_if_index: u32,
    pub zone_indices: [u32; 16],
    pub first_prefix: *const IpAdapterPrefix,
    pub transmit_link_speed: u64,
    pub receive_link_speed: u64,
    pub first_wins_server_address: *const IpAdapterWinsServerAddress,
    pub first_gateway_address: *const IpAdapterGatewayAddress,
    pub ipv4_metric: u32,
    pub ipv6_metric: u32,
    pub luid: NetLuid,
    pub dhcpv4_server: SocketAddress,
    /// `NET_IF_COMPARTMENT_ID`
    pub compartment_id: u32,
    /// `NET_IF_NETWORK_GUID`
    pub network_guid: Guid,
    /// `NET_IF_CONNECTION_TYPE`
    pub connection_type: i32,
    /// `TUNNEL_TYPE`
    pub tunnel_type: i32,
    pub dhcpv6_server: SocketAddress,
    pub dhcpv6_client_duid: [u8; MAX_DHCPV6_DUID_LENGTH],
    pub dhcpv6_client_duid_length: u32,
    pub dhcpv6_iaid: u32,
    pub first_dns_suffix: *const IpAdapterDnsSuffix,
}

zeroed_default!(IpAdapterAddresses);
