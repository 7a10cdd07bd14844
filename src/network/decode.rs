//! Deep copy of an adapter block into owned [`AdapterRecord`]s.
//!
//! The functions here read the layouts from [`crate::layout`] in place and
//! copy every scalar, string and fixed buffer into owned Rust values. Fixed
//! buffers are copied only up to `min(stated length, capacity)`. Once
//! [`decode_adapters`] returns, nothing refers to the source block.

use std::ffi::{CStr, c_char};
use std::mem::size_of;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, SocketAddrV4, SocketAddrV6};

use thiserror::Error;

use crate::layout::{
    AF_INET, AF_INET6, ChainError, IpAdapterAddresses, IpAdapterDnsSuffix, Linked,
    MAX_ADAPTER_ADDRESS_LENGTH, MAX_DHCPV6_DUID_LENGTH, SockAddrIn, SockAddrIn6, SocketAddress,
    walk,
};

use super::adapter::{
    AdapterFlags, AdapterKind, AdapterRecord, AddressPrefix, DhcpDuid, Luid, NetworkGuid,
    OperStatus, PhysicalAddress, UnicastAddress,
};

/// Error raised while copying an adapter block.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// One of the `Next` chains is malformed.
    #[error("malformed adapter block: {0}")]
    Chain(#[from] ChainError),
}

/// Copies every adapter reachable from `head` into owned records.
///
/// Adapters are returned in chain order; each record's lists keep the order
/// of the corresponding native list.
///
/// # Errors
///
/// Returns [`DecodeError::Chain`] if any `Next` chain loops back on itself.
///
/// # Safety
///
/// `head` must be null or point to a valid `IP_ADAPTER_ADDRESSES_LH` chain
/// as written by `GetAdaptersAddresses`: every non-null pointer reachable from
/// it (links, strings, socket addresses) must be valid for reads, and the
/// block must stay alive and unmodified for the duration of the call.
pub unsafe fn decode_adapters(
    head: *const IpAdapterAddresses,
) -> Result<Vec<AdapterRecord>, DecodeError> {
    let mut adapters = Vec::new();

    // SAFETY: forwarded from the caller's contract.
    for raw in unsafe { walk(head, "adapter") } {
        let raw = raw?;
        // SAFETY: `raw` is a valid node of the caller's block.
        let record = unsafe { decode_adapter(raw) }?;
        tracing::trace!(
            "Decoded adapter {} ({}) with {} unicast address(es)",
            record.if_index,
            record.friendly_name,
            record.unicast.len()
        );
        adapters.push(record);
    }

    Ok(adapters)
}

/// Copies a single adapter node and all of its lists.
///
/// # Safety
///
/// Same contract as [`decode_adapters`], for the single node `raw`.
unsafe fn decode_adapter(raw: &IpAdapterAddresses) -> Result<AdapterRecord, DecodeError> {
    // SAFETY: all pointers below belong to the caller's block.
    unsafe {
        Ok(AdapterRecord {
            if_index: raw.if_index,
            adapter_name: read_c_string(raw.adapter_name),
            friendly_name: read_wide_string(raw.friendly_name),
            description: read_wide_string(raw.description),
            dns_suffix: read_wide_string(raw.dns_suffix),
            kind: AdapterKind::from_if_type(raw.if_type),
            if_type: raw.if_type,
            oper_status: OperStatus::from(raw.oper_status),
            physical_address: copy_physical_address(raw),
            flags: AdapterFlags(raw.flags),
            mtu: raw.mtu,
            ipv6_if_index: raw.ipv6_if_index,
            zone_indices: raw.zone_indices,
            transmit_link_speed: raw.transmit_link_speed,
            receive_link_speed: raw.receive_link_speed,
            ipv4_metric: raw.ipv4_metric,
            ipv6_metric: raw.ipv6_metric,
            luid: Luid(raw.luid.value),
            compartment_id: raw.compartment_id,
            network_guid: NetworkGuid {
                data1: raw.network_guid.data1,
                data2: raw.network_guid.data2,
                data3: raw.network_guid.data3,
                data4: raw.network_guid.data4,
            },
            connection_type: raw.connection_type,
            tunnel_type: raw.tunnel_type,
            dhcpv4_server: decode_socket_address(&raw.dhcpv4_server),
            dhcpv6_server: decode_socket_address(&raw.dhcpv6_server),
            dhcpv6_client_duid: copy_duid(raw),
            dhcpv6_iaid: raw.dhcpv6_iaid,
            unicast: collect(raw.first_unicast_address, "unicast", |node| {
                decode_socket_address(&node.address).map(|address| UnicastAddress {
                    address,
                    flags: node.flags,
                    prefix_origin: node.prefix_origin,
                    suffix_origin: node.suffix_origin,
                    dad_state: node.dad_state,
                    valid_lifetime: node.valid_lifetime,
                    preferred_lifetime: node.preferred_lifetime,
                    lease_lifetime: node.lease_lifetime,
                    on_link_prefix_length: node.on_link_prefix_length,
                })
            })?,
            anycast: collect(raw.first_anycast_address, "anycast", |node| {
                decode_socket_address(&node.address)
            })?,
            multicast: collect(raw.first_multicast_address, "multicast", |node| {
                decode_socket_address(&node.address)
            })?,
            dns_servers: collect(raw.first_dns_server_address, "dns server", |node| {
                decode_socket_address(&node.address)
            })?,
            prefixes: collect(raw.first_prefix, "prefix", |node| {
                decode_socket_address(&node.address).map(|address| AddressPrefix {
                    address,
                    prefix_length: node.prefix_length,
                })
            })?,
            wins_servers: collect(raw.first_wins_server_address, "wins server", |node| {
                decode_socket_address(&node.address)
            })?,
            gateways: collect(raw.first_gateway_address, "gateway", |node| {
                decode_socket_address(&node.address)
            })?,
            dns_suffixes: collect(raw.first_dns_suffix, "dns suffix", decode_dns_suffix)?,
        })
    }
}

/// Walks a list and keeps the nodes `decode` maps to `Some`.
///
/// # Safety
///
/// `head` must satisfy the contract of [`walk`], and `decode` must only
/// dereference pointers owned by the same block.
unsafe fn collect<T: Linked, U>(
    head: *const T,
    list: &'static str,
    mut decode: impl FnMut(&T) -> Option<U>,
) -> Result<Vec<U>, ChainError> {
    let mut values = Vec::new();
    // SAFETY: forwarded from the caller.
    for node in unsafe { walk(head, list) } {
        if let Some(value) = decode(node?) {
            values.push(value);
        }
    }
    Ok(values)
}

/// Decodes an embedded `SOCKET_ADDRESS` into an owned socket address.
///
/// Returns `None` for a null pointer, an unsupported family, or a stated
/// length too short for the family's layout. Reads never exceed the stated
/// length.
///
/// # Safety
///
/// If `raw.sockaddr` is non-null it must be valid for reads of
/// `raw.sockaddr_length` bytes.
#[must_use]
pub unsafe fn decode_socket_address(raw: &SocketAddress) -> Option<SocketAddr> {
    if raw.sockaddr.is_null() {
        return None;
    }

    let length = usize::try_from(raw.sockaddr_length).ok()?;
    if length < size_of::<u16>() {
        return None;
    }

    let base = raw.sockaddr.cast::<u8>();
    // SAFETY: at least two bytes are readable; the block gives no alignment
    // guarantee we rely on.
    let family = unsafe { base.cast::<u16>().read_unaligned() };

    match family {
        AF_INET if length >= size_of::<SockAddrIn>() => {
            // SAFETY: family and length checked above.
            let sin = unsafe { base.cast::<SockAddrIn>().read_unaligned() };
            Some(SocketAddr::V4(SocketAddrV4::new(
                Ipv4Addr::from(sin.sin_addr),
                u16::from_be(sin.sin_port),
            )))
        }
        AF_INET6 if length >= size_of::<SockAddrIn6>() => {
            // SAFETY: family and length checked above.
            let sin6 = unsafe { base.cast::<SockAddrIn6>().read_unaligned() };
            Some(SocketAddr::V6(SocketAddrV6::new(
                Ipv6Addr::from(sin6.sin6_addr),
                u16::from_be(sin6.sin6_port),
                u32::from_be(sin6.sin6_flowinfo),
                sin6.sin6_scope_id,
            )))
        }
        other => {
            tracing::trace!("Skipping socket address with family {other} and length {length}");
            None
        }
    }
}

fn copy_physical_address(raw: &IpAdapterAddresses) -> PhysicalAddress {
    let len = clamp_len(raw.physical_address_length, MAX_ADAPTER_ADDRESS_LENGTH);
    PhysicalAddress::new(&raw.physical_address[..len])
}

fn copy_duid(raw: &IpAdapterAddresses) -> DhcpDuid {
    let len = clamp_len(raw.dhcpv6_client_duid_length, MAX_DHCPV6_DUID_LENGTH);
    DhcpDuid::new(&raw.dhcpv6_client_duid[..len])
}

fn clamp_len(stated: u32, capacity: usize) -> usize {
    usize::try_from(stated).map_or(capacity, |len| len.min(capacity))
}

fn decode_dns_suffix(node: &IpAdapterDnsSuffix) -> Option<String> {
    let suffix = read_fixed_wide(&node.string);
    (!suffix.is_empty()).then_some(suffix)
}

/// Reads a UTF-16 string from a fixed buffer, stopping at the first NUL or
/// at the end of the buffer.
pub(crate) fn read_fixed_wide(buffer: &[u16]) -> String {
    let end = buffer.iter().position(|&unit| unit == 0).unwrap_or(buffer.len());
    String::from_utf16_lossy(&buffer[..end])
}

/// Reads a NUL-terminated UTF-16 string; null reads as empty.
///
/// # Safety
///
/// A non-null `ptr` must point to a NUL-terminated UTF-16 sequence.
unsafe fn read_wide_string(ptr: *const u16) -> String {
    if ptr.is_null() {
        return String::new();
    }

    let mut len = 0;
    // SAFETY: the sequence is NUL-terminated, so every index up to the
    // terminator is readable.
    unsafe {
        while *ptr.add(len) != 0 {
            len += 1;
        }
        String::from_utf16_lossy(std::slice::from_raw_parts(ptr, len))
    }
}

/// Reads a NUL-terminated ANSI string; null reads as empty.
///
/// # Safety
///
/// A non-null `ptr` must point to a NUL-terminated byte sequence.
unsafe fn read_c_string(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }

    // SAFETY: forwarded from the caller.
    unsafe { CStr::from_ptr(ptr) }
        .to_string_lossy()
        .into_owned()
}
