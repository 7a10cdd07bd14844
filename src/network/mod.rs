//! Network layer: owned adapter records and the sources that produce them.
//!
//! This module provides:
//! - Owned copies of adapter data ([`AdapterRecord`] and its parts)
//! - Decoding of the OS-owned block ([`decode_adapters`])
//! - Enumeration behind a trait ([`AdapterSource`]) with platform sources ([`platform`])
//! - Post-enumeration filtering ([`filter`])

mod adapter;
mod decode;
mod fetcher;
pub mod filter;
pub mod platform;

#[cfg(test)]
mod filter_tests;
#[cfg(test)]
mod test_fixtures;

pub use adapter::{
    AdapterFlags, AdapterKind, AdapterRecord, AddressPrefix, DhcpDuid, IF_TYPE_ETHERNET_CSMACD,
    IF_TYPE_IEEE80211, IF_TYPE_PPP, IF_TYPE_SOFTWARE_LOOPBACK, IF_TYPE_TUNNEL, IpVersion, Luid,
    NetworkGuid, OperStatus, PhysicalAddress, UnicastAddress,
};
pub use decode::{DecodeError, decode_adapters, decode_socket_address};
pub use fetcher::{AdapterQuery, AdapterSource, FetchError, QueryFlags};
