//! Owned adapter records, deep-copied out of the OS-owned block.

use std::fmt;
use std::net::SocketAddr;

use serde::{Serialize, Serializer};

use crate::layout::{MAX_ADAPTER_ADDRESS_LENGTH, MAX_DHCPV6_DUID_LENGTH, oper_status};

/// `IF_TYPE_ETHERNET_CSMACD` from `ipifcons.h`.
pub const IF_TYPE_ETHERNET_CSMACD: u32 = 6;
/// `IF_TYPE_PPP` from `ipifcons.h`.
pub const IF_TYPE_PPP: u32 = 23;
/// `IF_TYPE_SOFTWARE_LOOPBACK` from `ipifcons.h`.
pub const IF_TYPE_SOFTWARE_LOOPBACK: u32 = 24;
/// `IF_TYPE_IEEE80211` from `ipifcons.h`.
pub const IF_TYPE_IEEE80211: u32 = 71;
/// `IF_TYPE_TUNNEL` from `ipifcons.h`.
pub const IF_TYPE_TUNNEL: u32 = 131;

/// IP version selection for queries and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum IpVersion {
    /// IPv4 only.
    V4,
    /// IPv6 only.
    V6,
    /// Both IPv4 and IPv6.
    Both,
}

impl IpVersion {
    /// Returns true if this version includes IPv4.
    #[must_use]
    pub const fn includes_v4(self) -> bool {
        matches!(self, Self::V4 | Self::Both)
    }

    /// Returns true if this version includes IPv6.
    #[must_use]
    pub const fn includes_v6(self) -> bool {
        matches!(self, Self::V6 | Self::Both)
    }
}

impl fmt::Display for IpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => write!(f, "IPv4"),
            Self::V6 => write!(f, "IPv6"),
            Self::Both => write!(f, "Both"),
        }
    }
}

/// Network adapter type classification, derived from `IfType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AdapterKind {
    /// Physical Ethernet adapter.
    Ethernet,
    /// Wireless (Wi-Fi) adapter.
    Wireless,
    /// Loopback adapter (localhost).
    Loopback,
    /// Virtual adapter (tunnel, PPP).
    Virtual,
    /// Unknown or other adapter type, preserving the original type code.
    Other(u32),
}

impl AdapterKind {
    /// Maps an `IF_TYPE_*` code to a kind.
    #[must_use]
    pub const fn from_if_type(if_type: u32) -> Self {
        match if_type {
            IF_TYPE_ETHERNET_CSMACD => Self::Ethernet,
            IF_TYPE_IEEE80211 => Self::Wireless,
            IF_TYPE_SOFTWARE_LOOPBACK => Self::Loopback,
            IF_TYPE_TUNNEL | IF_TYPE_PPP => Self::Virtual,
            other => Self::Other(other),
        }
    }

    /// Returns true if this is a virtual adapter.
    #[must_use]
    pub const fn is_virtual(&self) -> bool {
        matches!(self, Self::Virtual)
    }

    /// Returns true if this is a loopback adapter.
    #[must_use]
    pub const fn is_loopback(&self) -> bool {
        matches!(self, Self::Loopback)
    }
}

/// Operational state of an interface (`IF_OPER_STATUS`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OperStatus {
    Up,
    Down,
    Testing,
    Unknown,
    Dormant,
    NotPresent,
    LowerLayerDown,
    /// A value outside the documented range.
    Other(u32),
}

impl From<u32> for OperStatus {
    fn from(value: u32) -> Self {
        match value {
            oper_status::UP => Self::Up,
            oper_status::DOWN => Self::Down,
            oper_status::TESTING => Self::Testing,
            oper_status::UNKNOWN => Self::Unknown,
            oper_status::DORMANT => Self::Dormant,
            oper_status::NOT_PRESENT => Self::NotPresent,
            oper_status::LOWER_LAYER_DOWN => Self::LowerLayerDown,
            other => Self::Other(other),
        }
    }
}

impl OperStatus {
    /// Returns true if the interface can pass packets.
    #[must_use]
    pub const fn is_up(self) -> bool {
        matches!(self, Self::Up)
    }
}

/// Link-layer (MAC) address: fixed capacity plus the length actually used.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PhysicalAddress {
    bytes: [u8; MAX_ADAPTER_ADDRESS_LENGTH],
    len: u8,
}

impl PhysicalAddress {
    /// Copies at most [`MAX_ADAPTER_ADDRESS_LENGTH`] bytes from `bytes`.
    #[must_use]
    pub fn new(bytes: &[u8]) -> Self {
        let mut address = Self::default();
        let len = bytes.len().min(MAX_ADAPTER_ADDRESS_LENGTH);
        address.bytes[..len].copy_from_slice(&bytes[..len]);
        address.len = u8::try_from(len).unwrap_or(u8::MAX);
        address
    }

    /// The used portion of the buffer.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..usize::from(self.len)]
    }

    /// Returns true if the adapter reported no link-layer address.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl fmt::Display for PhysicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.as_bytes().iter().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for PhysicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PhysicalAddress({self})")
    }
}

impl Serialize for PhysicalAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// DHCPv6 client DUID: fixed capacity plus the length actually used.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DhcpDuid {
    bytes: [u8; MAX_DHCPV6_DUID_LENGTH],
    len: u8,
}

impl Default for DhcpDuid {
    fn default() -> Self {
        Self {
            bytes: [0; MAX_DHCPV6_DUID_LENGTH],
            len: 0,
        }
    }
}

impl DhcpDuid {
    /// Copies at most [`MAX_DHCPV6_DUID_LENGTH`] bytes from `bytes`.
    #[must_use]
    pub fn new(bytes: &[u8]) -> Self {
        let mut duid = Self::default();
        let len = bytes.len().min(MAX_DHCPV6_DUID_LENGTH);
        duid.bytes[..len].copy_from_slice(&bytes[..len]);
        duid.len = u8::try_from(len).unwrap_or(u8::MAX);
        duid
    }

    /// The used portion of the buffer.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..usize::from(self.len)]
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl fmt::Display for DhcpDuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.as_bytes() {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for DhcpDuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DhcpDuid({self})")
    }
}

impl Serialize for DhcpDuid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Interface LUID (`NET_LUID`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Luid(pub u64);

impl Luid {
    /// The interface type encoded in bits 48..64.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // masked to the field width
    pub const fn if_type(self) -> u16 {
        (self.0 >> 48) as u16
    }

    /// The per-type interface index encoded in bits 24..48.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // masked to the field width
    pub const fn net_luid_index(self) -> u32 {
        ((self.0 >> 24) & 0x00FF_FFFF) as u32
    }
}

/// Network GUID (`NET_IF_NETWORK_GUID`), stored in its field form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NetworkGuid {
    pub data1: u32,
    pub data2: u16,
    pub data3: u16,
    pub data4: [u8; 8],
}

impl fmt::Display for NetworkGuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = &self.data4;
        write!(
            f,
            "{{{:08X}-{:04X}-{:04X}-{:02X}{:02X}-{:02X}{:02X}{:02X}{:02X}{:02X}{:02X}}}",
            self.data1, self.data2, self.data3, d[0], d[1], d[2], d[3], d[4], d[5], d[6], d[7]
        )
    }
}

impl Serialize for NetworkGuid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One entry of an adapter's unicast address list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnicastAddress {
    pub address: SocketAddr,
    pub flags: u32,
    pub prefix_origin: i32,
    pub suffix_origin: i32,
    pub dad_state: i32,
    pub valid_lifetime: u32,
    pub preferred_lifetime: u32,
    pub lease_lifetime: u32,
    pub on_link_prefix_length: u8,
}

/// One entry of an adapter's prefix list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressPrefix {
    pub address: SocketAddr,
    pub prefix_length: u32,
}

/// Adapter flag bits (`IP_ADAPTER_*` in `iptypes.h`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct AdapterFlags(pub u32);

impl AdapterFlags {
    pub const DDNS_ENABLED: u32 = 0x0001;
    pub const REGISTER_ADAPTER_SUFFIX: u32 = 0x0002;
    pub const DHCP_ENABLED: u32 = 0x0004;
    pub const RECEIVE_ONLY: u32 = 0x0008;
    pub const NO_MULTICAST: u32 = 0x0010;
    pub const IPV6_OTHER_STATEFUL_CONFIG: u32 = 0x0020;
    pub const NETBIOS_OVER_TCPIP_ENABLED: u32 = 0x0040;
    pub const IPV4_ENABLED: u32 = 0x0080;
    pub const IPV6_ENABLED: u32 = 0x0100;
    pub const IPV6_MANAGE_ADDRESS_CONFIG: u32 = 0x0200;

    /// Returns true if every bit of `mask` is set.
    #[must_use]
    pub const fn contains(self, mask: u32) -> bool {
        self.0 & mask == mask
    }

    #[must_use]
    pub const fn dhcp_enabled(self) -> bool {
        self.contains(Self::DHCP_ENABLED)
    }
}

/// A fully owned copy of one `IP_ADAPTER_ADDRESSES_LH` node and its lists.
///
/// Nothing in a record points into the block returned by the OS; records stay
/// valid after that block is released.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdapterRecord {
    pub if_index: u32,
    /// Permanent adapter name (usually a GUID string).
    pub adapter_name: String,
    /// User-facing name (e.g., "Ethernet", "Wi-Fi").
    pub friendly_name: String,
    pub description: String,
    pub dns_suffix: String,
    pub kind: AdapterKind,
    pub if_type: u32,
    pub oper_status: OperStatus,
    pub physical_address: PhysicalAddress,
    pub flags: AdapterFlags,
    pub mtu: u32,
    pub ipv6_if_index: u32,
    pub zone_indices: [u32; 16],
    pub transmit_link_speed: u64,
    pub receive_link_speed: u64,
    pub ipv4_metric: u32,
    pub ipv6_metric: u32,
    pub luid: Luid,
    pub compartment_id: u32,
    pub network_guid: NetworkGuid,
    pub connection_type: i32,
    pub tunnel_type: i32,
    pub dhcpv4_server: Option<SocketAddr>,
    pub dhcpv6_server: Option<SocketAddr>,
    pub dhcpv6_client_duid: DhcpDuid,
    pub dhcpv6_iaid: u32,
    pub unicast: Vec<UnicastAddress>,
    pub anycast: Vec<SocketAddr>,
    pub multicast: Vec<SocketAddr>,
    pub dns_servers: Vec<SocketAddr>,
    pub prefixes: Vec<AddressPrefix>,
    pub wins_servers: Vec<SocketAddr>,
    pub gateways: Vec<SocketAddr>,
    pub dns_suffixes: Vec<String>,
}

impl AdapterRecord {
    /// Creates a record with the given identity and every other field empty.
    #[must_use]
    pub fn new(if_index: u32, friendly_name: impl Into<String>, kind: AdapterKind) -> Self {
        Self {
            if_index,
            adapter_name: String::new(),
            friendly_name: friendly_name.into(),
            description: String::new(),
            dns_suffix: String::new(),
            kind,
            if_type: 0,
            oper_status: OperStatus::Up,
            physical_address: PhysicalAddress::default(),
            flags: AdapterFlags::default(),
            mtu: 0,
            ipv6_if_index: 0,
            zone_indices: [0; 16],
            transmit_link_speed: 0,
            receive_link_speed: 0,
            ipv4_metric: 0,
            ipv6_metric: 0,
            luid: Luid::default(),
            compartment_id: 0,
            network_guid: NetworkGuid::default(),
            connection_type: 0,
            tunnel_type: 0,
            dhcpv4_server: None,
            dhcpv6_server: None,
            dhcpv6_client_duid: DhcpDuid::default(),
            dhcpv6_iaid: 0,
            unicast: Vec::new(),
            anycast: Vec::new(),
            multicast: Vec::new(),
            dns_servers: Vec::new(),
            prefixes: Vec::new(),
            wins_servers: Vec::new(),
            gateways: Vec::new(),
            dns_suffixes: Vec::new(),
        }
    }

    /// Unicast IP addresses restricted to `version`, in list order.
    #[must_use]
    pub fn unicast_ips(&self, version: IpVersion) -> Vec<std::net::IpAddr> {
        self.unicast
            .iter()
            .map(|entry| entry.address.ip())
            .filter(|ip| {
                (ip.is_ipv4() && version.includes_v4()) || (ip.is_ipv6() && version.includes_v6())
            })
            .collect()
    }

    /// Returns true if the adapter has any unicast address.
    #[must_use]
    pub fn has_addresses(&self) -> bool {
        !self.unicast.is_empty()
    }
}
