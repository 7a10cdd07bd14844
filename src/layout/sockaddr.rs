//! Embedded socket address, LUID and GUID layouts.

/// Generic `SOCKADDR` header. Only the family is read through this type;
/// the concrete layout is chosen from it.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct SockAddr {
    pub sa_family: u16,
    pub sa_data: [u8; 14],
}

/// `SOCKADDR_IN` (16 bytes).
///
/// `sin_port` is stored in network byte order.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct SockAddrIn {
    pub sin_family: u16,
    pub sin_port: u16,
    pub sin_addr: [u8; 4],
    pub sin_zero: [u8; 8],
}

/// `SOCKADDR_IN6` (28 bytes).
///
/// `sin6_port` and `sin6_flowinfo` are stored in network byte order.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct SockAddrIn6 {
    pub sin6_family: u16,
    pub sin6_port: u16,
    pub sin6_flowinfo: u32,
    pub sin6_addr: [u8; 16],
    pub sin6_scope_id: u32,
}

/// `SOCKET_ADDRESS`: a pointer to a family-tagged sockaddr plus its length.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct SocketAddress {
    pub sockaddr: *const SockAddr,
    pub sockaddr_length: i32,
}

impl SocketAddress {
    /// A `SOCKET_ADDRESS` that points nowhere.
    pub const NULL: Self = Self {
        sockaddr: std::ptr::null(),
        sockaddr_length: 0,
    };
}

impl Default for SocketAddress {
    fn default() -> Self {
        Self::NULL
    }
}

/// `NET_LUID`: a union of a `ULONG64` value and a bitfield view.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetLuid {
    pub value: u64,
}

/// `GUID` (16 bytes, 4-byte alignment).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Guid {
    pub data1: u32,
    pub data2: u16,
    pub data3: u16,
    pub data4: [u8; 8],
}
