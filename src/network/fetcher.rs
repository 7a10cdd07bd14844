//! Adapter source trait, query parameters and error types.

use super::{AdapterRecord, IpVersion};
use crate::layout::{AF_INET, AF_INET6, AF_UNSPEC, gaa_flag};
use thiserror::Error;

use super::decode::DecodeError;

/// Error type for adapter enumeration.
///
/// Describes what went wrong without dictating recovery strategy.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Windows API call failed.
    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    WindowsApi(#[from] windows::core::Error),

    /// The block returned by the OS could not be copied.
    #[error("Failed to decode adapter data: {0}")]
    Decode(#[from] DecodeError),

    /// The OS kept reporting a larger buffer than the one just provided.
    #[error("Adapter data kept growing after {attempts} attempts (last size {size} bytes)")]
    BufferGrowth {
        /// Number of calls made.
        attempts: u32,
        /// Last size requested by the OS.
        size: u32,
    },

    /// Adapter enumeration is not available on this platform.
    #[error("Adapter enumeration is not supported on this platform")]
    Unsupported,
}

/// `GAA_FLAG_*` bits passed to the enumeration call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct QueryFlags(u32);

impl QueryFlags {
    /// No flags: unicast, anycast, multicast and DNS server lists included.
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn contains(self, bit: u32) -> bool {
        self.0 & bit == bit
    }

    #[must_use]
    const fn with(self, bit: u32) -> Self {
        Self(self.0 | bit)
    }

    #[must_use]
    pub const fn skip_unicast(self) -> Self {
        self.with(gaa_flag::SKIP_UNICAST)
    }

    #[must_use]
    pub const fn skip_anycast(self) -> Self {
        self.with(gaa_flag::SKIP_ANYCAST)
    }

    #[must_use]
    pub const fn skip_multicast(self) -> Self {
        self.with(gaa_flag::SKIP_MULTICAST)
    }

    #[must_use]
    pub const fn skip_friendly_name(self) -> Self {
        self.with(gaa_flag::SKIP_FRIENDLY_NAME)
    }

    #[must_use]
    pub const fn include_prefix(self) -> Self {
        self.with(gaa_flag::INCLUDE_PREFIX)
    }

    #[must_use]
    pub const fn include_wins_info(self) -> Self {
        self.with(gaa_flag::INCLUDE_WINS_INFO)
    }

    #[must_use]
    pub const fn include_gateways(self) -> Self {
        self.with(gaa_flag::INCLUDE_GATEWAYS)
    }
}

/// What to ask the OS for: address family plus `GAA_FLAG_*` bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdapterQuery {
    pub version: IpVersion,
    pub flags: QueryFlags,
}

impl Default for AdapterQuery {
    fn default() -> Self {
        Self {
            version: IpVersion::Both,
            flags: QueryFlags::new()
                .include_prefix()
                .include_gateways(),
        }
    }
}

impl AdapterQuery {
    /// Query tuned for name-server discovery: only the DNS server lists.
    #[must_use]
    pub const fn name_servers() -> Self {
        Self {
            version: IpVersion::Both,
            flags: QueryFlags::new()
                .skip_unicast()
                .skip_anycast()
                .skip_multicast()
                .skip_friendly_name(),
        }
    }

    #[must_use]
    pub const fn with_version(mut self, version: IpVersion) -> Self {
        self.version = version;
        self
    }

    /// Also asks for each adapter's WINS server list.
    #[must_use]
    pub const fn with_wins(mut self) -> Self {
        self.flags = self.flags.include_wins_info();
        self
    }

    /// The address family argument for the enumeration call.
    #[must_use]
    pub const fn family(&self) -> u16 {
        match self.version {
            IpVersion::V4 => AF_INET,
            IpVersion::V6 => AF_INET6,
            IpVersion::Both => AF_UNSPEC,
        }
    }
}

/// Trait for enumerating network adapters into owned records.
///
/// # Design
///
/// - Enables dependency injection for testing with mock implementations
/// - Platform-specific implementations live in [`super::platform`]
///
/// # Example
///
/// ```ignore
/// use adapter_dns::network::{AdapterQuery, AdapterRecord, AdapterSource, FetchError};
///
/// struct Fixed(Vec<AdapterRecord>);
///
/// impl AdapterSource for Fixed {
///     fn fetch(&self, _query: &AdapterQuery) -> Result<Vec<AdapterRecord>, FetchError> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
pub trait AdapterSource: Send + Sync {
    /// Enumerates the adapters matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when:
    /// - Platform API calls fail (e.g., `FetchError::WindowsApi` on Windows)
    /// - The returned block is malformed (`FetchError::Decode`)
    /// - The platform has no adapter API (`FetchError::Unsupported`)
    ///
    /// # Implementation Notes
    ///
    /// - Implementations return every adapter the OS reports; filtering is done by the caller
    /// - Records must be fully owned; no reference into OS memory may survive the call
    fn fetch(&self, query: &AdapterQuery) -> Result<Vec<AdapterRecord>, FetchError>;
}
