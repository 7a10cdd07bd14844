//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::net::SocketAddr;

use crate::dns::{FALLBACK_NAME_SERVERS, IpPreference, resolv_conf};
use crate::network::IpVersion;

/// Default output path for `init`.
pub const CONFIG_FILE: &str = "adapter-dns.toml";

/// Default address family for adapter listings.
pub const IP_VERSION: IpVersion = IpVersion::Both;

/// Default ordering of the default-domain name servers.
pub const PREFERENCE: IpPreference = IpPreference::AsListed;

/// Default `resolv.conf` candidates.
#[must_use]
pub fn resolv_conf_paths() -> Vec<std::path::PathBuf> {
    resolv_conf::DEFAULT_PATHS.iter().map(Into::into).collect()
}

/// Default fallback name servers.
#[must_use]
pub fn fallbacks() -> Vec<SocketAddr> {
    FALLBACK_NAME_SERVERS.to_vec()
}
