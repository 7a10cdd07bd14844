//! Name-server discovery.
//!
//! Servers are grouped by search domain. On Windows they come from the DNS
//! server lists of adapters that are up; elsewhere from `resolv.conf`. When
//! neither yields a server for the default domain, configured fallbacks are
//! used.

pub mod adapters;
pub mod resolv_conf;


use std::fmt;
use std::net::{SocketAddr, SocketAddrV4};
use std::path::PathBuf;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::network::{AdapterQuery, AdapterSource, FetchError};

pub use adapters::name_servers_from_adapters;
pub use resolv_conf::{
    DEFAULT_NDOTS, ResolvConfError, load_name_servers, load_ndots, parse_name_servers, parse_ndots,
};

/// The domain name servers belong to when no `domain` line applies.
pub const DEFAULT_SEARCH_DOMAIN: &str = "";

/// Port assumed for every name server unless configured otherwise.
pub const DNS_PORT: u16 = 53;

/// Environment variable whose `ndots:N` option overrides `resolv.conf`.
pub const RES_OPTIONS_VAR: &str = "RES_OPTIONS";

/// Fallback servers used when discovery finds nothing for the default domain.
pub const FALLBACK_NAME_SERVERS: [SocketAddr; 2] = [
    SocketAddr::V4(SocketAddrV4::new(std::net::Ipv4Addr::new(1, 1, 1, 1), DNS_PORT)),
    SocketAddr::V4(SocketAddrV4::new(std::net::Ipv4Addr::new(8, 8, 8, 8), DNS_PORT)),
];

/// How the default-domain servers are ordered for a resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IpPreference {
    /// All IPv6 servers first, then all IPv4 servers.
    Ipv6First,
    /// IPv4 servers only.
    Ipv4Only,
    /// Discovery order.
    #[default]
    AsListed,
}

impl fmt::Display for IpPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ipv6First => write!(f, "ipv6-first"),
            Self::Ipv4Only => write!(f, "ipv4-only"),
            Self::AsListed => write!(f, "as-listed"),
        }
    }
}

/// Name servers grouped by search domain.
///
/// Domains keep the order they were first inserted in, and each domain's
/// servers are de-duplicated while keeping their first position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameServers {
    domains: Vec<(String, Vec<SocketAddr>)>,
}

impl NameServers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `server` to `domain` unless it is already listed there.
    ///
    /// Returns true if the server was added.
    pub fn insert(&mut self, domain: &str, server: SocketAddr) -> bool {
        let servers = self.entry(domain);
        if servers.contains(&server) {
            return false;
        }
        servers.push(server);
        true
    }

    /// Adds every server to `domain`, skipping duplicates.
    ///
    /// The domain is created even if `servers` is empty.
    pub fn extend(&mut self, domain: &str, servers: impl IntoIterator<Item = SocketAddr>) {
        let existing = self.entry(domain);
        for server in servers {
            if !existing.contains(&server) {
                existing.push(server);
            }
        }
    }

    /// Servers for `domain`, or `None` if the domain was never added.
    #[must_use]
    pub fn for_domain(&self, domain: &str) -> Option<&[SocketAddr]> {
        self.domains
            .iter()
            .find(|(name, _)| name == domain)
            .map(|(_, servers)| servers.as_slice())
    }

    /// Returns true if the default domain has at least one server.
    #[must_use]
    pub fn has_default_servers(&self) -> bool {
        self.for_domain(DEFAULT_SEARCH_DOMAIN)
            .is_some_and(|servers| !servers.is_empty())
    }

    /// The default domain's servers ordered by `preference`.
    #[must_use]
    pub fn default_servers(&self, preference: IpPreference) -> Vec<SocketAddr> {
        let servers = self.for_domain(DEFAULT_SEARCH_DOMAIN).unwrap_or_default();
        match preference {
            IpPreference::AsListed => servers.to_vec(),
            IpPreference::Ipv4Only => servers.iter().copied().filter(SocketAddr::is_ipv4).collect(),
            IpPreference::Ipv6First => servers
                .iter()
                .copied()
                .filter(SocketAddr::is_ipv6)
                .chain(servers.iter().copied().filter(SocketAddr::is_ipv4))
                .collect(),
        }
    }

    /// Iterates over `(domain, servers)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[SocketAddr])> {
        self.domains
            .iter()
            .map(|(domain, servers)| (domain.as_str(), servers.as_slice()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domains.iter().all(|(_, servers)| servers.is_empty())
    }

    fn entry(&mut self, domain: &str) -> &mut Vec<SocketAddr> {
        let index = match self.domains.iter().position(|(name, _)| name == domain) {
            Some(index) => index,
            None => {
                self.domains.push((domain.to_string(), Vec::new()));
                self.domains.len() - 1
            }
        };
        &mut self.domains[index].1
    }
}

impl Serialize for NameServers {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.domains.len()))?;
        for (domain, servers) in &self.domains {
            map.serialize_entry(domain, servers)?;
        }
        map.end()
    }
}

/// Error raised by name-server discovery.
#[derive(Debug, Error)]
pub enum DnsError {
    /// Adapter enumeration failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A `resolv.conf` file exists but could not be used.
    #[error(transparent)]
    ResolvConf(#[from] ResolvConfError),
}

/// Where discovery looks and what it falls back to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovery {
    /// `resolv.conf` candidates, tried in order; unused on Windows.
    pub resolv_conf_paths: Vec<PathBuf>,
    /// Servers added to the default domain when nothing else was found.
    pub fallbacks: Vec<SocketAddr>,
}

impl Default for Discovery {
    fn default() -> Self {
        Self {
            resolv_conf_paths: resolv_conf::DEFAULT_PATHS.iter().map(PathBuf::from).collect(),
            fallbacks: FALLBACK_NAME_SERVERS.to_vec(),
        }
    }
}

impl Discovery {
    /// Discovers name servers using the platform's native source.
    ///
    /// # Errors
    ///
    /// Returns [`DnsError`] if the platform source fails.
    pub fn discover(&self, source: &dyn AdapterSource) -> Result<NameServers, DnsError> {
        if cfg!(windows) {
            self.discover_adapters(source)
        } else {
            self.discover_resolv_conf()
        }
    }

    /// Discovers name servers from the DNS server lists of adapters that are up.
    ///
    /// # Errors
    ///
    /// Returns [`DnsError::Fetch`] if enumeration fails.
    pub fn discover_adapters(&self, source: &dyn AdapterSource) -> Result<NameServers, DnsError> {
        let records = source.fetch(&AdapterQuery::name_servers())?;
        let mut servers = name_servers_from_adapters(&records);
        self.apply_fallbacks(&mut servers);
        Ok(servers)
    }

    /// Discovers name servers from the first existing `resolv.conf` candidate.
    ///
    /// # Errors
    ///
    /// Returns [`DnsError::ResolvConf`] if a candidate exists but cannot be
    /// read or parsed.
    pub fn discover_resolv_conf(&self) -> Result<NameServers, DnsError> {
        let mut servers = load_name_servers(&self.resolv_conf_paths)?.unwrap_or_default();
        self.apply_fallbacks(&mut servers);
        Ok(servers)
    }

    /// The resolver `ndots` threshold for this host.
    ///
    /// Windows has no equivalent setting and always reports
    /// [`DEFAULT_NDOTS`]. Elsewhere the first existing `resolv.conf`
    /// candidate is read and `RES_OPTIONS` overrides it.
    ///
    /// # Errors
    ///
    /// Returns [`DnsError::ResolvConf`] if a candidate exists but cannot be read.
    pub fn ndots(&self) -> Result<u8, DnsError> {
        if cfg!(windows) {
            return Ok(DEFAULT_NDOTS);
        }
        let res_options = std::env::var(RES_OPTIONS_VAR).ok();
        self.ndots_with(res_options.as_deref())
    }

    /// Resolves `ndots` from the `resolv.conf` candidates and an explicit
    /// `RES_OPTIONS` value.
    ///
    /// # Errors
    ///
    /// Returns [`DnsError::ResolvConf`] if a candidate exists but cannot be read.
    pub fn ndots_with(&self, res_options: Option<&str>) -> Result<u8, DnsError> {
        let ndots = load_ndots(&self.resolv_conf_paths, res_options)?;
        tracing::debug!("Resolver ndots threshold is {ndots}");
        Ok(ndots)
    }

    fn apply_fallbacks(&self, servers: &mut NameServers) {
        if servers.has_default_servers() {
            return;
        }
        tracing::debug!(
            "No name servers for the default domain, using {} fallback(s)",
            self.fallbacks.len()
        );
        servers.extend(DEFAULT_SEARCH_DOMAIN, self.fallbacks.iter().copied());
    }
}
