//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use crate::dns::{DNS_PORT, Discovery, IpPreference};
use crate::network::filter::{FilterChain, KindFilter, NameRegexFilter, OperStatusFilter};
use crate::network::{AdapterKind, AdapterQuery, IpVersion};

use super::cli::Cli;
use super::defaults;
use super::error::ConfigError;
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// Options of a subcommand other than the one being run are not read.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Address family for adapter listings
    pub ip_version: IpVersion,

    /// Whether adapters that are not up are listed
    pub include_down: bool,

    /// Whether WINS server lists are requested
    pub include_wins: bool,

    /// Adapter filter for listings
    pub filter: FilterChain,

    /// Ordering of the default-domain name servers
    pub prefer: IpPreference,

    /// Name-server discovery settings
    pub discovery: Discovery,

    /// JSON output requested
    pub json: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ ip_version: {}, include_down: {}, filters: {}+{}, prefer: {}, \
             resolv_conf: {}, fallbacks: {}, json: {} }}",
            self.ip_version,
            self.include_down,
            self.filter.include_count(),
            self.filter.exclude_count(),
            self.prefer,
            self.discovery.resolv_conf_paths.len(),
            self.discovery.fallbacks.len(),
            self.json,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The IP version or preference string is unknown
    /// - Regex patterns are invalid
    /// - Fallback addresses are invalid
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let ip_version = Self::resolve_ip_version(cli, toml)?;

        // Boolean flags only enable
        let include_down = cli.adapters().is_some_and(|a| a.include_down)
            || toml.is_some_and(|t| t.query.include_down);
        let include_wins = cli.adapters().is_some_and(|a| a.include_wins)
            || toml.is_some_and(|t| t.query.include_wins);

        let filter = Self::build_filter(cli, toml, include_down)?;
        let prefer = Self::resolve_prefer(cli, toml)?;
        let discovery = Discovery {
            resolv_conf_paths: Self::resolve_resolv_conf(cli, toml),
            fallbacks: Self::resolve_fallbacks(cli, toml)?,
        };

        let json = cli.adapters().is_some_and(|a| a.json)
            || cli.nameservers().is_some_and(|n| n.json);

        Ok(Self {
            ip_version,
            include_down,
            include_wins,
            filter,
            prefer,
            discovery,
            json,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    /// The enumeration query for adapter listings.
    #[must_use]
    pub fn adapter_query(&self) -> AdapterQuery {
        let query = AdapterQuery::default().with_version(self.ip_version);
        if self.include_wins {
            query.with_wins()
        } else {
            query
        }
    }

    fn resolve_ip_version(cli: &Cli, toml: Option<&TomlConfig>) -> Result<IpVersion, ConfigError> {
        if let Some(version) = cli.adapters().and_then(|a| a.ip_version) {
            return Ok(version.into());
        }

        match toml.and_then(|t| t.query.ip_version.as_deref()) {
            Some(version_str) => parse_ip_version(version_str),
            None => Ok(defaults::IP_VERSION),
        }
    }

    fn resolve_prefer(cli: &Cli, toml: Option<&TomlConfig>) -> Result<IpPreference, ConfigError> {
        if let Some(prefer) = cli.nameservers().and_then(|n| n.prefer) {
            return Ok(prefer.into());
        }

        match toml.and_then(|t| t.dns.prefer.as_deref()) {
            Some(prefer_str) => parse_preference(prefer_str),
            None => Ok(defaults::PREFERENCE),
        }
    }

    fn build_filter(
        cli: &Cli,
        toml: Option<&TomlConfig>,
        include_down: bool,
    ) -> Result<FilterChain, ConfigError> {
        let mut filter = FilterChain::new();

        if !include_down {
            filter = filter.require(OperStatusFilter);
        }

        let args = cli.adapters();
        let exclude_virtual = args.is_some_and(|a| a.exclude_virtual)
            || toml.is_some_and(|t| t.filter.exclude_virtual);
        let exclude_loopback = args.is_some_and(|a| a.exclude_loopback)
            || toml.is_some_and(|t| t.filter.exclude_loopback);

        if exclude_virtual {
            filter = filter.exclude(KindFilter::new([AdapterKind::Virtual]));
        }
        if exclude_loopback {
            filter = filter.exclude(KindFilter::new([AdapterKind::Loopback]));
        }

        // CLI patterns replace TOML patterns, separately for includes and excludes
        let cli_includes = args.map_or(&[][..], |a| a.include_adapters.as_slice());
        let includes = if cli_includes.is_empty() {
            toml.map_or(&[][..], |t| t.filter.include.as_slice())
        } else {
            cli_includes
        };
        for pattern in includes {
            filter = filter.include(compile(pattern)?);
        }

        let cli_excludes = args.map_or(&[][..], |a| a.exclude_adapters.as_slice());
        let excludes = if cli_excludes.is_empty() {
            toml.map_or(&[][..], |t| t.filter.exclude.as_slice())
        } else {
            cli_excludes
        };
        for pattern in excludes {
            filter = filter.exclude(compile(pattern)?);
        }

        Ok(filter)
    }

    fn resolve_resolv_conf(cli: &Cli, toml: Option<&TomlConfig>) -> Vec<PathBuf> {
        if let Some(args) = cli.nameservers().filter(|n| !n.resolv_conf.is_empty()) {
            return args.resolv_conf.clone();
        }

        toml.and_then(|t| t.dns.resolv_conf.as_ref())
            .map_or_else(defaults::resolv_conf_paths, |paths| {
                paths.iter().map(PathBuf::from).collect()
            })
    }

    fn resolve_fallbacks(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Vec<SocketAddr>, ConfigError> {
        if let Some(args) = cli.nameservers().filter(|n| !n.fallbacks.is_empty()) {
            return args.fallbacks.iter().map(|s| parse_server(s)).collect();
        }

        match toml.and_then(|t| t.dns.fallbacks.as_ref()) {
            Some(values) => values.iter().map(|s| parse_server(s)).collect(),
            None => Ok(defaults::fallbacks()),
        }
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn compile(pattern: &str) -> Result<NameRegexFilter, ConfigError> {
    NameRegexFilter::new(pattern).map_err(|e| ConfigError::InvalidRegex {
        pattern: pattern.to_string(),
        source: e,
    })
}

fn parse_ip_version(s: &str) -> Result<IpVersion, ConfigError> {
    match s.to_lowercase().as_str() {
        "ipv4" | "v4" | "4" => Ok(IpVersion::V4),
        "ipv6" | "v6" | "6" => Ok(IpVersion::V6),
        "both" | "all" | "dual" => Ok(IpVersion::Both),
        _ => Err(ConfigError::InvalidIpVersion {
            value: s.to_string(),
        }),
    }
}

fn parse_preference(s: &str) -> Result<IpPreference, ConfigError> {
    match s.to_lowercase().as_str() {
        "ipv6-first" | "ipv6_first" => Ok(IpPreference::Ipv6First),
        "ipv4-only" | "ipv4_only" => Ok(IpPreference::Ipv4Only),
        "as-listed" | "as_listed" => Ok(IpPreference::AsListed),
        _ => Err(ConfigError::InvalidPreference {
            value: s.to_string(),
        }),
    }
}

/// Parses `IP`, `IP:PORT` or `[IPv6]:PORT`; a bare IP gets [`DNS_PORT`].
fn parse_server(s: &str) -> Result<SocketAddr, ConfigError> {
    let trimmed = s.trim();
    trimmed
        .parse::<SocketAddr>()
        .or_else(|_| {
            trimmed
                .parse::<IpAddr>()
                .map(|ip| SocketAddr::new(ip, DNS_PORT))
        })
        .map_err(|_| ConfigError::InvalidAddress {
            value: s.to_string(),
        })
}
