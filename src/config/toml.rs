//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Adapter query configuration
    #[serde(default)]
    pub query: QuerySection,

    /// Network adapter filter configuration
    #[serde(default)]
    pub filter: FilterSection,

    /// Name-server discovery configuration
    #[serde(default)]
    pub dns: DnsSection,
}

/// Adapter query configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuerySection {
    /// Address family: "ipv4", "ipv6", or "both"
    pub ip_version: Option<String>,

    /// List adapters that are not operationally up
    #[serde(default)]
    pub include_down: bool,

    /// Ask for each adapter's WINS server list
    #[serde(default)]
    pub include_wins: bool,
}

/// Adapter filter configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterSection {
    /// Regex patterns for adapters to include
    #[serde(default)]
    pub include: Vec<String>,

    /// Regex patterns for adapters to exclude
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Exclude virtual adapters
    #[serde(default)]
    pub exclude_virtual: bool,

    /// Exclude loopback adapters
    #[serde(default)]
    pub exclude_loopback: bool,
}

/// Name-server discovery configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DnsSection {
    /// Ordering: "ipv6-first", "ipv4-only", or "as-listed"
    pub prefer: Option<String>,

    /// resolv.conf candidates, tried in order
    pub resolv_conf: Option<Vec<String>>,

    /// Fallback servers as "IP" or "IP:PORT"
    pub fallbacks: Option<Vec<String>>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# adapter-dns configuration file

[query]
# Address family for `adapters` (default: both)
# Accepted values: "ipv4"/"v4"/"4", "ipv6"/"v6"/"6", or "both"/"all"/"dual"
# ip_version = "both"

# List adapters that are not operationally up
# include_down = false

# Ask for each adapter's WINS server list
# include_wins = false

[filter]
# Regex patterns for adapter friendly names to include (empty = all)
# Note: CLI patterns REPLACE these entirely (not merged)
# include = ["^Ethernet", "^Wi-Fi"]

# Regex patterns for adapter friendly names to exclude
# Note: CLI patterns REPLACE these entirely (not merged)
# exclude = ["^vEthernet"]

# Exclude virtual adapters (tunnels, PPP)
# exclude_virtual = false

# Exclude loopback adapters
# exclude_loopback = false

[dns]
# Ordering of default-domain servers: "ipv6-first", "ipv4-only", or "as-listed"
# prefer = "as-listed"

# resolv.conf candidates on non-Windows systems, tried in order
# resolv_conf = ["/etc/resolv.conf", "sys:/etc/resolv.cfg"]

# Servers used when nothing else is found for the default domain
# fallbacks = ["1.1.1.1", "8.8.8.8"]
"#
    .to_string()
}
