//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::dns::IpPreference;
use crate::network::IpVersion;

use super::defaults;

/// adapter-dns: network adapter and name-server inspector
///
/// Lists network adapters as reported by the Windows IP Helper API and
/// discovers the DNS name servers the system resolver would use.
#[derive(Debug, Parser)]
#[command(name = "adapter-dns")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for adapter-dns
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List network adapters with their addresses and DNS settings
    Adapters(AdaptersArgs),

    /// Discover the system's DNS name servers
    Nameservers(NameserversArgs),

    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = defaults::CONFIG_FILE)]
        output: PathBuf,
    },
}

/// Options for the `adapters` subcommand.
#[derive(Debug, Default, Args)]
#[allow(clippy::struct_excessive_bools)] // CLI flags are naturally boolean
pub struct AdaptersArgs {
    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Address family to query
    #[arg(long = "ip-version", value_enum)]
    pub ip_version: Option<IpVersionArg>,

    /// Also list adapters that are not operationally up
    #[arg(long = "include-down")]
    pub include_down: bool,

    /// Also ask for each adapter's WINS server list
    #[arg(long = "include-wins")]
    pub include_wins: bool,

    /// Regex pattern for adapters to include (can be specified multiple times)
    #[arg(long = "include-adapter", value_name = "PATTERN")]
    pub include_adapters: Vec<String>,

    /// Regex pattern for adapters to exclude (can be specified multiple times)
    #[arg(long = "exclude-adapter", value_name = "PATTERN")]
    pub exclude_adapters: Vec<String>,

    /// Exclude virtual adapters (tunnels, PPP)
    #[arg(long = "exclude-virtual")]
    pub exclude_virtual: bool,

    /// Exclude loopback adapters
    #[arg(long = "exclude-loopback")]
    pub exclude_loopback: bool,
}

/// Options for the `nameservers` subcommand.
#[derive(Debug, Default, Args)]
pub struct NameserversArgs {
    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Ordering of the default-domain servers
    #[arg(long, value_enum)]
    pub prefer: Option<PreferArg>,

    /// resolv.conf candidate, tried in order (can be specified multiple times)
    #[arg(long = "resolv-conf", value_name = "PATH")]
    pub resolv_conf: Vec<PathBuf>,

    /// Fallback server as IP or IP:PORT (can be specified multiple times)
    #[arg(long = "fallback", value_name = "ADDR")]
    pub fallbacks: Vec<String>,
}

/// IP version argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum IpVersionArg {
    /// IPv4 addresses only
    #[value(name = "ipv4")]
    V4,
    /// IPv6 addresses only
    #[value(name = "ipv6")]
    V6,
    /// Both IPv4 and IPv6 addresses
    #[value(name = "both")]
    Both,
}

impl From<IpVersionArg> for IpVersion {
    fn from(arg: IpVersionArg) -> Self {
        match arg {
            IpVersionArg::V4 => Self::V4,
            IpVersionArg::V6 => Self::V6,
            IpVersionArg::Both => Self::Both,
        }
    }
}

/// Name-server ordering argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PreferArg {
    /// IPv6 servers first, then IPv4
    #[value(name = "ipv6-first")]
    Ipv6First,
    /// IPv4 servers only
    #[value(name = "ipv4-only")]
    Ipv4Only,
    /// Keep discovery order
    #[value(name = "as-listed")]
    AsListed,
}

impl From<PreferArg> for IpPreference {
    fn from(arg: PreferArg) -> Self {
        match arg {
            PreferArg::Ipv6First => Self::Ipv6First,
            PreferArg::Ipv4Only => Self::Ipv4Only,
            PreferArg::AsListed => Self::AsListed,
        }
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Fallible variant of [`Cli::parse_from_iter`].
    ///
    /// # Errors
    ///
    /// Returns the clap error for invalid arguments.
    pub fn try_parse_from_iter<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Command::Init { .. })
    }

    /// The `adapters` options, if that subcommand was given.
    #[must_use]
    pub const fn adapters(&self) -> Option<&AdaptersArgs> {
        match &self.command {
            Command::Adapters(args) => Some(args),
            _ => None,
        }
    }

    /// The `nameservers` options, if that subcommand was given.
    #[must_use]
    pub const fn nameservers(&self) -> Option<&NameserversArgs> {
        match &self.command {
            Command::Nameservers(args) => Some(args),
            _ => None,
        }
    }
}
