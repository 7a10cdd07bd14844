//! Subcommand execution and output rendering.

use std::io::{self, Write};

use thiserror::Error;

use adapter_dns::config::ValidatedConfig;
use adapter_dns::dns::{DEFAULT_SEARCH_DOMAIN, DnsError, IpPreference, NameServers};
use adapter_dns::network::filter::FilteredSource;
use adapter_dns::network::platform::PlatformSource;
use adapter_dns::network::{AdapterRecord, AdapterSource, FetchError};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Adapter enumeration failed.
    #[error("Failed to enumerate adapters: {0}")]
    Fetch(#[source] FetchError),

    /// Name-server discovery failed.
    #[error("Failed to discover name servers: {0}")]
    Discovery(#[source] DnsError),

    /// JSON serialization failed.
    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing to stdout failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Runs `adapters`: enumerates, filters and prints adapters.
pub fn list_adapters(config: ValidatedConfig) -> Result<(), RunError> {
    let query = config.adapter_query();
    let json = config.json;
    let source = FilteredSource::new(PlatformSource::new(), config.filter);

    let adapters = source.fetch(&query).map_err(RunError::Fetch)?;
    tracing::debug!("Listing {} adapter(s)", adapters.len());

    let mut out = io::stdout().lock();
    render_adapters(&mut out, &adapters, json)
}

/// Runs `nameservers`: discovers and prints name servers.
pub fn list_name_servers(config: &ValidatedConfig) -> Result<(), RunError> {
    let servers = config
        .discovery
        .discover(&PlatformSource::new())
        .map_err(RunError::Discovery)?;
    let ndots = config.discovery.ndots().map_err(RunError::Discovery)?;

    let mut out = io::stdout().lock();
    render_name_servers(&mut out, &servers, ndots, config.prefer, config.json)
}

/// Writes adapters as JSON or as an indented text listing.
pub fn render_adapters(
    out: &mut impl Write,
    adapters: &[AdapterRecord],
    json: bool,
) -> Result<(), RunError> {
    if json {
        serde_json::to_writer_pretty(&mut *out, adapters)?;
        writeln!(out)?;
        return Ok(());
    }

    for (i, adapter) in adapters.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        write_adapter(out, adapter)?;
    }
    Ok(())
}

fn write_adapter(out: &mut impl Write, adapter: &AdapterRecord) -> io::Result<()> {
    writeln!(
        out,
        "{} (index {}, {:?}, {:?})",
        adapter.friendly_name, adapter.if_index, adapter.kind, adapter.oper_status
    )?;
    field(out, "name", &adapter.adapter_name)?;
    field(out, "description", &adapter.description)?;
    if !adapter.physical_address.is_empty() {
        field(out, "mac", &adapter.physical_address)?;
    }
    field(out, "mtu", adapter.mtu)?;
    for unicast in &adapter.unicast {
        field(
            out,
            "unicast",
            format_args!("{}/{}", unicast.address.ip(), unicast.on_link_prefix_length),
        )?;
    }
    for gateway in &adapter.gateways {
        field(out, "gateway", gateway.ip())?;
    }
    for server in &adapter.dns_servers {
        field(out, "dns server", server.ip())?;
    }
    for server in &adapter.wins_servers {
        field(out, "wins server", server.ip())?;
    }
    if !adapter.dns_suffix.is_empty() {
        field(out, "dns suffix", &adapter.dns_suffix)?;
    }
    for suffix in &adapter.dns_suffixes {
        field(out, "search", suffix)?;
    }
    Ok(())
}

fn field(out: &mut impl Write, label: &str, value: impl std::fmt::Display) -> io::Result<()> {
    writeln!(out, "  {:<12} {value}", format!("{label}:"))
}

/// Writes the `ndots` threshold and name servers as JSON or as text with one
/// block per domain.
///
/// The default domain is always written first, ordered by `prefer`.
pub fn render_name_servers(
    out: &mut impl Write,
    servers: &NameServers,
    ndots: u8,
    prefer: IpPreference,
    json: bool,
) -> Result<(), RunError> {
    let default = servers.default_servers(prefer);

    if json {
        let domains: serde_json::Map<String, serde_json::Value> = servers
            .iter()
            .filter(|(domain, _)| *domain != DEFAULT_SEARCH_DOMAIN)
            .map(|(domain, list)| Ok((domain.to_string(), serde_json::to_value(list)?)))
            .collect::<Result<_, serde_json::Error>>()?;
        let document = serde_json::json!({
            "ndots": ndots,
            "default": default,
            "domains": domains,
        });
        serde_json::to_writer_pretty(&mut *out, &document)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "ndots: {ndots}")?;
    writeln!(out, "default ({prefer}):")?;
    for server in &default {
        writeln!(out, "  {server}")?;
    }
    for (domain, list) in servers.iter() {
        if domain == DEFAULT_SEARCH_DOMAIN {
            continue;
        }
        writeln!(out, "{domain}:")?;
        for server in list {
            writeln!(out, "  {server}")?;
        }
    }
    Ok(())
}
