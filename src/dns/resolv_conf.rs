//! `resolv.conf` parsing for name servers and `ndots`.
//!
//! Supported lines:
//! - `nameserver ADDR`: ADDR is an IP address, optionally followed by
//!   `.PORT` (`10.0.0.1.5353`); IPv6 zones (`fe80::1%3`) keep numeric scope ids
//! - `port N`: port for the `nameserver` lines that follow
//! - `domain NAME`: the `nameserver` lines that follow belong to NAME
//! - `options` / `search` tokens of the form `ndots:N`
//!
//! `#` and `;` start comment lines. Other keywords are ignored.

use std::io;
use std::net::{IpAddr, SocketAddr, SocketAddrV6};
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::{DEFAULT_SEARCH_DOMAIN, DNS_PORT, NameServers};

/// Candidate locations, tried in order: the Unix path, then the `NetWare` one.
pub const DEFAULT_PATHS: [&str; 2] = ["/etc/resolv.conf", "sys:/etc/resolv.cfg"];

/// `ndots` when nothing configures it.
pub const DEFAULT_NDOTS: u8 = 1;

/// Largest `ndots` value honored; larger values are capped.
pub const MAX_NDOTS: u8 = 15;

/// Error type for `resolv.conf` loading and parsing.
#[derive(Debug, Error)]
pub enum ResolvConfError {
    /// The file exists but could not be read.
    #[error("Failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A keyword line has no value.
    #[error("line {line}: '{keyword}' needs a value")]
    MissingValue { line: usize, keyword: &'static str },

    /// A `nameserver` value is neither an address nor `address.port`.
    #[error("line {line}: invalid name server address '{value}'")]
    InvalidAddress { line: usize, value: String },

    /// A `port` value is not a valid port number.
    #[error("line {line}: invalid port '{value}'")]
    InvalidPort { line: usize, value: String },

    /// A parse error, with the file it came from.
    #[error("Invalid '{}': {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: Box<Self>,
    },
}

/// Parses the name-server lines of `text`.
///
/// Servers listed before the first `domain` line belong to
/// [`DEFAULT_SEARCH_DOMAIN`]. Domains without any server are not recorded.
///
/// # Errors
///
/// Returns [`ResolvConfError`] with the 1-based line number of the first
/// malformed `nameserver`, `port` or `domain` line.
pub fn parse_name_servers(text: &str) -> Result<NameServers, ResolvConfError> {
    let mut name_servers = NameServers::new();
    let mut domain = DEFAULT_SEARCH_DOMAIN.to_string();
    let mut pending: Vec<SocketAddr> = Vec::new();
    let mut port = DNS_PORT;

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let mut tokens = raw.split_whitespace();
        let Some(keyword) = tokens.next() else {
            continue;
        };
        if keyword.starts_with('#') || keyword.starts_with(';') {
            continue;
        }

        match keyword {
            "nameserver" => {
                let value = tokens.next().ok_or(ResolvConfError::MissingValue {
                    line,
                    keyword: "nameserver",
                })?;
                let server = parse_server(value, port).ok_or_else(|| {
                    ResolvConfError::InvalidAddress {
                        line,
                        value: value.to_string(),
                    }
                })?;
                pending.push(server);
            }
            "port" => {
                let value = tokens.next().ok_or(ResolvConfError::MissingValue {
                    line,
                    keyword: "port",
                })?;
                port = value.parse().map_err(|_| ResolvConfError::InvalidPort {
                    line,
                    value: value.to_string(),
                })?;
            }
            "domain" => {
                let value = tokens.next().ok_or(ResolvConfError::MissingValue {
                    line,
                    keyword: "domain",
                })?;
                flush(&mut name_servers, &domain, &mut pending);
                domain = value.to_string();
            }
            _ => {}
        }
    }

    flush(&mut name_servers, &domain, &mut pending);
    Ok(name_servers)
}

fn flush(name_servers: &mut NameServers, domain: &str, pending: &mut Vec<SocketAddr>) {
    if !pending.is_empty() {
        name_servers.extend(domain, pending.drain(..));
    }
}

/// Parses a `nameserver` value: a bare address, or `address.port` when the
/// whole token is not an address.
fn parse_server(value: &str, port: u16) -> Option<SocketAddr> {
    if let Some(address) = parse_address(value, port) {
        return Some(address);
    }

    let (host, explicit_port) = value.rsplit_once('.')?;
    let explicit_port = explicit_port.parse().ok()?;
    parse_address(host, explicit_port)
}

fn parse_address(value: &str, port: u16) -> Option<SocketAddr> {
    if let Ok(ip) = value.parse::<IpAddr>() {
        return Some(SocketAddr::new(ip, port));
    }

    // IPv6 with a zone: only numeric zones map to a scope id.
    let (host, zone) = value.split_once('%')?;
    let ip = host.parse().ok()?;
    let scope_id = zone.parse().unwrap_or(0);
    Some(SocketAddr::V6(SocketAddrV6::new(ip, port, 0, scope_id)))
}

/// Resolves the effective `ndots` from `text` and the `RES_OPTIONS` value.
///
/// `ndots:N` tokens on `options` and `search` lines are honored, the last
/// one winning; `res_options` is applied afterwards and so overrides the
/// file. Values above [`MAX_NDOTS`] are capped; negative or malformed values
/// reset to [`DEFAULT_NDOTS`].
#[must_use]
pub fn parse_ndots(text: &str, res_options: Option<&str>) -> u8 {
    let mut ndots = DEFAULT_NDOTS;

    for raw in text.lines() {
        let mut tokens = raw.split_whitespace();
        if matches!(tokens.next(), Some("options" | "search")) {
            ndots = apply_ndots_tokens(ndots, tokens);
        }
    }

    if let Some(options) = res_options {
        ndots = apply_ndots_tokens(ndots, options.split_whitespace());
    }

    ndots
}

fn apply_ndots_tokens<'a>(current: u8, tokens: impl Iterator<Item = &'a str>) -> u8 {
    tokens
        .filter_map(|token| token.strip_prefix("ndots:"))
        .fold(current, |_, value| ndots_value(value))
}

fn ndots_value(value: &str) -> u8 {
    match value.parse::<i64>() {
        Ok(n) if n >= 0 => u8::try_from(n.min(i64::from(MAX_NDOTS))).unwrap_or(MAX_NDOTS),
        _ => DEFAULT_NDOTS,
    }
}

/// Parses name servers from the first candidate that exists.
///
/// Returns `Ok(None)` when none of `paths` exists.
///
/// # Errors
///
/// Returns [`ResolvConfError::Read`] if an existing file cannot be read and
/// [`ResolvConfError::File`] if it cannot be parsed.
pub fn load_name_servers<P: AsRef<Path>>(
    paths: &[P],
) -> Result<Option<NameServers>, ResolvConfError> {
    let Some((path, text)) = read_first(paths)? else {
        return Ok(None);
    };

    let name_servers = parse_name_servers(&text).map_err(|source| ResolvConfError::File {
        path: path.clone(),
        source: Box::new(source),
    })?;
    tracing::debug!(
        "Loaded {} name server domain(s) from {}",
        name_servers.iter().count(),
        path.display()
    );
    Ok(Some(name_servers))
}

/// Resolves `ndots` from the first existing candidate plus `res_options`.
///
/// # Errors
///
/// Returns [`ResolvConfError::Read`] if an existing file cannot be read.
pub fn load_ndots<P: AsRef<Path>>(
    paths: &[P],
    res_options: Option<&str>,
) -> Result<u8, ResolvConfError> {
    let text = read_first(paths)?.map(|(_, text)| text).unwrap_or_default();
    Ok(parse_ndots(&text, res_options))
}

fn read_first<P: AsRef<Path>>(paths: &[P]) -> Result<Option<(PathBuf, String)>, ResolvConfError> {
    for path in paths {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => return Ok(Some((path.to_path_buf(), text))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::trace!("No resolver configuration at {}", path.display());
            }
            Err(source) => {
                return Err(ResolvConfError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        }
    }
    Ok(None)
}

#[cfg(test)]
#[path = "resolv_conf_tests.rs"]
mod tests;
