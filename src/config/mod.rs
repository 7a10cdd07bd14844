//! Configuration layer for adapter-dns.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! For list options (`include`/`exclude` patterns, `resolv_conf`, `fallbacks`),
//! a non-empty CLI list **replaces** the TOML list entirely. Include and exclude
//! patterns are replaced independently.
//!
//! # Boolean Flag Semantics
//!
//! Boolean flags (`--include-down`, `--exclude-virtual`, `--exclude-loopback`)
//! use OR semantics: if set `true` in either CLI or TOML, the result is `true`.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod validated_tests;

pub use cli::{AdaptersArgs, Cli, Command, IpVersionArg, NameserversArgs, PreferArg};
pub use error::ConfigError;
pub use toml::{TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
